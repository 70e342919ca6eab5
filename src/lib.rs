//! Driver library for Pixie chained 5x7 LED matrix displays.
//!
//! A `Pixie` keeps a frame buffer of eight bytes per display, and sends it through a
//! `PixieInterface` when `show` is called. Two interfaces are provided: `BitBangInterface` for any
//! two GPIO outputs, and `SpiInterface` for a hardware SPI master.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;

pub mod config;
pub mod display;
pub mod font;
pub mod icons;
pub mod interface;
pub mod text;

use log::info;

// Re-exports for primary API.
pub use config::Config;
pub use display::{write_text, Cell, Pixie};
pub use font::{glyph, Glyph};
pub use icons::Icon;
pub use interface::bitbang::BitBangInterface;
pub use interface::spi::SpiInterface;
pub use interface::PixieInterface;
pub use text::{float_len, int_len, uint_len};

/// Log a glyph or icon as seven lines of ASCII art, to check how it will look before sending it
/// to the hardware.
pub fn printout<G: Into<Glyph>>(glyph: G) {
    info!("\n{}", glyph.into());
}
