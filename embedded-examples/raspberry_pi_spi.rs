//! Drives six Pixie displays from the Raspberry Pi's hardware SPI: a scrolling greeting, a few
//! icons pushed and shifted in, and a brightness sweep.
//!
//! Wiring: DAT to MOSI (header pin 19), CLK to SCLK (header pin 23). SPI must be enabled, e.g.
//! with `dtparam=spi=on`.

extern crate embedded_hal;
extern crate env_logger;
extern crate linux_embedded_hal as linux_hal;
extern crate pixie;

use std::io;

use embedded_hal::blocking::delay::DelayMs;
use linux_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_hal::{Delay, Spidev};
use pixie::{icons, Config, Pixie, SpiInterface};

fn main() -> io::Result<()> {
    env_logger::init();

    let mut spi = Spidev::open("/dev/spidev0.0")?;
    spi.configure(
        &SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(40_000)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build(),
    )?;

    let mut delay = Delay;
    let cfg = Config::new().scroll_delay_ms(80).brightness(100);
    let mut pix = Pixie::<_, 6>::with_config(SpiInterface::new(spi, Delay), cfg);
    pix.begin()?;

    let wait = pix.scroll_delay_ms();
    pix.scroll_message("Hello from Rust!", wait, &mut delay)?;
    pix.scroll_message_instant("fast", wait / 2, &mut delay)?;

    for name in &["heart", "smiley", "note"] {
        if let Some(icon) = icons::by_name(name) {
            pixie::printout(icon);
            pix.push_icon(&icon);
            pix.show()?;
            delay.delay_ms(500u16);
        }
    }
    pix.shift_str("Hi");
    pix.show()?;
    delay.delay_ms(1000u16);

    for level in (0..=127).rev().step_by(8) {
        pix.brightness(level);
        pix.clear();
        pix.write_uint(level as u32, 0);
        pix.show()?;
        delay.delay_ms(100u16);
    }
    Ok(())
}
