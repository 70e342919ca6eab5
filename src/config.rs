//! Defines the runtime settings of a Pixie chain which are independent of how it is wired.

/// Brightness byte written into a display cell at full brightness.
pub const BRIGHTNESS_MAX: u8 = 127;
/// Offset added to a brightness level to form the brightness byte of a display cell.
pub(crate) const BRIGHTNESS_BASE: u8 = 128;

/// Convert a brightness level into the byte stored in a display cell. Levels above
/// `BRIGHTNESS_MAX` are clamped.
pub(crate) fn brightness_byte(level: u8) -> u8 {
    BRIGHTNESS_BASE + level.min(BRIGHTNESS_MAX)
}

/// A configuration for the chain. Builder methods offer a declarative way to override the
/// defaults, which match what the modules do out of the box: full brightness, upright
/// orientation, and the stock scroll pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) brightness: u8,
    pub(crate) flipped: bool,
    pub(crate) scroll_delay_ms: u16,
    pub(crate) tail_delay_ms: u16,
}

impl Config {
    pub fn new() -> Self {
        Config {
            brightness: BRIGHTNESS_MAX,
            flipped: false,
            scroll_delay_ms: 100,
            tail_delay_ms: 150,
        }
    }

    /// Extend this `Config` with the brightness level (0-127) used for text and icons. See
    /// `Pixie::brightness`.
    pub fn brightness(self, level: u8) -> Self {
        Self {
            brightness: level.min(BRIGHTNESS_MAX),
            ..self
        }
    }

    /// Extend this `Config` to rotate the image by 180 degrees, for chains mounted upside down.
    /// See `Pixie::flipped`.
    pub fn flipped(self, flipped: bool) -> Self {
        Self { flipped, ..self }
    }

    /// Extend this `Config` with the pause after each character of `Pixie::scroll_message`.
    pub fn scroll_delay_ms(self, ms: u16) -> Self {
        Self {
            scroll_delay_ms: ms,
            ..self
        }
    }

    /// Extend this `Config` with the pause after each display width of blank columns that
    /// `Pixie::scroll_message` scrolls in once the message has been shown.
    pub fn tail_delay_ms(self, ms: u16) -> Self {
        Self {
            tail_delay_ms: ms,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
