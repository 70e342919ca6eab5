//! Named 5x7 icons which can be written, printed, pushed or shifted like characters.
//!
//! Icons use the same column format as the font: five bytes, left to right, bit 0 at the top.

/// Five columns of raw pixel data for one display.
pub type Icon = [u8; 5];

pub const HEART: Icon = [0x0C, 0x1E, 0x3C, 0x1E, 0x0C];
pub const SMILEY: Icon = [0x10, 0x26, 0x20, 0x26, 0x10];
pub const FROWN: Icon = [0x20, 0x16, 0x10, 0x16, 0x20];
pub const ARROW_UP: Icon = [0x08, 0x04, 0x3E, 0x04, 0x08];
pub const ARROW_DOWN: Icon = [0x08, 0x10, 0x3E, 0x10, 0x08];
pub const ARROW_LEFT: Icon = [0x08, 0x1C, 0x2A, 0x08, 0x08];
pub const ARROW_RIGHT: Icon = [0x08, 0x08, 0x2A, 0x1C, 0x08];
pub const DEGREE: Icon = [0x00, 0x07, 0x05, 0x07, 0x00];
pub const CHECK: Icon = [0x10, 0x20, 0x10, 0x08, 0x04];
pub const CROSS: Icon = [0x22, 0x14, 0x08, 0x14, 0x22];
pub const BELL: Icon = [0x10, 0x1E, 0x5F, 0x1E, 0x10];
pub const NOTE: Icon = [0x00, 0x30, 0x30, 0x3F, 0x03];
pub const FULL: Icon = [0x7F; 5];
pub const EMPTY: Icon = [0x00; 5];

/// Every named icon, in the order they are declared above.
#[cfg_attr(rustfmt, rustfmt_skip)]
pub const ALL: [(&str, Icon); 14] = [
    ("heart", HEART),
    ("smiley", SMILEY),
    ("frown", FROWN),
    ("arrow_up", ARROW_UP),
    ("arrow_down", ARROW_DOWN),
    ("arrow_left", ARROW_LEFT),
    ("arrow_right", ARROW_RIGHT),
    ("degree", DEGREE),
    ("check", CHECK),
    ("cross", CROSS),
    ("bell", BELL),
    ("note", NOTE),
    ("full", FULL),
    ("empty", EMPTY),
];

/// Look up an icon by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<Icon> {
    ALL.iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, icon)| icon)
}
