//! Formatting of numbers into display text without allocation.

use core::fmt::{self, Write};

/// Capacity of a `TextBuf`, enough for any `i32`, `u32` or sensibly sized fixed-point `f32`.
pub const TEXT_BUF_LEN: usize = 48;

/// A fixed-capacity text buffer. Writes past the capacity are silently truncated, so formatting
/// into it never fails.
pub struct TextBuf {
    buf: [u8; TEXT_BUF_LEN],
    len: usize,
}

impl TextBuf {
    pub fn new() -> Self {
        TextBuf {
            buf: [0; TEXT_BUF_LEN],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole `&str`s are copied in and truncation backs off to a char boundary, so the
        // filled part is always valid UTF-8.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for TextBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for TextBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = TEXT_BUF_LEN - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Format a signed integer in decimal.
pub fn format_int(value: i32) -> TextBuf {
    let mut out = TextBuf::new();
    let _ = write!(out, "{}", value);
    out
}

/// Format an unsigned integer in decimal.
pub fn format_uint(value: u32) -> TextBuf {
    let mut out = TextBuf::new();
    let _ = write!(out, "{}", value);
    out
}

/// Format a float with exactly `places` digits after the decimal point. Zero places prints no
/// decimal point.
pub fn format_float(value: f32, places: u8) -> TextBuf {
    let mut out = TextBuf::new();
    let _ = write!(out, "{:.*}", places as usize, value);
    out
}

/// Number of characters (and thus displays) `value` occupies when written.
pub fn int_len(value: i32) -> usize {
    format_int(value).len()
}

/// Number of characters (and thus displays) `value` occupies when written.
pub fn uint_len(value: u32) -> usize {
    format_uint(value).len()
}

/// Number of characters (and thus displays) `value` occupies when written with `places` decimals.
pub fn float_len(value: f32, places: u8) -> usize {
    format_float(value, places).len()
}
