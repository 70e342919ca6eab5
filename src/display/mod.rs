//! The main API to the driver. `Pixie` owns a frame buffer for a chain of `N` displays and an
//! interface to send it through. Drawing methods only touch the buffer; nothing reaches the
//! hardware until `show` is called.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    use crate::font::glyph;

    /// The cell `Pixie` writes for `c` at brightness byte `bright`.
    pub fn cell(c: char, bright: u8) -> [u8; 8] {
        let g = glyph(c).0;
        [0, bright, 0, g[0], g[1], g[2], g[3], g[4]]
    }

    macro_rules! frame {
        ($($cell:expr),*) => {{
            let mut bytes = Vec::new();
            $(bytes.extend_from_slice(&$cell);)*
            Sent::Frame(bytes)
        }};
    }

    /// A `log` backend that keeps every record, so tests can check what was logged. Tests run in
    /// parallel and share it, so look for lines only the test at hand can produce.
    pub mod logs {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::sync::Mutex;

        struct CaptureLogger;

        static LOGGER: CaptureLogger = CaptureLogger;
        static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

        impl Log for CaptureLogger {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                if let Ok(mut records) = RECORDS.lock() {
                    records.push((record.level(), record.args().to_string()));
                }
            }

            fn flush(&self) {}
        }

        /// Install the capturing logger. Later calls are no-ops.
        pub fn capture() {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
        }

        /// Whether a record with exactly this level and message has been logged.
        pub fn contains(level: Level, message: &str) -> bool {
            RECORDS
                .lock()
                .unwrap()
                .iter()
                .any(|(l, m)| *l == level && m == message)
        }
    }
}

pub mod stream;

use log::{debug, trace};

use crate::config::{brightness_byte, Config};
use crate::font::{glyph, Glyph, GLYPH_COLS, GLYPH_ROWS};
use crate::icons::Icon;
use crate::interface::PixieInterface;
use crate::text;

/// Number of bytes of frame buffer belonging to one display.
pub const CELL_LEN: usize = 8;
/// Offset of the brightness byte within a cell.
const BRIGHTNESS_OFFSET: usize = 1;
/// Offset of the first glyph column within a cell.
const COLUMNS_OFFSET: usize = 3;

/// The frame buffer of one display: two framing bytes around the brightness byte, then the five
/// glyph columns.
pub type Cell = [u8; CELL_LEN];

/// A driver for a chain of `N` Pixie displays.
pub struct Pixie<DI, const N: usize>
where
    DI: PixieInterface,
{
    iface: DI,
    buffer: [Cell; N],
    /// Brightness byte stamped into cells by subsequent writes.
    bright: u8,
    cursor: usize,
    flipped: bool,
    scroll_delay_ms: u16,
    tail_delay_ms: u16,
}

impl<DI, const N: usize> Pixie<DI, N>
where
    DI: PixieInterface,
{
    /// Construct a driver for `N` displays connected to `iface`, with the default configuration.
    pub fn new(iface: DI) -> Self {
        Self::with_config(iface, Config::new())
    }

    /// Construct a driver for `N` displays connected to `iface`.
    pub fn with_config(iface: DI, config: Config) -> Self {
        Pixie {
            iface,
            buffer: [[0; CELL_LEN]; N],
            bright: brightness_byte(config.brightness),
            cursor: 0,
            flipped: config.flipped,
            scroll_delay_ms: config.scroll_delay_ms,
            tail_delay_ms: config.tail_delay_ms,
        }
    }

    /// Reset the chain and start from an empty buffer. Call once before the first `show`.
    pub fn begin(&mut self) -> Result<(), DI::Error> {
        debug!("pixie: begin with {} displays", N);
        self.reset()?;
        self.clear();
        Ok(())
    }

    /// Reset every display in the chain. The frame buffer is left alone.
    pub fn reset(&mut self) -> Result<(), DI::Error> {
        debug!("pixie: reset");
        self.iface.reset()
    }

    /// Send the frame buffer to the displays.
    pub fn show(&mut self) -> Result<(), DI::Error> {
        trace!("pixie: show {} bytes (flipped: {})", N * CELL_LEN, self.flipped);
        if self.flipped {
            let rotated = self.rotated();
            self.iface.send_frame(rotated.as_flattened())
        } else {
            self.iface.send_frame(self.buffer.as_flattened())
        }
    }

    /// Blank the whole frame buffer.
    pub fn clear(&mut self) {
        self.buffer = [[0; CELL_LEN]; N];
    }

    /// Set the brightness level, from 0 to 127, used by everything written afterwards. Levels
    /// above 127 are clamped. Cells already in the buffer keep their brightness.
    pub fn brightness(&mut self, level: u8) {
        debug!("pixie: brightness {}", level);
        self.bright = brightness_byte(level);
    }

    /// Change the brightness level of the display at `pos` without rewriting its contents.
    pub fn write_brightness(&mut self, level: u8, pos: usize) {
        if let Some(cell) = self.buffer.get_mut(pos) {
            cell[BRIGHTNESS_OFFSET] = brightness_byte(level);
        }
    }

    /// Rotate the transmitted image by 180 degrees, for chains mounted upside down. The buffer
    /// itself is always kept upright.
    pub fn flipped(&mut self, enable: bool) {
        debug!("pixie: flipped {}", enable);
        self.flipped = enable;
    }

    pub fn write_char(&mut self, c: char, pos: usize) {
        self.set_columns(pos, glyph(c).0);
    }

    /// Write `s` one character per display starting at `pos`. Characters past the end of the
    /// chain are dropped.
    pub fn write_str(&mut self, s: &str, pos: usize) {
        self.put_str(s, pos);
    }

    pub fn write_int(&mut self, value: i32, pos: usize) {
        self.put_str(text::format_int(value).as_str(), pos);
    }

    pub fn write_uint(&mut self, value: u32, pos: usize) {
        self.put_str(text::format_uint(value).as_str(), pos);
    }

    /// Write `value` with exactly `places` decimals. The decimal point takes a display of its own.
    pub fn write_float(&mut self, value: f32, places: u8, pos: usize) {
        self.put_str(text::format_float(value, places).as_str(), pos);
    }

    pub fn write_icon(&mut self, icon: &Icon, pos: usize) {
        self.set_columns(pos, *icon);
    }

    /// Overwrite a single raw byte of the frame buffer. `index` counts bytes from the start of
    /// the buffer, `CELL_LEN` per display.
    pub fn write_byte(&mut self, col: u8, index: usize) {
        if let Some(byte) = self.buffer.as_flattened_mut().get_mut(index) {
            *byte = col;
        }
    }

    /// Move the cursor used by the `print_*` methods.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn print_char(&mut self, c: char) {
        if self.cursor < N {
            self.write_char(c, self.cursor);
            self.cursor += 1;
        }
    }

    /// Write `s` at the cursor, and advance the cursor past it.
    pub fn print_str(&mut self, s: &str) {
        self.cursor += self.put_str(s, self.cursor);
    }

    pub fn print_int(&mut self, value: i32) {
        self.print_str(text::format_int(value).as_str());
    }

    pub fn print_uint(&mut self, value: u32) {
        self.print_str(text::format_uint(value).as_str());
    }

    pub fn print_float(&mut self, value: f32, places: u8) {
        self.print_str(text::format_float(value, places).as_str());
    }

    pub fn print_icon(&mut self, icon: &Icon) {
        if self.cursor < N {
            self.write_icon(icon, self.cursor);
            self.cursor += 1;
        }
    }

    /// Turn a single pixel on or off. `x` counts visible columns across the whole chain, five
    /// per display, and `y` counts rows from the top. Pixels off the chain are ignored.
    ///
    /// A display that was blank gets its framing bytes written at the current brightness, so
    /// the pixel shows up.
    pub fn set_pix(&mut self, x: usize, y: usize, on: bool) {
        if x >= N * GLYPH_COLS || y >= GLYPH_ROWS {
            return;
        }
        let bright = self.bright;
        let cell = &mut self.buffer[x / GLYPH_COLS];
        if cell[BRIGHTNESS_OFFSET] == 0 {
            cell[..COLUMNS_OFFSET].copy_from_slice(&[0, bright, 0]);
        }
        let col = &mut cell[COLUMNS_OFFSET + x % GLYPH_COLS];
        if on {
            *col |= 1 << y;
        } else {
            *col &= !(1 << y);
        }
    }

    /// Draw a straight line of lit pixels between two points, inclusive, in `set_pix`
    /// coordinates. Parts of the line off the chain are clipped.
    pub fn draw_line(&mut self, x1: i16, y1: i16, x2: i16, y2: i16) {
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);
        loop {
            if x >= 0 && y >= 0 {
                self.set_pix(x as usize, y as usize, true);
            }
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Log the contents of the frame buffer, one line per display.
    pub fn dump_buffer(&self) {
        for (i, cell) in self.buffer.iter().enumerate() {
            debug!("pixie: display {}: {:02X?}", i, cell);
        }
    }

    /// The frame buffer as it will be sent by an upright `show`.
    pub fn buffer(&self) -> &[Cell; N] {
        &self.buffer
    }

    /// The glyph currently held by the display at `pos`.
    pub fn glyph_at(&self, pos: usize) -> Option<Glyph> {
        self.buffer.get(pos).map(|cell| {
            let mut columns = [0; GLYPH_COLS];
            columns.copy_from_slice(&cell[COLUMNS_OFFSET..]);
            Glyph(columns)
        })
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Build the cell for `columns` at the current brightness.
    fn cell(&self, columns: [u8; GLYPH_COLS]) -> Cell {
        let c = columns;
        [0, self.bright, 0, c[0], c[1], c[2], c[3], c[4]]
    }

    fn set_columns(&mut self, pos: usize, columns: [u8; GLYPH_COLS]) {
        if pos < N {
            self.buffer[pos] = self.cell(columns);
        }
    }

    /// Write `s` from `pos` on and return how many displays were written.
    fn put_str(&mut self, s: &str, pos: usize) -> usize {
        let mut written = 0;
        for (i, c) in s.chars().take(N.saturating_sub(pos)).enumerate() {
            self.write_char(c, pos + i);
            written += 1;
        }
        written
    }

    /// The buffer turned upside down: display order reversed, and each glyph mirrored in both
    /// axes. Framing and brightness bytes stay in place.
    fn rotated(&self) -> [Cell; N] {
        let mut out = self.buffer;
        out.reverse();
        for cell in out.iter_mut() {
            let columns = &mut cell[COLUMNS_OFFSET..];
            columns.reverse();
            for col in columns.iter_mut() {
                *col = col.reverse_bits() >> 1;
            }
        }
        out
    }
}

/// Write `text` across a chain of `N` displays and show it in one go, then hand the interface
/// back. Useful for scripts which only ever display a single value at a time.
pub fn write_text<DI, const N: usize>(iface: DI, text: &str) -> Result<DI, DI::Error>
where
    DI: PixieInterface,
{
    let mut pixie = Pixie::<DI, N>::new(iface);
    pixie.write_str(text, 0);
    pixie.show()?;
    Ok(pixie.release())
}
