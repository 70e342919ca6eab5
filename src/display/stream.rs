//! Moving content through the chain: pushing in from the end, shifting in from the start, and
//! scrolling messages across.
//!
//! Both directions work a byte at a time on the whole buffer, so a partial push leaves cells
//! straddling two displays. Whole characters and icons always move a full cell.

use hal::blocking::delay::DelayMs;
use log::debug;

use super::{Cell, Pixie, CELL_LEN};
use crate::font::glyph;
use crate::icons::Icon;
use crate::interface::PixieInterface;
use crate::text;

impl<DI, const N: usize> Pixie<DI, N>
where
    DI: PixieInterface,
{
    /// Move the whole buffer one byte towards the first display and append `col` at the end.
    pub fn push_byte(&mut self, col: u8) {
        let bytes = self.buffer.as_flattened_mut();
        if let Some(last) = bytes.len().checked_sub(1) {
            bytes.copy_within(1.., 0);
            bytes[last] = col;
        }
    }

    pub fn push_char(&mut self, c: char) {
        let cell = self.cell(glyph(c).0);
        self.push_cell(&cell);
    }

    /// Push each character of `s` in turn, so the end of the string ends up on the last display.
    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push_char(c);
        }
    }

    pub fn push_int(&mut self, value: i32) {
        self.push_str(text::format_int(value).as_str());
    }

    pub fn push_uint(&mut self, value: u32) {
        self.push_str(text::format_uint(value).as_str());
    }

    pub fn push_float(&mut self, value: f32, places: u8) {
        self.push_str(text::format_float(value, places).as_str());
    }

    pub fn push_icon(&mut self, icon: &Icon) {
        let cell = self.cell(*icon);
        self.push_cell(&cell);
    }

    /// Move the whole buffer one byte towards the last display and insert `col` at the start.
    pub fn shift_byte(&mut self, col: u8) {
        let bytes = self.buffer.as_flattened_mut();
        if let Some(last) = bytes.len().checked_sub(1) {
            bytes.copy_within(..last, 1);
            bytes[0] = col;
        }
    }

    pub fn shift_char(&mut self, c: char) {
        let cell = self.cell(glyph(c).0);
        self.shift_cell(&cell);
    }

    /// Shift `s` in at the start of the chain, so that it reads left to right from the first
    /// display.
    pub fn shift_str(&mut self, s: &str) {
        for c in s.chars().rev() {
            self.shift_char(c);
        }
    }

    pub fn shift_int(&mut self, value: i32) {
        self.shift_str(text::format_int(value).as_str());
    }

    pub fn shift_uint(&mut self, value: u32) {
        self.shift_str(text::format_uint(value).as_str());
    }

    pub fn shift_float(&mut self, value: f32, places: u8) {
        self.shift_str(text::format_float(value, places).as_str());
    }

    pub fn shift_icon(&mut self, icon: &Icon) {
        let cell = self.cell(*icon);
        self.shift_cell(&cell);
    }

    /// The per-character pause set by `Config::scroll_delay_ms` or `set_scroll_delay_ms`.
    pub fn scroll_delay_ms(&self) -> u16 {
        self.scroll_delay_ms
    }

    pub fn set_scroll_delay_ms(&mut self, ms: u16) {
        debug!("pixie: scroll delay {} ms", ms);
        self.scroll_delay_ms = ms;
    }

    /// Scroll `text` across the chain from right to left, one column per frame, then scroll it
    /// off again. The buffer is cleared first and ends up blank.
    ///
    /// Pauses for `wait_ms` after each character and for the configured tail delay after each
    /// display width of blank columns. Pass `scroll_delay_ms()` to use the configured pace.
    pub fn scroll_message<D>(
        &mut self,
        text: &str,
        wait_ms: u16,
        delay: &mut D,
    ) -> Result<(), DI::Error>
    where
        D: DelayMs<u16>,
    {
        debug!("pixie: scroll {:?} every {} ms", text, wait_ms);
        self.clear();
        for c in text.chars() {
            let cell = self.cell(glyph(c).0);
            for &col in cell.iter() {
                self.push_byte(col);
                self.show()?;
            }
            delay.delay_ms(wait_ms);
        }
        for _ in 0..N {
            for _ in 0..CELL_LEN {
                self.push_byte(0);
                self.show()?;
            }
            delay.delay_ms(self.tail_delay_ms);
        }
        Ok(())
    }

    /// Like `scroll_message`, but every frame moves a whole character, without the column by
    /// column animation.
    pub fn scroll_message_instant<D>(
        &mut self,
        text: &str,
        wait_ms: u16,
        delay: &mut D,
    ) -> Result<(), DI::Error>
    where
        D: DelayMs<u16>,
    {
        debug!("pixie: scroll {:?} every {} ms (instant)", text, wait_ms);
        self.clear();
        for c in text.chars() {
            self.push_char(c);
            self.show()?;
            delay.delay_ms(wait_ms);
        }
        for _ in 0..N {
            self.push_cell(&[0; CELL_LEN]);
            self.show()?;
            delay.delay_ms(self.tail_delay_ms);
        }
        Ok(())
    }

    fn push_cell(&mut self, cell: &Cell) {
        for &col in cell.iter() {
            self.push_byte(col);
        }
    }

    fn shift_cell(&mut self, cell: &Cell) {
        for &col in cell.iter().rev() {
            self.shift_byte(col);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::display::testing::cell;
    use crate::display::{Pixie, CELL_LEN};
    use crate::icons;
    use crate::interface::test_spy::{Sent, TestSpyInterface};
    use hal::blocking::delay::DelayMs;

    const BLANK: [u8; CELL_LEN] = [0; CELL_LEN];

    #[derive(Default)]
    struct RecordingDelay(Vec<u16>);

    impl DelayMs<u16> for RecordingDelay {
        fn delay_ms(&mut self, ms: u16) {
            self.0.push(ms);
        }
    }

    #[test]
    fn push_enters_from_the_end() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 3>::new(di.split());
        disp.push_char('A');
        assert_eq!(*disp.buffer(), [BLANK, BLANK, cell('A', 255)]);
        disp.push_str("BC");
        assert_eq!(
            *disp.buffer(),
            [cell('A', 255), cell('B', 255), cell('C', 255)]
        );
        disp.push_int(5);
        assert_eq!(
            *disp.buffer(),
            [cell('B', 255), cell('C', 255), cell('5', 255)]
        );
    }

    #[test]
    fn push_byte_moves_one_column() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 2>::new(di.split());
        disp.write_str("ab", 0);
        disp.push_byte(0x7F);
        let (a, b) = (cell('a', 255), cell('b', 255));
        assert_eq!(disp.buffer()[0][..7], a[1..]);
        assert_eq!(disp.buffer()[0][7], b[0]);
        assert_eq!(disp.buffer()[1][..7], b[1..]);
        assert_eq!(disp.buffer()[1][7], 0x7F);
    }

    #[test]
    fn shift_enters_from_the_start() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 3>::new(di.split());
        disp.write_char('z', 0);
        disp.shift_str("xy");
        assert_eq!(
            *disp.buffer(),
            [cell('x', 255), cell('y', 255), cell('z', 255)]
        );
        disp.shift_icon(&icons::BELL);
        let b = icons::BELL;
        assert_eq!(disp.buffer()[0], [0, 255, 0, b[0], b[1], b[2], b[3], b[4]]);
        assert_eq!(disp.buffer()[2], cell('y', 255));
    }

    #[test]
    fn shifted_numbers_read_left_to_right() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 3>::new(di.split());
        disp.shift_int(-7);
        assert_eq!(
            *disp.buffer(),
            [cell('-', 255), cell('7', 255), BLANK]
        );
        disp.shift_uint(12);
        assert_eq!(
            *disp.buffer(),
            [cell('1', 255), cell('2', 255), cell('-', 255)]
        );
        disp.shift_float(0.5, 1);
        assert_eq!(
            *disp.buffer(),
            [cell('0', 255), cell('.', 255), cell('5', 255)]
        );
    }

    #[test]
    fn shift_byte_moves_one_column() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 1>::new(di.split());
        disp.write_char('q', 0);
        disp.shift_byte(0x01);
        let q = cell('q', 255);
        assert_eq!(disp.buffer()[0][0], 0x01);
        assert_eq!(disp.buffer()[0][1..], q[..7]);
    }

    #[test]
    fn push_and_shift_on_empty_chain() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 0>::new(di.split());
        disp.push_str("abc");
        disp.shift_float(1.5, 1);
        disp.show().unwrap();
        di.check_multi(&[Sent::Frame(vec![])]);
    }

    #[test]
    fn scroll_message_animates_each_column() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 1>::new(di.split());
        disp.write_char('x', 0);
        let mut delay = RecordingDelay::default();
        disp.scroll_message("A", 100, &mut delay).unwrap();

        let frames = di.frames();
        assert_eq!(frames.len(), 2 * CELL_LEN);
        // The character is fully on screen after its eighth column.
        assert_eq!(frames[CELL_LEN - 1], cell('A', 255));
        // The old contents were cleared first.
        assert_eq!(frames[0][..7], [0; 7]);
        assert_eq!(frames.last().unwrap(), &BLANK);
        assert_eq!(delay.0, [100, 150]);
        assert_eq!(*disp.buffer(), [BLANK]);
    }

    #[test]
    fn scroll_message_uses_configured_delays() {
        let di = TestSpyInterface::new();
        let cfg = Config::new().scroll_delay_ms(20).tail_delay_ms(5);
        let mut disp = Pixie::<_, 2>::with_config(di.split(), cfg);
        let mut delay = RecordingDelay::default();
        let wait = disp.scroll_delay_ms();
        disp.scroll_message("hey", wait, &mut delay).unwrap();
        assert_eq!(di.frames().len(), 3 * CELL_LEN + 2 * CELL_LEN);
        assert_eq!(delay.0, [20, 20, 20, 5, 5]);
    }

    #[test]
    fn scroll_pace_chosen_per_call() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 1>::with_config(di.split(), Config::new().tail_delay_ms(0));
        let mut delay = RecordingDelay::default();
        disp.scroll_message("ab", 30, &mut delay).unwrap();
        disp.scroll_message_instant("c", 250, &mut delay).unwrap();
        assert_eq!(delay.0, [30, 30, 0, 250, 0]);

        di.clear();
        delay.0.clear();
        disp.set_scroll_delay_ms(7);
        let wait = disp.scroll_delay_ms();
        disp.scroll_message_instant("d", wait, &mut delay).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(&[
            frame!(cell('d', 255)),
            frame!(BLANK)
        ]);
        assert_eq!(delay.0, [7, 0]);
    }

    #[test]
    fn scroll_message_instant() {
        let di = TestSpyInterface::new();
        let mut disp = Pixie::<_, 2>::new(di.split());
        let mut delay = RecordingDelay::default();
        disp.scroll_message_instant("ok", 100, &mut delay).unwrap();
        let (o, k) = (cell('o', 255), cell('k', 255));
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(&[
            frame!(BLANK, o),
            frame!(o, k),
            frame!(k, BLANK),
            frame!(BLANK, BLANK)
        ]);
        assert_eq!(delay.0, [100, 100, 150, 150]);
    }

    #[test]
    fn scroll_stops_on_interface_error() {
        let mut disp = Pixie::<_, 2>::new(TestSpyInterface::failing());
        let mut delay = RecordingDelay::default();
        assert_eq!(disp.scroll_message("no", 100, &mut delay), Err(()));
        assert!(delay.0.is_empty());
    }
}
