//! Scrolling text terminal
//!
//! Keeps the most recent lines of text written with [`Terminal::out`] and
//! redraws them top to bottom with [`FONT_6X8`], oldest first. Once the
//! segment is full every new line drops the oldest one.

use heapless::String;
use pagewise_core::{Canvas, Error, Font, Segment, Transport, FONT_6X8};

/// Most text rows any segment can hold (64 px / 8 px)
pub const TERMINAL_ROWS: usize = 8;

/// Most characters per line (128 px / 6 px)
pub const TERMINAL_COLS: usize = 21;

/// Text written by [`Terminal::separator`]
const SEPARATOR: &str = "--------------------";

/// Line log sized to a segment
#[derive(Clone)]
pub struct Terminal {
    lines: [String<TERMINAL_COLS>; TERMINAL_ROWS],
    /// Rows that fit the segment
    rows: usize,
    /// Characters that fit one row
    cols: usize,
    /// Slot of the oldest line
    first: usize,
    /// Lines currently held
    len: usize,
}

impl Terminal {
    /// Terminal sized for `segment`
    pub fn new(segment: &Segment) -> Self {
        let pitch = (FONT_6X8.width() + FONT_6X8.interval()) as usize;
        Self {
            lines: core::array::from_fn(|_| String::new()),
            rows: (segment.height() / FONT_6X8.height()) as usize,
            cols: (segment.width() as usize / pitch).min(TERMINAL_COLS),
            first: 0,
            len: 0,
        }
    }

    /// Rows the terminal shows
    pub fn rows(&self) -> usize {
        self.rows.min(TERMINAL_ROWS)
    }

    /// Characters kept per line
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Held lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        let rows = self.rows();
        (0..self.len).map(move |i| self.lines[(self.first + i) % rows].as_str())
    }

    /// Append a line, truncated to the segment width, and redraw
    pub fn out<T: Transport>(&mut self, canvas: &mut Canvas<'_, T>, text: &str) -> Result<(), Error<T::Error>> {
        let rows = self.rows();
        if rows == 0 {
            return Ok(());
        }

        let slot = if self.len < rows {
            self.len += 1;
            (self.first + self.len - 1) % rows
        } else {
            let oldest = self.first;
            self.first = (self.first + 1) % rows;
            oldest
        };

        let line = &mut self.lines[slot];
        line.clear();
        for ch in text.chars().take(self.cols) {
            // capacity covers `cols` ASCII characters
            if line.push(ch).is_err() {
                break;
            }
        }

        self.display(canvas)
    }

    /// Append an empty line
    pub fn indent<T: Transport>(&mut self, canvas: &mut Canvas<'_, T>) -> Result<(), Error<T::Error>> {
        self.out(canvas, " ")
    }

    /// Append a dashed line
    pub fn separator<T: Transport>(&mut self, canvas: &mut Canvas<'_, T>) -> Result<(), Error<T::Error>> {
        self.out(canvas, SEPARATOR)
    }

    /// Drop all lines and blank the segment
    pub fn clear<T: Transport>(&mut self, canvas: &mut Canvas<'_, T>) -> Result<(), Error<T::Error>> {
        for line in &mut self.lines {
            line.clear();
        }
        self.first = 0;
        self.len = 0;
        self.display(canvas)
    }

    fn display<T: Transport>(&self, canvas: &mut Canvas<'_, T>) -> Result<(), Error<T::Error>> {
        canvas.clear(false);
        let height = FONT_6X8.height();
        for (row, line) in self.lines().enumerate() {
            canvas.write_string(0, row as u8 * height, line, &FONT_6X8, true);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("terminal: {} lines", self.len);

        canvas.update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use pagewise_core::{AddressMode, Display, DisplayConfig, Resolution};
    use pagewise_hal::mock::RecordingTransport;

    fn display() -> Display<RecordingTransport> {
        Display::new(
            0,
            Resolution::W128xH64,
            RecordingTransport::new(),
            DisplayConfig::default(),
        )
        .unwrap()
    }

    fn held(t: &Terminal) -> Vec<&str, TERMINAL_ROWS> {
        t.lines().collect()
    }

    #[test]
    fn test_sized_to_segment() {
        let mut d = display();
        let full = Terminal::new(d.screen_segment());
        assert_eq!(full.rows(), 8);
        assert_eq!(full.cols(), 21);

        let mut l = d.create_layout().unwrap();
        let s = l
            .create_segment(AddressMode::Horizontal, 0, 0, 59, 2)
            .unwrap();
        let small = Terminal::new(&s);
        assert_eq!(small.rows(), 3);
        assert_eq!(small.cols(), 10);
    }

    #[test]
    fn test_out_appends_and_pushes() {
        let mut d = display();
        let mut t = Terminal::new(d.screen_segment());

        t.out(&mut d.screen(), "boot").unwrap();
        t.out(&mut d.screen(), "ok").unwrap();
        assert_eq!(held(&t).as_slice(), &["boot", "ok"]);

        let runs: Vec<usize, 4> = d.transport().data_runs().collect();
        assert_eq!(runs.as_slice(), &[1024, 1024]);
        // 'b' column 0 is 0x7F
        assert_eq!(d.screen().pixel(0, 0), Some(true));
    }

    #[test]
    fn test_scrolls_when_full() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut s = l
            .create_segment(AddressMode::Horizontal, 0, 0, 127, 2)
            .unwrap();
        let mut t = Terminal::new(&s);

        for line in ["a", "b", "c", "d", "e"] {
            t.out(&mut d.canvas(&mut s), line).unwrap();
        }
        assert_eq!(held(&t).as_slice(), &["c", "d", "e"]);

        // 'c' column 0 is 0x38, drawn on the top row
        let c = d.canvas(&mut s);
        assert_eq!(c.pixel(0, 3), Some(true));
        assert_eq!(c.pixel(0, 2), Some(false));
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut d = display();
        let mut t = Terminal::new(d.screen_segment());
        t.out(&mut d.screen(), "0123456789012345678901234").unwrap();
        assert_eq!(held(&t)[0].len(), 21);
    }

    #[test]
    fn test_indent_separator_clear() {
        let mut d = display();
        let mut t = Terminal::new(d.screen_segment());
        t.indent(&mut d.screen()).unwrap();
        t.separator(&mut d.screen()).unwrap();
        assert_eq!(held(&t).as_slice(), &[" ", SEPARATOR]);

        t.clear(&mut d.screen()).unwrap();
        assert_eq!(t.lines().count(), 0);
        assert!(d.screen().bytes().iter().all(|&b| b == 0));
    }
}
