//! Text rendering
//!
//! Text is drawn at the segment cursor. Horizontal text advances the cursor
//! to the right; vertical text is rotated a quarter turn counter-clockwise
//! and advances upwards, so the cursor marks the bottom of the next glyph.
//!
//! Glyph cells are opaque: unlit font pixels and the spacing after each
//! glyph are painted in the background color.

use core::fmt::Write;

use heapless::String;
use pagewise_hal::Transport;

use super::Canvas;
use crate::config::TextDirection;
use crate::error::Error;
use crate::font::Font;
use crate::segment::Cursor;

/// Decimal rendering of `num`; a leading space stands in for `+` when `sign`
/// is set
pub(crate) fn format_num(num: i32, sign: bool) -> String<12> {
    let mut s = String::new();
    if sign && num >= 0 {
        let _ = s.push(' ');
    }
    // i32::MIN is 11 characters
    let _ = write!(s, "{}", num);
    s
}

impl<T: Transport> Canvas<'_, T> {
    /// Move the text cursor; `false` if the point is outside the segment
    pub fn set_cursor(&mut self, x: u8, y: u8) -> bool {
        self.seg.set_cursor(x, y)
    }

    /// Current text cursor
    pub fn cursor(&self) -> Cursor {
        self.seg.cursor()
    }

    /// Whether the cursor could be placed at `(x, y)`
    pub fn check_cursor(&self, x: u8, y: u8) -> bool {
        self.seg.contains(x, y)
    }

    /// Draw one glyph at the cursor and advance it
    ///
    /// Returns `false`, drawing nothing, when the glyph does not fit between
    /// the cursor and the segment edge.
    pub fn write_char<F: Font + ?Sized>(&mut self, ch: char, font: &F, on: bool, no_interval: bool) -> bool {
        let w = font.symbol_width(ch) as i32;
        let h = font.height() as i32;
        let gap = if no_interval { 0 } else { font.interval() as i32 };
        let Cursor { x, y } = self.seg.cursor();
        let (x, y) = (x as i32, y as i32);
        let (sw, sh) = (self.width() as i32, self.height() as i32);

        match self.seg.text_direction() {
            TextDirection::Horizontal => {
                if x < 0 || y < 0 || x + w > sw || y + h > sh {
                    return false;
                }

                for i in 0..w {
                    let column = font.column(ch, i as u8);
                    for j in 0..h {
                        self.plot(x + i, y + j, ((column >> j) & 1 != 0) == on);
                    }
                }
                for i in w..w + gap {
                    for j in 0..h {
                        self.plot(x + i, y + j, !on);
                    }
                }

                self.seg.cursor_mut().x = (x + w + gap) as i16;
            }
            TextDirection::Vertical => {
                if x < 0 || y >= sh || x + h > sw || y - w + 1 < 0 {
                    return false;
                }

                for i in 0..w {
                    let column = font.column(ch, i as u8);
                    for j in 0..h {
                        self.plot(x + j, y - i, ((column >> j) & 1 != 0) == on);
                    }
                }
                for i in w..w + gap {
                    for j in 0..h {
                        self.plot(x + j, y - i, !on);
                    }
                }

                self.seg.cursor_mut().y = (y - w - gap) as i16;
            }
        }
        true
    }

    /// Draw `s` starting at `(x, y)`, stopping at the first NUL
    ///
    /// Returns `false` if the start point is outside the segment or a glyph
    /// did not fit; glyphs written before that stay drawn.
    pub fn write_string<F: Font + ?Sized>(&mut self, x: u8, y: u8, s: &str, font: &F, on: bool) -> bool {
        if !self.set_cursor(x, y) {
            return false;
        }

        s.chars()
            .take_while(|&ch| ch != '\0')
            .all(|ch| self.write_char(ch, font, on, false))
    }

    /// [`Canvas::write_string`] followed by a push of the covered area
    pub fn write_string_now<F: Font + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        s: &str,
        font: &F,
        on: bool,
    ) -> Result<(), Error<T::Error>> {
        self.write_string(x, y, s, font, on);

        let size = self.get_string_size_px(s, font) as i32;
        if size == 0 {
            return Ok(());
        }

        let (x, y, h) = (x as i32, y as i32, font.height() as i32);
        match self.seg.text_direction() {
            TextDirection::Horizontal => self.push_rect(x, y, x + size - 1, y + h - 1),
            TextDirection::Vertical => self.push_rect(x, y - size + 1, x + h - 1, y),
        }
    }

    /// Draw a decimal number
    pub fn write_num<F: Font + ?Sized>(&mut self, x: u8, y: u8, num: i32, font: &F, on: bool) -> bool {
        self.write_string(x, y, &format_num(num, false), font, on)
    }

    /// Draw a decimal number with a leading space when it is not negative,
    /// so values of either sign line up
    pub fn write_num_sign<F: Font + ?Sized>(&mut self, x: u8, y: u8, num: i32, font: &F, on: bool) -> bool {
        self.write_string(x, y, &format_num(num, true), font, on)
    }

    /// [`Canvas::write_num`] followed by a push of the covered area
    pub fn write_num_now<F: Font + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        num: i32,
        font: &F,
        on: bool,
    ) -> Result<(), Error<T::Error>> {
        self.write_string_now(x, y, &format_num(num, false), font, on)
    }

    /// Width of `s` in pixels without trailing spacing; 0 for an empty string
    ///
    /// Saturates at `u16::MAX`.
    pub fn get_string_size_px<F: Font + ?Sized>(&self, s: &str, font: &F) -> u16 {
        let interval = font.interval() as u16;
        let total = s
            .chars()
            .take_while(|&ch| ch != '\0')
            .fold(0u16, |acc, ch| {
                acc.saturating_add(font.symbol_width(ch) as u16 + interval)
            });
        total.saturating_sub(interval)
    }

    /// Width of a decimal number in pixels
    pub fn get_num_string_size_px<F: Font + ?Sized>(&self, num: i32, font: &F) -> u16 {
        self.get_string_size_px(&format_num(num, false), font)
    }

    /// Paint `width` columns of one text row in the background color
    pub fn clear_font_px<F: Font + ?Sized>(&mut self, x: u8, y: u8, width: u8, font: &F, on: bool) {
        if !self.set_cursor(x, y) {
            return;
        }

        let (x, y) = (x as i32, y as i32);
        for i in x..x + width as i32 {
            for j in y..y + font.height() as i32 {
                self.plot(i, j, !on);
            }
        }
    }

    /// Paint `count` glyph cells of one text row in the background color
    pub fn clear_font_symb<F: Font + ?Sized>(&mut self, x: u8, y: u8, count: u8, font: &F, on: bool) {
        let pitch = font.width() as u32 + font.interval() as u32;
        let width = (count as u32 * pitch).saturating_sub(font.interval() as u32);
        self.clear_font_px(x, y, width.min(u8::MAX as u32) as u8, font, on);
    }

    /// Paint a whole text row in the background color
    pub fn clear_font_row<F: Font + ?Sized>(&mut self, y: u8, font: &F, on: bool) {
        self.clear_font_px(0, y, self.width(), font, on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::display;
    use crate::font::{FONT_12X16, FONT_6X8};
    use heapless::Vec;

    #[test]
    fn test_format_num() {
        assert_eq!(format_num(-42, false).as_str(), "-42");
        assert_eq!(format_num(7, true).as_str(), " 7");
        assert_eq!(format_num(-7, true).as_str(), "-7");
        assert_eq!(format_num(i32::MIN, true).as_str(), "-2147483648");
    }

    #[test]
    fn test_write_char_draws_columns_and_advances() {
        let mut d = display();
        let mut c = d.screen();
        c.set_cursor(3, 0);
        assert!(c.write_char('A', &FONT_6X8, true, false));

        // 'A' column 0 is 0x7E
        assert_eq!(c.pixel(3, 0), Some(false));
        assert!((1..7).all(|y| c.pixel(3, y) == Some(true)));
        assert_eq!(c.cursor(), Cursor { x: 9, y: 0 });
    }

    #[test]
    fn test_write_char_inverted_fills_background() {
        let mut d = display();
        let mut c = d.screen();
        c.set_cursor(0, 0);
        c.write_char(' ', &FONT_6X8, false, false);
        assert!((0..6).all(|x| (0..8).all(|y| c.pixel(x, y) == Some(true))));
        assert_eq!(c.pixel(6, 0), Some(false));
    }

    #[test]
    fn test_write_char_no_interval() {
        let mut d = display();
        let mut c = d.screen();
        c.set_cursor(0, 0);
        c.write_char('>', &FONT_6X8, true, true);
        assert_eq!(c.cursor().x, 5);
    }

    #[test]
    fn test_glyph_that_does_not_fit_is_rejected() {
        let mut d = display();
        let mut c = d.screen();
        c.set_cursor(124, 0);
        assert!(!c.write_char('A', &FONT_6X8, true, false));
        assert_eq!(c.cursor(), Cursor { x: 124, y: 0 });

        c.set_cursor(0, 57);
        assert!(!c.write_char('A', &FONT_6X8, true, false));
        assert!(c.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_string_stops_at_nul() {
        let mut d = display();
        let mut c = d.screen();
        assert!(c.write_string(0, 0, "A\0B", &FONT_6X8, true));
        assert_eq!(c.cursor().x, 6);
    }

    #[test]
    fn test_write_string_off_segment() {
        let mut d = display();
        let mut c = d.screen();
        assert!(!c.write_string(128, 0, "A", &FONT_6X8, true));
        assert!(!c.write_string(120, 0, "AB", &FONT_6X8, true));
        // first glyph fits, second does not
        assert_eq!(c.cursor().x, 126);
    }

    #[test]
    fn test_string_size() {
        let d = &mut display();
        let c = d.screen();
        assert_eq!(c.get_string_size_px("", &FONT_6X8), 0);
        assert_eq!(c.get_string_size_px("Hi", &FONT_6X8), 11);
        assert_eq!(c.get_string_size_px("Hi", &FONT_12X16), 22);
        assert_eq!(c.get_num_string_size_px(-42, &FONT_6X8), 17);
    }

    #[test]
    fn test_string_size_matches_cursor_advance() {
        let mut d = display();
        let mut c = d.screen();
        let s = "Status: ok";
        c.write_string(4, 8, s, &FONT_6X8, true);
        let advance = c.cursor().x as u16 - 4;
        assert_eq!(c.get_string_size_px(s, &FONT_6X8), advance - 1);
    }

    struct Wide;

    impl Font for Wide {
        fn width(&self) -> u8 {
            u8::MAX
        }

        fn height(&self) -> u8 {
            8
        }

        fn interval(&self) -> u8 {
            u8::MAX
        }

        fn column(&self, _ch: char, _col: u8) -> u32 {
            0xFF
        }
    }

    #[test]
    fn test_wide_font_sizes_saturate() {
        let mut d = display();
        let mut c = d.screen();
        // 200 glyphs of 510 px each
        let long = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        assert_eq!(long.len(), 200);
        assert_eq!(c.get_string_size_px(long, &Wide), u16::MAX - u8::MAX as u16);

        c.clear(true);
        c.clear_font_symb(0, 0, u8::MAX, &Wide, true);
        assert!((0..128).all(|x| c.pixel(x, 0) == Some(false)));
        assert_eq!(c.pixel(0, 8), Some(true));
    }

    #[test]
    fn test_write_num_sign_pads_positive() {
        let mut d = display();
        let mut c = d.screen();
        c.write_num_sign(0, 0, 7, &FONT_6X8, true);
        assert_eq!(c.cursor().x, 12);
        assert!((0..6).all(|x| (0..8).all(|y| c.pixel(x, y) == Some(false))));

        c.write_num(0, 8, -12, &FONT_6X8, true);
        assert_eq!(c.cursor().x, 18);
    }

    #[test]
    fn test_vertical_text_runs_upwards() {
        let mut d = display();
        let mut c = d.screen();
        c.segment_mut().set_text_direction(TextDirection::Vertical);
        c.set_cursor(0, 20);
        assert!(c.write_char('A', &FONT_6X8, true, false));

        // column 0 of 'A' lands on row 20, rows of the glyph on x
        assert_eq!(c.pixel(0, 20), Some(false));
        assert!((1..7).all(|x| c.pixel(x, 20) == Some(true)));
        assert_eq!(c.cursor(), Cursor { x: 0, y: 14 });
    }

    #[test]
    fn test_vertical_spacing_keeps_last_column() {
        let mut d = display();
        let mut c = d.screen();
        c.segment_mut().set_text_direction(TextDirection::Vertical);
        c.draw_vline(2, 0, 64, true);
        c.set_cursor(0, 40);
        assert!(c.write_char('A', &FONT_12X16, true, false));

        // last glyph column is row 31, spacing rows 30 and 29
        assert_eq!(c.pixel(2, 31), Some(true));
        assert_eq!(c.pixel(2, 30), Some(false));
        assert_eq!(c.pixel(2, 29), Some(false));
        assert_eq!(c.pixel(2, 28), Some(true));
        assert_eq!(c.cursor().y, 28);
    }

    #[test]
    fn test_vertical_glyph_past_top_rejected() {
        let mut d = display();
        let mut c = d.screen();
        c.segment_mut().set_text_direction(TextDirection::Vertical);
        c.set_cursor(0, 4);
        assert!(c.write_char('A', &FONT_6X8, true, true));
        // cursor now above the segment
        assert_eq!(c.cursor().y, -1);
        assert!(!c.write_char('A', &FONT_6X8, true, true));
    }

    #[test]
    fn test_clear_font_helpers() {
        let mut d = display();
        let mut c = d.screen();
        c.clear(true);
        c.clear_font_symb(0, 0, 2, &FONT_6X8, true);
        assert_eq!(c.pixel(10, 7), Some(false));
        assert_eq!(c.pixel(11, 0), Some(true));
        assert_eq!(c.pixel(0, 8), Some(true));

        c.clear_font_row(8, &FONT_6X8, true);
        assert!((0..128).all(|x| c.pixel(x, 8) == Some(false)));
        assert_eq!(c.pixel(0, 16), Some(true));
    }

    #[test]
    fn test_write_string_now_pushes_text_box() {
        let mut d = display();
        d.screen().write_string_now(10, 4, "ab", &FONT_6X8, true).unwrap();

        let cmds: Vec<u8, 16> = d.transport().commands().collect();
        assert_eq!(cmds.as_slice(), &[0x20, 0, 0x21, 10, 20, 0x22, 0, 1]);
        let runs: Vec<usize, 4> = d.transport().data_runs().collect();
        assert_eq!(runs.as_slice(), &[11, 11]);
    }

    #[test]
    fn test_write_num_now_pushes() {
        let mut d = display();
        d.screen().write_num_now(0, 0, 100, &FONT_6X8, true).unwrap();
        let runs: Vec<usize, 4> = d.transport().data_runs().collect();
        assert_eq!(runs.as_slice(), &[17]);
    }
}
