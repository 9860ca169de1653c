//! Menu widgets
//!
//! Each widget occupies one text row of the given font across the full
//! segment width. With [`SelectStyle::Arrow`] a selected row gets a `>` in
//! its first character cell; with [`SelectStyle::Color`] the whole selected
//! row is drawn inverted. Immediate segments push the row once the widget is
//! complete.

use pagewise_hal::Transport;

use super::Canvas;
use crate::bitmap::ACCUM;
use crate::config::SelectStyle;
use crate::error::Error;
use crate::font::Font;

use super::text::format_num;

/// Checkbox geometry switches to the large variant from this font height
const LARGE_FONT_HEIGHT: u8 = 16;

impl<T: Transport> Canvas<'_, T> {
    /// `label ... value` row with a numeric value
    pub fn draw_param<F: Font + ?Sized>(
        &mut self,
        y: u8,
        label: &str,
        font: &F,
        value: i32,
        selected: bool,
    ) -> Result<(), Error<T::Error>> {
        self.param_row(y, label, font, &format_num(value, false), selected, 1)
    }

    /// `label ... value` row with a text value
    pub fn draw_param_str<F: Font + ?Sized>(
        &mut self,
        y: u8,
        label: &str,
        font: &F,
        value: &str,
        selected: bool,
    ) -> Result<(), Error<T::Error>> {
        self.param_row(y, label, font, value, selected, 0)
    }

    fn param_row<F: Font + ?Sized>(
        &mut self,
        y: u8,
        label: &str,
        font: &F,
        value: &str,
        selected: bool,
        arrow_margin: i32,
    ) -> Result<(), Error<T::Error>> {
        let on = self.row_label(y, label, font, selected);
        let margin = match self.seg.select_style() {
            SelectStyle::Arrow => arrow_margin,
            SelectStyle::Color => 1,
        };
        if let Some(x) = self.right_aligned(value, font, margin) {
            self.write_string(x, y, value, font, on);
        }

        self.row_done(y, font)
    }

    /// `label ... [x]` row
    pub fn draw_checkbox<F: Font + ?Sized>(
        &mut self,
        y: u8,
        label: &str,
        font: &F,
        checked: bool,
        selected: bool,
    ) -> Result<(), Error<T::Error>> {
        let on = self.row_label(y, label, font, selected);
        let (sw, y) = (self.width() as i32, y as i32);

        if font.height() < LARGE_FONT_HEIGHT {
            if on {
                self.outline(sw - 8, y, sw - 1, y + 7, true);
                self.fill_rect(sw - 6, y + 2, sw - 3, y + 5, checked);
            } else if checked {
                self.outline(sw - 7, y + 1, sw - 2, y + 6, false);
            } else {
                self.fill_rect(sw - 7, y + 1, sw - 2, y + 6, false);
            }
        } else {
            self.outline(sw - 11, y + 3, sw - 2, y + 12, on);
            if checked {
                self.fill_rect(sw - 9, y + 5, sw - 4, y + 10, on);
            } else {
                self.outline(sw - 9, y + 5, sw - 4, y + 10, !on);
            }
        }

        self.row_done(y as u8, font)
    }

    /// Progress bar with a three character percentage after it
    ///
    /// `percent` is clamped to 100.
    pub fn draw_hbar<F: Font + ?Sized>(
        &mut self,
        y: u8,
        percent: u8,
        font: &F,
        on: bool,
    ) -> Result<(), Error<T::Error>> {
        let percent = percent.min(100);
        let pitch = font.width() as i32 + font.interval() as i32;
        let scale = self.width() as i32 - pitch * 3 - 4;
        if scale <= 0 {
            return Ok(());
        }

        let filled = percent as i32 * scale / 100;
        let (y0, h) = (y as i32, font.height() as i32);

        self.clear_font_px(0, y, self.width(), font, true);
        self.outline(0, y0, scale + 3, y0 + h - 1, true);
        self.fill_rect(2, y0 + 2, 1 + filled, y0 + h - 3, on);
        self.fill_rect(2 + filled, y0 + 2, 1 + scale, y0 + h - 3, !on);

        let label = if percent < 100 {
            [
                char::from(b'0' + percent / 10),
                char::from(b'0' + percent % 10),
                '%',
            ]
        } else {
            ['1', '0', '0']
        };
        if self.set_cursor((scale + 4 + font.interval() as i32) as u8, y) {
            for ch in label {
                self.write_char(ch, font, on, false);
            }
        }

        self.row_done(y, font)
    }

    /// Axis labels spaced `step` pixels apart, starting at `x`
    pub fn draw_x_tick_labels<F: Font + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        step: u8,
        labels: &[&str],
        font: &F,
    ) -> Result<(), Error<T::Error>> {
        let pitch = font.width() as usize + step as usize;
        for (i, label) in labels.iter().enumerate() {
            let lx = x as usize + pitch * i;
            if lx > u8::MAX as usize {
                break;
            }
            self.write_string(lx as u8, y, label, font, true);
        }

        self.row_done(y, font)
    }

    /// Battery icon for `charge` in `0..5`; other values draw nothing
    pub fn draw_accum(&mut self, x: u8, y: u8, charge: u8) -> Result<(), Error<T::Error>> {
        match ACCUM.get(charge as usize) {
            Some(icon) => self.draw_bitmap(x, y, icon),
            None => Ok(()),
        }
    }

    /// Put the `>` marker in the first character cell of a row
    pub fn select_item<F: Font + ?Sized>(&mut self, y: u8, font: &F) -> Result<(), Error<T::Error>> {
        if self.set_cursor(0, y) {
            self.write_char('>', font, true, true);
        }
        self.row_done(y, font)
    }

    /// Remove the `>` marker
    pub fn deselect_item<F: Font + ?Sized>(&mut self, y: u8, font: &F) -> Result<(), Error<T::Error>> {
        self.clear_font_px(0, y, font.width(), font, true);
        self.row_done(y, font)
    }

    /// Clear the row and draw the selection marker and label
    ///
    /// Returns the foreground color for the rest of the row.
    fn row_label<F: Font + ?Sized>(&mut self, y: u8, label: &str, font: &F, selected: bool) -> bool {
        match self.seg.select_style() {
            SelectStyle::Arrow => {
                self.clear_font_px(0, y, self.width(), font, true);
                if selected {
                    self.write_string(0, y, ">", font, true);
                }
                self.write_string(font.width() + font.interval(), y, label, font, true);
                true
            }
            SelectStyle::Color => {
                let on = !selected;
                self.clear_font_px(0, y, self.width(), font, on);
                self.write_string(1, y, label, font, on);
                on
            }
        }
    }

    /// X position that ends `s` `margin` pixels before the right edge
    fn right_aligned<F: Font + ?Sized>(&self, s: &str, font: &F, margin: i32) -> Option<u8> {
        let size = self.get_string_size_px(s, font) as i32;
        let x = self.width() as i32 - size - margin;
        (x >= 0).then_some(x as u8)
    }

    fn row_done<F: Font + ?Sized>(&mut self, y: u8, font: &F) -> Result<(), Error<T::Error>> {
        if self.seg.is_immediate() {
            self.update_row(y, font)?;
        }
        Ok(())
    }
}
