//! Segment canvas
//!
//! A [`Canvas`] joins a [`Segment`] with its bytes of display memory and the
//! controller link for the duration of a drawing session. All drawing is
//! synchronous; nothing reaches the panel until an `update*` call, or right
//! away for shapes drawn on an [`Immediate`](crate::UpdateMode::Immediate)
//! segment.
//!
//! Coordinates are segment-relative pixels. Pixels outside the segment are
//! silently dropped so callers can draw partially visible shapes without
//! clamping.

mod primitives;
mod text;
mod update;
mod widgets;

use pagewise_hal::Transport;

use crate::addressing::AddressMode;
use crate::config::PAGE_HEIGHT;
use crate::error::{config_error, ConfigError, Error, UnsupportedOp};
use crate::link::Link;
use crate::segment::Segment;

/// Drawing session on one segment
pub struct Canvas<'a, T> {
    seg: &'a mut Segment,
    gram: &'a mut [u8],
    link: &'a mut Link<T>,
}

/// Bits `lo..=hi` of a page byte
#[inline]
fn span_mask(lo: u8, hi: u8) -> u8 {
    ((0xFFu16 << lo) & (0xFFu16 >> (7 - hi))) as u8
}

impl<'a, T: Transport> Canvas<'a, T> {
    pub(crate) fn new(seg: &'a mut Segment, gram: &'a mut [u8], link: &'a mut Link<T>) -> Self {
        debug_assert_eq!(gram.len(), seg.span().len);
        Self { seg, gram, link }
    }

    /// The segment being drawn
    pub fn segment(&self) -> &Segment {
        self.seg
    }

    /// Mutable access for cursor, update mode and style settings
    pub fn segment_mut(&mut self) -> &mut Segment {
        self.seg
    }

    /// Segment width in pixels
    pub fn width(&self) -> u8 {
        self.seg.width()
    }

    /// Segment height in pixels
    pub fn height(&self) -> u8 {
        self.seg.height()
    }

    /// Raw segment memory in controller order
    pub fn bytes(&self) -> &[u8] {
        self.gram
    }

    /// Set (`on`) or clear one pixel; ignored outside the segment
    pub fn draw_pixel(&mut self, x: u8, y: u8, on: bool) {
        if !self.seg.contains(x, y) {
            return;
        }

        let addr = self.seg.memory_order().pixel_address(x, y);
        if on {
            self.gram[addr.offset] |= addr.mask();
        } else {
            self.gram[addr.offset] &= !addr.mask();
        }
    }

    /// Signed-coordinate plot used by the shape algorithms
    #[inline]
    pub(crate) fn plot(&mut self, x: i32, y: i32, on: bool) {
        if (0..self.width() as i32).contains(&x) && (0..self.height() as i32).contains(&y) {
            self.draw_pixel(x as u8, y as u8, on);
        }
    }

    /// Read one pixel back; `None` outside the segment
    pub fn pixel(&self, x: u8, y: u8) -> Option<bool> {
        if !self.seg.contains(x, y) {
            return None;
        }

        let addr = self.seg.memory_order().pixel_address(x, y);
        Some(self.gram[addr.offset] & addr.mask() != 0)
    }

    /// Fill the whole segment with `0x00`, or `0xFF` when `invert` is set
    pub fn clear(&mut self, invert: bool) {
        self.gram.fill(if invert { 0xFF } else { 0x00 });
    }

    /// Fill one page row across the full segment width
    ///
    /// Rows past the segment are ignored. Immediate segments push the row.
    pub fn clear_row(&mut self, page: u8, invert: bool) -> Result<(), Error<T::Error>> {
        if page >= self.seg.pages() {
            return Ok(());
        }

        let fill = if invert { 0xFF } else { 0x00 };
        let order = self.seg.memory_order();
        for col in 0..self.width() {
            self.gram[order.byte_index(col, page)] = fill;
        }

        if self.seg.is_immediate() {
            let y = page * PAGE_HEIGHT;
            self.update_part(0, y, self.width() - 1, y + PAGE_HEIGHT - 1)?;
        }
        Ok(())
    }

    /// Clear the pixel rectangle `(xs, ys)..=(xe, ye)`
    ///
    /// Partial pages at the top and bottom edge keep the pixels outside the
    /// rectangle. Page-addressed segments only accept rectangles within one
    /// page row; vertically addressed segments do not support this at all.
    pub fn clear_part(
        &mut self,
        xs: u8,
        ys: u8,
        xe: u8,
        ye: u8,
        invert: bool,
    ) -> Result<(), ConfigError> {
        let mode = self.seg.mode();
        if mode == AddressMode::Vertical {
            return Err(config_error(ConfigError::Unsupported(
                UnsupportedOp::VerticalPartialClear,
            )));
        }

        if xs > xe || xe >= self.width() || ys > ye || ye >= self.height() {
            return Err(config_error(ConfigError::PartialClearRange));
        }

        let start_page = ys / PAGE_HEIGHT;
        let end_page = ye / PAGE_HEIGHT;
        if mode == AddressMode::Page && start_page != end_page {
            return Err(config_error(ConfigError::PartialClearRange));
        }

        for page in start_page..=end_page {
            let lo = if page == start_page { ys % PAGE_HEIGHT } else { 0 };
            let hi = if page == end_page { ye % PAGE_HEIGHT } else { 7 };
            self.apply_mask(page, xs, xe, span_mask(lo, hi), invert);
        }
        Ok(())
    }

    fn apply_mask(&mut self, page: u8, xs: u8, xe: u8, mask: u8, invert: bool) {
        let order = self.seg.memory_order();
        for col in xs..=xe {
            let byte = &mut self.gram[order.byte_index(col, page)];
            if invert {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{DisplayConfig, Resolution};
    use crate::display::Display;
    use crate::layout::Layout;
    use pagewise_hal::mock::RecordingTransport;

    pub(crate) fn display() -> Display<RecordingTransport> {
        Display::new(
            0,
            Resolution::W128xH64,
            RecordingTransport::new(),
            DisplayConfig::default(),
        )
        .unwrap()
    }

    pub(crate) fn segment(
        layout: &mut Layout,
        mode: AddressMode,
        cols: (u8, u8),
        pages: (u8, u8),
    ) -> Segment {
        layout
            .create_segment(mode, cols.0, pages.0, cols.1, pages.1)
            .unwrap()
    }

    #[test]
    fn test_span_mask() {
        assert_eq!(span_mask(0, 7), 0xFF);
        assert_eq!(span_mask(3, 3), 0x08);
        assert_eq!(span_mask(2, 5), 0b0011_1100);
        assert_eq!(span_mask(5, 7), 0b1110_0000);
        assert_eq!(span_mask(0, 2), 0b0000_0111);
    }

    #[test]
    fn test_page_stride_on_full_screen() {
        let mut d = display();
        let mut c = d.screen();
        c.draw_pixel(0, 0, true);
        c.draw_pixel(0, 8, true);

        assert_eq!(c.bytes()[0], 0x01);
        assert_eq!(c.bytes()[128], 0x01);
    }

    #[test]
    fn test_pixel_roundtrip_all_modes() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut segs = [
            segment(&mut l, AddressMode::Horizontal, (0, 31), (0, 2)),
            segment(&mut l, AddressMode::Vertical, (32, 63), (0, 2)),
            segment(&mut l, AddressMode::Page, (64, 95), (0, 2)),
        ];

        for seg in segs.iter_mut() {
            let mut c = d.canvas(seg);
            for (x, y) in [(0u8, 0u8), (31, 23), (7, 9), (16, 16)] {
                c.draw_pixel(x, y, true);
                assert_eq!(c.pixel(x, y), Some(true));
                c.draw_pixel(x, y, false);
                assert_eq!(c.pixel(x, y), Some(false));
            }
        }
    }

    #[test]
    fn test_vertical_byte_layout() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut s = segment(&mut l, AddressMode::Vertical, (0, 9), (0, 3));
        let mut c = d.canvas(&mut s);

        c.draw_pixel(2, 17, true);
        // column 2 * 4 pages + page 2
        assert_eq!(c.bytes()[10], 1 << 1);
    }

    #[test]
    fn test_out_of_bounds_pixel_ignored() {
        let mut d = display();
        let mut c = d.screen();
        c.draw_pixel(128, 0, true);
        c.draw_pixel(0, 64, true);
        c.plot(-1, 3, true);

        assert!(c.bytes().iter().all(|&b| b == 0));
        assert_eq!(c.pixel(128, 0), None);
    }

    #[test]
    fn test_clear_fills() {
        let mut d = display();
        let mut c = d.screen();
        c.clear(true);
        assert!(c.bytes().iter().all(|&b| b == 0xFF));
        c.clear(false);
        assert!(c.bytes().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_clear_row_both_orders() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut h = segment(&mut l, AddressMode::Horizontal, (0, 15), (0, 1));
        let mut v = segment(&mut l, AddressMode::Vertical, (16, 31), (0, 1));

        for seg in [&mut h, &mut v] {
            let mut c = d.canvas(seg);
            c.clear_row(1, true).unwrap();
            for x in 0..16 {
                assert_eq!(c.pixel(x, 7), Some(false));
                assert_eq!(c.pixel(x, 8), Some(true));
                assert_eq!(c.pixel(x, 15), Some(true));
            }
            c.clear_row(5, true).unwrap();
            assert_eq!(c.bytes().iter().filter(|&&b| b == 0xFF).count(), 16);
        }
    }

    #[test]
    fn test_clear_part_masks_edges() {
        let mut d = display();
        let mut c = d.screen();
        c.clear(true);
        c.clear_part(4, 5, 10, 20, false).unwrap();

        for y in 0..24 {
            for x in 0..16 {
                let inside = (4..=10).contains(&x) && (5..=20).contains(&y);
                assert_eq!(c.pixel(x, y), Some(!inside), "pixel ({x}, {y})");
            }
        }
        // Pages 3+ untouched
        assert!(c.bytes()[3 * 128..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_clear_part_single_page() {
        let mut d = display();
        let mut c = d.screen();
        c.clear(true);
        c.clear_part(0, 2, 0, 4, false).unwrap();
        assert_eq!(c.bytes()[0], 0b1110_0011);
    }

    #[test]
    fn test_clear_part_inverted_sets_bits() {
        let mut d = display();
        let mut c = d.screen();
        c.clear_part(0, 9, 1, 9, true).unwrap();
        assert_eq!(c.bytes()[128], 0b0000_0010);
        assert_eq!(c.bytes()[129], 0b0000_0010);
        assert_eq!(c.bytes()[130], 0);
    }

    #[test]
    fn test_clear_part_whole_segment_equals_clear() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut a = segment(&mut l, AddressMode::Horizontal, (0, 19), (0, 2));
        let mut b = segment(&mut l, AddressMode::Horizontal, (20, 39), (0, 2));

        {
            let mut c = d.canvas(&mut a);
            c.draw_line(0, 0, 19, 23, true).unwrap();
            c.clear(false);
        }
        {
            let mut c = d.canvas(&mut b);
            c.draw_line(0, 0, 19, 23, true).unwrap();
            c.clear_part(0, 0, 19, 23, false).unwrap();
        }

        let bytes_a: heapless::Vec<u8, 60> = d.canvas(&mut a).bytes().iter().copied().collect();
        assert_eq!(d.canvas(&mut b).bytes(), bytes_a.as_slice());
    }

    #[test]
    fn test_clear_part_range_checks() {
        let mut d = display();
        let mut c = d.screen();
        assert_eq!(
            c.clear_part(5, 0, 4, 0, false),
            Err(ConfigError::PartialClearRange)
        );
        assert_eq!(
            c.clear_part(0, 0, 128, 0, false),
            Err(ConfigError::PartialClearRange)
        );
        assert_eq!(
            c.clear_part(0, 10, 0, 64, false),
            Err(ConfigError::PartialClearRange)
        );
    }

    #[test]
    fn test_clear_part_page_mode_single_row_only() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut s = segment(&mut l, AddressMode::Page, (0, 31), (0, 1));
        let mut c = d.canvas(&mut s);
        c.clear(true);

        assert_eq!(
            c.clear_part(0, 6, 4, 9, false),
            Err(ConfigError::PartialClearRange)
        );
        c.clear_part(0, 9, 4, 10, false).unwrap();
        assert_eq!(c.pixel(0, 9), Some(false));
        assert_eq!(c.pixel(0, 8), Some(true));
        assert_eq!(c.pixel(5, 9), Some(true));
    }

    #[test]
    fn test_clear_part_vertical_unsupported() {
        let mut d = display();
        let mut l = d.create_layout().unwrap();
        let mut s = segment(&mut l, AddressMode::Vertical, (0, 31), (0, 1));
        let mut c = d.canvas(&mut s);

        assert_eq!(
            c.clear_part(0, 0, 1, 1, false),
            Err(ConfigError::Unsupported(UnsupportedOp::VerticalPartialClear))
        );
    }
}
