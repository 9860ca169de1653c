//! Partial-update tracker
//!
//! Converts a pixel rectangle into the page rows (horizontal/page modes) or
//! columns (vertical mode) that contain it and pushes only those bytes.

use pagewise_hal::Transport;

use super::Canvas;
use crate::addressing::AddressMode;
use crate::config::PAGE_HEIGHT;
use crate::error::Error;
use crate::font::Font;

impl<T: Transport> Canvas<'_, T> {
    /// Push the whole segment to the panel
    ///
    /// The address window is only reprogrammed when another segment (or a
    /// partial update) was pushed in between.
    pub fn update(&mut self) -> Result<(), Error<T::Error>> {
        let result = self.send_full();
        self.forget_window_on_error(result)
    }

    fn send_full(&mut self) -> Result<(), Error<T::Error>> {
        let id = self.seg.id();
        let mode = self.seg.mode();
        let (cs, ce) = self.seg.columns();
        let (ps, pe) = self.seg.page_span();

        if mode == AddressMode::Page {
            // The column pointer wraps within a page, so each page row needs
            // its own start address
            self.link.set_addr_mode(mode)?;
            let order = self.seg.memory_order();
            let width = self.width() as usize;
            for page in 0..self.seg.pages() {
                self.link.set_page_range(cs, ps + page)?;
                let start = order.byte_index(0, page);
                self.link.write_data(&self.gram[start..start + width])?;
            }
            self.link.last_segment = Some(id);
            self.link.part_updated = self.seg.pages() > 1;
            return Ok(());
        }

        if self.link.last_segment != Some(id) || self.link.part_updated {
            self.link.set_addr_mode(mode)?;
            self.link.set_hv_range(cs, ce, ps, pe)?;
        }

        self.link.write_data(self.gram)?;
        self.link.last_segment = Some(id);
        self.link.part_updated = false;
        Ok(())
    }

    /// A failed transfer leaves the controller's address pointer unknown
    fn forget_window_on_error(&mut self, result: Result<(), Error<T::Error>>) -> Result<(), Error<T::Error>> {
        if result.is_err() {
            self.link.last_segment = None;
        }
        result
    }

    /// Push the page rows covering a text row of `font` starting at `y`
    pub fn update_row<F: Font + ?Sized>(&mut self, y: u8, font: &F) -> Result<(), Error<T::Error>> {
        let bottom = y as i32 + font.height() as i32 - 1;
        self.push_rect(0, y as i32, self.width() as i32 - 1, bottom)
    }

    /// Push the pixel rectangle `(xs, ys)..=(xe, ye)`
    ///
    /// The rectangle is clipped to the segment and widened to whole pages.
    /// Horizontal segments send one run per page row, vertical segments one
    /// run per column, page segments the single page row containing `ys`.
    pub fn update_part(&mut self, xs: u8, ys: u8, xe: u8, ye: u8) -> Result<(), Error<T::Error>> {
        self.push_rect(xs as i32, ys as i32, xe as i32, ye as i32)
    }

    /// Push a rectangle if the segment is in immediate mode
    pub(crate) fn refresh(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Error<T::Error>> {
        if self.seg.is_immediate() {
            self.push_rect(x0, y0, x1, y1)?;
        }
        Ok(())
    }

    /// Clip a signed rectangle (any corner order) to the segment
    pub(crate) fn clip_rect(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(u8, u8, u8, u8)> {
        let xs = x0.min(x1).max(0);
        let xe = x0.max(x1).min(self.width() as i32 - 1);
        let ys = y0.min(y1).max(0);
        let ye = y0.max(y1).min(self.height() as i32 - 1);

        if xs > xe || ys > ye {
            return None;
        }
        Some((xs as u8, ys as u8, xe as u8, ye as u8))
    }

    pub(super) fn push_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Error<T::Error>> {
        let result = self.send_rect(x0, y0, x1, y1);
        self.forget_window_on_error(result)
    }

    fn send_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Error<T::Error>> {
        let Some((xs, ys, xe, ye)) = self.clip_rect(x0, y0, x1, y1) else {
            return Ok(());
        };

        let mode = self.seg.mode();
        let order = self.seg.memory_order();
        let (cs, _) = self.seg.columns();
        let (ps, _) = self.seg.page_span();
        let first_page = ys / PAGE_HEIGHT;
        let last_page = ye / PAGE_HEIGHT;
        let columns = (xe - xs + 1) as usize;

        self.link.part_updated = true;
        self.link.set_addr_mode(mode)?;

        match mode {
            AddressMode::Page => {
                self.link.set_page_range(cs + xs, ps + first_page)?;
                let start = order.byte_index(xs, first_page);
                self.link.write_data(&self.gram[start..start + columns])?;
            }
            AddressMode::Horizontal => {
                self.link
                    .set_hv_range(cs + xs, cs + xe, ps + first_page, ps + last_page)?;
                for page in first_page..=last_page {
                    let start = order.byte_index(xs, page);
                    self.link.write_data(&self.gram[start..start + columns])?;
                }
            }
            AddressMode::Vertical => {
                self.link
                    .set_hv_range(cs + xs, cs + xe, ps + first_page, ps + last_page)?;
                let pages = (last_page - first_page + 1) as usize;
                for col in xs..=xe {
                    let start = order.byte_index(col, first_page);
                    self.link.write_data(&self.gram[start..start + pages])?;
                }
            }
        }

        self.link.last_segment = Some(self.seg.id());

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "segment {}: pushed cols {}..={} pages {}..={}",
            self.seg.id().index,
            xs,
            xe,
            first_page,
            last_page
        );

        Ok(())
    }
}
