//! Integer shape rendering
//!
//! Shapes are clipped pixel by pixel, so they may extend past the segment.
//! On immediate segments every shape except the single-pixel lines pushes
//! its bounding rectangle once drawn.

use pagewise_hal::Transport;

use super::Canvas;
use crate::bitmap::Bitmap;
use crate::error::Error;

impl<T: Transport> Canvas<'_, T> {
    /// `w` pixels to the right of `(x, y)`, inclusive
    pub fn draw_hline(&mut self, x: u8, y: u8, w: u8, on: bool) {
        self.hline(x as i32, x as i32 + w as i32 - 1, y as i32, on);
    }

    /// `h` pixels below `(x, y)`, inclusive
    pub fn draw_vline(&mut self, x: u8, y: u8, h: u8, on: bool) {
        for dy in 0..h as i32 {
            self.plot(x as i32, y as i32 + dy, on);
        }
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32, on: bool) {
        for x in x0..=x1 {
            self.plot(x, y, on);
        }
    }

    /// Bresenham line between two points, both ends included
    pub fn draw_line(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, on: bool) -> Result<(), Error<T::Error>> {
        let (mut x, mut y) = (x1 as i32, y1 as i32);
        let (x2, y2) = (x2 as i32, y2 as i32);
        let dx = (x2 - x).abs();
        let dy = (y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        self.plot(x2, y2, on);
        while x != x2 || y != y2 {
            self.plot(x, y, on);
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }

        self.refresh(x1 as i32, y1 as i32, x2, y2)
    }

    /// Rectangle outline with its top-left corner at `(x, y)`
    pub fn draw_frame(&mut self, x: u8, y: u8, w: u8, h: u8, on: bool) -> Result<(), Error<T::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }

        let (x0, y0) = (x as i32, y as i32);
        let (x1, y1) = (x0 + w as i32 - 1, y0 + h as i32 - 1);
        self.outline(x0, y0, x1, y1, on);
        self.refresh(x0, y0, x1, y1)
    }

    /// Filled rectangle with its top-left corner at `(x, y)`
    pub fn draw_box(&mut self, x: u8, y: u8, w: u8, h: u8, on: bool) -> Result<(), Error<T::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }

        let (x0, y0) = (x as i32, y as i32);
        let (x1, y1) = (x0 + w as i32 - 1, y0 + h as i32 - 1);
        self.fill_rect(x0, y0, x1, y1, on);
        self.refresh(x0, y0, x1, y1)
    }

    /// Outline of `(x0, y0)..=(x1, y1)`, never pushed
    pub(super) fn outline(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.hline(x0, x1, y0, on);
        self.hline(x0, x1, y1, on);
        for y in y0..=y1 {
            self.plot(x0, y, on);
            self.plot(x1, y, on);
        }
    }

    /// Fill of `(x0, y0)..=(x1, y1)`, never pushed
    pub(super) fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        for y in y0..=y1 {
            self.hline(x0, x1, y, on);
        }
    }

    /// Circle outline; nothing is drawn when the center is outside the segment
    pub fn draw_circle(&mut self, cx: u8, cy: u8, r: u8, on: bool) -> Result<(), Error<T::Error>> {
        if !self.seg.contains(cx, cy) {
            return Ok(());
        }

        let (cx, cy) = (cx as i32, cy as i32);
        circle_octants(r, |x, y| {
            self.plot(cx - x, cy + y, on);
            self.plot(cx + x, cy + y, on);
            self.plot(cx + x, cy - y, on);
            self.plot(cx - x, cy - y, on);
        });

        let r = r as i32;
        self.refresh(cx - r, cy - r, cx + r, cy + r)
    }

    /// Filled circle; same outline as [`Canvas::draw_circle`]
    pub fn draw_filled_circle(&mut self, cx: u8, cy: u8, r: u8, on: bool) -> Result<(), Error<T::Error>> {
        if !self.seg.contains(cx, cy) {
            return Ok(());
        }

        let (cx, cy) = (cx as i32, cy as i32);
        circle_octants(r, |x, y| {
            self.hline(cx + x, cx - x, cy + y, on);
            self.hline(cx + x, cx - x, cy - y, on);
        });

        let r = r as i32;
        self.refresh(cx - r, cy - r, cx + r, cy + r)
    }

    /// Opaque bitmap with its top-left corner at `(x, y)`
    pub fn draw_bitmap(&mut self, x: u8, y: u8, bitmap: &Bitmap) -> Result<(), Error<T::Error>> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Ok(());
        }

        let (x0, y0) = (x as i32, y as i32);
        for dy in 0..bitmap.height {
            for dx in 0..bitmap.width {
                self.plot(x0 + dx as i32, y0 + dy as i32, bitmap.get(dx, dy));
            }
        }

        self.refresh(
            x0,
            y0,
            x0 + bitmap.width as i32 - 1,
            y0 + bitmap.height as i32 - 1,
        )
    }
}

/// Midpoint circle walk over one quadrant
///
/// Calls `f(x, y)` with `x` running from `-r` up to 0 and `y` from 0 up to
/// `r`; mirroring the four sign combinations gives the full circle.
fn circle_octants(r: u8, mut f: impl FnMut(i32, i32)) {
    let r = r as i32;
    let mut x = -r;
    let mut y = 0;
    let mut err = 2 - 2 * r;

    loop {
        f(x, y);

        let mut e2 = err;
        if e2 <= y {
            y += 1;
            err += y * 2 + 1;
            if -x == y && e2 <= x {
                e2 = 0;
            }
        }
        if e2 > x {
            x += 1;
            err += x * 2 + 1;
        }

        if x > 0 {
            break;
        }
    }
}
