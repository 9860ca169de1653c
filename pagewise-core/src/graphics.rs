//! embedded-graphics support
//!
//! Lets any `embedded_graphics` drawable render into a segment. Pixels are
//! only written to display memory; push them with the canvas `update*`
//! methods.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;
use pagewise_hal::Transport;

use crate::canvas::Canvas;

impl<T: Transport> OriginDimensions for Canvas<'_, T> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl<T: Transport> DrawTarget for Canvas<'_, T> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.plot(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Canvas::clear(self, color.is_on());
        Ok(())
    }
}
