//! Segmented framebuffer core for page-addressed monochrome displays
//!
//! This crate contains everything between "draw a pixel" and "send bytes to
//! the controller":
//!
//! - Display memory partitioned into layouts and segments
//! - Per-segment pixel engine for page, horizontal and vertical addressing
//! - Integer primitive renderer (lines, circles, boxes, bitmaps, text)
//! - Menu-style widgets with arrow or color-inversion selection
//! - Partial-update tracker that pushes only the touched page rows/columns
//!
//! # Usage
//!
//! ```ignore
//! use pagewise_core::{AddressMode, Display, DisplayConfig, Resolution, FONT_6X8};
//!
//! let mut display = Display::new(0, Resolution::W128xH64, transport, DisplayConfig::default())?;
//! display.init()?;
//!
//! let mut layout = display.create_layout()?;
//! let mut status = layout.create_segment(AddressMode::Horizontal, 0, 0, 127, 0)?;
//!
//! let mut canvas = display.canvas(&mut status);
//! canvas.write_string(0, 0, "Hello", &FONT_6X8, true);
//! canvas.update()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod addressing;
pub mod bitmap;
pub mod canvas;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod layout;
mod link;
pub mod segment;

pub use addressing::{AddressMode, PixelAddress};
pub use bitmap::{Bitmap, ACCUM};
pub use canvas::Canvas;
pub use config::*;
pub use display::{Display, DEFAULT_LAYOUT_ID};
pub use error::{ConfigError, Error, UnsupportedOp};
pub use font::{Font, MonoFont, Scaled2x, FONT_12X16, FONT_6X8};
pub use layout::Layout;
pub use pagewise_hal::{TransferMode, Transport};
pub use segment::{Cursor, Segment, SegmentId};
