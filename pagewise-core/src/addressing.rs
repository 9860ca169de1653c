//! Pixel addressing
//!
//! The controller auto-increments its address pointer differently per
//! addressing mode, so a segment's bytes are stored in the order the panel
//! will consume them:
//!
//! ```text
//! Horizontal / Page (row-major)       Vertical (column-major)
//!   page 0: c0 c1 c2 ... cW-1           col 0: p0 p1 ... pH-1
//!   page 1: c0 c1 c2 ... cW-1           col 1: p0 p1 ... pH-1
//! ```
//!
//! Each byte is one column of one page; bit `n` is pixel row `page * 8 + n`.
//! Every higher-level operation goes through [`MemoryOrder::byte_index`].

use crate::config::PAGE_HEIGHT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controller memory addressing mode (values are the `0x20` command argument)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum AddressMode {
    /// Column pointer wraps to the next page at the end of the window
    #[default]
    Horizontal = 0,
    /// Page pointer wraps to the next column at the end of the window
    Vertical = 1,
    /// Column pointer wraps within the current page
    Page = 2,
}

impl AddressMode {
    /// Byte layout used by segments in this mode
    pub const fn memory_order(self, width: u8, pages: u8) -> MemoryOrder {
        match self {
            AddressMode::Horizontal | AddressMode::Page => MemoryOrder::RowMajor { width },
            AddressMode::Vertical => MemoryOrder::ColumnMajor { pages },
        }
    }
}

/// Location of one pixel inside a segment's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Byte offset from the start of the segment
    pub offset: usize,
    /// Bit within the byte (0 = top row of the page)
    pub bit: u8,
}

impl PixelAddress {
    /// Single-bit mask for this pixel
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

/// Byte ordering of a segment's memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryOrder {
    /// One run of `width` bytes per page
    RowMajor {
        /// Segment width in columns
        width: u8,
    },
    /// One run of `pages` bytes per column
    ColumnMajor {
        /// Segment height in pages
        pages: u8,
    },
}

impl MemoryOrder {
    /// Offset of the byte holding (`column`, `page`)
    #[inline]
    pub const fn byte_index(&self, column: u8, page: u8) -> usize {
        match *self {
            MemoryOrder::RowMajor { width } => column as usize + page as usize * width as usize,
            MemoryOrder::ColumnMajor { pages } => column as usize * pages as usize + page as usize,
        }
    }

    /// Byte and bit of pixel (`x`, `y`)
    #[inline]
    pub const fn pixel_address(&self, x: u8, y: u8) -> PixelAddress {
        PixelAddress {
            offset: self.byte_index(x, y / PAGE_HEIGHT),
            bit: y % PAGE_HEIGHT,
        }
    }
}
