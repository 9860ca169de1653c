//! Display and layout configuration
//!
//! Panel geometry, bring-up options and arena sizing.

use pagewise_hal::TransferMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Height of one controller page in pixels
pub const PAGE_HEIGHT: u8 = 8;

/// Maximum segments a single layout can hand out
pub const MAX_SEGMENTS_PER_LAYOUT: u8 = 10;

/// Largest supported display memory (128 x 64 / 8)
pub const MAX_GRAM_BYTES: usize = 1024;

/// Supported panel resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resolution {
    /// 128 x 64
    #[default]
    W128xH64,
    /// 128 x 32
    W128xH32,
    /// 64 x 48
    W64xH48,
    /// 64 x 32
    W64xH32,
}

impl Resolution {
    /// Panel geometry for this resolution
    pub const fn geometry(self) -> Geometry {
        match self {
            Resolution::W128xH64 => Geometry::new(128, 64),
            Resolution::W128xH32 => Geometry::new(128, 32),
            Resolution::W64xH48 => Geometry::new(64, 48),
            Resolution::W64xH32 => Geometry::new(64, 32),
        }
    }
}

/// Physical panel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    /// Width in pixels (columns)
    pub width: u8,
    /// Height in pixels
    pub height: u8,
}

impl Geometry {
    /// Geometry from pixel dimensions; height must be a multiple of [`PAGE_HEIGHT`]
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    /// Height in pages
    pub const fn pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// Size of display memory in bytes
    pub const fn gram_size(&self) -> usize {
        self.width as usize * self.pages() as usize
    }
}

/// Display bring-up and transfer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Flip COM scan direction (upside down)
    pub mirror_vertical: bool,
    /// Remap segment columns (left-right)
    pub mirror_horizontal: bool,
    /// Contrast written during init
    pub contrast: u8,
    /// Synchronization policy for data transfers
    #[cfg_attr(feature = "serde", serde(skip))]
    pub transfer_mode: TransferMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mirror_vertical: true,
            mirror_horizontal: true,
            contrast: 0xFF,
            transfer_mode: TransferMode::Blocking,
        }
    }
}

/// Arena sizing for a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Bytes of display memory the layout may hand out
    pub capacity: usize,
    /// Maximum number of segments
    pub max_segments: u8,
}

impl LayoutConfig {
    /// A layout spanning the whole display memory
    pub const fn full(geometry: Geometry) -> Self {
        Self {
            capacity: geometry.gram_size(),
            max_segments: MAX_SEGMENTS_PER_LAYOUT,
        }
    }

    /// A layout limited to `capacity` bytes
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            max_segments: MAX_SEGMENTS_PER_LAYOUT,
        }
    }
}
