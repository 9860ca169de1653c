//! Segment behaviour and controller option types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When a segment's drawing reaches the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpdateMode {
    /// Only when an `update*` method is called
    #[default]
    OnDemand,
    /// Shapes and widgets push their own bounding rectangle right away
    ///
    /// Pixel, line-segment and plain text calls stay buffer-only; use the
    /// `*_now` variants for those.
    Immediate,
}

/// How a selected menu row is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectStyle {
    /// A `>` glyph in the first character cell, colors never inverted
    #[default]
    Arrow,
    /// The whole row is drawn inverted
    Color,
}

/// Direction in which text advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextDirection {
    /// Left to right, cursor x grows
    #[default]
    Horizontal,
    /// Rotated text, bottom to top; cursor y shrinks
    Vertical,
}

/// Fade-out animation length in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FadeFrames {
    /// 8 frames
    F8 = 0,
    /// 16 frames
    F16,
    /// 24 frames
    F24,
    /// 32 frames
    F32,
    /// 40 frames
    F40,
    /// 48 frames
    F48,
    /// 56 frames
    F56,
    /// 64 frames
    F64,
    /// 72 frames
    F72,
    /// 80 frames
    F80,
    /// 88 frames
    F88,
    /// 96 frames
    F96,
    /// 104 frames
    F104,
    /// 112 frames
    F112,
    /// 120 frames
    F120,
    /// 128 frames
    F128,
}
