//! Display segments
//!
//! A segment is a rectangular window of the panel, `[col_start..=col_end] x
//! [page_start..=page_end]`, backed by its own run of display memory. The
//! segment only records where that run lives; the bytes themselves stay owned
//! by the [`Display`](crate::Display) and are reached through a
//! [`Canvas`](crate::Canvas).

use core::ops::Range;

use crate::addressing::{AddressMode, MemoryOrder};
use crate::config::{SelectStyle, TextDirection, UpdateMode, PAGE_HEIGHT};

/// Identity of a segment: owning display, layout, and creation index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentId {
    /// Display id
    pub display: u8,
    /// Layout id within the display
    pub layout: u8,
    /// Creation index within the layout
    pub index: u8,
}

/// Byte range of display memory owned by a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GramSpan {
    /// Offset into display memory
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl GramSpan {
    /// Range form for slicing
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Text cursor in segment pixels
///
/// Signed because writing past an edge (vertical text runs upwards) moves
/// the cursor outside the segment; the next glyph then does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Column
    pub x: i16,
    /// Row
    pub y: i16,
}

/// A rectangular, independently addressed part of the display
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    id: SegmentId,
    mode: AddressMode,
    col_start: u8,
    col_end: u8,
    page_start: u8,
    page_end: u8,
    span: GramSpan,
    update_mode: UpdateMode,
    select_style: SelectStyle,
    text_direction: TextDirection,
    cursor: Cursor,
}

impl Segment {
    /// Bounds must already be validated by the allocating layout
    pub(crate) fn new(
        id: SegmentId,
        mode: AddressMode,
        col_start: u8,
        page_start: u8,
        col_end: u8,
        page_end: u8,
        span: GramSpan,
    ) -> Self {
        debug_assert!(col_start <= col_end && page_start <= page_end);
        debug_assert_eq!(
            span.len,
            (col_end - col_start + 1) as usize * (page_end - page_start + 1) as usize
        );

        Self {
            id,
            mode,
            col_start,
            col_end,
            page_start,
            page_end,
            span,
            update_mode: UpdateMode::OnDemand,
            select_style: SelectStyle::Arrow,
            text_direction: TextDirection::Horizontal,
            cursor: Cursor::default(),
        }
    }

    /// Segment identity
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Addressing mode, fixed at creation
    pub fn mode(&self) -> AddressMode {
        self.mode
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.col_end - self.col_start + 1
    }

    /// Height in pages
    pub fn pages(&self) -> u8 {
        self.page_end - self.page_start + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.pages() * PAGE_HEIGHT
    }

    /// First and last panel column (inclusive)
    pub fn columns(&self) -> (u8, u8) {
        (self.col_start, self.col_end)
    }

    /// First and last panel page (inclusive)
    pub fn page_span(&self) -> (u8, u8) {
        (self.page_start, self.page_end)
    }

    /// Display memory owned by this segment
    pub fn span(&self) -> GramSpan {
        self.span
    }

    /// Byte ordering of this segment's memory
    pub fn memory_order(&self) -> MemoryOrder {
        self.mode.memory_order(self.width(), self.pages())
    }

    /// Current update policy
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Change the update policy
    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.update_mode = mode;
    }

    /// Whether shapes and widgets push themselves to the panel
    pub fn is_immediate(&self) -> bool {
        self.update_mode == UpdateMode::Immediate
    }

    /// Selection style for menu widgets
    pub fn select_style(&self) -> SelectStyle {
        self.select_style
    }

    /// Change the selection style for menu widgets
    pub fn set_select_style(&mut self, style: SelectStyle) {
        self.select_style = style;
    }

    /// Text advance direction
    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    /// Change the text advance direction
    pub fn set_text_direction(&mut self, direction: TextDirection) {
        self.text_direction = direction;
    }

    /// Current text cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether (`x`, `y`) lies inside the segment
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.width() && y < self.height()
    }

    /// Move the text cursor; rejected if the point is outside the segment
    pub fn set_cursor(&mut self, x: u8, y: u8) -> bool {
        if self.contains(x, y) {
            self.cursor = Cursor {
                x: x as i16,
                y: y as i16,
            };
            true
        } else {
            false
        }
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
