//! Layouts (display memory arenas)
//!
//! A layout bump-allocates display memory to segments in creation order.
//! Nothing is ever returned to a layout; a segment lives as long as the
//! program keeps it.
//!
//! All layouts of a display share the same memory. Switching between screen
//! arrangements means drawing through one layout's segments at a time; the
//! bytes of another layout's segments are simply overwritten.

use crate::addressing::AddressMode;
use crate::config::{Geometry, LayoutConfig};
use crate::error::{config_error, ConfigError};
use crate::segment::{GramSpan, Segment, SegmentId};

/// Segment allocator over the display memory
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    id: u8,
    display: u8,
    geometry: Geometry,
    config: LayoutConfig,
    /// Offset of the next free byte
    next: usize,
    segments: u8,
}

impl Layout {
    /// `config.capacity` must not exceed the display memory size
    pub(crate) fn new(display: u8, id: u8, geometry: Geometry, config: LayoutConfig) -> Self {
        debug_assert!(config.capacity <= geometry.gram_size());

        Self {
            id,
            display,
            geometry,
            config,
            next: 0,
            segments: 0,
        }
    }

    /// Layout id within its display
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Total bytes this layout may hand out
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Bytes still free
    pub fn available(&self) -> usize {
        self.config.capacity - self.next
    }

    /// Number of segments created so far
    pub fn segment_count(&self) -> u8 {
        self.segments
    }

    /// Allocate a segment covering columns `col_start..=col_end` and pages
    /// `page_start..=page_end`
    ///
    /// The segment receives the next `(pages) * (columns)` bytes of the
    /// layout. Fails if the layout is full, the ranges are reversed or leave
    /// the panel, or the memory does not fit.
    ///
    /// Only memory ranges are kept disjoint. Two segments may still cover the
    /// same pixels on the panel; keeping their rectangles apart is up to the
    /// caller.
    pub fn create_segment(
        &mut self,
        mode: AddressMode,
        col_start: u8,
        page_start: u8,
        col_end: u8,
        page_end: u8,
    ) -> Result<Segment, ConfigError> {
        if self.segments >= self.config.max_segments {
            return Err(config_error(ConfigError::TooManySegments {
                limit: self.config.max_segments,
            }));
        }

        if col_start > col_end || col_end >= self.geometry.width {
            return Err(config_error(ConfigError::ColumnRange {
                start: col_start,
                end: col_end,
            }));
        }

        if page_start > page_end || page_end >= self.geometry.pages() {
            return Err(config_error(ConfigError::PageRange {
                start: page_start,
                end: page_end,
            }));
        }

        let size = (page_end - page_start + 1) as usize * (col_end - col_start + 1) as usize;
        if size > self.available() {
            return Err(config_error(ConfigError::OutOfMemory {
                requested: size,
                available: self.available(),
            }));
        }

        let span = GramSpan {
            offset: self.next,
            len: size,
        };
        let id = SegmentId {
            display: self.display,
            layout: self.id,
            index: self.segments,
        };

        self.next += size;
        self.segments += 1;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "layout {}: segment {} at {}+{} ({} bytes left)",
            self.id,
            id.index,
            span.offset,
            span.len,
            self.available()
        );

        Ok(Segment::new(
            id, mode, col_start, page_start, col_end, page_end, span,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Resolution, MAX_SEGMENTS_PER_LAYOUT};

    fn layout() -> Layout {
        let g = Resolution::W128xH64.geometry();
        Layout::new(0, 1, g, LayoutConfig::full(g))
    }

    #[test]
    fn test_sequential_allocation() {
        let mut l = layout();
        let a = l.create_segment(AddressMode::Horizontal, 0, 0, 127, 1).unwrap();
        let b = l.create_segment(AddressMode::Vertical, 0, 2, 63, 7).unwrap();

        assert_eq!(a.span().range(), 0..256);
        assert_eq!(b.span().range(), 256..640);
        assert_eq!(l.available(), 1024 - 640);
        assert_eq!(b.id().index, 1);
        assert_eq!(b.id().layout, 1);
    }

    #[test]
    fn test_capacity_exceeded() {
        let g = Resolution::W128xH64.geometry();
        let mut l = Layout::new(0, 0, g, LayoutConfig::with_capacity(64));

        let first = l.create_segment(AddressMode::Horizontal, 0, 0, 39, 0);
        assert!(first.is_ok());

        let second = l.create_segment(AddressMode::Horizontal, 40, 0, 79, 0);
        assert_eq!(
            second,
            Err(ConfigError::OutOfMemory {
                requested: 40,
                available: 24
            })
        );
        // Failed allocation leaves the cursor untouched
        assert_eq!(l.available(), 24);
        assert_eq!(l.segment_count(), 1);
    }

    #[test]
    fn test_invalid_columns() {
        let mut l = layout();
        assert_eq!(
            l.create_segment(AddressMode::Horizontal, 10, 0, 5, 0),
            Err(ConfigError::ColumnRange { start: 10, end: 5 })
        );
        assert_eq!(
            l.create_segment(AddressMode::Horizontal, 0, 0, 128, 0),
            Err(ConfigError::ColumnRange { start: 0, end: 128 })
        );
    }

    #[test]
    fn test_invalid_pages() {
        let mut l = layout();
        assert_eq!(
            l.create_segment(AddressMode::Page, 0, 3, 10, 2),
            Err(ConfigError::PageRange { start: 3, end: 2 })
        );
        assert_eq!(
            l.create_segment(AddressMode::Page, 0, 0, 10, 8),
            Err(ConfigError::PageRange { start: 0, end: 8 })
        );
    }

    #[test]
    fn test_segment_limit() {
        let mut l = layout();
        for i in 0..MAX_SEGMENTS_PER_LAYOUT {
            l.create_segment(AddressMode::Horizontal, i, 0, i, 0).unwrap();
        }
        assert_eq!(
            l.create_segment(AddressMode::Horizontal, 20, 0, 20, 0),
            Err(ConfigError::TooManySegments {
                limit: MAX_SEGMENTS_PER_LAYOUT
            })
        );
    }

    #[test]
    fn test_exact_fit() {
        let mut l = layout();
        l.create_segment(AddressMode::Horizontal, 0, 0, 127, 7).unwrap();
        assert_eq!(l.available(), 0);
        assert!(matches!(
            l.create_segment(AddressMode::Horizontal, 0, 0, 0, 0),
            Err(ConfigError::OutOfMemory { requested: 1, available: 0 })
        ));
    }
}
