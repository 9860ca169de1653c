//! Error types
//!
//! Configuration errors describe a layout or call that can never work on this
//! panel; they are meant to be caught during integration. Drawing outside a
//! segment is not an error at all and is silently clipped.

use core::fmt;

/// Operation that a segment's addressing mode cannot perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnsupportedOp {
    /// `clear_part` on a vertically addressed segment
    VerticalPartialClear,
}

/// Invalid layout or out-of-range controller request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The layout already handed out its maximum number of segments
    TooManySegments {
        /// Segment limit of the layout
        limit: u8,
    },
    /// Column range is reversed or past the panel width
    ColumnRange {
        /// First column
        start: u8,
        /// Last column (inclusive)
        end: u8,
    },
    /// Page range is reversed or past the panel height
    PageRange {
        /// First page
        start: u8,
        /// Last page (inclusive)
        end: u8,
    },
    /// The display has handed out every layout id
    TooManyLayouts,
    /// Not enough display memory left in the layout
    OutOfMemory {
        /// Bytes the segment needs
        requested: usize,
        /// Bytes still free in the layout
        available: usize,
    },
    /// `clear_part` rectangle is reversed or outside the segment
    PartialClearRange,
    /// Address window outside the controller's column/page range
    WindowOutOfRange,
    /// Operation not implemented for this addressing mode
    Unsupported(UnsupportedOp),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManySegments { limit } => {
                write!(f, "layout segment limit of {limit} reached")
            }
            Self::TooManyLayouts => write!(f, "no layout ids left on this display"),
            Self::ColumnRange { start, end } => {
                write!(f, "invalid column range {start}..={end}")
            }
            Self::PageRange { start, end } => {
                write!(f, "invalid page range {start}..={end}")
            }
            Self::OutOfMemory {
                requested,
                available,
            } => {
                write!(
                    f,
                    "layout out of memory: requested {requested} bytes, {available} available"
                )
            }
            Self::PartialClearRange => write!(f, "partial clear rectangle out of range"),
            Self::WindowOutOfRange => write!(f, "address window out of range"),
            Self::Unsupported(UnsupportedOp::VerticalPartialClear) => {
                write!(f, "partial clear is not supported in vertical addressing")
            }
        }
    }
}

/// Error from an operation that may talk to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Invalid configuration or request
    Config(ConfigError),
    /// The transport failed
    Transport(E),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "{e}"),
            Error::Transport(e) => write!(f, "transport error: {e:?}"),
        }
    }
}

/// Report a configuration error through the log before handing it back
pub(crate) fn config_error(e: ConfigError) -> ConfigError {
    #[cfg(feature = "defmt")]
    defmt::warn!("configuration error: {:?}", e);
    e
}
