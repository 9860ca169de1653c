//! Configuration types
//!
//! Compile-time limits plus the small runtime descriptors a display and its
//! layouts are created from.

pub mod display;
pub mod types;

pub use display::*;
pub use types::*;
