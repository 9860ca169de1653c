//! Display consumers built on pagewise segments
//!
//! This crate provides:
//! - `BarChart` for vertical bars that redraw only the pixels that changed
//! - `Terminal` for a scrolling log of text lines
//!
//! Both draw through a `pagewise_core::Canvas`, so they work on any segment
//! of any layout. Neither owns the segment; pass the canvas on every call.

#![no_std]
#![deny(unsafe_code)]

pub mod chart;
pub mod terminal;

pub use chart::BarChart;
pub use terminal::{Terminal, TERMINAL_COLS, TERMINAL_ROWS};
