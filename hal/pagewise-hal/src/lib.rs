//! Pagewise Hardware Abstraction Layer
//!
//! This crate defines the byte-level transport between the framebuffer core
//! and a page-addressed display controller. The core never touches a bus
//! directly; it only issues command bytes and data runs through [`Transport`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pagewise-core (segments, primitives)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pagewise-hal (this crate - Transport)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ I2cTransport  │       │ custom (SPI,  │
//! │ (embedded-hal)│       │  DMA, ...)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//! - `mock` - [`mock::RecordingTransport`] for host tests

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod transport;

// Re-export key types at crate root for convenience
pub use i2c::{I2cConfig, I2cTransport};
pub use transport::{TransferMode, Transport};
