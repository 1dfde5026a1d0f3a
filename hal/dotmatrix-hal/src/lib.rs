//! Dotmatrix Hardware Abstraction Layer
//!
//! This crate defines the drawing-surface abstraction that a dot-matrix
//! panel renders onto. Anything that can fill and clear rectangles can
//! host a panel: an in-memory framebuffer, an `embedded-graphics` draw
//! target, an OLED driver, a canvas in a browser.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Panel logic (dotmatrix-core)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dotmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  FrameBuffer  │       │ embedded-     │
//! │  (RGBA, RAM)  │       │ graphics      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`surface::DrawSurface`] - Rectangle fill/clear primitives
//!
//! # Types
//!
//! - [`color::Color`] - RGBA colour with source-over compositing
//! - [`surface::Point`], [`surface::Rect`], [`surface::Size`] - Geometry in surface units

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod surface;

// Re-export key types at crate root for convenience
pub use color::Color;
pub use surface::{DrawSurface, Point, Rect, Size, SurfaceError};
