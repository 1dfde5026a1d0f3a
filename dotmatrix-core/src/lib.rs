//! Board-agnostic logic for dot-matrix character panels
//!
//! A panel is a grid of character cells ("blocks"), each a fixed 5×8
//! arrangement of square pixels, rendered onto any
//! [`DrawSurface`](dotmatrix_hal::DrawSurface). This crate contains
//! everything that does not depend on the host surface:
//!
//! - Panel configuration and validation
//! - Layout arithmetic (pixel, block and grid geometry)
//! - Font table lookup and glyph decoding
//! - Cursor blink state machine (tick-driven, no timers of its own)
//! - The [`Grid`] / [`Block`] / [`Pixel`] hierarchy
//!
//! # Driving the blink
//!
//! There is no background timer. The host calls [`Grid::tick`] with the
//! elapsed time from whatever clock it has (an embedded ticker task, a
//! frame loop, a test) and the active cursor flips on interval boundaries.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod blink;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod panel;

pub use config::{ConfigError, GridConfig};
pub use error::Error;
pub use font::{BitPattern, CharCode, FontKey, FontTable, Hd44780Font};
pub use panel::{Block, Grid, Pixel};
