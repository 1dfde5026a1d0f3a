//! Drawing surfaces for dotmatrix panels
//!
//! This crate provides:
//! - [`FrameBuffer`], an in-memory RGBA surface with source-over
//!   compositing. Useful for hosts that blit a finished frame and for
//!   inspecting what a panel drew.
//! - [`GraphicsSurface`] (feature `embedded-graphics`), which draws onto any
//!   `DrawTarget<Color = Rgb888>` such as an SPI TFT driver or a simulator.
//!
//! # Architecture
//!
//! ```text
//! Grid ──▶ DrawSurface ──┬──▶ FrameBuffer (Vec<Color>)
//!                        └──▶ GraphicsSurface ──▶ DrawTarget
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod framebuffer;
#[cfg(feature = "embedded-graphics")]
pub mod graphics;

pub use framebuffer::FrameBuffer;
#[cfg(feature = "embedded-graphics")]
pub use graphics::GraphicsSurface;
