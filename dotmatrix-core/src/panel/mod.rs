//! Panel hierarchy
//!
//! A [`Grid`] owns its [`Block`]s, each block owns exactly 40 [`Pixel`]s.
//! Only the grid holds the surface; blocks and pixels borrow it for the
//! duration of a draw.

pub mod block;
pub mod grid;
pub mod pixel;

#[cfg(test)]
pub(crate) mod mock;

pub use block::Block;
pub use grid::Grid;
pub use pixel::Pixel;
