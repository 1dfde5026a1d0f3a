//! Panel layout arithmetic
//!
//! Every position on the panel is a pure function of the block index,
//! the pixel index inside the block, the grid width in blocks and the
//! pixel size. Nothing here touches a surface.

pub mod metrics;

pub use metrics::{
    block_gutter, block_origin, block_position, block_size, checked_grid_size, grid_size,
    pixel_gutter, pixel_origin, BlockPosition, PIXELS_PER_ROW, PIXEL_COUNT, PIXEL_ROWS,
};
