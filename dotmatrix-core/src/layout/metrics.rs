//! Pixel, block and grid geometry
//!
//! Two different gutters are in play:
//!
//! - the **pixel gutter** separates pixels inside a block and is
//!   `ceil(pixel_size / 4)`
//! - the **block gutter** separates neighbouring blocks and is one full
//!   `pixel_size`
//!
//! The unchecked functions assume a validated configuration
//! (see [`GridConfig::validate`](crate::config::GridConfig::validate)).

use dotmatrix_hal::{Point, Size};

/// Pixels across one block
pub const PIXELS_PER_ROW: usize = 5;

/// Pixel rows in one block
pub const PIXEL_ROWS: usize = 8;

/// Pixels in one block (5 × 8)
pub const PIXEL_COUNT: usize = PIXELS_PER_ROW * PIXEL_ROWS;

/// Spacing between pixels inside a block
pub const fn pixel_gutter(pixel_size: u32) -> u32 {
    pixel_size.div_ceil(4)
}

/// Spacing between neighbouring blocks
pub const fn block_gutter(pixel_size: u32) -> u32 {
    pixel_size
}

/// Width and height of one block
pub const fn block_size(pixel_size: u32) -> Size {
    let gutter = pixel_gutter(pixel_size);
    let cols = PIXELS_PER_ROW as u32;
    let rows = PIXEL_ROWS as u32;
    Size::new(
        pixel_size * cols + gutter * (cols - 1),
        pixel_size * rows + gutter * (rows - 1),
    )
}

/// Row/column of a block inside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockPosition {
    pub row: usize,
    pub column: usize,
}

/// Row-major position of block `index` in a grid `columns` blocks wide
pub const fn block_position(index: usize, columns: usize) -> BlockPosition {
    BlockPosition {
        row: index / columns,
        column: index % columns,
    }
}

/// Absolute top-left corner of block `index`
pub const fn block_origin(index: usize, columns: usize, pixel_size: u32) -> Point {
    let pos = block_position(index, columns);
    let size = block_size(pixel_size);
    let gutter = block_gutter(pixel_size);
    Point::new(
        pos.column as u32 * (size.width + gutter),
        pos.row as u32 * (size.height + gutter),
    )
}

/// Absolute top-left corner of pixel `index` inside a block at `block`
pub const fn pixel_origin(index: usize, pixel_size: u32, block: Point) -> Point {
    let gutter = pixel_gutter(pixel_size);
    let h = (index % PIXELS_PER_ROW) as u32;
    let v = (index / PIXELS_PER_ROW) as u32;
    block.offset(Point::new(
        h * (pixel_size + gutter),
        v * (pixel_size + gutter),
    ))
}

/// Total surface size for a grid of `rows` × `columns` blocks
///
/// # Panics
///
/// Overflows `u32` (a panic in debug builds) for dimensions that a
/// validated [`GridConfig`](crate::config::GridConfig) rejects. Use
/// [`checked_grid_size`] for untrusted input.
pub const fn grid_size(rows: u32, columns: u32, pixel_size: u32) -> Size {
    let block = block_size(pixel_size);
    let gutter = block_gutter(pixel_size);
    Size::new(
        block.width * columns + gutter * columns.saturating_sub(1),
        block.height * rows + gutter * rows.saturating_sub(1),
    )
}

/// Overflow-checked [`grid_size`]
///
/// Returns `None` if any intermediate value does not fit in `u32`.
pub fn checked_grid_size(rows: u32, columns: u32, pixel_size: u32) -> Option<Size> {
    let gutter = pixel_gutter(pixel_size);
    let block_w = pixel_size
        .checked_mul(PIXELS_PER_ROW as u32)?
        .checked_add(gutter.checked_mul(PIXELS_PER_ROW as u32 - 1)?)?;
    let block_h = pixel_size
        .checked_mul(PIXEL_ROWS as u32)?
        .checked_add(gutter.checked_mul(PIXEL_ROWS as u32 - 1)?)?;

    let width = block_w
        .checked_mul(columns)?
        .checked_add(pixel_size.checked_mul(columns.saturating_sub(1))?)?;
    let height = block_h
        .checked_mul(rows)?
        .checked_add(pixel_size.checked_mul(rows.saturating_sub(1))?)?;

    Some(Size::new(width, height))
}
