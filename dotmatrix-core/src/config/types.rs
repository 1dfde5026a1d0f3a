//! Configuration type definitions

use core::fmt;

use dotmatrix_hal::{Color, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout;

/// Default cursor blink half-period
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 300;

/// Upper bound for blocks on one panel
pub const MAX_BLOCKS: usize = 65_536;

/// Largest surface extent in either axis
///
/// Keeps every coordinate representable as a signed 32-bit value, which
/// is what most graphics stacks use.
pub const MAX_SURFACE_EXTENT: u32 = i32::MAX as u32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `rows` is zero
    ZeroRows,
    /// `columns` is zero
    ZeroColumns,
    /// `pixel_size` is zero
    ZeroPixelSize,
    /// `blink_interval_ms` is zero
    ZeroBlinkInterval,
    /// More than [`MAX_BLOCKS`] blocks
    TooManyBlocks,
    /// Surface dimensions overflow [`MAX_SURFACE_EXTENT`]
    SurfaceTooLarge,
    /// Colour string is not `#rgb`, `#rrggbb` or `#rrggbbaa`
    InvalidColor,
    /// Document could not be parsed
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::ZeroRows => "rows must be at least 1",
            ConfigError::ZeroColumns => "columns must be at least 1",
            ConfigError::ZeroPixelSize => "pixel_size must be at least 1",
            ConfigError::ZeroBlinkInterval => "blink_interval_ms must be at least 1",
            ConfigError::TooManyBlocks => "too many blocks for one panel",
            ConfigError::SurfaceTooLarge => "panel dimensions overflow the surface",
            ConfigError::InvalidColor => "pixel_color is not a hex colour",
            ConfigError::Parse => "malformed configuration document",
        };
        f.write_str(msg)
    }
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Rows of blocks
    pub rows: u32,
    /// Columns of blocks
    pub columns: u32,
    /// Edge length of one pixel in surface units
    pub pixel_size: u32,
    /// Colour of lit pixels
    pub pixel_color: Color,
    /// Cursor blink half-period (ms)
    pub blink_interval_ms: u32,
}

impl Default for GridConfig {
    /// A 16×2 character LCD with 4-unit pixels
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 16,
            pixel_size: 4,
            pixel_color: Color::BLACK,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
        }
    }
}

impl GridConfig {
    /// Create a config with the default blink interval
    pub const fn new(rows: u32, columns: u32, pixel_size: u32, pixel_color: Color) -> Self {
        Self {
            rows,
            columns,
            pixel_size,
            pixel_color,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
        }
    }

    /// Override the blink interval
    pub const fn with_blink_interval(mut self, interval_ms: u32) -> Self {
        self.blink_interval_ms = interval_ms;
        self
    }

    /// Total number of blocks
    pub fn block_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Surface dimensions required by this panel
    ///
    /// Call [`validate`](Self::validate) first; see [`layout::grid_size`].
    pub fn surface_size(&self) -> Size {
        layout::grid_size(self.rows, self.columns, self.pixel_size)
    }

    /// Check that the configuration describes a drawable panel
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.pixel_size == 0 {
            return Err(ConfigError::ZeroPixelSize);
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::ZeroBlinkInterval);
        }

        let blocks = (self.rows as u64) * (self.columns as u64);
        if blocks > MAX_BLOCKS as u64 {
            return Err(ConfigError::TooManyBlocks);
        }

        match layout::checked_grid_size(self.rows, self.columns, self.pixel_size) {
            Some(size) if size.width <= MAX_SURFACE_EXTENT && size.height <= MAX_SURFACE_EXTENT => {
                Ok(())
            }
            _ => Err(ConfigError::SurfaceTooLarge),
        }
    }
}
