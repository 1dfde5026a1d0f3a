//! Character cell
//!
//! A block is a fixed 5×8 arrangement of pixels. It knows where it sits
//! on the surface and how to turn a font glyph into lit and unlit pixels.

use core::ops::Range;

use dotmatrix_hal::{Color, DrawSurface, Point, Rect, Size, SurfaceError};

use super::pixel::Pixel;
use crate::config::GridConfig;
use crate::error::Error;
use crate::font::{BitPattern, CharCode, FontKey, FontTable};
use crate::layout::{self, BlockPosition, PIXELS_PER_ROW, PIXEL_COUNT};

/// Pixels forming the underline cursor (the bottom row)
pub const CURSOR_PIXELS: Range<usize> = PIXEL_COUNT - PIXELS_PER_ROW..PIXEL_COUNT;

/// One character cell of the panel
#[derive(Debug, Clone)]
pub struct Block {
    index: usize,
    position: BlockPosition,
    origin: Point,
    pixel_size: u32,
    pixel_color: Color,
    pixels: [Pixel; PIXEL_COUNT],
}

impl Block {
    /// Create block `index` of the panel described by `config` and draw
    /// it in its idle (all unlit) state
    ///
    /// A degenerate `config` is rejected before any geometry is computed.
    pub fn new<S: DrawSurface + ?Sized>(
        index: usize,
        config: &GridConfig,
        surface: &mut S,
    ) -> Result<Self, Error> {
        config.validate()?;

        let columns = config.columns as usize;
        let origin = layout::block_origin(index, columns, config.pixel_size);
        let pixels = core::array::from_fn(|i| {
            Pixel::new(
                i,
                config.pixel_size,
                config.pixel_color,
                origin,
                config.blink_interval_ms,
            )
        });

        let mut block = Self {
            index,
            position: layout::block_position(index, columns),
            origin,
            pixel_size: config.pixel_size,
            pixel_color: config.pixel_color,
            pixels,
        };
        block.render(surface)?;

        Ok(block)
    }

    /// Width and height of any block with the given pixel size
    pub const fn size(pixel_size: u32) -> Size {
        layout::block_size(pixel_size)
    }

    /// Spacing between neighbouring blocks
    pub const fn gutter_size(pixel_size: u32) -> u32 {
        layout::block_gutter(pixel_size)
    }

    /// Row-major index on the panel
    pub fn index(&self) -> usize {
        self.index
    }

    /// Row and column on the panel
    pub fn position(&self) -> BlockPosition {
        self.position
    }

    /// Absolute top-left corner
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Area covered by this block
    pub fn bounds(&self) -> Rect {
        let size = Self::size(self.pixel_size);
        Rect::new(self.origin.x, self.origin.y, size.width, size.height)
    }

    /// Spacing between this block and its neighbours
    pub fn gutter(&self) -> u32 {
        Self::gutter_size(self.pixel_size)
    }

    /// Colour of lit pixels
    pub fn pixel_color(&self) -> Color {
        self.pixel_color
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pattern currently shown
    pub fn pattern(&self) -> BitPattern {
        let mut pattern = BitPattern::BLANK;
        for pixel in &self.pixels {
            pattern.set(pixel.index(), pixel.is_visible());
        }
        pattern
    }

    /// Whether the cursor is blinking on this block
    pub fn is_blinking(&self) -> bool {
        self.pixels[CURSOR_PIXELS].iter().any(Pixel::is_blinking)
    }

    /// Draw every pixel unlit
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        for pixel in &mut self.pixels {
            pixel.render(surface, false)?;
        }
        Ok(())
    }

    /// Show a character
    ///
    /// The glyph is looked up before anything is drawn, so an unknown
    /// character leaves the previous contents untouched.
    pub fn write_character<S, F>(
        &mut self,
        surface: &mut S,
        font: &F,
        code: impl Into<CharCode>,
    ) -> Result<(), Error>
    where
        S: DrawSurface + ?Sized,
        F: FontTable + ?Sized,
    {
        let key = FontKey::from(code.into());
        self.write_key(surface, font, &key)
    }

    /// Show the glyph stored under a pre-formed font key
    pub fn write_key<S, F>(
        &mut self,
        surface: &mut S,
        font: &F,
        key: &FontKey,
    ) -> Result<(), Error>
    where
        S: DrawSurface + ?Sized,
        F: FontTable + ?Sized,
    {
        let pattern = font
            .glyph(key)
            .ok_or_else(|| Error::UnknownCharacter(key.clone()))?;
        self.write_pattern(surface, pattern)?;
        Ok(())
    }

    /// Show an already decoded pattern
    pub fn write_pattern<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        pattern: BitPattern,
    ) -> Result<(), SurfaceError> {
        self.clear_character(surface)?;
        for pixel in &mut self.pixels {
            let lit = pattern.is_lit(pixel.index());
            pixel.render(surface, lit)?;
        }
        Ok(())
    }

    /// Unlight every pixel
    pub fn clear_character<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        self.render(surface)
    }

    /// Start or stop the underline cursor
    pub fn toggle_cursor_blink<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        stop: bool,
    ) -> Result<(), SurfaceError> {
        for pixel in &mut self.pixels[CURSOR_PIXELS] {
            pixel.blink(surface, stop)?;
        }
        Ok(())
    }

    /// Advance the cursor blink clock
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        elapsed_ms: u32,
    ) -> Result<(), SurfaceError> {
        for pixel in &mut self.pixels[CURSOR_PIXELS] {
            pixel.tick(surface, elapsed_ms)?;
        }
        Ok(())
    }
}
