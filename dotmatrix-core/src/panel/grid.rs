//! Panel display
//!
//! The grid owns the surface, the font and every block. It is the only
//! place where block indices are resolved; an index past the end of the
//! panel is silently ignored by every operation.

use alloc::vec::Vec;

use dotmatrix_hal::{DrawSurface, Size};

use super::block::Block;
use crate::config::GridConfig;
use crate::error::Error;
use crate::font::{BitPattern, CharCode, FontKey, FontTable};
use crate::layout;

/// A panel of `rows × columns` character blocks on one surface
///
/// At most one block runs the cursor blink at any time.
#[derive(Debug)]
pub struct Grid<S, F> {
    config: GridConfig,
    surface: S,
    font: F,
    blocks: Vec<Block>,
    active_block: Option<usize>,
}

impl<S, F> Grid<S, F> {
    /// Surface size of a `rows × columns` panel, or `None` if it does not
    /// fit in surface units
    ///
    /// Same as [`layout::checked_grid_size`], which needs no type parameters.
    pub fn size(rows: u32, columns: u32, pixel_size: u32) -> Option<Size> {
        layout::checked_grid_size(rows, columns, pixel_size)
    }
}

impl<S: DrawSurface, F: FontTable> Grid<S, F> {
    /// Create a panel
    ///
    /// Validates `config`, sizes the surface for the whole panel and draws
    /// every block in its idle state.
    pub fn new(config: GridConfig, mut surface: S, font: F) -> Result<Self, Error> {
        config.validate()?;

        let size = config.surface_size();
        surface.attach(size)?;

        let count = config.block_count();
        let mut blocks = Vec::with_capacity(count);
        for index in 0..count {
            blocks.push(Block::new(index, &config, &mut surface)?);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "grid: {}x{} blocks on {}x{} surface",
            config.rows,
            config.columns,
            size.width,
            size.height
        );

        Ok(Self {
            config,
            surface,
            font,
            blocks,
            active_block: None,
        })
    }

    /// Panel configuration
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Rows of blocks
    pub fn rows(&self) -> u32 {
        self.config.rows
    }

    /// Columns of blocks
    pub fn columns(&self) -> u32 {
        self.config.columns
    }

    /// Surface dimensions used by the panel
    pub fn dimensions(&self) -> Size {
        self.config.surface_size()
    }

    /// The surface being drawn on
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The font used for lookups
    pub fn font(&self) -> &F {
        &self.font
    }

    /// All blocks, row-major
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block at `index`, if it exists
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Block currently holding the cursor
    pub fn active_block(&self) -> Option<usize> {
        self.active_block
    }

    /// Show a character in block `block_index`
    ///
    /// Out-of-range indices are ignored.
    pub fn write_character(
        &mut self,
        code: impl Into<CharCode>,
        block_index: usize,
    ) -> Result<(), Error> {
        let key = FontKey::from(code.into());
        self.write_key(&key, block_index)
    }

    /// Show the glyph for a pre-formed font key in block `block_index`
    pub fn write_key(&mut self, key: &FontKey, block_index: usize) -> Result<(), Error> {
        let Some(block) = self.blocks.get_mut(block_index) else {
            #[cfg(feature = "defmt")]
            defmt::trace!("grid: write to block {} dropped", block_index);
            return Ok(());
        };

        let result = block.write_key(&mut self.surface, &self.font, key);

        #[cfg(feature = "defmt")]
        if let Err(Error::UnknownCharacter(key)) = &result {
            defmt::debug!("grid: no glyph for 0x{} at block {}", key, block_index);
        }

        result
    }

    /// Show a string starting at block `offset`
    ///
    /// Character `k` goes to block `offset + k`; characters that fall past
    /// the end of the panel are dropped. There is no wrapping. Every glyph
    /// is looked up first, so an unknown character fails the whole call
    /// without drawing anything.
    pub fn write_string(&mut self, text: &str, offset: usize) -> Result<(), Error> {
        let mut resolved: Vec<(usize, BitPattern)> = Vec::new();

        for (k, ch) in text.chars().enumerate() {
            let index = match offset.checked_add(k) {
                Some(index) if index < self.blocks.len() => index,
                // Indices only grow from here
                _ => break,
            };

            let key = FontKey::from(CharCode::from(ch));
            match self.font.glyph(&key) {
                Some(pattern) => resolved.push((index, pattern)),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("grid: no glyph for 0x{} in string", key);
                    return Err(Error::UnknownCharacter(key));
                }
            }
        }

        for (index, pattern) in resolved {
            if let Some(block) = self.blocks.get_mut(index) {
                block.write_pattern(&mut self.surface, pattern)?;
            }
        }

        Ok(())
    }

    /// Clear block `block_index`
    pub fn clear_character(&mut self, block_index: usize) -> Result<(), Error> {
        if let Some(block) = self.blocks.get_mut(block_index) {
            block.clear_character(&mut self.surface)?;
        }
        Ok(())
    }

    /// Clear every block
    pub fn clear_screen(&mut self) -> Result<(), Error> {
        for block in &mut self.blocks {
            block.clear_character(&mut self.surface)?;
        }
        Ok(())
    }

    /// Start (`stop == false`) or stop (`stop == true`) the cursor on
    /// block `block_index`
    ///
    /// A cursor blinking on a different block is stopped first, leaving
    /// that block's cursor row unlit. The target becomes the active block
    /// whether it was started or stopped.
    pub fn blink_cursor(&mut self, block_index: usize, stop: bool) -> Result<(), Error> {
        if block_index >= self.blocks.len() {
            #[cfg(feature = "defmt")]
            defmt::trace!("grid: cursor on block {} ignored", block_index);
            return Ok(());
        }

        if let Some(previous) = self.active_block.filter(|&i| i != block_index) {
            if let Some(block) = self.blocks.get_mut(previous) {
                block.toggle_cursor_blink(&mut self.surface, true)?;
            }
        }

        self.active_block = Some(block_index);
        if let Some(block) = self.blocks.get_mut(block_index) {
            block.toggle_cursor_blink(&mut self.surface, stop)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("grid: cursor block {} stop={}", block_index, stop);

        Ok(())
    }

    /// Advance the cursor blink clock by `elapsed_ms`
    ///
    /// Call this from the host's timer or frame loop.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<(), Error> {
        if let Some(block) = self.active_block.and_then(|i| self.blocks.get_mut(i)) {
            block.tick(&mut self.surface, elapsed_ms)?;
        }
        Ok(())
    }

    /// Tear the panel down and hand the surface back
    ///
    /// A blinking cursor is stopped first so no lit cursor is left behind.
    pub fn release(mut self) -> Result<S, Error> {
        if let Some(block) = self.active_block.and_then(|i| self.blocks.get_mut(i)) {
            block.toggle_cursor_blink(&mut self.surface, true)?;
        }
        Ok(self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::font::{FontMap, Hd44780Font};
    use crate::layout::PIXEL_COUNT;
    use crate::panel::block::CURSOR_PIXELS;
    use crate::panel::mock::{DrawOp, MockSurface};
    use dotmatrix_hal::{Color, SurfaceError};

    fn grid(rows: u32, columns: u32) -> Grid<MockSurface, Hd44780Font> {
        let config = GridConfig::new(rows, columns, 4, Color::BLACK);
        Grid::new(config, MockSurface::new(), Hd44780Font::new()).unwrap()
    }

    fn patterns(grid: &Grid<MockSurface, Hd44780Font>) -> Vec<BitPattern> {
        grid.blocks().iter().map(Block::pattern).collect()
    }

    fn glyph(c: char) -> BitPattern {
        Hd44780Font::new()
            .glyph(&FontKey::from(CharCode::from(c)))
            .unwrap()
    }

    #[test]
    fn test_new_attaches_and_renders() {
        let grid = grid(2, 16);
        assert_eq!(grid.blocks().len(), 32);
        assert_eq!(grid.active_block(), None);
        assert_eq!(grid.dimensions(), Size::new(24 * 16 + 4 * 15, 39 * 2 + 4));
        assert_eq!(
            Grid::<MockSurface, Hd44780Font>::size(2, 16, 4),
            Some(grid.dimensions())
        );
        assert_eq!(grid.surface().size, grid.dimensions());
        assert_eq!(grid.surface().ops[0], DrawOp::Attach(grid.dimensions()));
        assert_eq!(grid.surface().ops.len(), 1 + 32 * PIXEL_COUNT * 2);

        for (i, block) in grid.blocks().iter().enumerate() {
            assert_eq!(block.index(), i);
            assert!(block.pattern().is_blank());
        }
    }

    #[test]
    fn test_size_overflow_is_none() {
        assert_eq!(Grid::<MockSurface, Hd44780Font>::size(u32::MAX, 1, 4), None);
        assert_eq!(Grid::<MockSurface, Hd44780Font>::size(1, 1, u32::MAX), None);
        assert_eq!(
            Grid::<MockSurface, Hd44780Font>::size(1, 1, 4),
            Some(Size::new(24, 39))
        );
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GridConfig::new(0, 16, 4, Color::BLACK);
        let result = Grid::new(config, MockSurface::new(), Hd44780Font::new());
        assert!(matches!(result, Err(Error::Config(ConfigError::ZeroRows))));
    }

    #[test]
    fn test_attach_failure() {
        let surface = MockSurface {
            fail: true,
            ..MockSurface::new()
        };
        let result = Grid::new(GridConfig::default(), surface, Hd44780Font::new());
        assert!(matches!(result, Err(Error::Surface(SurfaceError::TooLarge))));
    }

    #[test]
    fn test_write_character() {
        let mut grid = grid(2, 8);
        grid.write_character(0x41u32, 5).unwrap();
        assert_eq!(grid.block(5).unwrap().pattern(), glyph('A'));
        assert!(grid.block(4).unwrap().pattern().is_blank());
    }

    #[test]
    fn test_write_character_untyped_literal() {
        let mut grid = grid(1, 2);
        grid.write_character(65, 1).unwrap();
        assert_eq!(grid.block(1).unwrap().pattern(), glyph('A'));

        let result = grid.write_character(-1, 0);
        assert_eq!(
            result,
            Err(Error::UnknownCharacter(FontKey::parse("ffffffff").unwrap()))
        );
    }

    #[test]
    fn test_write_out_of_range_is_noop() {
        let mut grid = grid(1, 4);
        grid.write_character('A', 1).unwrap();
        let before = patterns(&grid);
        let ops = grid.surface().ops.len();

        assert_eq!(grid.write_character('B', 4), Ok(()));
        assert_eq!(grid.write_character('B', usize::MAX), Ok(()));
        // Even unknown characters are not looked up past the end
        assert_eq!(grid.write_character(0x263au32, 99), Ok(()));

        assert_eq!(patterns(&grid), before);
        assert_eq!(grid.surface().ops.len(), ops);
    }

    #[test]
    fn test_write_string_with_offset() {
        let mut grid = grid(1, 8);
        grid.write_string("HI", 3).unwrap();

        let shown = patterns(&grid);
        assert_eq!(shown[3], glyph('H'));
        assert_eq!(shown[4], glyph('I'));
        for (i, pattern) in shown.iter().enumerate() {
            if i != 3 && i != 4 {
                assert!(pattern.is_blank(), "block {} was touched", i);
            }
        }
    }

    #[test]
    fn test_write_string_touches_only_targets() {
        let mut grid = grid(1, 8);
        let targets = [grid.block(3).unwrap().bounds(), grid.block(4).unwrap().bounds()];
        grid.surface.ops.clear();

        grid.write_string("HI", 3).unwrap();
        assert!(grid
            .surface()
            .touched()
            .iter()
            .all(|r| targets.iter().any(|t| t.intersects(r))));
    }

    #[test]
    fn test_write_string_drops_overflow() {
        let mut grid = grid(1, 4);
        grid.write_string("HELLO", 2).unwrap();
        let shown = patterns(&grid);
        assert_eq!(shown[2], glyph('H'));
        assert_eq!(shown[3], glyph('E'));

        // Offset past the panel writes nothing
        grid.write_string("X", usize::MAX).unwrap();
    }

    #[test]
    fn test_write_string_does_not_wrap_visual_rows() {
        let mut grid = grid(2, 3);
        grid.write_string("ABCD", 1).unwrap();
        // Block 3 is the first block of the second row
        assert_eq!(grid.block(3).unwrap().pattern(), glyph('C'));
        assert_eq!(grid.block(4).unwrap().pattern(), glyph('D'));
    }

    #[test]
    fn test_write_string_unknown_is_atomic() {
        let mut grid = grid(1, 8);
        grid.write_string("ok", 0).unwrap();
        let before = patterns(&grid);

        let result = grid.write_string("ab\u{263a}c", 2);
        assert_eq!(
            result,
            Err(Error::UnknownCharacter(FontKey::parse("263a").unwrap()))
        );
        assert_eq!(patterns(&grid), before);
    }

    #[test]
    fn test_unknown_character_keeps_previous_glyph() {
        let mut grid = grid(1, 2);
        grid.write_character('Q', 0).unwrap();
        let result = grid.write_character(0x80u32, 0);
        assert!(matches!(result, Err(Error::UnknownCharacter(_))));
        assert_eq!(grid.block(0).unwrap().pattern(), glyph('Q'));
    }

    #[test]
    fn test_write_key() {
        let mut font = FontMap::new();
        font.insert(0xe000u32, &[31; 8]);
        let config = GridConfig::new(1, 2, 2, Color::WHITE);
        let mut grid = Grid::new(config, MockSurface::new(), font).unwrap();

        grid.write_key(&FontKey::parse("E000").unwrap(), 1).unwrap();
        assert_eq!(grid.block(1).unwrap().pattern(), BitPattern::FULL);
    }

    #[test]
    fn test_clear_character_and_screen() {
        let mut grid = grid(1, 4);
        grid.write_string("ABCD", 0).unwrap();

        grid.clear_character(1).unwrap();
        grid.clear_character(42).unwrap();
        let shown = patterns(&grid);
        assert!(shown[1].is_blank());
        assert_eq!(shown[2], glyph('C'));

        grid.clear_screen().unwrap();
        assert!(patterns(&grid).iter().all(BitPattern::is_blank));
    }

    #[test]
    fn test_single_active_cursor() {
        let mut grid = grid(1, 8);

        grid.blink_cursor(2, false).unwrap();
        assert_eq!(grid.active_block(), Some(2));
        grid.tick(300).unwrap();
        assert_eq!(grid.block(2).unwrap().pattern().lit_count(), 5);

        grid.blink_cursor(5, false).unwrap();
        assert_eq!(grid.active_block(), Some(5));

        let old = grid.block(2).unwrap();
        assert!(!old.is_blinking());
        assert!(old.pattern().is_blank());
        assert!(grid.block(5).unwrap().is_blinking());
        assert_eq!(grid.blocks().iter().filter(|b| b.is_blinking()).count(), 1);
    }

    #[test]
    fn test_previous_cursor_stopped_before_new_starts() {
        let mut grid = grid(1, 8);
        grid.blink_cursor(2, false).unwrap();
        grid.tick(300).unwrap();

        let old_bounds = grid.block(2).unwrap().bounds();
        let new_bounds = grid.block(5).unwrap().bounds();
        grid.surface.ops.clear();

        grid.blink_cursor(5, false).unwrap();
        // Starting a blink draws nothing; stopping forces the old cursor off
        let touched = grid.surface().touched();
        assert!(!touched.is_empty());
        assert!(touched.iter().all(|r| old_bounds.intersects(r)));
        assert!(!touched.iter().any(|r| new_bounds.intersects(r)));
    }

    #[test]
    fn test_blink_cursor_stop_keeps_active_index() {
        let mut grid = grid(1, 8);
        grid.blink_cursor(2, false).unwrap();
        grid.blink_cursor(2, true).unwrap();
        assert_eq!(grid.active_block(), Some(2));
        assert!(!grid.block(2).unwrap().is_blinking());

        // Stopping a block that was never blinking still moves the index
        grid.blink_cursor(6, true).unwrap();
        assert_eq!(grid.active_block(), Some(6));
    }

    #[test]
    fn test_blink_cursor_same_block_is_idempotent() {
        let mut grid = grid(1, 8);
        grid.blink_cursor(2, false).unwrap();
        grid.tick(200).unwrap();
        grid.blink_cursor(2, false).unwrap();
        grid.tick(100).unwrap();
        assert_eq!(grid.block(2).unwrap().pattern().lit_count(), 5);
    }

    #[test]
    fn test_blink_cursor_out_of_range() {
        let mut grid = grid(1, 4);
        grid.blink_cursor(1, false).unwrap();
        grid.blink_cursor(4, false).unwrap();
        assert_eq!(grid.active_block(), Some(1));
        assert!(grid.block(1).unwrap().is_blinking());
    }

    #[test]
    fn test_cursor_over_character() {
        let mut grid = grid(1, 4);
        grid.write_character('_', 0).unwrap();
        // Underscore lights the bottom glyph row, not the cursor row
        let pattern = grid.block(0).unwrap().pattern();
        for i in CURSOR_PIXELS {
            assert!(!pattern.is_lit(i));
        }

        grid.blink_cursor(0, false).unwrap();
        grid.tick(300).unwrap();
        let pattern = grid.block(0).unwrap().pattern();
        for i in CURSOR_PIXELS {
            assert!(pattern.is_lit(i));
        }
        assert_eq!(pattern.lit_count(), glyph('_').lit_count() + 5);
    }

    #[test]
    fn test_release_stops_cursor() {
        let mut grid = grid(1, 4);
        grid.blink_cursor(3, false).unwrap();
        grid.tick(300).unwrap();

        let surface = grid.release().unwrap();
        let last = surface.ops.last().copied();
        assert_eq!(
            last.map(|op| matches!(op, DrawOp::Fill(_, c) if c == Color::DIM_BACKLIGHT)),
            Some(true)
        );
    }
}
