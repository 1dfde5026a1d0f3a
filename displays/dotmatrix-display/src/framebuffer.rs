//! In-memory RGBA surface

use alloc::vec;
use alloc::vec::Vec;

use dotmatrix_hal::{Color, DrawSurface, Rect, Size, SurfaceError};

/// Default allocation limit: 16 Mpx
pub const DEFAULT_MAX_PIXELS: u64 = 16 * 1024 * 1024;

/// RGBA frame buffer
///
/// Starts detached. Cleared pixels are [`Color::TRANSPARENT`]; fills are
/// composited source-over, so a translucent fill over a cleared pixel
/// keeps its own alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Color>,
    attached: bool,
    max_pixels: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a detached buffer with the default size limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_PIXELS)
    }

    /// Create a detached buffer that refuses to grow past `max_pixels`
    pub fn with_limit(max_pixels: u64) -> Self {
        Self {
            size: Size::default(),
            pixels: Vec::new(),
            attached: false,
            max_pixels,
        }
    }

    /// Whether [`DrawSurface::attach`] has succeeded
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Colour at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One row of pixels
    pub fn row(&self, y: u32) -> Option<&[Color]> {
        if y >= self.size.height {
            return None;
        }
        let start = self.offset(0, y);
        self.pixels.get(start..start + self.size.width as usize)
    }

    /// Raw RGBA bytes, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn check(&self, rect: Rect) -> Result<(), SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::NotAttached);
        }
        let right = rect.x.checked_add(rect.width);
        let bottom = rect.y.checked_add(rect.height);
        match (right, bottom) {
            (Some(r), Some(b)) if r <= self.size.width && b <= self.size.height => Ok(()),
            _ => Err(SurfaceError::OutOfBounds),
        }
    }

    fn update(&mut self, rect: Rect, mut f: impl FnMut(Color) -> Color) {
        for y in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, y);
            let end = start + rect.width as usize;
            if let Some(row) = self.pixels.get_mut(start..end) {
                for px in row {
                    *px = f(*px);
                }
            }
        }
    }
}

impl DrawSurface for FrameBuffer {
    fn attach(&mut self, size: Size) -> Result<(), SurfaceError> {
        let area = size.area();
        if area > self.max_pixels || usize::try_from(area).is_err() {
            return Err(SurfaceError::TooLarge);
        }

        self.pixels = vec![Color::TRANSPARENT; area as usize];
        self.size = size;
        self.attached = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("framebuffer: attached {}x{}", size.width, size.height);

        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.check(rect)?;
        if color.is_opaque() {
            self.update(rect, |_| color);
        } else {
            self.update(rect, |dst| color.over(dst));
        }
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.check(rect)?;
        self.update(rect, |_| Color::TRANSPARENT);
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotmatrix_core::{Grid, GridConfig, Hd44780Font};
    use proptest::prelude::*;

    fn attached(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new();
        fb.attach(Size::new(width, height)).unwrap();
        fb
    }

    #[test]
    fn test_detached_rejects_drawing() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.is_attached());
        assert_eq!(
            fb.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK),
            Err(SurfaceError::NotAttached)
        );
    }

    #[test]
    fn test_attach_limit() {
        let mut fb = FrameBuffer::with_limit(100);
        assert_eq!(fb.attach(Size::new(11, 10)), Err(SurfaceError::TooLarge));
        assert!(fb.attach(Size::new(10, 10)).is_ok());
        assert_eq!(fb.pixels().len(), 100);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut fb = attached(4, 4);
        assert_eq!(
            fb.fill_rect(Rect::new(2, 2, 3, 1), Color::BLACK),
            Err(SurfaceError::OutOfBounds)
        );
        assert_eq!(
            fb.clear_rect(Rect::new(u32::MAX, 0, 2, 1)),
            Err(SurfaceError::OutOfBounds)
        );
        assert!(fb.pixels().iter().all(|&c| c == Color::TRANSPARENT));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut fb = attached(4, 3);
        fb.fill_rect(Rect::new(1, 1, 2, 2), Color::WHITE).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(fb.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(fb.pixel(3, 2), Some(Color::TRANSPARENT));
        assert_eq!(fb.pixel(4, 0), None);

        fb.clear_rect(Rect::new(2, 1, 1, 2)).unwrap();
        assert_eq!(fb.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.pixel(2, 1), Some(Color::TRANSPARENT));
        assert_eq!(fb.row(1).map(|r| r.len()), Some(4));
    }

    #[test]
    fn test_translucent_fill_composites() {
        let mut fb = attached(2, 1);
        fb.fill_rect(Rect::new(0, 0, 1, 1), Color::WHITE).unwrap();
        fb.fill_rect(Rect::new(0, 0, 2, 1), Color::DIM_BACKLIGHT).unwrap();

        // Over nothing the dim fill keeps its own alpha
        assert_eq!(fb.pixel(1, 0), Some(Color::DIM_BACKLIGHT));
        // Over white it darkens slightly and stays opaque
        let blended = fb.pixel(0, 0).unwrap();
        assert_eq!(blended.a, 255);
        assert!(blended.r < 255 && blended.r > 240);
    }

    #[test]
    fn test_to_rgba8() {
        let mut fb = attached(2, 1);
        fb.fill_rect(Rect::new(1, 0, 1, 1), Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(fb.to_rgba8(), [0, 0, 0, 0, 1, 2, 3, 255]);
    }

    #[test]
    fn test_renders_panel() {
        let config = GridConfig::new(1, 2, 4, Color::rgb(200, 30, 30));
        let mut grid = Grid::new(config, FrameBuffer::new(), Hd44780Font::new()).unwrap();
        grid.write_character('A', 0).unwrap();

        let fb = grid.surface();
        assert_eq!(fb.size(), grid.dimensions());

        // 'A' row 0 is .###. ; pixel pitch is size 4 + gutter 1
        assert_eq!(fb.pixel(0, 0), Some(Color::DIM_BACKLIGHT));
        assert_eq!(fb.pixel(5, 0), Some(Color::rgb(200, 30, 30)));
        assert_eq!(fb.pixel(8, 3), Some(Color::rgb(200, 30, 30)));
        // Pixel gutter
        assert_eq!(fb.pixel(4, 0), Some(Color::TRANSPARENT));
        // Block gutter between block 0 (width 24) and block 1
        assert_eq!(fb.pixel(25, 0), Some(Color::TRANSPARENT));
        // Second block is idle
        assert_eq!(fb.pixel(28 + 5, 0), Some(Color::DIM_BACKLIGHT));
    }

    #[test]
    fn test_cursor_blinks_on_buffer() {
        let config = GridConfig::new(1, 1, 2, Color::BLACK).with_blink_interval(100);
        let mut grid = Grid::new(config, FrameBuffer::new(), Hd44780Font::new()).unwrap();

        // Cursor row is pixel row 7; pitch is size 2 + gutter 1
        let y = 7 * 3;
        grid.blink_cursor(0, false).unwrap();
        assert_eq!(grid.surface().pixel(0, y), Some(Color::DIM_BACKLIGHT));
        grid.tick(100).unwrap();
        assert_eq!(grid.surface().pixel(0, y), Some(Color::BLACK));
        grid.tick(100).unwrap();
        assert_eq!(grid.surface().pixel(0, y), Some(Color::DIM_BACKLIGHT));
    }

    proptest! {
        #[test]
        fn prop_fill_stays_inside(
            x in 0u32..8, y in 0u32..8, w in 0u32..8, h in 0u32..8,
        ) {
            let mut fb = attached(8, 8);
            let rect = Rect::new(x, y, w, h);
            let result = fb.fill_rect(rect, Color::WHITE);

            prop_assert_eq!(result.is_ok(), x + w <= 8 && y + h <= 8);
            for py in 0..8 {
                for px in 0..8 {
                    let lit = fb.pixel(px, py) == Some(Color::WHITE);
                    prop_assert_eq!(lit, result.is_ok() && rect.contains(px, py));
                }
            }
        }
    }
}
