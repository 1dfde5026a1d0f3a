//! Single panel pixel

use dotmatrix_hal::{Color, DrawSurface, Point, Rect, SurfaceError};

use crate::blink::{BlinkAction, Blinker};
use crate::layout;

/// One square segment of a block
///
/// Position is computed once from the block origin and the pixel index
/// and never changes.
#[derive(Debug, Clone)]
pub struct Pixel {
    index: usize,
    size: u32,
    color: Color,
    origin: Point,
    visible: bool,
    blinker: Blinker,
}

impl Pixel {
    /// Create pixel `index` of the block whose top-left corner is `block`
    pub fn new(
        index: usize,
        size: u32,
        color: Color,
        block: Point,
        blink_interval_ms: u32,
    ) -> Self {
        Self {
            index,
            size,
            color,
            origin: layout::pixel_origin(index, size, block),
            visible: false,
            blinker: Blinker::new(blink_interval_ms),
        }
    }

    /// Index inside the block (0..40, row-major)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Edge length
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Lit colour
    pub fn color(&self) -> Color {
        self.color
    }

    /// Spacing to the neighbouring pixels
    pub fn gutter(&self) -> u32 {
        layout::pixel_gutter(self.size)
    }

    /// Absolute top-left corner on the surface
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Area this pixel draws into
    pub fn bounds(&self) -> Rect {
        Rect::square(self.origin.x, self.origin.y, self.size)
    }

    /// Whether the pixel was last rendered lit
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the blink machine is running
    pub fn is_blinking(&self) -> bool {
        self.blinker.is_blinking()
    }

    /// Draw the pixel lit or in its dim unlit state
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        active: bool,
    ) -> Result<(), SurfaceError> {
        let rect = self.bounds();
        if active {
            surface.fill_rect(rect, self.color)?;
        } else {
            surface.clear_rect(rect)?;
            surface.fill_rect(rect, Color::DIM_BACKLIGHT)?;
        }
        self.visible = active;
        Ok(())
    }

    /// Start (`stop == false`) or stop (`stop == true`) blinking
    ///
    /// Starting while blinking and stopping while idle do nothing.
    /// Stopping leaves the pixel unlit.
    pub fn blink<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        stop: bool,
    ) -> Result<(), SurfaceError> {
        let action = if stop {
            self.blinker.stop()
        } else {
            self.blinker.start()
        };
        self.apply(surface, action)
    }

    /// Advance the blink clock by `elapsed_ms`
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        elapsed_ms: u32,
    ) -> Result<(), SurfaceError> {
        let action = self.blinker.advance(elapsed_ms);
        self.apply(surface, action)
    }

    fn apply<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        action: BlinkAction,
    ) -> Result<(), SurfaceError> {
        match action {
            BlinkAction::None => Ok(()),
            // Flips whatever was rendered last, including renders from writes
            BlinkAction::Toggle => self.render(surface, !self.visible),
            BlinkAction::ForceOff => self.render(surface, false),
        }
    }
}
