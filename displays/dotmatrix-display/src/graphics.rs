//! `embedded-graphics` adapter
//!
//! Draw targets are write-only, so translucent colours are flattened onto
//! a fixed background before they are drawn. Clearing paints the
//! background.

use dotmatrix_hal::{Color, DrawSurface, Rect, Size, SurfaceError};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Point as EgPoint, Size as EgSize};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;

/// Panel surface backed by an `embedded-graphics` draw target
///
/// The panel is drawn at the top-left corner of the target.
#[derive(Debug)]
pub struct GraphicsSurface<D> {
    target: D,
    background: Color,
    size: Size,
    attached: bool,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    /// Wrap a draw target, using `background` for cleared areas
    pub fn new(target: D, background: Color) -> Self {
        Self {
            target,
            background: Color {
                a: 255,
                ..background
            },
            size: Size::default(),
            attached: false,
        }
    }

    /// Background colour (always opaque)
    pub fn background(&self) -> Color {
        self.background
    }

    /// The wrapped draw target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access to the wrapped draw target, e.g. to flush it
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target
    pub fn into_inner(self) -> D {
        self.target
    }

    fn area(&self, rect: Rect) -> Result<Rectangle, SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::NotAttached);
        }
        let fits = matches!(
            (rect.x.checked_add(rect.width), rect.y.checked_add(rect.height)),
            (Some(r), Some(b)) if r <= self.size.width && b <= self.size.height
        );
        if !fits {
            return Err(SurfaceError::OutOfBounds);
        }

        let x = i32::try_from(rect.x).map_err(|_| SurfaceError::OutOfBounds)?;
        let y = i32::try_from(rect.y).map_err(|_| SurfaceError::OutOfBounds)?;
        Ok(Rectangle::new(
            EgPoint::new(x, y),
            EgSize::new(rect.width, rect.height),
        ))
    }

    fn paint(&mut self, area: Rectangle, color: Color) -> Result<(), SurfaceError> {
        self.target
            .fill_solid(&area, to_rgb888(color.flatten(self.background)))
            .map_err(|_| SurfaceError::Communication)
    }
}

impl<D> DrawSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    fn attach(&mut self, size: Size) -> Result<(), SurfaceError> {
        let available = self.target.bounding_box().size;
        if size.width > available.width || size.height > available.height {
            return Err(SurfaceError::TooLarge);
        }

        self.size = size;
        self.attached = true;
        let area = self.area(Rect::new(0, 0, size.width, size.height))?;

        #[cfg(feature = "defmt")]
        defmt::debug!("graphics: attached {}x{}", size.width, size.height);

        self.paint(area, self.background)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        let area = self.area(rect)?;
        self.paint(area, color)
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let area = self.area(rect)?;
        self.paint(area, self.background)
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Drop the alpha channel of an already-flattened colour
pub fn to_rgb888(color: Color) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use dotmatrix_core::{Grid, GridConfig, Hd44780Font};
    use embedded_graphics::geometry::OriginDimensions;
    use embedded_graphics::Pixel as EgPixel;

    struct Canvas {
        width: u32,
        height: u32,
        pixels: Vec<Rgb888>,
        fills: usize,
    }

    impl Canvas {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![Rgb888::new(1, 2, 3); (width * height) as usize],
                fills: 0,
            }
        }

        fn at(&self, x: u32, y: u32) -> Rgb888 {
            self.pixels[(y * self.width + x) as usize]
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb888;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = EgPixel<Self::Color>>,
        {
            self.fills += 1;
            for EgPixel(EgPoint { x, y }, color) in pixels {
                if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                    continue;
                }
                let index = (y as u32 * self.width + x as u32) as usize;
                self.pixels[index] = color;
            }
            Ok(())
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> EgSize {
            EgSize::new(self.width, self.height)
        }
    }

    const BACKGROUND: Color = Color::rgb(120, 200, 80);

    #[test]
    fn test_attach_paints_background() {
        let mut surface = GraphicsSurface::new(Canvas::new(10, 10), BACKGROUND);
        surface.attach(Size::new(4, 4)).unwrap();

        let canvas = surface.target();
        assert_eq!(canvas.at(3, 3), to_rgb888(BACKGROUND));
        // Outside the panel area is untouched
        assert_eq!(canvas.at(4, 4), Rgb888::new(1, 2, 3));
    }

    #[test]
    fn test_attach_too_large() {
        let mut surface = GraphicsSurface::new(Canvas::new(10, 10), BACKGROUND);
        assert_eq!(surface.attach(Size::new(11, 2)), Err(SurfaceError::TooLarge));
        assert_eq!(
            surface.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK),
            Err(SurfaceError::NotAttached)
        );
    }

    #[test]
    fn test_bounds_follow_attached_size() {
        let mut surface = GraphicsSurface::new(Canvas::new(10, 10), BACKGROUND);
        surface.attach(Size::new(4, 4)).unwrap();
        assert_eq!(
            surface.fill_rect(Rect::new(3, 0, 2, 1), Color::BLACK),
            Err(SurfaceError::OutOfBounds)
        );
    }

    #[test]
    fn test_translucent_fill_flattens() {
        let mut surface = GraphicsSurface::new(Canvas::new(2, 1), Color::WHITE);
        surface.attach(Size::new(2, 1)).unwrap();
        surface
            .fill_rect(Rect::new(0, 0, 1, 1), Color::DIM_BACKLIGHT)
            .unwrap();
        surface.fill_rect(Rect::new(1, 0, 1, 1), Color::BLACK).unwrap();

        let canvas = surface.into_inner();
        assert_eq!(canvas.at(0, 0), Rgb888::new(249, 249, 249));
        assert_eq!(canvas.at(1, 0), Rgb888::new(0, 0, 0));
    }

    #[test]
    fn test_clear_restores_background() {
        let mut surface = GraphicsSurface::new(Canvas::new(3, 3), BACKGROUND);
        surface.attach(Size::new(3, 3)).unwrap();
        surface.fill_rect(Rect::new(0, 0, 3, 3), Color::BLACK).unwrap();
        surface.clear_rect(Rect::new(1, 1, 1, 1)).unwrap();

        assert_eq!(surface.target().at(1, 1), to_rgb888(BACKGROUND));
        assert_eq!(surface.target().at(0, 0), Rgb888::new(0, 0, 0));
    }

    #[test]
    fn test_drives_panel() {
        let config = GridConfig::new(2, 4, 2, Color::rgb(255, 0, 0));
        let canvas = Canvas::new(160, 80);
        let surface = GraphicsSurface::new(canvas, Color::WHITE);
        let mut grid = Grid::new(config, surface, Hd44780Font::new()).unwrap();

        grid.write_string("Hi", 0).unwrap();
        let canvas = grid.release().unwrap().into_inner();

        // 'H' row 0 is #...# ; pitch is size 2 + gutter 1
        assert_eq!(canvas.at(0, 0), Rgb888::new(255, 0, 0));
        assert_eq!(canvas.at(3, 0), Rgb888::new(249, 249, 249));
        assert_eq!(canvas.at(12, 0), Rgb888::new(255, 0, 0));
        // Pixel gutter shows the background
        assert_eq!(canvas.at(2, 0), Rgb888::new(255, 255, 255));
        assert!(canvas.fills > 0);
    }
}
