//! Drawing surface abstractions
//!
//! Provides the trait a host environment implements so that a panel can
//! draw its pixels onto it.

use core::fmt;

use crate::color::Color;

/// Width and height in surface units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of surface units covered (width × height)
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Position in surface units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The surface origin (top-left corner)
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Offset this point by another
    pub const fn offset(&self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// Axis-aligned rectangle in surface units
///
/// The origin is the top-left corner of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a square with edge length `size`
    pub const fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check if the point lies inside the rectangle
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if two rectangles share any surface unit
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Rectangle extends past the attached surface
    OutOfBounds,
    /// Surface has not been attached/sized yet
    NotAttached,
    /// Requested size cannot be allocated by the host
    TooLarge,
    /// Communication error with the underlying device
    Communication,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfBounds => f.write_str("rectangle outside surface bounds"),
            SurfaceError::NotAttached => f.write_str("surface not attached"),
            SurfaceError::TooLarge => f.write_str("surface size too large"),
            SurfaceError::Communication => f.write_str("surface device communication failed"),
        }
    }
}

/// Drawing surface
///
/// The host side of a panel. Implementations own the actual pixels
/// (memory, display controller, canvas) and only need two primitives.
pub trait DrawSurface {
    /// (Re)create the surface with the given dimensions
    ///
    /// Called once when a panel is constructed. Any previous content is
    /// discarded.
    fn attach(&mut self, size: Size) -> Result<(), SurfaceError>;

    /// Fill a rectangle with a colour
    ///
    /// Colours with an alpha below 255 are composited over the current
    /// content of the rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;

    /// Clear a rectangle back to the surface's empty state
    fn clear_rect(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    /// Current surface dimensions
    fn size(&self) -> Size;
}

// Forwarding implementation so panels can borrow a surface they don't own
impl<T: DrawSurface + ?Sized> DrawSurface for &mut T {
    fn attach(&mut self, size: Size) -> Result<(), SurfaceError> {
        (**self).attach(size)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        (**self).fill_rect(rect, color)
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        (**self).clear_rect(rect)
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert_eq!(rect.right(), 6);
        assert_eq!(rect.bottom(), 8);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 7));
        assert!(!rect.contains(5, 8));
    }

    #[test]
    fn test_adjacent_rects_do_not_intersect() {
        let a = Rect::square(0, 0, 4);
        let b = Rect::square(4, 0, 4);
        let c = Rect::square(3, 3, 4);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(b.intersects(&c));
    }

    #[test]
    fn test_size_area() {
        assert_eq!(Size::new(0, 10).area(), 0);
        assert_eq!(Size::new(u32::MAX, 2).area(), u32::MAX as u64 * 2);
    }
}
