//! Recording surface for tests

use dotmatrix_hal::{Color, DrawSurface, Rect, Size, SurfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Attach(Size),
    Fill(Rect, Color),
    Clear(Rect),
}

#[derive(Debug, Default)]
pub struct MockSurface {
    pub ops: Vec<DrawOp>,
    pub size: Size,
    pub fail: bool,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles touched since the log was last cleared
    pub fn touched(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(rect, _) | DrawOp::Clear(rect) => Some(*rect),
                DrawOp::Attach(_) => None,
            })
            .collect()
    }
}

impl DrawSurface for MockSurface {
    fn attach(&mut self, size: Size) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::TooLarge);
        }
        self.size = size;
        self.ops.push(DrawOp::Attach(size));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Communication);
        }
        self.ops.push(DrawOp::Fill(rect, color));
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Communication);
        }
        self.ops.push(DrawOp::Clear(rect));
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }
}
