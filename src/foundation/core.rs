use crate::foundation::error::{BrandframeError, BrandframeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Largest accepted surface edge, in pixels.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// Fixed output surface dimensions of a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> BrandframeResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that both edges are within `1..=MAX_CANVAS_DIM`.
    pub fn validate(self) -> BrandframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BrandframeError::validation(
                "canvas width and height must be > 0",
            ));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(BrandframeError::validation(format!(
                "canvas {}x{} exceeds {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of bytes of a premultiplied RGBA8 buffer covering the canvas.
    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Canvas center point.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}
