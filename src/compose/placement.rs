use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};

/// Integer pixel rectangle, always inside the surface it was clipped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
}

impl PixelRect {
    /// Smallest pixel rectangle covering `rect`, clipped to `canvas`. `None` when nothing is left.
    pub fn covering(rect: Rect, canvas: Canvas) -> Option<Self> {
        let x0 = rect.x0.floor().max(0.0);
        let y0 = rect.y0.floor().max(0.0);
        let x1 = rect.x1.ceil().min(f64::from(canvas.width));
        let y1 = rect.y1.ceil().min(f64::from(canvas.height));
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Same rectangle grown by `margin` on every side, clipped to `canvas`.
    pub fn expand(self, margin: u32, canvas: Canvas) -> Self {
        let x0 = self.x.saturating_sub(margin);
        let y0 = self.y.saturating_sub(margin);
        let x1 = (self.x + self.width).saturating_add(margin).min(canvas.width);
        let y1 = (self.y + self.height).saturating_add(margin).min(canvas.height);
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }
}

/// Where the source image lands on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Scale-to-fit factor, before the user scale.
    pub fit: f64,
    /// Effective image-to-surface scale (`fit * user scale`).
    pub scale: f64,
    /// Placement rectangle in surface pixels.
    pub rect: Rect,
}

/// Factor that fits a `width x height` image inside `canvas` on its limiting axis.
pub fn fit_factor(canvas: Canvas, width: u32, height: u32) -> f64 {
    let wr = f64::from(canvas.width) / f64::from(width.max(1));
    let hr = f64::from(canvas.height) / f64::from(height.max(1));
    wr.min(hr)
}

/// Scale-to-fit, multiply by `user_scale`, center on the canvas, then shift by `offset`.
pub fn compute_placement(
    canvas: Canvas,
    width: u32,
    height: u32,
    user_scale: f64,
    offset: Vec2,
) -> Placement {
    let fit = fit_factor(canvas, width, height);
    let scale = fit * user_scale;
    let w = f64::from(width) * scale;
    let h = f64::from(height) * scale;
    let x = (f64::from(canvas.width) - w) / 2.0 + offset.x;
    let y = (f64::from(canvas.height) - h) / 2.0 + offset.y;
    Placement {
        fit,
        scale,
        rect: Rect::new(x, y, x + w, y + h),
    }
}

impl Placement {
    /// Image-space to surface-space transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.rect.x0, self.rect.y0)) * Affine::scale(self.scale)
    }

    /// Inclusive hit test, as used for starting a drag.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.rect.x0 && p.x <= self.rect.x1 && p.y >= self.rect.y0 && p.y <= self.rect.y1
    }

    /// Pixels touched by the placed image.
    pub fn pixel_bounds(&self, canvas: Canvas) -> Option<PixelRect> {
        PixelRect::covering(self.rect, canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
