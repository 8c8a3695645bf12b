use crate::assets::store::TextMetrics;
use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Anchor-space transform: translate to the anchor, then rotate around it.
pub fn text_transform(anchor: Point, rotation_rad: f64) -> Affine {
    Affine::translate(anchor.to_vec2()) * Affine::rotate(rotation_rad)
}

/// Shift that centers a laid-out line on the origin (horizontal middle, em-box middle).
pub fn centering_offset(metrics: &TextMetrics) -> Vec2 {
    Vec2::new(
        -f64::from(metrics.width) / 2.0,
        -f64::from(metrics.middle_y()),
    )
}

/// Layout-space to surface-space transform of a line centered on `anchor`.
pub fn glyph_transform(anchor: Point, rotation_rad: f64, metrics: &TextMetrics) -> Affine {
    text_transform(anchor, rotation_rad) * Affine::translate(centering_offset(metrics))
}

/// Unrotated label rectangle of `(width, height)` centered on `anchor`.
pub fn label_rect(anchor: Point, size: (f32, f32)) -> Rect {
    let (w, h) = (f64::from(size.0), f64::from(size.1));
    Rect::new(
        anchor.x - w / 2.0,
        anchor.y - h / 2.0,
        anchor.x + w / 2.0,
        anchor.y + h / 2.0,
    )
}

/// Anchor moved up by `raise` label heights.
pub fn raised_anchor(anchor: Point, label_height: f32, raise: f32) -> Point {
    Point::new(anchor.x, anchor.y - f64::from(label_height * raise))
}

/// Gaussian parameters of a drop shadow blur amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowBlur {
    /// Standard deviation in pixels.
    pub sigma: f32,
    /// Kernel radius, `ceil(3 sigma)`.
    pub radius: u32,
}

impl ShadowBlur {
    /// `sigma = blur / 2`.
    pub fn from_blur(blur: f32) -> Self {
        let sigma = (blur / 2.0).max(0.0);
        Self {
            sigma,
            radius: (sigma * 3.0).ceil() as u32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
