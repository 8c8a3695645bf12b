use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::preset::model::ToolPreset;

/// User-controlled transform parameters of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// User scale on top of scale-to-fit.
    pub scale: f64,
    /// Offset of the image center from the canvas center, in pixels.
    pub offset: Vec2,
    /// Tint opacity, `0..=1`.
    pub tint_strength: f32,
    /// Text to draw; empty draws nothing.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text anchor in surface pixels.
    pub text_anchor: Point,
}

impl RenderParams {
    /// Initial parameters of a session on `preset`.
    pub fn defaults_for(preset: &ToolPreset) -> Self {
        let text = preset.text();
        Self {
            scale: 1.0_f64.clamp(preset.scale_range[0], preset.scale_range[1]),
            offset: Vec2::ZERO,
            tint_strength: preset.tint().map(|t| t.strength).unwrap_or(0.0),
            text: String::new(),
            font_size: text.map(|t| t.default_size).unwrap_or(0.0),
            text_anchor: text.map(|t| t.default_anchor).unwrap_or(Point::ZERO),
        }
    }

    /// Reject non-finite numbers.
    pub fn validate(&self) -> BrandframeResult<()> {
        if !self.scale.is_finite() {
            return Err(BrandframeError::validation("scale must be finite"));
        }
        if !self.offset.is_finite() {
            return Err(BrandframeError::validation("offset must be finite"));
        }
        if !self.tint_strength.is_finite() {
            return Err(BrandframeError::validation("tint strength must be finite"));
        }
        if !self.font_size.is_finite() {
            return Err(BrandframeError::validation("font size must be finite"));
        }
        if !self.text_anchor.is_finite() {
            return Err(BrandframeError::validation("text anchor must be finite"));
        }
        Ok(())
    }

    /// Copy with every ranged value clamped to what `preset` accepts.
    pub fn clamped(&self, preset: &ToolPreset) -> BrandframeResult<Self> {
        self.validate()?;
        let mut out = self.clone();
        out.scale = self
            .scale
            .clamp(preset.scale_range[0], preset.scale_range[1]);
        out.tint_strength = self.tint_strength.clamp(0.0, 1.0);
        if let Some(text) = preset.text() {
            out.font_size = self.font_size.clamp(text.size_range[0], text.size_range[1]);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/params.rs"]
mod tests;
