use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::color::Rgba8;
use crate::assets::store::normalize_rel_path;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Height of the label background relative to its width (196:51 artwork).
pub const LABEL_HEIGHT_RATIO: f32 = 51.0 / 196.0;

/// Named grayscale formula of a tool.
///
/// Every preset starts from `gray = 0.299 R + 0.587 G + 0.114 B`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayscalePreset {
    /// Plain luma.
    Luma,
    /// Luma followed by a 1.15x contrast stretch around 128.
    LumaContrast,
    /// Luma boosted 1.2x, then the contrast stretch.
    LumaBoostContrast,
}

/// Solid color composited with the "color" blend mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TintSpec {
    /// Fill color; only its hue and saturation reach the output.
    pub color: Rgba8,
    /// Default opacity of the fill, `0..=1`.
    pub strength: f32,
}

/// Integer expansion of the overlay rectangle beyond the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayBleed {
    /// Horizontal offset of the overlay's left edge.
    pub x: i32,
    /// Vertical offset of the overlay's top edge.
    pub y: i32,
    /// Pixels added to the overlay width.
    pub extra_width: u32,
    /// Pixels added to the overlay height.
    pub extra_height: u32,
}

/// Decorative overlay drawn over the photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlaySpec {
    /// Asset path relative to the asset root (SVG or raster).
    pub source: String,
    /// Edge bleed applied when stretching the overlay.
    #[serde(default)]
    pub bleed: OverlayBleed,
}

/// Placement of the overlay on a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayTarget {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Drawn width.
    pub width: u32,
    /// Drawn height.
    pub height: u32,
}

impl OverlaySpec {
    /// Rectangle the overlay is stretched into on `canvas`.
    pub fn target(&self, canvas: Canvas) -> OverlayTarget {
        OverlayTarget {
            x: self.bleed.x,
            y: self.bleed.y,
            width: canvas.width + self.bleed.extra_width,
            height: canvas.height + self.bleed.extra_height,
        }
    }
}

/// Drop shadow under text. Offsets are in surface pixels and are not rotated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    /// Shadow color, alpha included.
    pub color: Rgba8,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Blur amount; the Gaussian sigma is half of it.
    pub blur: f32,
    /// Blur used instead of `blur` while no photo is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_without_source: Option<f32>,
}

impl ShadowSpec {
    /// Blur amount for a render with or without a photo.
    pub fn blur_for(&self, has_source: bool) -> f32 {
        match self.blur_without_source {
            Some(blur) if !has_source => blur,
            _ => self.blur,
        }
    }
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            color: Rgba8::rgba(0, 0, 0, 128),
            offset_x: 1.0,
            offset_y: 1.0,
            blur: 2.0,
            blur_without_source: None,
        }
    }
}

/// Background artwork sized from the measured text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Asset path relative to the asset root.
    pub source: String,
    /// Horizontal padding on each side of the text.
    pub padding: f32,
    /// Minimum background width.
    #[serde(default)]
    pub min_width: f32,
    /// Fraction of the background height the text is raised by.
    #[serde(default)]
    pub text_raise: f32,
}

impl LabelSpec {
    /// Background `(width, height)` for a measured text width.
    pub fn background_size(&self, measured_width: f32) -> (f32, f32) {
        let width = (measured_width + 2.0 * self.padding).max(self.min_width);
        (width, width * LABEL_HEIGHT_RATIO)
    }
}

/// Text drawn last, centered on an anchor and rotated around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    /// Font path relative to the asset root.
    pub font_source: String,
    /// Fill color.
    pub color: Rgba8,
    /// Initial font size in pixels.
    pub default_size: f32,
    /// Accepted font size range `[min, max]`.
    pub size_range: [f32; 2],
    /// Initial anchor in surface pixels.
    pub default_anchor: Point,
    /// Rotation around the anchor in degrees (negative is counter-clockwise on screen).
    #[serde(default)]
    pub rotation_deg: f64,
    /// Optional drop shadow.
    #[serde(default)]
    pub shadow: Option<ShadowSpec>,
    /// Optional background label.
    #[serde(default)]
    pub label: Option<LabelSpec>,
}

impl TextSpec {
    /// Rotation in radians.
    pub fn rotation_rad(&self) -> f64 {
        self.rotation_deg * std::f64::consts::PI / 180.0
    }
}

/// One declarative stage of a tool's pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum PipelineStep {
    /// Scale-to-fit the source image, apply user scale and offset, draw it.
    Place,
    /// Convert the placed image to gray.
    Grayscale {
        /// Formula to apply.
        preset: GrayscalePreset,
    },
    /// Blend a solid color over the surface.
    Tint(TintSpec),
    /// Draw the overlay stretched over the surface.
    Overlay(OverlaySpec),
    /// Draw user text.
    Text(TextSpec),
}

impl PipelineStep {
    fn rank(&self) -> u8 {
        match self {
            Self::Place => 0,
            Self::Grayscale { .. } => 1,
            Self::Tint(_) => 2,
            Self::Overlay(_) => 3,
            Self::Text(_) => 4,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Grayscale { .. } => "grayscale",
            Self::Tint(_) => "tint",
            Self::Overlay(_) => "overlay",
            Self::Text(_) => "text",
        }
    }
}

fn default_scale_range() -> [f64; 2] {
    [0.2, 3.0]
}

/// Declarative description of one tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolPreset {
    /// Tool name, e.g. `linkedin-banner`.
    pub name: String,
    /// Fixed output size.
    pub canvas: Canvas,
    /// Pipeline steps in canonical order.
    pub steps: Vec<PipelineStep>,
    /// Accepted user scale range `[min, max]`.
    #[serde(default = "default_scale_range")]
    pub scale_range: [f64; 2],
    /// File name used when exporting.
    pub export_filename: String,
}

impl ToolPreset {
    /// Start building a preset.
    pub fn builder(name: impl Into<String>, canvas: Canvas) -> ToolPresetBuilder {
        ToolPresetBuilder {
            preset: Self {
                name: name.into(),
                canvas,
                steps: Vec::new(),
                scale_range: default_scale_range(),
                export_filename: String::new(),
            },
        }
    }

    /// Parse a preset from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> BrandframeResult<Self> {
        let preset: Self = serde_json::from_reader(r)
            .map_err(|e| BrandframeError::serde(format!("parse preset JSON: {e}")))?;
        preset.validate()?;
        Ok(preset)
    }

    /// Parse a preset from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> BrandframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BrandframeError::validation(format!("open preset JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON representation.
    pub fn to_json_pretty(&self) -> BrandframeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BrandframeError::serde(format!("serialize preset: {e}")))
    }

    /// Check canvas, step order and step parameters.
    pub fn validate(&self) -> BrandframeResult<()> {
        if self.name.trim().is_empty() {
            return Err(BrandframeError::validation("preset name must be non-empty"));
        }
        self.canvas.validate()?;

        let mut last_rank: Option<u8> = None;
        for step in &self.steps {
            let rank = step.rank();
            if let Some(prev) = last_rank
                && rank <= prev
            {
                return Err(BrandframeError::validation(format!(
                    "step '{}' is duplicated or out of order (expected place, grayscale, tint, overlay, text)",
                    step.name()
                )));
            }
            last_rank = Some(rank);
        }

        let has_place = self.has_place();
        if (self.grayscale().is_some() || self.tint().is_some()) && !has_place {
            return Err(BrandframeError::validation(
                "grayscale and tint steps require a place step",
            ));
        }

        let [lo, hi] = self.scale_range;
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo > hi {
            return Err(BrandframeError::validation(
                "scale_range must be finite, positive and ordered",
            ));
        }

        if let Some(tint) = self.tint()
            && !(0.0..=1.0).contains(&tint.strength)
        {
            return Err(BrandframeError::validation(
                "tint strength must be within 0..=1",
            ));
        }

        if let Some(overlay) = self.overlay() {
            normalize_rel_path(&overlay.source)?;
            let t = overlay.target(self.canvas);
            crate::assets::svg_raster::check_raster_size(t.width, t.height)?;
        }

        if let Some(text) = self.text() {
            normalize_rel_path(&text.font_source)?;
            let [lo, hi] = text.size_range;
            if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo > hi {
                return Err(BrandframeError::validation(
                    "text size_range must be finite, positive and ordered",
                ));
            }
            if !(lo..=hi).contains(&text.default_size) {
                return Err(BrandframeError::validation(
                    "text default_size must lie within size_range",
                ));
            }
            if !text.rotation_deg.is_finite() {
                return Err(BrandframeError::validation("text rotation must be finite"));
            }
            if !text.default_anchor.is_finite() {
                return Err(BrandframeError::validation("text anchor must be finite"));
            }
            if let Some(shadow) = &text.shadow {
                if !(non_negative(shadow.blur)
                    && shadow.blur_without_source.is_none_or(non_negative))
                {
                    return Err(BrandframeError::validation(
                        "shadow blur must be finite and >= 0",
                    ));
                }
                if !(shadow.offset_x.is_finite() && shadow.offset_y.is_finite()) {
                    return Err(BrandframeError::validation(
                        "shadow offsets must be finite",
                    ));
                }
            }
            if let Some(label) = &text.label {
                normalize_rel_path(&label.source)?;
                if !(non_negative(label.padding)
                    && non_negative(label.min_width)
                    && non_negative(label.text_raise))
                {
                    return Err(BrandframeError::validation(
                        "label padding, min_width and text_raise must be finite and >= 0",
                    ));
                }
            }
        }

        let lower = self.export_filename.to_ascii_lowercase();
        if !lower.ends_with(".png") || lower.len() <= 4 || self.export_filename.contains(['/', '\\'])
        {
            return Err(BrandframeError::validation(
                "export_filename must be a bare file name ending in .png",
            ));
        }
        Ok(())
    }

    /// Whether the pipeline places a source image.
    pub fn has_place(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, PipelineStep::Place))
    }

    /// Grayscale formula, if the pipeline has one.
    pub fn grayscale(&self) -> Option<GrayscalePreset> {
        self.steps.iter().find_map(|s| match s {
            PipelineStep::Grayscale { preset } => Some(*preset),
            _ => None,
        })
    }

    /// Tint step, if any.
    pub fn tint(&self) -> Option<&TintSpec> {
        self.steps.iter().find_map(|s| match s {
            PipelineStep::Tint(t) => Some(t),
            _ => None,
        })
    }

    /// Overlay step, if any.
    pub fn overlay(&self) -> Option<&OverlaySpec> {
        self.steps.iter().find_map(|s| match s {
            PipelineStep::Overlay(o) => Some(o),
            _ => None,
        })
    }

    /// Text step, if any.
    pub fn text(&self) -> Option<&TextSpec> {
        self.steps.iter().find_map(|s| match s {
            PipelineStep::Text(t) => Some(t),
            _ => None,
        })
    }
}

/// Builder for [`ToolPreset`]; steps are kept in call order and checked by `build`.
#[derive(Clone, Debug)]
pub struct ToolPresetBuilder {
    preset: ToolPreset,
}

impl ToolPresetBuilder {
    /// Append a place step.
    pub fn place(mut self) -> Self {
        self.preset.steps.push(PipelineStep::Place);
        self
    }

    /// Append a grayscale step.
    pub fn grayscale(mut self, preset: GrayscalePreset) -> Self {
        self.preset.steps.push(PipelineStep::Grayscale { preset });
        self
    }

    /// Append a tint step.
    pub fn tint(mut self, color: Rgba8, strength: f32) -> Self {
        self.preset
            .steps
            .push(PipelineStep::Tint(TintSpec { color, strength }));
        self
    }

    /// Append an overlay step.
    pub fn overlay(mut self, source: impl Into<String>, bleed: OverlayBleed) -> Self {
        self.preset.steps.push(PipelineStep::Overlay(OverlaySpec {
            source: source.into(),
            bleed,
        }));
        self
    }

    /// Append a text step.
    pub fn text(mut self, spec: TextSpec) -> Self {
        self.preset.steps.push(PipelineStep::Text(spec));
        self
    }

    /// Override the user scale range.
    pub fn scale_range(mut self, min: f64, max: f64) -> Self {
        self.preset.scale_range = [min, max];
        self
    }

    /// Set the export file name.
    pub fn export_filename(mut self, name: impl Into<String>) -> Self {
        self.preset.export_filename = name.into();
        self
    }

    /// Validate and return the preset.
    pub fn build(self) -> BrandframeResult<ToolPreset> {
        self.preset.validate()?;
        Ok(self.preset)
    }
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/preset/model.rs"]
mod tests;
