use std::borrow::Cow;
use std::sync::Arc;

use crate::assets::color::Rgba8;
use crate::foundation::error::{BrandframeError, BrandframeResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap an already premultiplied buffer, checking its length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BrandframeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BrandframeError::decode("image size overflow"))?;
        if width == 0 || height == 0 {
            return Err(BrandframeError::decode("image has zero width or height"));
        }
        if rgba8_premul.len() != expected {
            return Err(BrandframeError::decode(format!(
                "image buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    }
}

#[derive(Clone, Debug)]
/// Prepared SVG asset represented as a parsed `usvg` tree.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// A decorative asset that is drawn stretched to a target rectangle.
#[derive(Clone, Debug)]
pub enum PreparedGraphic {
    /// Decoded raster (PNG, JPEG, ...).
    Raster(PreparedImage),
    /// Parsed vector graphic.
    Svg(PreparedSvg),
}

impl PreparedGraphic {
    /// Intrinsic size in pixels (SVG size rounded up).
    pub fn intrinsic_size(&self) -> (u32, u32) {
        match self {
            Self::Raster(img) => (img.width, img.height),
            Self::Svg(svg) => {
                let size = svg.tree.size();
                (
                    (size.width().ceil() as u32).max(1),
                    (size.height().ceil() as u32).max(1),
                )
            }
        }
    }

    /// Rasterize to exactly `width x height`, stretching on both axes.
    pub fn rasterize(&self, width: u32, height: u32) -> BrandframeResult<PreparedImage> {
        match self {
            Self::Svg(svg) => {
                let rgba = crate::assets::svg_raster::rasterize_svg_to_premul_rgba8(
                    &svg.tree, width, height,
                )?;
                PreparedImage::from_premul(width, height, rgba)
            }
            Self::Raster(img) if img.width == width && img.height == height => Ok(img.clone()),
            Self::Raster(img) => {
                crate::assets::svg_raster::check_raster_size(width, height)?;
                // Resampling premultiplied bytes keeps transparent edges from bleeding color.
                let buf = image::RgbaImage::from_raw(
                    img.width,
                    img.height,
                    img.rgba8_premul.as_ref().clone(),
                )
                .ok_or_else(|| BrandframeError::decode("raster buffer does not match size"))?;
                let resized = image::imageops::resize(
                    &buf,
                    width,
                    height,
                    image::imageops::FilterType::Triangle,
                );
                PreparedImage::from_premul(width, height, resized.into_raw())
            }
        }
    }
}

/// A font registered with a [`TextLayoutEngine`].
#[derive(Clone)]
pub struct PreparedFont {
    /// Family name the font registered under.
    pub family: String,
    /// Font data for glyph rasterization.
    pub data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for PreparedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Measured extent of a single-line text layout, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the laid out text.
    pub width: f32,
    /// Distance from the layout top to the first baseline.
    pub baseline: f32,
    /// Ascent of the first line.
    pub ascent: f32,
    /// Descent of the first line (positive below the baseline).
    pub descent: f32,
}

impl TextMetrics {
    /// Offset from the layout origin to the em-box middle of the first line.
    pub fn middle_y(&self) -> f32 {
        self.baseline - (self.ascent - self.descent) / 2.0
    }
}

/// Normalize and validate preset-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BrandframeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BrandframeError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BrandframeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BrandframeError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BrandframeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Stateful helper for shaping text with Parley from registered font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the handle used for layout and rasterization.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> BrandframeResult<PreparedFont> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BrandframeError::decode("no font families registered from font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BrandframeError::decode("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        tracing::debug!(%family, bytes = font_bytes.len(), "registered font");
        Ok(PreparedFont { family, data })
    }

    /// Shape a single unwrapped line of text.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &PreparedFont,
        size_px: f32,
        brush: Rgba8,
    ) -> BrandframeResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BrandframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let text = single_line(text);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(&text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measure a single line without keeping the layout.
    pub fn measure(
        &mut self,
        text: &str,
        font: &PreparedFont,
        size_px: f32,
    ) -> BrandframeResult<TextMetrics> {
        let layout = self.layout_line(text, font, size_px, Rgba8::WHITE)?;
        Ok(metrics_of(&layout))
    }
}

/// Replace line breaks with spaces; captions are always drawn as one line.
pub(crate) fn single_line(text: &str) -> Cow<'_, str> {
    let is_break = |c: char| {
        matches!(
            c,
            '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
    };
    if text.contains(is_break) {
        Cow::Owned(text.replace(is_break, " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Metrics of the first line of a layout (zeroes for an empty layout).
pub fn metrics_of(layout: &parley::Layout<Rgba8>) -> TextMetrics {
    let width = layout.width();
    match layout.lines().next() {
        Some(line) => {
            let m = line.metrics();
            TextMetrics {
                width,
                baseline: m.baseline,
                ascent: m.ascent,
                descent: m.descent,
            }
        }
        None => TextMetrics {
            width,
            baseline: 0.0,
            ascent: 0.0,
            descent: 0.0,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
