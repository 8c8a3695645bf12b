use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{decode_graphic_with_fonts, load_fonts_from_dir, system_svg_fontdb};
use crate::assets::store::{
    PreparedFont, PreparedGraphic, PreparedImage, TextLayoutEngine, TextMetrics, metrics_of,
};
use crate::compose::params::RenderParams;
use crate::compose::placement::{PixelRect, Placement, compute_placement};
use crate::compose::text::{ShadowBlur, glyph_transform, label_rect, raised_anchor};
use crate::compose::tint::apply_tint;
use crate::compose::tone::apply_grayscale_region;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::preset::model::{TextSpec, ToolPreset};
use crate::render::blur::blur_region_in_place;
use crate::render::cpu::{CpuRasterizer, SourceImage};
use crate::render::surface::Surface;

/// Assets a tool draws with, prepared once and reused by every render.
#[derive(Clone, Debug, Default)]
pub struct ToolAssets {
    /// Overlay rasterized at its drawn size (canvas plus bleed).
    pub overlay: Option<PreparedImage>,
    /// Text font.
    pub font: Option<PreparedFont>,
    /// Label background artwork, rasterized per render at the measured size.
    pub label: Option<PreparedGraphic>,
}

/// Geometry of the text drawn by a render.
#[derive(Clone, Debug, PartialEq)]
pub struct TextReport {
    /// Metrics of the laid out line.
    pub metrics: TextMetrics,
    /// Anchor the text was centered on (after any label raise).
    pub anchor: Point,
    /// Layout-space to surface-space transform of the glyphs.
    pub transform: Affine,
    /// Label background rectangle, when the tool has one.
    pub label_rect: Option<Rect>,
}

/// What a successful render drew.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Source image placement; `None` without a source image.
    pub placement: Option<Placement>,
    /// Text geometry; `None` when no text was drawn.
    pub text: Option<TextReport>,
}

/// Runs a tool's pipeline steps over a surface.
pub struct Compositor {
    preset: ToolPreset,
    raster: CpuRasterizer,
    text_engine: TextLayoutEngine,
    svg_fonts: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("preset", &self.preset.name)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Compositor for a validated preset.
    pub fn new(preset: ToolPreset) -> BrandframeResult<Self> {
        preset.validate()?;
        Ok(Self {
            preset,
            raster: CpuRasterizer::new(),
            text_engine: TextLayoutEngine::new(),
            svg_fonts: system_svg_fontdb(),
        })
    }

    /// The tool this compositor renders.
    pub fn preset(&self) -> &ToolPreset {
        &self.preset
    }

    /// Decode overlay bytes and rasterize them at the overlay's drawn size.
    pub fn prepare_overlay(&self, bytes: &[u8]) -> BrandframeResult<PreparedImage> {
        let spec = self.preset.overlay().ok_or_else(|| {
            BrandframeError::validation(format!("tool '{}' has no overlay", self.preset.name))
        })?;
        let target = spec.target(self.preset.canvas);
        let graphic = decode_graphic_with_fonts(bytes, self.svg_fonts.clone())?;
        graphic.rasterize(target.width, target.height)
    }

    /// Register font bytes for the text step.
    ///
    /// The font also becomes available to `<text>` in overlays and labels prepared afterwards.
    pub fn prepare_font(&mut self, bytes: &[u8]) -> BrandframeResult<PreparedFont> {
        let font = self.text_engine.register_font(bytes)?;
        Arc::make_mut(&mut self.svg_fonts).load_font_data(bytes.to_vec());
        Ok(font)
    }

    /// Make the font files in `dir` available to SVG assets prepared afterwards.
    pub fn add_svg_font_dir(&mut self, dir: &Path) -> usize {
        let mut db = (*self.svg_fonts).clone();
        let loaded = load_fonts_from_dir(&mut db, dir);
        if loaded > 0 {
            tracing::debug!(dir = %dir.display(), loaded, "svg fonts added");
            self.svg_fonts = Arc::new(db);
        }
        loaded
    }

    /// Decode label background bytes.
    pub fn prepare_label(&self, bytes: &[u8]) -> BrandframeResult<PreparedGraphic> {
        let has_label = self.preset.text().is_some_and(|t| t.label.is_some());
        if !has_label {
            return Err(BrandframeError::validation(format!(
                "tool '{}' has no label background",
                self.preset.name
            )));
        }
        decode_graphic_with_fonts(bytes, self.svg_fonts.clone())
    }

    /// Measure `text` at `size_px` with `font`.
    pub fn measure_text(
        &mut self,
        text: &str,
        font: &PreparedFont,
        size_px: f32,
    ) -> BrandframeResult<TextMetrics> {
        self.text_engine.measure(text, font, size_px)
    }

    /// Recompute `surface` from scratch.
    ///
    /// Rendering happens off-surface; on error `surface` keeps its previous contents.
    #[tracing::instrument(
        skip_all,
        fields(tool = %self.preset.name, has_source = source.is_some())
    )]
    pub fn render(
        &mut self,
        surface: &mut Surface,
        source: Option<&SourceImage>,
        params: &RenderParams,
        assets: &ToolAssets,
    ) -> BrandframeResult<RenderReport> {
        let canvas = self.preset.canvas;
        if surface.canvas() != canvas {
            return Err(BrandframeError::validation(format!(
                "surface is {}x{}, tool '{}' renders {}x{}",
                surface.width(),
                surface.height(),
                self.preset.name,
                canvas.width,
                canvas.height
            )));
        }
        let params = params.clamped(&self.preset)?;
        let mut scratch = Surface::new(canvas)?;
        let mut report = RenderReport::default();

        if let Some(src) = source
            && self.preset.has_place()
        {
            let placement =
                compute_placement(canvas, src.width(), src.height(), params.scale, params.offset);
            let layer = self.raster.draw_image(canvas, src, placement.transform())?;
            scratch.over(layer.data_as_u8_slice())?;

            if let Some(preset) = self.preset.grayscale()
                && let Some(region) = placement.pixel_bounds(canvas)
            {
                apply_grayscale_region(scratch.data_mut(), canvas, region, preset)?;
            }
            if let Some(tint) = self.preset.tint() {
                apply_tint(scratch.data_mut(), tint.color, params.tint_strength)?;
            }
            report.placement = Some(placement);
        }

        if let Some(spec) = self.preset.overlay() {
            let overlay = assets
                .overlay
                .as_ref()
                .ok_or_else(|| BrandframeError::asset("overlay is not loaded"))?;
            let target = spec.target(canvas);
            if (overlay.width, overlay.height) != (target.width, target.height) {
                return Err(BrandframeError::render(format!(
                    "overlay is {}x{}, expected {}x{}",
                    overlay.width, overlay.height, target.width, target.height
                )));
            }
            scratch.blit_over(overlay, target.x, target.y)?;
        }

        if let Some(spec) = self.preset.text()
            && !params.text.is_empty()
        {
            let spec = spec.clone();
            report.text = Some(self.draw_text(
                &mut scratch,
                &spec,
                &params,
                assets,
                source.is_some(),
            )?);
        }

        *surface = scratch;
        tracing::debug!(
            placed = report.placement.is_some(),
            text = report.text.is_some(),
            "rendered"
        );
        Ok(report)
    }

    fn draw_text(
        &mut self,
        scratch: &mut Surface,
        spec: &TextSpec,
        params: &RenderParams,
        assets: &ToolAssets,
        has_source: bool,
    ) -> BrandframeResult<TextReport> {
        let canvas = scratch.canvas();
        let font = assets
            .font
            .as_ref()
            .ok_or_else(|| BrandframeError::asset("font is not loaded"))?;
        let layout =
            self.text_engine
                .layout_line(&params.text, font, params.font_size, spec.color)?;
        let metrics = metrics_of(&layout);

        let mut anchor = params.text_anchor;
        let mut label_box = None;
        if let Some(label) = &spec.label {
            let art = assets
                .label
                .as_ref()
                .ok_or_else(|| BrandframeError::asset("label background is not loaded"))?;
            let size = label.background_size(metrics.width);
            let rect = label_rect(anchor, size);
            let (w, h) = (
                (size.0.round() as u32).max(1),
                (size.1.round() as u32).max(1),
            );
            let img = art.rasterize(w, h)?;
            scratch.blit_over(&img, rect.x0.round() as i32, rect.y0.round() as i32)?;
            anchor = raised_anchor(anchor, size.1, label.text_raise);
            label_box = Some(rect);
        }

        let transform = glyph_transform(anchor, spec.rotation_rad(), &metrics);
        let extent = Rect::new(0.0, 0.0, f64::from(metrics.width), f64::from(layout.height()));

        if let Some(shadow) = &spec.shadow {
            let shadow_tf = Affine::translate(Vec2::new(
                f64::from(shadow.offset_x),
                f64::from(shadow.offset_y),
            )) * transform;
            let layer =
                self.raster
                    .draw_glyphs(canvas, font, &layout, shadow_tf, Some(shadow.color))?;
            let mut bytes = layer.data_as_u8_slice().to_vec();
            let blur = ShadowBlur::from_blur(shadow.blur_for(has_source));
            if blur.radius > 0
                && let Some(region) = PixelRect::covering(shadow_tf.transform_rect_bbox(extent), canvas)
            {
                // one extra pixel covers antialiased glyph edges
                let region = region.expand(blur.radius + 1, canvas);
                blur_region_in_place(&mut bytes, canvas, region, blur)?;
            }
            scratch.over(&bytes)?;
        }

        let layer = self
            .raster
            .draw_glyphs(canvas, font, &layout, transform, None)?;
        scratch.over(layer.data_as_u8_slice())?;

        Ok(TextReport {
            metrics,
            anchor,
            transform,
            label_rect: label_box,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
