use std::sync::Arc;

use crate::assets::color::Rgba8;
use crate::assets::decode::decode_image;
use crate::assets::store::{PreparedFont, PreparedImage};
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Decoded source photo together with its rasterizer paint.
#[derive(Clone)]
pub struct SourceImage {
    prepared: PreparedImage,
    paint: vello_cpu::Image,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.prepared.width)
            .field("height", &self.prepared.height)
            .finish_non_exhaustive()
    }
}

impl SourceImage {
    /// Decode encoded image bytes (any format the `image` crate reads).
    pub fn decode(bytes: &[u8]) -> BrandframeResult<Self> {
        Self::from_prepared(decode_image(bytes)?)
    }

    /// Wrap an already decoded premultiplied image.
    pub fn from_prepared(prepared: PreparedImage) -> BrandframeResult<Self> {
        let pixmap = pixmap_from_premul_bytes(
            prepared.rgba8_premul.as_slice(),
            prepared.width,
            prepared.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        Ok(Self { prepared, paint })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.prepared.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.prepared.height
    }

    /// Decoded premultiplied pixels.
    pub fn prepared(&self) -> &PreparedImage {
        &self.prepared
    }
}

/// `vello_cpu` rasterizer producing full-canvas premultiplied layers.
#[derive(Default)]
pub(crate) struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuRasterizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> BrandframeResult<R>,
    ) -> BrandframeResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn render_layer(
        &mut self,
        canvas: Canvas,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> BrandframeResult<()>,
    ) -> BrandframeResult<vello_cpu::Pixmap> {
        let (w, h) = canvas_u16(canvas)?;
        self.with_ctx_mut(w, h, |ctx| {
            draw(ctx)?;
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap)
        })
    }

    /// Draw `image` through `transform` (image pixels to surface pixels), bilinear.
    pub(crate) fn draw_image(
        &mut self,
        canvas: Canvas,
        image: &SourceImage,
        transform: Affine,
    ) -> BrandframeResult<vello_cpu::Pixmap> {
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));
        self.render_layer(canvas, |ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(image.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            Ok(())
        })
    }

    /// Draw every glyph run of `layout` through `transform`.
    ///
    /// With `color` set, every run is filled with it instead of its brush.
    pub(crate) fn draw_glyphs(
        &mut self,
        canvas: Canvas,
        font: &PreparedFont,
        layout: &parley::Layout<Rgba8>,
        transform: Affine,
        color: Option<Rgba8>,
    ) -> BrandframeResult<vello_cpu::Pixmap> {
        self.render_layer(canvas, |ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let c = color.unwrap_or(run.style().brush);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font.data)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            Ok(())
        })
    }
}

fn canvas_u16(canvas: Canvas) -> BrandframeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| BrandframeError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| BrandframeError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BrandframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BrandframeError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BrandframeError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BrandframeError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
