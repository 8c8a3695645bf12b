use crate::compose::placement::PixelRect;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::{LUMA_WEIGHTS, premultiply_px, unpremultiply_px};
use crate::preset::model::GrayscalePreset;

const CONTRAST: f32 = 1.15;
const BOOST: f32 = 1.2;

/// Rec. 601 luma of straight color, in `0..=255` (unrounded).
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_WEIGHTS[0] * f32::from(r) + LUMA_WEIGHTS[1] * f32::from(g) + LUMA_WEIGHTS[2] * f32::from(b)
}

fn contrast(v: f32) -> f32 {
    ((v - 128.0) * CONTRAST + 128.0).clamp(0.0, 255.0)
}

/// Gray level a preset assigns to straight color.
pub fn gray_level(preset: GrayscalePreset, r: u8, g: u8, b: u8) -> u8 {
    let y = luma(r, g, b);
    let v = match preset {
        GrayscalePreset::Luma => y,
        GrayscalePreset::LumaContrast => contrast(y),
        GrayscalePreset::LumaBoostContrast => contrast((y * BOOST).clamp(0.0, 255.0)),
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// Gray a premultiplied pixel; alpha is kept.
pub fn gray_premul_px(preset: GrayscalePreset, px: [u8; 4]) -> [u8; 4] {
    if px[3] == 0 {
        return px;
    }
    let s = unpremultiply_px(px);
    let v = gray_level(preset, s[0], s[1], s[2]);
    premultiply_px([v, v, v, s[3]])
}

/// Gray every pixel of `region` in a premultiplied `canvas`-sized buffer.
#[tracing::instrument(level = "debug", skip(buf))]
pub fn apply_grayscale_region(
    buf: &mut [u8],
    canvas: Canvas,
    region: PixelRect,
    preset: GrayscalePreset,
) -> BrandframeResult<()> {
    if buf.len() != canvas.byte_len() {
        return Err(BrandframeError::render(
            "grayscale buffer length does not match canvas",
        ));
    }
    if region.x + region.width > canvas.width || region.y + region.height > canvas.height {
        return Err(BrandframeError::render("grayscale region exceeds canvas"));
    }

    let stride = canvas.width as usize * 4;
    for row in region.y..region.y + region.height {
        let start = row as usize * stride + region.x as usize * 4;
        let end = start + region.width as usize * 4;
        for px in buf[start..end].chunks_exact_mut(4) {
            let out = gray_premul_px(preset, [px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/tone.rs"]
mod tests;
