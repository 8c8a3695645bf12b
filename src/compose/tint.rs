//! Solid-color tint composited with the W3C "color" blend mode.
//!
//! Hue and saturation come from the fill, luminosity from the destination. The fill is
//! composited source-over at the tint strength, on premultiplied RGBA8.

use crate::assets::color::Rgba8;
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::{BLEND_LUM_WEIGHTS, unit_to_u8};

type Rgb = [f32; 3];

/// Blend-mode luminosity of a unit color.
pub fn lum(c: Rgb) -> f32 {
    BLEND_LUM_WEIGHTS[0] * c[0] + BLEND_LUM_WEIGHTS[1] * c[1] + BLEND_LUM_WEIGHTS[2] * c[2]
}

fn clip_color(c: Rgb) -> Rgb {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        let d = l - n;
        for v in &mut out {
            *v = if d > 0.0 { l + (*v - l) * l / d } else { l };
        }
    }
    if x > 1.0 {
        let d = x - l;
        for v in &mut out {
            *v = if d > 0.0 { l + (*v - l) * (1.0 - l) / d } else { l };
        }
    }
    out
}

/// Shift `c` to luminosity `l`, clipping back into gamut.
pub fn set_lum(c: Rgb, l: f32) -> Rgb {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

/// `B(Cb, Cs)` of the "color" blend mode.
pub fn blend_color(backdrop: Rgb, source: Rgb) -> Rgb {
    set_lum(source, lum(backdrop))
}

fn tint_px(px: &mut [u8], src: Rgb, sa: f32) {
    let da = f32::from(px[3]) / 255.0;
    let dp = [
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
    ];
    let backdrop = if da > 0.0 {
        [
            (dp[0] / da).min(1.0),
            (dp[1] / da).min(1.0),
            (dp[2] / da).min(1.0),
        ]
    } else {
        [0.0; 3]
    };
    let b = blend_color(backdrop, src);

    // out_p = sp*(1-da) + dp*(1-sa) + B*sa*da
    for i in 0..3 {
        let sp = src[i] * sa;
        px[i] = unit_to_u8(sp * (1.0 - da) + dp[i] * (1.0 - sa) + b[i] * sa * da);
    }
    px[3] = unit_to_u8(sa + da * (1.0 - sa));
}

/// Tint a premultiplied RGBA8 buffer in place.
///
/// `strength` multiplies the fill's own alpha; `0` leaves the buffer untouched.
pub fn apply_tint(buf: &mut [u8], color: Rgba8, strength: f32) -> BrandframeResult<()> {
    if buf.len() % 4 != 0 {
        return Err(BrandframeError::render(
            "tint buffer length must be a multiple of 4",
        ));
    }
    if !strength.is_finite() {
        return Err(BrandframeError::validation("tint strength must be finite"));
    }
    let [r, g, b, a] = color.to_unit();
    let sa = strength.clamp(0.0, 1.0) * a;
    if sa <= 0.0 {
        return Ok(());
    }
    let src = [r, g, b];
    for px in buf.chunks_exact_mut(4) {
        tint_px(px, src, sa);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/tint.rs"]
mod tests;
