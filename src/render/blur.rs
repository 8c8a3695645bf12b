use crate::compose::placement::PixelRect;
use crate::compose::text::ShadowBlur;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Separable Gaussian kernel in Q16 fixed point, normalized to sum exactly `1 << 16`.
pub fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BrandframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BrandframeError::validation(
            "blur sigma must be finite and > 0",
        ));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(BrandframeError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Blur a premultiplied `width x height` buffer; edges clamp.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) -> BrandframeResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BrandframeError::render("blur buffer size overflow"))?;
    if src.len() != expected {
        return Err(BrandframeError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if kernel_q16.len() <= 1 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];
    blur_pass(src, &mut tmp, width, height, kernel_q16, Axis::Horizontal);
    blur_pass(&tmp, &mut out, width, height, kernel_q16, Axis::Vertical);
    Ok(out)
}

/// Blur only `region` of a `canvas`-sized premultiplied buffer, in place.
#[tracing::instrument(level = "debug", skip(buf))]
pub fn blur_region_in_place(
    buf: &mut [u8],
    canvas: Canvas,
    region: PixelRect,
    blur: ShadowBlur,
) -> BrandframeResult<()> {
    if blur.radius == 0 {
        return Ok(());
    }
    if buf.len() != canvas.byte_len() {
        return Err(BrandframeError::render(
            "blur buffer length does not match canvas",
        ));
    }
    if region.x + region.width > canvas.width || region.y + region.height > canvas.height {
        return Err(BrandframeError::render("blur region exceeds canvas"));
    }

    let kernel = gaussian_kernel_q16(blur.radius, blur.sigma)?;
    let stride = canvas.width as usize * 4;
    let span = region.width as usize * 4;
    let rows = region.y as usize..(region.y + region.height) as usize;

    let mut sub = Vec::with_capacity(span * region.height as usize);
    for row in rows.clone() {
        let start = row * stride + region.x as usize * 4;
        sub.extend_from_slice(&buf[start..start + span]);
    }
    let blurred = blur_rgba8_premul(&sub, region.width, region.height, &kernel)?;
    for (i, row) in rows.enumerate() {
        let start = row * stride + region.x as usize * 4;
        buf[start..start + span].copy_from_slice(&blurred[i * span..(i + 1) * span]);
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
