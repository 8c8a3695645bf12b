use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Source-over of two equal-length premultiplied buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> BrandframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BrandframeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-over of a `src_w x src_h` image placed at `(x, y)`, clipped to the destination.
#[allow(clippy::too_many_arguments)]
pub fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i32,
    y: i32,
) -> BrandframeResult<()> {
    if dst.len() != dst_w as usize * dst_h as usize * 4
        || src.len() != src_w as usize * src_h as usize * 4
    {
        return Err(BrandframeError::render("blit_over buffer size mismatch"));
    }

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(src_w)).min(i64::from(dst_w));
    let y1 = (i64::from(y) + i64::from(src_h)).min(i64::from(dst_h));
    if x1 <= x0 || y1 <= y0 {
        return Ok(());
    }

    let dst_stride = dst_w as usize * 4;
    let src_stride = src_w as usize * 4;
    let span = (x1 - x0) as usize * 4;
    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        let sx = (x0 - i64::from(x)) as usize;
        let s_start = sy * src_stride + sx * 4;
        let d_start = dy as usize * dst_stride + x0 as usize * 4;
        over_in_place(
            &mut dst[d_start..d_start + span],
            &src[s_start..s_start + span],
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
