use crate::foundation::core::MAX_CANVAS_DIM;
use crate::foundation::error::{BrandframeError, BrandframeResult};

pub(crate) fn check_raster_size(width: u32, height: u32) -> BrandframeResult<()> {
    if width == 0 || height == 0 {
        return Err(BrandframeError::render("raster target has zero size"));
    }
    if width > MAX_CANVAS_DIM || height > MAX_CANVAS_DIM {
        return Err(BrandframeError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM})"
        )));
    }
    Ok(())
}

/// Rasterize an SVG stretched to exactly `width x height` (non-uniform scale).
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> BrandframeResult<Vec<u8>> {
    check_raster_size(width, height)?;
    let size = tree.size();
    if !(size.width().is_finite() && size.height().is_finite())
        || size.width() <= 0.0
        || size.height() <= 0.0
    {
        return Err(BrandframeError::decode("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BrandframeError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
