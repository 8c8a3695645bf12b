//! PNG export of a rendered surface.

use std::io::Cursor;
use std::path::Path;

use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::render::surface::Surface;

/// Encode `surface` as PNG bytes (straight alpha).
pub fn encode_png(surface: &Surface) -> BrandframeResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.to_straight_rgba(),
    )
    .ok_or_else(|| BrandframeError::render("surface buffer does not match its size"))?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| BrandframeError::render(format!("encode png: {e}")))?;
    Ok(out)
}

/// Write `surface` as a PNG file, creating parent directories.
#[tracing::instrument(skip(surface, path), fields(path = %path.display()))]
pub fn write_png(surface: &Surface, path: &Path) -> BrandframeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            BrandframeError::asset(format!(
                "create output dir '{}': {e}",
                parent.display()
            ))
        })?;
    }
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes)
        .map_err(|e| BrandframeError::asset(format!("write png '{}': {e}", path.display())))?;
    tracing::info!(width = surface.width(), height = surface.height(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
