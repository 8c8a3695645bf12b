use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::assets::store::{PreparedGraphic, PreparedImage, PreparedSvg};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode any raster format supported by `image` into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BrandframeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BrandframeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul(width, height, rgba8_premul)
}

/// Shared font database of the installed system fonts, loaded on first use.
pub fn system_svg_fontdb() -> Arc<usvg::fontdb::Database> {
    static SYSTEM: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    SYSTEM
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts for svg text");
            Arc::new(db)
        })
        .clone()
}

/// Add every `.ttf`/`.otf`/`.ttc`/`.otc` file directly inside `dir`. Returns the number of files.
///
/// A missing or unreadable directory adds nothing.
pub fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) -> usize {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return 0;
    };
    let mut loaded = 0;
    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path.extension().and_then(|e| e.to_str()).is_some_and(|e| {
            matches!(
                e.to_ascii_lowercase().as_str(),
                "ttf" | "otf" | "ttc" | "otc"
            )
        });
        if is_font && path.is_file() && db.load_font_file(&path).is_ok() {
            loaded += 1;
        }
    }
    loaded
}

/// Parse SVG bytes into a `usvg` tree, resolving `<text>` against the system fonts.
pub fn parse_svg(bytes: &[u8]) -> BrandframeResult<PreparedSvg> {
    parse_svg_with_fonts(bytes, system_svg_fontdb())
}

/// Parse SVG bytes into a `usvg` tree, resolving `<text>` against `fontdb`.
pub fn parse_svg_with_fonts(
    bytes: &[u8],
    fontdb: Arc<usvg::fontdb::Database>,
) -> BrandframeResult<PreparedSvg> {
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| BrandframeError::decode(format!("parse svg tree: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Decode an overlay or label asset, sniffing SVG by content.
pub fn decode_graphic(bytes: &[u8]) -> BrandframeResult<PreparedGraphic> {
    decode_graphic_with_fonts(bytes, system_svg_fontdb())
}

/// [`decode_graphic`] with an explicit font database for SVG text.
pub fn decode_graphic_with_fonts(
    bytes: &[u8],
    fontdb: Arc<usvg::fontdb::Database>,
) -> BrandframeResult<PreparedGraphic> {
    if looks_like_svg(bytes) {
        parse_svg_with_fonts(bytes, fontdb).map(PreparedGraphic::Svg)
    } else {
        decode_image(bytes).map(PreparedGraphic::Raster)
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    // gzip-compressed svgz
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return true;
    }
    let head = &bytes[..bytes.len().min(512)];
    let first = head.iter().position(|b| !b.is_ascii_whitespace());
    match first {
        Some(i) if head[i] == b'<' => head.windows(4).any(|w| w.eq_ignore_ascii_case(b"<svg")),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
