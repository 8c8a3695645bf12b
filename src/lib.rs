//! Brandframe composites a user photo into a fixed, branded frame.
//!
//! Each tool (LinkedIn profile image, banner, post, PowerPoint background, name badge) is a
//! [`ToolPreset`]: a canvas size plus an ordered list of pipeline steps. A [`Compositor`] runs the
//! steps over a premultiplied RGBA8 [`Surface`]:
//!
//! - place the photo scaled to fit, times the user scale, plus the user offset
//! - gray it with a named [`GrayscalePreset`]
//! - tint it with the "color" blend mode
//! - draw the overlay on top
//! - draw rotated text with a drop shadow and an optional label background
//!
//! [`EditorSession`] wraps a compositor with asset readiness, a dirty flag and drag handling, and
//! exports the result as PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod preset;
mod render;

/// PNG export.
pub mod export;
/// Tracing subscriber setup.
pub mod logging;
/// Interactive editing session.
pub mod session;

pub use crate::assets::color::Rgba8;
pub use crate::assets::decode::{
    decode_graphic, decode_graphic_with_fonts, decode_image, load_fonts_from_dir, parse_svg,
    parse_svg_with_fonts, system_svg_fontdb,
};
pub use crate::assets::store::{
    PreparedFont, PreparedGraphic, PreparedImage, PreparedSvg, TextLayoutEngine, TextMetrics,
    normalize_rel_path,
};
pub use crate::compose::params::RenderParams;
pub use crate::compose::placement::{PixelRect, Placement, compute_placement, fit_factor};
pub use crate::compose::text::{ShadowBlur, glyph_transform, text_transform};
pub use crate::compose::tint::apply_tint;
pub use crate::compose::tone::{apply_grayscale_region, gray_level};
pub use crate::foundation::core::{Affine, Canvas, MAX_CANVAS_DIM, Point, Rect, Vec2};
pub use crate::foundation::error::{BrandframeError, BrandframeResult};
pub use crate::preset::builtin::{builtin, builtin_names, builtin_presets};
pub use crate::preset::model::{
    GrayscalePreset, LABEL_HEIGHT_RATIO, LabelSpec, OverlayBleed, OverlaySpec, OverlayTarget,
    PipelineStep, ShadowSpec, TextSpec, TintSpec, ToolPreset, ToolPresetBuilder,
};
pub use crate::render::compositor::{Compositor, RenderReport, TextReport, ToolAssets};
pub use crate::render::cpu::SourceImage;
pub use crate::render::surface::Surface;
pub use crate::session::{AssetReadiness, DragTarget, EditorSession};
