//! Interactive editing session over one tool.
//!
//! A session owns the tool's prepared assets, the current photo, the parameters and the rendered
//! surface. Mutations only mark the session dirty; [`EditorSession::render_if_dirty`] recomputes
//! the surface once every required asset has loaded.

use std::path::{Path, PathBuf};

use crate::assets::store::normalize_rel_path;
use crate::compose::params::RenderParams;
use crate::compose::placement::{Placement, compute_placement};
use crate::export::{encode_png, write_png};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::preset::model::ToolPreset;
use crate::render::compositor::{Compositor, RenderReport, ToolAssets};
use crate::render::cpu::SourceImage;
use crate::render::surface::Surface;

/// Readiness flags; rendering waits until both are set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetReadiness {
    /// Overlay loaded, or the tool has none.
    pub overlay: bool,
    /// Font (and label background, when used) loaded, or the tool draws no text.
    pub font: bool,
}

impl AssetReadiness {
    /// Both flags set.
    pub fn is_ready(self) -> bool {
        self.overlay && self.font
    }
}

/// What a pointer drag moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// The photo offset.
    Photo,
    /// The text anchor (and the label around it).
    Text,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    target: DragTarget,
    last: Point,
}

/// One user's editing state for one tool.
#[derive(Debug)]
pub struct EditorSession {
    compositor: Compositor,
    assets: ToolAssets,
    source: Option<SourceImage>,
    params: RenderParams,
    surface: Surface,
    dirty: bool,
    drag: Option<Drag>,
    last_report: Option<RenderReport>,
}

impl EditorSession {
    /// Session at the preset's default parameters, awaiting assets.
    pub fn new(preset: ToolPreset) -> BrandframeResult<Self> {
        let params = RenderParams::defaults_for(&preset);
        let surface = Surface::new(preset.canvas)?;
        let compositor = Compositor::new(preset)?;
        Ok(Self {
            compositor,
            assets: ToolAssets::default(),
            source: None,
            params,
            surface,
            dirty: true,
            drag: None,
            last_report: None,
        })
    }

    /// The session's tool.
    pub fn preset(&self) -> &ToolPreset {
        self.compositor.preset()
    }

    /// Current parameters.
    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Current readiness flags.
    pub fn readiness(&self) -> AssetReadiness {
        let preset = self.compositor.preset();
        let overlay = preset.overlay().is_none() || self.assets.overlay.is_some();
        let font = match preset.text() {
            None => true,
            Some(text) => {
                self.assets.font.is_some() && (text.label.is_none() || self.assets.label.is_some())
            }
        };
        AssetReadiness { overlay, font }
    }

    /// All required assets are loaded.
    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }

    /// A change is waiting to be rendered.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Load the overlay from encoded SVG or raster bytes.
    pub fn load_overlay(&mut self, bytes: &[u8]) -> BrandframeResult<()> {
        let img = self
            .compositor
            .prepare_overlay(bytes)
            .inspect_err(|e| tracing::warn!(error = %e, "overlay failed to load"))?;
        self.assets.overlay = Some(img);
        self.dirty = true;
        Ok(())
    }

    /// Load the text font from OTF/TTF bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> BrandframeResult<()> {
        let font = self
            .compositor
            .prepare_font(bytes)
            .inspect_err(|e| tracing::warn!(error = %e, "font failed to load"))?;
        self.assets.font = Some(font);
        self.dirty = true;
        Ok(())
    }

    /// Load the label background from encoded SVG or raster bytes.
    pub fn load_label_background(&mut self, bytes: &[u8]) -> BrandframeResult<()> {
        let art = self
            .compositor
            .prepare_label(bytes)
            .inspect_err(|e| tracing::warn!(error = %e, "label background failed to load"))?;
        self.assets.label = Some(art);
        self.dirty = true;
        Ok(())
    }

    /// Load every asset the tool needs from paths relative to `root`.
    ///
    /// Font files in `root` and `root/fonts` become available to SVG text. Failures are logged
    /// and leave the matching flag unset.
    #[tracing::instrument(skip(self, root), fields(tool = %self.preset().name, root = %root.as_ref().display()))]
    pub fn load_assets_from_dir(&mut self, root: impl AsRef<Path>) -> AssetReadiness {
        let root = root.as_ref();
        let preset = self.compositor.preset();
        let overlay = preset.overlay().map(|o| o.source.clone());
        let font = preset.text().map(|t| t.font_source.clone());
        let label = preset
            .text()
            .and_then(|t| t.label.as_ref())
            .map(|l| l.source.clone());

        // fonts first so SVG text in the overlay and label can resolve them
        for dir in [root.to_path_buf(), root.join("fonts")] {
            self.compositor.add_svg_font_dir(&dir);
        }
        if let Some(rel) = font
            && let Ok(bytes) = read_asset(root, &rel)
        {
            let _ = self.load_font(&bytes);
        }
        if let Some(rel) = overlay
            && let Ok(bytes) = read_asset(root, &rel)
        {
            let _ = self.load_overlay(&bytes);
        }
        if let Some(rel) = label
            && let Ok(bytes) = read_asset(root, &rel)
        {
            let _ = self.load_label_background(&bytes);
        }

        let readiness = self.readiness();
        tracing::info!(
            overlay = readiness.overlay,
            font = readiness.font,
            "assets loaded"
        );
        readiness
    }

    /// Replace the photo. On decode failure the previous photo stays.
    pub fn load_source(&mut self, bytes: &[u8]) -> BrandframeResult<()> {
        let src = SourceImage::decode(bytes)
            .inspect_err(|e| tracing::warn!(error = %e, "photo failed to decode"))?;
        tracing::debug!(width = src.width(), height = src.height(), "photo loaded");
        self.source = Some(src);
        self.params.offset = Vec2::ZERO;
        self.drag = None;
        self.dirty = true;
        Ok(())
    }

    /// Drop the photo.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.drag = None;
        self.dirty = true;
    }

    /// Current photo, if any.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Set the user scale (clamped). A changed scale recenters the photo.
    pub fn set_scale(&mut self, scale: f64) -> BrandframeResult<()> {
        if !scale.is_finite() {
            return Err(BrandframeError::validation("scale must be finite"));
        }
        let [lo, hi] = self.preset().scale_range;
        let scale = scale.clamp(lo, hi);
        if scale == self.params.scale {
            return Ok(());
        }
        self.params.scale = scale;
        self.params.offset = Vec2::ZERO;
        self.dirty = true;
        Ok(())
    }

    /// Set the photo offset from the canvas center.
    pub fn set_offset(&mut self, offset: Vec2) -> BrandframeResult<()> {
        if !offset.is_finite() {
            return Err(BrandframeError::validation("offset must be finite"));
        }
        self.params.offset = offset;
        self.dirty = true;
        Ok(())
    }

    /// Set the tint strength (clamped to `0..=1`).
    pub fn set_tint_strength(&mut self, strength: f32) -> BrandframeResult<()> {
        if !strength.is_finite() {
            return Err(BrandframeError::validation("tint strength must be finite"));
        }
        self.params.tint_strength = strength.clamp(0.0, 1.0);
        self.dirty = true;
        Ok(())
    }

    /// Set the text; empty text draws nothing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.params.text = text.into();
        self.dirty = true;
    }

    /// Set the font size (clamped to the tool's range).
    pub fn set_font_size(&mut self, size_px: f32) -> BrandframeResult<()> {
        if !size_px.is_finite() {
            return Err(BrandframeError::validation("font size must be finite"));
        }
        self.params.font_size = match self.preset().text() {
            Some(t) => size_px.clamp(t.size_range[0], t.size_range[1]),
            None => size_px,
        };
        self.dirty = true;
        Ok(())
    }

    /// Set the text anchor.
    pub fn set_text_anchor(&mut self, anchor: Point) -> BrandframeResult<()> {
        if !anchor.is_finite() {
            return Err(BrandframeError::validation("text anchor must be finite"));
        }
        self.params.text_anchor = anchor;
        self.dirty = true;
        Ok(())
    }

    /// Where the photo currently lands.
    pub fn placement(&self) -> Option<Placement> {
        let src = self.source.as_ref()?;
        Some(compute_placement(
            self.preset().canvas,
            src.width(),
            src.height(),
            self.params.scale,
            self.params.offset,
        ))
    }

    /// Start dragging the photo when `at` hits it.
    pub fn begin_drag(&mut self, at: Point) -> bool {
        let hit = at.is_finite() && self.placement().is_some_and(|p| p.contains(at));
        self.drag = hit.then_some(Drag {
            target: DragTarget::Photo,
            last: at,
        });
        hit
    }

    /// Start dragging the text anchor. Fails when the tool draws no text.
    pub fn begin_text_drag(&mut self, at: Point) -> bool {
        let ok = at.is_finite() && self.preset().text().is_some();
        self.drag = ok.then_some(Drag {
            target: DragTarget::Text,
            last: at,
        });
        ok
    }

    /// Move the drag target by the pointer delta since the last drag event.
    pub fn drag_to(&mut self, at: Point) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if !at.is_finite() {
            return false;
        }
        let delta = at - drag.last;
        drag.last = at;
        match drag.target {
            DragTarget::Photo => self.params.offset += delta,
            DragTarget::Text => self.params.text_anchor += delta,
        }
        self.dirty = true;
        true
    }

    /// Stop dragging.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// A drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// What the current drag moves.
    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag.map(|d| d.target)
    }

    /// Render when ready and dirty. Returns whether the surface was replaced.
    ///
    /// A failed render is logged, clears the dirty flag and keeps the previous surface.
    pub fn render_if_dirty(&mut self) -> bool {
        if !self.dirty || !self.is_ready() {
            return false;
        }
        self.dirty = false;
        match self.compositor.render(
            &mut self.surface,
            self.source.as_ref(),
            &self.params,
            &self.assets,
        ) {
            Ok(report) => {
                self.last_report = Some(report);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed; keeping previous surface");
                false
            }
        }
    }

    /// The rendered surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Report of the last successful render.
    pub fn last_report(&self) -> Option<&RenderReport> {
        self.last_report.as_ref()
    }

    /// PNG bytes of the current surface.
    pub fn export_png(&self) -> BrandframeResult<Vec<u8>> {
        encode_png(&self.surface)
    }

    /// Fixed file name of the tool's export.
    pub fn export_filename(&self) -> &str {
        &self.preset().export_filename
    }

    /// Write the export into `dir` under the tool's file name.
    pub fn write_export(&self, dir: impl AsRef<Path>) -> BrandframeResult<PathBuf> {
        let path = dir.as_ref().join(self.export_filename());
        write_png(&self.surface, &path)?;
        Ok(path)
    }
}

fn read_asset(root: &Path, rel: &str) -> BrandframeResult<Vec<u8>> {
    let norm = normalize_rel_path(rel)?;
    let path = root.join(Path::new(&norm));
    std::fs::read(&path).map_err(|e| {
        let err = BrandframeError::asset(format!("failed to read asset '{}': {e}", path.display()));
        tracing::warn!(error = %err, "asset unavailable");
        err
    })
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
