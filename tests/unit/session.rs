use std::io::Cursor;

use super::*;
use crate::assets::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::preset::builtin::builtin;
use crate::preset::model::{OverlayBleed, TextSpec};

const OVERLAY: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
<rect x="0" y="0" width="10" height="2" fill="#0000ff"/>
</svg>"##;

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::new();
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn overlay_tool() -> ToolPreset {
    ToolPreset::builder("tiny", Canvas {
        width: 10,
        height: 10,
    })
    .place()
    .overlay("frame.svg", OverlayBleed::default())
    .export_filename("tiny.png")
    .build()
    .unwrap()
}

#[test]
fn readiness_flags_follow_required_assets() {
    let s = EditorSession::new(builtin("powerpoint").unwrap()).unwrap();
    assert_eq!(
        s.readiness(),
        AssetReadiness {
            overlay: false,
            font: true
        }
    );

    let s = EditorSession::new(builtin("badge").unwrap()).unwrap();
    assert_eq!(
        s.readiness(),
        AssetReadiness {
            overlay: true,
            font: false
        }
    );

    let s = EditorSession::new(builtin("linkedin-banner").unwrap()).unwrap();
    assert!(!s.readiness().overlay && !s.readiness().font);
    assert!(!s.is_ready());
}

#[test]
fn render_waits_for_assets_then_runs_once() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    assert!(s.is_dirty());
    assert!(!s.render_if_dirty());
    assert!(s.is_dirty());

    assert!(s.load_overlay(b"not an overlay").is_err());
    assert!(!s.is_ready());

    s.load_overlay(OVERLAY).unwrap();
    assert!(s.is_ready());
    assert!(s.render_if_dirty());
    assert!(!s.is_dirty());
    assert!(!s.render_if_dirty());
    assert_eq!(s.surface().pixel(5, 0), [0, 0, 255, 255]);
    assert_eq!(s.surface().pixel(5, 5), [0, 0, 0, 0]);
}

#[test]
fn bad_photo_keeps_previous_one() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    s.load_overlay(OVERLAY).unwrap();
    s.load_source(&png(2, 2, [255, 0, 0, 255])).unwrap();
    s.render_if_dirty();

    assert!(s.load_source(b"garbage").is_err());
    assert_eq!(s.source().map(|src| src.width()), Some(2));
    assert!(!s.is_dirty());

    s.clear_source();
    assert!(s.source().is_none());
    assert!(s.render_if_dirty());
    assert_eq!(s.surface().pixel(5, 5), [0, 0, 0, 0]);
}

#[test]
fn drag_moves_offset_by_pointer_delta() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    assert!(!s.begin_drag(Point::new(5.0, 5.0)));

    s.load_source(&png(4, 2, [0, 255, 0, 255])).unwrap();
    // 10x5 placed at y 2.5..7.5
    assert!(!s.begin_drag(Point::new(5.0, 1.0)));
    assert!(!s.drag_to(Point::new(6.0, 1.0)));

    assert!(s.begin_drag(Point::new(5.0, 5.0)));
    assert!(s.drag_to(Point::new(7.0, 4.0)));
    assert!(s.drag_to(Point::new(8.0, 6.0)));
    assert_eq!(s.params().offset, Vec2::new(3.0, 1.0));
    s.end_drag();
    assert!(!s.is_dragging());
    assert!(!s.drag_to(Point::new(0.0, 0.0)));
    assert_eq!(s.params().offset, Vec2::new(3.0, 1.0));
}

#[test]
fn scale_change_and_new_photo_recenter() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    s.set_offset(Vec2::new(4.0, -2.0)).unwrap();
    s.set_scale(7.5).unwrap();
    assert_eq!(s.params().scale, 3.0);
    assert_eq!(s.params().offset, Vec2::ZERO);

    s.set_offset(Vec2::new(1.0, 1.0)).unwrap();
    s.load_source(&png(1, 1, [1, 2, 3, 255])).unwrap();
    assert_eq!(s.params().offset, Vec2::ZERO);

    assert!(s.set_scale(f64::NAN).is_err());
    assert!(s.set_offset(Vec2::new(f64::INFINITY, 0.0)).is_err());
}

#[test]
fn unchanged_scale_keeps_offset() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    s.set_scale(2.0).unwrap();
    s.set_offset(Vec2::new(4.0, -2.0)).unwrap();
    s.set_scale(2.0).unwrap();
    assert_eq!(s.params().offset, Vec2::new(4.0, -2.0));

    // clamps to the current maximum, so nothing changes
    s.set_scale(3.0).unwrap();
    s.set_offset(Vec2::new(1.0, 1.0)).unwrap();
    s.set_scale(9.0).unwrap();
    assert_eq!(s.params().offset, Vec2::new(1.0, 1.0));
}

#[test]
fn text_drag_moves_anchor_and_leaves_photo() {
    let mut s = EditorSession::new(builtin("badge").unwrap()).unwrap();
    s.load_source(&png(8, 8, [0, 0, 255, 255])).unwrap();
    let start = s.params().text_anchor;
    assert_eq!(start, Point::new(400.0, 680.0));

    assert!(s.begin_text_drag(Point::new(400.0, 400.0)));
    assert_eq!(s.drag_target(), Some(DragTarget::Text));
    assert!(s.drag_to(Point::new(390.0, 420.0)));
    assert!(s.drag_to(Point::new(380.0, 430.0)));
    s.end_drag();

    assert_eq!(s.params().text_anchor, Point::new(380.0, 710.0));
    assert_eq!(s.params().offset, Vec2::ZERO);
    assert!(s.is_dirty());

    // a photo drag moves the photo only
    assert!(s.begin_drag(Point::new(400.0, 400.0)));
    assert_eq!(s.drag_target(), Some(DragTarget::Photo));
    assert!(s.drag_to(Point::new(410.0, 400.0)));
    assert_eq!(s.params().offset, Vec2::new(10.0, 0.0));
    assert_eq!(s.params().text_anchor, Point::new(380.0, 710.0));
}

#[test]
fn text_drag_needs_a_text_step() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    assert!(!s.begin_text_drag(Point::new(5.0, 5.0)));
    assert!(!s.is_dragging());
    assert_eq!(s.drag_target(), None);
}

#[test]
fn setters_clamp_and_mark_dirty() {
    let mut s = EditorSession::new(builtin("linkedin-banner").unwrap()).unwrap();
    s.set_tint_strength(2.0).unwrap();
    assert_eq!(s.params().tint_strength, 1.0);
    s.set_font_size(1.0).unwrap();
    assert_eq!(s.params().font_size, 40.0);
    s.set_text("Ada Lovelace");
    assert_eq!(s.params().text, "Ada Lovelace");
    s.set_text_anchor(Point::new(100.0, 50.0)).unwrap();
    assert_eq!(s.params().text_anchor, Point::new(100.0, 50.0));
    assert!(s.is_dirty());
}

#[test]
fn assets_load_from_dir_and_missing_files_leave_flags_unset() {
    let dir = PathBuf::from("target").join("unit_session_assets");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let mut s = EditorSession::new(overlay_tool()).unwrap();
    let r = s.load_assets_from_dir(&dir);
    assert!(!r.overlay);

    std::fs::write(dir.join("frame.svg"), OVERLAY).unwrap();
    let r = s.load_assets_from_dir(&dir);
    assert!(r.is_ready());
}

#[test]
fn export_uses_preset_filename() {
    let mut s = EditorSession::new(overlay_tool()).unwrap();
    s.load_overlay(OVERLAY).unwrap();
    s.render_if_dirty();
    assert_eq!(s.export_filename(), "tiny.png");

    let png_bytes = s.export_png().unwrap();
    let decoded = image::load_from_memory(&png_bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (10, 10));

    let dir = PathBuf::from("target").join("unit_session_export");
    let path = s.write_export(&dir).unwrap();
    assert_eq!(path, dir.join("tiny.png"));
    assert!(path.is_file());
}

#[test]
fn text_tool_needs_label_art_too() {
    let preset = ToolPreset::builder("label", Canvas {
        width: 40,
        height: 40,
    })
    .place()
    .text(TextSpec {
        font_source: "font.ttf".to_owned(),
        color: Rgba8::WHITE,
        default_size: 10.0,
        size_range: [5.0, 20.0],
        default_anchor: Point::new(20.0, 20.0),
        rotation_deg: 0.0,
        shadow: None,
        label: Some(crate::preset::model::LabelSpec {
            source: "label.svg".to_owned(),
            padding: 2.0,
            min_width: 20.0,
            text_raise: 0.0,
        }),
    })
    .export_filename("label.png")
    .build()
    .unwrap();
    let mut s = EditorSession::new(preset).unwrap();
    s.load_label_background(OVERLAY).unwrap();
    assert!(!s.readiness().font);
}
