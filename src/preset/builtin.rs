use crate::assets::color::Rgba8;
use crate::foundation::core::{Canvas, Point};
use crate::preset::model::{
    GrayscalePreset, LabelSpec, OverlayBleed, OverlaySpec, PipelineStep, ShadowSpec, TextSpec,
    TintSpec, ToolPreset,
};

const BRAND_FONT: &str = "KattuxAbc-Regular.otf";
const BRAND_BLUE: Rgba8 = Rgba8::rgb(0x00, 0x9e, 0xe3);
const BLUSH: Rgba8 = Rgba8::rgb(0xff, 0xe8, 0xe8);
const DEFAULT_TINT_STRENGTH: f32 = 0.28;
const ROTATION_DEG: f64 = -2.0;

const NAMES: &[&str] = &[
    "profile-image",
    "linkedin-banner",
    "new-employee",
    "linkedin-post",
    "powerpoint",
    "badge",
];

/// Names of the built-in tool presets.
pub fn builtin_names() -> &'static [&'static str] {
    NAMES
}

/// Every built-in preset, in [`builtin_names`] order.
pub fn builtin_presets() -> Vec<ToolPreset> {
    NAMES.iter().filter_map(|n| builtin(n)).collect()
}

/// Look up a built-in preset by name.
pub fn builtin(name: &str) -> Option<ToolPreset> {
    let preset = match name {
        "profile-image" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 1080,
                height: 1080,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Grayscale {
                    preset: GrayscalePreset::LumaBoostContrast,
                },
                PipelineStep::Overlay(OverlaySpec {
                    source: "profile-image-overlay.png".to_owned(),
                    bleed: OverlayBleed::default(),
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "linkedin-profile.png".to_owned(),
        },
        "linkedin-banner" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 1584,
                height: 396,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Grayscale {
                    preset: GrayscalePreset::Luma,
                },
                PipelineStep::Tint(TintSpec {
                    color: BLUSH,
                    strength: DEFAULT_TINT_STRENGTH,
                }),
                PipelineStep::Overlay(OverlaySpec {
                    source: "linkedin-banner.svg".to_owned(),
                    bleed: OverlayBleed {
                        x: -1,
                        y: 0,
                        extra_width: 2,
                        extra_height: 0,
                    },
                }),
                PipelineStep::Text(TextSpec {
                    font_source: BRAND_FONT.to_owned(),
                    color: BRAND_BLUE,
                    default_size: 78.0,
                    size_range: [40.0, 200.0],
                    default_anchor: Point::new(1584.0, 396.0),
                    rotation_deg: ROTATION_DEG,
                    shadow: Some(ShadowSpec {
                        blur: 1.0,
                        blur_without_source: Some(2.0),
                        ..ShadowSpec::default()
                    }),
                    label: None,
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "linkedin-banner.png".to_owned(),
        },
        "new-employee" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 1080,
                height: 1080,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Overlay(OverlaySpec {
                    source: "linkedin-post.svg".to_owned(),
                    bleed: OverlayBleed::default(),
                }),
                PipelineStep::Text(TextSpec {
                    font_source: BRAND_FONT.to_owned(),
                    color: BRAND_BLUE,
                    default_size: 78.0,
                    size_range: [40.0, 200.0],
                    default_anchor: Point::new(506.0, 980.0),
                    rotation_deg: ROTATION_DEG,
                    shadow: Some(ShadowSpec::default()),
                    label: None,
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "linkedin-new-employee.png".to_owned(),
        },
        "linkedin-post" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 1080,
                height: 1080,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Overlay(OverlaySpec {
                    source: "linkedin-post.svg".to_owned(),
                    bleed: OverlayBleed::default(),
                }),
                PipelineStep::Text(TextSpec {
                    font_source: BRAND_FONT.to_owned(),
                    color: Rgba8::WHITE,
                    default_size: 120.0,
                    size_range: [40.0, 200.0],
                    default_anchor: Point::new(506.0, 968.0),
                    rotation_deg: 0.0,
                    shadow: Some(ShadowSpec::default()),
                    label: None,
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "linkedin-post.png".to_owned(),
        },
        "powerpoint" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Grayscale {
                    preset: GrayscalePreset::Luma,
                },
                PipelineStep::Tint(TintSpec {
                    color: BLUSH,
                    strength: DEFAULT_TINT_STRENGTH,
                }),
                PipelineStep::Overlay(OverlaySpec {
                    source: "powerpoint.svg".to_owned(),
                    bleed: OverlayBleed {
                        x: 0,
                        y: 1,
                        extra_width: 0,
                        extra_height: 0,
                    },
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "powerpoint.png".to_owned(),
        },
        "badge" => ToolPreset {
            name: name.to_owned(),
            canvas: Canvas {
                width: 800,
                height: 800,
            },
            steps: vec![
                PipelineStep::Place,
                PipelineStep::Text(TextSpec {
                    font_source: BRAND_FONT.to_owned(),
                    color: Rgba8::WHITE,
                    default_size: 32.0,
                    size_range: [16.0, 120.0],
                    default_anchor: Point::new(400.0, 680.0),
                    rotation_deg: ROTATION_DEG,
                    shadow: None,
                    label: Some(LabelSpec {
                        source: "label-background.svg".to_owned(),
                        padding: 20.0,
                        min_width: 196.0,
                        text_raise: 0.1,
                    }),
                }),
            ],
            scale_range: [0.2, 3.0],
            export_filename: "linkedin-badge.png".to_owned(),
        },
        _ => return None,
    };
    Some(preset)
}
