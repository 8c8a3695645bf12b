use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use brandframe::logging::{LoggingConfig, init_logging};
use brandframe::{EditorSession, Point, ToolPreset, Vec2};

#[derive(Parser, Debug)]
#[command(name = "brandframe", version, about = "Branded photo frames")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one tool to a PNG.
    Render(RenderArgs),
    /// List the built-in tools, or print one as JSON.
    Presets(PresetsArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false, id = "tool_source")]
struct ToolSource {
    /// Built-in tool name (see `brandframe presets`).
    #[arg(long)]
    tool: Option<String>,

    /// Tool preset JSON file.
    #[arg(long)]
    preset_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: ToolSource,

    /// Directory the preset's asset paths are relative to.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Photo to place (any format the image crate decodes).
    #[arg(long)]
    photo: Option<PathBuf>,

    /// User scale on top of scale-to-fit.
    #[arg(long)]
    scale: Option<f64>,

    /// Horizontal photo offset in pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_x: f64,

    /// Vertical photo offset in pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_y: f64,

    /// Tint strength, 0 to 1.
    #[arg(long)]
    tint: Option<f32>,

    /// Text to draw.
    #[arg(long)]
    text: Option<String>,

    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<f32>,

    /// Text anchor x in pixels.
    #[arg(long, allow_negative_numbers = true)]
    text_x: Option<f64>,

    /// Text anchor y in pixels.
    #[arg(long, allow_negative_numbers = true)]
    text_y: Option<f64>,

    /// Output PNG file, or a directory receiving the tool's file name.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Print this built-in tool as pretty JSON.
    #[arg(long)]
    dump: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        json: cli.log_json,
    });
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn load_preset(source: &ToolSource) -> anyhow::Result<ToolPreset> {
    match (&source.tool, &source.preset_file) {
        (Some(name), _) => brandframe::builtin(name).with_context(|| {
            format!(
                "unknown tool '{name}' (known: {})",
                brandframe::builtin_names().join(", ")
            )
        }),
        (None, Some(path)) => ToolPreset::from_path(path)
            .with_context(|| format!("load preset '{}'", path.display())),
        (None, None) => anyhow::bail!("either --tool or --preset-file is required"),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.source)?;
    let mut session = EditorSession::new(preset)?;

    let readiness = session.load_assets_from_dir(&args.assets);
    if !readiness.is_ready() {
        anyhow::bail!(
            "assets for '{}' are not ready under '{}' (overlay: {}, font: {})",
            session.preset().name,
            args.assets.display(),
            readiness.overlay,
            readiness.font
        );
    }

    if let Some(photo) = &args.photo {
        let bytes =
            std::fs::read(photo).with_context(|| format!("read photo '{}'", photo.display()))?;
        session
            .load_source(&bytes)
            .with_context(|| format!("decode photo '{}'", photo.display()))?;
    }

    if let Some(scale) = args.scale {
        session.set_scale(scale)?;
    }
    session.set_offset(Vec2::new(args.offset_x, args.offset_y))?;
    if let Some(tint) = args.tint {
        session.set_tint_strength(tint)?;
    }
    if let Some(text) = args.text {
        session.set_text(text);
    }
    if let Some(size) = args.font_size {
        session.set_font_size(size)?;
    }
    if args.text_x.is_some() || args.text_y.is_some() {
        let current = session.params().text_anchor;
        session.set_text_anchor(Point::new(
            args.text_x.unwrap_or(current.x),
            args.text_y.unwrap_or(current.y),
        ))?;
    }

    if !session.render_if_dirty() {
        anyhow::bail!("render failed for '{}'", session.preset().name);
    }

    let out = resolve_out(&args.out, session.export_filename());
    brandframe::export::write_png(session.surface(), &out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn resolve_out(out: &Path, filename: &str) -> PathBuf {
    let is_png = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if out.is_dir() || !is_png {
        out.join(filename)
    } else {
        out.to_path_buf()
    }
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    match args.dump {
        Some(name) => {
            let preset = brandframe::builtin(&name)
                .with_context(|| format!("unknown tool '{name}'"))?;
            println!("{}", preset.to_json_pretty()?);
        }
        None => {
            for preset in brandframe::builtin_presets() {
                println!(
                    "{}\t{}x{}\t{}",
                    preset.name, preset.canvas.width, preset.canvas.height, preset.export_filename
                );
            }
        }
    }
    Ok(())
}
