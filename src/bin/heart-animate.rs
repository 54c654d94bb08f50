use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use heartline::{
    AnimationSettings, DisplayMode, Fps, PngSequenceSink, Precision, RenderContext,
    RenderSettings, Scene, WriteOptions, animate, generate, store, write_png,
};

/// Generate a heart curve, save its edge coordinates, and optionally animate a ball along it.
#[derive(Parser, Debug)]
#[command(name = "heart-animate", version)]
struct Cli {
    /// Number of points along the heart boundary.
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    points: i64,

    /// Output text file for the coordinates.
    #[arg(long, default_value = "heart_edge_coordinates.txt")]
    output: PathBuf,

    /// Digits after the decimal point in the coordinate file (6 to 17).
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(6..=17))]
    precision: u8,

    /// Repeat the first point at the end of the coordinate file.
    #[arg(long)]
    close_loop: bool,

    /// Caption drawn on rendered frames.
    #[arg(long, default_value = "I love my husband")]
    message: String,

    /// Write every animation frame as PNG into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Write a single still (marker at the first point) as PNG.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Animation frame rate.
    #[arg(long, default_value_t = 50)]
    fps: u32,

    /// Trips of the ball around the heart.
    #[arg(long, default_value_t = 1)]
    loops: u32,

    /// Points the ball advances per frame.
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// JSON file with render settings overrides.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Font file for the caption (defaults to a system sans-serif face).
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let curve = generate(cli.points).context("generate heart curve")?;

    let opts = WriteOptions {
        precision: Precision::Fixed(cli.precision),
        close_loop: cli.close_loop,
    };
    store::coords::write_with(&cli.output, curve.points(), &opts)
        .with_context(|| format!("save coordinates to '{}'", cli.output.display()))?;
    eprintln!("wrote {}", cli.output.display());

    if cli.frames_dir.is_none() && cli.preview.is_none() {
        return Ok(());
    }

    let mut settings = match &cli.settings {
        Some(path) => RenderSettings::from_json_file(path)?,
        None => RenderSettings::default(),
    };
    if cli.font.is_some() {
        settings.font_path = cli.font.clone();
    }

    let mut ctx = RenderContext::new(settings).context("create render context")?;
    let base = Scene::new(curve.into_points(), DisplayMode::Line).with_caption(cli.message);

    if let Some(path) = &cli.preview {
        let frame = ctx.render(&base.clone().with_marker(0))?;
        write_png(&frame, path)?;
        eprintln!("wrote {}", path.display());
    }

    let Some(dir) = &cli.frames_dir else {
        return Ok(());
    };

    let anim = AnimationSettings {
        fps: Fps::new(cli.fps, 1)?,
        loops: cli.loops,
        stride: cli.stride,
    };
    let mut sink = PngSequenceSink::new(dir);
    let stats = animate(&mut ctx, &base, &anim, &mut sink).context("render animation")?;

    eprintln!(
        "wrote {} frames to {} ({:.2}s at {} fps)",
        stats.frames,
        dir.display(),
        stats.duration.as_secs_f64(),
        cli.fps
    );
    Ok(())
}
