use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use heartline::{DisplayMode, RenderContext, RenderSettings, Scene, store, write_png};

/// Render heart edge coordinates saved by `heart-animate`.
#[derive(Parser, Debug)]
#[command(name = "heart-view", version)]
struct Cli {
    /// Coordinates text file to read.
    #[arg(long, default_value = "heart_edge_coordinates.txt")]
    input: PathBuf,

    /// How to draw the heart: line, points, or both.
    #[arg(long, default_value = "line")]
    style: DisplayMode,

    /// Caption drawn on the image.
    #[arg(long, default_value = "I love my husband")]
    message: String,

    /// Output PNG path.
    #[arg(long, default_value = "heart_view.png")]
    out: PathBuf,

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

    let points = store::coords::read(&cli.input)
        .with_context(|| format!("could not read coordinates from '{}'", cli.input.display()))?;

    let mut settings = match &cli.settings {
        Some(path) => RenderSettings::from_json_file(path)?,
        None => RenderSettings::default(),
    };
    if cli.font.is_some() {
        settings.font_path = cli.font.clone();
    }

    let mut ctx = RenderContext::new(settings).context("create render context")?;
    let scene = Scene::new(points, cli.style).with_caption(cli.message);
    let frame = ctx.render(&scene)?;
    write_png(&frame, &cli.out)?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
