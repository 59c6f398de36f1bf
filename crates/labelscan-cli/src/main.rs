// SPDX-License-Identifier: PMPL-1.0-or-later
//
// labelscan — Standalone debug tool for the label scanning pipeline.
//
// Runs segmentation and rectification over a single input image and writes
// the intermediate and final results next to each other, so detection
// parameters can be tuned without the capture loop. Not part of the
// real-time pipeline contract.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use labelscan_core::Config;
use labelscan_pipeline::letterbox::resize_and_letterbox;
use labelscan_pipeline::quad::draw_quad_overlay;
use labelscan_pipeline::segment::segment_by_color;
use labelscan_pipeline::LabelScanner;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "labelscan")]
#[command(about = "Detect and rectify a label in a single image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    #[arg(short, long)]
    image: PathBuf,

    /// Optional JSON configuration file (defaults match the reference rig).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write results into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the segmentation mask and the contour overlay.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "labelscan failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let scanner = LabelScanner::new(config)?;

    let image = image::open(&cli.image)?.to_rgb8();
    tracing::info!(
        path = %cli.image.display(),
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );

    std::fs::create_dir_all(&cli.out_dir)?;

    if cli.debug {
        let mask = segment_by_color(&image, &scanner.config().detector.hsv);
        let mask_path = cli.out_dir.join("mask.png");
        mask.save(&mask_path)?;
        tracing::info!(path = %mask_path.display(), "Segmentation mask written");

        if let Ok(corners) = scanner.detect_corners(&image) {
            let mut overlay = image.clone();
            draw_quad_overlay(&mut overlay, &corners);
            let overlay_path = cli.out_dir.join("contours.png");
            overlay.save(&overlay_path)?;
            tracing::info!(path = %overlay_path.display(), "Contour overlay written");
        }
    }

    let rectified = scanner.rectify_image(&image)?;
    let rectified_path = cli.out_dir.join("rectified.png");
    rectified.save(&rectified_path)?;
    tracing::info!(
        path = %rectified_path.display(),
        width = rectified.width(),
        height = rectified.height(),
        "Rectified label written"
    );

    let display = &scanner.config().display;
    let canvas = resize_and_letterbox(&rectified, display.height, display.width);
    let canvas_path = cli.out_dir.join("display.png");
    canvas.save(&canvas_path)?;
    tracing::info!(path = %canvas_path.display(), "Letterboxed canvas written");

    Ok(())
}
