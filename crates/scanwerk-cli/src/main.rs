// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line driver: decode a capture, run the rectification pipeline,
// write the corrected image, and report the detection-quality flag.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use scanwerk_core::config::ScanConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::guidance;
use scanwerk_core::types::{DetectionQuality, DocumentClass};
use scanwerk_scan::DocumentScanner;

#[derive(Parser, Debug)]
#[command(
    name = "scanwerk",
    version,
    about = "Detect a photographed document's outline and rectify it to an upright page"
)]
struct Args {
    /// Input capture (JPEG, PNG, TIFF, ...).
    input: PathBuf,

    /// Output path for the corrected image; format inferred from extension.
    #[arg(short, long)]
    output: PathBuf,

    /// Document class of this capture.
    #[arg(long, default_value = "unclassified")]
    class: String,

    /// Classes that get black/white binarization after rectification.
    /// Repeatable.
    #[arg(long = "binarize-class", value_name = "CLASS")]
    binarize_classes: Vec<String>,

    /// Gaussian smoothing kernel side length in pixels (odd).
    #[arg(long, default_value_t = 5)]
    blur_kernel: u32,

    /// Lower Canny hysteresis threshold.
    #[arg(long, default_value_t = 75.0)]
    edge_low: f32,

    /// Upper Canny hysteresis threshold.
    #[arg(long, default_value_t = 200.0)]
    edge_high: f32,

    /// Minimum contour area in square pixels.
    #[arg(long, default_value_t = 1000.0)]
    min_area: f64,

    /// Polygon simplification tolerance as a fraction of contour perimeter.
    #[arg(long, default_value_t = 0.02)]
    tolerance: f64,
}

impl Args {
    fn config(&self) -> ScanConfig {
        let mut config = ScanConfig {
            blur_kernel: self.blur_kernel,
            edge_low_threshold: self.edge_low,
            edge_high_threshold: self.edge_high,
            min_contour_area: self.min_area,
            approx_tolerance_ratio: self.tolerance,
            ..ScanConfig::default()
        };
        for class in &self.binarize_classes {
            config = config.binarize_class(DocumentClass::new(class));
        }
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(quality) => {
            let note = guidance::for_quality(quality);
            println!("{quality}: {}", note.message);
            if quality.is_fallback() {
                eprintln!("{}", note.suggestion);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let note = guidance::for_error(&err);
            eprintln!("error: {err}");
            eprintln!("{} {}", note.message, note.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<DetectionQuality> {
    let image = image::open(&args.input).map_err(|err| {
        ScanwerkError::ImageError(format!("failed to open {}: {}", args.input.display(), err))
    })?;
    info!(
        input = %args.input.display(),
        width = image.width(),
        height = image.height(),
        "Capture loaded"
    );

    let scanner = DocumentScanner::new(args.config());
    let output = scanner.scan(&image, &DocumentClass::new(&args.class))?;

    output.image.save(&args.output).map_err(|err| {
        ScanwerkError::ImageError(format!(
            "failed to save image to {}: {}",
            args.output.display(),
            err
        ))
    })?;
    info!(output = %args.output.display(), quality = %output.quality, "Corrected image written");

    Ok(output.quality)
}
