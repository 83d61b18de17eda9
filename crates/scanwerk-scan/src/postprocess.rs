// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-processing — class-conditional binarization of rectified captures.

use image::{DynamicImage, GrayImage, Luma};
use scanwerk_core::config::ScanConfig;
use scanwerk_core::types::{DocumentClass, PostProcessPolicy};
use tracing::{debug, instrument};

/// Apply the configured post-processing policy for a document class.
///
/// Classes mapped to [`PostProcessPolicy::Binarize`] get grayscale
/// conversion plus global Otsu binarization, producing the pure black/white
/// output wanted for text-contract archival. Every other class passes
/// through unchanged.
#[instrument(skip(config, image), fields(class = %class))]
pub fn apply_policy(
    config: &ScanConfig,
    class: &DocumentClass,
    image: DynamicImage,
) -> DynamicImage {
    match config.policy_for(class) {
        PostProcessPolicy::Identity => image,
        PostProcessPolicy::Binarize => binarize_otsu(&image),
    }
}

/// Global binarization with an automatically chosen threshold.
///
/// The threshold maximizes the between-class variance of the dark and bright
/// pixel populations (Otsu's method), which is equivalent to minimizing the
/// intra-class variance.
pub fn binarize_otsu(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let threshold = otsu_threshold(&gray);
    debug!(threshold, "Otsu threshold selected");

    let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] < threshold {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    DynamicImage::ImageLuma8(binary)
}

/// Otsu threshold of a grayscale image, from its 256-bin histogram.
fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total = gray.width() as u64 * gray.height() as u64;
    if total == 0 {
        return 128;
    }
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut background_count: u64 = 0;
    let mut background_sum: f64 = 0.0;
    let mut best = (0u8, 0.0f64);

    for (value, &count) in histogram.iter().enumerate() {
        background_count += count;
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }
        background_sum += value as f64 * count as f64;

        let mean_background = background_sum / background_count as f64;
        let mean_foreground = (weighted_sum - background_sum) / foreground_count as f64;
        let between_variance = background_count as f64
            * foreground_count as f64
            * (mean_background - mean_foreground).powi(2);

        if between_variance > best.1 {
            best = (value as u8, between_variance);
        }
    }

    best.0
}
