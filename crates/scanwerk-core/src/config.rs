// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, ScanwerkError};
use crate::types::{DocumentClass, PostProcessPolicy};

/// Tunable parameters for one pipeline invocation.
///
/// The defaults reproduce the processing-resolution values the pipeline was
/// tuned with: a 5x5 smoothing kernel, Canny thresholds 75/200, a 1000 px²
/// minimum contour area, and a polygon simplification tolerance of 2% of each
/// contour's perimeter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Side length of the Gaussian smoothing kernel, in pixels. Must be odd.
    pub blur_kernel: u32,
    /// Lower Canny hysteresis threshold.
    pub edge_low_threshold: f32,
    /// Upper Canny hysteresis threshold.
    pub edge_high_threshold: f32,
    /// Contours with a smaller area are rejected as noise.
    pub min_contour_area: f64,
    /// Polygon simplification tolerance as a fraction of contour perimeter.
    /// Smaller over-fits jagged edges; larger collapses true corners.
    pub approx_tolerance_ratio: f64,
    /// Per-class post-processing policies. Classes absent from the table get
    /// [`PostProcessPolicy::Identity`].
    pub post_process: HashMap<DocumentClass, PostProcessPolicy>,
}

impl ScanConfig {
    /// Policy for a document class; identity when the class is not listed.
    pub fn policy_for(&self, class: &DocumentClass) -> PostProcessPolicy {
        self.post_process.get(class).copied().unwrap_or_default()
    }

    /// Register a class for Otsu binarization after rectification.
    pub fn binarize_class(mut self, class: impl Into<DocumentClass>) -> Self {
        self.post_process
            .insert(class.into(), PostProcessPolicy::Binarize);
        self
    }

    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(ScanwerkError::InvalidInput(format!(
                "blur kernel must be odd and positive, got {}",
                self.blur_kernel
            )));
        }
        if !(self.edge_low_threshold > 0.0 && self.edge_high_threshold > self.edge_low_threshold) {
            return Err(ScanwerkError::InvalidInput(format!(
                "Canny thresholds must satisfy 0 < low < high, got {}/{}",
                self.edge_low_threshold, self.edge_high_threshold
            )));
        }
        if self.min_contour_area < 0.0 {
            return Err(ScanwerkError::InvalidInput(format!(
                "minimum contour area must be non-negative, got {}",
                self.min_contour_area
            )));
        }
        if !(self.approx_tolerance_ratio > 0.0 && self.approx_tolerance_ratio < 1.0) {
            return Err(ScanwerkError::InvalidInput(format!(
                "approximation tolerance ratio must be in (0, 1), got {}",
                self.approx_tolerance_ratio
            )));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            edge_low_threshold: 75.0,
            edge_high_threshold: 200.0,
            min_contour_area: 1000.0,
            approx_tolerance_ratio: 0.02,
            post_process: HashMap::new(),
        }
    }
}
