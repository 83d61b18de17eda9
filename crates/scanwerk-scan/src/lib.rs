// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-scan — Document-boundary detection and perspective rectification.
//
// Provides the capture pipeline: edge mapping, contour tracing, quadrilateral
// selection, perspective rectification, and class-conditional post-processing.

pub mod detect;
pub mod pipeline;
pub mod postprocess;
pub mod rectify;

// Re-export the primary entry points so callers can use `scanwerk_scan::DocumentScanner`.
pub use pipeline::{DocumentScanner, ScanOutput};
