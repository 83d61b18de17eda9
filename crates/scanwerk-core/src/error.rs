// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanwerk.

use thiserror::Error;

/// Top-level error type for all Scanwerk operations.
#[derive(Debug, Error)]
pub enum ScanwerkError {
    // -- Detection errors --
    /// No 4-vertex contour above the minimum area threshold was found.
    /// Recoverable: the caller falls back to the uncorrected capture.
    #[error("no document quadrilateral found")]
    NoQuadrilateralFound,

    /// The 4-point correspondence was singular or near-singular (e.g. three
    /// collinear corners). Recoverable: same fallback as above.
    #[error("degenerate perspective transform: {0}")]
    DegenerateTransform(String),

    // -- Input errors --
    /// Zero-sized or otherwise malformed input image. Fatal for the call;
    /// no partial output is produced.
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    // -- Codec / IO errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanwerkError {
    /// Whether the pipeline boundary may recover from this error by
    /// substituting the original, unrectified image.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoQuadrilateralFound | Self::DegenerateTransform(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanwerkError>;
