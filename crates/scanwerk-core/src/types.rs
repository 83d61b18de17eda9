// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanwerk rectification pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureId(pub Uuid);

impl CaptureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaptureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CaptureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in image space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A document quadrilateral with corners in a fixed semantic order:
/// top-left, top-right, bottom-right, bottom-left.
///
/// Construct via [`Quad::from_unordered`] so the ordering invariant holds by
/// construction. The corners approximate a convex, simple shape; convexity is
/// not re-validated after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    corners: [Point2; 4],
}

impl Quad {
    /// Assign four unordered corners to their semantic roles.
    ///
    /// The labeling rule: the point with the minimum `x + y` is top-left and
    /// the maximum is bottom-right; the point with the minimum `y - x` is
    /// top-right and the maximum is bottom-left. On a tie the first point in
    /// input order wins (stable; strict comparisons keep the earlier point).
    pub fn from_unordered(points: [Point2; 4]) -> Self {
        let sums = points.map(|p| p.x + p.y);
        let diffs = points.map(|p| p.y - p.x);

        let mut tl = 0;
        let mut br = 0;
        let mut tr = 0;
        let mut bl = 0;
        for i in 1..4 {
            if sums[i] < sums[tl] {
                tl = i;
            }
            if sums[i] > sums[br] {
                br = i;
            }
            if diffs[i] < diffs[tr] {
                tr = i;
            }
            if diffs[i] > diffs[bl] {
                bl = i;
            }
        }

        Self {
            corners: [points[tl], points[tr], points[br], points[bl]],
        }
    }

    pub fn top_left(&self) -> Point2 {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point2 {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point2 {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point2 {
        self.corners[3]
    }

    /// Corners in (TL, TR, BR, BL) order.
    pub fn corners(&self) -> [Point2; 4] {
        self.corners
    }

    /// Area of the quadrilateral via the shoelace formula.
    pub fn area(&self) -> f64 {
        shoelace_area(&self.corners)
    }
}

/// Area of a closed polygon via the shoelace formula. The vertices should be
/// in order (CW or CCW).
pub fn shoelace_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Caller-defined identifier for a document class (e.g. a checklist entry
/// such as "employment-contract"). The class set is caller data; nothing in
/// the pipeline is keyed to a literal class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentClass(pub String);

impl DocumentClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentClass {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Post-processing applied to a rectified image, selected per document class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostProcessPolicy {
    /// Pass the rectified image through unchanged.
    #[default]
    Identity,
    /// Grayscale conversion followed by global Otsu binarization, for
    /// text-contract archival as pure black/white.
    Binarize,
}

/// How well the detection stage did for a capture. Surfaced to the output
/// collaborator alongside the image so it can present appropriate feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionQuality {
    /// A document quadrilateral was found and the image was rectified.
    Detected,
    /// No quadrilateral candidate survived filtering; the uncorrected
    /// capture was kept.
    FallbackUndetected,
    /// Detection succeeded but the transform was degenerate; the uncorrected
    /// capture was kept.
    FallbackError,
}

impl DetectionQuality {
    /// Stable string form of the flag, for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::FallbackUndetected => "fallback-undetected",
            Self::FallbackError => "fallback-error",
        }
    }

    /// Whether the capture fell back to the uncorrected image.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Detected)
    }
}

impl std::fmt::Display for DetectionQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scan record's provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSource {
    /// Produced by the automatic detection/rectification pipeline.
    Pipeline,
    /// Produced by the external manual crop tool.
    ManualCrop,
}

/// One stored capture for a document class within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: CaptureId,
    pub class: DocumentClass,
    pub source: CaptureSource,
    /// Pipeline quality flag; `None` for manual crops, which carry no
    /// detection outcome.
    pub quality: Option<DetectionQuality>,
    pub captured_at: DateTime<Utc>,
}
