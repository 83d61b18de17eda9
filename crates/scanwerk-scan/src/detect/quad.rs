// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection — filter simplified polygons down to 4-vertex
// candidates above a minimum area and pick the largest.

use scanwerk_core::types::{Point2, shoelace_area};
use tracing::{debug, instrument};

/// Select the document quadrilateral from a set of simplified polygons.
///
/// Polygons with a vertex count other than 4, or with an area below
/// `min_area`, are discarded as noise. Among the survivors the one with the
/// maximum area wins. Returns `None` when no candidate survives; callers
/// must treat that as "no document detected", not as a partial result.
/// The returned corners are unordered.
#[instrument(skip(polygons), fields(candidates = polygons.len()))]
pub fn select_quadrilateral(polygons: &[Vec<Point2>], min_area: f64) -> Option<[Point2; 4]> {
    let mut best: Option<([Point2; 4], f64)> = None;

    for polygon in polygons {
        let [a, b, c, d] = polygon.as_slice() else {
            continue;
        };
        let area = shoelace_area(polygon);
        if area < min_area {
            continue;
        }
        if best.as_ref().is_none_or(|(_, best_area)| area > *best_area) {
            best = Some(([*a, *b, *c, *d], area));
        }
    }

    match &best {
        Some((_, area)) => debug!(area = *area, "Quadrilateral selected"),
        None => debug!("No quadrilateral candidate survived filtering"),
    }
    best.map(|(corners, _)| corners)
}
