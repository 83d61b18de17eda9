// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour tracing — extract external closed boundaries from a binary edge
// map and reduce each to a simplified polygon.

use image::GrayImage;
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use scanwerk_core::types::{Point2, shoelace_area};
use tracing::{debug, instrument};

/// Trace closed boundaries in an edge map and simplify each to a polygon.
///
/// Only external contours are considered, so interior markings (text,
/// rules, stamps) cannot compete with the document edge. Each contour is
/// simplified with a Ramer-Douglas-Peucker tolerance of
/// `tolerance_ratio * perimeter`. Every returned polygon is simple with at
/// least 3 vertices; degenerate zero-area contours are dropped.
#[instrument(skip(edges), fields(width = edges.width(), height = edges.height()))]
pub fn find_polygons(edges: &GrayImage, tolerance_ratio: f64) -> Vec<Vec<Point2>> {
    let contours: Vec<Contour<i32>> = find_contours(edges);
    let traced = contours.len();

    let mut polygons = Vec::new();
    for contour in contours {
        if contour.border_type != BorderType::Outer {
            continue;
        }
        if contour.points.len() < 3 {
            continue;
        }

        let perimeter = arc_length(&contour.points, true);
        let simplified = approximate_polygon_dp(&contour.points, tolerance_ratio * perimeter, true);
        if simplified.len() < 3 {
            continue;
        }

        let polygon: Vec<Point2> = simplified
            .iter()
            .map(|p| Point2::new(f64::from(p.x), f64::from(p.y)))
            .collect();
        if shoelace_area(&polygon) == 0.0 {
            continue;
        }
        polygons.push(polygon);
    }

    debug!(traced, kept = polygons.len(), "Contours simplified");
    polygons
}
