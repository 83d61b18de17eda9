// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — derive the upright target rectangle from an
// ordered quadrilateral, compute the projective mapping, and resample.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use scanwerk_core::error::ScanwerkError;
use scanwerk_core::types::Quad;
use tracing::{debug, instrument};

/// Fill for destination pixels whose source-mapped location falls outside
/// the capture. Should not occur for a correctly fitted quadrilateral, but
/// must be defined. White matches paper margins.
const OUT_OF_BOUNDS_FILL: Rgba<u8> = Rgba([255u8, 255, 255, 255]);

/// Target rectangle dimensions for an ordered quadrilateral: the larger of
/// the two opposing edge lengths in each direction, rounded to pixels.
pub fn target_dimensions(quad: &Quad) -> (u32, u32) {
    let width_top = quad.top_left().distance(&quad.top_right());
    let width_bottom = quad.bottom_left().distance(&quad.bottom_right());
    let height_left = quad.top_left().distance(&quad.bottom_left());
    let height_right = quad.top_right().distance(&quad.bottom_right());

    let width = width_top.max(width_bottom).round() as u32;
    let height = height_left.max(height_right).round() as u32;
    (width, height)
}

/// Resample the capture into an upright rectangle.
///
/// Computes the unique projective mapping taking the quadrilateral's corners
/// to the corners of the target rectangle, then pulls each destination pixel
/// from the source through the inverse mapping with bilinear interpolation.
/// A singular correspondence (e.g. three collinear corners) is a fatal input
/// for this stage and is reported as [`ScanwerkError::DegenerateTransform`];
/// the caller falls back to the uncorrected capture.
#[instrument(skip(image, quad))]
pub fn rectify(image: &DynamicImage, quad: &Quad) -> Result<DynamicImage, ScanwerkError> {
    let (width, height) = target_dimensions(quad);
    if width == 0 || height == 0 {
        return Err(ScanwerkError::DegenerateTransform(format!(
            "target rectangle is empty ({width}x{height})"
        )));
    }

    let [tl, tr, br, bl] = quad.corners();
    let src: [(f32, f32); 4] = [
        (tl.x as f32, tl.y as f32),
        (tr.x as f32, tr.y as f32),
        (br.x as f32, br.y as f32),
        (bl.x as f32, bl.y as f32),
    ];
    let dst: [(f32, f32); 4] = [
        (0.0, 0.0),
        ((width - 1) as f32, 0.0),
        ((width - 1) as f32, (height - 1) as f32),
        (0.0, (height - 1) as f32),
    ];

    let projection = Projection::from_control_points(src, dst).ok_or_else(|| {
        ScanwerkError::DegenerateTransform("singular 4-point correspondence".into())
    })?;

    let source = image.to_rgba8();
    let mut output = RgbaImage::new(width, height);
    warp_into(
        &source,
        &projection,
        Interpolation::Bilinear,
        OUT_OF_BOUNDS_FILL,
        &mut output,
    );

    debug!(width, height, "Rectification complete");
    Ok(DynamicImage::ImageRgba8(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};
    use scanwerk_core::types::Point2;

    fn quad(points: [(f64, f64); 4]) -> Quad {
        Quad::from_unordered(points.map(|(x, y)| Point2::new(x, y)))
    }

    #[test]
    fn axis_aligned_quad_yields_expected_dimensions() {
        let q = quad([(0.0, 0.0), (100.0, 0.0), (100.0, 150.0), (0.0, 150.0)]);
        assert_eq!(target_dimensions(&q), (100, 150));
    }

    #[test]
    fn dimensions_use_the_longer_opposing_edge() {
        // A trapezoid whose bottom edge is longer than its top edge.
        let q = quad([(10.0, 0.0), (90.0, 0.0), (100.0, 200.0), (0.0, 200.0)]);
        let (w, h) = target_dimensions(&q);
        assert_eq!(w, 100);
        assert!(h >= 200);
    }

    #[test]
    fn dimensions_are_positive_for_any_nondegenerate_quad() {
        let q = quad([(3.0, 7.0), (250.0, 12.0), (260.0, 330.0), (5.0, 310.0)]);
        let (w, h) = target_dimensions(&q);
        assert!(w >= 1);
        assert!(h >= 1);
    }

    #[test]
    fn identity_quad_preserves_dimensions_and_content() {
        // Quadrilateral = the image's pixel bounds: rectifying must be a
        // no-op up to interpolation rounding.
        let mut img = RgbImage::from_pixel(100, 150, Rgb([40u8, 90, 160]));
        for y in 0..75 {
            for x in 0..50 {
                img.put_pixel(x, y, Rgb([220u8, 30, 10]));
            }
        }
        let source = DynamicImage::ImageRgb8(img);
        let q = quad([(0.0, 0.0), (99.0, 0.0), (99.0, 149.0), (0.0, 149.0)]);

        let out = rectify(&source, &q).unwrap();
        assert_eq!((out.width(), out.height()), (99, 149));

        // Destination corners map exactly onto source corners, so corner
        // pixels are preserved exactly.
        let out = out.to_rgba8();
        assert_eq!(out.get_pixel(0, 0).0[..3], [220u8, 30, 10]);
        assert_eq!(out.get_pixel(98, 148).0[..3], [40u8, 90, 160]);
    }

    #[test]
    fn axis_aligned_quad_resamples_near_identically() {
        // Quadrilateral spanning the full 100x150 image: the output keeps
        // the source dimensions and interior content survives the resample.
        let mut img = RgbImage::from_pixel(100, 150, Rgb([40u8, 90, 160]));
        for y in 0..75 {
            for x in 0..50 {
                img.put_pixel(x, y, Rgb([220u8, 30, 10]));
            }
        }
        let source = DynamicImage::ImageRgb8(img);
        let q = quad([(0.0, 0.0), (100.0, 0.0), (100.0, 150.0), (0.0, 150.0)]);

        let out = rectify(&source, &q).unwrap();
        assert_eq!((out.width(), out.height()), (100, 150));

        // Pixels well inside each tone block keep their color exactly
        // (bilinear interpolation between equal neighbours).
        let out = out.to_rgba8();
        assert_eq!(out.get_pixel(10, 10).0[..3], [220u8, 30, 10]);
        assert_eq!(out.get_pixel(80, 120).0[..3], [40u8, 90, 160]);
    }

    #[test]
    fn collinear_corners_report_degenerate_transform() {
        let source = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(50, 50, Luma([128u8])));
        // Three of the four points on one line.
        let q = quad([(0.0, 0.0), (50.0, 0.0), (100.0, 0.0), (0.0, 40.0)]);
        let err = rectify(&source, &q).unwrap_err();
        assert!(matches!(err, ScanwerkError::DegenerateTransform(_)));
    }

    #[test]
    fn coincident_corners_report_degenerate_transform() {
        let source = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(50, 50, Luma([128u8])));
        let q = quad([(10.0, 10.0), (10.0, 10.0), (10.0, 10.0), (10.0, 10.0)]);
        let err = rectify(&source, &q).unwrap_err();
        assert!(matches!(err, ScanwerkError::DegenerateTransform(_)));
    }
}
