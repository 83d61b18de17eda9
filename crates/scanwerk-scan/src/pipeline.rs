// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The capture pipeline: edge map -> contour tracing -> quadrilateral
// selection -> corner ordering -> rectification -> post-processing, with
// fallback recovery at the boundary.

use image::DynamicImage;
use scanwerk_core::config::ScanConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::{DetectionQuality, DocumentClass, Quad};
use tracing::{info, instrument, warn};

use crate::detect::{contour, edges, quad};
use crate::postprocess;
use crate::rectify;

/// Result of one capture: the image to keep, how detection went, and the
/// quadrilateral that was used (when one was found).
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub image: DynamicImage,
    pub quality: DetectionQuality,
    pub quad: Option<Quad>,
}

/// The document scanner: configuration plus pure per-capture calls.
///
/// Each [`scan`](Self::scan) invocation is a pure function from input image
/// and config to output image and status; no state is shared between
/// captures, and every intermediate buffer (edge map, contour set,
/// projection) is dropped when the call returns, on success and failure
/// alike.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Detect the document quadrilateral in a capture.
    ///
    /// Fails with [`ScanwerkError::NoQuadrilateralFound`] when no 4-vertex
    /// contour above the area threshold exists, and with
    /// [`ScanwerkError::InvalidInput`] for a zero-sized image or an
    /// unusable configuration.
    #[instrument(skip(self, image))]
    pub fn detect(&self, image: &DynamicImage) -> Result<Quad> {
        self.config.validate()?;

        let edge_map = edges::edge_map(
            image,
            self.config.blur_kernel,
            self.config.edge_low_threshold,
            self.config.edge_high_threshold,
        )?;
        let polygons = contour::find_polygons(&edge_map, self.config.approx_tolerance_ratio);
        let corners = quad::select_quadrilateral(&polygons, self.config.min_contour_area)
            .ok_or(ScanwerkError::NoQuadrilateralFound)?;

        Ok(Quad::from_unordered(corners))
    }

    /// Run the full pipeline on one capture.
    ///
    /// Recoverable failures are absorbed here, matching what the capture UI
    /// needs: if no quadrilateral is found, or the perspective transform is
    /// degenerate, the original image is returned with the corresponding
    /// fallback flag instead of an error. A zero-sized or malformed input is
    /// fatal for the call and produces no partial output.
    #[instrument(skip(self, image), fields(class = %class, width = image.width(), height = image.height()))]
    pub fn scan(&self, image: &DynamicImage, class: &DocumentClass) -> Result<ScanOutput> {
        let detected = match self.detect(image) {
            Ok(quad) => quad,
            Err(ScanwerkError::NoQuadrilateralFound) => {
                warn!("No document outline detected; keeping the uncorrected capture");
                return Ok(ScanOutput {
                    image: image.clone(),
                    quality: DetectionQuality::FallbackUndetected,
                    quad: None,
                });
            }
            Err(err) => return Err(err),
        };

        match rectify::rectify(image, &detected) {
            Ok(rectified) => {
                let finished = postprocess::apply_policy(&self.config, class, rectified);
                info!(
                    out_width = finished.width(),
                    out_height = finished.height(),
                    "Capture rectified"
                );
                Ok(ScanOutput {
                    image: finished,
                    quality: DetectionQuality::Detected,
                    quad: Some(detected),
                })
            }
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Rectification failed; keeping the uncorrected capture");
                Ok(ScanOutput {
                    image: image.clone(),
                    quality: DetectionQuality::FallbackError,
                    quad: Some(detected),
                })
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    /// A synthetic capture: bright document on a dark desk.
    fn synthetic_capture() -> DynamicImage {
        let (w, h) = (400u32, 500u32);
        let mut img = GrayImage::from_pixel(w, h, Luma([25u8]));
        for y in 40..460 {
            for x in 60..340 {
                img.put_pixel(x, y, Luma([235u8]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    fn class() -> DocumentClass {
        DocumentClass::new("employment-contract")
    }

    #[test]
    fn blank_canvas_falls_back_undetected() {
        let scanner = DocumentScanner::default();
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(300, 300, Luma([250u8])));

        let out = scanner.scan(&blank, &class()).unwrap();
        assert_eq!(out.quality, DetectionQuality::FallbackUndetected);
        assert!(out.quad.is_none());
        // The uncorrected capture is kept untouched.
        assert_eq!((out.image.width(), out.image.height()), (300, 300));
    }

    #[test]
    fn synthetic_document_is_detected_and_rectified() {
        let scanner = DocumentScanner::default();
        let out = scanner.scan(&synthetic_capture(), &class()).unwrap();

        assert_eq!(out.quality, DetectionQuality::Detected);
        let quad = out.quad.expect("a quadrilateral was detected");
        assert!(quad.area() > 100_000.0, "area was {}", quad.area());

        // The rectified output matches the drawn document region (280x420)
        // to within edge-localization tolerance.
        assert!((out.image.width() as i64 - 280).abs() <= 6);
        assert!((out.image.height() as i64 - 420).abs() <= 6);
    }

    #[test]
    fn detect_orders_corners_for_upright_document() {
        let scanner = DocumentScanner::default();
        let quad = scanner.detect(&synthetic_capture()).unwrap();

        let [tl, tr, br, bl] = quad.corners();
        assert!(tl.x < tr.x && tl.y < bl.y);
        assert!(br.x > bl.x && br.y > tr.y);
        // Corners land near the drawn rectangle (60,40)-(340,460).
        assert!(tl.distance(&scanwerk_core::types::Point2::new(60.0, 40.0)) < 8.0);
        assert!(br.distance(&scanwerk_core::types::Point2::new(339.0, 459.0)) < 8.0);
    }

    #[test]
    fn zero_sized_input_is_fatal() {
        let scanner = DocumentScanner::default();
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        let err = scanner.scan(&empty, &class()).unwrap_err();
        assert!(matches!(err, ScanwerkError::InvalidInput(_)));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let scanner = DocumentScanner::new(ScanConfig {
            blur_kernel: 4,
            ..ScanConfig::default()
        });
        let err = scanner.scan(&synthetic_capture(), &class()).unwrap_err();
        assert!(matches!(err, ScanwerkError::InvalidInput(_)));
    }

    #[test]
    fn binarize_class_produces_black_and_white_output() {
        let scanner =
            DocumentScanner::new(ScanConfig::default().binarize_class("employment-contract"));
        let out = scanner.scan(&synthetic_capture(), &class()).unwrap();

        assert_eq!(out.quality, DetectionQuality::Detected);
        let gray = out.image.to_luma8();
        assert!(gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn unregistered_class_keeps_grayscale_levels() {
        let scanner =
            DocumentScanner::new(ScanConfig::default().binarize_class("employment-contract"));
        let out = scanner
            .scan(&synthetic_capture(), &DocumentClass::new("id-card-front"))
            .unwrap();

        assert_eq!(out.quality, DetectionQuality::Detected);
        // Interior of the document keeps its captured tone rather than
        // collapsing to pure white.
        let gray = out.image.to_luma8();
        let center = gray.get_pixel(gray.width() / 2, gray.height() / 2).0[0];
        assert!((200..=255).contains(&center));
        assert_ne!(center, 255);
    }
}
