// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the scanwerk-scan pipeline. Benchmarks the full
// detection + rectification chain on a small synthetic capture.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};

use scanwerk_core::{DocumentClass, ScanConfig};
use scanwerk_scan::DocumentScanner;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark the full scan pipeline on a 200x250 synthetic capture.
///
/// The capture is a bright rectangle on a dark background (a clean document
/// photo), so the bench exercises the detected path end to end: edge map,
/// contour tracing, quadrilateral selection, and the perspective warp.
fn bench_scan_pipeline(c: &mut Criterion) {
    let (width, height) = (200u32, 250u32);
    let mut img = GrayImage::from_pixel(width, height, Luma([25u8]));
    for y in 20..230 {
        for x in 30..170 {
            img.put_pixel(x, y, Luma([235u8]));
        }
    }
    let capture = DynamicImage::ImageLuma8(img);

    let scanner = DocumentScanner::new(ScanConfig::default());
    let class = DocumentClass::new("employment-contract");

    c.bench_function("scan_pipeline (200x250)", |b| {
        b.iter(|| {
            let out = scanner
                .scan(black_box(&capture), &class)
                .expect("synthetic capture scans cleanly");
            black_box(out.image);
        });
    });
}

criterion_group!(benches, bench_scan_pipeline);
criterion_main!(benches);
