// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Criterion benchmarks for the labelscan pipeline. Benchmarks one full
// frame pass (segmentation through letterboxing) on a synthetic frame.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use labelscan_core::{Config, Frame, PixelOrder};
use labelscan_pipeline::LabelScanner;

/// Build a 640x480 BGRA frame with a pale label rectangle on a saturated
/// belt-coloured background (the same pattern the unit tests use).
fn synthetic_frame() -> Frame {
    let mut image = RgbImage::from_pixel(640, 480, Rgb([20u8, 200, 30]));
    for y in 90..390 {
        for x in 170..470 {
            image.put_pixel(x, y, Rgb([200u8, 210, 205]));
        }
    }
    let mut data = Vec::with_capacity(640 * 480 * 4);
    for Rgb([r, g, b]) in image.pixels() {
        data.extend_from_slice(&[*b, *g, *r, 255]);
    }
    Frame::from_raw(640, 480, PixelOrder::Bgra, data).expect("valid frame")
}

fn bench_scan_frame(c: &mut Criterion) {
    let scanner = LabelScanner::new(Config::default()).expect("valid config");
    let frame = synthetic_frame();

    c.bench_function("scan_frame (640x480)", |b| {
        b.iter(|| {
            let canvas = scanner.scan_frame(black_box(&frame)).expect("label found");
            black_box(canvas);
        });
    });
}

fn bench_detection_miss(c: &mut Criterion) {
    let scanner = LabelScanner::new(Config::default()).expect("valid config");
    // A frame with no in-band pixels exercises the short-circuit path, which
    // is the realistic cadence between labels on the belt.
    let empty = Frame::from_raw(640, 480, PixelOrder::Bgra, vec![0u8; 640 * 480 * 4])
        .expect("valid frame");

    c.bench_function("scan_frame miss (640x480)", |b| {
        b.iter(|| {
            let result = scanner.scan_frame(black_box(&empty));
            black_box(result.is_err());
        });
    });
}

criterion_group!(benches, bench_scan_frame, bench_detection_miss);
criterion_main!(benches);
