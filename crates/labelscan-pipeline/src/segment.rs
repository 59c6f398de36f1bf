// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Colour-based segmentation: transform a frame to HSV and keep the pixels
// inside the configured band.

use image::{GrayImage, Luma, RgbImage};
use labelscan_core::HsvBounds;

/// Convert one RGB pixel to HSV in the OpenCV 8-bit convention:
/// hue in [0, 180] (degrees halved), saturation and value in [0, 255].
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * delta / v };

    let h_deg = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    [(h_deg / 2.0).round() as u8, s.round() as u8, v.round() as u8]
}

/// Produce a binary mask of the pixels whose HSV value falls inside `band`,
/// inclusive componentwise. Foreground is 255, background 0.
///
/// Never fails: an empty mask is a valid outcome, surfaced downstream as a
/// detection failure once no contours are found.
pub fn segment_by_color(image: &RgbImage, band: &HsvBounds) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let hsv = rgb_to_hsv(image.get_pixel(x, y).0);
        if band.contains(hsv) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
