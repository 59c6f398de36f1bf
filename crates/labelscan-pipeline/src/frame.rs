// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Byte-layout adapters between raw device buffers and working images.
//
// The frame source hands over an opaque fixed-stride buffer; the display sink
// expects an exact byte layout back. Everything in between operates on
// `image::RgbImage`.

use image::{Rgb, RgbImage};
use labelscan_core::{DisplayConfig, Frame, OutputCanvas, PixelOrder};

/// Decode a raw frame into a working RGB image.
///
/// A BGRA frame has its alpha channel dropped here, so the rest of the
/// pipeline only ever sees three channels. The frame itself is left intact.
pub fn decode_frame(frame: &Frame) -> RgbImage {
    let stride = frame.order.channels();
    RgbImage::from_fn(frame.width, frame.height, |x, y| {
        let i = (y as usize * frame.width as usize + x as usize) * stride;
        match frame.order {
            PixelOrder::Rgb => Rgb([frame.data[i], frame.data[i + 1], frame.data[i + 2]]),
            PixelOrder::Bgra => Rgb([frame.data[i + 2], frame.data[i + 1], frame.data[i]]),
        }
    })
}

/// Encode a working image into the byte layout the display sink declared.
///
/// BGRA output carries a fully opaque alpha channel.
pub fn encode_canvas(image: &RgbImage, order: PixelOrder) -> OutputCanvas {
    let data = match order {
        PixelOrder::Rgb => image.as_raw().clone(),
        PixelOrder::Bgra => {
            let mut bytes = Vec::with_capacity(image.len() / 3 * 4);
            for Rgb([r, g, b]) in image.pixels() {
                bytes.extend_from_slice(&[*b, *g, *r, 255]);
            }
            bytes
        }
    };
    OutputCanvas {
        width: image.width(),
        height: image.height(),
        order,
        data,
    }
}

/// The uniform canvas shown when no valid label was detected in a frame.
///
/// Same dimensions and byte layout as the success-path canvas, so the display
/// sink never needs to branch on shape.
pub fn fallback_canvas(display: &DisplayConfig) -> OutputCanvas {
    let [r, g, b] = display.fallback_color;
    let image = RgbImage::from_pixel(display.width, display.height, Rgb([r, g, b]));
    encode_canvas(&image, display.order)
}
