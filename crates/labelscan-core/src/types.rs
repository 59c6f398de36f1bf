// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Core domain types for the label scanning pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Byte layout of a pixel buffer exchanged with a camera or display device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelOrder {
    /// Three bytes per pixel: red, green, blue.
    Rgb,
    /// Four bytes per pixel: blue, green, red, alpha.
    Bgra,
}

impl PixelOrder {
    /// Number of bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Bgra => 4,
        }
    }
}

/// An inclusive hue/saturation/value band used to segment the label region.
///
/// Components follow the OpenCV 8-bit convention: hue in [0, 180],
/// saturation and value in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvBounds {
    /// Whether an HSV triple falls inside the band, inclusive componentwise.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }

    /// Check the band is well-formed: each lower component must not exceed
    /// the corresponding upper one, and hue must stay within [0, 180].
    pub fn validate(&self) -> Result<()> {
        for i in 0..3 {
            if self.lower[i] > self.upper[i] {
                return Err(ScanError::Config(format!(
                    "HSV lower bound {} exceeds upper bound {} in component {}",
                    self.lower[i], self.upper[i], i
                )));
            }
        }
        if self.lower[0] > 180 || self.upper[0] > 180 {
            return Err(ScanError::Config(
                "HSV hue bounds must lie within [0, 180]".into(),
            ));
        }
        Ok(())
    }
}

/// A raw pixel buffer as delivered by the frame source collaborator.
///
/// The buffer layout is opaque fixed-stride `order` bytes per pixel, row
/// major. Decoding into a working image happens in the pipeline crate; a
/// `Frame` itself is never mutated by the pipeline.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub order: PixelOrder,
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw buffer, checking that its length matches the declared
    /// dimensions and pixel order.
    pub fn from_raw(width: u32, height: u32, order: PixelOrder, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * order.channels();
        if data.len() != expected {
            return Err(ScanError::Image(format!(
                "frame buffer is {} bytes, expected {} for {}x{} {:?}",
                data.len(),
                expected,
                width,
                height,
                order
            )));
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }
}

/// The pipeline's final artifact: a fixed-size pixel buffer in the exact
/// byte layout the display sink declared.
///
/// Created fresh per frame and handed to the display; never reused.
#[derive(Debug, Clone)]
pub struct OutputCanvas {
    pub width: u32,
    pub height: u32,
    pub order: PixelOrder,
    pub data: Vec<u8>,
}
