// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Scanner configuration. Loaded once at startup; malformed values are a
// startup-time fatal error, never part of the per-frame hot path.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::types::{HsvBounds, PixelOrder};

/// Parameters of the detection and rectification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// HSV band isolating the label region (OpenCV 8-bit convention).
    pub hsv: HsvBounds,
    /// Minimum acceptable width/height of a detected label, in pixels.
    pub min_dimension: u32,
    /// Maximum acceptable aspect ratio (long side over short side).
    pub max_aspect_ratio: f64,
    /// Polygon simplification tolerance as a fraction of contour perimeter.
    pub simplify_tolerance: f64,
    /// How many of the largest contours to consider per frame.
    pub max_candidates: usize,
    /// Draw the accepted quadrilateral onto a display copy for inspection.
    pub debug_overlay: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            hsv: HsvBounds {
                lower: [27, 0, 66],
                upper: [180, 38, 255],
            },
            min_dimension: 250,
            max_aspect_ratio: 3.0,
            simplify_tolerance: 0.01,
            max_candidates: 3,
            debug_overlay: false,
        }
    }
}

/// Geometry and byte layout of the display sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub order: PixelOrder,
    /// RGB colour of the fallback canvas shown when no label is detected.
    pub fallback_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            order: PixelOrder::Bgra,
            fallback_color: [0, 0, 255],
        }
    }
}

/// Complete scanner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub detector: DetectorConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed configuration before the pipeline ever runs.
    pub fn validate(&self) -> Result<()> {
        self.detector.hsv.validate()?;
        if self.detector.min_dimension == 0 {
            return Err(ScanError::Config("min_dimension must be at least 1".into()));
        }
        if self.detector.max_aspect_ratio < 1.0 {
            return Err(ScanError::Config(format!(
                "max_aspect_ratio must be at least 1.0, got {}",
                self.detector.max_aspect_ratio
            )));
        }
        if !(self.detector.simplify_tolerance > 0.0 && self.detector.simplify_tolerance < 1.0) {
            return Err(ScanError::Config(format!(
                "simplify_tolerance must lie in (0, 1), got {}",
                self.detector.simplify_tolerance
            )));
        }
        if self.detector.max_candidates == 0 {
            return Err(ScanError::Config("max_candidates must be at least 1".into()));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ScanError::Config(format!(
                "display canvas must be non-empty, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        Ok(())
    }
}
