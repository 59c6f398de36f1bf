// SPDX-License-Identifier: PMPL-1.0-or-later
//
// The composed pipeline: one full pass from raw frame to display canvas.

use image::RgbImage;
use labelscan_core::{Config, Frame, OutputCanvas, Result};
use tracing::{debug, instrument};

use crate::frame::{decode_frame, encode_canvas};
use crate::letterbox::resize_and_letterbox;
use crate::quad::{
    estimate_dimensions, find_document_quad, order_corners, validate_shape, OrderedCorners,
};
use crate::rectify::rectify_document;
use crate::segment::segment_by_color;

/// The label scanning pipeline, parameterised by a validated configuration.
///
/// One invocation per incoming frame, synchronous and single-threaded: the
/// pass runs to completion or fails with a recoverable error, and every
/// intermediate artifact is dropped at the end of the call. Nothing is cached
/// across frames — each detection has distinct geometry.
pub struct LabelScanner {
    config: Config,
}

impl LabelScanner {
    /// Build a scanner. Malformed configuration is rejected here, once, so
    /// the per-frame hot path never revalidates.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locate the label quadrilateral in a frame and return its ordered
    /// corners. The input image is never mutated.
    pub fn detect_corners(&self, image: &RgbImage) -> Result<OrderedCorners> {
        let detector = &self.config.detector;
        let mask = segment_by_color(image, &detector.hsv);
        let quad = find_document_quad(&mask, detector.simplify_tolerance, detector.max_candidates)?;
        Ok(order_corners(quad))
    }

    /// Detect the label and warp it to an upright, aspect-normalized image.
    #[instrument(skip_all)]
    pub fn rectify_image(&self, image: &RgbImage) -> Result<RgbImage> {
        let detector = &self.config.detector;
        let corners = self.detect_corners(image)?;
        let (width, height) = estimate_dimensions(&corners);
        debug!(width, height, ?corners, "Label quadrilateral detected");
        validate_shape(width, height, detector.min_dimension, detector.max_aspect_ratio)?;
        rectify_document(image, &corners, width, height)
    }

    /// Full pass over a decoded image: detect, rectify, letterbox.
    pub fn scan_image(&self, image: &RgbImage) -> Result<RgbImage> {
        let rectified = self.rectify_image(image)?;
        let display = &self.config.display;
        Ok(resize_and_letterbox(&rectified, display.height, display.width))
    }

    /// Full pass over a raw frame, producing the canvas in the exact byte
    /// layout the display sink declared.
    #[instrument(skip_all, fields(width = frame.width, height = frame.height))]
    pub fn scan_frame(&self, frame: &Frame) -> Result<OutputCanvas> {
        let image = decode_frame(frame);
        let canvas = self.scan_image(&image)?;
        Ok(encode_canvas(&canvas, self.config.display.order))
    }
}
