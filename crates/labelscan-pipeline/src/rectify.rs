// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Perspective rectification: map the detected quadrilateral onto an upright
// rectangle of the estimated size.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use labelscan_core::{Result, ScanError};
use tracing::debug;

use crate::quad::OrderedCorners;

/// Warp the label region onto an upright `width` x `height` rectangle.
///
/// Output is always treated as portrait-oriented content: when the detected
/// label is wider than tall in source pixel space, the source corners are
/// re-ordered (top-right, bottom-right, bottom-left, top-left) and the target
/// dimensions swapped, rotating the logical rectangle by 90 degrees.
/// Out-of-bounds source samples are filled with black.
pub fn rectify_document(
    image: &RgbImage,
    corners: &OrderedCorners,
    width: u32,
    height: u32,
) -> Result<RgbImage> {
    let (src, width, height) = if height > width {
        (
            [
                corners.top_left,
                corners.top_right,
                corners.bottom_right,
                corners.bottom_left,
            ],
            width,
            height,
        )
    } else {
        (
            [
                corners.top_right,
                corners.bottom_right,
                corners.bottom_left,
                corners.top_left,
            ],
            height,
            width,
        )
    };

    let dst = [
        (0.0, 0.0),
        (width as f32 - 1.0, 0.0),
        (width as f32 - 1.0, height as f32 - 1.0),
        (0.0, height as f32 - 1.0),
    ];

    let projection = Projection::from_control_points(src, dst).ok_or_else(|| {
        ScanError::Detection("degenerate corner configuration, homography is singular".into())
    })?;

    let mut output = RgbImage::new(width, height);
    warp_into(
        image,
        &projection,
        Interpolation::Bilinear,
        Rgb([0u8, 0, 0]),
        &mut output,
    );
    debug!(width, height, "Perspective warp applied");
    Ok(output)
}
