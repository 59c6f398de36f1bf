// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Quadrilateral detection on a binary mask: contour selection, corner
// ordering, dimension estimation, and shape validation.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::contours::find_contours;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use labelscan_core::{Result, ScanError};
use tracing::debug;

/// The four corners of a detected label, named by their role.
///
/// This is a relationship, not raw points: `order_corners` assigns the roles
/// consistently regardless of the order the points arrive in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedCorners {
    pub top_left: (f32, f32),
    pub top_right: (f32, f32),
    pub bottom_right: (f32, f32),
    pub bottom_left: (f32, f32),
}

/// Find the label quadrilateral in a binary mask.
///
/// Traces all closed contours, keeps the `max_candidates` largest by enclosed
/// area, and simplifies each with Douglas-Peucker at a tolerance of
/// `tolerance` times the contour perimeter. The first candidate reducing to
/// exactly four vertices wins; corner order is left unspecified.
pub fn find_document_quad(
    mask: &GrayImage,
    tolerance: f64,
    max_candidates: usize,
) -> Result<[(f32, f32); 4]> {
    let mut contours = find_contours::<i32>(mask);
    if contours.is_empty() {
        return Err(ScanError::Detection("no contours found in mask".into()));
    }

    // The true label boundary is almost always among the largest regions;
    // capping the candidate set bounds cost and noise sensitivity.
    contours.sort_by(|a, b| contour_area(&b.points).total_cmp(&contour_area(&a.points)));
    contours.truncate(max_candidates);

    for contour in &contours {
        let perimeter = arc_length(&contour.points, true);
        let simplified = approximate_polygon_dp(&contour.points, perimeter * tolerance, true);
        debug!(
            contour_points = contour.points.len(),
            simplified_points = simplified.len(),
            perimeter,
            "Contour simplified"
        );
        if simplified.len() == 4 {
            return Ok([
                (simplified[0].x as f32, simplified[0].y as f32),
                (simplified[1].x as f32, simplified[1].y as f32),
                (simplified[2].x as f32, simplified[2].y as f32),
                (simplified[3].x as f32, simplified[3].y as f32),
            ]);
        }
    }

    Err(ScanError::Detection("no quadrilateral found".into()))
}

/// Enclosed area of a closed contour via the shoelace formula.
fn contour_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }
    area.abs() / 2.0
}

/// Assign four unordered points to {top-left, top-right, bottom-right,
/// bottom-left}.
///
/// Points are pre-sorted by coordinate sum: for a convex quadrilateral that
/// is not near-degenerate, the point minimising x+y is the top-left and the
/// point maximising it is the bottom-right. The two middle points are then
/// disambiguated locally. The rule is a heuristic for roughly axis-aligned
/// rectangles — the expected label shape — and is not a general
/// polygon-orientation solver; highly skewed quadrilaterals may be
/// mis-ordered.
pub fn order_corners(points: [(f32, f32); 4]) -> OrderedCorners {
    let mut pts = points;
    pts.sort_by(|a, b| (a.0 + a.1).total_cmp(&(b.0 + b.1)));
    let [top_left, mid_a, mid_b, bottom_right] = pts;

    // The bottom-left middle point sits below the top-left and to the left
    // of the bottom-right.
    let (bottom_left, top_right) = if mid_a.1 > top_left.1 && mid_a.0 < bottom_right.0 {
        (mid_a, mid_b)
    } else {
        (mid_b, mid_a)
    };

    OrderedCorners {
        top_left,
        top_right,
        bottom_right,
        bottom_left,
    }
}

/// Estimate the target rectangle size from the ordered corners.
///
/// Each dimension is the longer of its two parallel-side estimates, which
/// compensates for minor perspective-induced asymmetry. Results are truncated
/// toward zero.
pub fn estimate_dimensions(corners: &OrderedCorners) -> (u32, u32) {
    let side = |a: (f32, f32), b: (f32, f32)| (b.0 - a.0).hypot(b.1 - a.1);

    let width = side(corners.top_left, corners.top_right)
        .max(side(corners.bottom_left, corners.bottom_right));
    let height = side(corners.top_left, corners.bottom_left)
        .max(side(corners.top_right, corners.bottom_right));

    (width as u32, height as u32)
}

/// Reject geometrically implausible detections before the perspective solve:
/// segmentation noise (too small) and elongated false positives such as
/// cables or belt edges (too thin).
pub fn validate_shape(
    width: u32,
    height: u32,
    min_dimension: u32,
    max_aspect_ratio: f64,
) -> Result<()> {
    let long = width.max(height) as f64;
    let short = width.min(height) as f64;
    let aspect = long / short;

    if height < min_dimension || width < min_dimension {
        return Err(ScanError::Shape(format!(
            "detected label is too small: H{height}xW{width}"
        )));
    }
    if aspect > max_aspect_ratio {
        return Err(ScanError::Shape(format!(
            "detected label is too thin: aspect {aspect:.2}"
        )));
    }
    Ok(())
}

/// Draw the accepted quadrilateral onto a display copy for inspection.
///
/// Debug aid only — callers must pass a copy, never the pipeline input.
pub fn draw_quad_overlay(image: &mut RgbImage, corners: &OrderedCorners) {
    let color = Rgb([255u8, 0, 0]);
    let ring = [
        corners.top_left,
        corners.top_right,
        corners.bottom_right,
        corners.bottom_left,
    ];
    for i in 0..4 {
        draw_line_segment_mut(image, ring[i], ring[(i + 1) % 4], color);
    }
}
