// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Output normalization: scale the rectified label to fit the fixed display
// canvas without distortion, centred on a zero-filled border.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Rescale `image` by the single uniform factor that fits it entirely within
/// a `cols` x `rows` canvas, then centre it on a zero-filled canvas of
/// exactly that size.
///
/// The output dimensions never depend on the detected label size, so the
/// display collaborator never needs to branch on shape.
pub fn resize_and_letterbox(image: &RgbImage, rows: u32, cols: u32) -> RgbImage {
    let (image_cols, image_rows) = image.dimensions();
    let row_ratio = rows as f64 / image_rows as f64;
    let col_ratio = cols as f64 / image_cols as f64;
    let ratio = row_ratio.min(col_ratio);

    let new_cols = ((image_cols as f64 * ratio).round() as u32).max(1);
    let new_rows = ((image_rows as f64 * ratio).round() as u32).max(1);
    let resized = imageops::resize(image, new_cols, new_rows, FilterType::Triangle);

    let mut canvas = RgbImage::new(cols, rows);
    let row_start = (rows - new_rows) / 2;
    let col_start = (cols - new_cols) / 2;
    imageops::replace(&mut canvas, &resized, col_start as i64, row_start as i64);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn wide_image_is_centred_with_vertical_borders() {
        // 300 wide x 100 tall into 480x480: scale = min(4.8, 1.6) = 1.6,
        // resized to 480x160, centred with 160-row borders top and bottom.
        let image = RgbImage::from_pixel(300, 100, Rgb([255u8, 255, 255]));
        let canvas = resize_and_letterbox(&image, 480, 480);
        assert_eq!(canvas.dimensions(), (480, 480));

        // Border rows are zero-filled.
        assert_eq!(canvas.get_pixel(240, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(240, 159).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(240, 320).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(240, 479).0, [0, 0, 0]);
        // Content rows span 160..320 across the full width.
        assert_eq!(canvas.get_pixel(240, 160).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(0, 240).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(479, 319).0, [255, 255, 255]);
    }

    #[test]
    fn tall_image_gets_horizontal_borders() {
        let image = RgbImage::from_pixel(100, 400, Rgb([10u8, 20, 30]));
        let canvas = resize_and_letterbox(&image, 480, 480);
        // Scale = min(1.2, 4.8) = 1.2 -> 120x480, centred at column 180.
        assert_eq!(canvas.get_pixel(179, 240).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(240, 240).0, [10, 20, 30]);
        assert_eq!(canvas.get_pixel(300, 240).0, [0, 0, 0]);
    }

    #[test]
    fn exact_fit_leaves_no_border() {
        let image = RgbImage::from_pixel(240, 240, Rgb([50u8, 60, 70]));
        let canvas = resize_and_letterbox(&image, 480, 480);
        assert!(canvas.pixels().all(|px| px.0 == [50, 60, 70]));
    }
}
