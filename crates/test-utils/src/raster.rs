//! Helpers for inspecting rendered rasters.

use image::{Rgb, RgbImage};

/// PNG file signature.
const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// True if `bytes` start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() > PNG_MAGIC.len() && bytes[..PNG_MAGIC.len()] == PNG_MAGIC
}

/// True if every pixel of row `y` equals `color`.
pub fn row_is_uniform(img: &RgbImage, y: u32, color: Rgb<u8>) -> bool {
    (0..img.width()).all(|x| *img.get_pixel(x, y) == color)
}

/// Number of rows whose left-most pixel is exactly `color`.
///
/// The left edge is clear of the emblem and of the centered text, so it
/// shows the stripe or band color of each row.
pub fn count_edge_rows(img: &RgbImage, color: Rgb<u8>) -> u32 {
    (0..img.height())
        .filter(|&y| *img.get_pixel(0, y) == color)
        .count() as u32
}

/// Number of pixels in the rectangle `[x0, x1) x [y0, y1)` that differ from `background`.
pub fn count_marked(img: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, background: Rgb<u8>) -> usize {
    let mut count = 0;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            if *img.get_pixel(x, y) != background {
                count += 1;
            }
        }
    }
    count
}
