//! Vertical linear gradients.

use std::ops::Range;

use image::{Rgb, RgbImage};

/// Linearly interpolate between two colors.
///
/// `t` is clamped to `[0, 1]`; each channel is rounded to the nearest integer.
pub fn interpolate_color(start: Rgb<u8>, end: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let channel = |i: usize| (start[i] as f32 * t_inv + end[i] as f32 * t).round() as u8;
    Rgb([channel(0), channel(1), channel(2)])
}

/// Colors of `height` consecutive rows blending from `start` to `end`.
///
/// Row `i` uses ratio `i / height`, so the first row is exactly `start` and
/// the last row stops one step short of `end`.
pub fn gradient_rows(start: Rgb<u8>, end: Rgb<u8>, height: u32) -> Vec<Rgb<u8>> {
    (0..height)
        .map(|i| interpolate_color(start, end, i as f32 / height as f32))
        .collect()
}

/// Fill full-width rows `rows` of `img` with a vertical gradient.
///
/// Rows outside the image are ignored.
pub fn fill_vertical_gradient(img: &mut RgbImage, rows: Range<u32>, top: Rgb<u8>, bottom: Rgb<u8>) {
    let height = rows.end.saturating_sub(rows.start);
    let colors = gradient_rows(top, bottom, height);
    for (y, color) in rows.zip(colors) {
        if y >= img.height() {
            break;
        }
        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Fill full-width rows `rows` with a single color.
pub fn fill_rows(img: &mut RgbImage, rows: Range<u32>, color: Rgb<u8>) {
    let end = rows.end.min(img.height());
    for y in rows.start..end {
        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Blend `color` over `base` with coverage `alpha` (0 = keep base, 255 = color).
pub fn blend(base: Rgb<u8>, color: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    match alpha {
        0 => base,
        255 => color,
        a => {
            let a = a as u32;
            let mix = |i: usize| ((color[i] as u32 * a + base[i] as u32 * (255 - a) + 127) / 255) as u8;
            Rgb([mix(0), mix(1), mix(2)])
        }
    }
}
