//! Decorative icon pasted beside a text line.

use image::imageops::{resize, FilterType};
use image::{Rgb, RgbImage, RgbaImage};

use crate::gradient::blend;
use crate::layout::BadgePlacement;

/// Resize `icon` to the placement square and alpha-blend it onto the canvas.
///
/// Parts that fall outside the canvas are clipped.
pub fn paste_badge(canvas: &mut RgbImage, icon: &RgbaImage, placement: BadgePlacement) {
    if placement.size == 0 || icon.width() == 0 || icon.height() == 0 {
        return;
    }
    let scaled = resize(icon, placement.size, placement.size, FilterType::Lanczos3);

    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    for (px, py, pixel) in scaled.enumerate_pixels() {
        let x = placement.x + px as i32;
        let y = placement.y + py as i32;
        if x < 0 || y < 0 || x >= cw || y >= ch {
            continue;
        }
        let [r, g, b, a] = pixel.0;
        let base = *canvas.get_pixel(x as u32, y as u32);
        canvas.put_pixel(x as u32, y as u32, blend(base, Rgb([r, g, b]), a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_paste_scales_and_blends() {
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        let icon = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
        paste_badge(&mut canvas, &icon, BadgePlacement { x: 10, y: 10, size: 16 });

        assert_eq!(*canvas.get_pixel(18, 18), Rgb([0, 0, 255]));
        assert_eq!(*canvas.get_pixel(5, 5), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(30, 30), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_transparent_icon_is_invisible() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([10, 20, 30]));
        let icon = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        paste_badge(&mut canvas, &icon, BadgePlacement { x: 0, y: 0, size: 20 });
        assert!(canvas.pixels().all(|p| *p == Rgb([10, 20, 30])));
    }

    #[test]
    fn test_clips_at_canvas_edge() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let icon = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        paste_badge(&mut canvas, &icon, BadgePlacement { x: -4, y: 6, size: 8 });
        assert_eq!(*canvas.get_pixel(0, 9), Rgb([0, 0, 0]));
    }
}
