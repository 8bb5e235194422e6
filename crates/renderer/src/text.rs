//! Typefaces, text measurement and gradient-filled text.

use std::fmt;

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Rect, Scale};

use crate::glyphs;
use crate::gradient::{blend, interpolate_color};

/// Ink bounding box of a laid-out string, relative to its drawing origin.
///
/// The drawing origin is the top of the ascent line, so `top` is usually
/// positive: the distance from the origin down to the highest inked row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMetrics {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// A face that can measure and draw text.
#[derive(Clone)]
pub enum Typeface {
    TrueType(Font<'static>),
    /// Stroke font compiled into the binary.
    Builtin,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::TrueType(_) => f.write_str("Typeface::TrueType"),
            Typeface::Builtin => f.write_str("Typeface::Builtin"),
        }
    }
}

impl Typeface {
    /// Parse a TrueType/OpenType font. Returns `None` for unparseable data.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(Typeface::TrueType)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Ink bounding box of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> TextMetrics {
        match self {
            Typeface::TrueType(font) => measure_truetype(font, text, size),
            Typeface::Builtin => glyphs::measure(text, size),
        }
    }

    /// Draw `text` as coverage (0..=255) into `mask`, origin at `(x, y)`.
    pub fn draw_mask(&self, mask: &mut GrayImage, x: i32, y: i32, size: f32, text: &str) {
        match self {
            Typeface::TrueType(font) => {
                draw_text_mut(mask, Luma([255u8]), x, y, Scale::uniform(size), font, text)
            }
            Typeface::Builtin => glyphs::draw_mask(mask, x, y, size, text),
        }
    }
}

fn measure_truetype(font: &Font<'static>, text: &str, size: f32) -> TextMetrics {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);

    let bounds = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc: Option<Rect<i32>>, bb| {
            Some(match acc {
                None => bb,
                Some(r) => Rect {
                    min: point(r.min.x.min(bb.min.x), r.min.y.min(bb.min.y)),
                    max: point(r.max.x.max(bb.max.x), r.max.y.max(bb.max.y)),
                },
            })
        });

    match bounds {
        Some(r) => TextMetrics {
            left: r.min.x,
            top: r.min.y,
            width: r.width().max(0) as u32,
            height: r.height().max(0) as u32,
        },
        None => {
            // No inked glyphs: fall back to advance width and line height
            let advance = font
                .layout(text, scale, point(0.0, 0.0))
                .last()
                .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
            let line = v_metrics.ascent - v_metrics.descent;
            TextMetrics {
                left: 0,
                top: 0,
                width: advance.ceil().max(0.0) as u32,
                height: line.ceil().max(0.0) as u32,
            }
        }
    }
}

/// Draw `text` filled with a top-to-bottom gradient from `start` to `end`.
///
/// The glyphs are first drawn into a single-channel mask the size of the
/// canvas; the gradient spans the ink box rows and is blended onto the
/// canvas through that mask. Returns the metrics used for placement.
pub fn draw_gradient_text(
    canvas: &mut RgbImage,
    typeface: &Typeface,
    origin: (i32, i32),
    size: f32,
    text: &str,
    start: Rgb<u8>,
    end: Rgb<u8>,
) -> TextMetrics {
    let metrics = typeface.measure(text, size);

    let mut mask = GrayImage::new(canvas.width(), canvas.height());
    typeface.draw_mask(&mut mask, origin.0, origin.1, size, text);

    let ink_top = origin.1 + metrics.top;
    let span = metrics.height.max(1) as f32;

    for (x, y, coverage) in mask.enumerate_pixels() {
        if coverage[0] == 0 {
            continue;
        }
        let ratio = (y as i32 - ink_top) as f32 / span;
        let color = interpolate_color(start, end, ratio);
        let base = *canvas.get_pixel(x, y);
        canvas.put_pixel(x, y, blend(base, color, coverage[0]));
    }

    metrics
}
