//! Built-in stroke font used when no TrueType face is available.
//!
//! Each glyph is a handful of line segments in a unit box (x right, y down,
//! `(0, 0)` top-left, `(1, 1)` bottom-left on the baseline). Lowercase
//! letters reuse the uppercase shapes squeezed to x-height.

use image::GrayImage;
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::text::TextMetrics;

type Segment = ((f32, f32), (f32, f32));

/// Horizontal advance per character, as a fraction of the font size.
const ADVANCE: f32 = 0.75;
/// Glyph box width, as a fraction of the font size.
const BOX_WIDTH: f32 = 0.55;
/// Distance from the drawing origin to the cap line.
const CAP_TOP: f32 = 0.15;
const CAP_HEIGHT: f32 = 0.7;
const X_HEIGHT: f32 = 0.5;
const STROKE: f32 = 0.1;

const BOX: &[Segment] = &[
    ((0.0, 0.0), (1.0, 0.0)),
    ((1.0, 0.0), (1.0, 1.0)),
    ((1.0, 1.0), (0.0, 1.0)),
    ((0.0, 1.0), (0.0, 0.0)),
];

fn strokes(ch: char) -> Vec<Segment> {
    let segments: &[Segment] = match ch.to_ascii_uppercase() {
        'A' => &[((0.0, 1.0), (0.5, 0.0)), ((0.5, 0.0), (1.0, 1.0)), ((0.2, 0.6), (0.8, 0.6))],
        'B' => &[
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 0.0), (0.75, 0.0)),
            ((0.75, 0.0), (0.9, 0.25)),
            ((0.9, 0.25), (0.75, 0.5)),
            ((0.0, 0.5), (0.75, 0.5)),
            ((0.75, 0.5), (1.0, 0.75)),
            ((1.0, 0.75), (0.75, 1.0)),
            ((0.75, 1.0), (0.0, 1.0)),
        ],
        'C' => &[((1.0, 0.0), (0.0, 0.0)), ((0.0, 0.0), (0.0, 1.0)), ((0.0, 1.0), (1.0, 1.0))],
        'D' => &[
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 0.0), (0.6, 0.0)),
            ((0.6, 0.0), (1.0, 0.3)),
            ((1.0, 0.3), (1.0, 0.7)),
            ((1.0, 0.7), (0.6, 1.0)),
            ((0.6, 1.0), (0.0, 1.0)),
        ],
        'E' => &[
            ((1.0, 0.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 1.0), (1.0, 1.0)),
            ((0.0, 0.5), (0.75, 0.5)),
        ],
        'F' => &[((1.0, 0.0), (0.0, 0.0)), ((0.0, 0.0), (0.0, 1.0)), ((0.0, 0.5), (0.75, 0.5))],
        'G' => &[
            ((1.0, 0.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 1.0), (1.0, 1.0)),
            ((1.0, 1.0), (1.0, 0.55)),
            ((1.0, 0.55), (0.5, 0.55)),
        ],
        'H' => &[((0.0, 0.0), (0.0, 1.0)), ((1.0, 0.0), (1.0, 1.0)), ((0.0, 0.5), (1.0, 0.5))],
        'I' => &[((0.5, 0.0), (0.5, 1.0)), ((0.2, 0.0), (0.8, 0.0)), ((0.2, 1.0), (0.8, 1.0))],
        'J' => &[((1.0, 0.0), (1.0, 1.0)), ((1.0, 1.0), (0.0, 1.0)), ((0.0, 1.0), (0.0, 0.7))],
        'K' => &[((0.0, 0.0), (0.0, 1.0)), ((1.0, 0.0), (0.0, 0.55)), ((0.3, 0.4), (1.0, 1.0))],
        'L' => &[((0.0, 0.0), (0.0, 1.0)), ((0.0, 1.0), (1.0, 1.0))],
        'M' => &[
            ((0.0, 1.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.5, 0.6)),
            ((0.5, 0.6), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 1.0)),
        ],
        'N' => &[((0.0, 1.0), (0.0, 0.0)), ((0.0, 0.0), (1.0, 1.0)), ((1.0, 1.0), (1.0, 0.0))],
        'O' | '0' => BOX,
        'P' => &[
            ((0.0, 1.0), (0.0, 0.0)),
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 0.5)),
            ((1.0, 0.5), (0.0, 0.5)),
        ],
        'Q' => &[
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 1.0)),
            ((1.0, 1.0), (0.0, 1.0)),
            ((0.0, 1.0), (0.0, 0.0)),
            ((0.6, 0.6), (1.0, 1.0)),
        ],
        'R' => &[
            ((0.0, 1.0), (0.0, 0.0)),
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 0.5)),
            ((1.0, 0.5), (0.0, 0.5)),
            ((0.4, 0.5), (1.0, 1.0)),
        ],
        'S' | '5' => &[
            ((1.0, 0.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 0.5)),
            ((0.0, 0.5), (1.0, 0.5)),
            ((1.0, 0.5), (1.0, 1.0)),
            ((1.0, 1.0), (0.0, 1.0)),
        ],
        'T' => &[((0.0, 0.0), (1.0, 0.0)), ((0.5, 0.0), (0.5, 1.0))],
        'U' => &[((0.0, 0.0), (0.0, 1.0)), ((0.0, 1.0), (1.0, 1.0)), ((1.0, 1.0), (1.0, 0.0))],
        'V' => &[((0.0, 0.0), (0.5, 1.0)), ((0.5, 1.0), (1.0, 0.0))],
        'W' => &[
            ((0.0, 0.0), (0.25, 1.0)),
            ((0.25, 1.0), (0.5, 0.4)),
            ((0.5, 0.4), (0.75, 1.0)),
            ((0.75, 1.0), (1.0, 0.0)),
        ],
        'X' => &[((0.0, 0.0), (1.0, 1.0)), ((1.0, 0.0), (0.0, 1.0))],
        'Y' => &[((0.0, 0.0), (0.5, 0.5)), ((1.0, 0.0), (0.5, 0.5)), ((0.5, 0.5), (0.5, 1.0))],
        'Z' => &[((0.0, 0.0), (1.0, 0.0)), ((1.0, 0.0), (0.0, 1.0)), ((0.0, 1.0), (1.0, 1.0))],
        '1' => &[((0.5, 0.0), (0.5, 1.0))],
        '2' => &[
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 0.5)),
            ((1.0, 0.5), (0.0, 0.5)),
            ((0.0, 0.5), (0.0, 1.0)),
            ((0.0, 1.0), (1.0, 1.0)),
        ],
        '3' => &[
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 1.0)),
            ((1.0, 1.0), (0.0, 1.0)),
            ((0.0, 0.5), (1.0, 0.5)),
        ],
        '4' => &[((0.0, 0.0), (0.0, 0.5)), ((0.0, 0.5), (1.0, 0.5)), ((1.0, 0.0), (1.0, 1.0))],
        '6' => &[
            ((1.0, 0.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 1.0), (1.0, 1.0)),
            ((1.0, 1.0), (1.0, 0.5)),
            ((1.0, 0.5), (0.0, 0.5)),
        ],
        '7' => &[((0.0, 0.0), (1.0, 0.0)), ((1.0, 0.0), (0.5, 1.0))],
        '8' => &[
            ((0.0, 0.0), (1.0, 0.0)),
            ((1.0, 0.0), (1.0, 1.0)),
            ((1.0, 1.0), (0.0, 1.0)),
            ((0.0, 1.0), (0.0, 0.0)),
            ((0.0, 0.5), (1.0, 0.5)),
        ],
        '9' => &[
            ((0.0, 0.5), (1.0, 0.5)),
            ((1.0, 0.5), (1.0, 0.0)),
            ((1.0, 0.0), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 0.5)),
            ((1.0, 0.5), (1.0, 1.0)),
        ],
        '-' => &[((0.2, 0.5), (0.8, 0.5))],
        '.' => &[((0.5, 0.88), (0.5, 1.0))],
        ',' => &[((0.55, 0.8), (0.4, 1.0))],
        '\'' => &[((0.5, 0.0), (0.5, 0.25))],
        _ => &[],
    };
    segments.to_vec()
}

/// Exact ink box of `text` drawn at `size` with the built-in font.
pub fn measure(text: &str, size: f32) -> TextMetrics {
    let count = text.chars().count();
    if count == 0 {
        return TextMetrics::default();
    }
    let width = (count - 1) as f32 * ADVANCE * size + BOX_WIDTH * size;
    TextMetrics {
        left: 0,
        top: (CAP_TOP * size).round() as i32,
        width: width.round() as u32,
        height: (CAP_HEIGHT * size).round() as u32,
    }
}

fn rasterize(text: &str, size: f32, metrics: &TextMetrics) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(metrics.width + 2, (size.ceil() as u32).max(1) + 2)?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;

    let sw = STROKE * size;
    let stroke = Stroke {
        width: sw,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };

    let baseline = metrics.top as f32 + CAP_HEIGHT * size;
    let box_w = BOX_WIDTH * size - sw;

    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let glyph_h = if ch.is_ascii_lowercase() { X_HEIGHT } else { CAP_HEIGHT } * size - sw;
        let left = i as f32 * ADVANCE * size + sw / 2.0;
        let top = baseline - sw / 2.0 - glyph_h;

        for ((x1, y1), (x2, y2)) in strokes(ch) {
            pb.move_to(left + x1 * box_w, top + y1 * glyph_h);
            pb.line_to(left + x2 * box_w, top + y2 * glyph_h);
        }
    }

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
    Some(pixmap)
}

/// Draw `text` into a coverage mask with its drawing origin at `(x, y)`.
pub fn draw_mask(mask: &mut GrayImage, x: i32, y: i32, size: f32, text: &str) {
    let metrics = measure(text, size);
    if metrics.width == 0 {
        return;
    }
    let Some(pixmap) = rasterize(text, size, &metrics) else {
        return;
    };

    let pw = pixmap.width() as usize;
    let data = pixmap.data();
    for py in 0..pixmap.height() as i32 {
        for px in 0..pw as i32 {
            let (mx, my) = (x + px, y + py);
            if mx < 0 || my < 0 || mx >= mask.width() as i32 || my >= mask.height() as i32 {
                continue;
            }
            let alpha = data[(py as usize * pw + px as usize) * 4 + 3];
            let dst = mask.get_pixel_mut(mx as u32, my as u32);
            dst[0] = dst[0].max(alpha);
        }
    }
}
