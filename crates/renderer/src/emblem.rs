//! The spoke emblem: a ring with evenly spaced radial spokes.
//!
//! Strokes are rasterized with tiny-skia into a small transparent pixmap
//! and then composited onto the canvas.

use image::{Rgb, RgbImage};
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::layout::NAVY;

/// Emblem geometry and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpokeEmblem {
    pub radius: f32,
    /// Ring thickness, drawn inward from `radius`.
    pub ring_width: f32,
    pub spokes: u32,
    pub spoke_width: f32,
    pub color: Rgb<u8>,
}

impl Default for SpokeEmblem {
    fn default() -> Self {
        Self {
            radius: 100.0,
            ring_width: 6.0,
            spokes: 24,
            spoke_width: 3.0,
            color: NAVY,
        }
    }
}

impl SpokeEmblem {
    /// Angle between neighbouring spokes, in degrees.
    pub fn spoke_spacing_degrees(&self) -> f32 {
        360.0 / self.spokes as f32
    }

    /// Outer end of every spoke, relative to the emblem center.
    ///
    /// Spoke `i` points at `i * 360 / N` degrees, starting along +x and
    /// turning clockwise on screen (y grows downward).
    pub fn spoke_endpoints(&self) -> Vec<(f32, f32)> {
        let spacing = self.spoke_spacing_degrees();
        (0..self.spokes)
            .map(|i| {
                let angle = (i as f32 * spacing).to_radians();
                (self.radius * angle.cos(), self.radius * angle.sin())
            })
            .collect()
    }

    fn rasterize(&self) -> Option<Pixmap> {
        let size = (self.radius * 2.0).ceil() as u32 + 4;
        let mut pixmap = Pixmap::new(size, size)?;
        let c = size as f32 / 2.0;

        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color[0], self.color[1], self.color[2], 255);
        paint.anti_alias = true;

        let ring = PathBuilder::from_circle(c, c, self.radius - self.ring_width / 2.0)?;
        let ring_stroke = Stroke {
            width: self.ring_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&ring, &paint, &ring_stroke, Transform::identity(), None);

        let spoke_stroke = Stroke {
            width: self.spoke_width,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        let mut pb = PathBuilder::new();
        for (dx, dy) in self.spoke_endpoints() {
            pb.move_to(c, c);
            pb.line_to(c + dx, c + dy);
        }
        if let Some(spokes) = pb.finish() {
            pixmap.stroke_path(&spokes, &paint, &spoke_stroke, Transform::identity(), None);
        }

        Some(pixmap)
    }

    /// Draw the emblem centered at `(cx, cy)`.
    pub fn draw(&self, canvas: &mut RgbImage, cx: i32, cy: i32) {
        let Some(pixmap) = self.rasterize() else {
            tracing::warn!(radius = self.radius, "Failed to allocate emblem pixmap");
            return;
        };
        let half = (pixmap.width() / 2) as i32;
        composite_pixmap(canvas, &pixmap, cx - half, cy - half);
    }
}

/// Composite a premultiplied tiny-skia pixmap onto an opaque RGB canvas.
pub(crate) fn composite_pixmap(canvas: &mut RgbImage, pixmap: &Pixmap, left: i32, top: i32) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    let pw = pixmap.width() as usize;
    let data = pixmap.data();

    for py in 0..pixmap.height() as i32 {
        let y = top + py;
        if y < 0 || y >= ch {
            continue;
        }
        for px in 0..pw as i32 {
            let x = left + px;
            if x < 0 || x >= cw {
                continue;
            }

            let idx = (py as usize * pw + px as usize) * 4;
            let src_a = data[idx + 3] as u32;
            if src_a == 0 {
                continue;
            }

            // Source-over with premultiplied source
            let dst = canvas.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                let src = data[idx + c] as u32;
                dst[c] = (src + (dst[c] as u32 * (255 - src_a) + 127) / 255).min(255) as u8;
            }
        }
    }
}
