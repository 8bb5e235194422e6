//! Fixed flag geometry.
//!
//! The canvas is split into five horizontal regions, top to bottom:
//! header band, saffron stripe, white stripe, green stripe, footer band.
//! The three stripes share `flag_height - header_height` rows; integer
//! division leaves the remainder to the green stripe.

use std::ops::Range;

use image::Rgb;

use crate::text::TextMetrics;

/// Canvas width in pixels.
pub const WIDTH: u32 = 1080;
/// Canvas height in pixels.
pub const HEIGHT: u32 = 1080;
/// Height of the gradient band above the stripes.
pub const HEADER_HEIGHT: u32 = 100;
/// Height of the gradient band below the stripes.
pub const FOOTER_HEIGHT: u32 = 100;

/// Pixel size used for the caption and the name.
pub const FONT_SIZE: f32 = 40.0;
/// Caption drawn in the header band.
pub const HEADER_TEXT: &str = "Happy Independence Day";
/// Twemoji code point of the decorative badge (dove).
pub const BADGE_ICON_CODE: &str = "1f54a";

/// Radius of the small header emblem slot. The slot is reserved, not drawn.
pub const SMALL_EMBLEM_RADIUS: i32 = 23;
/// Gap between text and neighbouring decorations.
pub const TEXT_SPACING: i32 = 12;
/// Horizontal gap between the end of a text line and its badge.
pub const BADGE_GAP: i32 = 10;
/// The badge is raised this many pixels above the text origin and is this
/// many pixels taller than the text.
pub const BADGE_OVERHANG: i32 = 5;

pub const SAFFRON: Rgb<u8> = Rgb([255, 153, 51]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const GREEN: Rgb<u8> = Rgb([19, 136, 8]);
pub const NAVY: Rgb<u8> = Rgb([0, 0, 128]);

/// Where a badge goes: top-left corner and side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgePlacement {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

/// Canvas geometry. `FlagLayout::default()` is the production layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagLayout {
    pub width: u32,
    pub height: u32,
    pub header_height: u32,
    pub footer_height: u32,
}

impl Default for FlagLayout {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            header_height: HEADER_HEIGHT,
            footer_height: FOOTER_HEIGHT,
        }
    }
}

impl FlagLayout {
    /// Bottom edge of the striped area (the footer starts here).
    pub fn flag_height(&self) -> u32 {
        self.height - self.footer_height
    }

    /// Nominal height of each stripe.
    pub fn stripe_height(&self) -> u32 {
        (self.flag_height() - self.header_height) / 3
    }

    /// Row ranges of the saffron, white and green stripes.
    pub fn stripes(&self) -> [Range<u32>; 3] {
        let top = self.header_height;
        let stripe = self.stripe_height();
        [
            top..top + stripe,
            top + stripe..top + stripe * 2,
            top + stripe * 2..self.flag_height(),
        ]
    }

    /// Center of the spoke emblem, in the middle of the white stripe.
    pub fn emblem_center(&self) -> (i32, i32) {
        let stripe = self.stripe_height();
        (
            (self.width / 2) as i32,
            (self.header_height + stripe + stripe / 2) as i32,
        )
    }

    /// Header band split into its saffron→white and white→green halves.
    pub fn header_halves(&self) -> (Range<u32>, Range<u32>) {
        let mid = self.header_height / 2;
        (0..mid, mid..self.header_height)
    }

    /// Footer band split into its saffron→white and white→green halves.
    pub fn footer_halves(&self) -> (Range<u32>, Range<u32>) {
        let top = self.flag_height();
        let mid = self.height - self.footer_height / 2;
        (top..mid, mid..self.height)
    }

    /// Drawing origin of the header caption.
    ///
    /// The line is centered as if the small emblem and its spacing sat to
    /// the left of the text.
    pub fn header_text_origin(&self, metrics: &TextMetrics) -> (i32, i32) {
        let reserved = SMALL_EMBLEM_RADIUS * 2 + TEXT_SPACING;
        let total_width = reserved + metrics.width as i32;
        let x = (self.width as i32 - total_width).div_euclid(2) + reserved;
        let y = (self.header_height as i32 - metrics.height as i32).div_euclid(2);
        (x, y)
    }

    /// Drawing origin of the footer name, centered together with its badge.
    pub fn footer_text_origin(&self, metrics: &TextMetrics) -> (i32, i32) {
        let badge = metrics.height as i32 + BADGE_OVERHANG;
        let total_width = metrics.width as i32 + TEXT_SPACING + badge;
        let x = (self.width as i32 - total_width).div_euclid(2);
        let y = self.flag_height() as i32
            + (self.footer_height as i32 - metrics.height as i32).div_euclid(2);
        (x, y)
    }

    /// Badge to the right of a text line drawn at `origin`.
    pub fn badge_placement(&self, origin: (i32, i32), metrics: &TextMetrics) -> BadgePlacement {
        BadgePlacement {
            x: origin.0 + metrics.width as i32 + BADGE_GAP,
            y: origin.1 - BADGE_OVERHANG,
            size: metrics.height + BADGE_OVERHANG as u32,
        }
    }
}
