//! End-to-end tests for flag composition.
//!
//! All renders here use the built-in font and no badge unless a test
//! supplies one, so they are deterministic and need no network.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use renderer::layout::{FONT_SIZE, GREEN, HEIGHT, NAVY, SAFFRON, WHITE, WIDTH};
use renderer::{
    encode_png, render_flag, save_png, FlagLayout, FlagRenderer, RenderAssets, Typeface,
};
use test_utils::{count_edge_rows, count_marked, is_png, row_is_uniform, sample_name, validated};

fn offline_flag(name: &str) -> RgbImage {
    render_flag(&validated(name), &RenderAssets::offline())
}

// ============================================================================
// Canvas and stripes
// ============================================================================

#[test]
fn test_canvas_is_square() {
    let img = offline_flag("A. Kumar");
    assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
    assert_eq!(img.dimensions(), (1080, 1080));
}

#[test]
fn test_stripe_rows_are_solid() {
    let img = offline_flag("A. Kumar");

    for y in [100, 250, 392] {
        assert!(row_is_uniform(&img, y, SAFFRON), "row {} not saffron", y);
    }
    for y in [393, 420] {
        assert!(row_is_uniform(&img, y, WHITE), "row {} not white", y);
    }
    for y in [686, 800, 979] {
        assert!(row_is_uniform(&img, y, GREEN), "row {} not green", y);
    }
}

#[test]
fn test_stripe_heights_at_left_edge() {
    let img = offline_flag("A. Kumar");
    // 293 stripe rows plus the first row of the header and of the footer
    assert_eq!(count_edge_rows(&img, SAFFRON), 295);
    // Band gradients stop one step short of green
    assert_eq!(count_edge_rows(&img, GREEN), 294);
}

// ============================================================================
// Bands
// ============================================================================

#[test]
fn test_header_and_footer_bands() {
    let img = offline_flag("A. Kumar");

    assert_eq!(*img.get_pixel(0, 0), SAFFRON);
    assert_eq!(*img.get_pixel(0, 50), WHITE);
    assert_eq!(*img.get_pixel(0, 980), SAFFRON);
    assert_eq!(*img.get_pixel(0, 1030), WHITE);

    // Toward green at the bottom of each band
    let header_bottom = img.get_pixel(0, 99);
    let footer_bottom = img.get_pixel(0, 1079);
    assert_eq!(header_bottom, footer_bottom);
    assert!(header_bottom[0] < 40, "{:?}", header_bottom);

    // Gradient rows are uniform across the band's edges
    assert_eq!(img.get_pixel(0, 25), img.get_pixel(WIDTH - 1, 25));
}

// ============================================================================
// Emblem
// ============================================================================

#[test]
fn test_emblem_in_white_stripe() {
    let img = offline_flag("A. Kumar");
    let (cx, cy) = FlagLayout::default().emblem_center();
    assert_eq!((cx, cy), (540, 539));

    let ring = img.get_pixel((cx - 97) as u32, cy as u32);
    assert!(ring[0] < 64 && ring[2] > 96, "ring pixel {:?}", ring);

    let inked = count_marked(&img, 440, 439, 641, 640, WHITE);
    assert!(inked > 3000, "only {} emblem pixels", inked);

    // Clear of the ring
    assert_eq!(*img.get_pixel((cx - 120) as u32, cy as u32), WHITE);
    assert_eq!(*img.get_pixel(cx as u32, (cy - 120) as u32), WHITE);
}

#[test]
fn test_emblem_is_navy_not_black() {
    let img = offline_flag("A. Kumar");
    let hub = img.get_pixel(540, 539);
    assert!(hub[2] > hub[0], "hub pixel {:?}", hub);
    assert_eq!(NAVY, Rgb([0, 0, 128]));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_name_is_drawn_in_footer() {
    let img = offline_flag("A. Kumar");
    let mut differs = 0;
    for y in 980..HEIGHT {
        let edge = *img.get_pixel(0, y);
        differs += (0..WIDTH).filter(|&x| *img.get_pixel(x, y) != edge).count();
    }
    assert!(differs > 100, "footer text too faint: {} pixels", differs);
}

#[test]
fn test_caption_is_drawn_in_header() {
    let img = offline_flag("A. Kumar");
    let mut differs = 0;
    for y in 0..100 {
        let edge = *img.get_pixel(0, y);
        differs += (0..WIDTH).filter(|&x| *img.get_pixel(x, y) != edge).count();
    }
    assert!(differs > 500, "caption too faint: {} pixels", differs);
}

#[test]
fn test_different_names_differ_only_in_footer() {
    let a = offline_flag("Priya");
    let b = offline_flag("Rahul");
    assert_ne!(a, b);

    for y in 0..980 {
        for x in (0..WIDTH).step_by(7) {
            assert_eq!(a.get_pixel(x, y), b.get_pixel(x, y), "pixel ({}, {})", x, y);
        }
    }
}

// ============================================================================
// Determinism and encoding
// ============================================================================

#[test]
fn test_render_is_deterministic() {
    let name = sample_name();
    let first = encode_png(&render_flag(&name, &RenderAssets::offline())).unwrap();
    let second = encode_png(&render_flag(&name, &RenderAssets::offline())).unwrap();
    assert!(is_png(&first));
    assert_eq!(first, second);
}

#[test]
fn test_encoded_flag_decodes() {
    let img = offline_flag("O'Neil-Smith, Jr.");
    let bytes = encode_png(&img).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded, img);
}

#[test]
fn test_render_to_file() {
    let dir = test_utils::temp_dir();
    let path = dir.path().join("indian_flag.png");

    let written = FlagRenderer::default()
        .render_to_file(&sample_name(), &RenderAssets::offline(), &path)
        .unwrap();

    assert_eq!(written, path);
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (1080, 1080));
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_concurrent_saves_to_one_path() {
    let dir = test_utils::temp_dir();
    let path = dir.path().join("shared.png");
    let images: Vec<RgbImage> = (0..6u8)
        .map(|i| RgbImage::from_pixel(64, 48, Rgb([i * 40, 0, 0])))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = images
            .iter()
            .map(|img| {
                let path = &path;
                scope.spawn(move || save_png(img, path))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), path);
        }
    });

    // Whichever writer won, the file is one complete image
    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert!(images.contains(&decoded));

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_render_to_missing_directory_fails() {
    let dir = test_utils::temp_dir();
    let path = dir.path().join("no-such-dir").join("flag.png");
    let result = FlagRenderer::default().render_to_file(&sample_name(), &RenderAssets::offline(), &path);
    assert!(result.is_err());
}

// ============================================================================
// Badge
// ============================================================================

#[test]
fn test_badge_follows_name() {
    let name = validated("A. Kumar");
    let assets = RenderAssets {
        typeface: Typeface::Builtin,
        badge: Some(RgbaImage::from_pixel(72, 72, Rgba([255, 0, 0, 255]))),
    };
    let img = render_flag(&name, &assets);

    let layout = FlagLayout::default();
    let metrics = Typeface::Builtin.measure(name.as_str(), FONT_SIZE);
    let origin = layout.footer_text_origin(&metrics);
    let badge = layout.badge_placement(origin, &metrics);

    let center = img.get_pixel(
        (badge.x + badge.size as i32 / 2) as u32,
        (badge.y + badge.size as i32 / 2) as u32,
    );
    assert!(center[0] > 240 && center[1] < 16 && center[2] < 16, "badge pixel {:?}", center);

    // Without the icon the same spot is band gradient
    let plain = offline_flag("A. Kumar");
    let spot = plain.get_pixel(
        (badge.x + badge.size as i32 / 2) as u32,
        (badge.y + badge.size as i32 / 2) as u32,
    );
    assert!(spot[1] > 100, "band pixel {:?}", spot);
}
