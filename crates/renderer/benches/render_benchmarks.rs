//! Benchmarks for the renderer crate - flag composition and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flag_common::validate_name;
use image::{RgbImage, Rgba, RgbaImage};
use renderer::emblem::SpokeEmblem;
use renderer::layout::{HEIGHT, WIDTH, WHITE};
use renderer::{encode_png, render_flag, RenderAssets, Typeface};

/// Offline assets with a solid badge, so the badge path is exercised.
fn assets_with_badge() -> RenderAssets {
    RenderAssets {
        typeface: Typeface::Builtin,
        badge: Some(RgbaImage::from_pixel(72, 72, Rgba([200, 40, 40, 255]))),
    }
}

// ============================================================================
// Full render
// ============================================================================

fn bench_render_flag(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_flag");
    group.throughput(Throughput::Elements((WIDTH * HEIGHT) as u64));

    let names = [("short", "Jo"), ("typical", "A. Kumar"), ("long", "abcdefghijklmnopqrstuvwxyz0123")];
    for (label, raw) in names {
        let name = validate_name(raw).unwrap();
        group.bench_with_input(BenchmarkId::new("offline", label), &name, |b, name| {
            let assets = RenderAssets::offline();
            b.iter(|| render_flag(black_box(name), &assets))
        });
    }

    let name = validate_name("A. Kumar").unwrap();
    let assets = assets_with_badge();
    group.bench_function("with_badge", |b| b.iter(|| render_flag(black_box(&name), &assets)));

    group.finish();
}

// ============================================================================
// Emblem
// ============================================================================

fn bench_emblem(c: &mut Criterion) {
    let emblem = SpokeEmblem::default();
    c.bench_function("emblem_draw", |b| {
        b.iter(|| {
            let mut canvas = RgbImage::from_pixel(240, 240, WHITE);
            emblem.draw(&mut canvas, 120, 120);
            black_box(canvas)
        })
    });
}

// ============================================================================
// PNG encoding
// ============================================================================

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    let img = render_flag(&validate_name("A. Kumar").unwrap(), &RenderAssets::offline());

    group.throughput(Throughput::Bytes((WIDTH * HEIGHT * 3) as u64));
    group.bench_function("flag_1080", |b| b.iter(|| encode_png(black_box(&img)).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_render_flag, bench_emblem, bench_png_encoding);
criterion_main!(benches);
