//! Benchmarks for the shape rasterizer.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ges_raster::color::Rgba8;
use ges_raster::comp_op::CompOp;
use ges_raster::geometry::{Circle, Ellipse, Line, Point, Rect};
use ges_raster::painter::Painter;
use ges_raster::surface::{SurfaceArgb1555, SurfaceArgb8888, SurfaceRgb565};

const HALF_RED: Rgba8 = Rgba8::new(255, 0, 0, 128);

fn bench_fill_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_rect");
    group.throughput(Throughput::Elements(320 * 240));

    let mut argb1555 = Box::new(SurfaceArgb1555::<320, 240>::new());
    let mut rgb565 = Box::new(SurfaceRgb565::<320, 240>::new());
    let mut argb8888 = Box::new(SurfaceArgb8888::<320, 240>::new());
    let full = Rect::from_coords(0, 0, 320, 240);

    group.bench_function("argb1555", |b| {
        b.iter(|| Painter::new(&mut *argb1555).fill_rect(black_box(&full), Rgba8::BLUE))
    });
    group.bench_function("rgb565", |b| {
        b.iter(|| Painter::new(&mut *rgb565).fill_rect(black_box(&full), Rgba8::BLUE))
    });
    group.bench_function("argb8888", |b| {
        b.iter(|| Painter::new(&mut *argb8888).fill_rect(black_box(&full), Rgba8::BLUE))
    });
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_rect_op");
    let mut surface = Box::new(SurfaceArgb8888::<128, 128>::new());
    let rect = Rect::from_coords(0, 0, 128, 128);

    for op in [CompOp::A, CompOp::AOverB, CompOp::Xor, CompOp::Plus] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{op:?}")), &op, |b, &op| {
            b.iter(|| {
                Painter::new(&mut *surface).fill_rect_with(
                    black_box(&rect),
                    HALF_RED,
                    op,
                    Rect::NO_CLIP,
                )
            })
        });
    }
    group.finish();
}

fn bench_round_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("round");
    let mut surface = Box::new(SurfaceRgb565::<320, 240>::new());
    let center = Point::new(160, 120);

    for radius in [8u16, 64, 200] {
        group.bench_with_input(BenchmarkId::new("fill_circle", radius), &radius, |b, &r| {
            b.iter(|| Painter::new(&mut *surface).fill_circle(black_box(&Circle::new(center, r)), Rgba8::GREEN))
        });
        group.bench_with_input(BenchmarkId::new("draw_circle", radius), &radius, |b, &r| {
            b.iter(|| Painter::new(&mut *surface).draw_circle(black_box(&Circle::new(center, r)), Rgba8::GREEN))
        });
        group.bench_with_input(BenchmarkId::new("fill_ellipse", radius), &radius, |b, &r| {
            b.iter(|| {
                Painter::new(&mut *surface).fill_ellipse(black_box(&Ellipse::even(center, r, r / 2)), Rgba8::GREEN)
            })
        });
    }
    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let mut surface = Box::new(SurfaceArgb8888::<320, 240>::new());
    c.bench_function("draw_line_fan", |b| {
        b.iter(|| {
            let mut p = Painter::new(&mut *surface);
            for x in (0..320).step_by(8) {
                p.draw_line(black_box(&Line::from_coords(160, 120, x, 0)), Rgba8::WHITE);
                p.draw_line(black_box(&Line::from_coords(160, 120, x, 239)), Rgba8::WHITE);
            }
        })
    });
}

criterion_group!(benches, bench_fill_rect, bench_operators, bench_round_shapes, bench_lines);
criterion_main!(benches);
