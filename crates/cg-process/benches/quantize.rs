use cg_core::color::Color;
use cg_core::frame::PixelBuffer;
use cg_core::palette::Palette;
use cg_process::distance::DistanceTables;
use cg_process::nearest::nearest;
use cg_process::quantize::quantize;
use cg_process::scale::scaled_nearest;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Dégradé RGB déterministe, opaque.
fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8,
                255,
            ]);
        }
    }
    PixelBuffer::from_raw(width, height, data).unwrap_or_default()
}

fn bench_nearest(c: &mut Criterion) {
    let tables = DistanceTables::new();
    let palette = Palette::load_default();
    c.bench_function("nearest_default_palette", |b| {
        b.iter(|| nearest(&tables, &palette, black_box(Color::new(123, 77, 201, 255))));
    });
}

fn bench_quantize(c: &mut Criterion) {
    let tables = DistanceTables::new();
    let palette = Palette::load_default();
    let src = gradient(256, 256);
    c.bench_function("quantize_256x256", |b| {
        b.iter(|| {
            let mut buf = src.clone();
            let _ = quantize(black_box(&mut buf), &palette, &tables);
            buf
        });
    });
}

fn bench_scale(c: &mut Criterion) {
    let src = gradient(1024, 1024);
    c.bench_function("scale_1024_to_256", |b| {
        b.iter(|| scaled_nearest(black_box(&src), 256, 256));
    });
}

criterion_group!(benches, bench_nearest, bench_quantize, bench_scale);
criterion_main!(benches);
