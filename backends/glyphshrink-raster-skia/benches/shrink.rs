// Shrink throughput on the soft and skia backends

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glyphshrink_core::{
    resample::area_resample, shrink_bitmap, traits::RasterBackend, GlyphBitmap, HotPoint,
    ShrinkContext,
};
use glyphshrink_raster_skia::SkiaBackend;
use glyphshrink_raster_soft::SoftBackend;

/// A ring roughly the size of a 10pt glyph at 600 dpi
fn ring(size: u32) -> GlyphBitmap {
    let c = size as f64 / 2.0;
    let rows: Vec<Vec<bool>> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt();
                    d > c * 0.6 && d < c * 0.9
                })
                .collect()
        })
        .collect();
    GlyphBitmap::from_rows(&rows).unwrap_or_else(|e| panic!("ring: {e}"))
}

fn bench_backends(c: &mut Criterion) {
    let bitmap = ring(64);
    let hot = HotPoint::new(0, 63);
    let backends: [(&str, Arc<dyn RasterBackend>); 2] =
        [("soft", Arc::new(SoftBackend)), ("skia", Arc::new(SkiaBackend))];

    let mut group = c.benchmark_group("shrink_bitmap");
    for (name, backend) in backends {
        for factor in [2.0, 5.0, 10.0] {
            let context = ShrinkContext::new(factor, Arc::clone(&backend))
                .unwrap_or_else(|e| panic!("context: {e}"));
            group.bench_with_input(BenchmarkId::new(name, factor), &context, |b, ctx| {
                b.iter(|| shrink_bitmap(black_box(&bitmap), hot, ctx))
            });
        }
    }
    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let src: Vec<u8> = (0..256 * 256).map(|i| (i % 251) as u8).collect();
    c.bench_function("area_resample 256->37", |b| {
        b.iter(|| area_resample(black_box(&src), 256, 256, 37, 37))
    });
}

criterion_group!(benches, bench_backends, bench_resample);
criterion_main!(benches);
