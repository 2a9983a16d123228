use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crashwatch::stream::{encode_part, FrameBuffer, PlaceholderImage};
use std::sync::Arc;

/// Benchmark multipart framing across typical frame sizes
fn bench_part_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("mjpeg_part_encoding");
    for size in [4 * 1024, 32 * 1024, 256 * 1024] {
        let frame = vec![0x42u8; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| encode_part(frame))
        });
    }
    group.finish();
}

/// Benchmark the frame buffer update/read cycle under the async lock
fn bench_frame_buffer(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");
    let buffer = Arc::new(FrameBuffer::new());
    let frame = Bytes::from(vec![0x42u8; 64 * 1024]);

    c.bench_function("frame_buffer_update", |b| {
        let buffer = buffer.clone();
        let frame = frame.clone();
        b.to_async(&rt)
            .iter(|| {
                let buffer = buffer.clone();
                let frame = frame.clone();
                async move { buffer.update(frame).await }
            })
    });

    rt.block_on(buffer.update(frame));

    c.bench_function("frame_buffer_read", |b| {
        let buffer = buffer.clone();
        b.to_async(&rt).iter(|| {
            let buffer = buffer.clone();
            async move { buffer.read().await }
        })
    });
}

/// Benchmark placeholder synthesis (startup cost)
fn bench_placeholder_fallback(c: &mut Criterion) {
    c.bench_function("placeholder_fallback_encode", |b| {
        b.iter(PlaceholderImage::fallback)
    });
}

criterion_group!(
    benches,
    bench_part_encoding,
    bench_frame_buffer,
    bench_placeholder_fallback
);
criterion_main!(benches);
