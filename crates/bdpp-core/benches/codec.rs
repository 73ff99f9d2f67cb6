use criterion::{criterion_group, criterion_main, Criterion};

use bdpp_core::codec::{self, CodecOptions};
use bdpp_core::pixel::PixelBuffer;

const EMBEDDABLE: [[u8; 3]; 3] = [[0, 0, 1], [0, 0, 0], [1, 0, 1]];

fn carrier(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = PixelBuffer::zeroed(width, height);
    for y in 0..height {
        for x in 0..width {
            pixels.set(x, y, EMBEDDABLE[(y % 3) as usize][(x % 3) as usize]);
        }
    }
    pixels
}

pub fn codec_benchmark(c: &mut Criterion) {
    c.bench_function("Block classification 384x384", |b| {
        let pixels = carrier(384, 384);

        b.iter(|| {
            let stats = codec::capacity(&pixels).expect("Cannot classify carrier");
            assert_eq!(stats.embeddable_blocks, 128 * 128);
        })
    });

    c.bench_function("Hide 1 KiB", |b| {
        let pixels = carrier(384, 384);
        let message = vec![0x5A; 1024];

        b.iter(|| {
            let mut carrier = pixels.clone();
            codec::hide(&mut carrier, &message[..], &CodecOptions::default())
                .expect("Cannot hide message");
        })
    });

    c.bench_function("Extract 1 KiB", |b| {
        let mut pixels = carrier(384, 384);
        let message = vec![0x5A; 1024];
        let outcome = codec::hide(&mut pixels, &message[..], &CodecOptions::default())
            .expect("Cannot hide message");

        b.iter(|| {
            let recovered = codec::extract(&pixels, outcome.key, &CodecOptions::default())
                .expect("Cannot extract message");
            assert_eq!(recovered.data.len(), 1024);
        })
    });
}

criterion_group!(benches, codec_benchmark);
criterion_main!(benches);
