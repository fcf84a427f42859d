use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mp3snip::{MpegReader, Snipper, TrimWindow};
use std::hint::black_box;
use std::io::Cursor;
use std::time::Duration;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz: 417-byte frames of 26.1 ms.
const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// A synthetic stream of `minutes` of audio behind a small ID3v2 tag.
fn synthetic_mp3(minutes: u64) -> Vec<u8> {
    let frames = minutes * 60 * 44_100 / 1152;
    let mut bytes = vec![b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 0];
    for i in 0..frames {
        let mut frame = vec![(i % 200) as u8; 417];
        frame[..4].copy_from_slice(&HEADER);
        bytes.extend(frame);
    }
    bytes
}

fn snip(input: &[u8], window: TrimWindow) -> usize {
    let reader = MpegReader::new(Cursor::new(input));
    let (_, out) = Snipper::new(reader, Vec::with_capacity(input.len()), window, input.len() as u64)
        .run()
        .unwrap();
    out.len()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("snip");

    for minutes in [1u64, 10] {
        let input = synthetic_mp3(minutes);
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("null", minutes), &input, |b, input| {
            b.iter(|| snip(black_box(input), TrimWindow::default()))
        });

        let window = TrimWindow::new(Duration::from_secs(25), Some(Duration::from_secs(10)));
        group.bench_with_input(
            BenchmarkId::new("head_and_tail", minutes),
            &input,
            |b, input| b.iter(|| snip(black_box(input), window)),
        );
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
