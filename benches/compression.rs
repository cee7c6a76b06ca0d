use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use replib::{compress_bytes, decompress_bytes, RepConfig};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            // repeated prose with long-range structure
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "noise" => {
            // incompressible filler
            let mut state = 0x9E37_79B9u32;
            (0..size)
                .map(|_| {
                    state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    (state >> 24) as u8
                })
                .collect()
        }
        "dedup" => {
            // one distinctive megabyte-scale unit repeated end to end
            let mut state = 0x1234_5678u32;
            let unit: Vec<u8> = (0..64 * 1024)
                .map(|_| {
                    state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    (state >> 24) as u8
                })
                .collect();
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(&unit);
            }
            data.truncate(size);
            data
        }
        _ => unreachable!(),
    }
}

fn bench_config() -> RepConfig {
    RepConfig {
        block_size: 4 << 20,
        min_len: 64,
        smallest_len: 64,
        ..RepConfig::default()
    }
}

fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.measurement_time(Duration::from_secs(10));

    let size = 4 << 20;
    for pattern in ["text", "noise", "dedup"] {
        let data = generate_test_data(size, pattern);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &data, |b, data| {
            b.iter(|| compress_bytes(black_box(data), &bench_config()).unwrap());
        });
    }
    group.finish();
}

fn bench_decompression(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    group.measurement_time(Duration::from_secs(10));

    let size = 4 << 20;
    for pattern in ["text", "noise", "dedup"] {
        let data = generate_test_data(size, pattern);
        let packed = compress_bytes(&data, &bench_config()).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &packed, |b, packed| {
            b.iter(|| decompress_bytes(black_box(packed)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compression, bench_decompression);
criterion_main!(benches);
