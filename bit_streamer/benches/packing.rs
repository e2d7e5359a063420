// benches/packing.rs

use bit_streamer::BitStreamer;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const FIELDS: usize = 4_096;

fn bench_write_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bits");
    group.throughput(Throughput::Elements(FIELDS as u64));

    for bits in [8u32, 13, 32, 64] {
        let mut bs = BitStreamer::new();
        bs.reset_write_sized(FIELDS * 8).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            b.iter(|| {
                bs.reset_write().unwrap();
                for i in 0..FIELDS as u64 {
                    bs.write_bits(black_box(i), bits).unwrap();
                }
                bs.bytes_used()
            });
        });
    }
    group.finish();
}

fn bench_read_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_bits");
    group.throughput(Throughput::Elements(FIELDS as u64));

    for bits in [8u32, 13, 32, 64] {
        let mut bs = BitStreamer::new();
        bs.reset_write_sized(FIELDS * 8).unwrap();
        for i in 0..FIELDS as u64 {
            bs.write_bits(i, bits).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            b.iter(|| {
                bs.reset_read().unwrap();
                let mut sum = 0u64;
                for _ in 0..FIELDS {
                    sum = sum.wrapping_add(black_box(bs.read_bits(bits).unwrap()));
                }
                sum
            });
        });
    }
    group.finish();
}

fn bench_bulk_bytes(c: &mut Criterion) {
    let sizes = vec![64, 1_024, 16_384];

    let mut group = c.benchmark_group("write_bytes");
    for size in sizes {
        let payload: Vec<u8> = (0..size).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));

        for (label, lead) in [("aligned", 0u32), ("unaligned", 3)] {
            let mut bs = BitStreamer::new();
            bs.reset_write_sized(size + 8).unwrap();

            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    bs.reset_write().unwrap();
                    if lead > 0 {
                        bs.write_bits(0, lead).unwrap();
                    }
                    bs.write_bytes(black_box(&payload)).unwrap();
                    bs.bit_offset()
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_write_widths, bench_read_widths, bench_bulk_bytes);
criterion_main!(benches);
