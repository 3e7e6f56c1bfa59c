//! Criterion benchmarks for framelay
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use framelay::*;

fn telemetry_config() -> LayoutConfig {
    LayoutConfig::builder(20)
        .header(&[0x02, 0x03], 2)
        .checksum(ChecksumKind::Crc16, 2)
        .field(FieldDescriptor::new("counter", 2, FieldType::U8))
        .field(FieldDescriptor::new("speed", 3, FieldType::U16))
        .field(FieldDescriptor::new("temp", 5, FieldType::U16).little_endian())
        .field(FieldDescriptor::new("ratio", 7, FieldType::F32).scaled(2.0, 1.5))
        .field(FieldDescriptor::new("flags.enabled", 11, FieldType::Bool).bits(0, 1))
        .field(FieldDescriptor::new("flags.mode", 11, FieldType::U8).bits(1, 3))
        .build()
}

fn telemetry_buffer() -> [u8; 20] {
    let mut buf = [0u8; 20];
    buf[0] = 0x02;
    buf[1] = 0x03;
    buf[2] = 10;
    buf[3..5].copy_from_slice(&0x1234u16.to_be_bytes());
    buf[5..7].copy_from_slice(&0xABCDu16.to_le_bytes());
    buf[7..11].copy_from_slice(&1.0f32.to_be_bytes());
    buf[11] = 0x0B;
    let crc = crc16::crc16(&buf[..18]);
    buf[18..20].copy_from_slice(&crc.to_le_bytes());
    buf
}

fn bench_validate(c: &mut Criterion) {
    let config = telemetry_config();

    c.bench_function("validate_telemetry_layout", |b| {
        b.iter(|| {
            let layout = black_box(config.clone()).validate().unwrap();
            black_box(layout);
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let layout = telemetry_config().validate().unwrap();
    let decoder = RecordDecoder::new(&layout);
    let buf = telemetry_buffer();

    c.bench_function("decode_telemetry_record", |b| {
        b.iter(|| {
            let record = decoder.decode(black_box(&buf)).unwrap();
            black_box(record);
        });
    });
}

fn bench_crc16(c: &mut Criterion) {
    let data = vec![0xA5u8; 1024];

    c.bench_function("crc16_1k", |b| {
        b.iter(|| black_box(crc16::crc16(black_box(&data))));
    });
}

criterion_group!(benches, bench_validate, bench_decode, bench_crc16);
criterion_main!(benches);
