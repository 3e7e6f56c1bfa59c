//! Basic usage example for framelay
//!
//! Run with: cargo run --example basic_usage

use framelay::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Framelay Basic Usage Example");
    println!("============================");

    // 1. Describe the record layout.
    let layout = LayoutConfig::builder(12)
        .header(&[0x02, 0x03], 2)
        .checksum(ChecksumKind::Crc16, 2)
        .field(FieldDescriptor::new("sensor.speed", 2, FieldType::U16))
        .field(
            FieldDescriptor::new("sensor.temp", 4, FieldType::I16)
                .little_endian()
                .scaled(0.5, -40.0),
        )
        .field(FieldDescriptor::new("flags.active", 6, FieldType::Bool).bits(0, 1))
        .field(FieldDescriptor::new("flags.mode", 6, FieldType::U8).bits(1, 3))
        .validate()?;

    println!("\n{}", report::checklist(layout.config()));

    // 2. Build a wire buffer the way a device would.
    let mut buf = [0u8; 12];
    buf[0] = 0x02;
    buf[1] = 0x03;
    buf[2..4].copy_from_slice(&1500u16.to_be_bytes()); // speed
    buf[4..6].copy_from_slice(&120i16.to_le_bytes()); // temp raw: 120 * 0.5 - 40 = 20.0
    buf[6] = 0b0000_0101; // active = 1, mode = 2
    let crc = crc16::crc16(&buf[..10]);
    buf[10..12].copy_from_slice(&crc.to_le_bytes());

    // 3. Decode and print.
    let record = RecordDecoder::new(&layout).decode(&buf)?;
    println!("Decoded record:\n{}", report::dump_flat(&record));

    // 4. Corruption is caught before any field is extracted.
    let mut corrupted = buf;
    corrupted[3] ^= 0x01;
    match RecordDecoder::new(&layout).decode(&corrupted) {
        Err(err) => println!("Corrupted buffer rejected: {err}"),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
