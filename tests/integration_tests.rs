//! Integration tests for framelay
//!
//! These tests verify the full pipeline: layout description, validation,
//! and record decoding against hand-built wire buffers.

use framelay::*;

/// Telemetry-style layout used by several tests: start code, mixed-endian
/// readings, a scaled float, packed flag bits, CRC16 trailer.
fn telemetry_layout() -> ApprovedLayout {
    LayoutConfig::builder(20)
        .header(&[0x02, 0x03], 2)
        .checksum(ChecksumKind::Crc16, 2)
        .field(FieldDescriptor::new("test.uint8_val", 2, FieldType::U8))
        .field(FieldDescriptor::new("test.uint16_big", 3, FieldType::U16))
        .field(FieldDescriptor::new("test.uint16_little", 5, FieldType::U16).little_endian())
        .field(FieldDescriptor::new("test.float_val", 7, FieldType::F32).scaled(2.0, 1.5))
        .field(FieldDescriptor::new("bit.flag1", 11, FieldType::Bool).bits(0, 1))
        .field(FieldDescriptor::new("bit.mode", 11, FieldType::U8).bits(1, 3))
        .validate()
        .unwrap()
}

/// Build a valid 20-byte telemetry record
fn telemetry_buffer() -> [u8; 20] {
    let mut buf = [0u8; 20];
    buf[0] = 0x02;
    buf[1] = 0x03;
    buf[2] = 10;
    // uint16 big endian = 0x1234
    buf[3] = 0x12;
    buf[4] = 0x34;
    // uint16 little endian = 0xABCD
    buf[5] = 0xCD;
    buf[6] = 0xAB;
    // float 1.0 (0x3F800000), big endian
    buf[7..11].copy_from_slice(&0x3F80_0000u32.to_be_bytes());
    // flag1 = 1 (bit 0), mode = 5 (bits 1..4): 0b1011
    buf[11] = 0x0B;

    let crc = crc16::crc16(&buf[..18]);
    buf[18..20].copy_from_slice(&crc.to_le_bytes());
    buf
}

#[test]
fn test_telemetry_record_end_to_end() {
    let layout = telemetry_layout();
    let buf = telemetry_buffer();
    let record = RecordDecoder::new(&layout).decode(&buf).unwrap();

    assert_eq!(record["test.uint8_val"], Value::U64(10));
    assert_eq!(record["test.uint16_big"], Value::U64(0x1234));
    assert_eq!(record["test.uint16_little"], Value::U64(0xABCD));
    assert_eq!(record["test.float_val"], Value::F64(3.5)); // 1.0 * 2.0 + 1.5
    assert_eq!(record["bit.flag1"], Value::Bool(true));
    assert_eq!(record["bit.mode"], Value::U64(5));
}

#[test]
fn test_corrupted_trailer_is_checksum_mismatch() {
    let layout = telemetry_layout();
    let mut buf = telemetry_buffer();
    buf[18] ^= 0xFF;

    let err = RecordDecoder::new(&layout).decode(&buf).unwrap_err();
    assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
}

#[test]
fn test_corrupted_payload_is_checksum_mismatch() {
    let layout = telemetry_layout();
    let mut buf = telemetry_buffer();
    buf[4] ^= 0x01;

    let err = RecordDecoder::new(&layout).decode(&buf).unwrap_err();
    assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
}

#[test]
fn test_wrong_start_code_is_header_mismatch() {
    let layout = telemetry_layout();
    let mut buf = telemetry_buffer();
    buf[0] = 0xFF;

    let err = RecordDecoder::new(&layout).decode(&buf).unwrap_err();
    assert_eq!(
        err,
        DecodeError::HeaderMismatch {
            index: 0,
            expected: 0x02,
            actual: 0xFF,
        }
    );
}

#[test]
fn test_header_checked_before_checksum() {
    // Both the start code and the trailer are wrong; the header is blamed
    // because preconditions run in pipeline order.
    let layout = telemetry_layout();
    let mut buf = telemetry_buffer();
    buf[1] = 0x00;
    buf[19] ^= 0xFF;

    let err = RecordDecoder::new(&layout).decode(&buf).unwrap_err();
    assert!(matches!(err, DecodeError::HeaderMismatch { index: 1, .. }));
}

#[test]
fn test_short_buffer_checked_first() {
    let layout = telemetry_layout();
    let err = RecordDecoder::new(&layout).decode(&[0xFF; 5]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::BufferTooShort {
            actual: 5,
            needed: 20,
        }
    );
}

#[test]
fn test_config_text_to_decode_end_to_end() {
    let text = "\
[Header]
TotalLength=8
StartCode=AA
StartCodeLength=1
CRCAlgo=CRC16
CRCLength=2

[reading]
ByteOffset=1
Type=uint16
Endian=big

[temp]
ByteOffset=3
Type=int8
Scale=0.5
Bias=-40
";
    let layout = config::parse_str(text).unwrap().validate().unwrap();

    let mut buf = [0xAAu8, 0x12, 0x34, 100, 0, 0, 0, 0];
    let crc = crc16::crc16(&buf[..6]);
    buf[6..8].copy_from_slice(&crc.to_le_bytes());

    let record = RecordDecoder::new(&layout).decode(&buf).unwrap();
    assert_eq!(record["reading"], Value::U64(0x1234));
    assert_eq!(record["temp"], Value::F64(10.0));
}

#[test]
fn test_layout_shared_across_threads() {
    use std::sync::Arc;

    let layout = Arc::new(telemetry_layout());
    let buf = telemetry_buffer();

    let expected = RecordDecoder::new(&layout).decode(&buf).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let layout = Arc::clone(&layout);
            std::thread::spawn(move || RecordDecoder::new(&layout).decode(&buf).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_decoding_does_not_mutate_buffer() {
    let layout = telemetry_layout();
    let buf = telemetry_buffer();
    let copy = buf;

    let _ = RecordDecoder::new(&layout).decode(&buf).unwrap();
    assert_eq!(buf, copy);
}

#[test]
fn test_checklist_reflects_layout() {
    let layout = telemetry_layout();
    let text = report::checklist(layout.config());
    assert!(text.contains("Total Length: 20 bytes"));
    assert!(text.contains("0x0203"));
    assert!(text.contains("CRC16"));
    assert!(text.contains("Fields (6):"));
}

#[test]
fn test_flat_dump_lists_every_field() {
    let layout = telemetry_layout();
    let record = RecordDecoder::new(&layout)
        .decode(&telemetry_buffer())
        .unwrap();
    let dump = report::dump_flat(&record);

    for field in &layout.config().fields {
        assert!(dump.contains(&field.name));
    }
    assert!(dump.contains("test.uint16_big = 4660"));
    assert!(dump.contains("bit.flag1 = true"));
}

#[cfg(feature = "json")]
#[test]
fn test_json_export_nests_dotted_names() {
    let layout = telemetry_layout();
    let record = RecordDecoder::new(&layout)
        .decode(&telemetry_buffer())
        .unwrap();
    let tree = report::json::json_tree(&record);

    assert_eq!(tree["test"]["uint8_val"], serde_json::json!(10));
    assert_eq!(tree["test"]["uint16_big"], serde_json::json!(0x1234));
    assert_eq!(tree["bit"]["flag1"], serde_json::json!(true));
    assert_eq!(tree["bit"]["mode"], serde_json::json!(5));
}

#[test]
fn test_validation_rejects_every_overlap_kind() {
    // field vs field
    let config = LayoutConfig::builder(8)
        .field(FieldDescriptor::new("a", 0, FieldType::U32))
        .field(FieldDescriptor::new("b", 3, FieldType::U8))
        .build();
    assert!(matches!(
        config.validate().unwrap_err(),
        LayoutError::Overlap { .. }
    ));

    // field vs header
    let config = LayoutConfig::builder(8)
        .header(&[0x01], 1)
        .field(FieldDescriptor::new("a", 0, FieldType::U8))
        .build();
    assert!(matches!(
        config.validate().unwrap_err(),
        LayoutError::Overlap {
            prior: Claimant::Header,
            ..
        }
    ));

    // field vs checksum trailer
    let config = LayoutConfig::builder(8)
        .checksum(ChecksumKind::Crc16, 2)
        .field(FieldDescriptor::new("a", 6, FieldType::U16))
        .build();
    assert!(matches!(
        config.validate().unwrap_err(),
        LayoutError::Overlap {
            prior: Claimant::Checksum,
            ..
        }
    ));
}

#[test]
fn test_approved_layout_survives_repeated_decodes() {
    let layout = telemetry_layout();
    let decoder = RecordDecoder::new(&layout);
    let buf = telemetry_buffer();

    let first = decoder.decode(&buf).unwrap();
    for _ in 0..100 {
        assert_eq!(decoder.decode(&buf).unwrap(), first);
    }
}
