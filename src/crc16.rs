//! CRC16 (MODBUS) implementation for trailer verification
//!
//! This module provides the single checksum algorithm the crate supports:
//! 16-bit CRC with the bit-reversed polynomial 0xA001 and initial register
//! 0xFFFF, as used by MODBUS RTU. The trailer stores the result
//! least-significant-byte-first.

/// Bit-reversed CRC16 polynomial (MODBUS)
const CRC16_POLYNOMIAL: u16 = 0xA001;

/// Initial register value
const CRC16_INIT: u16 = 0xFFFF;

/// Pre-computed CRC16 lookup table
static CRC16_TABLE: [u16; 256] = generate_crc16_table();

/// Generate CRC16 lookup table at compile time
const fn generate_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u16;
        let mut j = 0;

        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ CRC16_POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Compute the CRC16/MODBUS checksum of the given data
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = CRC16_INIT;

    for &byte in data {
        let table_idx = ((crc ^ byte as u16) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC16_TABLE[table_idx];
    }

    crc
}

/// Verify a CRC16 checksum against an expected value
#[inline]
pub fn verify_crc16(data: &[u8], expected: u16) -> bool {
    crc16(data) == expected
}

/// Read a trailer checksum stored least-significant-byte-first
#[inline]
pub fn read_trailer(buf: &[u8]) -> u16 {
    debug_assert!(buf.len() >= 2);
    u16::from_le_bytes([buf[0], buf[1]])
}
