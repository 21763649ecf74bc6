//! E2E Profile 7: CRC-64 protection for very large frames.
//!
//! Header layout, 20 bytes at `offset`:
//!
//! ```text
//! offset + 0    CRC-64   u64 big-endian
//! offset + 8    length   u32 big-endian
//! offset + 12   counter  u32 big-endian, natural wrap
//! offset + 16   DataID   u32 big-endian
//! ```
//!
//! The CRC covers everything except its own eight bytes: the region before
//! the header, then the remaining header fields and payload up to `length`.

use oxie2e_core::crc::Crc64;
use oxie2e_core::field;

use crate::error::{E2eError, Result};

const CRC_POS: usize = 0;
const CRC_LEN: usize = 8;
const LENGTH_POS: usize = 8;
const COUNTER_POS: usize = 12;
const DATA_ID_POS: usize = 16;
/// Total header size in bytes.
pub const HEADER_LEN: usize = 20;

fn compute_crc(data: &[u8], length: usize, offset: usize) -> u64 {
    let mut crc = Crc64::new();
    crc.update(&data[..offset]);
    if offset + CRC_LEN < length {
        crc.update(&data[offset + CRC_LEN..length]);
    }
    crc.finalize()
}

fn validate(data_len: usize, length: usize, offset: usize) -> Result<()> {
    if data_len < HEADER_LEN {
        return Err(E2eError::frame_too_short(HEADER_LEN, data_len));
    }
    // The length travels in a 4-byte field.
    let max_length = data_len.min(u32::MAX as usize);
    if length < HEADER_LEN || length > max_length {
        return Err(E2eError::length_out_of_range(length, HEADER_LEN, max_length));
    }
    if offset > data_len - HEADER_LEN {
        return Err(E2eError::offset_out_of_range(offset, data_len - HEADER_LEN));
    }
    Ok(())
}

/// Protect `data` in place according to E2E Profile 7.
///
/// Writes the length, counter, DataID and CRC fields of the header at
/// `offset`. `length` must fulfill `20 <= length <= data.len()`. When
/// `increment_counter` is set the stored 32-bit counter advances (wrapping)
/// before the CRC is computed.
pub fn protect(
    data: &mut [u8],
    length: usize,
    data_id: u32,
    offset: usize,
    increment_counter: bool,
) -> Result<()> {
    validate(data.len(), length, offset)?;

    field::write_u32_be(data, offset + LENGTH_POS, length as u32);

    if increment_counter {
        let counter = field::read_u32_be(data, offset + COUNTER_POS).wrapping_add(1);
        field::write_u32_be(data, offset + COUNTER_POS, counter);
    }

    field::write_u32_be(data, offset + DATA_ID_POS, data_id);

    let crc = compute_crc(data, length, offset);
    field::write_u64_be(data, offset + CRC_POS, crc);
    Ok(())
}

/// Verify a Profile 7 frame.
///
/// Returns `Ok(true)` only when the stored length equals `length`, the
/// stored DataID equals `data_id`, and the stored CRC matches the
/// recomputed one. The frame is never mutated.
pub fn check(data: &[u8], length: usize, data_id: u32, offset: usize) -> Result<bool> {
    validate(data.len(), length, offset)?;

    let length_actual = field::read_u32_be(data, offset + LENGTH_POS);
    let data_id_actual = field::read_u32_be(data, offset + DATA_ID_POS);
    let crc_actual = field::read_u64_be(data, offset + CRC_POS);

    let crc = compute_crc(data, length, offset);

    Ok(length_actual as usize == length && data_id_actual == data_id && crc_actual == crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_known_frame() {
        let mut data = [0u8; 24];
        protect(&mut data, 24, 0x0A0B0C0D, 0, false).unwrap();
        // CRC
        assert_eq!(
            &data[0..8],
            &[0x1F, 0xB2, 0xE7, 0x37, 0xFC, 0xED, 0xBC, 0xD9]
        );
        // length
        assert_eq!(&data[8..12], &[0x00, 0x00, 0x00, 0x18]);
        // counter
        assert_eq!(&data[12..16], &[0x00, 0x00, 0x00, 0x00]);
        // DataID
        assert_eq!(&data[16..20], &[0x0A, 0x0B, 0x0C, 0x0D]);
        assert!(check(&data, 24, 0x0A0B0C0D, 0).unwrap());
    }

    #[test]
    fn test_roundtrip_with_offset() {
        let mut data = [0u8; 32];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = i as u8;
        }
        protect(&mut data, 32, 0xDEADBEEF, 8, true).unwrap();
        assert_eq!(field::read_u32_be(&data, 16), 0x00000020); // length
        assert!(check(&data, 32, 0xDEADBEEF, 8).unwrap());
        assert!(!check(&data, 32, 0xDEADBEEE, 8).unwrap());
    }

    #[test]
    fn test_counter_wraps_naturally() {
        let mut data = [0u8; 20];
        field::write_u32_be(&mut data, 12, 0xFFFFFFFF);
        protect(&mut data, 20, 0x42, 0, true).unwrap();
        assert_eq!(field::read_u32_be(&data, 12), 0x00000000);
        assert!(check(&data, 20, 0x42, 0).unwrap());
    }

    #[test]
    fn test_counter_cadence() {
        let mut data = [0u8; 24];
        for expected in 1..=4u32 {
            protect(&mut data, 24, 0x99, 0, true).unwrap();
            assert_eq!(field::read_u32_be(&data, 12), expected);
            assert!(check(&data, 24, 0x99, 0).unwrap());
        }
    }

    #[test]
    fn test_trailing_header_skips_payload_segment() {
        // With the header at the end of the covered region there is nothing
        // after the CRC bytes below `length`.
        let mut data = [0x77u8; 40];
        protect(&mut data, 20, 0x1234, 20, true).unwrap();
        assert!(check(&data, 20, 0x1234, 20).unwrap());
    }

    #[test]
    fn test_corruption_detected() {
        let mut data = [0u8; 28];
        protect(&mut data, 28, 0xCAFEBABE, 0, true).unwrap();

        for pos in [9, 13, 17, 21, 27] {
            let mut bad = data;
            bad[pos] ^= 0x01;
            assert!(!check(&bad, 28, 0xCAFEBABE, 0).unwrap(), "byte {}", pos);
        }
    }

    #[test]
    fn test_validation() {
        let mut data = [0u8; 24];
        assert_eq!(
            protect(&mut data, 19, 0, 0, true),
            Err(E2eError::length_out_of_range(19, 20, 24))
        );
        assert_eq!(
            protect(&mut data, 25, 0, 0, true),
            Err(E2eError::length_out_of_range(25, 20, 24))
        );
        assert_eq!(
            protect(&mut data, 20, 0, 5, true),
            Err(E2eError::offset_out_of_range(5, 4))
        );
        assert_eq!(data, [0u8; 24]);

        let mut tiny = [0u8; 19];
        assert_eq!(
            protect(&mut tiny, 20, 0, 0, true),
            Err(E2eError::frame_too_short(20, 19))
        );
    }
}
