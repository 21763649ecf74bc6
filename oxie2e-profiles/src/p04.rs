//! E2E Profile 4: CRC-32 P4 protection for large frames.
//!
//! Header layout, 12 bytes at `offset`:
//!
//! ```text
//! offset + 0   length   u16 big-endian
//! offset + 2   counter  u16 big-endian, natural wrap
//! offset + 4   DataID   u32 big-endian
//! offset + 8   CRC-32 P4 u32 big-endian
//! ```
//!
//! The CRC covers everything from the start of the buffer up to the CRC
//! field, then the payload from the end of the header up to `length`. The
//! CRC field itself is excluded.

use oxie2e_core::crc::Crc32P4;
use oxie2e_core::field;

use crate::error::{E2eError, Result};

const LENGTH_POS: usize = 0;
const COUNTER_POS: usize = 2;
const DATA_ID_POS: usize = 4;
const CRC_POS: usize = 8;
/// Total header size in bytes.
pub const HEADER_LEN: usize = 12;

fn compute_crc(data: &[u8], length: usize, offset: usize) -> u32 {
    let mut crc = Crc32P4::new();
    crc.update(&data[..offset + CRC_POS]);
    if offset + HEADER_LEN < length {
        crc.update(&data[offset + HEADER_LEN..length]);
    }
    crc.finalize()
}

fn validate(data_len: usize, length: usize, offset: usize) -> Result<()> {
    if data_len < HEADER_LEN {
        return Err(E2eError::frame_too_short(HEADER_LEN, data_len));
    }
    // The length travels in a 2-byte field.
    let max_length = data_len.min(u16::MAX as usize);
    if length < HEADER_LEN || length > max_length {
        return Err(E2eError::length_out_of_range(length, HEADER_LEN, max_length));
    }
    if offset > data_len - HEADER_LEN {
        return Err(E2eError::offset_out_of_range(offset, data_len - HEADER_LEN));
    }
    Ok(())
}

/// Protect `data` in place according to E2E Profile 4.
///
/// Writes the length, counter, DataID and CRC fields of the header at
/// `offset`. `length` must fulfill `12 <= length <= data.len()`. When
/// `increment_counter` is set the stored 16-bit counter advances (wrapping)
/// before the CRC is computed.
pub fn protect(
    data: &mut [u8],
    length: usize,
    data_id: u32,
    offset: usize,
    increment_counter: bool,
) -> Result<()> {
    validate(data.len(), length, offset)?;

    field::write_u16_be(data, offset + LENGTH_POS, length as u16);

    if increment_counter {
        let counter = field::read_u16_be(data, offset + COUNTER_POS).wrapping_add(1);
        field::write_u16_be(data, offset + COUNTER_POS, counter);
    }

    field::write_u32_be(data, offset + DATA_ID_POS, data_id);

    let crc = compute_crc(data, length, offset);
    field::write_u32_be(data, offset + CRC_POS, crc);
    Ok(())
}

/// Verify a Profile 4 frame.
///
/// Returns `Ok(true)` only when the stored length equals `length`, the
/// stored DataID equals `data_id`, and the stored CRC matches the
/// recomputed one. The frame is never mutated.
pub fn check(data: &[u8], length: usize, data_id: u32, offset: usize) -> Result<bool> {
    validate(data.len(), length, offset)?;

    let length_actual = field::read_u16_be(data, offset + LENGTH_POS);
    let data_id_actual = field::read_u32_be(data, offset + DATA_ID_POS);
    let crc_actual = field::read_u32_be(data, offset + CRC_POS);

    let crc = compute_crc(data, length, offset);

    Ok(length_actual as usize == length && data_id_actual == data_id && crc_actual == crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_known_frame() {
        let mut data = [0u8; 16];
        protect(&mut data, 16, 0x0A0B0C0D, 0, false).unwrap();
        assert_eq!(
            data,
            [
                0x00, 0x10, 0x00, 0x00, 0x0A, 0x0B, 0x0C, 0x0D, 0x86, 0x2B, 0x05, 0x56, 0x00,
                0x00, 0x00, 0x00
            ]
        );
        assert!(check(&data, 16, 0x0A0B0C0D, 0).unwrap());
    }

    #[test]
    fn test_protect_known_frame_with_offset() {
        let mut data = [0u8; 24];
        protect(&mut data, 24, 0x0A0B0C0D, 8, false).unwrap();
        assert_eq!(&data[8..10], &[0x00, 0x18]); // length
        assert_eq!(&data[10..12], &[0x00, 0x00]); // counter
        assert_eq!(&data[12..16], &[0x0A, 0x0B, 0x0C, 0x0D]); // DataID
        assert_eq!(&data[16..20], &[0x69, 0xD7, 0x50, 0x2E]); // CRC
        assert!(check(&data, 24, 0x0A0B0C0D, 8).unwrap());
    }

    #[test]
    fn test_counter_advance_and_crc_domain() {
        let mut data = [0u8; 16];
        protect(&mut data, 16, 0xDEADBEEF, 0, true).unwrap();
        assert_eq!(&data[0..2], &[0x00, 0x10]);
        assert_eq!(&data[2..4], &[0x00, 0x01]);
        assert_eq!(&data[4..8], &[0xDE, 0xAD, 0xBE, 0xEF]);
        let expected = {
            let mut crc = Crc32P4::new();
            crc.update(&data[..8]);
            crc.update(&data[12..16]);
            crc.finalize()
        };
        assert_eq!(field::read_u32_be(&data, 8), expected);
        assert_eq!(&data[12..16], &[0x00, 0x00, 0x00, 0x00]);
        assert!(check(&data, 16, 0xDEADBEEF, 0).unwrap());
    }

    #[test]
    fn test_counter_wraps_naturally() {
        let mut data = [0u8; 12];
        data[2] = 0xFF;
        data[3] = 0xFF;
        protect(&mut data, 12, 0x42, 0, true).unwrap();
        assert_eq!(field::read_u16_be(&data, 2), 0x0000);
        assert!(check(&data, 12, 0x42, 0).unwrap());
    }

    #[test]
    fn test_header_only_frame_skips_payload_segment() {
        // length == offset + HEADER_LEN: there is no payload after the
        // header and the second CRC segment is empty.
        let mut data = [0xAAu8; 20];
        protect(&mut data, 12, 0x1234, 0, true).unwrap();
        assert!(check(&data, 12, 0x1234, 0).unwrap());
        // Bytes past `length` are not covered.
        data[15] = 0x00;
        assert!(check(&data, 12, 0x1234, 0).unwrap());
    }

    #[test]
    fn test_mismatches_rejected() {
        let mut data = [0u8; 16];
        protect(&mut data, 16, 0x0A0B0C0D, 0, true).unwrap();

        assert!(!check(&data, 16, 0x0A0B0C0E, 0).unwrap());

        let mut flipped = data;
        flipped[13] ^= 0x01; // payload corruption
        assert!(!check(&flipped, 16, 0x0A0B0C0D, 0).unwrap());

        let mut wrong_len = data;
        wrong_len[1] = 0x0F; // stored length disagrees
        assert!(!check(&wrong_len, 16, 0x0A0B0C0D, 0).unwrap());
    }

    #[test]
    fn test_validation() {
        let mut data = [0u8; 16];
        assert_eq!(
            protect(&mut data, 11, 0, 0, true),
            Err(E2eError::length_out_of_range(11, 12, 16))
        );
        assert_eq!(
            protect(&mut data, 17, 0, 0, true),
            Err(E2eError::length_out_of_range(17, 12, 16))
        );
        assert_eq!(
            protect(&mut data, 16, 0, 5, true),
            Err(E2eError::offset_out_of_range(5, 4))
        );
        assert_eq!(data, [0u8; 16]);

        let mut tiny = [0u8; 11];
        assert_eq!(
            protect(&mut tiny, 11, 0, 0, true),
            Err(E2eError::frame_too_short(12, 11))
        );
    }
}
