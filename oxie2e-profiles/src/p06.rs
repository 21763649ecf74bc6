//! E2E Profile 6: CRC-16 protection with an explicit length field.
//!
//! Header layout, 5 bytes at `offset`:
//!
//! ```text
//! offset + 0   CRC-16 (CCITT-FALSE)  u16 big-endian
//! offset + 2   length                u16 big-endian
//! offset + 4   counter               u8, natural wrap
//! ```
//!
//! The CRC covers everything except its own two bytes, up to `length`,
//! followed by the DataID high byte and then the low byte. The feed order
//! is the opposite of Profile 5.

use oxie2e_core::crc::Crc16;
use oxie2e_core::field;

use crate::error::{E2eError, Result};

const CRC_POS: usize = 0;
const LENGTH_POS: usize = 2;
const COUNTER_POS: usize = 4;
/// Total header size in bytes.
pub const HEADER_LEN: usize = 5;

fn compute_crc(data: &[u8], length: usize, data_id: u16, offset: usize) -> u16 {
    let mut crc = Crc16::new();
    crc.update(&data[..offset]);
    crc.update(&data[offset + LENGTH_POS..length]);
    crc.update(&[(data_id >> 8) as u8]);
    crc.update(&[data_id as u8]);
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
    // The length and counter fields must sit inside the covered region,
    // otherwise the CRC range below is ill-formed.
    let max_offset = (data_len - HEADER_LEN).min(length - LENGTH_POS);
    if offset > max_offset {
        return Err(E2eError::offset_out_of_range(offset, max_offset));
    }
    Ok(())
}

/// Protect `data` in place according to E2E Profile 6.
///
/// Writes the length, counter and CRC fields of the header at `offset`.
/// `length` must fulfill `5 <= length <= data.len()`. When
/// `increment_counter` is set the counter byte advances (wrapping) before
/// the CRC is computed.
pub fn protect(
    data: &mut [u8],
    length: usize,
    data_id: u16,
    offset: usize,
    increment_counter: bool,
) -> Result<()> {
    validate(data.len(), length, offset)?;

    field::write_u16_be(data, offset + LENGTH_POS, length as u16);

    if increment_counter {
        data[offset + COUNTER_POS] = data[offset + COUNTER_POS].wrapping_add(1);
    }

    let crc = compute_crc(data, length, data_id, offset);
    field::write_u16_be(data, offset + CRC_POS, crc);
    Ok(())
}

/// Verify a Profile 6 frame.
///
/// Returns `Ok(true)` only when the stored length equals `length` and the
/// stored CRC matches the recomputed one. The frame is never mutated.
pub fn check(data: &[u8], length: usize, data_id: u16, offset: usize) -> Result<bool> {
    validate(data.len(), length, offset)?;

    let length_actual = field::read_u16_be(data, offset + LENGTH_POS);
    let crc_actual = field::read_u16_be(data, offset + CRC_POS);

    let crc = compute_crc(data, length, data_id, offset);

    Ok(length_actual as usize == length && crc_actual == crc)
}
