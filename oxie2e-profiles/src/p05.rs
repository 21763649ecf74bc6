//! E2E Profile 5: CRC-16 protection with a free-running byte counter.
//!
//! Header layout, 3 bytes at `offset`:
//!
//! ```text
//! offset + 0   CRC-16 (CCITT-FALSE)  u16 little-endian
//! offset + 2   counter               u8, natural wrap
//! ```
//!
//! The CRC is the only little-endian field in any profile. It covers
//! `length` bytes of the frame with the two CRC bytes skipped, followed by
//! the DataID low byte and then the high byte. The DataID itself never
//! travels in the frame.

use oxie2e_core::crc::Crc16;
use oxie2e_core::field;

use crate::error::{E2eError, Result};

const CRC_POS: usize = 0;
const COUNTER_POS: usize = 2;
/// Total header size in bytes.
pub const HEADER_LEN: usize = 3;

fn compute_crc(data: &[u8], length: usize, data_id: u16, offset: usize) -> u16 {
    let mut crc = Crc16::new();
    crc.update(&data[..offset]);
    crc.update(&data[offset + COUNTER_POS..length + 2]);
    crc.update(&[data_id as u8]);
    crc.update(&[(data_id >> 8) as u8]);
    crc.finalize()
}

fn validate(data_len: usize, length: usize, offset: usize) -> Result<()> {
    if data_len <= HEADER_LEN {
        return Err(E2eError::frame_too_short(HEADER_LEN + 1, data_len));
    }
    if length < 1 || length > data_len - 2 {
        return Err(E2eError::length_out_of_range(length, 1, data_len - 2));
    }
    // The header must fit the buffer and sit inside the covered region,
    // otherwise the CRC range below is ill-formed.
    let max_offset = (data_len - HEADER_LEN).min(length);
    if offset > max_offset {
        return Err(E2eError::offset_out_of_range(offset, max_offset));
    }
    Ok(())
}

/// Protect `data` in place according to E2E Profile 5.
///
/// `length` is the number of data bytes covered by the CRC (the two CRC
/// bytes themselves are skipped) and must fulfill
/// `1 <= length <= data.len() - 2`. When `increment_counter` is set the
/// counter byte advances (wrapping) before the CRC is computed.
pub fn protect(
    data: &mut [u8],
    length: usize,
    data_id: u16,
    offset: usize,
    increment_counter: bool,
) -> Result<()> {
    validate(data.len(), length, offset)?;

    if increment_counter {
        data[offset + COUNTER_POS] = data[offset + COUNTER_POS].wrapping_add(1);
    }

    let crc = compute_crc(data, length, data_id, offset);
    field::write_u16_le(data, offset + CRC_POS, crc);
    Ok(())
}

/// Verify a Profile 5 frame.
///
/// Recomputes the CRC and compares it against the stored little-endian
/// value. The counter is free-running and not range-checked. The frame is
/// never mutated.
pub fn check(data: &[u8], length: usize, data_id: u16, offset: usize) -> Result<bool> {
    validate(data.len(), length, offset)?;

    let crc = compute_crc(data, length, data_id, offset);
    Ok(field::read_u16_le(data, offset + CRC_POS) == crc)
}
