//! E2E Profile 2: CRC-8 H2F protection with a rolling DataID list.
//!
//! Layout (fixed, no configurable offset):
//!
//! ```text
//! byte 0              CRC-8 H2F over data + selected DataID byte
//! byte 1, bits 0-3    alive counter, 0..=15, increments modulo 16
//! ```
//!
//! Nothing of the DataID travels in the frame. Sender and receiver share a
//! 16-byte `data_id_list`; the alive counter selects which list byte is fed
//! into the CRC after the payload, so a frame only verifies against a peer
//! holding the same list.

use oxie2e_core::crc::Crc8H2f;

use crate::error::{E2eError, Result};

/// Byte holding the CRC.
const CRC_POS: usize = 0;
/// Byte holding the alive counter in its low nibble.
const COUNTER_POS: usize = 1;
/// Required size of the shared DataID list.
const DATA_ID_LIST_LEN: usize = 16;

fn compute_crc(data: &[u8], length: usize, data_id_byte: u8) -> u8 {
    let mut crc = Crc8H2f::new();
    crc.update(&data[CRC_POS + 1..=length]);
    crc.update(&[data_id_byte]);
    crc.finalize()
}

fn validate(data_len: usize, length: usize, list_len: usize, min_frame: usize) -> Result<()> {
    if data_len < min_frame {
        return Err(E2eError::frame_too_short(min_frame, data_len));
    }
    if length < 1 || length > data_len - 1 {
        return Err(E2eError::length_out_of_range(length, 1, data_len - 1));
    }
    if list_len != DATA_ID_LIST_LEN {
        return Err(E2eError::invalid_data_id_list(list_len));
    }
    Ok(())
}

/// Protect `data` in place according to E2E Profile 2.
///
/// `length` is the number of data bytes covered by the CRC and must fulfill
/// `1 <= length <= data.len() - 1`. `data_id_list` must contain exactly 16
/// bytes; the entry indexed by the (post-increment) counter is folded into
/// the CRC after the payload.
pub fn protect(
    data: &mut [u8],
    length: usize,
    data_id_list: &[u8],
    increment_counter: bool,
) -> Result<()> {
    validate(data.len(), length, data_id_list.len(), 3)?;

    let mut counter = data[COUNTER_POS] & 0x0F;
    if increment_counter {
        counter = (counter + 1) % 16;
        data[COUNTER_POS] = (data[COUNTER_POS] & 0xF0) | counter;
    }

    data[CRC_POS] = compute_crc(data, length, data_id_list[counter as usize]);
    Ok(())
}

/// Verify a Profile 2 frame.
///
/// Recomputes the CRC with the stored counter's DataID list entry and
/// compares it against byte 0. The frame is never mutated.
pub fn check(data: &[u8], length: usize, data_id_list: &[u8]) -> Result<bool> {
    validate(data.len(), length, data_id_list.len(), 2)?;

    let counter = data[COUNTER_POS] & 0x0F;
    Ok(data[CRC_POS] == compute_crc(data, length, data_id_list[counter as usize]))
}
