//! Error types for E2E profile operations.
//!
//! Only structural argument problems are errors. A frame that fails
//! verification (wrong CRC, stale counter, foreign DataID) is the normal
//! negative outcome of `check` and is reported as `Ok(false)`, never as an
//! error.

use thiserror::Error;

/// The error type for E2E profile operations.
///
/// Every variant is raised before the frame is touched: a failed `protect`
/// call leaves the buffer byte-for-byte unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum E2eError {
    /// Frame buffer shorter than the profile's minimum.
    #[error("Frame too short: need at least {needed} bytes, have {available}")]
    FrameTooShort {
        /// Minimum frame size for the profile.
        needed: usize,
        /// Actual buffer size.
        available: usize,
    },

    /// The `length` argument falls outside the profile's valid range.
    #[error("Length {length} out of range: must fulfill {min} <= length <= {max}")]
    LengthOutOfRange {
        /// The rejected length.
        length: usize,
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length for this frame.
        max: usize,
    },

    /// The header `offset` argument does not leave room for the header, or
    /// places it outside the CRC-covered region.
    #[error("Offset {offset} out of range: must be at most {max}")]
    OffsetOutOfRange {
        /// The rejected offset.
        offset: usize,
        /// Largest accepted offset for this frame.
        max: usize,
    },

    /// Profile 2 requires a DataID list of exactly 16 bytes.
    #[error("Data ID list must contain exactly 16 bytes, got {len}")]
    InvalidDataIdList {
        /// Actual list length.
        len: usize,
    },
}

/// Result type alias for E2E profile operations.
pub type Result<T> = std::result::Result<T, E2eError>;

impl E2eError {
    /// Create a frame-too-short error.
    pub fn frame_too_short(needed: usize, available: usize) -> Self {
        Self::FrameTooShort { needed, available }
    }

    /// Create a length-out-of-range error.
    pub fn length_out_of_range(length: usize, min: usize, max: usize) -> Self {
        Self::LengthOutOfRange { length, min, max }
    }

    /// Create an offset-out-of-range error.
    pub fn offset_out_of_range(offset: usize, max: usize) -> Self {
        Self::OffsetOutOfRange { offset, max }
    }

    /// Create an invalid DataID list error.
    pub fn invalid_data_id_list(len: usize) -> Self {
        Self::InvalidDataIdList { len }
    }
}
