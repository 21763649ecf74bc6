//! # OxiE2E Core
//!
//! Core components for the OxiE2E protection library.
//!
//! This crate provides the primitives the E2E profile codecs are built on:
//!
//! - [`crc`]: the seven table-driven CRC variants used by AUTOSAR E2E,
//!   with support for segmented (multi-call) computation
//! - [`field`]: fixed-width header field access in little- and big-endian
//!   byte order
//!
//! ## Architecture
//!
//! OxiE2E is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     oxie2e command-line protect/check/crc               │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Profile codecs                                      │
//! │     P01/P02/P04/P05/P06/P07 protect + check             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Primitives (this crate)                             │
//! │     CRC engine, header field access                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxie2e_core::crc::Crc32P4;
//! use oxie2e_core::field;
//!
//! // Compute the AUTOSAR CRC-32 P4 over a frame header
//! let crc = Crc32P4::compute(b"123456789");
//! assert_eq!(crc, 0x1697D06A);
//!
//! // Write it into a buffer in big-endian byte order
//! let mut buf = [0u8; 8];
//! field::write_u32_be(&mut buf, 4, crc);
//! assert_eq!(field::read_u32_be(&buf, 4), crc);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod crc;
pub mod field;

// Re-exports for convenience
pub use crc::{Crc8, Crc8H2f, Crc16, Crc16Arc, Crc32, Crc32P4, Crc64};
