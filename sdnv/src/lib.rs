/*!
Self-Delimiting Numeric Values (SDNV), as used by the RFC 5050 bundle
protocol.

An SDNV carries an unsigned integer in big-endian groups of 7 bits. Every
byte except the last has its high bit set, so the width of an encoded value
can be discovered by scanning for the first byte with a clear high bit.
*/
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod decode;
pub mod encode;


#[cfg(test)]
mod encode_tests;

use thiserror::Error;

/// Maximum encoded width of a 32-bit value.
pub const MAX_LEN_U32: usize = 5;

/// Maximum encoded width of a 64-bit value.
pub const MAX_LEN_U64: usize = 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Buffer of {available} bytes is too small for a {needed} byte SDNV")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Not enough data for encoded value")]
    NotEnoughData,

    #[error("SDNV is not terminated before the end of the data")]
    Unterminated,

    #[error("SDNV has zero width")]
    Empty,

    #[error("SDNV continuation bits are inconsistent with its width")]
    InvalidEncoding,

    #[error("SDNV value does not fit in {0} bits")]
    Overflow(u32),
}
