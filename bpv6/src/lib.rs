/*!
A compact RFC 5050 style bundle codec for constrained DTN nodes.

A [`Bundle`](bundle::Bundle) is a single byte buffer plus an
[`OffsetTable`](offset_table::OffsetTable) recording where each logical
field lives. Fields are SDNV encoded, so changing one value can change its
width; the editor resizes the buffer and shifts every later field in one
step, keeping the table and the bytes consistent.

The [`redundancy`] module provides a bounded cache of recently seen bundle
fingerprints used to suppress duplicate delivery and forwarding.
*/
#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

use alloc::vec::Vec;
use hardy_sdnv as sdnv;
use tracing::*;

pub mod block_flags;
pub mod builder;
pub mod bundle;
pub mod bundle_flags;
pub mod error;
pub mod field;
pub mod offset_table;
pub mod redundancy;

mod editor;

#[cfg(test)]
mod editor_tests;


pub use error::{Error, ErrorKind};

/// Largest payload an unfragmented bundle may carry.
pub const MAX_PAYLOAD_LEN: usize = 108;

/// The version byte written by the [`Builder`](builder::Builder).
pub const DEFAULT_VERSION: u8 = 0;

/// Block type of the payload block.
pub const PAYLOAD_BLOCK_TYPE: u8 = 1;

pub mod prelude {
    pub use super::block_flags::BlockFlags;
    pub use super::builder::Builder;
    pub use super::bundle::Bundle;
    pub use super::bundle_flags::{BundleFlags, Priority};
    pub use super::error::{Error, ErrorKind};
    pub use super::field::Field;
    pub use super::offset_table::{Extent, OffsetTable};
    pub use super::redundancy::{Fingerprint, RedundancyCache, SetOutcome};
}
