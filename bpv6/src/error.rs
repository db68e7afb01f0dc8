/*!
This module defines the primary error type for the `bpv6` crate.
*/

use super::*;
use field::Field;
use thiserror::Error;

/// The primary error type for the `bpv6` crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload is too large to send without fragmentation.
    #[error("Payload of {0} bytes exceeds the {max} byte limit for unfragmented bundles", max = MAX_PAYLOAD_LEN)]
    PayloadTooLarge(usize),

    /// Growing the bundle buffer failed. The bundle is unchanged.
    #[error("Failed to grow bundle buffer by {additional} bytes: {source}")]
    Allocation {
        additional: usize,
        source: alloc::collections::TryReserveError,
    },

    /// The data ends before a required field.
    #[error("Bundle ends before the {0} field")]
    MissingField(Field),

    /// A field failed to parse.
    #[error("Failed to parse {field}: {source}")]
    InvalidField {
        field: Field,
        source: sdnv::Error,
    },

    /// The payload length claims more bytes than were supplied.
    #[error("Payload length {claimed} exceeds the {available} bytes remaining")]
    TruncatedPayload { claimed: u64, available: usize },

    /// There are bytes left over after the payload.
    #[error("Bundle has {0} bytes of additional data after the payload")]
    AdditionalData(usize),

    /// The offset table no longer describes the buffer.
    #[error("Bundle has been altered since its offsets were recorded")]
    Altered,

    /// The field does not carry a numeric value.
    #[error("The {0} field is not numeric")]
    NotNumeric(Field),

    /// The value cannot be stored in the field.
    #[error("Value {value} is out of range for the {field} field")]
    OutOfRange { field: Field, value: u32 },

    /// The field is always present and cannot be cleared.
    #[error("The {0} field cannot be cleared")]
    Required(Field),

    /// The flags are inconsistent with the fields present.
    #[error("Invalid bundle flag combination")]
    InvalidFlags,

    /// The redundancy cache has no free entries.
    #[error("Redundancy cache is full ({0} entries)")]
    CacheFull(usize),
}

/// Broad classes of [`Error`], for callers that only need to decide what
/// to do with the affected bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is invalid
    Validation,
    Allocation,
    /// The received data is not a well-formed bundle
    MalformedInput,
    Capacity,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PayloadTooLarge(_)
            | Error::NotNumeric(_)
            | Error::OutOfRange { .. }
            | Error::Required(_)
            | Error::InvalidFlags => ErrorKind::Validation,
            Error::Allocation { .. } => ErrorKind::Allocation,
            Error::MissingField(_)
            | Error::InvalidField { .. }
            | Error::TruncatedPayload { .. }
            | Error::AdditionalData(_)
            | Error::Altered => ErrorKind::MalformedInput,
            Error::CacheFull(_) => ErrorKind::Capacity,
        }
    }
}

/// A trait for mapping SDNV errors to an `Error::InvalidField`.
pub trait CaptureFieldErr<T> {
    fn map_field_err(self, field: Field) -> Result<T, Error>;
}

impl<T> CaptureFieldErr<T> for Result<T, sdnv::Error> {
    fn map_field_err(self, field: Field) -> Result<T, Error> {
        self.map_err(|source| Error::InvalidField { field, source })
    }
}
