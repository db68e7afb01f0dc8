use super::*;
use block_flags::BlockFlags;
use bundle_flags::BundleFlags;
use error::CaptureFieldErr;
use field::Field;
use offset_table::{Extent, OffsetTable};

mod parse;

/// A bundle: one backing buffer and the table of where each field lives in
/// it.
///
/// Bundles produced by [`Bundle::parse`] borrow or own whatever buffer the
/// caller handed over, without copying it. Only `Bundle<Vec<u8>>` can be
/// edited; use [`Bundle::to_owned_bundle`] to get one from a parsed bundle.
#[derive(Clone)]
pub struct Bundle<B = Vec<u8>> {
    pub(crate) data: B,
    pub(crate) offsets: OffsetTable,
}

impl<B: AsRef<[u8]>> core::fmt::Debug for Bundle<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bundle")
            .field("len", &self.len())
            .field("offsets", &self.offsets)
            .finish()
    }
}

impl<B: AsRef<[u8]>> Bundle<B> {
    /// The wire encoding of the bundle.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn len(&self) -> usize {
        self.offsets.total_len()
    }

    /// Always false for bundles from [`Bundle::new`], [`Bundle::parse`] or the
    /// [`Builder`](crate::builder::Builder), which all carry VERSION and TYPE.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    pub fn extent(&self, field: Field) -> Extent {
        self.offsets[field]
    }

    /// The encoded bytes of `field`. Unset fields are empty.
    pub fn field_bytes(&self, field: Field) -> Result<&[u8], Error> {
        self.data
            .as_ref()
            .get(self.offsets[field].range())
            .ok_or(Error::Altered)
    }

    /// Reads the numeric value of `field`.
    ///
    /// Unset SDNV fields, such as the fragment fields of an unfragmented
    /// bundle, read as 0.
    pub fn get(&self, field: Field) -> Result<u32, Error> {
        let bytes = self.field_bytes(field)?;
        match field {
            Field::Payload => Err(Error::NotNumeric(field)),
            Field::Version | Field::Type => bytes
                .first()
                .map(|b| u32::from(*b))
                .ok_or(Error::MissingField(field)),
            _ if bytes.is_empty() => Ok(0),
            _ => sdnv::decode::decode(bytes, bytes.len()).map_field_err(field),
        }
    }

    pub fn version(&self) -> Result<u8, Error> {
        self.raw_byte(Field::Version)
    }

    /// The block type byte of the block following the primary block.
    pub fn block_type(&self) -> Result<u8, Error> {
        self.raw_byte(Field::Type)
    }

    fn raw_byte(&self, field: Field) -> Result<u8, Error> {
        self.field_bytes(field)?
            .first()
            .copied()
            .ok_or(Error::MissingField(field))
    }

    pub fn flags(&self) -> Result<BundleFlags, Error> {
        self.get(Field::Flags).map(Into::into)
    }

    pub fn block_flags(&self) -> Result<BlockFlags, Error> {
        self.get(Field::PFlags).map(Into::into)
    }

    pub fn is_fragment(&self) -> Result<bool, Error> {
        self.get(Field::Flags)
            .map(|flags| flags & bundle_flags::FRAGMENT != 0)
    }

    pub fn payload(&self) -> Result<&[u8], Error> {
        self.field_bytes(Field::Payload)
    }

    /// Copies the bundle into an owned buffer so it can be edited.
    pub fn to_owned_bundle(&self) -> Bundle {
        Bundle {
            data: self.as_bytes().to_vec(),
            offsets: self.offsets,
        }
    }

    /// Releases the offset table and hands the backing buffer back.
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl Bundle {
    /// Creates the smallest valid bundle around `payload`: a version byte,
    /// the block type byte and the payload itself. Every SDNV field starts
    /// unset, with zero width.
    pub fn new(payload: &[u8]) -> Result<Self, Error> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge(payload.len()));
        }

        let mut data = Vec::new();
        data.try_reserve_exact(payload.len() + 2)
            .map_err(|source| Error::Allocation {
                additional: payload.len() + 2,
                source,
            })?;
        data.push(DEFAULT_VERSION);
        data.push(PAYLOAD_BLOCK_TYPE);
        data.extend_from_slice(payload);

        let mut offsets = OffsetTable::default();
        for field in Field::ALL {
            offsets.set(
                field,
                match field {
                    Field::Version => Extent::new(0, 1),
                    Field::Type => Extent::new(1, 1),
                    Field::PFlags | Field::PLength => Extent::new(2, 0),
                    Field::Payload => Extent::new(2, payload.len()),
                    _ => Extent::new(1, 0),
                },
            );
        }
        debug_assert!(offsets.is_contiguous());

        Ok(Self { data, offsets })
    }
}
