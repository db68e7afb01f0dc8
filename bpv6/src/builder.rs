use super::*;
use block_flags::BlockFlags;
use bundle::Bundle;
use bundle_flags::BundleFlags;
use field::{FIELD_COUNT, Field};

/// Collects primary block values and builds a [`Bundle`] from them.
///
/// Only fields that were given a value are written; everything else stays
/// unset until [`Bundle::serialize`] fills in defaults. A default
/// `Builder` therefore produces the minimal bundle of [`Bundle::new`].
#[derive(Debug, Default, Clone)]
pub struct Builder {
    values: [Option<u32>; FIELD_COUNT],
}

impl Builder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets a numeric field directly.
    pub fn field(&mut self, field: Field, value: u32) -> &mut Self {
        self.values[field.index()] = Some(value);
        self
    }

    pub fn flags(&mut self, flags: BundleFlags) -> &mut Self {
        self.field(Field::Flags, flags.into())
    }

    pub fn destination(&mut self, node: u32, service: u32) -> &mut Self {
        self.field(Field::DestNode, node)
            .field(Field::DestServ, service)
    }

    pub fn source(&mut self, node: u32, service: u32) -> &mut Self {
        self.field(Field::SrcNode, node)
            .field(Field::SrcServ, service)
    }

    pub fn report_to(&mut self, node: u32, service: u32) -> &mut Self {
        self.field(Field::RepNode, node)
            .field(Field::RepServ, service)
    }

    pub fn custodian(&mut self, node: u32, service: u32) -> &mut Self {
        self.field(Field::CustNode, node)
            .field(Field::CustServ, service)
    }

    pub fn timestamp(&mut self, timestamp: u32, sequence: u32) -> &mut Self {
        self.field(Field::TimeStamp, timestamp)
            .field(Field::TimeStampSeqNr, sequence)
    }

    /// Lifetime in seconds.
    pub fn lifetime(&mut self, lifetime: u32) -> &mut Self {
        self.field(Field::LifeTime, lifetime)
    }

    /// Marks the bundle as a fragment and records its position in the
    /// original application data unit.
    pub fn fragment(&mut self, offset: u32, app_data_len: u32) -> &mut Self {
        let flags = self.values[Field::Flags.index()].unwrap_or_default();
        self.field(Field::Flags, flags | bundle_flags::FRAGMENT)
            .field(Field::FragOffset, offset)
            .field(Field::AppDataLen, app_data_len)
    }

    pub fn block_type(&mut self, block_type: u8) -> &mut Self {
        self.field(Field::Type, block_type.into())
    }

    pub fn block_flags(&mut self, flags: BlockFlags) -> &mut Self {
        self.field(Field::PFlags, flags.into())
    }

    /// Builds the bundle around `payload`, writing each configured field in
    /// wire order.
    pub fn build(&self, payload: &[u8]) -> Result<Bundle, Error> {
        let mut bundle = Bundle::new(payload)?;
        for field in Field::ALL {
            if let Some(value) = self.values[field.index()] {
                bundle.set(field, value)?;
            }
        }
        debug!(
            "Built bundle of {} bytes with {} byte payload",
            bundle.len(),
            payload.len()
        );
        Ok(bundle)
    }
}
