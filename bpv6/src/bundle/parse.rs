use super::*;

struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    offsets: OffsetTable,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            offsets: OffsetTable::default(),
        }
    }

    fn remaining(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }

    fn record(&mut self, field: Field, width: usize) -> Extent {
        let extent = Extent::new(self.offset, width);
        self.offsets.set(field, extent);
        self.offset += width;
        extent
    }

    fn raw_byte(&mut self, field: Field) -> Result<(), Error> {
        if self.remaining().is_empty() {
            return Err(Error::MissingField(field));
        }
        self.record(field, 1);
        Ok(())
    }

    fn sdnv(&mut self, field: Field) -> Result<Extent, Error> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            return Err(Error::MissingField(field));
        }
        let width = sdnv::decode::scan_width(remaining).map_field_err(field)?;
        Ok(self.record(field, width))
    }

    fn sdnv_value(&mut self, field: Field) -> Result<u32, Error> {
        let extent = self.sdnv(field)?;
        sdnv::decode::decode(&self.data[extent.range()], extent.width).map_field_err(field)
    }
}

fn parse_offsets(data: &[u8]) -> Result<OffsetTable, Error> {
    let mut cursor = Cursor::new(data);

    cursor.raw_byte(Field::Version)?;
    let flags = cursor.sdnv_value(Field::Flags)?;

    // Addressing, timestamps, lifetime and the dictionary length
    for field in &Field::ALL[Field::DestNode.index()..=Field::Length.index()] {
        cursor.sdnv(*field)?;
    }

    if flags & bundle_flags::FRAGMENT != 0 {
        cursor.sdnv(Field::FragOffset)?;
        cursor.sdnv(Field::AppDataLen)?;
    } else {
        // Absent, so point them at the next field with no width
        cursor.record(Field::FragOffset, 0);
        cursor.record(Field::AppDataLen, 0);
    }

    cursor.raw_byte(Field::Type)?;
    cursor.sdnv(Field::PFlags)?;
    let claimed = cursor.sdnv_value(Field::PLength)?;

    let available = cursor.remaining().len();
    let payload_len = usize::try_from(claimed)
        .ok()
        .filter(|len| *len <= available)
        .ok_or(Error::TruncatedPayload {
            claimed: claimed.into(),
            available,
        })?;
    cursor.record(Field::Payload, payload_len);

    if payload_len < available {
        return Err(Error::AdditionalData(available - payload_len));
    }

    debug_assert!(cursor.offsets.is_contiguous());
    Ok(cursor.offsets)
}

impl<B: AsRef<[u8]>> Bundle<B> {
    /// Rebuilds the offset table of a received bundle.
    ///
    /// The bundle takes `data` as its backing buffer without copying it. Field
    /// widths are discovered by scanning; only FLAGS and P_LENGTH are decoded.
    pub fn parse(data: B) -> Result<Self, Error> {
        let offsets = parse_offsets(data.as_ref())
            .inspect_err(|e| debug!("Rejecting malformed bundle: {e}"))?;

        trace!(
            "Parsed bundle of {} bytes with {} byte payload",
            offsets.total_len(),
            offsets[Field::Payload].width
        );
        Ok(Self { data, offsets })
    }
}
