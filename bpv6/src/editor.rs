use super::*;
use block_flags::BlockFlags;
use bundle::Bundle;
use field::Field;
use sdnv::encode::Encoded;

// Every edit follows the same order: check the offset table still describes
// the buffer, reserve all the growth the edit needs, then move bytes.
// Nothing below the reservation can fail, so a failed edit leaves the
// bundle as it was.
impl Bundle {
    /// Writes `value` into `field`, resizing the buffer if the encoded width
    /// changes.
    ///
    /// VERSION and TYPE are single raw bytes. Every other numeric field is
    /// SDNV encoded at its minimal width, and changing one of the dictionary
    /// fields rewrites LENGTH as well.
    pub fn set(&mut self, field: Field, value: u32) -> Result<(), Error> {
        match field {
            Field::Payload => Err(Error::NotNumeric(field)),
            Field::Version | Field::Type => {
                let byte = u8::try_from(value).map_err(|_| Error::OutOfRange { field, value })?;
                self.set_raw(field, byte)
            }
            _ => self.set_sdnv(field, value),
        }
    }

    /// Overwrites the block type byte in place.
    pub fn set_type(&mut self, block_type: u8) -> Result<(), Error> {
        self.set_raw(Field::Type, block_type)
    }

    pub fn set_flags(&mut self, flags: bundle_flags::BundleFlags) -> Result<(), Error> {
        self.set(Field::Flags, flags.into())
    }

    pub fn set_block_flags(&mut self, flags: BlockFlags) -> Result<(), Error> {
        self.set(Field::PFlags, flags.into())
    }

    /// Returns an SDNV field to the unset, zero width state.
    pub fn clear(&mut self, field: Field) -> Result<(), Error> {
        if !field.is_sdnv() {
            return Err(Error::Required(field));
        }
        self.check_consistent()?;

        if !self.offsets[field].is_empty() {
            self.resize_field(field, 0)?;
            if field.is_dictionary() {
                self.update_length()?;
            }
            self.check_invariants();
            trace!("Cleared {field}");
        }
        Ok(())
    }

    /// Replaces the payload and re-encodes P_LENGTH to match.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<(), Error> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge(payload.len()));
        }
        self.check_consistent()?;

        let p_length = sdnv::encode::emit(payload.len() as u32);
        let old = self.offsets[Field::Payload];
        self.reserve(
            payload.len().saturating_sub(old.width)
                + p_length
                    .len()
                    .saturating_sub(self.offsets[Field::PLength].width),
        )?;

        self.write_sdnv(Field::PLength, &p_length)?;

        let offset = self.offsets[Field::Payload].offset;
        self.data.truncate(offset);
        self.data.extend_from_slice(payload);
        self.offsets.resize(Field::Payload, payload.len());

        self.check_invariants();
        trace!("Replaced {} byte payload with {} bytes", old.width, payload.len());
        Ok(())
    }

    /// Completes the bundle for transmission and returns its wire encoding.
    ///
    /// Unset fields are given their default values: P_FLAGS marks the last
    /// block, P_LENGTH is the payload length and the rest are 0. The
    /// fragment fields are only written when FLAGS marks the bundle as a
    /// fragment. LENGTH and P_LENGTH are always recomputed, so the result
    /// parses back to the same offset table.
    pub fn serialize(&mut self) -> Result<&[u8], Error> {
        self.check_consistent()?;

        let fragment = self.get(Field::Flags)? & bundle_flags::FRAGMENT != 0;
        if !fragment
            && (!self.offsets[Field::FragOffset].is_empty()
                || !self.offsets[Field::AppDataLen].is_empty())
        {
            return Err(Error::InvalidFlags);
        }

        // Work out every write up front, so the growth can be reserved once
        let mut pending: [Option<Encoded>; field::FIELD_COUNT] = Default::default();
        let mut widths = [0usize; field::FIELD_COUNT];
        for (field, extent) in self.offsets.iter() {
            widths[field.index()] = extent.width;

            let value = match field {
                Field::Version | Field::Type | Field::Payload | Field::Length => continue,
                Field::PLength => self.offsets[Field::Payload].width as u32,
                Field::FragOffset | Field::AppDataLen if !fragment => continue,
                _ if !extent.is_empty() => continue,
                Field::PFlags => BlockFlags::payload().into(),
                _ => 0,
            };
            let encoded = sdnv::encode::emit(value);
            if field == Field::PLength && self.field_bytes(field)? == &*encoded {
                continue;
            }
            widths[field.index()] = encoded.len();
            pending[field.index()] = Some(encoded);
        }

        let dictionary_len: usize = Field::ALL
            .iter()
            .filter(|f| f.is_dictionary())
            .map(|f| widths[f.index()])
            .sum();
        let length = sdnv::encode::emit(dictionary_len as u32);
        if self.field_bytes(Field::Length)? != &*length {
            pending[Field::Length.index()] = Some(length);
        }

        let growth: usize = Field::ALL
            .iter()
            .filter_map(|f| {
                pending[f.index()]
                    .as_ref()
                    .map(|e| e.len().saturating_sub(self.offsets[*f].width))
            })
            .sum();
        self.reserve(growth)?;

        for field in Field::ALL {
            if let Some(encoded) = &pending[field.index()] {
                self.write_sdnv(field, encoded)?;
            }
        }

        self.check_invariants();
        debug!("Serialized bundle of {} bytes", self.data.len());
        Ok(&self.data)
    }

    fn set_raw(&mut self, field: Field, byte: u8) -> Result<(), Error> {
        self.check_consistent()?;
        let range = self.offsets[field].range();
        match self.data.get_mut(range) {
            Some([b]) => {
                *b = byte;
                trace!("Set {field} to {byte}");
                Ok(())
            }
            _ => Err(Error::MissingField(field)),
        }
    }

    fn set_sdnv(&mut self, field: Field, value: u32) -> Result<(), Error> {
        self.check_consistent()?;

        let encoded = sdnv::encode::emit(value);
        let old_width = self.offsets[field].width;
        let mut growth = encoded.len().saturating_sub(old_width);
        if field.is_dictionary() {
            let dictionary_len = self.offsets.dictionary_len() - old_width + encoded.len();
            growth += sdnv::encode::encoding_len(dictionary_len as u32)
                .saturating_sub(self.offsets[Field::Length].width);
        }
        self.reserve(growth)?;

        self.write_sdnv(field, &encoded)?;
        if field.is_dictionary() {
            self.update_length()?;
        }

        self.check_invariants();
        trace!("Set {field} to {value}");
        Ok(())
    }

    /// Rewrites LENGTH from the current dictionary field widths.
    fn update_length(&mut self) -> Result<(), Error> {
        let length = sdnv::encode::emit(self.offsets.dictionary_len() as u32);
        self.write_sdnv(Field::Length, &length)
    }

    /// Resizes `field` to fit `encoded` and copies it in.
    fn write_sdnv(&mut self, field: Field, encoded: &[u8]) -> Result<(), Error> {
        if self.offsets[field].width != encoded.len() {
            self.resize_field(field, encoded.len())?;
        }
        self.data
            .get_mut(self.offsets[field].range())
            .ok_or(Error::Altered)?
            .copy_from_slice(encoded);
        Ok(())
    }

    /// Changes the width of `field`, moving every later byte and offset by
    /// the difference. The field's own bytes are left undefined.
    fn resize_field(&mut self, field: Field, new_width: usize) -> Result<(), Error> {
        let old = self.offsets[field];
        let len = self.data.len();
        if old.end() > len {
            return Err(Error::Altered);
        }

        if new_width > old.width {
            let grow = new_width - old.width;
            self.reserve(grow)?;
            self.data.resize(len + grow, 0);
            self.data.copy_within(old.end()..len, old.end() + grow);
        } else {
            let shrink = old.width - new_width;
            self.data.copy_within(old.end()..len, old.end() - shrink);
            self.data.truncate(len - shrink);
        }
        self.offsets.resize(field, new_width);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.data
            .try_reserve(additional)
            .map_err(|source| Error::Allocation { additional, source })
    }

    fn check_consistent(&self) -> Result<(), Error> {
        if self.data.len() != self.offsets.total_len() || !self.offsets.is_contiguous() {
            return Err(Error::Altered);
        }
        Ok(())
    }

    fn check_invariants(&self) {
        debug_assert!(self.offsets.is_contiguous());
        debug_assert_eq!(self.data.len(), self.offsets.total_len());
    }
}
