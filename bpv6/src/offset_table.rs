use super::field::{FIELD_COUNT, Field};

/// The position and encoded width of one field in the bundle buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub offset: usize,
    pub width: usize,
}

impl Extent {
    pub const fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0
    }

    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.end()
    }
}

/// Maps every [`Field`] to its [`Extent`] within the bundle buffer.
///
/// Extents are contiguous in wire order: each field starts where the
/// previous one ends. Unset fields have zero width.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable([Extent; FIELD_COUNT]);

impl core::ops::Index<Field> for OffsetTable {
    type Output = Extent;

    fn index(&self, field: Field) -> &Extent {
        &self.0[field.index()]
    }
}

impl OffsetTable {
    pub fn iter(&self) -> impl Iterator<Item = (Field, Extent)> + '_ {
        Field::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Length of the whole bundle, the end of the payload.
    pub fn total_len(&self) -> usize {
        self[Field::Payload].end()
    }

    pub fn dictionary_len(&self) -> usize {
        self.iter()
            .filter(|(f, _)| f.is_dictionary())
            .map(|(_, e)| e.width)
            .sum()
    }

    pub fn is_contiguous(&self) -> bool {
        self.0[0].offset == 0 && self.0.windows(2).all(|w| w[1].offset == w[0].end())
    }

    pub(crate) fn set(&mut self, field: Field, extent: Extent) {
        self.0[field.index()] = extent;
    }

    /// Changes the width of `field` and moves every later field by the
    /// difference.
    pub(crate) fn resize(&mut self, field: Field, new_width: usize) {
        let idx = field.index();
        let old_width = core::mem::replace(&mut self.0[idx].width, new_width);
        for later in &mut self.0[idx + 1..] {
            if new_width > old_width {
                later.offset += new_width - old_width;
            } else {
                later.offset -= old_width - new_width;
            }
        }
    }
}
