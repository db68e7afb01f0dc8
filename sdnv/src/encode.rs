use super::*;

/// A single encoded SDNV, held on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_LEN_U64],
    len: usize,
}

impl Encoded {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::ops::Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// The minimum number of bytes needed to encode `value`. Always at least 1.
pub const fn encoding_len(value: u32) -> usize {
    encoding_len_u64(value as u64)
}

/// The minimum number of bytes needed to encode `value`. Always at least 1.
pub const fn encoding_len_u64(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    if bits == 0 {
        1
    } else {
        bits.div_ceil(7) as usize
    }
}

/// Writes the minimal encoding of `value` to the start of `buf`, returning
/// the number of bytes written.
pub fn encode(value: u32, buf: &mut [u8]) -> Result<usize, Error> {
    encode_u64(value.into(), buf)
}

pub fn encode_u64(mut value: u64, buf: &mut [u8]) -> Result<usize, Error> {
    let len = encoding_len_u64(value);
    let available = buf.len();
    let out = buf.get_mut(..len).ok_or(Error::BufferTooSmall {
        needed: len,
        available,
    })?;

    // Fill from the least significant group backwards
    for (i, b) in out.iter_mut().rev().enumerate() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        *b = (value & 0x7F) as u8 | continuation;
        value >>= 7;
    }
    Ok(len)
}

pub fn emit(value: u32) -> Encoded {
    emit_u64(value.into())
}

pub fn emit_u64(value: u64) -> Encoded {
    let mut bytes = [0u8; MAX_LEN_U64];
    // A MAX_LEN_U64 buffer always fits
    let len = encode_u64(value, &mut bytes).unwrap_or_default();
    Encoded { bytes, len }
}
