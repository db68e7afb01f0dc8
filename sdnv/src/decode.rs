use super::*;

/// Scans `data` for the end of the SDNV that starts at `data[0]`, returning
/// its width in bytes without decoding the value.
pub fn scan_width(data: &[u8]) -> Result<usize, Error> {
    if data.is_empty() {
        return Err(Error::NotEnoughData);
    }
    data.iter()
        .position(|b| b & 0x80 == 0)
        .map(|p| p + 1)
        .ok_or(Error::Unterminated)
}

fn decode_inner(data: &[u8], width: usize, max_len: usize, max_first: u8) -> Result<u64, Error> {
    if width == 0 {
        return Err(Error::Empty);
    }
    let bytes = data.get(..width).ok_or(Error::NotEnoughData)?;
    let Some((last, init)) = bytes.split_last() else {
        return Err(Error::Empty);
    };

    if last & 0x80 != 0 || init.iter().any(|b| b & 0x80 == 0) {
        return Err(Error::InvalidEncoding);
    }

    if width > max_len || (width == max_len && bytes[0] > max_first) {
        return Err(Error::Overflow(if max_len == MAX_LEN_U32 { 32 } else { 64 }));
    }

    Ok(bytes
        .iter()
        .fold(0u64, |value, b| (value << 7) | u64::from(b & 0x7F)))
}

/// Decodes the `width` byte SDNV at the start of `data`.
///
/// Only values representable in 32 bits are accepted: a 5 byte encoding may
/// carry at most 4 value bits in its first byte.
pub fn decode(data: &[u8], width: usize) -> Result<u32, Error> {
    decode_inner(data, width, MAX_LEN_U32, 0x8F)
        .and_then(|v| u32::try_from(v).map_err(|_| Error::Overflow(32)))
}

pub fn decode_u64(data: &[u8], width: usize) -> Result<u64, Error> {
    decode_inner(data, width, MAX_LEN_U64, 0x81)
}

/// Scans and decodes the SDNV at the start of `data`, returning the value
/// and its width.
pub fn parse(data: &[u8]) -> Result<(u32, usize), Error> {
    let width = scan_width(data)?;
    decode(data, width).map(|v| (v, width))
}

pub fn parse_u64(data: &[u8]) -> Result<(u64, usize), Error> {
    let width = scan_width(data)?;
    decode_u64(data, width).map(|v| (v, width))
}
