use super::encode::*;
use super::*;
use hex_literal::hex;

#[test]
fn rfc_tests() {
    // RFC 6256, Section 2.1
    assert_eq!(&*emit(0xABC), &hex!("953c"));
    assert_eq!(&*emit(0x1234), &hex!("a434"));
    assert_eq!(&*emit(0x4234), &hex!("818434"));
    assert_eq!(&*emit(0x7F), &hex!("7f"));
}

#[test]
fn widths() {
    assert_eq!(encoding_len(0), 1);
    assert_eq!(encoding_len(1), 1);
    assert_eq!(encoding_len(127), 1);
    assert_eq!(encoding_len(128), 2);
    assert_eq!(encoding_len(300), 2);
    assert_eq!(encoding_len(16383), 2);
    assert_eq!(encoding_len(16384), 3);
    assert_eq!(encoding_len(u32::MAX), MAX_LEN_U32);
    assert_eq!(encoding_len_u64(u64::MAX), MAX_LEN_U64);
}

#[test]
fn limits() {
    assert_eq!(&*emit(0), &hex!("00"));
    assert_eq!(&*emit(u32::MAX), &hex!("8fffffff7f"));
    assert_eq!(&*emit_u64(u64::MAX), &hex!("81ffffffffffffffff7f"));
}

#[test]
fn buffer_too_small() {
    let mut buf = [0u8; 1];
    assert_eq!(
        encode(300, &mut buf),
        Err(Error::BufferTooSmall {
            needed: 2,
            available: 1
        })
    );
    // Nothing written on failure
    assert_eq!(buf, [0]);

    let mut buf = [0u8; 4];
    assert_eq!(encode(300, &mut buf), Ok(2));
    assert_eq!(buf, hex!("82 2c 00 00"));
}
