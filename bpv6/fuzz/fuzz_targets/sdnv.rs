#![no_main]

use hardy_sdnv::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, width)) = decode::parse(data) {
        // Decoding accepts non-minimal encodings, encoding never produces them
        assert!(encode::encoding_len(value) <= width);
        assert_eq!(decode::parse(&encode::emit(value)), Ok((value, encode::encoding_len(value))));
    }
    if let Ok((value, width)) = decode::parse_u64(data) {
        assert!(encode::encoding_len_u64(value) <= width);
    }
});
