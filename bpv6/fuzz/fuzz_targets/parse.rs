#![no_main]

use hardy_bpv6::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = Bundle::parse(data) else {
        return;
    };
    assert_eq!(parsed.len(), data.len());
    assert!(parsed.offsets().is_contiguous());

    for field in Field::ALL {
        _ = parsed.get(field);
    }

    // Completing a valid bundle must produce something that parses to the
    // same layout. Overlong fields fail to decode, which is fine.
    let mut owned = parsed.to_owned_bundle();
    if let Ok(wire) = owned.serialize().map(<[u8]>::to_vec) {
        let reparsed = Bundle::parse(wire).expect("Serialized bundle failed to parse");
        assert_eq!(reparsed.offsets(), owned.offsets());
    }
});

// cargo cov -- export --format=lcov  -instr-profile ./fuzz/coverage/parse/coverage.profdata ./target/x86_64-unknown-linux-gnu/coverage/x86_64-unknown-linux-gnu/release/parse -ignore-filename-regex='/.cargo/|rustc/|/target/' > ./fuzz/coverage/parse/lcov.info
