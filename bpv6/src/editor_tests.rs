use super::*;
use block_flags::BlockFlags;
use builder::Builder;
use bundle::Bundle;
use field::Field;
use hex_literal::hex;

fn values(bundle: &Bundle) -> [Option<u32>; field::FIELD_COUNT] {
    Field::ALL.map(|f| bundle.get(f).ok())
}

#[test]
fn minimal_bundle() {
    let bundle = Builder::new().build(b"AB").unwrap();
    assert_eq!(bundle.len(), 4);
    assert!(!bundle.is_empty());
    assert!(!Bundle::new(b"").unwrap().is_empty());
    assert_eq!(bundle.as_bytes(), b"\x00\x01AB");
    assert_eq!(bundle.extent(Field::Payload).width, 2);
    assert_eq!(bundle.payload().unwrap(), b"AB");
    assert!(bundle.offsets().is_contiguous());

    assert_eq!(bundle.version().unwrap(), DEFAULT_VERSION);
    assert_eq!(bundle.block_type().unwrap(), PAYLOAD_BLOCK_TYPE);
    for field in [Field::Flags, Field::SrcNode, Field::LifeTime, Field::PLength] {
        assert!(bundle.extent(field).is_empty());
        assert_eq!(bundle.get(field).unwrap(), 0);
    }
}

#[test]
fn payload_too_large() {
    let payload = [0u8; MAX_PAYLOAD_LEN + 1];
    let err = Bundle::new(&payload).unwrap_err();
    assert!(matches!(err, Error::PayloadTooLarge(109)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(Builder::new().source(1, 1).build(&payload).is_err());

    assert!(Bundle::new(&payload[..MAX_PAYLOAD_LEN]).is_ok());
    assert!(Bundle::new(&[]).is_ok());
}

#[test]
fn shrink_after_grow() {
    let mut bundle = Builder::new().build(b"AB").unwrap();

    bundle.set(Field::SrcNode, 300).unwrap();
    assert_eq!(bundle.extent(Field::SrcNode).width, 2);
    let before = *bundle.offsets();
    let len = bundle.len();

    bundle.set(Field::SrcNode, 5).unwrap();
    assert_eq!(bundle.extent(Field::SrcNode).width, 1);
    assert_eq!(bundle.len(), len - 1);
    assert_eq!(bundle.as_bytes().len(), len - 1);
    for (field, extent) in bundle.offsets().iter() {
        if field > Field::SrcNode {
            assert_eq!(extent.offset, before[field].offset - 1, "{field}");
        } else {
            assert_eq!(extent.offset, before[field].offset, "{field}");
        }
    }
    assert_eq!(bundle.get(Field::SrcNode).unwrap(), 5);
    assert_eq!(bundle.payload().unwrap(), b"AB");
}

#[test]
fn dictionary_length_follows_widths() {
    let mut bundle = Bundle::new(b"x").unwrap();
    assert!(bundle.extent(Field::Length).is_empty());

    bundle.set(Field::DestNode, 1).unwrap();
    assert_eq!(bundle.get(Field::Length).unwrap(), 1);

    bundle.set(Field::DestNode, 20_000).unwrap();
    assert_eq!(bundle.get(Field::Length).unwrap(), 3);

    // Non-dictionary fields leave LENGTH alone
    bundle.set(Field::TimeStamp, 20_000).unwrap();
    assert_eq!(bundle.get(Field::Length).unwrap(), 3);

    for field in Field::ALL.into_iter().filter(|f| f.is_dictionary()) {
        bundle.set(field, u32::MAX).unwrap();
    }
    assert_eq!(bundle.get(Field::Length).unwrap(), 40);
    assert_eq!(bundle.extent(Field::Length).width, 1);

    bundle.clear(Field::DestNode).unwrap();
    assert_eq!(bundle.get(Field::Length).unwrap(), 35);
}

#[test]
fn raw_byte_fields() {
    let mut bundle = Bundle::new(b"x").unwrap();
    bundle.set(Field::Version, 6).unwrap();
    bundle.set_type(0x0a).unwrap();
    assert_eq!(bundle.as_bytes(), hex!("060a78"));

    let err = bundle.set(Field::Type, 0x100).unwrap_err();
    assert!(matches!(
        err,
        Error::OutOfRange {
            field: Field::Type,
            value: 0x100
        }
    ));
    assert!(matches!(
        bundle.set(Field::Payload, 1),
        Err(Error::NotNumeric(Field::Payload))
    ));
    assert!(matches!(
        bundle.clear(Field::Version),
        Err(Error::Required(Field::Version))
    ));
    assert_eq!(bundle.as_bytes(), hex!("060a78"));
}

#[test]
fn clear_field() {
    let mut bundle = Builder::new().lifetime(3600).build(b"x").unwrap();
    assert_eq!(bundle.extent(Field::LifeTime).width, 2);

    bundle.clear(Field::LifeTime).unwrap();
    assert!(bundle.extent(Field::LifeTime).is_empty());
    assert_eq!(bundle.as_bytes(), Bundle::new(b"x").unwrap().as_bytes());

    // Clearing twice is harmless
    bundle.clear(Field::LifeTime).unwrap();
    assert_eq!(bundle.len(), 3);
}

#[test]
fn replace_payload() {
    let mut bundle = Builder::new().source(1, 2).build(b"AB").unwrap();
    bundle.set_payload(&[0x55; 100]).unwrap();
    assert_eq!(bundle.payload().unwrap(), [0x55; 100]);
    assert_eq!(bundle.get(Field::PLength).unwrap(), 100);
    assert_eq!(bundle.get(Field::SrcServ).unwrap(), 2);

    bundle.set_payload(&[0x55; 200]).unwrap_err();
    assert_eq!(bundle.get(Field::PLength).unwrap(), 100);

    bundle.set_payload(b"").unwrap();
    assert_eq!(bundle.get(Field::PLength).unwrap(), 0);
    assert!(bundle.payload().unwrap().is_empty());
    assert!(bundle.offsets().is_contiguous());
}

#[test]
fn serialize_minimal() {
    let mut bundle = Builder::new().build(b"AB").unwrap();
    let wire = bundle.serialize().unwrap().to_vec();
    assert_eq!(
        wire,
        hex!("00 00 0000000000000000 000000 08 01 08 02 4142")
    );
    assert_eq!(bundle.block_flags().unwrap(), BlockFlags::payload());

    // Already complete, so nothing changes
    assert_eq!(bundle.serialize().unwrap(), wire);
}

#[test]
fn serialize_builder_fields() {
    let mut bundle = Builder::new()
        .destination(5, 2)
        .source(300, 1)
        .timestamp(1000, 42)
        .lifetime(3600)
        .build(b"hi")
        .unwrap();
    assert_eq!(
        bundle.serialize().unwrap(),
        hex!("00 00 05 02 822c 01 00 00 00 00 8768 2a 9c10 09 01 08 02 6869")
    );
}

#[test]
fn serialize_rejects_stray_fragment_fields() {
    let mut bundle = Bundle::new(b"x").unwrap();
    bundle.set(Field::FragOffset, 10).unwrap();
    assert!(matches!(bundle.serialize(), Err(Error::InvalidFlags)));

    bundle.set(Field::Flags, bundle_flags::FRAGMENT).unwrap();
    bundle.serialize().unwrap();
    assert_eq!(bundle.get(Field::FragOffset).unwrap(), 10);
    assert_eq!(bundle.extent(Field::AppDataLen).width, 1);
}

#[test]
fn serialize_fixes_payload_length() {
    let mut bundle = Bundle::new(b"AB").unwrap();
    bundle.set(Field::PLength, 1000).unwrap();
    bundle.serialize().unwrap();
    assert_eq!(bundle.get(Field::PLength).unwrap(), 2);
    assert_eq!(bundle.extent(Field::PLength).width, 1);
}

#[test]
fn parse_serialized() {
    let mut bundle = Builder::new()
        .destination(1, 2)
        .source(3, 4)
        .timestamp(0x1234_5678, 9)
        .lifetime(86400)
        .build(b"payload")
        .unwrap();
    bundle.set(Field::SrcNode, 300).unwrap();
    bundle.set(Field::RepNode, 70_000).unwrap();
    bundle.set(Field::SrcNode, 5).unwrap();
    bundle.set_type(PAYLOAD_BLOCK_TYPE).unwrap();

    let wire = bundle.serialize().unwrap().to_vec();
    let parsed = Bundle::parse(wire.as_slice()).unwrap();
    assert_eq!(parsed.offsets(), bundle.offsets());
    for field in Field::ALL {
        assert_eq!(parsed.field_bytes(field).unwrap(), bundle.field_bytes(field).unwrap());
    }
    assert_eq!(parsed.get(Field::RepNode).unwrap(), 70_000);
    assert_eq!(parsed.get(Field::TimeStamp).unwrap(), 0x1234_5678);
}

#[test]
fn parse_serialized_fragment() {
    let mut bundle = Builder::new()
        .source(7, 1)
        .fragment(64, 1000)
        .build(b"frag")
        .unwrap();
    assert!(bundle.is_fragment().unwrap());

    let wire = bundle.serialize().unwrap().to_vec();
    let parsed = Bundle::parse(wire).unwrap();
    assert_eq!(parsed.offsets(), bundle.offsets());
    assert_eq!(parsed.get(Field::FragOffset).unwrap(), 64);
    assert_eq!(parsed.get(Field::AppDataLen).unwrap(), 1000);
    assert!(parsed.flags().unwrap().is_fragment);
}

#[test]
fn edit_parsed_copy() {
    let data = Builder::new()
        .source(1, 1)
        .build(b"AB")
        .unwrap()
        .serialize()
        .unwrap()
        .to_vec();
    let parsed = Bundle::parse(&data[..]).unwrap();

    let mut owned = parsed.to_owned_bundle();
    owned.set(Field::SrcNode, 1_000_000).unwrap();
    assert_eq!(owned.len(), data.len() + 2);
    assert_eq!(parsed.get(Field::SrcNode).unwrap(), 1);
    assert_eq!(parsed.into_inner(), &data[..]);
}

#[test]
fn altered_bundle() {
    let mut bundle = Bundle::new(b"AB").unwrap();
    bundle.data.push(0);
    assert!(matches!(bundle.set(Field::SrcNode, 1), Err(Error::Altered)));
    assert!(matches!(bundle.serialize(), Err(Error::Altered)));
    assert_eq!(bundle.len(), 4);
    assert_eq!(bundle.into_inner(), b"\x00\x01AB\x00");
}

#[quickcheck_macros::quickcheck]
fn field_round_trip(field: usize, value: u32) -> bool {
    let field = Field::ALL[field % (field::FIELD_COUNT - 1)];
    let value = if field.is_sdnv() { value } else { value & 0xFF };

    let mut bundle = Builder::new().source(1, 2).build(b"data").unwrap();
    bundle.set(field, value).unwrap();
    bundle.get(field).unwrap() == value
        && bundle.payload().unwrap() == b"data"
        && bundle.offsets().is_contiguous()
        && bundle.as_bytes().len() == bundle.offsets().total_len()
}

#[quickcheck_macros::quickcheck]
fn edits_preserve_other_fields(edits: std::vec::Vec<(usize, u32, bool)>) -> bool {
    let mut bundle = Builder::new().build(b"AB").unwrap();
    let mut expected = values(&bundle);

    for (field, value, clear) in edits {
        let field = Field::ALL[field % field::FIELD_COUNT];
        let before = bundle.as_bytes().to_vec();
        let was_set = !bundle.extent(field).is_empty();

        let result = if clear {
            bundle.clear(field)
        } else {
            bundle.set(field, value)
        };
        match result {
            Ok(()) => {
                expected[field.index()] = Some(if clear { 0 } else { value });
                // Clearing an unset field is a no-op
                if field.is_dictionary() && (was_set || !clear) {
                    expected[Field::Length.index()] = Some(bundle.offsets().dictionary_len() as u32);
                }
            }
            // Rejected edits change nothing
            Err(_) if bundle.as_bytes() == before => {}
            Err(_) => return false,
        }

        if !bundle.offsets().is_contiguous()
            || bundle.as_bytes().len() != bundle.offsets().total_len()
            || values(&bundle) != expected
        {
            return false;
        }
    }
    true
}
