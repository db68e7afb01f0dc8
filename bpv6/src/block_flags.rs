#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockFlags {
    pub must_replicate: bool,
    pub report_on_failure: bool,
    pub delete_bundle_on_failure: bool,
    pub last_block: bool,
    pub discard_on_failure: bool,
    pub forwarded_unprocessed: bool,
    pub has_eid_references: bool,
    pub unrecognised: u32,
}

impl BlockFlags {
    /// Flags for the only block following the primary block.
    pub fn payload() -> Self {
        Self {
            last_block: true,
            ..Default::default()
        }
    }
}

impl From<BlockFlags> for u32 {
    fn from(value: BlockFlags) -> Self {
        let mut flags = value.unrecognised;
        if value.must_replicate {
            flags |= 1 << 0;
        }
        if value.report_on_failure {
            flags |= 1 << 1;
        }
        if value.delete_bundle_on_failure {
            flags |= 1 << 2;
        }
        if value.last_block {
            flags |= 1 << 3;
        }
        if value.discard_on_failure {
            flags |= 1 << 4;
        }
        if value.forwarded_unprocessed {
            flags |= 1 << 5;
        }
        if value.has_eid_references {
            flags |= 1 << 6;
        }
        flags
    }
}

impl From<u32> for BlockFlags {
    fn from(value: u32) -> Self {
        let mut flags = Self::default();
        for b in 0..u32::BITS {
            if value & (1 << b) != 0 {
                match b {
                    0 => flags.must_replicate = true,
                    1 => flags.report_on_failure = true,
                    2 => flags.delete_bundle_on_failure = true,
                    3 => flags.last_block = true,
                    4 => flags.discard_on_failure = true,
                    5 => flags.forwarded_unprocessed = true,
                    6 => flags.has_eid_references = true,
                    b => {
                        flags.unrecognised |= 1 << b;
                    }
                }
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_block() {
        assert_eq!(u32::from(BlockFlags::payload()), 0x08);

        let flags = BlockFlags::from(0x0109);
        assert!(flags.must_replicate && flags.last_block);
        assert_eq!(flags.unrecognised, 0x0100);
        assert_eq!(u32::from(flags), 0x0109);
    }
}
