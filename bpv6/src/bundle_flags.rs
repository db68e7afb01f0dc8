/// FLAGS bit marking the bundle as a fragment. When set, the FRAG_OFFSET
/// and APP_DATA_LEN fields are present on the wire.
pub const FRAGMENT: u32 = 0x40;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    #[default]
    Bulk,
    Normal,
    Expedited,
    Reserved,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BundleFlags {
    pub is_admin_record: bool,
    pub do_not_fragment: bool,
    pub custody_requested: bool,
    pub singleton: bool,
    pub app_ack_requested: bool,
    pub is_fragment: bool,
    pub priority: Priority,
    pub receipt_report_requested: bool,
    pub custody_report_requested: bool,
    pub forward_report_requested: bool,
    pub delivery_report_requested: bool,
    pub delete_report_requested: bool,
    pub unrecognised: u32,
}

impl From<u32> for BundleFlags {
    fn from(value: u32) -> Self {
        let mut flags = Self {
            priority: match (value >> 7) & 0x3 {
                0 => Priority::Bulk,
                1 => Priority::Normal,
                2 => Priority::Expedited,
                _ => Priority::Reserved,
            },
            ..Default::default()
        };

        for b in (0..u32::BITS).filter(|b| !matches!(b, 7 | 8)) {
            if value & (1 << b) != 0 {
                match b {
                    1 => flags.is_admin_record = true,
                    2 => flags.do_not_fragment = true,
                    3 => flags.custody_requested = true,
                    4 => flags.singleton = true,
                    5 => flags.app_ack_requested = true,
                    6 => flags.is_fragment = true,
                    14 => flags.receipt_report_requested = true,
                    15 => flags.custody_report_requested = true,
                    16 => flags.forward_report_requested = true,
                    17 => flags.delivery_report_requested = true,
                    18 => flags.delete_report_requested = true,
                    b => {
                        flags.unrecognised |= 1 << b;
                    }
                }
            }
        }
        flags
    }
}

impl From<BundleFlags> for u32 {
    fn from(value: BundleFlags) -> Self {
        let priority: u32 = match value.priority {
            Priority::Bulk => 0,
            Priority::Normal => 1,
            Priority::Expedited => 2,
            Priority::Reserved => 3,
        };
        let mut flags = (value.unrecognised & !(0x3 << 7)) | (priority << 7);
        if value.is_admin_record {
            flags |= 1 << 1;
        }
        if value.do_not_fragment {
            flags |= 1 << 2;
        }
        if value.custody_requested {
            flags |= 1 << 3;
        }
        if value.singleton {
            flags |= 1 << 4;
        }
        if value.app_ack_requested {
            flags |= 1 << 5;
        }
        if value.is_fragment {
            flags |= FRAGMENT;
        }
        if value.receipt_report_requested {
            flags |= 1 << 14;
        }
        if value.custody_report_requested {
            flags |= 1 << 15;
        }
        if value.forward_report_requested {
            flags |= 1 << 16;
        }
        if value.delivery_report_requested {
            flags |= 1 << 17;
        }
        if value.delete_report_requested {
            flags |= 1 << 18;
        }
        flags
    }
}
