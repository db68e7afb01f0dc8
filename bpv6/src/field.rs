use alloc::string::String;
use thiserror::Error;

pub const FIELD_COUNT: usize = 20;

/// The logical fields of a bundle, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Field {
    Version,
    Flags,
    DestNode,
    DestServ,
    SrcNode,
    SrcServ,
    RepNode,
    RepServ,
    CustNode,
    CustServ,
    TimeStamp,
    TimeStampSeqNr,
    LifeTime,
    /// Sum of the encoded widths of the dictionary fields
    Length,
    FragOffset,
    AppDataLen,
    Type,
    PFlags,
    PLength,
    Payload,
}

#[derive(Error, Debug)]
#[error("Unknown bundle field '{0}'")]
pub struct UnknownField(pub String);

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Version,
        Field::Flags,
        Field::DestNode,
        Field::DestServ,
        Field::SrcNode,
        Field::SrcServ,
        Field::RepNode,
        Field::RepServ,
        Field::CustNode,
        Field::CustServ,
        Field::TimeStamp,
        Field::TimeStampSeqNr,
        Field::LifeTime,
        Field::Length,
        Field::FragOffset,
        Field::AppDataLen,
        Field::Type,
        Field::PFlags,
        Field::PLength,
        Field::Payload,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The endpoint fields whose widths are summed into [`Field::Length`].
    pub const fn is_dictionary(self) -> bool {
        matches!(
            self,
            Field::DestNode
                | Field::DestServ
                | Field::SrcNode
                | Field::SrcServ
                | Field::RepNode
                | Field::RepServ
                | Field::CustNode
                | Field::CustServ
        )
    }

    /// Version and Type are single raw bytes, Payload is opaque.
    pub const fn is_sdnv(self) -> bool {
        !matches!(self, Field::Version | Field::Type | Field::Payload)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Flags => "flags",
            Field::DestNode => "dest-node",
            Field::DestServ => "dest-serv",
            Field::SrcNode => "src-node",
            Field::SrcServ => "src-serv",
            Field::RepNode => "rep-node",
            Field::RepServ => "rep-serv",
            Field::CustNode => "cust-node",
            Field::CustServ => "cust-serv",
            Field::TimeStamp => "time-stamp",
            Field::TimeStampSeqNr => "time-stamp-seq-nr",
            Field::LifeTime => "life-time",
            Field::Length => "length",
            Field::FragOffset => "frag-offset",
            Field::AppDataLen => "app-data-len",
            Field::Type => "type",
            Field::PFlags => "p-flags",
            Field::PLength => "p-length",
            Field::Payload => "payload",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

impl core::str::FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.into()))
    }
}
