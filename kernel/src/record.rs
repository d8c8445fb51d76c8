//! Log record type tags (§6.2 of the exporter contract).
//!
//! Values are assigned sequentially in the §4.1 emission order. This
//! workspace does not inherit the real Dovecot on-disk tag numbering
//! (`original_source/` kept only the `.c` file, not the header that
//! defines `enum mail_transaction_type`), so the numbering here is
//! internal to this crate's own wire format, not a claim of
//! byte-compatibility with any external log reader.

/// One tag per record family the exporter can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    IndexUndeleted = 1,
    ExtIntro = 2,
    ExtReset = 3,
    ExtHdrUpdate = 4,
    ExtHdrUpdate32 = 5,
    HeaderUpdate = 6,
    AttributeUpdate = 7,
    Append = 8,
    FlagUpdate = 9,
    ExtRecUpdate = 10,
    ExtAtomicInc = 11,
    KeywordUpdate = 12,
    ModseqUpdate = 13,
    ExpungeGuid = 14,
    IndexDeleted = 15,
}

impl RecordType {
    /// The raw wire tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a wire tag byte back to a `RecordType`, if it names a
    /// known record family.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::IndexUndeleted),
            2 => Some(Self::ExtIntro),
            3 => Some(Self::ExtReset),
            4 => Some(Self::ExtHdrUpdate),
            5 => Some(Self::ExtHdrUpdate32),
            6 => Some(Self::HeaderUpdate),
            7 => Some(Self::AttributeUpdate),
            8 => Some(Self::Append),
            9 => Some(Self::FlagUpdate),
            10 => Some(Self::ExtRecUpdate),
            11 => Some(Self::ExtAtomicInc),
            12 => Some(Self::KeywordUpdate),
            13 => Some(Self::ModseqUpdate),
            14 => Some(Self::ExpungeGuid),
            15 => Some(Self::IndexDeleted),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
