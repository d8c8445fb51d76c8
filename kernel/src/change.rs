//! Change-summary bit constants (§6.4).
//!
//! A `ChangeSummary` is a plain `u32` bitset reported back to the
//! transaction's caller to classify the transaction's observable
//! effect. Flat constants, not a `bitflags!` type — the same idiom the
//! exporter uses for its record-type tags, and no `bitflags` dependency
//! appears anywhere in this workspace's ancestry.

/// Per-category bitset reported to the caller at the end of `export()`.
pub type ChangeSummary = u32;

/// At least one append record was emitted.
pub const APPEND: ChangeSummary = 1 << 0;
/// At least one flag-update record was emitted.
pub const FLAGS: ChangeSummary = 1 << 1;
/// An externally-marked expunge was emitted (see [`crate::fsync::EXPUNGES`]).
pub const EXPUNGE: ChangeSummary = 1 << 2;
/// At least one modseq-update record was emitted.
pub const MODSEQ: ChangeSummary = 1 << 3;
/// At least one keyword-update record was emitted.
pub const KEYWORDS: ChangeSummary = 1 << 4;
/// The attribute-update record was emitted.
pub const ATTRIBUTE: ChangeSummary = 1 << 5;
/// A record was emitted that does not map to one of the other specific
/// categories above (header updates, extension records, non-external
/// expunges, index delete/undelete markers, and "bytes were already
/// present before this step" detection).
pub const OTHERS: ChangeSummary = 1 << 6;
