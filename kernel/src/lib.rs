//! Mail index kernel: the pure data model for the transaction-to-log
//! exporter.
//!
//! This crate owns the types the exporter reads and the contracts the
//! exporter's collaborators (the extension registry, the index map, the
//! append-only log sink) must satisfy. It contains no encoding logic —
//! that lives in `mailidx-export`, which depends on this crate.
//!
//! # Module dependency direction
//!
//! `record` / `change` / `fsync` / `seqset` ← `ext` ← `transaction` ← `appender`
//!
//! One-way only, no cycles. `transaction` is built from `seqset` and
//! `ext`; `appender` stands alone as the sink contract.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod appender;
pub mod change;
pub mod error;
pub mod ext;
pub mod fsync;
pub mod record;
pub mod seqset;
pub mod transaction;

pub use appender::Appender;
pub use error::TransactionInvariantError;
pub use ext::{
    ExtensionMapEntry, ExtensionRegistration, ExtensionRegistry, IndexMap, IndexSettings,
    IndexView,
};
pub use record::RecordType;
pub use seqset::SequenceSet;
pub use transaction::Transaction;

/// Fixed size, in bytes, of the main index header image.
///
/// The real on-disk `struct mail_index_header` layout is an external
/// binary contract this crate does not inherit (see `DESIGN.md`); 128
/// bytes is a representative fixed size large enough to exercise both
/// the pre- and post-append header patch paths.
pub const HEADER_SIZE: usize = 128;

/// Canonical name of the extension that tracks per-message modification
/// sequence numbers. Used by the intro emitter's modseq-bootstrap rule.
pub const MODSEQ_EXT_NAME: &str = "modseq";

/// Wire sentinel meaning "introduce this extension by name" (no existing
/// index-map slot).
pub const ALL_ONES: u32 = u32::MAX;
