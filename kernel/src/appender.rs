//! The append-only log sink contract (§6.1).
//!
//! The exporter never opens a file or holds a buffer itself — it
//! drives an `Appender`. Production callers back this with the real
//! transaction log's mmap'd tail; `mailidx-harness::appender` backs it
//! with a `Vec<u8>` for tests and benchmarks.

/// Sink for one exported transaction's records.
///
/// Calls arrive in the §4.1 emission order. Every `append` payload has
/// already been padded to a 4-byte boundary by the caller; `Appender`
/// implementations must not re-pad.
pub trait Appender {
    /// Append one framed record: a 1-byte type tag followed by its
    /// (already 4-byte-aligned) payload.
    fn append(&mut self, record_type: crate::RecordType, payload: &[u8]);

    /// Total bytes appended so far. Used by the driver to detect
    /// "has anything been emitted yet" (§4.1 step 4).
    fn output_len(&self) -> usize;

    /// Current value of the highest-modseq bootstrap cell. Starts at
    /// `0`; the exporter may transition it `0 -> 1` (§4.2 step 5).
    fn new_highest_modseq(&self) -> u64;

    /// Set the highest-modseq bootstrap cell.
    fn set_new_highest_modseq(&mut self, value: u64);

    /// Record whether this transaction should be treated as an index
    /// sync transaction on replay.
    fn set_sync_transaction(&mut self, value: bool);

    /// Record whether this transaction changed the log's tail offset.
    fn set_tail_offset_changed(&mut self, value: bool);

    /// Request (or clear the request for) an fsync once this
    /// transaction's records have all been appended. Called at most
    /// once per `export()` call, after every record has been
    /// appended, per the §6.5 fsync-mask rule.
    fn set_want_fsync(&mut self, want: bool);
}
