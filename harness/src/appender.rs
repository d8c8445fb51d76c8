//! `InMemoryAppender`: an `Appender` backed by a `Vec<u8>`.
//!
//! Frame format: `[type: u8][payload...]`, concatenated with no
//! length prefix — the driver guarantees every payload is already
//! 4-byte aligned, so a reader can resynchronize by record-type
//! knowledge alone. Used by fixtures, the lock-test integration
//! crate, and the benchmarks.

use mailidx_kernel::{Appender, RecordType};

/// One decoded frame, kept alongside the raw bytes for assertions that
/// want to inspect individual records rather than the flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub record_type: RecordType,
    pub payload: Vec<u8>,
}

/// Accumulates exported records in memory.
#[derive(Debug, Default)]
pub struct InMemoryAppender {
    buf: Vec<u8>,
    frames: Vec<Frame>,
    new_highest_modseq: u64,
    sync_transaction: bool,
    tail_offset_changed: bool,
    want_fsync: bool,
}

impl InMemoryAppender {
    /// A fresh appender with no accumulated output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The flat concatenated `[type][payload]...` byte stream.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The records emitted, in emission order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn sync_transaction(&self) -> bool {
        self.sync_transaction
    }

    #[must_use]
    pub fn tail_offset_changed(&self) -> bool {
        self.tail_offset_changed
    }

    #[must_use]
    pub fn want_fsync(&self) -> bool {
        self.want_fsync
    }
}

impl Appender for InMemoryAppender {
    fn append(&mut self, record_type: RecordType, payload: &[u8]) {
        self.buf.push(record_type.tag());
        self.buf.extend_from_slice(payload);
        self.frames.push(Frame {
            record_type,
            payload: payload.to_vec(),
        });
    }

    fn output_len(&self) -> usize {
        self.buf.len()
    }

    fn new_highest_modseq(&self) -> u64 {
        self.new_highest_modseq
    }

    fn set_new_highest_modseq(&mut self, value: u64) {
        self.new_highest_modseq = value;
    }

    fn set_sync_transaction(&mut self, value: bool) {
        self.sync_transaction = value;
    }

    fn set_tail_offset_changed(&mut self, value: bool) {
        self.tail_offset_changed = value;
    }

    fn set_want_fsync(&mut self, want: bool) {
        self.want_fsync = want;
    }
}
