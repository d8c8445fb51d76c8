//! Extension record-update emitter (§4.4).
//!
//! Per-extension record payloads are opaque to the exporter; the only
//! job here is to make sure each referenced extension has an intro in
//! the stream (reflecting its current `reset_id`) before its payload
//! is emitted. Intro construction itself is shared with `ext_intro.rs`
//! (`construct_and_emit_intro`), the same way the original's
//! `log_append_ext_recs` calls the same `log_append_ext_intro` as the
//! dedicated intro pass rather than rebuilding the intro independently.

use mailidx_kernel::{Appender, IndexView, RecordType};

use crate::{driver, ext_intro};

/// Emit `EXT_REC_UPDATE` records for every extension in
/// `transaction.ext_rec_updates`, in ascending `ext_id` order.
pub fn emit_ext_rec_updates(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
) {
    for (&ext_id, payload) in &transaction.ext_rec_updates {
        emit_one(transaction, view, appender, ext_id, payload, RecordType::ExtRecUpdate);
    }
}

/// Emit `EXT_ATOMIC_INC` records for every extension in
/// `transaction.ext_rec_atomics`, in ascending `ext_id` order.
pub fn emit_ext_rec_atomics(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
) {
    for (&ext_id, payload) in &transaction.ext_rec_atomics {
        emit_one(transaction, view, appender, ext_id, payload, RecordType::ExtAtomicInc);
    }
}

fn emit_one(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
    ext_id: u32,
    payload: &[u8],
    record_type: RecordType,
) {
    let reset_id = transaction.ext_reset_ids.get(&ext_id).copied().unwrap_or(0);
    ext_intro::construct_and_emit_intro(transaction, view, appender, ext_id, reset_id);

    debug_assert_eq!(payload.len() % 4, 0, "ext record payload for {ext_id} is not 4-aligned");
    driver::emit(appender, record_type, payload);
}
