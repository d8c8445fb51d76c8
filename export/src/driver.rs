//! The exporter's top-level driver (§4.1).
//!
//! `export` calls each sub-encoder in the fixed canonical order,
//! skipping any step whose source is empty, and accumulates the
//! change-summary bitset as it goes. Every encoder funnels its
//! records through [`emit`], the single choke point that asserts
//! alignment (Testable Property 3) instead of repeating the check in
//! every encoder.

use mailidx_kernel::{change, fsync, Appender, IndexView, RecordType, Transaction};

use crate::{ext_intro, ext_records, flag_update, header_patch, keyword, wire};

/// Append one record to `appender`, asserting its payload is already
/// 4-byte aligned.
pub(crate) fn emit(appender: &mut dyn Appender, record_type: RecordType, payload: &[u8]) {
    debug_assert_eq!(
        payload.len() % 4,
        0,
        "record {record_type} payload length {} is not 4-byte aligned",
        payload.len()
    );
    appender.append(record_type, payload);
}

/// Serialize `transaction` into `appender`, in canonical order, and
/// return the resulting change-summary bitset.
///
/// # Panics
///
/// Panics if `transaction` violates any of the §7 preconditions (most
/// notably: both `index_deleted` and `index_undeleted` set). Callers
/// that want a non-panicking pre-flight should call
/// [`crate::validate::validate`] first.
#[tracing::instrument(skip(transaction, view, appender), fields(change_summary))]
pub fn export(
    transaction: &mut Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
) -> change::ChangeSummary {
    assert!(
        !(transaction.index_deleted && transaction.index_undeleted),
        "transaction marks the index both deleted and undeleted"
    );

    let mut change_summary: change::ChangeSummary = 0;
    let mut fsync_mask: fsync::FsyncMask = 0;

    // 1. Index-undeleted marker.
    if transaction.index_undeleted {
        assert!(!transaction.index_deleted);
        emit(appender, RecordType::IndexUndeleted, &[0, 0, 0, 0]);
    }

    // 2. Extension intros / resizes / resets / header patches.
    ext_intro::emit_ext_intros(transaction, view, appender);

    // 3. Pre-header update.
    if transaction.pre_hdr_changed {
        if let Some((record_type, body)) = header_patch::encode_main_hdr_update(
            &transaction.pre_hdr_change,
            &transaction.pre_hdr_mask,
            mailidx_kernel::HEADER_SIZE,
        ) {
            emit(appender, record_type, &body);
        }
    }

    // 4. Anything emitted so far belongs to the catch-all category.
    if appender.output_len() > 0 {
        change_summary |= change::OTHERS;
        tracing::trace!(bytes_so_far = appender.output_len(), "pre-append records classified as OTHERS");
    }

    // 5. Attribute updates.
    if !transaction.attribute_updates.is_empty() || !transaction.attribute_updates_suffix.is_empty() {
        transaction.attribute_updates.push(0);
        wire::pad_to_4(&mut transaction.attribute_updates);
        let mut body = std::mem::take(&mut transaction.attribute_updates);
        body.extend_from_slice(&transaction.attribute_updates_suffix);
        assert_eq!(body.len() % 4, 0, "attribute update buffer not 4-aligned after finalization");
        emit(appender, RecordType::AttributeUpdate, &body);
        change_summary |= change::ATTRIBUTE;
    }

    // 6. Appends.
    if !transaction.appends.is_empty() {
        for append in &transaction.appends {
            debug_assert_eq!(append.len() % 4, 0, "append record payload is not 4-aligned");
            emit(appender, RecordType::Append, append);
        }
        change_summary |= change::APPEND;
        fsync_mask |= fsync::APPENDS;
        tracing::trace!(count = transaction.appends.len(), "emitted appends");
    }

    // 7. Flag updates.
    if let Some(body) = flag_update::encode_flag_updates(transaction) {
        emit(appender, RecordType::FlagUpdate, &body);
        change_summary |= change::FLAGS;
        fsync_mask |= fsync::FLAGS;
        tracing::trace!(count = transaction.updates.len(), "emitted flag updates");
    }

    // 8. Extension record updates and atomic increments.
    if !transaction.ext_rec_updates.is_empty() {
        ext_records::emit_ext_rec_updates(transaction, view, appender);
        change_summary |= change::OTHERS;
    }
    if !transaction.ext_rec_atomics.is_empty() {
        ext_records::emit_ext_rec_atomics(transaction, view, appender);
        change_summary |= change::OTHERS;
    }

    // 9. Keyword updates.
    if keyword::emit_keyword_updates(transaction, view, appender) {
        change_summary |= change::KEYWORDS;
        fsync_mask |= fsync::KEYWORDS;
        tracing::trace!("emitted keyword updates");
    }

    // 10. Modseq updates, kept almost last.
    if !transaction.modseq_updates.is_empty() {
        let mut body = Vec::with_capacity(transaction.modseq_updates.len() * 16);
        for entry in &transaction.modseq_updates {
            wire::encode_modseq_entry(&mut body, entry);
        }
        emit(appender, RecordType::ModseqUpdate, &body);
        change_summary |= change::MODSEQ;
        tracing::trace!(count = transaction.modseq_updates.len(), "emitted modseq updates");
    }

    // 11. Expunges.
    if !transaction.expunges.is_empty() {
        let mut body = Vec::with_capacity(transaction.expunges.len() * 20);
        for entry in &transaction.expunges {
            wire::encode_expunge_entry(&mut body, entry);
        }
        emit(appender, RecordType::ExpungeGuid, &body);
        if transaction.is_external() {
            change_summary |= change::EXPUNGE;
            fsync_mask |= fsync::EXPUNGES;
        } else {
            change_summary |= change::OTHERS;
        }
        tracing::trace!(
            count = transaction.expunges.len(),
            external = transaction.is_external(),
            "emitted expunges"
        );
    }

    // 12. Post-header update.
    if transaction.post_hdr_changed {
        if let Some((record_type, body)) = header_patch::encode_main_hdr_update(
            &transaction.post_hdr_change,
            &transaction.post_hdr_mask,
            mailidx_kernel::HEADER_SIZE,
        ) {
            emit(appender, record_type, &body);
            change_summary |= change::OTHERS;
        }
    }

    // 13. Index-deleted marker. Unlike step 1's index-undeleted marker
    // (caught retroactively by step 4's "anything emitted so far"
    // check), this is the last step, so it must set its own bit.
    if transaction.index_deleted {
        assert!(!transaction.index_undeleted);
        emit(appender, RecordType::IndexDeleted, &[0, 0, 0, 0]);
        change_summary |= change::OTHERS;
    }

    assert_eq!(
        appender.output_len() > 0,
        change_summary != 0,
        "post-export invariant violated: output.len={} change_summary={change_summary:#x}",
        appender.output_len()
    );

    appender.set_sync_transaction(transaction.sync_transaction);
    appender.set_tail_offset_changed(transaction.tail_offset_changed);

    let want_fsync = (view.settings().fsync_mask & fsync_mask) != 0 || transaction.wants_explicit_fsync();
    appender.set_want_fsync(want_fsync);

    tracing::debug!(
        change_summary = change_summary,
        fsync_mask = fsync_mask,
        want_fsync,
        bytes_written = appender.output_len(),
        "export complete"
    );

    change_summary
}
