//! Extension intro emitter (§4.2).
//!
//! Ensures every extension referenced downstream in this transaction
//! is known to the log stream before any record referencing it is
//! emitted, and relays any schema change (resize, reset, header
//! growth) that accompanies the reference.

use mailidx_kernel::transaction::ExtIntroWire;
use mailidx_kernel::{Appender, IndexView, RecordType, ALL_ONES, MODSEQ_EXT_NAME};

use crate::{driver, header_patch, wire};

/// Emit intro / reset / header-patch records for every extension id
/// the transaction mentions, in ascending `ext_id` order (§4.2 tie-break).
pub fn emit_ext_intros(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
) {
    let ext_count = transaction.ext_count();
    for ext_id in 0..ext_count {
        emit_one(transaction, view, appender, ext_id);
    }
}

fn emit_one(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
    ext_id: u32,
) {
    let map_idx = view.map().get_ext_idx(ext_id);
    let is_new = transaction.reset || map_idx.is_none();

    let resize = transaction.ext_resizes.get(&ext_id);
    let resize_has_name = resize.is_some_and(|r| !r.name.is_empty());
    let ext_hdr_update = transaction.ext_hdr_updates.get(&ext_id);

    let map_entry = map_idx.and_then(|idx| view.map().get_map_entry(idx));
    let reset_directive = transaction.ext_resets.get(&ext_id);
    let resolved_reset_id = resolve_reset_id(transaction, map_entry, is_new, ext_id);

    let should_emit_intro =
        resize_has_name || resolved_reset_id != 0 || ext_hdr_update.is_some_and(|u| !u.is_empty());

    let hdr_size = if should_emit_intro {
        construct_and_emit_intro(transaction, view, appender, ext_id, resolved_reset_id)
    } else {
        0
    };

    if let Some(reset) = reset_directive {
        if reset.new_reset_id != 0 {
            if let Some(&expected) = transaction.ext_reset_ids.get(&ext_id) {
                assert_eq!(
                    reset.new_reset_id, expected,
                    "ext_reset.new_reset_id disagrees with ext_reset_ids for ext_id {ext_id}"
                );
            }
            let mut buf = Vec::new();
            wire::encode_ext_reset(&mut buf, reset);
            wire::pad_to_4(&mut buf);
            driver::emit(appender, RecordType::ExtReset, &buf);
        }
    }

    if let Some(update) = ext_hdr_update {
        if !update.is_empty() {
            if let Some((record_type, body)) =
                header_patch::encode_ext_hdr_update(&update.data, &update.mask, update.alloc_size, hdr_size as usize)
            {
                driver::emit(appender, record_type, &body);
            }
        }
    }
}

/// Resolves extension identity, builds the wire intro, checks its
/// precondition, emits it, and fires the modseq-bootstrap side effect.
/// Shared with `ext_records.rs`'s `EXT_REC_UPDATE`/`EXT_ATOMIC_INC`
/// path (§4.4 step 1), mirroring the original's single
/// `log_append_ext_intro(ext_id, reset_id, &hdr_size)` called
/// identically from both the intro pass and the record-update pass.
/// Returns the advertised `hdr_size`.
pub(crate) fn construct_and_emit_intro(
    transaction: &mailidx_kernel::Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
    ext_id: u32,
    reset_id: u32,
) -> u32 {
    let registered = view.registry().get(ext_id);
    let map_idx = view.map().get_ext_idx(ext_id);
    let is_new = transaction.reset || map_idx.is_none();

    let resize = transaction.ext_resizes.get(&ext_id);
    let resize_has_name = resize.is_some_and(|r| !r.name.is_empty());

    let current_hdr_size = if is_new {
        registered.map_or(0, |r| r.header_size)
    } else {
        map_idx
            .and_then(|idx| view.map().get_map_entry(idx))
            .map_or(0, |entry| entry.hdr_size)
    };

    let mut hdr_size = current_hdr_size;
    if let Some(update) = transaction.ext_hdr_updates.get(&ext_id) {
        let significant = header_patch::significant_len(&update.mask);
        if significant as u32 > hdr_size {
            hdr_size = significant as u32;
        }
    }

    let wire_ext_id = map_idx.unwrap_or(ALL_ONES);
    let name = if is_new {
        resize
            .map(|r| r.name.clone())
            .or_else(|| registered.map(|r| r.name.clone()))
            .unwrap_or_default()
    } else {
        String::new()
    };

    let intro = if let Some(resize) = resize.filter(|_| resize_has_name) {
        ExtIntroWire {
            ext_id: wire_ext_id,
            reset_id,
            hdr_size,
            record_size: resize.record_size,
            record_align: resize.record_align,
            flags: resize.flags,
            name,
        }
    } else {
        ExtIntroWire {
            ext_id: wire_ext_id,
            reset_id,
            hdr_size,
            record_size: registered.map_or(0, |r| r.record_size.try_into().unwrap_or(u16::MAX)),
            record_align: registered.map_or(0, |r| r.record_align),
            flags: mailidx_kernel::transaction::EXT_INTRO_FLAG_NO_SHRINK,
            name,
        }
    };

    assert!(
        intro.record_size != 0 || intro.hdr_size != 0,
        "extension intro for ext_id {ext_id} has both record_size and hdr_size zero"
    );

    let mut buf = Vec::new();
    wire::encode_ext_intro(&mut buf, &intro);
    wire::pad_to_4(&mut buf);
    driver::emit(appender, RecordType::ExtIntro, &buf);

    if appender.new_highest_modseq() == 0 && intro.name == MODSEQ_EXT_NAME {
        appender.set_new_highest_modseq(1);
    }

    hdr_size
}

fn resolve_reset_id(
    transaction: &mailidx_kernel::Transaction,
    map_entry: Option<&mailidx_kernel::ExtensionMapEntry>,
    is_new: bool,
    ext_id: u32,
) -> u32 {
    if let Some(&rid) = transaction.ext_reset_ids.get(&ext_id) {
        if rid != 0 {
            return rid;
        }
    }
    if !is_new {
        return map_entry.map_or(0, |entry| entry.reset_id);
    }
    0
}
