//! Keyword-update encoder (§4.6).
//!
//! Resolves each `keyword_updates[i]` against the view's keyword table
//! and emits one `KEYWORD_UPDATE` record per nonempty ADD or REMOVE
//! sequence set, ADD before REMOVE for a given keyword.

use mailidx_kernel::{Appender, IndexView, RecordType, Transaction};

use crate::driver;
use crate::wire::{self, KEYWORD_MODIFY_ADD, KEYWORD_MODIFY_REMOVE};

/// Emit keyword-update records in ascending keyword-index order.
/// Returns `true` if at least one record was emitted (the driver uses
/// this to gate `CHANGE_KEYWORDS`/`FSYNC_KEYWORDS`).
///
/// # Panics
///
/// Panics if `transaction.keyword_updates` names a keyword index past
/// the end of `view.keywords()` (§7: `|keyword_updates| > |keywords|`
/// is a precondition violation).
pub fn emit_keyword_updates(
    transaction: &Transaction,
    view: &dyn IndexView,
    appender: &mut dyn Appender,
) -> bool {
    let keywords = view.keywords();
    let mut emitted = false;

    for (&keyword_idx, update) in &transaction.keyword_updates {
        let keyword = keywords
            .get(keyword_idx as usize)
            .unwrap_or_else(|| panic!("keyword update references unknown keyword index {keyword_idx}"));

        if !update.add_seq.is_empty() {
            emit_one(appender, KEYWORD_MODIFY_ADD, keyword, &update.add_seq);
            emitted = true;
        }
        if !update.remove_seq.is_empty() {
            emit_one(appender, KEYWORD_MODIFY_REMOVE, keyword, &update.remove_seq);
            emitted = true;
        }
    }

    emitted
}

fn emit_one(
    appender: &mut dyn Appender,
    modify_type: u8,
    keyword: &str,
    seq: &mailidx_kernel::SequenceSet,
) {
    let mut buf = Vec::new();
    wire::encode_keyword_header(&mut buf, modify_type, keyword);
    wire::pad_to_4(&mut buf);
    buf.extend_from_slice(&seq.to_bytes());
    wire::pad_to_4(&mut buf);
    driver::emit(appender, RecordType::KeywordUpdate, &buf);
}
