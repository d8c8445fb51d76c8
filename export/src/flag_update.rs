//! Flag-update encoder (§4.5).
//!
//! Down-projects each in-memory flag delta to its 12-byte wire entry,
//! discarding everything above the low byte of `add_flags`/
//! `remove_flags` except the modseq-increment pseudo-flag, which is
//! folded into a dedicated bit.

use mailidx_kernel::transaction::FLAG_UPDATE_MODSEQ;
use mailidx_kernel::Transaction;

use crate::wire;

/// Encode every entry in `transaction.updates` into one contiguous
/// buffer, or `None` if there are no entries.
#[must_use]
pub fn encode_flag_updates(transaction: &Transaction) -> Option<Vec<u8>> {
    if transaction.updates.is_empty() {
        return None;
    }
    let mut buf = Vec::with_capacity(transaction.updates.len() * 12);
    for update in &transaction.updates {
        #[allow(clippy::cast_possible_truncation)]
        let add_low8 = (update.add_flags & 0xff) as u8;
        #[allow(clippy::cast_possible_truncation)]
        let remove_low8 = (update.remove_flags & 0xff) as u8;
        let modseq_inc = u8::from(update.add_flags & FLAG_UPDATE_MODSEQ != 0);
        wire::encode_flag_entry(&mut buf, update.uid1, update.uid2, add_low8, remove_low8, modseq_inc);
    }
    Some(buf)
}
