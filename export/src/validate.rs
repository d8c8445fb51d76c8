//! Non-panicking pre-flight validation.
//!
//! `export` treats every precondition in §7 as a programming error and
//! aborts via `assert!` when one is violated, by design giving callers
//! no recoverable path there. This module hardens the
//! `ext_reset`/`ext_reset_ids` consistency check instead: a caller
//! that wants a `Result` instead of a panic can run [`validate`] at
//! the transaction's commit boundary and reject the transaction
//! before it ever reaches the encoders.

use mailidx_kernel::{IndexView, Transaction, TransactionInvariantError};

/// Check `transaction` against every invariant `export` would
/// otherwise only discover by panicking.
///
/// # Errors
///
/// Returns the first violation found. Does not attempt to report every
/// violation at once — same trade-off the original assertion-per-call
/// design makes.
pub fn validate(transaction: &Transaction, view: &dyn IndexView) -> Result<(), TransactionInvariantError> {
    if transaction.index_deleted && transaction.index_undeleted {
        return Err(TransactionInvariantError::DeleteUndeleteConflict);
    }

    for (&ext_id, reset) in &transaction.ext_resets {
        if reset.new_reset_id == 0 {
            continue;
        }
        if let Some(&expected) = transaction.ext_reset_ids.get(&ext_id) {
            if reset.new_reset_id != expected {
                return Err(TransactionInvariantError::ResetIdMismatch {
                    ext_id,
                    reset_new_reset_id: reset.new_reset_id,
                    reset_ids_entry: expected,
                });
            }
        }
    }

    for &ext_id in transaction.ext_hdr_updates.keys() {
        if view.registry().get(ext_id).is_none()
            && view.map().get_ext_idx(ext_id).is_none()
            && !transaction.ext_resizes.contains_key(&ext_id)
            && !transaction.reset
        {
            return Err(TransactionInvariantError::UnknownExtension { ext_id });
        }
    }

    for update in transaction.ext_hdr_updates.values() {
        if update.data.len() != update.mask.len() || update.mask.len() != update.alloc_size {
            return Err(TransactionInvariantError::HeaderPatchLengthMismatch {
                old_len: update.data.len(),
                new_len: update.alloc_size,
            });
        }
    }

    Ok(())
}
