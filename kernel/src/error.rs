//! Typed transaction-validation errors.

/// A transaction violates one of the exporter's precondition
/// invariants (§7 of the exporter contract). These are caught by
/// [`crate::Transaction::validate`] before the transaction ever
/// reaches the encoders; the encoders themselves assume a validated
/// transaction and use `assert!`/`debug_assert!` for anything that
/// should be unreachable once validation has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionInvariantError {
    /// A sequence set's ranges were not ascending and non-overlapping.
    UnorderedSequenceSet { field: String },

    /// Both `deleted` and `undeleted` were requested in the same
    /// transaction (§4.9 mutual exclusion).
    DeleteUndeleteConflict,

    /// A flag-update, expunge, modseq, or extension-record entry
    /// referenced a UID that the transaction's `max_uid` does not
    /// account for.
    UidOutOfRange { uid: u32, max_uid: u32 },

    /// An extension record or header update named an extension id
    /// with no corresponding entry in the extension registry and no
    /// accompanying intro for it in this transaction.
    UnknownExtension { ext_id: u32 },

    /// A header-patch buffer's `old` and `new` images were not the
    /// same length.
    HeaderPatchLengthMismatch { old_len: usize, new_len: usize },

    /// `ext_resets[ext_id].new_reset_id` disagreed with
    /// `ext_reset_ids[ext_id]` (§4.2 step 7 consistency check).
    ResetIdMismatch {
        ext_id: u32,
        reset_new_reset_id: u32,
        reset_ids_entry: u32,
    },
}

impl std::fmt::Display for TransactionInvariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnorderedSequenceSet { field } => {
                write!(f, "sequence set for {field} is not ascending and non-overlapping")
            }
            Self::DeleteUndeleteConflict => {
                write!(f, "transaction requests both delete and undelete")
            }
            Self::UidOutOfRange { uid, max_uid } => {
                write!(f, "uid {uid} exceeds transaction max_uid {max_uid}")
            }
            Self::UnknownExtension { ext_id } => {
                write!(f, "extension id {ext_id} is not registered and not introduced in this transaction")
            }
            Self::HeaderPatchLengthMismatch { old_len, new_len } => write!(
                f,
                "header patch old/new length mismatch: {old_len} vs {new_len}"
            ),
            Self::ResetIdMismatch {
                ext_id,
                reset_new_reset_id,
                reset_ids_entry,
            } => write!(
                f,
                "ext_id {ext_id}: ext_resets.new_reset_id ({reset_new_reset_id}) disagrees with ext_reset_ids ({reset_ids_entry})"
            ),
        }
    }
}

impl std::error::Error for TransactionInvariantError {}
