//! Typed harness failures.

/// Failure rendering a dump, as distinct from a transaction invariant
/// violation (`mailidx_kernel::TransactionInvariantError`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The CLI could not serialize its trace as JSON.
    SerializationFailed { detail: String },
    /// The CLI could not write its output file.
    WriteFailed { detail: String },
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SerializationFailed { detail } => write!(f, "serialization failed: {detail}"),
            Self::WriteFailed { detail } => write!(f, "write failed: {detail}"),
        }
    }
}

impl std::error::Error for HarnessError {}
