//! Transaction-to-log exporter: serializes a `mailidx_kernel::Transaction`
//! into a canonically-ordered stream of binary records.
//!
//! # Module dependency direction
//!
//! `wire` ← `header_patch` ← `ext_intro` ← `ext_records` / `flag_update` /
//! `keyword` ← `driver`
//!
//! `validate` depends only on `mailidx_kernel`; it has no dependency on
//! the encoders, so a caller can validate without pulling in the
//! encoding machinery.
//!
//! # What this crate does not own
//!
//! The sink (`Appender`), the extension registry, and the index map
//! are all read through trait objects defined in `mailidx_kernel`. This
//! crate never opens a file, never allocates a persistent buffer, and
//! never decides policy about when a transaction commits.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod driver;
pub mod ext_intro;
pub mod ext_records;
pub mod flag_update;
pub mod header_patch;
pub mod keyword;
pub mod validate;
pub mod wire;

pub use driver::export;
pub use validate::validate;
