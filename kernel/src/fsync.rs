//! Fsync-mask bit constants (§6.5), internal to the driver.
//!
//! Distinct from [`crate::change`] on purpose (§9: "keep them
//! distinct; do not attempt to derive one from the other — their
//! divergence is intentional"). The clearest witness to that
//! divergence is non-external expunges: they set
//! [`crate::change::OTHERS`] but never [`EXPUNGES`].

/// Per-category bitset combined with [`crate::IndexSettings::fsync_mask`]
/// to decide `Appender::set_want_fsync`.
pub type FsyncMask = u32;

pub const APPENDS: FsyncMask = 1 << 0;
pub const FLAGS: FsyncMask = 1 << 1;
pub const EXPUNGES: FsyncMask = 1 << 2;
pub const KEYWORDS: FsyncMask = 1 << 3;
