//! Extension and index-map contracts (§5 of the exporter contract).
//!
//! The exporter reads these traits; it never owns the collections
//! behind them. Production callers back `ExtensionRegistry`/`IndexMap`
//! with the real mail index's extension table and header cache; these
//! traits exist so the exporter can be driven and tested against a
//! minimal in-memory stand-in instead.

/// One row of the extension registry: an extension's identity and its
/// current on-disk placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRegistration {
    pub name: String,
    /// Per-record header size, in bytes.
    pub record_size: u32,
    /// Extension header size, in bytes.
    pub header_size: u32,
    /// Record alignment, in bytes. Must be a power of two.
    pub record_align: u16,
    /// Generation counter bumped whenever the extension's storage is
    /// reset (§5.2).
    pub reset_id: u32,
}

/// What the index map currently knows about one extension slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionMapEntry {
    /// Offset, in bytes, of this extension's header within the main
    /// index header image.
    pub hdr_offset: u32,
    /// Size, in bytes, of this extension's header as currently
    /// persisted in this index map. May differ from the registry's
    /// `header_size` if the map predates a later registry resize.
    pub hdr_size: u32,
    /// Reset id this extension was last persisted under. The intro
    /// emitter's reset-id resolution (§4.2 step 3) reads this,
    /// not the registry's `reset_id`: the map reflects what is
    /// currently on disk, the registry what the transaction's caller
    /// registered in memory, and the two may disagree across a reset.
    pub reset_id: u32,
}

/// Read-only lookup of registered extensions, keyed by extension id
/// (the index map's slot number) or by name (for intro/bootstrap
/// lookups, where the caller does not yet know the id).
pub trait ExtensionRegistry {
    /// Look up a registration by extension id.
    fn get(&self, ext_id: u32) -> Option<&ExtensionRegistration>;

    /// Look up `(ext_id, registration)` by name.
    fn get_by_name(&self, name: &str) -> Option<(u32, &ExtensionRegistration)>;

    /// All currently known `(ext_id, registration)` pairs, in
    /// ascending `ext_id` order. The exporter relies on this ordering
    /// when it must emit more than one intro record in a single
    /// transaction (§4.2).
    fn iter_ordered(&self) -> Vec<(u32, &ExtensionRegistration)>;
}

/// Read-only lookup of where extensions live within the main index
/// header image.
pub trait IndexMap {
    /// The index-map slot assigned to `ext_id`, if this index map has
    /// a slot for it yet.
    fn get_ext_idx(&self, ext_id: u32) -> Option<u32>;

    /// Current placement of the extension at map slot `idx`.
    fn get_map_entry(&self, idx: u32) -> Option<&ExtensionMapEntry>;

    /// Total allocated size, in bytes, of the main index header image.
    /// Grows monotonically as extensions are introduced or resized.
    fn alloc_size(&self) -> u32;
}

/// Read-only view of everything the exporter needs from the index
/// that is not part of the transaction itself: the extension
/// registry, the index map, the live keyword list, and the fsync
/// policy.
pub trait IndexView {
    fn registry(&self) -> &dyn ExtensionRegistry;
    fn map(&self) -> &dyn IndexMap;

    /// Keyword names, indexed by keyword index. The exporter never
    /// mutates this list; new keywords are assumed already registered
    /// by the time a transaction references their index.
    fn keywords(&self) -> &[String];

    fn settings(&self) -> &IndexSettings;

    /// The main index header image, exactly `mailidx_kernel::HEADER_SIZE`
    /// bytes, as it stood before the transaction being exported.
    fn header_image(&self) -> &[u8];

    /// Number of messages in the index before this transaction.
    fn message_count(&self) -> u32;

    /// True if the index is currently marked deleted (§4.9).
    fn is_deleted(&self) -> bool;
}

/// Tunables that shape how the exporter behaves, independent of any
/// single transaction's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSettings {
    /// Bitwise-combined with the change summary's category bits to
    /// decide whether `Appender::set_want_fsync(true)` is called
    /// (§6.5). A mask of `0` disables fsync requests entirely.
    pub fsync_mask: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self { fsync_mask: 0 }
    }
}
