//! Fixture builders: concrete, in-memory backings for the kernel's
//! read-only trait contracts, plus a builder for constructing
//! transactions without hand-assembling every `BTreeMap`.

use std::collections::BTreeMap;

use mailidx_kernel::ext::{ExtensionMapEntry, ExtensionRegistration};
use mailidx_kernel::transaction::{
    ExpungeGuidEntry, ExtHdrUpdate, ExtIntroWire, ExtReset, FlagUpdate, KeywordUpdate,
    ModseqUpdateEntry, FLAG_EXTERNAL, FLAG_FSYNC,
};
use mailidx_kernel::{
    ExtensionRegistry, IndexMap, IndexSettings, IndexView, SequenceSet, Transaction, HEADER_SIZE,
};

/// An in-memory extension registry, keyed by extension id.
#[derive(Debug, Default, Clone)]
pub struct FixtureExtensionRegistry {
    entries: BTreeMap<u32, ExtensionRegistration>,
}

impl FixtureExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_extension(mut self, ext_id: u32, registration: ExtensionRegistration) -> Self {
        self.entries.insert(ext_id, registration);
        self
    }
}

impl ExtensionRegistry for FixtureExtensionRegistry {
    fn get(&self, ext_id: u32) -> Option<&ExtensionRegistration> {
        self.entries.get(&ext_id)
    }

    fn get_by_name(&self, name: &str) -> Option<(u32, &ExtensionRegistration)> {
        self.entries.iter().find(|(_, r)| r.name == name).map(|(&id, r)| (id, r))
    }

    fn iter_ordered(&self) -> Vec<(u32, &ExtensionRegistration)> {
        self.entries.iter().map(|(&id, r)| (id, r)).collect()
    }
}

/// An in-memory index map: extension placements plus the header
/// image's current allocated size.
#[derive(Debug, Default, Clone)]
pub struct FixtureIndexMap {
    ext_idx: BTreeMap<u32, u32>,
    entries: BTreeMap<u32, ExtensionMapEntry>,
    alloc_size: u32,
}

impl FixtureIndexMap {
    #[must_use]
    pub fn new(alloc_size: u32) -> Self {
        Self {
            alloc_size,
            ..Self::default()
        }
    }

    /// Record that `ext_id` occupies map slot `idx`, currently placed
    /// at `entry`.
    #[must_use]
    pub fn with_slot(mut self, ext_id: u32, idx: u32, entry: ExtensionMapEntry) -> Self {
        self.ext_idx.insert(ext_id, idx);
        self.entries.insert(idx, entry);
        self
    }
}

impl IndexMap for FixtureIndexMap {
    fn get_ext_idx(&self, ext_id: u32) -> Option<u32> {
        self.ext_idx.get(&ext_id).copied()
    }

    fn get_map_entry(&self, idx: u32) -> Option<&ExtensionMapEntry> {
        self.entries.get(&idx)
    }

    fn alloc_size(&self) -> u32 {
        self.alloc_size
    }
}

/// A complete fixture `IndexView`: registry, map, keyword table,
/// settings, and the main header image as it stood before export.
#[derive(Debug, Clone)]
pub struct FixtureIndexView {
    pub registry: FixtureExtensionRegistry,
    pub map: FixtureIndexMap,
    pub keywords: Vec<String>,
    pub settings: IndexSettings,
    pub header_image: Vec<u8>,
    pub message_count: u32,
    pub is_deleted: bool,
}

impl Default for FixtureIndexView {
    fn default() -> Self {
        Self {
            registry: FixtureExtensionRegistry::new(),
            map: FixtureIndexMap::new(0),
            keywords: Vec::new(),
            settings: IndexSettings::default(),
            header_image: vec![0; HEADER_SIZE],
            message_count: 0,
            is_deleted: false,
        }
    }
}

impl FixtureIndexView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_registry(mut self, registry: FixtureExtensionRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: FixtureIndexMap) -> Self {
        self.map = map;
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    #[must_use]
    pub fn with_fsync_mask(mut self, fsync_mask: u32) -> Self {
        self.settings.fsync_mask = fsync_mask;
        self
    }
}

impl IndexView for FixtureIndexView {
    fn registry(&self) -> &dyn ExtensionRegistry {
        &self.registry
    }

    fn map(&self) -> &dyn IndexMap {
        &self.map
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    fn header_image(&self) -> &[u8] {
        &self.header_image
    }

    fn message_count(&self) -> u32 {
        self.message_count
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// Builds a `Transaction` one sub-collection at a time, so fixtures
/// and tests don't hand-assemble `BTreeMap`s and fixed-size arrays.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    txn: Transaction,
}

impl TransactionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn append(mut self, payload: Vec<u8>) -> Self {
        self.txn.appends.push(payload);
        self
    }

    #[must_use]
    pub fn flag_update(mut self, uid1: u32, uid2: u32, add_flags: u32, remove_flags: u32) -> Self {
        self.txn.updates.push(FlagUpdate {
            uid1,
            uid2,
            add_flags,
            remove_flags,
        });
        self
    }

    #[must_use]
    pub fn expunge(mut self, uid: u32, guid: [u8; 16]) -> Self {
        self.txn.expunges.push(ExpungeGuidEntry { uid, guid });
        self
    }

    #[must_use]
    pub fn modseq_update(mut self, uid: u32, modseq: u64) -> Self {
        self.txn.modseq_updates.push(ModseqUpdateEntry { uid, modseq });
        self
    }

    #[must_use]
    pub fn keyword_update(mut self, keyword_idx: u32, add_seq: SequenceSet, remove_seq: SequenceSet) -> Self {
        self.txn.keyword_updates.insert(keyword_idx, KeywordUpdate { add_seq, remove_seq });
        self
    }

    #[must_use]
    pub fn ext_resize(mut self, ext_id: u32, intro: ExtIntroWire) -> Self {
        self.txn.ext_resizes.insert(ext_id, intro);
        self
    }

    #[must_use]
    pub fn ext_reset(mut self, ext_id: u32, reset: ExtReset) -> Self {
        self.txn.ext_resets.insert(ext_id, reset);
        self
    }

    #[must_use]
    pub fn ext_reset_id(mut self, ext_id: u32, reset_id: u32) -> Self {
        self.txn.ext_reset_ids.insert(ext_id, reset_id);
        self
    }

    #[must_use]
    pub fn ext_rec_update(mut self, ext_id: u32, payload: Vec<u8>) -> Self {
        self.txn.ext_rec_updates.insert(ext_id, payload);
        self
    }

    #[must_use]
    pub fn ext_rec_atomic(mut self, ext_id: u32, payload: Vec<u8>) -> Self {
        self.txn.ext_rec_atomics.insert(ext_id, payload);
        self
    }

    #[must_use]
    pub fn ext_hdr_update(mut self, ext_id: u32, update: ExtHdrUpdate) -> Self {
        self.txn.ext_hdr_updates.insert(ext_id, update);
        self
    }

    #[must_use]
    pub fn pre_header(mut self, change: [u8; HEADER_SIZE], mask: [u8; HEADER_SIZE]) -> Self {
        self.txn.pre_hdr_change = change;
        self.txn.pre_hdr_mask = mask;
        self.txn.pre_hdr_changed = true;
        self
    }

    #[must_use]
    pub fn post_header(mut self, change: [u8; HEADER_SIZE], mask: [u8; HEADER_SIZE]) -> Self {
        self.txn.post_hdr_change = change;
        self.txn.post_hdr_mask = mask;
        self.txn.post_hdr_changed = true;
        self
    }

    #[must_use]
    pub fn deleted(mut self) -> Self {
        self.txn.index_deleted = true;
        self
    }

    #[must_use]
    pub fn undeleted(mut self) -> Self {
        self.txn.index_undeleted = true;
        self
    }

    #[must_use]
    pub fn external(mut self) -> Self {
        self.txn.flags |= FLAG_EXTERNAL;
        self
    }

    #[must_use]
    pub fn explicit_fsync(mut self) -> Self {
        self.txn.flags |= FLAG_FSYNC;
        self
    }

    #[must_use]
    pub fn reset(mut self) -> Self {
        self.txn.reset = true;
        self
    }

    #[must_use]
    pub fn build(self) -> Transaction {
        self.txn
    }
}
