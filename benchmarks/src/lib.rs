//! Shared helpers for the exporter benchmark suite.

use mailidx_harness::fixtures::{FixtureExtensionRegistry, FixtureIndexView, TransactionBuilder};
use mailidx_kernel::ext::ExtensionRegistration;
use mailidx_kernel::transaction::ExtHdrUpdate;
use mailidx_kernel::{SequenceSet, Transaction};

/// A transaction with `n` independent appends and a fixture view with
/// no registered extensions.
#[must_use]
pub fn append_heavy(n: usize) -> (Transaction, FixtureIndexView) {
    let mut builder = TransactionBuilder::new();
    for i in 0..n {
        #[allow(clippy::cast_possible_truncation)]
        builder = builder.append(vec![i as u8; 32]);
    }
    (builder.build(), FixtureIndexView::new())
}

/// A transaction with `n` non-overlapping flag-range updates.
#[must_use]
pub fn flag_update_heavy(n: u32) -> (Transaction, FixtureIndexView) {
    let mut builder = TransactionBuilder::new();
    for i in 0..n {
        let uid = i * 2 + 1;
        builder = builder.flag_update(uid, uid, 0x01, 0x00);
    }
    (builder.build(), FixtureIndexView::new())
}

/// A transaction touching `n` scattered bytes of a header of
/// `header_len` bytes, against a fixture view with one registered
/// extension owning that header.
#[must_use]
pub fn header_patch_heavy(header_len: usize, touched: usize) -> (Transaction, FixtureIndexView) {
    let mut data = vec![0u8; header_len];
    let mut mask = vec![0u8; header_len];
    let stride = (header_len / touched.max(1)).max(1);
    for (i, slot) in (0..header_len).step_by(stride).take(touched).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let byte = (i % 256) as u8;
        data[slot] = byte;
        mask[slot] = 1;
    }
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "bench-ext".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let txn = TransactionBuilder::new()
        .reset()
        .ext_hdr_update(
            0,
            ExtHdrUpdate {
                data,
                mask,
                alloc_size: header_len,
            },
        )
        .build();
    (txn, FixtureIndexView::new().with_registry(registry))
}

/// A transaction adding `n` messages to one keyword and removing them
/// from another, against a fixture view with two registered keywords.
#[must_use]
pub fn keyword_churn(n: u32) -> (Transaction, FixtureIndexView) {
    let add = SequenceSet::from_sorted_ranges(vec![(1, n.max(1))]).expect("ascending range");
    let remove = SequenceSet::single(n.max(1) + 1);
    let txn = TransactionBuilder::new().keyword_update(0, add, remove).build();
    let view = FixtureIndexView::new().with_keywords(vec!["Seen".to_string(), "Flagged".to_string()]);
    (txn, view)
}
