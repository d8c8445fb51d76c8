//! Locks Testable Properties 3 and 4 (§8):
//!
//! - P3 "Alignment": every emitted record's payload length is a
//!   multiple of 4.
//! - P4 "Mutual exclusion": a transaction with both `index_deleted`
//!   and `index_undeleted` set never completes export.

use mailidx_harness::fixtures::{FixtureExtensionRegistry, FixtureIndexView, TransactionBuilder};
use mailidx_harness::runner::run_export_scenario;
use mailidx_kernel::ext::ExtensionRegistration;
use mailidx_kernel::transaction::ExtHdrUpdate;
use mailidx_kernel::SequenceSet;

fn assert_all_payloads_aligned(transaction: mailidx_kernel::Transaction, view: &FixtureIndexView) {
    let result = run_export_scenario(transaction, view);
    for frame in result.appender.frames() {
        assert_eq!(
            frame.payload.len() % 4,
            0,
            "{:?} payload length {} is not 4-byte aligned",
            frame.record_type,
            frame.payload.len()
        );
    }
}

#[test]
fn append_payload_is_aligned() {
    assert_all_payloads_aligned(
        TransactionBuilder::new().append(vec![1, 2, 3, 4, 5, 6, 7, 8]).build(),
        &FixtureIndexView::new(),
    );
}

#[test]
fn flag_update_payload_is_aligned() {
    assert_all_payloads_aligned(
        TransactionBuilder::new()
            .flag_update(1, 1, 0, 0)
            .flag_update(2, 2, 0, 0)
            .build(),
        &FixtureIndexView::new(),
    );
}

#[test]
fn keyword_update_payload_with_odd_length_name_is_aligned() {
    let view = FixtureIndexView::new().with_keywords(vec!["Odd".to_string()]);
    assert_all_payloads_aligned(
        TransactionBuilder::new()
            .keyword_update(0, SequenceSet::single(1), SequenceSet::new())
            .build(),
        &view,
    );
}

#[test]
fn ext_header_patch_with_odd_run_length_is_aligned() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "ext".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let mut data = vec![0u8; 32];
    let mut mask = vec![0u8; 32];
    // A 3-byte run forces the encoder to pad.
    data[5..8].copy_from_slice(b"xyz");
    mask[5..8].fill(1);
    let txn = TransactionBuilder::new()
        .reset()
        .ext_hdr_update(
            0,
            ExtHdrUpdate {
                data,
                mask,
                alloc_size: 32,
            },
        )
        .build();
    assert_all_payloads_aligned(txn, &FixtureIndexView::new().with_registry(registry));
}

#[test]
fn ext_intro_name_of_odd_length_is_aligned() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "unused".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let mut data = vec![0u8; 16];
    let mut mask = vec![0u8; 16];
    data[0] = 1;
    mask[0] = 1;
    let txn = TransactionBuilder::new()
        .reset()
        .ext_resize(
            0,
            mailidx_kernel::transaction::ExtIntroWire {
                ext_id: 0,
                reset_id: 0,
                hdr_size: 0,
                record_size: 4,
                record_align: 4,
                flags: 0,
                name: "oddname".to_string(), // 7 bytes, not a multiple of 4
            },
        )
        .ext_hdr_update(
            0,
            ExtHdrUpdate {
                data,
                mask,
                alloc_size: 16,
            },
        )
        .build();
    assert_all_payloads_aligned(txn, &FixtureIndexView::new().with_registry(registry));
}

#[test]
#[should_panic(expected = "both deleted and undeleted")]
fn delete_and_undelete_together_aborts() {
    let txn = TransactionBuilder::new().deleted().undeleted().build();
    let view = FixtureIndexView::new();
    let _ = run_export_scenario(txn, &view);
}

#[test]
fn validate_rejects_delete_and_undelete_without_panicking() {
    let txn = TransactionBuilder::new().deleted().undeleted().build();
    let view = FixtureIndexView::new();
    let err = mailidx_export::validate(&txn, &view).unwrap_err();
    assert_eq!(err, mailidx_kernel::TransactionInvariantError::DeleteUndeleteConflict);
}
