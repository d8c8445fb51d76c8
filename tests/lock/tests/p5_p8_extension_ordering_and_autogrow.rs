//! Locks Testable Properties 5 and 8 (§8):
//!
//! - P5 "Intro precedes use": for every `EXT_REC_UPDATE`,
//!   `EXT_ATOMIC_INC`, `EXT_RESET`, or `EXT_HDR_UPDATE(32)` referencing
//!   extension `X`, an `EXT_INTRO` for `X` appears earlier in the
//!   byte stream.
//! - P8 "Header auto-grow": if an `ext_hdr_update`'s significant
//!   length exceeds the registry's `hdr_size`, the emitted intro
//!   carries the larger value.

use mailidx_harness::fixtures::{FixtureExtensionRegistry, FixtureIndexMap, FixtureIndexView, TransactionBuilder};
use mailidx_harness::runner::run_export_scenario;
use mailidx_kernel::ext::{ExtensionMapEntry, ExtensionRegistration};
use mailidx_kernel::transaction::ExtHdrUpdate;
use mailidx_kernel::RecordType;

fn first_index_of(frames: &[mailidx_harness::appender::Frame], record_type: RecordType) -> Option<usize> {
    frames.iter().position(|f| f.record_type == record_type)
}

#[test]
fn ext_rec_update_is_preceded_by_its_intro() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "flags2".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let txn = TransactionBuilder::new().ext_rec_update(0, vec![1, 2, 3, 4]).build();
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_idx = first_index_of(result.appender.frames(), RecordType::ExtIntro).expect("intro emitted");
    let rec_idx = first_index_of(result.appender.frames(), RecordType::ExtRecUpdate).expect("rec update emitted");
    assert!(intro_idx < rec_idx, "intro at {intro_idx} must precede rec update at {rec_idx}");
}

#[test]
fn ext_atomic_inc_is_preceded_by_its_intro() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "counters".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let txn = TransactionBuilder::new().ext_rec_atomic(0, vec![9, 9, 9, 9]).build();
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_idx = first_index_of(result.appender.frames(), RecordType::ExtIntro).expect("intro emitted");
    let inc_idx = first_index_of(result.appender.frames(), RecordType::ExtAtomicInc).expect("atomic inc emitted");
    assert!(intro_idx < inc_idx);
}

#[test]
fn ext_reset_is_preceded_by_its_intro() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "modseq".to_string(),
            record_size: 8,
            header_size: 4,
            record_align: 4,
            reset_id: 1,
        },
    );
    let txn = TransactionBuilder::new()
        .ext_reset(
            0,
            mailidx_kernel::transaction::ExtReset {
                new_reset_id: 5,
                preserve_old_records: false,
            },
        )
        .ext_reset_id(0, 5)
        .build();
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_idx = first_index_of(result.appender.frames(), RecordType::ExtIntro).expect("intro emitted");
    let reset_idx = first_index_of(result.appender.frames(), RecordType::ExtReset).expect("reset emitted");
    assert!(intro_idx < reset_idx);
}

#[test]
fn ext_hdr_update_is_preceded_by_its_intro() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "annotations".to_string(),
            record_size: 4,
            header_size: 0,
            record_align: 4,
            reset_id: 0,
        },
    );
    let mut data = vec![0u8; 32];
    let mut mask = vec![0u8; 32];
    data[4] = 7;
    mask[4] = 1;
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
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_idx = first_index_of(result.appender.frames(), RecordType::ExtIntro).expect("intro emitted");
    let hdr_idx = first_index_of(result.appender.frames(), RecordType::ExtHdrUpdate).expect("hdr update emitted");
    assert!(intro_idx < hdr_idx);
}

#[test]
fn header_auto_grow_promotes_hdr_size_past_registry_value() {
    // Registry advertises a 4-byte header, but the patch touches up to
    // (and including) byte 12 -- significant_len == 13.
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "grows".to_string(),
            record_size: 4,
            header_size: 4,
            record_align: 4,
            reset_id: 0,
        },
    );
    let mut data = vec![0u8; 64];
    let mut mask = vec![0u8; 64];
    data[10..13].copy_from_slice(b"abc");
    mask[10..13].fill(1);
    let txn = TransactionBuilder::new()
        .reset()
        .ext_hdr_update(
            0,
            ExtHdrUpdate {
                data,
                mask,
                alloc_size: 64,
            },
        )
        .build();
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_frame = result
        .appender
        .frames()
        .iter()
        .find(|f| f.record_type == RecordType::ExtIntro)
        .expect("intro emitted");
    // Ext intro layout: {ext_id:4, reset_id:4, hdr_size:4, ...}.
    let hdr_size = u32::from_le_bytes(intro_frame.payload[8..12].try_into().unwrap());
    assert_eq!(hdr_size, 13, "intro hdr_size must be promoted to the patch's significant length");
}

#[test]
fn ext_rec_update_under_transaction_reset_reintroduces_an_existing_slot() {
    // The extension already occupies map slot 0 with a smaller hdr_size
    // than the registry advertises, but a transaction-level reset
    // forces is_new regardless: the intro must use ALL_ONES and the
    // registry's (not the map's) hdr_size, exercised through the
    // EXT_REC_UPDATE path rather than the dedicated intro pass.
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "counters".to_string(),
            record_size: 4,
            header_size: 8,
            record_align: 4,
            reset_id: 0,
        },
    );
    let map = FixtureIndexMap::new(16).with_slot(
        0,
        0,
        ExtensionMapEntry {
            hdr_offset: 0,
            hdr_size: 3,
            reset_id: 7,
        },
    );
    let txn = TransactionBuilder::new().reset().ext_rec_update(0, vec![1, 2, 3, 4]).build();
    let view = FixtureIndexView::new().with_registry(registry).with_map(map);
    let result = run_export_scenario(txn, &view);

    let intro_frame = result
        .appender
        .frames()
        .iter()
        .find(|f| f.record_type == RecordType::ExtIntro)
        .expect("intro emitted");
    let wire_ext_id = u32::from_le_bytes(intro_frame.payload[0..4].try_into().unwrap());
    let hdr_size = u32::from_le_bytes(intro_frame.payload[8..12].try_into().unwrap());
    assert_eq!(wire_ext_id, mailidx_kernel::ALL_ONES, "reset forces is_new even with an existing map slot");
    assert_eq!(hdr_size, 8, "is_new must read hdr_size from the registry, not the stale map entry");
}

#[test]
fn ext_rec_atomic_against_an_existing_slot_reads_hdr_size_from_the_map() {
    // No reset this time: the extension is genuinely existing, so its
    // hdr_size must come from the map entry, not the registry, even
    // though the intro is only emitted via the EXT_ATOMIC_INC path.
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "counters".to_string(),
            record_size: 4,
            header_size: 8,
            record_align: 4,
            reset_id: 0,
        },
    );
    let map = FixtureIndexMap::new(16).with_slot(
        0,
        0,
        ExtensionMapEntry {
            hdr_offset: 0,
            hdr_size: 3,
            reset_id: 7,
        },
    );
    let txn = TransactionBuilder::new().ext_rec_atomic(0, vec![9, 9, 9, 9]).build();
    let view = FixtureIndexView::new().with_registry(registry).with_map(map);
    let result = run_export_scenario(txn, &view);

    let intro_frame = result
        .appender
        .frames()
        .iter()
        .find(|f| f.record_type == RecordType::ExtIntro)
        .expect("intro emitted");
    let wire_ext_id = u32::from_le_bytes(intro_frame.payload[0..4].try_into().unwrap());
    let hdr_size = u32::from_le_bytes(intro_frame.payload[8..12].try_into().unwrap());
    assert_eq!(wire_ext_id, 0, "existing extension keeps its map index on the wire");
    assert_eq!(hdr_size, 3, "existing extension must report the map's hdr_size, not the registry's");
}

#[test]
fn header_within_registry_size_does_not_shrink_it() {
    let registry = FixtureExtensionRegistry::new().with_extension(
        0,
        ExtensionRegistration {
            name: "stable".to_string(),
            record_size: 4,
            header_size: 64,
            record_align: 4,
            reset_id: 0,
        },
    );
    let mut data = vec![0u8; 64];
    let mut mask = vec![0u8; 64];
    data[1] = 1;
    mask[1] = 1;
    let txn = TransactionBuilder::new()
        .reset()
        .ext_hdr_update(
            0,
            ExtHdrUpdate {
                data,
                mask,
                alloc_size: 64,
            },
        )
        .build();
    let result = run_export_scenario(txn, &FixtureIndexView::new().with_registry(registry));

    let intro_frame = result
        .appender
        .frames()
        .iter()
        .find(|f| f.record_type == RecordType::ExtIntro)
        .expect("intro emitted");
    let hdr_size = u32::from_le_bytes(intro_frame.payload[8..12].try_into().unwrap());
    assert_eq!(hdr_size, 64, "registry hdr_size must survive when the patch is smaller");
}
