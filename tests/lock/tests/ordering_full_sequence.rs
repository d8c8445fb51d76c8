//! Locks the full §4.1 canonical emission order in one transaction
//! that exercises every record family at once: attribute update,
//! append, flag update, extension record update, extension atomic
//! increment, keyword update, modseq update, (non-external) expunge,
//! and a post-header patch. Index delete/undelete markers and
//! extension resets/resizes are covered by their own dedicated
//! property tests (`p3_p4_*`, `p5_p8_*`) since they are mutually
//! exclusive with, or orthogonal to, the rest of this sequence.

use mailidx_harness::fixtures::{FixtureExtensionRegistry, FixtureIndexView, TransactionBuilder};
use mailidx_harness::runner::run_export_scenario;
use mailidx_kernel::ext::ExtensionRegistration;
use mailidx_kernel::{RecordType, SequenceSet, HEADER_SIZE};

#[test]
fn full_sequence_respects_canonical_order() {
    let registry = FixtureExtensionRegistry::new()
        .with_extension(
            0,
            ExtensionRegistration {
                name: "counters".to_string(),
                record_size: 4,
                header_size: 0,
                record_align: 4,
                reset_id: 0,
            },
        )
        .with_extension(
            1,
            ExtensionRegistration {
                name: "flags2".to_string(),
                record_size: 4,
                header_size: 0,
                record_align: 4,
                reset_id: 0,
            },
        );
    let view = FixtureIndexView::new()
        .with_registry(registry)
        .with_keywords(vec!["Seen".to_string()]);

    let mut post_change = [0u8; HEADER_SIZE];
    let mut post_mask = [0u8; HEADER_SIZE];
    post_change[5] = 9;
    post_mask[5] = 1;

    let mut txn = TransactionBuilder::new()
        .append(vec![1, 0, 0, 0])
        .flag_update(1, 1, 0x01, 0x00)
        .ext_rec_atomic(0, vec![2, 0, 0, 0])
        .ext_rec_update(1, vec![3, 0, 0, 0])
        .keyword_update(0, SequenceSet::single(1), SequenceSet::new())
        .modseq_update(1, 42)
        .expunge(1, [7; 16])
        .post_header(post_change, post_mask)
        .build();
    txn.attribute_updates = b"attr".to_vec();

    let result = run_export_scenario(txn, &view);
    let kinds: Vec<RecordType> = result.appender.frames().iter().map(|f| f.record_type).collect();

    // Two extension ids are referenced (0 via atomic inc, 1 via rec
    // update); each gets its own intro, ascending by ext_id, before
    // either extension's record-update family is emitted (§4.2, §4.8).
    let attr_idx = index_of(&kinds, RecordType::AttributeUpdate);
    let append_idx = index_of(&kinds, RecordType::Append);
    let flag_idx = index_of(&kinds, RecordType::FlagUpdate);
    let rec_update_idx = index_of(&kinds, RecordType::ExtRecUpdate);
    let atomic_idx = index_of(&kinds, RecordType::ExtAtomicInc);
    let keyword_idx = index_of(&kinds, RecordType::KeywordUpdate);
    let modseq_idx = index_of(&kinds, RecordType::ModseqUpdate);
    let expunge_idx = index_of(&kinds, RecordType::ExpungeGuid);
    let post_hdr_idx = index_of(&kinds, RecordType::HeaderUpdate);

    let intro_indices: Vec<usize> = kinds
        .iter()
        .enumerate()
        .filter(|(_, k)| **k == RecordType::ExtIntro)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(intro_indices.len(), 2, "one intro per referenced extension id");

    // §4.1 canonical order: intros, attribute updates, appends, flag
    // updates, ext rec updates then atomics, keywords, modseq,
    // expunges, post-header.
    assert!(intro_indices[0] < attr_idx, "intros precede attribute update");
    assert!(attr_idx < append_idx, "attribute update precedes appends");
    assert!(append_idx < flag_idx, "appends precede flag updates");
    assert!(flag_idx < rec_update_idx, "flag updates precede ext record updates");
    assert!(rec_update_idx < atomic_idx, "ext record updates precede atomic increments (§4.1 step 8)");
    assert!(atomic_idx < keyword_idx, "ext record family precedes keyword updates");
    assert!(keyword_idx < modseq_idx, "keyword updates precede modseq updates (kept \"almost last\")");
    assert!(modseq_idx < expunge_idx, "modseq updates precede expunges");
    assert!(expunge_idx < post_hdr_idx, "expunges precede the post-header update");
}

fn index_of(kinds: &[RecordType], target: RecordType) -> usize {
    kinds
        .iter()
        .position(|k| *k == target)
        .unwrap_or_else(|| panic!("expected a {target} record in the emitted sequence"))
}
