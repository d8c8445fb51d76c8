//! Locks the exported wire bytes through an on-disk scratch file: a
//! transaction's binary record stream must survive a write-then-read
//! round trip byte-for-byte, the same scratch-file shape the CLI's
//! `--out` flag relies on.

use mailidx_harness::appender::InMemoryAppender;
use mailidx_harness::fixtures::{FixtureIndexView, TransactionBuilder};

#[test]
fn exported_bytes_round_trip_through_a_scratch_file() {
    let mut txn = TransactionBuilder::new().append(vec![1, 0, 0, 0]).build();
    let view = FixtureIndexView::new();
    let mut appender = InMemoryAppender::new();
    mailidx_export::export(&mut txn, &view, &mut appender);
    let exported = appender.bytes();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export_report.bin");
    std::fs::write(&path, exported).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, exported);
}
