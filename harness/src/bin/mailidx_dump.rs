//! CLI that runs one of the built-in export scenarios and prints its
//! resulting records as JSON.
//!
//! Usage: `mailidx_dump <scenario> [--out <path>]`
//!
//! Scenarios: `lone-append`, `flag-delta`, `new-extension-header-patch`,
//! `large-header-patch`, `keyword-add-remove`, `non-external-expunge`.

use mailidx_harness::error::HarnessError;
use mailidx_harness::fixtures::{FixtureExtensionRegistry, FixtureIndexView, TransactionBuilder};
use mailidx_harness::runner::run_export_scenario;
use mailidx_kernel::ext::ExtensionRegistration;
use mailidx_kernel::transaction::ExtHdrUpdate;
use mailidx_kernel::SequenceSet;
use serde_json::json;

fn main() -> Result<(), HarnessError> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let scenario = args.next().unwrap_or_else(|| {
        eprintln!("usage: mailidx_dump <scenario> [--out <path>]");
        std::process::exit(2);
    });

    let mut out_path: Option<String> = None;
    let mut flags = args;
    while let Some(flag) = flags.next() {
        if flag == "--out" {
            out_path = flags.next();
        }
    }

    let (transaction, view) = match scenario.as_str() {
        "lone-append" => (TransactionBuilder::new().append(vec![10, 0, 0, 0]).build(), FixtureIndexView::new()),
        "flag-delta" => (
            TransactionBuilder::new().flag_update(5, 7, 0x301, 0x02).build(),
            FixtureIndexView::new(),
        ),
        "new-extension-header-patch" => {
            let mut data = vec![0u8; 64];
            let mut mask = vec![0u8; 64];
            data[10..13].copy_from_slice(b"abc");
            mask[10..13].fill(1);
            let registry = FixtureExtensionRegistry::new().with_extension(
                0,
                ExtensionRegistration {
                    name: "modseq".to_string(),
                    record_size: 8,
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
                        alloc_size: 64,
                    },
                )
                .build();
            (txn, FixtureIndexView::new().with_registry(registry))
        }
        "large-header-patch" => {
            let mut data = vec![0u8; 131072];
            let mut mask = vec![0u8; 131072];
            data[70000..70004].copy_from_slice(b"wxyz");
            mask[70000..70004].fill(1);
            let registry = FixtureExtensionRegistry::new().with_extension(
                0,
                ExtensionRegistration {
                    name: "bigext".to_string(),
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
                        alloc_size: 131072,
                    },
                )
                .build();
            (txn, FixtureIndexView::new().with_registry(registry))
        }
        "keyword-add-remove" => {
            let txn = TransactionBuilder::new()
                .keyword_update(
                    2,
                    SequenceSet::from_sorted_ranges(vec![(1, 3)]).unwrap(),
                    SequenceSet::single(5),
                )
                .build();
            let view = FixtureIndexView::new().with_keywords(vec![
                "Answered".to_string(),
                "Flagged".to_string(),
                "Seen".to_string(),
            ]);
            (txn, view)
        }
        "non-external-expunge" => (
            TransactionBuilder::new().expunge(1, [7; 16]).build(),
            FixtureIndexView::new(),
        ),
        other => {
            eprintln!("unknown scenario: {other}");
            std::process::exit(2);
        }
    };

    let result = run_export_scenario(transaction, &view);

    let frames: Vec<_> = result
        .appender
        .frames()
        .iter()
        .map(|frame| {
            json!({
                "type": frame.record_type.to_string(),
                "tag": frame.record_type.tag(),
                "payload_hex": hex_encode(&frame.payload),
                "payload_len": frame.payload.len(),
            })
        })
        .collect();

    let report = json!({
        "scenario": scenario,
        "change_summary": result.change_summary,
        "fsync_requested": result.appender.want_fsync(),
        "output_len": result.appender.output_len(),
        "frames": frames,
    });

    let rendered = render_report(&report)?;

    match out_path {
        Some(path) => write_report(&path, &rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_report(report: &serde_json::Value) -> Result<String, HarnessError> {
    serde_json::to_string_pretty(report).map_err(|e| HarnessError::SerializationFailed { detail: e.to_string() })
}

fn write_report(path: &str, rendered: &str) -> Result<(), HarnessError> {
    std::fs::write(path, rendered).map_err(|e| HarnessError::WriteFailed {
        detail: format!("{path}: {e}"),
    })
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{b:02x}"));
    }
    s
}
