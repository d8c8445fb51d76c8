//! Scenario runner: drives `mailidx_export::driver::export` against a
//! fixture view and an `InMemoryAppender`, and hands back everything a
//! test or benchmark would want to assert on.

use mailidx_kernel::change::ChangeSummary;
use mailidx_kernel::Transaction;

use crate::appender::InMemoryAppender;
use crate::fixtures::FixtureIndexView;

/// Everything observable after running one transaction through the
/// exporter.
#[derive(Debug)]
pub struct ScenarioResult {
    pub appender: InMemoryAppender,
    pub change_summary: ChangeSummary,
}

/// Export `transaction` against `view`, with a fresh `InMemoryAppender`.
#[must_use]
pub fn run_export_scenario(mut transaction: Transaction, view: &FixtureIndexView) -> ScenarioResult {
    let mut appender = InMemoryAppender::new();
    let change_summary = mailidx_export::export(&mut transaction, view, &mut appender);
    ScenarioResult {
        appender,
        change_summary,
    }
}
