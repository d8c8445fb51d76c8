//! Mail index harness: fixture builders, an in-memory appender, and a
//! scenario runner for exercising `mailidx_export` without a real
//! mail index behind it.
//!
//! The harness does NOT implement export logic — it delegates to
//! `mailidx_export::driver::export`. Fixtures provide domain data only;
//! the harness owns wiring them together and observing the result.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod appender;
pub mod error;
pub mod fixtures;
pub mod runner;

pub use appender::InMemoryAppender;
pub use error::HarnessError;
pub use fixtures::{FixtureIndexView, TransactionBuilder};
pub use runner::{run_export_scenario, ScenarioResult};
