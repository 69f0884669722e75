//! Chat statistics core: reply-graph resolution and engagement aggregation
//! for exported chat transcripts.
//!
//! A [`store::MessageStore`] is built once from the export. The indexer
//! resolves every message's reply reference in a single pass and feeds the
//! per-user [`indexer::ledger::Ledger`] and the question -> answers
//! [`indexer::qa::QaIndex`]. Query functions rank users and render exports
//! over the finished, read-only results. With the `python` feature the crate
//! also builds as a Python extension module (`chatstats_core`).

pub mod config;
pub mod errors;
pub mod indexer;
pub mod models;
pub mod query;
pub mod stats;
pub mod store;

#[cfg(feature = "python")]
mod python;

pub use config::{LinkMode, StatsConfig};
pub use errors::{StatsError, StatsResult};
pub use stats::ChatStatistics;
