//! spendwise-core
//!
//! Budget-vs-spend aggregation engine for spendwise.
//! Depends on spendwise-domain. No CLI, no terminal I/O, no storage access.

pub mod budget_evaluator;
pub mod cache;
pub mod error;
pub mod period_resolver;
pub mod report_assembler;
pub mod snapshot_index;
pub mod spend_aggregator;
pub mod time;

pub use budget_evaluator::*;
pub use cache::*;
pub use error::CoreError;
pub use period_resolver::*;
pub use report_assembler::*;
pub use snapshot_index::*;
pub use spend_aggregator::*;
pub use time::{Clock, FixedClock};

#[cfg(test)]
mod tests;
