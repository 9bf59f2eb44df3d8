//! spendwise-domain
//!
//! Pure ledger models (Account, Category, Transaction, Budget) plus the derived
//! period and report value types. No I/O, no aggregation logic.

pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod money;
pub mod period;
pub mod report;
pub mod snapshot;
pub mod transaction;

pub use account::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use period::*;
pub use report::*;
pub use snapshot::*;
pub use transaction::*;
