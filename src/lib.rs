#![doc(test(attr(deny(warnings))))]

//! spendwise turns a ledger snapshot into spend summaries, category and account
//! breakdowns, monthly trends and budget alerts, and ships a small CLI to read them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;

pub use spendwise_core as engine;
pub use spendwise_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("spendwise tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
