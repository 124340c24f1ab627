#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger keeps a single user's dated income and expense records in plain text files and
//! answers keyword, category and date-range searches plus period and per-category summaries.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
