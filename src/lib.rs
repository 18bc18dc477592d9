#![doc(test(attr(deny(warnings))))]

//! Fincal computes which transactions land on a calendar day and the running
//! balance as of that day, for one-time and recurring entries.

pub mod cli;
pub mod config;
pub mod entry;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "fincal tracing initialized");
    });
}
