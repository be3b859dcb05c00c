#![doc(test(attr(deny(warnings))))]

//! Accounting Core offers a double-entry ledger, tax and VAT calculations,
//! invoice management, and financial statement derivation over an injectable
//! key-value storage backend.
//!
//! All operations are synchronous and expect a single logical caller at a
//! time; there is no internal locking. Persistence is best-effort: mutations
//! apply in memory first and storage failures are logged, never surfaced as
//! operation failures.

pub mod config;
pub mod currency;
pub mod errors;
pub mod invoicing;
pub mod ledger;
pub mod reference;
pub mod statements;
pub mod storage;
pub mod tax;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("accounting_core=info"));
        fmt().with_env_filter(filter).init();
        tracing::info!("Accounting Core tracing initialized.");
    });
}
