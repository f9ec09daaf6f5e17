//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::JsonBookStore;
use crate::application::LedgerService;
use crate::infrastructure::config::settings::Config;

/// Build the ledger service over the configured JSON book.
#[must_use]
pub fn build_ledger_service(config: &Config) -> LedgerService<JsonBookStore> {
    let store = JsonBookStore::open(&config.book);
    let gate = config.gate.gate();
    info!(
        book = %config.book.display(),
        min_active_days = gate.min_active_days(),
        "Ledger service ready"
    );
    LedgerService::new(Arc::new(store), gate)
}
