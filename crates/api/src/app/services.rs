use std::sync::Arc;

use axum::response::Response;

use saddlebook_core::{Clock, SystemClock};
use saddlebook_infra::{JsonFileLedgerStore, LedgerService, LedgerStore, ServiceError, Settings};

use crate::app::errors;

/// The ledger service as shared with handlers.
///
/// Store and clock are type-erased so tests can swap in a temp-file or
/// in-memory store and a fixed clock behind the same router.
pub type AppServices = LedgerService<Arc<dyn LedgerStore>, Arc<dyn Clock>>;

/// Production wiring: JSON file store at the configured path, system clock.
pub fn build_services(settings: &Settings) -> AppServices {
    let store: Arc<dyn LedgerStore> = Arc::new(JsonFileLedgerStore::new(&settings.data_file));
    tracing::info!(location = %store.location(), "ledger store configured");
    with_parts(store, Arc::new(SystemClock))
}

pub fn with_parts(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> AppServices {
    LedgerService::new(store, clock)
}

/// Run a ledger operation on tokio's blocking pool.
///
/// Every operation reads and writes the store file under a std mutex, so it
/// must stay off the async workers. Failures come back as ready responses.
pub async fn run<T, F>(services: &Arc<AppServices>, op: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&AppServices) -> Result<T, ServiceError> + Send + 'static,
{
    let services = Arc::clone(services);
    match tokio::task::spawn_blocking(move || op(&services)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(errors::service_error_to_response(e)),
        Err(e) => Err(errors::task_failure_to_response(e)),
    }
}
