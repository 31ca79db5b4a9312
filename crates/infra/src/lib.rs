//! Infrastructure layer: ledger storage, operation pipeline, config.

pub mod config;
pub mod ledger_service;
pub mod ledger_store;

pub use config::Settings;
pub use ledger_service::{LedgerService, ServiceError};
pub use ledger_store::{InMemoryLedgerStore, JsonFileLedgerStore, LedgerStore, StoreError};
