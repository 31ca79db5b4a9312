//! Durable ledger storage boundary.
//!
//! A store holds exactly one ledger and reads/writes it wholesale. It knows
//! nothing about credits or payments; maintenance such as the credit-expiry
//! sweep lives in [`crate::ledger_service`].

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryLedgerStore;
pub use json_file::JsonFileLedgerStore;
pub use r#trait::{LedgerStore, StoreError, decode_ledger};
