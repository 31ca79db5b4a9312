//! Single-file JSON ledger store.
//!
//! The whole ledger lives in one UTF-8 JSON document that is rewritten in
//! full on every save. There is no append path and no atomic rename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use saddlebook_students::Ledger;

use super::r#trait::{LedgerStore, StoreError, decode_ledger, encode_ledger};

#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileLedgerStore {
    fn load(&self) -> Result<Ledger, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "ledger file absent; starting empty");
                return Ok(Ledger::empty());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let ledger = decode_ledger(&bytes, &self.location());
        tracing::debug!(path = %self.path.display(), records = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let bytes = encode_ledger(ledger)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), records = ledger.len(), "ledger saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
