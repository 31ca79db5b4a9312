use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use saddlebook_students::Ledger;

use super::r#trait::{LedgerStore, StoreError, decode_ledger, encode_ledger};

/// In-memory ledger store.
///
/// Intended for tests/dev. Keeps the encoded document rather than the
/// decoded ledger so it behaves like the file store (including corruption
/// handling), and counts saves so tests can assert whether an operation
/// persisted.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    document: RwLock<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored bytes.
    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(Some(bytes.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Raw stored bytes, if anything was ever stored.
    pub fn document(&self) -> Option<Vec<u8>> {
        match self.document.read() {
            Ok(doc) => doc.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<Ledger, StoreError> {
        Ok(match self.document() {
            Some(bytes) => decode_ledger(&bytes, &self.location()),
            None => Ledger::empty(),
        })
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let bytes = encode_ledger(ledger)?;
        match self.document.write() {
            Ok(mut doc) => *doc = Some(bytes),
            Err(poisoned) => *poisoned.into_inner() = Some(bytes),
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
