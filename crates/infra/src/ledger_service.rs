//! Ledger operation pipeline (application-level orchestration).
//!
//! Every operation follows the same steps:
//!
//! ```text
//! 1. Load the ledger from the store
//!   ↓
//! 2. Credit-expiry sweep (persist immediately if anything lapsed)
//!   ↓
//! 3. Apply the operation (pure domain logic)
//!   ↓
//! 4. Save the whole ledger (mutating operations only, and only on success)
//! ```
//!
//! Nothing is cached between operations; each one sees the latest stored
//! state.
//!
//! Within one process the whole pipeline runs under a single mutex, so two
//! concurrent requests cannot interleave their load and save. Separate
//! processes sharing one store file are not coordinated and the last writer
//! wins.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use saddlebook_core::{Clock, DomainError, RecordIndex};
use saddlebook_students::{CashSummary, Ledger, RegisterStudent, StudentRecord};

use crate::ledger_store::{LedgerStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct LedgerService<S, C> {
    store: S,
    clock: C,
    critical: Mutex<()>,
}

impl<S, C> LedgerService<S, C>
where
    S: LedgerStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            critical: Mutex::new(()),
        }
    }

    fn enter(&self) -> MutexGuard<'_, ()> {
        self.critical
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load and apply the credit-expiry sweep.
    fn load_swept(&self) -> Result<Ledger, ServiceError> {
        let mut ledger = self.store.load()?;
        let expired = ledger.expire_credits(self.clock.now());
        if expired > 0 {
            tracing::info!(expired, "lesson credits lapsed; persisting sweep");
            self.store.save(&ledger)?;
        }
        Ok(ledger)
    }

    /// Run a mutating operation and persist the ledger if it succeeded.
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Ledger) -> Result<T, DomainError>,
    ) -> Result<T, ServiceError> {
        let _guard = self.enter();
        let mut ledger = self.load_swept()?;
        let out = op(&mut ledger)?;
        self.store.save(&ledger)?;
        Ok(out)
    }

    fn read<T>(&self, op: impl FnOnce(&Ledger) -> Result<T, DomainError>) -> Result<T, ServiceError> {
        let _guard = self.enter();
        let ledger = self.load_swept()?;
        Ok(op(&ledger)?)
    }

    pub fn list(&self) -> Result<Vec<StudentRecord>, ServiceError> {
        let _guard = self.enter();
        Ok(self.load_swept()?.into_records())
    }

    pub fn register(&self, cmd: RegisterStudent) -> Result<StudentRecord, ServiceError> {
        let now = self.clock.now();
        let record = self.mutate(|ledger| ledger.register(cmd, now).cloned())?;
        tracing::info!(
            student = record.full_name(),
            schedule = record.lesson_schedule(),
            "student registered"
        );
        Ok(record)
    }

    pub fn get(&self, index: RecordIndex) -> Result<StudentRecord, ServiceError> {
        self.read(|ledger| ledger.get(index).cloned())
    }

    pub fn delete(&self, index: RecordIndex) -> Result<StudentRecord, ServiceError> {
        let removed = self.mutate(|ledger| ledger.remove(index))?;
        tracing::info!(%index, student = removed.full_name(), "student record deleted");
        Ok(removed)
    }

    /// Use one lesson credit; returns the remaining count.
    ///
    /// When no credits are left nothing is written.
    pub fn decrease_credit(&self, index: RecordIndex) -> Result<u32, ServiceError> {
        let remaining = self.mutate(|ledger| ledger.decrease_credit(index))?;
        tracing::info!(%index, remaining, "lesson credit used");
        Ok(remaining)
    }

    pub fn mark_paid(&self, index: RecordIndex) -> Result<StudentRecord, ServiceError> {
        let record = self.mutate(|ledger| ledger.mark_paid(index).cloned())?;
        tracing::info!(%index, student = record.full_name(), "payment recorded");
        Ok(record)
    }

    pub fn cash_summary(&self) -> Result<CashSummary, ServiceError> {
        self.read(|ledger| Ok(ledger.cash_summary()))
    }
}
