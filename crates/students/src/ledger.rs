//! The ledger: every enrollment, in registration order.
//!
//! Records are addressed by position ([`RecordIndex`]). Removing a record
//! shifts every later record one position to the left.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saddlebook_core::{DomainResult, RecordIndex};

use crate::record::{RegisterStudent, StudentRecord};
use crate::summary::CashSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<StudentRecord>,
}

impl Ledger {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate and append a new enrollment.
    pub fn register(&mut self, cmd: RegisterStudent, now: DateTime<Utc>) -> DomainResult<&StudentRecord> {
        let record = StudentRecord::register(cmd, now)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn get(&self, index: RecordIndex) -> DomainResult<&StudentRecord> {
        self.records.get(index.position()).ok_or_else(|| index.not_found())
    }

    fn get_mut(&mut self, index: RecordIndex) -> DomainResult<&mut StudentRecord> {
        self.records
            .get_mut(index.position())
            .ok_or_else(|| index.not_found())
    }

    pub fn remove(&mut self, index: RecordIndex) -> DomainResult<StudentRecord> {
        if index.position() >= self.records.len() {
            return Err(index.not_found());
        }
        Ok(self.records.remove(index.position()))
    }

    /// Use one credit of the record at `index`; returns the remaining count.
    pub fn decrease_credit(&mut self, index: RecordIndex) -> DomainResult<u32> {
        self.get_mut(index)?.use_credit()
    }

    pub fn mark_paid(&mut self, index: RecordIndex) -> DomainResult<&StudentRecord> {
        let record = self.get_mut(index)?;
        record.mark_paid();
        Ok(record)
    }

    /// Zero the credits of every record past its validity window.
    ///
    /// Returns how many records changed; zero means nothing needs persisting.
    pub fn expire_credits(&mut self, now: DateTime<Utc>) -> usize {
        self.records
            .iter_mut()
            .map(|r| r.expire_credits(now))
            .filter(|changed| *changed)
            .count()
    }

    pub fn cash_summary(&self) -> CashSummary {
        CashSummary::from_records(&self.records)
    }
}
