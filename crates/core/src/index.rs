//! Positional record handle.
//!
//! Records have no stable identifier; a record is addressed by its 0-based
//! position in the ledger at the time of the request. Positions shift when an
//! earlier record is deleted, so callers must re-list after a deletion.
//!
//! Keeping the position behind this newtype means a stable-ID scheme can
//! replace it later without touching handler signatures.

use core::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordIndex(usize);

impl RecordIndex {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn position(&self) -> usize {
        self.0
    }

    /// Error returned when this position does not hold a record.
    pub fn not_found(&self) -> DomainError {
        DomainError::not_found(format!("no student record at index {}", self.0))
    }
}

impl core::fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<usize> for RecordIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Parses a path segment.
///
/// Anything that is not a non-negative integer (negative numbers included)
/// can never address a record, so it is reported as `NotFound` rather than as
/// a validation failure.
impl FromStr for RecordIndex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(Self)
            .map_err(|_| DomainError::not_found(format!("no student record at index {s}")))
    }
}
