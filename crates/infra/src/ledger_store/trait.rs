use std::sync::Arc;

use thiserror::Error;

use serde_json::Value as JsonValue;

use saddlebook_students::{Ledger, StudentRecord};

/// Storage-level failure.
///
/// A store whose contents cannot be decoded is *not* an error: it loads as an
/// empty ledger (see [`decode_ledger`]).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Holds one ledger, read and written as a whole.
pub trait LedgerStore: Send + Sync {
    /// Read the current ledger.
    ///
    /// Missing or empty storage yields an empty ledger.
    fn load(&self) -> Result<Ledger, StoreError>;

    /// Overwrite storage with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;

    /// Human-readable location, used in log events.
    fn location(&self) -> String;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn load(&self) -> Result<Ledger, StoreError> {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        (**self).save(ledger)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Stored document format: pretty-printed JSON array of records.
pub fn encode_ledger(ledger: &Ledger) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(ledger)?)
}

/// Decode a stored document.
///
/// Empty content is an empty ledger. Content that is not a JSON array is
/// also treated as an empty ledger, but reported with a warning so
/// corruption is visible in the logs.
///
/// Records are decoded one by one and field values never fail a record, so
/// one odd entry cannot drop the rest of the file. Array elements that are not
/// objects are skipped with a warning.
pub fn decode_ledger(bytes: &[u8], location: &str) -> Ledger {
    if bytes.is_empty() {
        return Ledger::empty();
    }
    let entries = match serde_json::from_slice::<Vec<JsonValue>>(bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                location,
                error = %e,
                "ledger store is corrupt or unreadable; continuing with an empty ledger"
            );
            return Ledger::empty();
        }
    };

    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            if !entry.is_object() {
                tracing::warn!(location, position, "skipping stored entry that is not a record");
                return None;
            }
            match serde_json::from_value::<StudentRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(location, position, error = %e, "skipping undecodable record");
                    None
                }
            }
        })
        .collect();
    Ledger::from_records(records)
}
