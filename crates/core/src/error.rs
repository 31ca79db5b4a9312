//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookups, guarded transitions). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists at the requested position.
    #[error("not found: {0}")]
    NotFound(String),

    /// A guarded state transition was refused (e.g. no credits left to use).
    #[error("{0}")]
    Guard(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn guard(msg: impl Into<String>) -> Self {
        Self::Guard(msg.into())
    }

    /// Missing required input field, named by its request key.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("missing field: {field}"))
    }
}
