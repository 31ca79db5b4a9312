//! Student ledger domain module.
//!
//! This crate contains the business rules for riding-lesson enrollments
//! (registration defaults, lesson credits, payment state, cash totals),
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Callers pass the current time in explicitly.

pub mod ledger;
pub mod record;
pub mod summary;

pub use ledger::Ledger;
pub use record::{
    CREDIT_VALIDITY_DAYS, INITIAL_LESSON_CREDITS, PaymentStatus, RegisterStudent, StudentRecord,
};
pub use summary::CashSummary;
