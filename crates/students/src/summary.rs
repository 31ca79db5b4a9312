use serde::Serialize;

use saddlebook_core::Amount;

use crate::record::{PaymentStatus, StudentRecord};

/// Cash totals split by payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CashSummary {
    pub paid_total: Amount,
    pub pending_total: Amount,
    pub grand_total: Amount,
    /// All records, whatever their payment state.
    pub record_count: usize,
}

impl CashSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a StudentRecord>) -> Self {
        let mut paid_total = Amount::ZERO;
        let mut pending_total = Amount::ZERO;
        let mut record_count = 0;

        for record in records {
            record_count += 1;
            match record.payment_status() {
                PaymentStatus::Paid => paid_total = paid_total.saturating_add(record.counted_amount()),
                PaymentStatus::Unpaid => {
                    pending_total = pending_total.saturating_add(record.counted_amount())
                }
            }
        }

        Self {
            paid_total,
            pending_total,
            grand_total: paid_total.saturating_add(pending_total),
            record_count,
        }
    }

    /// Totals rounded to cents for display.
    pub fn rounded(self) -> Self {
        Self {
            paid_total: self.paid_total.rounded(2),
            pending_total: self.pending_total.rounded(2),
            grand_total: self.grand_total.rounded(2),
            record_count: self.record_count,
        }
    }
}
