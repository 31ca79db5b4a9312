use serde::Deserialize;

use saddlebook_students::{CashSummary, RegisterStudent};

// -------------------------
// Request DTOs
// -------------------------

/// Registration body, keyed the way the mobile client sends it.
///
/// Every field is optional at this layer; required-field checks happen in the
/// domain so the error can name the missing key.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterStudentRequest {
    pub ad_soyad: Option<String>,
    pub veli_telefon: Option<String>,
    pub sinif: Option<String>,
    pub at_bilgisi: Option<String>,
    pub ucret_turu: Option<String>,
    /// Number or numeric string.
    pub odenen_tutar: Option<serde_json::Value>,
    pub ogretmen: Option<String>,
    pub tarih: Option<String>,
    pub saat: Option<String>,
}

impl From<RegisterStudentRequest> for RegisterStudent {
    fn from(body: RegisterStudentRequest) -> Self {
        RegisterStudent {
            full_name: body.ad_soyad,
            guardian_phone: body.veli_telefon,
            grade: body.sinif,
            horse_info: body.at_bilgisi,
            fee_type: body.ucret_turu,
            paid_amount: body.odenen_tutar,
            teacher: body.ogretmen,
            lesson_date: body.tarih,
            lesson_time: body.saat,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Cashier totals. `total_amount` repeats `grand_total` for older clients.
pub fn cash_summary_to_json(summary: CashSummary) -> serde_json::Value {
    let summary = summary.rounded();
    serde_json::json!({
        "message": "cash totals",
        "total_amount": summary.grand_total,
        "paid_total": summary.paid_total,
        "pending_total": summary.pending_total,
        "grand_total": summary.grand_total,
        "record_count": summary.record_count,
    })
}
