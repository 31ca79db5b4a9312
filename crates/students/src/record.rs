use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use saddlebook_core::amount::deserialize_lenient;
use saddlebook_core::{Amount, DomainError, DomainResult};

/// Credits granted to every new enrollment.
pub const INITIAL_LESSON_CREDITS: u32 = 8;

/// Credits lapse this many days after registration.
pub const CREDIT_VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

/// One riding-lesson enrollment.
///
/// Serialized field names match the keys the mobile client sends and the
/// keys found in existing store files. Decoding a stored record never fails
/// on a field value: files written by the first release hold whatever JSON
/// the client sent, so every field falls back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "ad_soyad", default, deserialize_with = "stored::text")]
    full_name: String,
    #[serde(rename = "veli_telefon", default, deserialize_with = "stored::text")]
    guardian_phone: String,
    #[serde(rename = "sinif", default, deserialize_with = "stored::text")]
    grade: String,
    #[serde(rename = "at_bilgisi", default, deserialize_with = "stored::text")]
    horse_info: String,
    #[serde(rename = "ucret_turu", default, deserialize_with = "stored::text")]
    fee_type: String,
    /// `None` when the stored value is missing or not numeric.
    #[serde(
        rename = "odenen_tutar",
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    paid_amount: Option<Amount>,
    #[serde(rename = "ogretmen", default, deserialize_with = "stored::text")]
    teacher: String,
    #[serde(rename = "tarih", default, deserialize_with = "stored::text")]
    lesson_date: String,
    #[serde(rename = "saat", default, deserialize_with = "stored::text")]
    lesson_time: String,
    #[serde(
        rename = "kayit_zamani",
        default = "stored::unknown_time",
        deserialize_with = "stored::registered_at"
    )]
    registered_at: DateTime<Utc>,
    #[serde(rename = "odeme_durumu", default, deserialize_with = "stored::payment_status")]
    payment_status: PaymentStatus,
    #[serde(
        rename = "ders_hakki",
        default = "initial_credits",
        deserialize_with = "stored::credits"
    )]
    lesson_credits: u32,
    #[serde(rename = "ders_programi", default, deserialize_with = "stored::text")]
    lesson_schedule: String,
}

fn initial_credits() -> u32 {
    INITIAL_LESSON_CREDITS
}

/// Command: RegisterStudent.
///
/// Raw registration input. Required fields are `Option` so that a missing
/// field can be reported by name instead of failing request decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterStudent {
    pub full_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub grade: Option<String>,
    pub horse_info: Option<String>,
    pub fee_type: Option<String>,
    /// JSON number or numeric string.
    pub paid_amount: Option<JsonValue>,
    pub teacher: Option<String>,
    pub lesson_date: Option<String>,
    pub lesson_time: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::missing_field(field))
}

impl StudentRecord {
    /// Validate a registration and build the new record.
    pub fn register(cmd: RegisterStudent, now: DateTime<Utc>) -> DomainResult<Self> {
        let full_name = required(cmd.full_name, "ad_soyad")?;
        let guardian_phone = required(cmd.guardian_phone, "veli_telefon")?;
        let raw_amount = required(cmd.paid_amount, "odenen_tutar")?;
        let lesson_date = required(cmd.lesson_date, "tarih")?;
        let lesson_time = required(cmd.lesson_time, "saat")?;

        let paid_amount = Amount::from_json(&raw_amount).map_err(|_| {
            DomainError::validation("odenen_tutar must be a valid non-negative number")
        })?;

        let lesson_schedule = format!("{lesson_date} {lesson_time}");

        Ok(Self {
            full_name,
            guardian_phone,
            grade: cmd.grade.unwrap_or_default(),
            horse_info: cmd.horse_info.unwrap_or_default(),
            fee_type: cmd.fee_type.unwrap_or_default(),
            paid_amount: Some(paid_amount),
            teacher: cmd.teacher.unwrap_or_default(),
            lesson_date,
            lesson_time,
            registered_at: now,
            payment_status: PaymentStatus::Unpaid,
            lesson_credits: INITIAL_LESSON_CREDITS,
            lesson_schedule,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn guardian_phone(&self) -> &str {
        &self.guardian_phone
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn horse_info(&self) -> &str {
        &self.horse_info
    }

    pub fn fee_type(&self) -> &str {
        &self.fee_type
    }

    pub fn paid_amount(&self) -> Option<Amount> {
        self.paid_amount
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    pub fn lesson_date(&self) -> &str {
        &self.lesson_date
    }

    pub fn lesson_time(&self) -> &str {
        &self.lesson_time
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn lesson_credits(&self) -> u32 {
        self.lesson_credits
    }

    pub fn lesson_schedule(&self) -> &str {
        &self.lesson_schedule
    }

    /// Amount counted by cash totals (unknown amounts count as zero).
    pub fn counted_amount(&self) -> Amount {
        self.paid_amount.unwrap_or(Amount::ZERO)
    }

    pub fn credits_lapsed(&self, now: DateTime<Utc>) -> bool {
        now - self.registered_at >= Duration::days(CREDIT_VALIDITY_DAYS)
    }

    /// Zero the credits once the validity window has passed.
    ///
    /// Returns `true` when the record changed.
    pub fn expire_credits(&mut self, now: DateTime<Utc>) -> bool {
        if self.lesson_credits > 0 && self.credits_lapsed(now) {
            self.lesson_credits = 0;
            return true;
        }
        false
    }

    /// Use one lesson credit, returning the remaining count.
    pub fn use_credit(&mut self) -> DomainResult<u32> {
        if self.lesson_credits == 0 {
            return Err(DomainError::guard("no lesson credits remaining"));
        }
        self.lesson_credits -= 1;
        Ok(self.lesson_credits)
    }

    /// Paid is terminal; marking twice is a no-op.
    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
    }
}

/// Field decoders for stored records.
mod stored {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value as JsonValue;

    use super::{INITIAL_LESSON_CREDITS, PaymentStatus};

    const NAIVE_DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

    /// Strings as-is, other scalars in their JSON text form, null as empty.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<JsonValue>::deserialize(deserializer)? {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s,
            Some(other) => other.to_string(),
        })
    }

    /// Registration time used when the stored one is missing or unreadable.
    ///
    /// The Unix epoch is far enough in the past that such a record's credits
    /// count as lapsed.
    pub fn unknown_time() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    /// Parse a stored registration time.
    ///
    /// RFC 3339, a naive timestamp, or a bare date (midnight) are read as
    /// UTC. Anything else becomes [`unknown_time`].
    pub fn parse_registered_at(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }

    pub fn registered_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Option::<JsonValue>::deserialize(deserializer)? {
            Some(JsonValue::String(raw)) => parse_registered_at(&raw),
            _ => None,
        };
        Ok(parsed.unwrap_or_else(unknown_time))
    }

    /// Only `"paid"` marks a record paid.
    pub fn payment_status<'de, D>(deserializer: D) -> Result<PaymentStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<JsonValue>::deserialize(deserializer)? {
            Some(JsonValue::String(s)) if s.trim().eq_ignore_ascii_case("paid") => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        })
    }

    /// Non-negative whole numbers (or numeric strings); anything else grants
    /// the initial credits.
    pub fn credits<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = match Option::<JsonValue>::deserialize(deserializer)? {
            Some(JsonValue::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
            Some(JsonValue::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(count
            .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
            .unwrap_or(INITIAL_LESSON_CREDITS))
    }
}
