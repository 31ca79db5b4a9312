//! Money amounts.
//!
//! Amounts are non-negative decimals in whole cents. They are kept as
//! `rust_decimal::Decimal` in memory (exact sums) and written to JSON as plain
//! numbers so stored files stay readable by clients that expect
//! `"odenen_tutar": 12.5`.
//!
//! Input is rounded to cents and capped at [`Amount::MAX`]. Within that range
//! every amount has at most 15 significant digits, so the JSON number written
//! to disk reads back as the same amount.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// 9 999 999 999 999.99
    pub const MAX: Amount = Amount(Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, 2));

    /// Decimal places kept on every amount.
    pub const SCALE: u32 = 2;

    /// Wrap a decimal, rejecting negative or oversized values and rounding
    /// half away from zero to cents.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        let cents = value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        if cents.is_sign_negative() && !cents.is_zero() {
            return Err(DomainError::validation(format!("amount cannot be negative: {value}")));
        }
        if cents > Self::MAX.0 {
            return Err(DomainError::validation(format!(
                "amount exceeds {}: {value}",
                Self::MAX
            )));
        }
        Ok(Self(cents.abs().normalize()))
    }

    /// Parse decimal text such as `"12.50"`, `" 40 "` or `"1e3"`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DomainError::validation("amount is empty"));
        }
        let value = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| DomainError::validation(format!("not a valid amount: {raw:?}")))?;
        Self::new(value)
    }

    /// Accepts either a JSON number or a numeric string.
    pub fn from_json(value: &JsonValue) -> DomainResult<Self> {
        match value {
            JsonValue::Number(n) => Self::parse(&n.to_string()),
            JsonValue::String(s) => Self::parse(s),
            other => Err(DomainError::validation(format!("not a valid amount: {other}"))),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// Round half away from zero to `dp` decimal places.
    pub fn rounded(self, dp: u32) -> Amount {
        Amount(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        )
    }

    /// Nearest `f64`, via the decimal text so the conversion is correctly
    /// rounded.
    pub fn to_f64(self) -> f64 {
        self.0.to_string().parse().unwrap_or(0.0)
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::saturating_add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Amount::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Deserializer for stored amounts that must never fail the surrounding
/// document: missing, null or non-numeric values become `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| Amount::from_json(&v).ok()))
}
