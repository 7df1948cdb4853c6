use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use artha_core::{CurrencyCode, ValueObject};

/// Provenance of an exchange-rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Manual,
    Feed,
}

/// One dated exchange-rate row.
///
/// `(from, to, rate_date)` is the unique key. Rows are never deleted, only
/// superseded by a newer-dated row; an upsert on the exact key corrects the
/// row in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
    pub rate_date: NaiveDate,
    pub source: RateSource,
}

impl ValueObject for ExchangeRate {}

/// A resolved rate: the value plus the effective date of the row(s) it came
/// from. Triangulated quotes carry the earlier of the two leg dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate: Decimal,
    pub rate_date: NaiveDate,
}

impl ValueObject for RateQuote {}

/// Result of a currency conversion: the rounded base-money amount and the
/// quote used to produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: Decimal,
    pub rate: Decimal,
    pub rate_date: NaiveDate,
}

impl ValueObject for Conversion {}

/// A batch of dated rates from an external feed (JSON document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateFeed {
    pub rates: Vec<RateFeedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateFeedRow {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
    pub date: NaiveDate,
}
