//! Money primitives: currency codes and decimal rounding.
//!
//! All monetary amounts and exchange rates in the ledger are `rust_decimal`
//! values. Binary floating point never represents money.

use core::str::FromStr;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Decimal places used for base-currency money amounts.
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount half-up (midpoint away from zero) to [`MONEY_DP`]
/// places. Cross-currency conversion results are always rounded through
/// here; rates themselves are never rounded.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO-4217-like currency code ("INR", "USD", ...).
///
/// Uppercased on construction; compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();
        if code.len() < 2 || code.len() > 6 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "currency code must be 2-6 ASCII letters, got '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CurrencyCode {}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up_at_two_places() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(-10.005)), dec!(-10.01));
        assert_eq!(round_money(dec!(50000)), dec!(50000.00));
    }

    #[test]
    fn currency_code_is_uppercased() {
        let code = CurrencyCode::new("inr").unwrap();
        assert_eq!(code.as_str(), "INR");
    }

    #[test]
    fn currency_code_rejects_junk() {
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("US-1").is_err());
        assert!(CurrencyCode::new("TOOLONGCODE").is_err());
    }
}
