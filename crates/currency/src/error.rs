use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use artha_core::{CurrencyCode, DomainError, ForexTransactionId};

/// Failures of the currency & rate subsystem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("currency '{0}' is not registered")]
    UnknownCurrency(CurrencyCode),

    #[error("currency '{0}' is already registered")]
    DuplicateCurrency(CurrencyCode),

    #[error("no base currency has been designated")]
    NoBaseCurrency,

    #[error("currency '{0}' is referenced by rates or transactions and cannot be structurally changed")]
    CurrencyInUse(CurrencyCode),

    #[error("exchange rate must be positive, got {0}")]
    InvalidRate(Decimal),

    /// No direct, inverse, or triangulated path exists for the pair.
    #[error("no exchange rate found for {from}->{to} as of {as_of}")]
    RateNotFound {
        from: CurrencyCode,
        to: CurrencyCode,
        as_of: NaiveDate,
    },

    #[error("forex transaction {0} not found")]
    TransactionNotFound(ForexTransactionId),

    #[error("forex transaction {0} is already settled")]
    AlreadySettled(ForexTransactionId),

    #[error("malformed rate feed: {0}")]
    MalformedFeed(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
