use chrono::NaiveDate;
use thiserror::Error;

use artha_core::{DomainError, FinancialYearId, PeriodId};

/// Failures of the period-lifecycle subsystem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("financial year starting {start} overlaps existing year '{existing}'")]
    OverlappingYear { start: NaiveDate, existing: String },

    #[error("already closed")]
    AlreadyClosed,

    /// No open period covers the requested date (or the company has no
    /// financial year at all).
    #[error("no current accounting period for {0}")]
    NoCurrentPeriod(NaiveDate),

    #[error("financial year {0} not found")]
    YearNotFound(FinancialYearId),

    #[error("accounting period {0} not found")]
    PeriodNotFound(PeriodId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
