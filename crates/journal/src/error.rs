use rust_decimal::Decimal;
use thiserror::Error;

use artha_accounts::AccountError;
use artha_core::{DomainError, JournalEntryId};
use artha_periods::PeriodError;

use crate::entry::JournalStatus;

/// Failures of the journal engine.
///
/// Validation errors reject the input before any write; state errors carry
/// the current state so the caller can decide.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error("entry is unbalanced: debits {total_debit} != credits {total_credit}")]
    UnbalancedEntry {
        total_debit: Decimal,
        total_credit: Decimal,
    },

    #[error("invalid journal line: {0}")]
    InvalidLine(String),

    /// Posting is paused because a books-level integrity check failed.
    #[error("posting is halted: ledger integrity hold is raised")]
    PostingHalted,

    #[error("journal entry {0} not found")]
    EntryNotFound(JournalEntryId),

    /// The target period (or its financial year) does not accept postings.
    #[error("period '{period}' is closed for posting")]
    PeriodClosed { period: String },

    #[error("entry is already reversed")]
    AlreadyReversed,

    /// Only posted entries may be reversed; carries the actual status.
    #[error("entry is not posted (status: {0:?})")]
    NotPosted(JournalStatus),

    /// The requested transition is not legal from the entry's status.
    #[error("illegal transition from status {0:?}")]
    InvalidTransition(JournalStatus),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
