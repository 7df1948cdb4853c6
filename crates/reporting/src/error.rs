use thiserror::Error;

use artha_accounts::AccountError;
use artha_core::DomainError;
use artha_journal::JournalError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
