use thiserror::Error;

use artha_core::{AccountId, DomainError};

/// Failures of the chart-of-accounts subsystem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("account code '{code}' already exists for this company")]
    DuplicateCode { code: String },

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("parent account not found or belongs to another company")]
    InvalidParent,

    #[error("re-parenting account '{code}' would create a cycle")]
    TreeCycle { code: String },

    #[error("account '{code}' is a system account and cannot be edited")]
    SystemAccountLocked { code: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AccountError {
    pub fn not_found_id(id: AccountId) -> Self {
        Self::AccountNotFound(id.to_string())
    }

    pub fn not_found_code(code: &str) -> Self {
        Self::AccountNotFound(code.to_string())
    }
}
