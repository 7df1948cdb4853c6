//! `artha-core`: domain foundation for the general-ledger core.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the base error model, money helpers, and the small
//! traits the ledger crates build on.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod party;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AccountId, CompanyId, FinancialYearId, ForexTransactionId, JournalEntryId, PartyId, PeriodId,
    UserId,
};
pub use money::{round_money, CurrencyCode, MONEY_DP};
pub use party::PartyRef;
pub use value_object::ValueObject;
