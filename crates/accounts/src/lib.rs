//! `artha-accounts`: the chart of accounts.
//!
//! Hierarchical account registry (arena keyed by id, explicit `parent_id`,
//! bounded-depth cycle guard), the five-type taxonomy fixing each account's
//! natural balance side, and the materialized `current_balance` cache.
//!
//! Single-writer discipline: `current_balance` is mutated only through
//! [`ChartOfAccounts::apply_posting_effects`], which only the journal
//! engine's posting transition calls. Everything else treats the cache as
//! read-only and may recompute from general-ledger rows for audit.

pub mod account;
pub mod chart;
pub mod error;

pub use account::{Account, AccountSubType, AccountType, BalanceSide, NewAccount, UpdateAccount};
pub use chart::{ChartOfAccounts, PostingEffect};
pub use error::AccountError;
