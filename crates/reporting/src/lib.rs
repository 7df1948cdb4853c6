//! `artha-reporting`: read-side extracts over the chart of accounts and
//! the general ledger.
//!
//! Everything here is derived: balances come from opening balance plus the
//! signed sum of ledger rows, and the trial balance re-proves the posting
//! invariant on every call instead of trusting cached state.

pub mod error;
pub mod service;

pub use error::ReportError;
pub use service::{AccountLedger, ReportingService, TrialBalance, TrialBalanceRow};
