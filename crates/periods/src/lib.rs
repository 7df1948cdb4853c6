//! `artha-periods`: financial years and accounting periods.
//!
//! A financial year spans twelve contiguous monthly periods. "Current" is
//! never a mutable flag: it is derived from date ranges on demand, so two
//! years can never both claim to be current. Closing (period or year) is a
//! one-way transition recorded with an audit stamp; the journal engine
//! refuses to post into anything closed.

pub mod error;
pub mod manager;
pub mod period;
pub mod year;

pub use error::PeriodError;
pub use manager::{PeriodManager, ResolvedPeriod};
pub use period::AccountingPeriod;
pub use year::FinancialYear;
