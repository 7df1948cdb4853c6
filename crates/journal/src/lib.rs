//! `artha-journal`: the journal engine and the general ledger.
//!
//! The state machine at the center of the core:
//! `draft → pending_approval → posted → reversed` (the approval hop is
//! optional per deployment policy). Posting is the only way balances move:
//! it appends one general-ledger row per line, updates every touched
//! account's cached balance, and stamps the entry, atomically, inside one
//! posting boundary. Posted history is immutable; a reversal is a new
//! entry with debit/credit swapped, linked both ways.

pub mod engine;
pub mod entry;
pub mod error;
pub mod ledger;

pub use engine::{JournalEngine, NewJournalEntry};
pub use entry::{JournalEntry, JournalLine, JournalStatus, SourceRef};
pub use error::JournalError;
pub use ledger::{GeneralLedgerRow, GeneralLedgerStore};
