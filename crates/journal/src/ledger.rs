use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use artha_core::{AccountId, CompanyId, DomainError, JournalEntryId, PartyRef};

use crate::entry::SourceRef;
use crate::error::JournalError;

/// Denormalized, append-only projection of one posted journal line.
///
/// Rows are never updated in place; a reversal appends new rows.
/// `running_balance` is the account's natural-side balance as of this row,
/// in append order per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedgerRow {
    pub id: Uuid,
    pub company_id: CompanyId,
    pub account_id: AccountId,
    pub transaction_date: NaiveDate,
    pub journal_entry_id: JournalEntryId,
    pub journal_number: u64,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub running_balance: Decimal,
    pub description: Option<String>,
    pub source: Option<SourceRef>,
    pub party: PartyRef,
    pub posted_at: DateTime<Utc>,
}

/// One row of a posting before the store assigns its running balance.
#[derive(Debug, Clone)]
pub(crate) struct PendingLedgerRow {
    pub company_id: CompanyId,
    pub account_id: AccountId,
    pub transaction_date: NaiveDate,
    pub journal_entry_id: JournalEntryId,
    pub journal_number: u64,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    /// Natural-side delta of this row against its account.
    pub signed_effect: Decimal,
    /// Tail seed when this is the account's first row ever.
    pub opening_balance: Decimal,
    pub description: Option<String>,
    pub source: Option<SourceRef>,
    pub party: PartyRef,
}

#[derive(Debug, Default)]
struct LedgerState {
    rows: Vec<GeneralLedgerRow>,
    by_account: HashMap<AccountId, Vec<usize>>,
    /// Last running balance per account (seeded from the opening balance).
    tails: HashMap<AccountId, Decimal>,
}

/// The append-only general ledger.
///
/// Only the journal engine appends; everything else reads. Running
/// balances are assigned under the store's write guard, so concurrent
/// postings to the same account can never interleave their tails.
#[derive(Debug, Default)]
pub struct GeneralLedgerStore {
    state: RwLock<LedgerState>,
    /// Raised when a books-level check (the trial balance identity)
    /// fails. While raised, posting is refused until an operator has
    /// investigated and cleared it.
    integrity_hold: AtomicBool,
}

fn poisoned() -> JournalError {
    JournalError::Domain(DomainError::invariant("general ledger lock poisoned"))
}

impl GeneralLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of one posted entry, assigning running balances.
    pub(crate) fn append(
        &self,
        pending: Vec<PendingLedgerRow>,
        posted_at: DateTime<Utc>,
    ) -> Result<Vec<GeneralLedgerRow>, JournalError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let mut appended = Vec::with_capacity(pending.len());
        for row in pending {
            let tail = *state
                .tails
                .get(&row.account_id)
                .unwrap_or(&row.opening_balance);
            let running_balance = tail + row.signed_effect;
            state.tails.insert(row.account_id, running_balance);

            let stored = GeneralLedgerRow {
                id: Uuid::now_v7(),
                company_id: row.company_id,
                account_id: row.account_id,
                transaction_date: row.transaction_date,
                journal_entry_id: row.journal_entry_id,
                journal_number: row.journal_number,
                debit_amount: row.debit_amount,
                credit_amount: row.credit_amount,
                running_balance,
                description: row.description,
                source: row.source,
                party: row.party,
                posted_at,
            };
            let index = state.rows.len();
            state.by_account.entry(stored.account_id).or_default().push(index);
            state.rows.push(stored.clone());
            appended.push(stored);
        }
        Ok(appended)
    }

    /// Rows for one account, optionally windowed by transaction date,
    /// ordered by transaction date (append order within a date, so a
    /// backdated posting lists under its own date, not at the tail).
    pub fn rows_for_account(
        &self,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<GeneralLedgerRow>, JournalError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let Some(indexes) = state.by_account.get(&account_id) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<GeneralLedgerRow> = indexes
            .iter()
            .map(|&i| &state.rows[i])
            .filter(|r| from.is_none_or(|d| r.transaction_date >= d))
            .filter(|r| to.is_none_or(|d| r.transaction_date <= d))
            .cloned()
            .collect();
        // Stable sort: rows already come out in append order.
        rows.sort_by_key(|r| r.transaction_date);
        Ok(rows)
    }

    /// Rows written for one journal entry.
    pub fn rows_for_entry(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<Vec<GeneralLedgerRow>, JournalError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state
            .rows
            .iter()
            .filter(|r| r.journal_entry_id == entry_id)
            .cloned()
            .collect())
    }

    /// Natural-side signed sum of an account's rows dated on or before `to`.
    pub fn signed_sum(
        &self,
        account_id: AccountId,
        signer: impl Fn(Decimal, Decimal) -> Decimal,
        to: Option<NaiveDate>,
    ) -> Result<Decimal, JournalError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let Some(indexes) = state.by_account.get(&account_id) else {
            return Ok(Decimal::ZERO);
        };
        Ok(indexes
            .iter()
            .map(|&i| &state.rows[i])
            .filter(|r| to.is_none_or(|d| r.transaction_date <= d))
            .map(|r| signer(r.debit_amount, r.credit_amount))
            .sum())
    }

    pub fn row_count(&self) -> Result<usize, JournalError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.rows.len())
    }

    /// Refuse further postings until an operator clears the hold.
    pub fn raise_integrity_hold(&self) {
        self.integrity_hold.store(true, Ordering::SeqCst);
    }

    /// Clear the hold after the books have been investigated.
    pub fn clear_integrity_hold(&self) {
        self.integrity_hold.store(false, Ordering::SeqCst);
    }

    pub fn integrity_hold(&self) -> bool {
        self.integrity_hold.load(Ordering::SeqCst)
    }
}
