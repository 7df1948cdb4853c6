use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use artha_accounts::{Account, AccountType, BalanceSide, ChartOfAccounts};
use artha_core::{AccountId, CompanyId};
use artha_journal::{GeneralLedgerRow, GeneralLedgerStore};

use crate::error::ReportError;

/// Ledger extract for one account: the windowed rows plus the balances
/// bracketing the window, both on the account's natural side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLedger {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub rows: Vec<GeneralLedgerRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Per-company trial balance as of a date.
///
/// `total_debit == total_credit` is the queryable proof that posting has
/// never let an unbalanced entry through. A mismatch is a data-integrity
/// alarm, not a recoverable business error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    pub company_id: CompanyId,
    pub as_of: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl TrialBalance {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// Read-only reporting over the chart and the general ledger.
#[derive(Debug, Clone)]
pub struct ReportingService {
    chart: Arc<ChartOfAccounts>,
    ledger: Arc<GeneralLedgerStore>,
}

impl ReportingService {
    pub fn new(chart: Arc<ChartOfAccounts>, ledger: Arc<GeneralLedgerStore>) -> Self {
        Self { chart, ledger }
    }

    /// Natural-side balance of an account as of end of `date`: opening
    /// balance plus the signed sum of its ledger rows dated on or before.
    pub fn balance_as_of(
        &self,
        account_id: AccountId,
        date: NaiveDate,
    ) -> Result<Decimal, ReportError> {
        let account = self.chart.account(account_id)?;
        self.signed_balance(&account, Some(date))
    }

    /// Ordered ledger rows for an account within the date window, with the
    /// natural-side balances at both edges of the window.
    pub fn account_ledger(
        &self,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountLedger, ReportError> {
        let account = self.chart.account(account_id)?;

        // Balance the instant before the window opens.
        let opening_balance = match from.and_then(|d| d.checked_sub_days(Days::new(1))) {
            Some(day_before) => self.signed_balance(&account, Some(day_before))?,
            None => account.opening_balance(),
        };
        let closing_balance = self.signed_balance(&account, to)?;
        let rows = self.ledger.rows_for_account(account_id, from, to)?;

        Ok(AccountLedger {
            account_id,
            account_code: account.code().to_string(),
            account_name: account.name().to_string(),
            from,
            to,
            opening_balance,
            closing_balance,
            rows,
        })
    }

    /// Trial balance over every active account of the company. Each
    /// natural-side balance lands in its natural column when positive and
    /// flips to the opposite column when negative, so both columns stay
    /// non-negative and their totals stay equal.
    ///
    /// A mismatch between the totals means the books are corrupt. The
    /// report is still returned for inspection, but the ledger's
    /// integrity hold is raised so the journal engine refuses further
    /// postings until the hold is cleared.
    pub fn trial_balance(
        &self,
        company_id: CompanyId,
        as_of: NaiveDate,
    ) -> Result<TrialBalance, ReportError> {
        let mut accounts = self.chart.accounts_for_company(company_id)?;
        accounts.retain(|a| a.is_active());
        accounts.sort_by(|a, b| a.code().cmp(b.code()));

        let mut rows = Vec::with_capacity(accounts.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for account in &accounts {
            let balance = self.signed_balance(account, Some(as_of))?;
            let (debit, credit) = match (account.natural_side(), balance >= Decimal::ZERO) {
                (BalanceSide::Debit, true) => (balance, Decimal::ZERO),
                (BalanceSide::Debit, false) => (Decimal::ZERO, -balance),
                (BalanceSide::Credit, true) => (Decimal::ZERO, balance),
                (BalanceSide::Credit, false) => (-balance, Decimal::ZERO),
            };
            total_debit += debit;
            total_credit += credit;
            rows.push(TrialBalanceRow {
                account_id: account.id_typed(),
                account_code: account.code().to_string(),
                account_name: account.name().to_string(),
                account_type: account.account_type(),
                debit,
                credit,
            });
        }

        if total_debit != total_credit {
            error!(
                company_id = %company_id,
                %as_of,
                %total_debit,
                %total_credit,
                "trial balance out of balance, raising ledger integrity hold"
            );
            // Pause posting until an operator has investigated the books.
            self.ledger.raise_integrity_hold();
        }

        Ok(TrialBalance {
            company_id,
            as_of,
            rows,
            total_debit,
            total_credit,
        })
    }

    fn signed_balance(
        &self,
        account: &Account,
        to: Option<NaiveDate>,
    ) -> Result<Decimal, ReportError> {
        let movement = self.ledger.signed_sum(
            account.id_typed(),
            |debit, credit| account.signed_effect(debit, credit),
            to,
        )?;
        Ok(account.opening_balance() + movement)
    }
}
