use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use artha_accounts::{Account, AccountError, ChartOfAccounts, PostingEffect};
use artha_core::{
    AccountId, AggregateRoot, CompanyId, DomainError, ExpectedVersion, JournalEntryId, UserId,
};
use artha_periods::{AccountingPeriod, PeriodManager};

use crate::entry::{JournalEntry, JournalLine, JournalStatus, SourceRef};
use crate::error::JournalError;
use crate::ledger::{GeneralLedgerStore, PendingLedgerRow};

/// Input for creating a journal entry. Every module that books financial
/// effects goes through this shape.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub company_id: CompanyId,
    pub entry_date: NaiveDate,
    pub lines: Vec<JournalLine>,
    pub narration: Option<String>,
    pub source: Option<SourceRef>,
}

/// The journal engine: sole owner of journal entries and the general
/// ledger, and the only writer of account balances (through the chart's
/// posting-effect seam).
///
/// Posting runs under a single posting gate: ledger rows, account balances
/// and the status stamp land together or not at all. Touched accounts are
/// verified with the optimistic version captured at validation and applied
/// in sorted-id order.
#[derive(Debug)]
pub struct JournalEngine {
    chart: Arc<ChartOfAccounts>,
    periods: Arc<PeriodManager>,
    ledger: Arc<GeneralLedgerStore>,
    entries: RwLock<HashMap<JournalEntryId, JournalEntry>>,
    /// Next journal number per company; numbers are assigned once and
    /// never reused, reversals included.
    sequences: Mutex<HashMap<CompanyId, u64>>,
    posting_gate: Mutex<()>,
}

fn poisoned() -> JournalError {
    JournalError::Domain(DomainError::invariant("journal store lock poisoned"))
}

impl JournalEngine {
    pub fn new(
        chart: Arc<ChartOfAccounts>,
        periods: Arc<PeriodManager>,
        ledger: Arc<GeneralLedgerStore>,
    ) -> Self {
        Self {
            chart,
            periods,
            ledger,
            entries: RwLock::new(HashMap::new()),
            sequences: Mutex::new(HashMap::new()),
            posting_gate: Mutex::new(()),
        }
    }

    /// Validate and persist a draft entry. Any violation rejects the input
    /// and persists nothing; the journal number is only consumed after
    /// validation passes.
    pub fn create_entry(
        &self,
        input: NewJournalEntry,
        actor: UserId,
    ) -> Result<JournalEntry, JournalError> {
        JournalEntry::validate_lines(&input.lines)?;
        self.check_accounts(input.company_id, &input.lines)?;
        let period = self.open_period_for(input.company_id, input.entry_date)?;

        let journal_number = self.next_journal_number(input.company_id)?;
        let entry = JournalEntry::draft(
            input.company_id,
            journal_number,
            input.entry_date,
            period.id_typed(),
            input.lines,
            input.narration,
            input.source,
            actor,
        )?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(entry.id_typed(), entry.clone());
        Ok(entry)
    }

    pub fn entry(&self, id: JournalEntryId) -> Result<JournalEntry, JournalError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        entries.get(&id).cloned().ok_or(JournalError::EntryNotFound(id))
    }

    /// `draft → pending_approval`.
    pub fn submit(&self, id: JournalEntryId) -> Result<JournalEntry, JournalError> {
        self.mutate_entry(id, |entry| entry.submit())
    }

    /// Record approval. Policy-gated per deployment; an unapproved draft
    /// may still be posted directly.
    pub fn approve(&self, id: JournalEntryId, actor: UserId) -> Result<JournalEntry, JournalError> {
        self.mutate_entry(id, |entry| entry.approve(actor))
    }

    /// Post an entry: append one general-ledger row per line, update every
    /// referenced account's cached balance, stamp `posted_by/posted_at` and
    /// flip the status, atomically.
    pub fn post(&self, id: JournalEntryId, actor: UserId) -> Result<JournalEntry, JournalError> {
        let _gate = self.posting_gate.lock().map_err(|_| poisoned())?;
        self.post_locked(id, actor)
    }

    /// Create and post in one step; the narrow contract callers use.
    pub fn post_journal_entry(
        &self,
        input: NewJournalEntry,
        actor: UserId,
    ) -> Result<JournalEntry, JournalError> {
        let _gate = self.posting_gate.lock().map_err(|_| poisoned())?;
        let draft = self.create_entry(input, actor)?;
        self.post_locked(draft.id_typed(), actor)
    }

    /// Reverse a posted entry: a *new* posted entry with debit/credit
    /// swapped, dated at `reversal_date`, linked both ways. The original's
    /// lines and ledger rows are never touched.
    pub fn reverse(
        &self,
        id: JournalEntryId,
        reversal_date: NaiveDate,
        narration: Option<String>,
        actor: UserId,
    ) -> Result<JournalEntry, JournalError> {
        let _gate = self.posting_gate.lock().map_err(|_| poisoned())?;

        let original = self.entry(id)?;
        if original.is_reversed() {
            return Err(JournalError::AlreadyReversed);
        }
        if original.status() != JournalStatus::Posted {
            return Err(JournalError::NotPosted(original.status()));
        }
        // The reversal itself must land in an open period.
        self.open_period_for(original.company_id(), reversal_date)?;

        let narration = narration.unwrap_or_else(|| {
            format!("Reversal of {}", original.journal_number_display())
        });
        let draft = self.create_entry(
            NewJournalEntry {
                company_id: original.company_id(),
                entry_date: reversal_date,
                lines: original.swapped_lines(),
                narration: Some(narration),
                source: original.source().cloned(),
            },
            actor,
        )?;
        let reversal = self.post_locked(draft.id_typed(), actor)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let reversal_id = reversal.id_typed();
        if let Some(entry) = entries.get_mut(&id) {
            entry.mark_reversed(reversal_id)?;
        }
        let reversal = entries
            .get_mut(&reversal_id)
            .ok_or(JournalError::EntryNotFound(reversal_id))?;
        reversal.set_reversal_of(id);
        info!(
            original = %id,
            reversal = %reversal_id,
            "journal entry reversed"
        );
        Ok(reversal.clone())
    }

    // Lookup conveniences for calling modules.

    pub fn current_period(
        &self,
        company: CompanyId,
        date: Option<NaiveDate>,
    ) -> Result<AccountingPeriod, JournalError> {
        Ok(self.periods.current_period(company, date)?)
    }

    pub fn account_by_code(
        &self,
        company: CompanyId,
        code: &str,
    ) -> Result<Account, JournalError> {
        Ok(self.chart.account_by_code(company, code)?)
    }

    // --- internals ---

    fn post_locked(&self, id: JournalEntryId, actor: UserId) -> Result<JournalEntry, JournalError> {
        if self.ledger.integrity_hold() {
            return Err(JournalError::PostingHalted);
        }
        let entry = self.entry(id)?;
        match entry.status() {
            JournalStatus::Draft | JournalStatus::PendingApproval => {}
            other => return Err(JournalError::InvalidTransition(other)),
        }

        // Re-validate the balance invariant; a stale read must never
        // reach the ledger.
        JournalEntry::validate_lines(entry.lines())?;
        // The period gate is checked at posting time, not creation time.
        self.open_period_for(entry.company_id(), entry.entry_date())?;

        let accounts = self.check_accounts(entry.company_id(), entry.lines())?;

        // One aggregated effect per account, optimistic version captured now.
        let mut effects: BTreeMap<AccountId, PostingEffect> = BTreeMap::new();
        for line in entry.lines() {
            let account = &accounts[&line.account_id];
            let effect = effects
                .entry(line.account_id)
                .or_insert_with(|| PostingEffect {
                    account_id: line.account_id,
                    expected_version: ExpectedVersion::Exact(account.version()),
                    debit: Decimal::ZERO,
                    credit: Decimal::ZERO,
                });
            effect.debit += line.debit_amount;
            effect.credit += line.credit_amount;
        }
        let effects: Vec<PostingEffect> = effects.into_values().collect();

        // All-or-none: balances first (this is the step that can be
        // rejected), then the append-only rows, then the status stamp.
        self.chart.apply_posting_effects(&effects)?;

        let posted_at = Utc::now();
        let pending: Vec<PendingLedgerRow> = entry
            .lines()
            .iter()
            .map(|line| {
                let account = &accounts[&line.account_id];
                PendingLedgerRow {
                    company_id: entry.company_id(),
                    account_id: line.account_id,
                    transaction_date: entry.entry_date(),
                    journal_entry_id: entry.id_typed(),
                    journal_number: entry.journal_number(),
                    debit_amount: line.debit_amount,
                    credit_amount: line.credit_amount,
                    signed_effect: account.signed_effect(line.debit_amount, line.credit_amount),
                    opening_balance: account.opening_balance(),
                    description: line.description.clone().or_else(|| {
                        entry.narration().map(str::to_string)
                    }),
                    source: entry.source().cloned(),
                    party: line.party,
                }
            })
            .collect();
        self.ledger.append(pending, posted_at)?;

        let posted = self.mutate_entry(id, |entry| entry.mark_posted(actor))?;
        info!(
            entry = %id,
            number = %posted.journal_number_display(),
            amount = %posted.total_debit(),
            "journal entry posted"
        );
        Ok(posted)
    }

    /// Every line's account must exist, belong to the company and be
    /// active. Returns the accounts for effect/row construction.
    fn check_accounts(
        &self,
        company: CompanyId,
        lines: &[JournalLine],
    ) -> Result<HashMap<AccountId, Account>, JournalError> {
        let mut accounts = HashMap::new();
        for line in lines {
            if accounts.contains_key(&line.account_id) {
                continue;
            }
            let account = self.chart.account(line.account_id)?;
            if account.company_id() != company {
                return Err(AccountError::not_found_id(line.account_id).into());
            }
            if !account.is_active() {
                return Err(JournalError::InvalidLine(format!(
                    "account '{}' is deactivated",
                    account.code()
                )));
            }
            accounts.insert(line.account_id, account);
        }
        Ok(accounts)
    }

    /// Resolve the period containing `date` and enforce the posting gate
    /// (period open, financial year not closed).
    fn open_period_for(
        &self,
        company: CompanyId,
        date: NaiveDate,
    ) -> Result<AccountingPeriod, JournalError> {
        let resolved = self.periods.resolve(company, date)?;
        if !resolved.accepts_postings() {
            warn!(period = resolved.period.name(), %date, "posting refused: period closed");
            return Err(JournalError::PeriodClosed {
                period: resolved.period.name().to_string(),
            });
        }
        Ok(resolved.period)
    }

    fn next_journal_number(&self, company: CompanyId) -> Result<u64, JournalError> {
        let mut sequences = self.sequences.lock().map_err(|_| poisoned())?;
        let next = sequences.entry(company).or_insert(0);
        *next += 1;
        Ok(*next)
    }

    fn mutate_entry(
        &self,
        id: JournalEntryId,
        f: impl FnOnce(&mut JournalEntry) -> Result<(), JournalError>,
    ) -> Result<JournalEntry, JournalError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let entry = entries.get_mut(&id).ok_or(JournalError::EntryNotFound(id))?;
        f(entry)?;
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use artha_accounts::{AccountType, NewAccount};
    use artha_core::PeriodId;

    struct Fixture {
        company: CompanyId,
        actor: UserId,
        chart: Arc<ChartOfAccounts>,
        periods: Arc<PeriodManager>,
        ledger: Arc<GeneralLedgerStore>,
        engine: JournalEngine,
        salary_expense: AccountId,
        salary_payable: AccountId,
        cash: AccountId,
        april: PeriodId,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(chart: &ChartOfAccounts, company: CompanyId, code: &str, t: AccountType) -> AccountId {
        chart
            .create_account(NewAccount {
                company_id: company,
                code: code.to_string(),
                name: format!("Account {code}"),
                account_type: t,
                sub_type: None,
                parent_id: None,
                opening_balance: Decimal::ZERO,
                is_system: false,
            })
            .unwrap()
            .id_typed()
    }

    fn fixture() -> Fixture {
        let company = CompanyId::new();
        let chart = Arc::new(ChartOfAccounts::new());
        let periods = Arc::new(PeriodManager::new());
        let ledger = Arc::new(GeneralLedgerStore::new());
        let (_, year_periods) = periods
            .create_financial_year(company, "2025-2026", date(2025, 4, 1))
            .unwrap();

        let salary_expense = account(&chart, company, "5210", AccountType::Expense);
        let salary_payable = account(&chart, company, "2130", AccountType::Liability);
        let cash = account(&chart, company, "1000", AccountType::Asset);

        let engine = JournalEngine::new(chart.clone(), periods.clone(), ledger.clone());
        Fixture {
            company,
            actor: UserId::new(),
            chart,
            periods,
            ledger,
            engine,
            salary_expense,
            salary_payable,
            cash,
            april: year_periods[0].id_typed(),
        }
    }

    fn salary_accrual(f: &Fixture, amount: Decimal, day: u32) -> NewJournalEntry {
        NewJournalEntry {
            company_id: f.company,
            entry_date: date(2025, 4, day),
            lines: vec![
                JournalLine::debit(f.salary_expense, amount),
                JournalLine::credit(f.salary_payable, amount),
            ],
            narration: Some("April salary accrual".to_string()),
            source: None,
        }
    }

    #[test]
    fn posting_updates_ledger_and_balances_atomically() {
        let f = fixture();
        let posted = f
            .engine
            .post_journal_entry(salary_accrual(&f, dec!(50000), 15), f.actor)
            .unwrap();

        assert_eq!(posted.status(), JournalStatus::Posted);
        assert!(posted.posted_at().is_some());
        assert_eq!(posted.journal_number(), 1);
        assert_eq!(posted.period_id(), f.april);

        // One ledger row per line, running balances on the natural side.
        let rows = f.ledger.rows_for_entry(posted.id_typed()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].running_balance, dec!(50000));
        assert_eq!(rows[1].running_balance, dec!(50000));

        // Both accounts show the amount on their natural side.
        assert_eq!(
            f.chart.account(f.salary_expense).unwrap().current_balance(),
            dec!(50000)
        );
        assert_eq!(
            f.chart.account(f.salary_payable).unwrap().current_balance(),
            dec!(50000)
        );
    }

    #[test]
    fn drafts_are_invisible_until_posted() {
        let f = fixture();
        let draft = f
            .engine
            .create_entry(salary_accrual(&f, dec!(1000), 10), f.actor)
            .unwrap();
        assert_eq!(draft.status(), JournalStatus::Draft);
        assert_eq!(f.ledger.row_count().unwrap(), 0);
        assert_eq!(
            f.chart.account(f.salary_expense).unwrap().current_balance(),
            Decimal::ZERO
        );

        f.engine.post(draft.id_typed(), f.actor).unwrap();
        assert_eq!(f.ledger.row_count().unwrap(), 2);
    }

    #[test]
    fn unbalanced_entry_is_rejected_with_nothing_persisted() {
        let f = fixture();
        let err = f
            .engine
            .create_entry(
                NewJournalEntry {
                    company_id: f.company,
                    entry_date: date(2025, 4, 10),
                    lines: vec![
                        JournalLine::debit(f.salary_expense, dec!(100)),
                        JournalLine::credit(f.salary_payable, dec!(90)),
                    ],
                    narration: None,
                    source: None,
                },
                f.actor,
            )
            .unwrap_err();
        assert!(matches!(err, JournalError::UnbalancedEntry { .. }));

        // The failed attempt consumed no journal number.
        let next = f
            .engine
            .create_entry(salary_accrual(&f, dec!(10), 10), f.actor)
            .unwrap();
        assert_eq!(next.journal_number(), 1);
    }

    #[test]
    fn unknown_account_fails_lookup() {
        let f = fixture();
        let err = f
            .engine
            .create_entry(
                NewJournalEntry {
                    company_id: f.company,
                    entry_date: date(2025, 4, 10),
                    lines: vec![
                        JournalLine::debit(AccountId::new(), dec!(10)),
                        JournalLine::credit(f.cash, dec!(10)),
                    ],
                    narration: None,
                    source: None,
                },
                f.actor,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            JournalError::Account(AccountError::AccountNotFound(_))
        ));
    }

    #[test]
    fn foreign_company_account_is_not_found() {
        let f = fixture();
        let foreign = account(&f.chart, CompanyId::new(), "1000", AccountType::Asset);
        let err = f
            .engine
            .create_entry(
                NewJournalEntry {
                    company_id: f.company,
                    entry_date: date(2025, 4, 10),
                    lines: vec![
                        JournalLine::debit(foreign, dec!(10)),
                        JournalLine::credit(f.cash, dec!(10)),
                    ],
                    narration: None,
                    source: None,
                },
                f.actor,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            JournalError::Account(AccountError::AccountNotFound(_))
        ));
    }

    #[test]
    fn period_gate_blocks_posting_without_writes() {
        let f = fixture();
        let draft = f
            .engine
            .create_entry(salary_accrual(&f, dec!(500), 20), f.actor)
            .unwrap();

        f.periods.close_period(f.april, f.actor).unwrap();

        let err = f.engine.post(draft.id_typed(), f.actor).unwrap_err();
        assert!(matches!(err, JournalError::PeriodClosed { .. }));
        assert_eq!(f.ledger.row_count().unwrap(), 0);
        assert_eq!(
            f.chart.account(f.salary_payable).unwrap().current_balance(),
            Decimal::ZERO
        );
        assert_eq!(f.engine.entry(draft.id_typed()).unwrap().status(), JournalStatus::Draft);

        // Creation into the closed period is refused outright.
        let err = f
            .engine
            .create_entry(salary_accrual(&f, dec!(500), 25), f.actor)
            .unwrap_err();
        assert!(matches!(err, JournalError::PeriodClosed { .. }));

        // A date with no financial year at all is a lookup failure.
        let err = f
            .engine
            .create_entry(
                NewJournalEntry {
                    entry_date: date(2030, 1, 1),
                    ..salary_accrual(&f, dec!(500), 25)
                },
                f.actor,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            JournalError::Period(artha_periods::PeriodError::NoCurrentPeriod(_))
        ));
    }

    #[test]
    fn closed_year_blocks_posting() {
        let f = fixture();
        let year = f
            .periods
            .resolve(f.company, date(2025, 4, 15))
            .unwrap()
            .period
            .financial_year_id();
        f.periods.close_year(year, f.actor).unwrap();

        let err = f
            .engine
            .post_journal_entry(salary_accrual(&f, dec!(100), 15), f.actor)
            .unwrap_err();
        assert!(matches!(err, JournalError::PeriodClosed { .. }));
    }

    #[test]
    fn reversal_swaps_sides_and_nets_to_zero() {
        let f = fixture();
        let posted = f
            .engine
            .post_journal_entry(salary_accrual(&f, dec!(50000), 15), f.actor)
            .unwrap();

        let reversal = f
            .engine
            .reverse(posted.id_typed(), date(2025, 4, 20), None, f.actor)
            .unwrap();

        assert_eq!(reversal.status(), JournalStatus::Posted);
        assert_eq!(reversal.journal_number(), 2);
        assert_eq!(reversal.reversal_of(), Some(posted.id_typed()));
        assert_eq!(reversal.entry_date(), date(2025, 4, 20));
        assert_eq!(reversal.narration(), Some("Reversal of JV-00001"));

        let original = f.engine.entry(posted.id_typed()).unwrap();
        assert_eq!(original.status(), JournalStatus::Reversed);
        assert!(original.is_reversed());
        assert_eq!(original.reversed_by(), Some(reversal.id_typed()));
        // The original's lines are untouched.
        assert_eq!(original.lines(), posted.lines());
        assert_eq!(f.ledger.rows_for_entry(posted.id_typed()).unwrap().len(), 2);

        // Net effect on every touched account is zero.
        assert_eq!(
            f.chart.account(f.salary_expense).unwrap().current_balance(),
            Decimal::ZERO
        );
        assert_eq!(
            f.chart.account(f.salary_payable).unwrap().current_balance(),
            Decimal::ZERO
        );
        // Reversal lines are the originals with sides swapped.
        for (orig, rev) in posted.lines().iter().zip(reversal.lines()) {
            assert_eq!(orig.debit_amount, rev.credit_amount);
            assert_eq!(orig.credit_amount, rev.debit_amount);
        }
    }

    #[test]
    fn reversal_requires_posted_and_happens_once() {
        let f = fixture();
        let draft = f
            .engine
            .create_entry(salary_accrual(&f, dec!(100), 15), f.actor)
            .unwrap();
        let err = f
            .engine
            .reverse(draft.id_typed(), date(2025, 4, 20), None, f.actor)
            .unwrap_err();
        assert!(matches!(err, JournalError::NotPosted(JournalStatus::Draft)));

        f.engine.post(draft.id_typed(), f.actor).unwrap();
        f.engine
            .reverse(draft.id_typed(), date(2025, 4, 20), None, f.actor)
            .unwrap();
        let err = f
            .engine
            .reverse(draft.id_typed(), date(2025, 4, 21), None, f.actor)
            .unwrap_err();
        assert!(matches!(err, JournalError::AlreadyReversed));
    }

    #[test]
    fn reversal_date_must_fall_in_an_open_period() {
        let f = fixture();
        let posted = f
            .engine
            .post_journal_entry(salary_accrual(&f, dec!(100), 15), f.actor)
            .unwrap();
        f.periods.close_period(f.april, f.actor).unwrap();

        let err = f
            .engine
            .reverse(posted.id_typed(), date(2025, 4, 28), None, f.actor)
            .unwrap_err();
        assert!(matches!(err, JournalError::PeriodClosed { .. }));

        // May is open; reversing there succeeds.
        f.engine
            .reverse(posted.id_typed(), date(2025, 5, 2), None, f.actor)
            .unwrap();
    }

    #[test]
    fn journal_numbers_are_sequential_per_company() {
        let f = fixture();
        for expected in 1..=3u64 {
            let entry = f
                .engine
                .post_journal_entry(salary_accrual(&f, dec!(10), 15), f.actor)
                .unwrap();
            assert_eq!(entry.journal_number(), expected);
        }

        // An approval hop does not disturb the sequence.
        let draft = f
            .engine
            .create_entry(salary_accrual(&f, dec!(10), 16), f.actor)
            .unwrap();
        assert_eq!(draft.journal_number(), 4);
        let submitted = f.engine.submit(draft.id_typed()).unwrap();
        assert_eq!(submitted.status(), JournalStatus::PendingApproval);
        let approved = f.engine.approve(draft.id_typed(), f.actor).unwrap();
        assert!(approved.approved_by().is_some());
        let posted = f.engine.post(draft.id_typed(), f.actor).unwrap();
        assert_eq!(posted.journal_number(), 4);
    }

    #[test]
    fn deactivated_account_is_an_invalid_line() {
        let f = fixture();
        f.chart.deactivate(f.cash).unwrap();
        let err = f
            .engine
            .post_journal_entry(
                NewJournalEntry {
                    company_id: f.company,
                    entry_date: date(2025, 4, 10),
                    lines: vec![
                        JournalLine::debit(f.cash, dec!(10)),
                        JournalLine::credit(f.salary_payable, dec!(10)),
                    ],
                    narration: None,
                    source: None,
                },
                f.actor,
            )
            .unwrap_err();
        assert!(matches!(err, JournalError::InvalidLine(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: any sequence of balanced postings keeps the books
        /// balanced: the debit-normal total equals the credit-normal
        /// total across the whole chart.
        #[test]
        fn posted_books_always_balance(
            amounts in prop::collection::vec(1i64..1_000_000i64, 1..12)
        ) {
            let f = fixture();
            for (i, paise) in amounts.iter().enumerate() {
                let amount = Decimal::new(*paise, 2);
                // Rotate the credit leg to touch different account pairs.
                let credit = if i % 2 == 0 { f.salary_payable } else { f.cash };
                f.engine
                    .post_journal_entry(
                        NewJournalEntry {
                            company_id: f.company,
                            entry_date: date(2025, 4, 1 + (i as u32 % 28)),
                            lines: vec![
                                JournalLine::debit(f.salary_expense, amount),
                                JournalLine::credit(credit, amount),
                            ],
                            narration: None,
                            source: None,
                        },
                        f.actor,
                    )
                    .unwrap();
            }

            let mut debit_normal = Decimal::ZERO;
            let mut credit_normal = Decimal::ZERO;
            for account in f.chart.accounts_for_company(f.company).unwrap() {
                match account.natural_side() {
                    artha_accounts::BalanceSide::Debit => debit_normal += account.current_balance(),
                    artha_accounts::BalanceSide::Credit => credit_normal += account.current_balance(),
                }
            }
            prop_assert_eq!(debit_normal, credit_normal);
        }
    }
}
