//! End-to-end run of the accounting core: financial year, chart, posting,
//! reporting, reversal, period close, and a multi-currency booking.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use artha_accounts::{AccountType, ChartOfAccounts, NewAccount};
use artha_core::{AccountId, CompanyId, CurrencyCode, UserId};
use artha_currency::{Currency, CurrencyService, RateSource};
use artha_journal::{
    GeneralLedgerStore, JournalEngine, JournalError, JournalLine, JournalStatus, NewJournalEntry,
};
use artha_periods::PeriodManager;
use artha_reporting::ReportingService;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct World {
    company: CompanyId,
    actor: UserId,
    chart: Arc<ChartOfAccounts>,
    periods: Arc<PeriodManager>,
    engine: JournalEngine,
    reports: ReportingService,
}

impl World {
    fn new() -> Result<Self> {
        artha_observability::init();
        let company = CompanyId::new();
        let chart = Arc::new(ChartOfAccounts::new());
        let periods = Arc::new(PeriodManager::new());
        let ledger = Arc::new(GeneralLedgerStore::new());
        periods.create_financial_year(company, "2025-2026", date(2025, 4, 1))?;
        let engine = JournalEngine::new(chart.clone(), periods.clone(), ledger.clone());
        let reports = ReportingService::new(chart.clone(), ledger);
        Ok(Self {
            company,
            actor: UserId::new(),
            chart,
            periods,
            engine,
            reports,
        })
    }

    fn account(&self, code: &str, name: &str, t: AccountType) -> Result<AccountId> {
        Ok(self
            .chart
            .create_account(NewAccount {
                company_id: self.company,
                code: code.to_string(),
                name: name.to_string(),
                account_type: t,
                sub_type: None,
                parent_id: None,
                opening_balance: Decimal::ZERO,
                is_system: false,
            })?
            .id_typed())
    }

    fn post_pair(
        &self,
        day: NaiveDate,
        debit: AccountId,
        credit: AccountId,
        amount: Decimal,
        narration: &str,
    ) -> Result<artha_journal::JournalEntry> {
        Ok(self.engine.post_journal_entry(
            NewJournalEntry {
                company_id: self.company,
                entry_date: day,
                lines: vec![
                    JournalLine::debit(debit, amount),
                    JournalLine::credit(credit, amount),
                ],
                narration: Some(narration.to_string()),
                source: None,
            },
            self.actor,
        )?)
    }
}

#[test]
fn salary_accrual_and_reversal_cycle() -> Result<()> {
    let w = World::new()?;
    let salary_expense = w.account("5210", "Salary Expense", AccountType::Expense)?;
    let salary_payable = w.account("2130", "Salary Payable", AccountType::Liability)?;

    // Twelve monthly periods exist and April is current on the 15th.
    let april = w.engine.current_period(w.company, Some(date(2025, 4, 15)))?;
    assert_eq!(april.period_number(), 1);

    let posted = w.post_pair(
        date(2025, 4, 15),
        salary_expense,
        salary_payable,
        dec!(50000),
        "April salary accrual",
    )?;
    assert_eq!(posted.status(), JournalStatus::Posted);
    assert_eq!(posted.journal_number_display(), "JV-00001");

    // Both accounts carry the amount on their natural side.
    assert_eq!(w.chart.account(salary_expense)?.current_balance(), dec!(50000));
    assert_eq!(w.chart.account(salary_payable)?.current_balance(), dec!(50000));

    let tb = w.reports.trial_balance(w.company, date(2025, 4, 30))?;
    assert!(tb.is_balanced());
    assert_eq!(tb.total_debit, dec!(50000));
    assert_eq!(tb.total_credit, dec!(50000));

    let ledger = w
        .reports
        .account_ledger(salary_expense, Some(date(2025, 4, 1)), Some(date(2025, 4, 30)))?;
    assert_eq!(ledger.opening_balance, Decimal::ZERO);
    assert_eq!(ledger.closing_balance, dec!(50000));
    assert_eq!(ledger.rows.len(), 1);

    let reversal = w
        .engine
        .reverse(posted.id_typed(), date(2025, 4, 20), None, w.actor)?;
    assert_eq!(reversal.reversal_of(), Some(posted.id_typed()));
    assert_eq!(w.engine.entry(posted.id_typed())?.status(), JournalStatus::Reversed);

    assert_eq!(w.chart.account(salary_expense)?.current_balance(), Decimal::ZERO);
    assert_eq!(w.chart.account(salary_payable)?.current_balance(), Decimal::ZERO);

    let tb = w.reports.trial_balance(w.company, date(2025, 4, 30))?;
    assert!(tb.is_balanced());
    assert_eq!(tb.total_debit, Decimal::ZERO);

    // But as of the 19th the original entry still stands.
    assert_eq!(
        w.reports.balance_as_of(salary_expense, date(2025, 4, 19))?,
        dec!(50000)
    );
    Ok(())
}

#[test]
fn closed_period_rejects_postings_end_to_end() -> Result<()> {
    let w = World::new()?;
    let cash = w.account("1000", "Cash", AccountType::Asset)?;
    let sales = w.account("4100", "Sales", AccountType::Income)?;

    let april = w.engine.current_period(w.company, Some(date(2025, 4, 10)))?;
    w.periods.close_period(april.id_typed(), w.actor)?;

    let err = w
        .post_pair(date(2025, 4, 10), cash, sales, dec!(100), "late sale")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<JournalError>(),
        Some(JournalError::PeriodClosed { .. })
    ));

    // May is still open and carries the books forward.
    w.post_pair(date(2025, 5, 3), cash, sales, dec!(100), "may sale")?;
    let tb = w.reports.trial_balance(w.company, date(2025, 5, 31))?;
    assert!(tb.is_balanced());
    assert_eq!(tb.total_debit, dec!(100));
    Ok(())
}

#[test]
fn foreign_invoice_booked_at_converted_amount() -> Result<()> {
    let w = World::new()?;
    let receivable = w.account("1210", "Trade Receivables", AccountType::Asset)?;
    let export_sales = w.account("4110", "Export Sales", AccountType::Income)?;

    let inr = CurrencyCode::new("INR")?;
    let usd = CurrencyCode::new("USD")?;
    let fx = CurrencyService::new();
    fx.register_currency(Currency::new(inr.clone(), "Indian Rupee", "₹", 2))?;
    fx.register_currency(Currency::new(usd.clone(), "US Dollar", "$", 2))?;
    fx.set_base(&inr)?;
    fx.upsert_rate(&usd, &inr, dec!(83.20), date(2025, 4, 10), RateSource::Manual)?;

    // Invoice USD 1,000 on the 15th; the 10th's rate is the latest known.
    let conversion = fx.convert(dec!(1000), &usd, &inr, Some(date(2025, 4, 15)))?;
    assert_eq!(conversion.amount, dec!(83200.00));
    assert_eq!(conversion.rate_date, date(2025, 4, 10));

    let entry = w.post_pair(
        date(2025, 4, 15),
        receivable,
        export_sales,
        conversion.amount,
        "export invoice USD 1000",
    )?;
    assert_eq!(entry.total_debit(), dec!(83200.00));

    // Track the open position and settle it at a better rate.
    let txn = fx.open_forex_transaction(
        "journal_entry",
        Uuid::from(entry.id_typed()),
        &usd,
        dec!(1000),
        conversion.rate,
    )?;
    let settled = fx.settle_forex_transaction(txn.id_typed(), date(2025, 4, 25), dec!(83.65))?;
    assert_eq!(settled.forex_gain_loss(), Some(dec!(450.00)));
    assert_eq!(
        fx.realized_forex(date(2025, 4, 1), date(2025, 4, 30))?,
        dec!(450.00)
    );

    let tb = w.reports.trial_balance(w.company, date(2025, 4, 30))?;
    assert!(tb.is_balanced());
    Ok(())
}
