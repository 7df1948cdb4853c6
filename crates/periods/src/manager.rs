use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::info;

use artha_core::{CompanyId, DomainError, FinancialYearId, PeriodId, UserId};

use crate::error::PeriodError;
use crate::period::AccountingPeriod;
use crate::year::FinancialYear;

#[derive(Debug, Default)]
struct PeriodState {
    years: HashMap<FinancialYearId, FinancialYear>,
    periods: HashMap<PeriodId, AccountingPeriod>,
}

/// A period resolved for a posting date, together with the year-level gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub period: AccountingPeriod,
    pub year_closed: bool,
}

impl ResolvedPeriod {
    /// True when the journal engine may post into this period.
    pub fn accepts_postings(&self) -> bool {
        self.period.is_open() && !self.year_closed
    }
}

/// Registry and lifecycle for financial years and their periods.
#[derive(Debug, Default)]
pub struct PeriodManager {
    state: RwLock<PeriodState>,
}

fn poisoned() -> PeriodError {
    PeriodError::Domain(DomainError::invariant("period store lock poisoned"))
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

impl PeriodManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a financial year starting at `start_date` and generate its
    /// twelve contiguous monthly periods.
    pub fn create_financial_year(
        &self,
        company: CompanyId,
        name: impl Into<String>,
        start_date: NaiveDate,
    ) -> Result<(FinancialYear, Vec<AccountingPeriod>), PeriodError> {
        let end_date = start_date
            .checked_add_months(Months::new(12))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .ok_or_else(|| DomainError::validation("financial year end date out of range"))?;

        let mut state = self.state.write().map_err(|_| poisoned())?;
        if let Some(existing) = state
            .years
            .values()
            .find(|y| y.company_id() == company && y.overlaps(start_date, end_date))
        {
            return Err(PeriodError::OverlappingYear {
                start: start_date,
                existing: existing.name().to_string(),
            });
        }

        let year = FinancialYear::create(company, name.into(), start_date, end_date);
        let mut periods = Vec::with_capacity(12);
        for number in 1..=12u8 {
            let period_start = start_date
                .checked_add_months(Months::new(u32::from(number) - 1))
                .ok_or_else(|| DomainError::validation("period start out of range"))?;
            let period_end = start_date
                .checked_add_months(Months::new(u32::from(number)))
                .and_then(|d| d.checked_sub_days(Days::new(1)))
                .ok_or_else(|| DomainError::validation("period end out of range"))?;
            let period = AccountingPeriod::create(
                year.id_typed(),
                company,
                number,
                month_label(period_start),
                period_start,
                period_end,
            );
            periods.push(period);
        }

        info!(year = year.name(), %company, "financial year created with 12 periods");
        for period in &periods {
            state.periods.insert(period.id_typed(), period.clone());
        }
        state.years.insert(year.id_typed(), year.clone());
        Ok((year, periods))
    }

    pub fn year(&self, id: FinancialYearId) -> Result<FinancialYear, PeriodError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .years
            .get(&id)
            .cloned()
            .ok_or(PeriodError::YearNotFound(id))
    }

    pub fn period(&self, id: PeriodId) -> Result<AccountingPeriod, PeriodError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .periods
            .get(&id)
            .cloned()
            .ok_or(PeriodError::PeriodNotFound(id))
    }

    pub fn periods_for_year(
        &self,
        year: FinancialYearId,
    ) -> Result<Vec<AccountingPeriod>, PeriodError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let mut periods: Vec<AccountingPeriod> = state
            .periods
            .values()
            .filter(|p| p.financial_year_id() == year)
            .cloned()
            .collect();
        periods.sort_by_key(|p| p.period_number());
        Ok(periods)
    }

    /// Close a period. Monotonic; does not post adjusting entries.
    pub fn close_period(
        &self,
        id: PeriodId,
        actor: UserId,
    ) -> Result<AccountingPeriod, PeriodError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let period = state
            .periods
            .get_mut(&id)
            .ok_or(PeriodError::PeriodNotFound(id))?;
        if !period.is_open() {
            return Err(PeriodError::AlreadyClosed);
        }
        period.close(actor);
        info!(period = period.name(), %actor, "accounting period closed");
        Ok(period.clone())
    }

    /// Close a financial year and every still-open period under it.
    /// One-way; retained-earnings roll-forward is the caller's concern.
    pub fn close_year(&self, id: FinancialYearId, actor: UserId) -> Result<FinancialYear, PeriodError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let year = state.years.get_mut(&id).ok_or(PeriodError::YearNotFound(id))?;
        if year.is_closed() {
            return Err(PeriodError::AlreadyClosed);
        }
        year.close(actor);
        let year = year.clone();
        for period in state
            .periods
            .values_mut()
            .filter(|p| p.financial_year_id() == id && p.is_open())
        {
            period.close(actor);
        }
        info!(year = year.name(), %actor, "financial year closed");
        Ok(year)
    }

    /// Resolve the open period containing `date` (default today), skipping
    /// periods whose parent year is closed. "Current" derives from date
    /// ranges, never from a stored flag.
    pub fn current_period(
        &self,
        company: CompanyId,
        date: Option<NaiveDate>,
    ) -> Result<AccountingPeriod, PeriodError> {
        let date = date.unwrap_or_else(today);
        let resolved = self.resolve(company, date)?;
        if resolved.accepts_postings() {
            Ok(resolved.period)
        } else {
            Err(PeriodError::NoCurrentPeriod(date))
        }
    }

    /// Resolve whichever period contains `date`, open or not, so callers
    /// (the journal engine's gate) can report the period's actual state.
    pub fn resolve(&self, company: CompanyId, date: NaiveDate) -> Result<ResolvedPeriod, PeriodError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let period = state
            .periods
            .values()
            .find(|p| p.company_id() == company && p.contains(date))
            .cloned()
            .ok_or(PeriodError::NoCurrentPeriod(date))?;
        let year_closed = state
            .years
            .get(&period.financial_year_id())
            .map(|y| y.is_closed())
            .unwrap_or(false);
        Ok(ResolvedPeriod {
            period,
            year_closed,
        })
    }
}

fn month_label(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}
