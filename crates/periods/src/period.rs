use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use artha_core::{CompanyId, Entity, FinancialYearId, PeriodId, UserId};

/// One monthly slice of a financial year (`period_number` 1..=12).
///
/// `is_open` gates posting. Closing is monotonic here; an audited reopen
/// belongs to an administrative layer outside this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingPeriod {
    id: PeriodId,
    financial_year_id: FinancialYearId,
    company_id: CompanyId,
    period_number: u8,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_open: bool,
    closed_at: Option<DateTime<Utc>>,
    closed_by: Option<UserId>,
}

impl AccountingPeriod {
    pub(crate) fn create(
        financial_year_id: FinancialYearId,
        company_id: CompanyId,
        period_number: u8,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: PeriodId::new(),
            financial_year_id,
            company_id,
            period_number,
            name,
            start_date,
            end_date,
            is_open: true,
            closed_at: None,
            closed_by: None,
        }
    }

    pub(crate) fn close(&mut self, actor: UserId) {
        self.is_open = false;
        self.closed_at = Some(Utc::now());
        self.closed_by = Some(actor);
    }

    pub fn id_typed(&self) -> PeriodId {
        self.id
    }

    pub fn financial_year_id(&self) -> FinancialYearId {
        self.financial_year_id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn period_number(&self) -> u8 {
        self.period_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn closed_by(&self) -> Option<UserId> {
        self.closed_by
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl Entity for AccountingPeriod {
    type Id = PeriodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
