use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use artha_core::{CompanyId, Entity, FinancialYearId, UserId};

/// A company's financial year: a 12-month date range.
///
/// `is_closed` is a one-way transition; once closed, no period under the
/// year accepts postings (enforced by the journal engine's gate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialYear {
    id: FinancialYearId,
    company_id: CompanyId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_closed: bool,
    closed_at: Option<DateTime<Utc>>,
    closed_by: Option<UserId>,
}

impl FinancialYear {
    pub(crate) fn create(
        company_id: CompanyId,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: FinancialYearId::new(),
            company_id,
            name,
            start_date,
            end_date,
            is_closed: false,
            closed_at: None,
            closed_by: None,
        }
    }

    pub(crate) fn close(&mut self, actor: UserId) {
        self.is_closed = true;
        self.closed_at = Some(Utc::now());
        self.closed_by = Some(actor);
    }

    pub fn id_typed(&self) -> FinancialYearId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
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

    pub fn is_closed(&self) -> bool {
        self.is_closed
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

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }
}

impl Entity for FinancialYear {
    type Id = FinancialYearId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
