use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use artha_core::{
    AccountId, AggregateRoot, CompanyId, JournalEntryId, PartyRef, PeriodId, UserId, ValueObject,
};

use crate::error::JournalError;

/// Journal entry lifecycle. `Reversed` is terminal and only reachable from
/// `Posted`; the approval hop is optional per deployment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalStatus {
    Draft,
    PendingApproval,
    Posted,
    Reversed,
}

/// Link back to the source document in the calling module
/// ("invoice", "vendor_bill", "payroll_run", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub reference_type: String,
    pub reference_id: Uuid,
}

impl ValueObject for SourceRef {}

/// One side of a journal entry.
///
/// Exactly one of `debit_amount`/`credit_amount` is non-zero, and it is
/// strictly positive. Optional tags attribute the line to sub-ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: AccountId,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub description: Option<String>,
    pub cost_center: Option<String>,
    pub department: Option<String>,
    pub project: Option<String>,
    pub party: PartyRef,
}

impl JournalLine {
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit_amount: amount,
            credit_amount: Decimal::ZERO,
            description: None,
            cost_center: None,
            department: None,
            project: None,
            party: PartyRef::None,
        }
    }

    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit_amount: Decimal::ZERO,
            credit_amount: amount,
            description: None,
            cost_center: None,
            department: None,
            project: None,
            party: PartyRef::None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_party(mut self, party: PartyRef) -> Self {
        self.party = party;
        self
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// The exclusive debit/credit invariant.
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.debit_amount < Decimal::ZERO || self.credit_amount < Decimal::ZERO {
            return Err(JournalError::InvalidLine(
                "amounts must not be negative".to_string(),
            ));
        }
        let has_debit = self.debit_amount > Decimal::ZERO;
        let has_credit = self.credit_amount > Decimal::ZERO;
        match (has_debit, has_credit) {
            (true, false) | (false, true) => Ok(()),
            (true, true) => Err(JournalError::InvalidLine(
                "line cannot carry both a debit and a credit".to_string(),
            )),
            (false, false) => Err(JournalError::InvalidLine(
                "line must carry a positive debit or credit".to_string(),
            )),
        }
    }

    /// Swap debit and credit, keeping every tag (used to build reversals).
    pub(crate) fn swapped(&self) -> Self {
        Self {
            account_id: self.account_id,
            debit_amount: self.credit_amount,
            credit_amount: self.debit_amount,
            description: self.description.clone(),
            cost_center: self.cost_center.clone(),
            department: self.department.clone(),
            project: self.project.clone(),
            party: self.party,
        }
    }
}

/// A journal entry: balanced header over at least two lines.
///
/// `total_debit`/`total_credit` are always computed from the lines, never
/// hand-set. Once posted, the entry's lines are immutable; only the status
/// and the reversal link may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    id: JournalEntryId,
    company_id: CompanyId,
    /// Per-company sequence, assigned once at creation, never reused.
    journal_number: u64,
    entry_date: NaiveDate,
    period_id: PeriodId,
    status: JournalStatus,
    lines: Vec<JournalLine>,
    total_debit: Decimal,
    total_credit: Decimal,
    narration: Option<String>,
    source: Option<SourceRef>,
    is_reversed: bool,
    reversal_of: Option<JournalEntryId>,
    reversed_by: Option<JournalEntryId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    approved_by: Option<UserId>,
    approved_at: Option<DateTime<Utc>>,
    posted_by: Option<UserId>,
    posted_at: Option<DateTime<Utc>>,
    version: u64,
}

impl JournalEntry {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draft(
        company_id: CompanyId,
        journal_number: u64,
        entry_date: NaiveDate,
        period_id: PeriodId,
        lines: Vec<JournalLine>,
        narration: Option<String>,
        source: Option<SourceRef>,
        created_by: UserId,
    ) -> Result<Self, JournalError> {
        let (total_debit, total_credit) = Self::validate_lines(&lines)?;
        Ok(Self {
            id: JournalEntryId::new(),
            company_id,
            journal_number,
            entry_date,
            period_id,
            status: JournalStatus::Draft,
            lines,
            total_debit,
            total_credit,
            narration,
            source,
            is_reversed: false,
            reversal_of: None,
            reversed_by: None,
            created_by,
            created_at: Utc::now(),
            approved_by: None,
            approved_at: None,
            posted_by: None,
            posted_at: None,
            version: 0,
        })
    }

    /// Validate the line set and return `(Σdebit, Σcredit)`.
    ///
    /// Monetary equality is exact; there is no tolerance.
    pub fn validate_lines(lines: &[JournalLine]) -> Result<(Decimal, Decimal), JournalError> {
        if lines.len() < 2 {
            return Err(JournalError::InvalidLine(
                "a journal entry needs at least two lines".to_string(),
            ));
        }
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for line in lines {
            line.validate()?;
            total_debit += line.debit_amount;
            total_credit += line.credit_amount;
        }
        if total_debit != total_credit {
            return Err(JournalError::UnbalancedEntry {
                total_debit,
                total_credit,
            });
        }
        Ok((total_debit, total_credit))
    }

    pub(crate) fn submit(&mut self) -> Result<(), JournalError> {
        match self.status {
            JournalStatus::Draft => {
                self.status = JournalStatus::PendingApproval;
                self.version += 1;
                Ok(())
            }
            other => Err(JournalError::InvalidTransition(other)),
        }
    }

    pub(crate) fn approve(&mut self, actor: UserId) -> Result<(), JournalError> {
        match self.status {
            JournalStatus::Draft | JournalStatus::PendingApproval => {
                self.status = JournalStatus::PendingApproval;
                self.approved_by = Some(actor);
                self.approved_at = Some(Utc::now());
                self.version += 1;
                Ok(())
            }
            other => Err(JournalError::InvalidTransition(other)),
        }
    }

    pub(crate) fn mark_posted(&mut self, actor: UserId) -> Result<(), JournalError> {
        match self.status {
            JournalStatus::Draft | JournalStatus::PendingApproval => {
                self.status = JournalStatus::Posted;
                self.posted_by = Some(actor);
                self.posted_at = Some(Utc::now());
                self.version += 1;
                Ok(())
            }
            other => Err(JournalError::InvalidTransition(other)),
        }
    }

    /// Flip to `Reversed`, recording the reversing entry. The lines stay
    /// untouched; history is immutable.
    pub(crate) fn mark_reversed(&mut self, reversed_by: JournalEntryId) -> Result<(), JournalError> {
        if self.is_reversed {
            return Err(JournalError::AlreadyReversed);
        }
        match self.status {
            JournalStatus::Posted => {
                self.status = JournalStatus::Reversed;
                self.is_reversed = true;
                self.reversed_by = Some(reversed_by);
                self.version += 1;
                Ok(())
            }
            other => Err(JournalError::NotPosted(other)),
        }
    }

    pub(crate) fn set_reversal_of(&mut self, original: JournalEntryId) {
        self.reversal_of = Some(original);
    }

    pub fn id_typed(&self) -> JournalEntryId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn journal_number(&self) -> u64 {
        self.journal_number
    }

    /// Voucher-style rendering of the journal number.
    pub fn journal_number_display(&self) -> String {
        format!("JV-{:05}", self.journal_number)
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    pub fn period_id(&self) -> PeriodId {
        self.period_id
    }

    pub fn status(&self) -> JournalStatus {
        self.status
    }

    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    pub fn total_debit(&self) -> Decimal {
        self.total_debit
    }

    pub fn total_credit(&self) -> Decimal {
        self.total_credit
    }

    pub fn narration(&self) -> Option<&str> {
        self.narration.as_deref()
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    pub fn reversal_of(&self) -> Option<JournalEntryId> {
        self.reversal_of
    }

    pub fn reversed_by(&self) -> Option<JournalEntryId> {
        self.reversed_by
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    pub fn posted_by(&self) -> Option<UserId> {
        self.posted_by
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at
    }

    /// Reversal lines: every line with debit/credit swapped.
    pub(crate) fn swapped_lines(&self) -> Vec<JournalLine> {
        self.lines.iter().map(JournalLine::swapped).collect()
    }
}

impl AggregateRoot for JournalEntry {
    type Id = JournalEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft_with(lines: Vec<JournalLine>) -> Result<JournalEntry, JournalError> {
        JournalEntry::draft(
            CompanyId::new(),
            1,
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            PeriodId::new(),
            lines,
            None,
            None,
            UserId::new(),
        )
    }

    #[test]
    fn balanced_draft_computes_totals_from_lines() {
        let a = AccountId::new();
        let b = AccountId::new();
        let entry = draft_with(vec![
            JournalLine::debit(a, dec!(50000)),
            JournalLine::credit(b, dec!(50000)),
        ])
        .unwrap();
        assert_eq!(entry.status(), JournalStatus::Draft);
        assert_eq!(entry.total_debit(), dec!(50000));
        assert_eq!(entry.total_credit(), dec!(50000));
        assert_eq!(entry.journal_number_display(), "JV-00001");
    }

    #[test]
    fn unbalanced_lines_are_rejected_exactly() {
        let err = draft_with(vec![
            JournalLine::debit(AccountId::new(), dec!(100.00)),
            JournalLine::credit(AccountId::new(), dec!(99.99)),
        ])
        .unwrap_err();
        assert!(matches!(err, JournalError::UnbalancedEntry { .. }));
    }

    #[test]
    fn single_line_entry_is_rejected() {
        let err = draft_with(vec![JournalLine::debit(AccountId::new(), dec!(10))]).unwrap_err();
        assert!(matches!(err, JournalError::InvalidLine(_)));
    }

    #[test]
    fn line_must_be_exclusively_debit_or_credit() {
        let mut both = JournalLine::debit(AccountId::new(), dec!(10));
        both.credit_amount = dec!(10);
        assert!(matches!(both.validate(), Err(JournalError::InvalidLine(_))));

        let neither = JournalLine {
            debit_amount: Decimal::ZERO,
            ..JournalLine::debit(AccountId::new(), dec!(10))
        };
        assert!(matches!(neither.validate(), Err(JournalError::InvalidLine(_))));

        let negative = JournalLine::credit(AccountId::new(), dec!(-5));
        assert!(matches!(negative.validate(), Err(JournalError::InvalidLine(_))));
    }

    #[test]
    fn swapped_lines_flip_sides_and_keep_tags() {
        let line = JournalLine::debit(AccountId::new(), dec!(75))
            .with_description("salary")
            .with_cost_center("HR");
        let swapped = line.swapped();
        assert_eq!(swapped.credit_amount, dec!(75));
        assert_eq!(swapped.debit_amount, Decimal::ZERO);
        assert_eq!(swapped.description.as_deref(), Some("salary"));
        assert_eq!(swapped.cost_center.as_deref(), Some("HR"));
    }

    #[test]
    fn terminal_states_refuse_transitions() {
        let a = AccountId::new();
        let b = AccountId::new();
        let mut entry = draft_with(vec![
            JournalLine::debit(a, dec!(10)),
            JournalLine::credit(b, dec!(10)),
        ])
        .unwrap();
        entry.mark_posted(UserId::new()).unwrap();
        assert!(matches!(
            entry.mark_posted(UserId::new()),
            Err(JournalError::InvalidTransition(JournalStatus::Posted))
        ));
        entry.mark_reversed(JournalEntryId::new()).unwrap();
        assert!(matches!(
            entry.mark_reversed(JournalEntryId::new()),
            Err(JournalError::AlreadyReversed)
        ));
        assert!(matches!(
            entry.submit(),
            Err(JournalError::InvalidTransition(JournalStatus::Reversed))
        ));
    }
}
