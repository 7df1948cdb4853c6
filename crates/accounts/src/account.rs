use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use artha_core::{AccountId, AggregateRoot, CompanyId};

/// High-level account type; fixes the natural balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl AccountType {
    /// Debit-normal: asset, expense. Credit-normal: liability, equity, income.
    pub fn natural_side(self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => {
                BalanceSide::Credit
            }
        }
    }

    pub fn is_debit_normal(self) -> bool {
        self.natural_side() == BalanceSide::Debit
    }
}

/// One side of the double entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    Debit,
    Credit,
}

/// Finer-grained classification under [`AccountType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubType {
    CurrentAsset,
    FixedAsset,
    BankAccount,
    Cash,
    Receivable,
    CurrentLiability,
    LongTermLiability,
    Payable,
    DutiesAndTaxes,
    Capital,
    Reserves,
    DirectIncome,
    IndirectIncome,
    DirectExpense,
    IndirectExpense,
}

/// A chart-of-accounts node.
///
/// `current_balance` is a materialized cache of all posted journal-line
/// amounts against this account, expressed on the account's natural side
/// (`opening_balance + Σdebits − Σcredits` for debit-normal accounts, sign
/// convention inverted for credit-normal ones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    company_id: CompanyId,
    code: String,
    name: String,
    account_type: AccountType,
    sub_type: Option<AccountSubType>,
    parent_id: Option<AccountId>,
    opening_balance: Decimal,
    current_balance: Decimal,
    is_system: bool,
    is_active: bool,
    has_postings: bool,
    version: u64,
    created_at: DateTime<Utc>,
}

/// Input for account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub company_id: CompanyId,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: Option<AccountSubType>,
    pub parent_id: Option<AccountId>,
    pub opening_balance: Decimal,
    pub is_system: bool,
}

/// Patch for account updates (None = leave unchanged).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAccount {
    pub name: Option<String>,
    pub sub_type: Option<Option<AccountSubType>>,
    pub parent_id: Option<Option<AccountId>>,
}

impl Account {
    pub(crate) fn create(input: NewAccount) -> Self {
        let opening = input.opening_balance;
        Self {
            id: AccountId::new(),
            company_id: input.company_id,
            code: input.code,
            name: input.name,
            account_type: input.account_type,
            sub_type: input.sub_type,
            parent_id: input.parent_id,
            opening_balance: opening,
            current_balance: opening,
            is_system: input.is_system,
            is_active: true,
            has_postings: false,
            version: 0,
            created_at: Utc::now(),
        }
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn sub_type(&self) -> Option<AccountSubType> {
        self.sub_type
    }

    pub fn parent_id(&self) -> Option<AccountId> {
        self.parent_id
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    pub fn natural_side(&self) -> BalanceSide {
        self.account_type.natural_side()
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn has_postings(&self) -> bool {
        self.has_postings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Natural-side delta of a posted (debit, credit) pair against this
    /// account.
    pub fn signed_effect(&self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.natural_side() {
            BalanceSide::Debit => debit - credit,
            BalanceSide::Credit => credit - debit,
        }
    }

    pub(crate) fn apply_posting(&mut self, debit: Decimal, credit: Decimal) {
        self.current_balance += self.signed_effect(debit, credit);
        self.has_postings = true;
        self.version += 1;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
        self.version += 1;
    }

    pub(crate) fn set_sub_type(&mut self, sub_type: Option<AccountSubType>) {
        self.sub_type = sub_type;
        self.version += 1;
    }

    pub(crate) fn set_parent(&mut self, parent_id: Option<AccountId>) {
        self.parent_id = parent_id;
        self.version += 1;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.version += 1;
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
