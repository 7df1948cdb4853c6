use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use tracing::{info, warn};

use artha_core::{AccountId, AggregateRoot, CompanyId, DomainError, ExpectedVersion};

use crate::account::{Account, NewAccount, UpdateAccount};
use crate::error::AccountError;

/// Upper bound on parent-chain walks; a chain longer than this is treated
/// as a cycle regardless.
const MAX_TREE_DEPTH: usize = 32;

#[derive(Debug, Default)]
struct ChartState {
    /// Arena keyed by id; the tree is expressed through `parent_id` only.
    accounts: HashMap<AccountId, Account>,
    code_index: HashMap<(CompanyId, String), AccountId>,
}

/// One account's share of a posting, applied atomically with the rest of
/// the entry under the optimistic version check captured at validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEffect {
    pub account_id: AccountId,
    pub expected_version: ExpectedVersion,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Company-scoped account registry.
#[derive(Debug, Default)]
pub struct ChartOfAccounts {
    state: RwLock<ChartState>,
}

fn poisoned() -> AccountError {
    AccountError::Domain(DomainError::invariant("chart lock poisoned"))
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&self, input: NewAccount) -> Result<Account, AccountError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let key = (input.company_id, input.code.clone());
        if state.code_index.contains_key(&key) {
            return Err(AccountError::DuplicateCode {
                code: input.code.clone(),
            });
        }
        if let Some(parent_id) = input.parent_id {
            let parent = state
                .accounts
                .get(&parent_id)
                .ok_or(AccountError::InvalidParent)?;
            if parent.company_id() != input.company_id {
                return Err(AccountError::InvalidParent);
            }
            Self::guard_depth(&state, parent_id, &input.code)?;
        }

        let account = Account::create(input);
        info!(code = account.code(), account = %account.id_typed(), "account created");
        state.code_index.insert(key, account.id_typed());
        state.accounts.insert(account.id_typed(), account.clone());
        Ok(account)
    }

    pub fn account(&self, id: AccountId) -> Result<Account, AccountError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| AccountError::not_found_id(id))
    }

    pub fn account_by_code(&self, company: CompanyId, code: &str) -> Result<Account, AccountError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .code_index
            .get(&(company, code.to_string()))
            .and_then(|id| state.accounts.get(id))
            .cloned()
            .ok_or_else(|| AccountError::not_found_code(code))
    }

    /// All accounts of a company, ordered by code.
    pub fn accounts_for_company(&self, company: CompanyId) -> Result<Vec<Account>, AccountError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.company_id() == company)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(accounts)
    }

    pub fn update_account(
        &self,
        id: AccountId,
        patch: UpdateAccount,
    ) -> Result<Account, AccountError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let account = state
            .accounts
            .get(&id)
            .ok_or_else(|| AccountError::not_found_id(id))?;
        if account.is_system() {
            return Err(AccountError::SystemAccountLocked {
                code: account.code().to_string(),
            });
        }
        let company = account.company_id();
        let code = account.code().to_string();

        if let Some(new_parent) = patch.parent_id {
            if let Some(parent_id) = new_parent {
                let parent = state
                    .accounts
                    .get(&parent_id)
                    .ok_or(AccountError::InvalidParent)?;
                if parent.company_id() != company {
                    return Err(AccountError::InvalidParent);
                }
                Self::guard_cycle(&state, id, parent_id, &code)?;
            }
            if let Some(account) = state.accounts.get_mut(&id) {
                account.set_parent(new_parent);
            }
        }
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::not_found_id(id))?;
        if let Some(name) = patch.name {
            account.set_name(name);
        }
        if let Some(sub_type) = patch.sub_type {
            account.set_sub_type(sub_type);
        }
        Ok(account.clone())
    }

    /// Deactivate an account. Accounts with posted history are never hard
    /// deleted; this is the only removal there is.
    pub fn deactivate(&self, id: AccountId) -> Result<Account, AccountError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::not_found_id(id))?;
        if account.is_system() {
            return Err(AccountError::SystemAccountLocked {
                code: account.code().to_string(),
            });
        }
        account.set_active(false);
        info!(code = account.code(), "account deactivated");
        Ok(account.clone())
    }

    pub fn reactivate(&self, id: AccountId) -> Result<Account, AccountError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::not_found_id(id))?;
        account.set_active(true);
        Ok(account.clone())
    }

    /// Apply the balance effects of one posted journal entry.
    ///
    /// This is the single-writer seam of the chart: only the journal
    /// engine's posting transition calls it. All effects are verified
    /// (existence + optimistic version) before any is applied, in sorted
    /// account-id order, under one write guard, all or none.
    pub fn apply_posting_effects(&self, effects: &[PostingEffect]) -> Result<(), AccountError> {
        let mut effects: Vec<PostingEffect> = effects.to_vec();
        effects.sort_by_key(|e| e.account_id);

        let mut state = self.state.write().map_err(|_| poisoned())?;
        for effect in &effects {
            let account = state
                .accounts
                .get(&effect.account_id)
                .ok_or_else(|| AccountError::not_found_id(effect.account_id))?;
            if let Err(e) = effect.expected_version.check(account.version()) {
                warn!(account = %effect.account_id, "posting effect rejected by version check");
                return Err(e.into());
            }
        }
        for effect in &effects {
            if let Some(account) = state.accounts.get_mut(&effect.account_id) {
                account.apply_posting(effect.debit, effect.credit);
            }
        }
        Ok(())
    }

    fn guard_depth(state: &ChartState, mut cursor: AccountId, code: &str) -> Result<(), AccountError> {
        for _ in 0..MAX_TREE_DEPTH {
            match state.accounts.get(&cursor).and_then(|a| a.parent_id()) {
                Some(next) => cursor = next,
                None => return Ok(()),
            }
        }
        Err(AccountError::TreeCycle {
            code: code.to_string(),
        })
    }

    /// Walk up from `parent_id`; finding `account_id` on the chain (or
    /// exhausting the depth bound) means the re-parent would create a cycle.
    fn guard_cycle(
        state: &ChartState,
        account_id: AccountId,
        parent_id: AccountId,
        code: &str,
    ) -> Result<(), AccountError> {
        let mut cursor = Some(parent_id);
        for _ in 0..MAX_TREE_DEPTH {
            match cursor {
                Some(id) if id == account_id => {
                    return Err(AccountError::TreeCycle {
                        code: code.to_string(),
                    })
                }
                Some(id) => cursor = state.accounts.get(&id).and_then(|a| a.parent_id()),
                None => return Ok(()),
            }
        }
        Err(AccountError::TreeCycle {
            code: code.to_string(),
        })
    }
}
