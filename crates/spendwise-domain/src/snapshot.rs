use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Account, Budget, Category, ModelError, Transaction};

/// Immutable view of the ledger that every aggregation reads from.
///
/// `version` increases on every mutation so derived caches can key on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn active_budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter().filter(|budget| budget.is_active)
    }

    /// Runs per-entity validation; the first failure wins.
    pub fn validate(&self) -> Result<(), ModelError> {
        for account in &self.accounts {
            account.validate()?;
        }
        for category in &self.categories {
            category.validate()?;
        }
        for transaction in &self.transactions {
            transaction.validate()?;
        }
        for budget in &self.budgets {
            budget.validate()?;
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
