//! Id lookups over a snapshot and the reference checks run before reporting.

use std::collections::HashMap;

use spendwise_domain::{Account, Category, Identifiable, LedgerSnapshot};
use tracing::warn;
use uuid::Uuid;

use crate::CoreError;

/// Borrowed id → entity maps for one snapshot.
pub struct SnapshotIndex<'a> {
    accounts: HashMap<Uuid, &'a Account>,
    categories: HashMap<Uuid, &'a Category>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn build(snapshot: &'a LedgerSnapshot) -> Self {
        Self {
            accounts: by_id(&snapshot.accounts),
            categories: by_id(&snapshot.categories),
        }
    }

    pub fn account(&self, id: Uuid) -> Result<&'a Account, CoreError> {
        self.accounts
            .get(&id)
            .copied()
            .ok_or(CoreError::NotFound {
                entity: "account",
                id,
            })
    }

    pub fn category(&self, id: Uuid) -> Result<&'a Category, CoreError> {
        self.categories
            .get(&id)
            .copied()
            .ok_or(CoreError::NotFound {
                entity: "category",
                id,
            })
    }

    /// Fails on the first dangling account or category reference.
    pub fn verify(&self, snapshot: &LedgerSnapshot) -> Result<(), CoreError> {
        let result = self.check_references(snapshot);
        if let Err(err) = &result {
            warn!(version = snapshot.version, error = %err, "snapshot failed verification");
        }
        result
    }

    fn check_references(&self, snapshot: &LedgerSnapshot) -> Result<(), CoreError> {
        for txn in &snapshot.transactions {
            self.account(txn.account_id)?;
            self.category(txn.category_id)?;
        }
        for budget in &snapshot.budgets {
            if let Some(category_id) = budget.category_id() {
                self.category(category_id)?;
            }
        }
        Ok(())
    }
}

fn by_id<T: Identifiable>(items: &[T]) -> HashMap<Uuid, &T> {
    items.iter().map(|item| (item.id(), item)).collect()
}

/// Human-readable descriptions of every dangling reference in `snapshot`.
pub fn snapshot_warnings(snapshot: &LedgerSnapshot) -> Vec<String> {
    let index = SnapshotIndex::build(snapshot);
    let mut warnings = Vec::new();

    for txn in &snapshot.transactions {
        if index.account(txn.account_id).is_err() {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        if index.category(txn.category_id).is_err() {
            warnings.push(format!(
                "transaction {} references missing category {}",
                txn.id, txn.category_id
            ));
        }
    }
    for budget in &snapshot.budgets {
        if let Some(category_id) = budget.category_id() {
            if index.category(category_id).is_err() {
                warnings.push(format!(
                    "budget {} references missing category {}",
                    budget.id, category_id
                ));
            }
        }
    }
    warnings
}
