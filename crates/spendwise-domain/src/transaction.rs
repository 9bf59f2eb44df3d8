use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A single ledger movement. `amount` is always a positive magnitude; the sign
/// comes from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub transaction_date: NaiveDate,
    pub category_id: Uuid,
    pub account_id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        account_id: Uuid,
        category_id: Uuid,
        kind: TransactionKind,
        transaction_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            transaction_date,
            category_id,
            account_id,
            description: String::new(),
            notes: None,
        }
    }

    pub fn expense(
        account_id: Uuid,
        category_id: Uuid,
        transaction_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self::new(
            account_id,
            category_id,
            TransactionKind::Expense,
            transaction_date,
            amount,
        )
    }

    pub fn income(
        account_id: Uuid,
        category_id: Uuid,
        transaction_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self::new(
            account_id,
            category_id,
            TransactionKind::Income,
            transaction_date,
            amount,
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// `+amount` for income, `-amount` for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.amount <= Decimal::ZERO {
            return Err(ModelError::NonPositiveAmount {
                transaction_id: self.id,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}
