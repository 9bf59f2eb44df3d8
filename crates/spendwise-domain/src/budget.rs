use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

const DEFAULT_ALERT_THRESHOLD: u8 = 80;

/// A spending limit over a recurring or fixed period.
///
/// For weekly, monthly and yearly budgets `start_date` anchors the first window and
/// `end_date` is informational; custom budgets use exactly `[start_date, end_date]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: BudgetKind,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub scope: BudgetScope,
    #[serde(default = "Budget::default_alert_threshold")]
    pub alert_threshold: u8,
    #[serde(default = "Budget::default_active")]
    pub is_active: bool,
}

impl Budget {
    pub fn new(amount: Decimal, kind: BudgetKind, start_date: NaiveDate, scope: BudgetScope) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            start_date,
            end_date: None,
            scope,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            is_active: true,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_alert_threshold(mut self, threshold: u8) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn category_id(&self) -> Option<Uuid> {
        match self.scope {
            BudgetScope::Category { category_id } => Some(category_id),
            BudgetScope::TotalExpenses => None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.amount < Decimal::ZERO {
            return Err(ModelError::NegativeBudgetAmount { budget_id: self.id });
        }
        if !(1..=100).contains(&self.alert_threshold) {
            return Err(ModelError::AlertThresholdOutOfRange {
                budget_id: self.id,
                value: self.alert_threshold,
            });
        }
        match self.end_date {
            None if self.kind == BudgetKind::Custom => {
                return Err(ModelError::MissingEndDate { budget_id: self.id })
            }
            Some(end) if end < self.start_date => {
                return Err(ModelError::EndBeforeStart { budget_id: self.id })
            }
            _ => {}
        }
        Ok(())
    }

    pub fn default_alert_threshold() -> u8 {
        DEFAULT_ALERT_THRESHOLD
    }

    fn default_active() -> bool {
        true
    }
}

/// Budget cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetKind {
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetKind::Weekly => "Weekly",
            BudgetKind::Monthly => "Monthly",
            BudgetKind::Yearly => "Yearly",
            BudgetKind::Custom => "Custom",
        };
        f.write_str(label)
    }
}

/// What a budget counts against: one category, or every expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetScope {
    Category {
        #[serde(rename = "categoryId")]
        category_id: Uuid,
    },
    #[serde(rename = "total")]
    TotalExpenses,
}
