//! Shared traits, calendar helpers, and validation errors for ledger primitives.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Validation failures raised by individual ledger values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    NonPositiveAmount { transaction_id: Uuid },
    NegativeBudgetAmount { budget_id: Uuid },
    AlertThresholdOutOfRange { budget_id: Uuid, value: u8 },
    InvalidColor { category_id: Uuid, value: String },
    EmptyName { entity: &'static str, id: Uuid },
    MissingEndDate { budget_id: Uuid },
    EndBeforeStart { budget_id: Uuid },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NonPositiveAmount { transaction_id } => {
                write!(f, "transaction {transaction_id} must have an amount greater than 0")
            }
            ModelError::NegativeBudgetAmount { budget_id } => {
                write!(f, "budget {budget_id} has a negative amount")
            }
            ModelError::AlertThresholdOutOfRange { budget_id, value } => write!(
                f,
                "budget {budget_id} alert threshold {value} is outside 1..=100"
            ),
            ModelError::InvalidColor { category_id, value } => {
                write!(f, "category {category_id} color `{value}` is not a hex color")
            }
            ModelError::EmptyName { entity, id } => write!(f, "{entity} {id} has an empty name"),
            ModelError::MissingEndDate { budget_id } => {
                write!(f, "custom budget {budget_id} requires an end date")
            }
            ModelError::EndBeforeStart { budget_id } => {
                write!(f, "budget {budget_id} ends before it starts")
            }
        }
    }
}

impl std::error::Error for ModelError {}

// Re-export common dependencies so consumers can rely on this crate as a façade.
pub use chrono;
pub use rust_decimal;
pub use uuid;
