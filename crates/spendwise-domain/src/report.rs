//! Report value types. These are the JSON shapes handed to presentation layers,
//! so field names are camelCase and money goes out as rounded numbers.

use rust_decimal::Decimal;
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::{money, Budget, Period, PeriodPhase, YearMonth};

/// Serializes a `(label, amount)` pair as a two-element JSON array.
fn serialize_pair<S>(label: &str, amount: Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Amount(Decimal);

    impl Serialize for Amount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            money::serialize(&self.0, serializer)
        }
    }

    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(label)?;
    tuple.serialize_element(&Amount(amount))?;
    tuple.end()
}

/// Spend attributed to a single category, labelled by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub name: String,
    pub amount: Decimal,
}

impl Serialize for CategorySpend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_pair(&self.name, self.amount, serializer)
    }
}

/// Spend drawn from a single account, labelled by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSpend {
    pub name: String,
    pub amount: Decimal,
}

impl Serialize for AccountSpend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_pair(&self.name, self.amount, serializer)
    }
}

/// Spend for one calendar month, labelled `yyyy-MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySpend {
    pub month: YearMonth,
    pub amount: Decimal,
}

impl Serialize for MonthlySpend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_pair(&self.month.to_string(), self.amount, serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    #[serde(serialize_with = "money::serialize")]
    pub total_income: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub total_expenses: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub net_amount: Decimal,
    pub category_spending: Vec<CategorySpend>,
    pub monthly_trend: Vec<MonthlySpend>,
}

/// Evaluation of one budget against the window that contains the reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub period: Period,
    pub phase: PeriodPhase,
    #[serde(serialize_with = "money::serialize")]
    pub spent: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub remaining: Decimal,
    /// Spent as a share of the budget amount, rounded to two places. Not clamped.
    #[serde(serialize_with = "money::serialize")]
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub is_near_limit: bool,
}

impl BudgetStatus {
    /// Percentage clamped to `[0, 100]` for progress bars.
    pub fn progress_percent(&self) -> Decimal {
        self.percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}
