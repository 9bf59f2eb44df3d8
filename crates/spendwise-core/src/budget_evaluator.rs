use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_domain::{money, Budget, BudgetScope, BudgetStatus, LedgerSnapshot, Period, Transaction};
use tracing::debug;

use crate::{CoreError, Flow, PeriodResolver, SnapshotIndex, SpendAggregator};

/// Evaluates budgets against the spend recorded in their resolved window.
pub struct BudgetEvaluator;

impl BudgetEvaluator {
    /// Resolves the budget's window around `reference` and measures expense spend in it.
    ///
    /// Income never counts against a budget. A budget with no matching expenses
    /// evaluates to `spent = 0`.
    pub fn evaluate(
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> Result<BudgetStatus, CoreError> {
        let period = PeriodResolver::resolve(budget, reference)?;
        let spent = match budget.scope {
            BudgetScope::Category { category_id } => {
                SpendAggregator::aggregate_known(transactions, period, Flow::Expense, &[category_id])
                    .iter()
                    .map(|bucket| bucket.total)
                    .sum::<Decimal>()
            }
            BudgetScope::TotalExpenses => {
                SpendAggregator::total(transactions, period, Flow::Expense)
            }
        };
        let status = Self::status_from_parts(budget, period, reference, spent);
        debug!(
            budget_id = %budget.id,
            period = %status.period,
            spent = %status.spent,
            percentage = %status.percentage,
            "evaluated budget"
        );
        Ok(status)
    }

    /// Like [`evaluate`](Self::evaluate), but first checks the budget's category
    /// exists in `snapshot`.
    pub fn evaluate_in(
        snapshot: &LedgerSnapshot,
        budget: &Budget,
        reference: NaiveDate,
    ) -> Result<BudgetStatus, CoreError> {
        if let Some(category_id) = budget.category_id() {
            SnapshotIndex::build(snapshot).category(category_id)?;
        }
        Self::evaluate(budget, &snapshot.transactions, reference)
    }

    /// Derives remaining, percentage and alert flags from a measured spend.
    pub fn status_from_parts(
        budget: &Budget,
        period: Period,
        reference: NaiveDate,
        spent: Decimal,
    ) -> BudgetStatus {
        // Alert flags compare the unrounded ratio; only the reported value is rounded.
        let exact = percentage_of(spent, budget.amount);
        BudgetStatus {
            budget: budget.clone(),
            period,
            phase: period.phase(reference),
            spent,
            remaining: budget.amount - spent,
            percentage: money::round(exact),
            is_over_budget: exact > Decimal::ONE_HUNDRED,
            is_near_limit: exact >= Decimal::from(budget.alert_threshold),
        }
    }
}

/// `spent * 100 / amount`, unrounded; zero when `amount` is zero.
fn percentage_of(spent: Decimal, amount: Decimal) -> Decimal {
    if amount.is_zero() {
        return Decimal::ZERO;
    }
    spent
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(amount))
        .unwrap_or(Decimal::ZERO)
}
