//! Composes aggregation and budget evaluation into client-facing report shapes.

use std::sync::Arc;

use chrono::NaiveDate;
use spendwise_domain::{
    AccountSpend, Budget, BudgetStatus, CategorySpend, DashboardReport, LedgerSnapshot,
    MonthlySpend, NamedEntity, Period,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    AggregateCache, Bucket, BucketKey, BudgetEvaluator, CoreError, Flow, GroupBy, PeriodResolver,
    SnapshotIndex, SpendAggregator,
};

/// Read-only report builder over one verified snapshot.
///
/// Category and account breakdowns and the monthly trend report expense
/// magnitudes as positive numbers.
pub struct ReportAssembler<'a> {
    snapshot: &'a LedgerSnapshot,
    index: SnapshotIndex<'a>,
    cache: Option<&'a AggregateCache>,
}

impl<'a> ReportAssembler<'a> {
    /// Indexes and verifies `snapshot`. Dangling references fail with `NotFound`,
    /// invalid values (such as a non-positive transaction amount) with `Validation`.
    pub fn new(snapshot: &'a LedgerSnapshot) -> Result<Self, CoreError> {
        let index = SnapshotIndex::build(snapshot);
        index.verify(snapshot)?;
        snapshot.validate().map_err(|err| {
            warn!(version = snapshot.version, error = %err, "snapshot holds invalid values");
            CoreError::from(err)
        })?;
        Ok(Self {
            snapshot,
            index,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: &'a AggregateCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build_dashboard(&self, range: Period) -> Result<DashboardReport, CoreError> {
        let total_income = SpendAggregator::total(&self.snapshot.transactions, range, Flow::Income);
        let total_expenses =
            SpendAggregator::total(&self.snapshot.transactions, range, Flow::Expense);
        Ok(DashboardReport {
            total_income,
            total_expenses,
            net_amount: total_income - total_expenses,
            category_spending: self.build_category_breakdown(range)?,
            monthly_trend: self.build_monthly_trend(range)?,
        })
    }

    pub fn build_category_breakdown(&self, range: Period) -> Result<Vec<CategorySpend>, CoreError> {
        self.aggregate(range, GroupBy::Category)
            .iter()
            .filter_map(|bucket| match bucket.key {
                BucketKey::Category(id) => Some((id, bucket)),
                _ => None,
            })
            .map(|(id, bucket)| {
                Ok(CategorySpend {
                    name: self.index.category(id)?.name().to_owned(),
                    amount: bucket.total,
                })
            })
            .collect()
    }

    pub fn build_account_breakdown(&self, range: Period) -> Result<Vec<AccountSpend>, CoreError> {
        self.aggregate(range, GroupBy::Account)
            .iter()
            .filter_map(|bucket| match bucket.key {
                BucketKey::Account(id) => Some((id, bucket)),
                _ => None,
            })
            .map(|(id, bucket)| {
                Ok(AccountSpend {
                    name: self.index.account(id)?.name().to_owned(),
                    amount: bucket.total,
                })
            })
            .collect()
    }

    pub fn build_monthly_trend(&self, range: Period) -> Result<Vec<MonthlySpend>, CoreError> {
        Ok(self
            .aggregate(range, GroupBy::Month)
            .iter()
            .filter_map(|bucket| match bucket.key {
                BucketKey::Month(month) => Some(MonthlySpend {
                    month,
                    amount: bucket.total,
                }),
                _ => None,
            })
            .collect())
    }

    /// Every active budget whose first window has begun by `reference`, newest start first.
    pub fn build_budget_status_list(
        &self,
        reference: NaiveDate,
    ) -> Result<Vec<BudgetStatus>, CoreError> {
        self.statuses_where(reference, |_| true)
    }

    /// Like [`build_budget_status_list`](Self::build_budget_status_list), restricted
    /// to budgets scoped to `category_id`.
    pub fn build_budget_statuses_for_category(
        &self,
        category_id: Uuid,
        reference: NaiveDate,
    ) -> Result<Vec<BudgetStatus>, CoreError> {
        self.index.category(category_id)?;
        self.statuses_where(reference, |budget| {
            budget.category_id() == Some(category_id)
        })
    }

    fn statuses_where(
        &self,
        reference: NaiveDate,
        include: impl Fn(&Budget) -> bool,
    ) -> Result<Vec<BudgetStatus>, CoreError> {
        let mut budgets = Vec::new();
        for budget in self.snapshot.active_budgets().filter(|b| include(b)) {
            if PeriodResolver::first_window(budget)?.start_date <= reference {
                budgets.push(budget);
            }
        }
        budgets.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        let statuses = budgets
            .into_iter()
            .map(|budget| BudgetEvaluator::evaluate(budget, &self.snapshot.transactions, reference))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            reference = %reference,
            budgets = statuses.len(),
            "assembled budget statuses"
        );
        Ok(statuses)
    }

    fn aggregate(&self, range: Period, group_by: GroupBy) -> Arc<Vec<Bucket>> {
        match self.cache {
            Some(cache) => cache.aggregate(self.snapshot, range, group_by, Flow::Expense),
            None => Arc::new(SpendAggregator::aggregate(
                &self.snapshot.transactions,
                range,
                group_by,
                Flow::Expense,
            )),
        }
    }
}
