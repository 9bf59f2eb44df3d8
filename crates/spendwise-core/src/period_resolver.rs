//! Resolves the concrete window a budget is evaluated against.

use chrono::{Datelike, Duration, NaiveDate};
use spendwise_domain::{days_in_month, Budget, BudgetKind, Period, YearMonth};

use crate::CoreError;

const DAYS_PER_WEEK: i64 = 7;

/// Maps a budget and a reference date to the inclusive window containing that date.
///
/// Recurring budgets never resolve to a window before their first one: a reference
/// date earlier than `start_date` yields the first window. Custom budgets always
/// resolve to `[start_date, end_date]` regardless of the reference date.
pub struct PeriodResolver;

impl PeriodResolver {
    pub fn resolve(budget: &Budget, reference: NaiveDate) -> Result<Period, CoreError> {
        match budget.kind {
            BudgetKind::Weekly => weekly_window(budget, reference),
            BudgetKind::Monthly => monthly_window(budget, reference),
            BudgetKind::Yearly => yearly_window(budget, reference),
            BudgetKind::Custom => custom_window(budget),
        }
    }

    /// The earliest window the budget covers.
    pub fn first_window(budget: &Budget) -> Result<Period, CoreError> {
        Self::resolve(budget, budget.start_date)
    }
}

fn weekly_window(budget: &Budget, reference: NaiveDate) -> Result<Period, CoreError> {
    let anchor = budget.start_date;
    let steps = (reference - anchor).num_days().div_euclid(DAYS_PER_WEEK).max(0);
    let start = anchor
        .checked_add_signed(Duration::days(steps * DAYS_PER_WEEK))
        .ok_or_else(|| out_of_range(budget))?;
    let end = start
        .checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))
        .ok_or_else(|| out_of_range(budget))?;
    Ok(Period {
        start_date: start,
        end_date: end,
    })
}

fn monthly_window(budget: &Budget, reference: NaiveDate) -> Result<Period, CoreError> {
    let anchor = budget.start_date;
    let steps = month_index(reference) - month_index(anchor);
    let first_of_anchor = anchor.with_day(1).ok_or_else(|| out_of_range(budget))?;
    let start = shift_month(first_of_anchor, steps.max(0)).ok_or_else(|| out_of_range(budget))?;
    Period::month(YearMonth::of(start)).ok_or_else(|| out_of_range(budget))
}

fn yearly_window(budget: &Budget, reference: NaiveDate) -> Result<Period, CoreError> {
    let anchor = budget.start_date;
    let mut steps = reference.year() - anchor.year();
    let candidate = shift_year(anchor, steps).ok_or_else(|| out_of_range(budget))?;
    if candidate > reference {
        steps -= 1;
    }
    let steps = steps.max(0);
    let start = shift_year(anchor, steps).ok_or_else(|| out_of_range(budget))?;
    let end = shift_year(anchor, steps + 1)
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| out_of_range(budget))?;
    Ok(Period {
        start_date: start,
        end_date: end,
    })
}

fn custom_window(budget: &Budget) -> Result<Period, CoreError> {
    let end = budget.end_date.ok_or_else(|| CoreError::InvalidPeriod {
        budget_id: budget.id,
        reason: "custom budget has no end date".into(),
    })?;
    Period::new(budget.start_date, end).map_err(|err| CoreError::InvalidPeriod {
        budget_id: budget.id,
        reason: err.to_string(),
    })
}

fn out_of_range(budget: &Budget) -> CoreError {
    CoreError::InvalidPeriod {
        budget_id: budget.id,
        reason: "window falls outside the supported calendar".into(),
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub(crate) fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let target = month_index(date) + months;
    let year = target.div_euclid(12);
    let month = target.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `date` by whole years; Feb 29 lands on Feb 28 in non-leap years.
pub(crate) fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
}
