//! Plain-text rendering of reports for the shell.

use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use spendwise_config::Config;
use spendwise_domain::{
    AccountSpend, BudgetScope, BudgetStatus, CategorySpend, DashboardReport, LedgerSnapshot,
    MonthlySpend, NamedEntity,
};

const BAR_WIDTH: usize = 20;

/// Formats amounts with the configured currency code and precision.
#[derive(Debug, Clone)]
pub struct AmountFormatter {
    currency: String,
    precision: u32,
}

impl AmountFormatter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            precision: u32::from(config.amount_precision),
        }
    }

    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded =
            amount.round_dp_with_strategy(self.precision, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.precision);
        format!("{} {}", rounded, self.currency)
    }

    pub fn percent(&self, value: Decimal) -> String {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        format!("{rounded}%")
    }
}

/// Column-aligned text table.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(self.headers.clone()).bold().to_string());
        out.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        for row in &self.rows {
            out.push(line(row.iter().map(String::as_str).collect()));
        }
        out.join("\n")
    }
}

/// `[#####...............]`, filled by the clamped progress percentage.
pub fn progress_bar(status: &BudgetStatus) -> String {
    let filled = (status.progress_percent() * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn dashboard(report: &DashboardReport, fmt: &AmountFormatter) -> String {
    let mut totals = Table::new(vec!["Metric", "Amount"]);
    totals.add_row(vec!["Income".into(), fmt.format(report.total_income)]);
    totals.add_row(vec!["Expenses".into(), fmt.format(report.total_expenses)]);
    totals.add_row(vec!["Net".into(), fmt.format(report.net_amount)]);

    [
        totals.render(),
        String::new(),
        category_breakdown(&report.category_spending, fmt),
        String::new(),
        monthly_trend(&report.monthly_trend, fmt),
    ]
    .join("\n")
}

pub fn category_breakdown(rows: &[CategorySpend], fmt: &AmountFormatter) -> String {
    if rows.is_empty() {
        return "No spending in this range.".into();
    }
    let mut table = Table::new(vec!["Category", "Spent"]);
    for row in rows {
        table.add_row(vec![row.name.clone(), fmt.format(row.amount)]);
    }
    table.render()
}

pub fn account_breakdown(rows: &[AccountSpend], fmt: &AmountFormatter) -> String {
    if rows.is_empty() {
        return "No spending in this range.".into();
    }
    let mut table = Table::new(vec!["Account", "Spent"]);
    for row in rows {
        table.add_row(vec![row.name.clone(), fmt.format(row.amount)]);
    }
    table.render()
}

pub fn monthly_trend(rows: &[MonthlySpend], fmt: &AmountFormatter) -> String {
    let mut table = Table::new(vec!["Month", "Spent"]);
    for row in rows {
        table.add_row(vec![row.month.to_string(), fmt.format(row.amount)]);
    }
    table.render()
}

pub fn budget_statuses(
    statuses: &[BudgetStatus],
    snapshot: &LedgerSnapshot,
    fmt: &AmountFormatter,
) -> String {
    if statuses.is_empty() {
        return "No active budgets.".into();
    }
    let mut table = Table::new(vec![
        "Budget", "Period", "Phase", "Spent", "Limit", "Remaining", "Used", "Progress", "Alert",
    ]);
    for status in statuses {
        table.add_row(vec![
            budget_label(status, snapshot),
            status.period.to_string(),
            status.phase.to_string(),
            fmt.format(status.spent),
            fmt.format(status.budget.amount),
            fmt.format(status.remaining),
            fmt.percent(status.percentage),
            progress_bar(status),
            alert_label(status),
        ]);
    }
    table.render()
}

fn budget_label(status: &BudgetStatus, snapshot: &LedgerSnapshot) -> String {
    let scope = match status.budget.scope {
        BudgetScope::Category { category_id } => snapshot
            .category(category_id)
            .map(|category| category.name().to_owned())
            .unwrap_or_else(|| category_id.to_string()),
        BudgetScope::TotalExpenses => "All expenses".into(),
    };
    format!("{scope} ({})", status.budget.kind)
}

fn alert_label(status: &BudgetStatus) -> String {
    if status.is_over_budget {
        "OVER".bright_red().to_string()
    } else if status.is_near_limit {
        "NEAR".bright_yellow().to_string()
    } else {
        "ok".to_string()
    }
}
