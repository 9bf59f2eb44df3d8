#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use spendwise::domain::{
    Account, AccountKind, Budget, BudgetKind, BudgetScope, Category, LedgerSnapshot, Transaction,
};
use spendwise::utils::persistence::save_snapshot_to_file;

pub const BIN_NAME: &str = "spendwise_cli";

pub fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Checking + card accounts, three categories, January-March 2024 activity and
/// a monthly groceries budget of 500 with 450 spent in March.
pub fn household_snapshot() -> LedgerSnapshot {
    let mut snapshot = LedgerSnapshot::new();
    let checking = snapshot.add_account(Account::new("Checking", AccountKind::Bank));
    let card = snapshot.add_account(Account::new("Visa", AccountKind::CreditCard));
    let groceries = snapshot.add_category(Category::new("Groceries"));
    let dining = snapshot.add_category(Category::new("Dining"));
    let salary = snapshot.add_category(Category::new("Salary").as_default());

    snapshot.add_transaction(Transaction::income(
        checking,
        salary,
        sample_date(2024, 1, 1),
        dec!(3000),
    ));
    snapshot.add_transaction(
        Transaction::expense(checking, groceries, sample_date(2024, 1, 12), dec!(120))
            .with_description("Market"),
    );
    snapshot.add_transaction(Transaction::expense(
        card,
        dining,
        sample_date(2024, 1, 20),
        dec!(45.50),
    ));
    snapshot.add_transaction(Transaction::expense(
        checking,
        groceries,
        sample_date(2024, 3, 2),
        dec!(200),
    ));
    snapshot.add_transaction(Transaction::expense(
        card,
        groceries,
        sample_date(2024, 3, 16),
        dec!(250),
    ));
    snapshot.add_budget(
        Budget::new(
            dec!(500),
            BudgetKind::Monthly,
            sample_date(2024, 1, 1),
            BudgetScope::Category {
                category_id: groceries,
            },
        )
        .with_alert_threshold(80),
    );
    snapshot.add_budget(Budget::new(
        dec!(100),
        BudgetKind::Weekly,
        sample_date(2024, 3, 11),
        BudgetScope::TotalExpenses,
    ));
    snapshot
}

pub fn write_snapshot(dir: &Path, snapshot: &LedgerSnapshot) -> PathBuf {
    let path = dir.join("snapshot.json");
    save_snapshot_to_file(snapshot, &path).expect("save snapshot");
    path
}

/// The CLI binary in script mode with an isolated home directory.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SPENDWISE_CLI_SCRIPT", "1")
        .env("SPENDWISE_HOME", home)
        .env("NO_COLOR", "1");
    cmd
}
