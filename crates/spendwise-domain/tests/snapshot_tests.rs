use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use spendwise_domain::{
    Account, AccountKind, Budget, BudgetKind, BudgetScope, Category, LedgerSnapshot, ModelError,
    Transaction, TransactionKind,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn add_operations_bump_version() {
    let mut snapshot = LedgerSnapshot::new();
    let account = snapshot.add_account(Account::new("Checking", AccountKind::Bank));
    let category = snapshot.add_category(Category::new("Groceries"));
    snapshot.add_transaction(Transaction::expense(
        account,
        category,
        sample_date(2024, 3, 4),
        dec!(42.10),
    ));

    assert_eq!(snapshot.version, 3);
    assert_eq!(snapshot.account(account).map(|a| a.name.as_str()), Some("Checking"));
    assert!(snapshot.category(category).is_some());
}

#[test]
fn snapshot_reads_wire_format() {
    let account_id = "5b0d3c3a-8f2b-4c55-9f3d-1b5a0f6f4a01";
    let category_id = "0a4f1a2e-33b8-4d0e-8d5c-7f1c2e9d6b02";
    let raw = json!({
        "version": 7,
        "accounts": [
            { "id": account_id, "name": "Wallet", "type": "CREDIT_CARD", "balance": "120.50" }
        ],
        "categories": [
            { "id": category_id, "name": "Dining", "color": "#FF5500", "isDefault": true }
        ],
        "transactions": [
            {
                "id": "c7d9e2b1-1a2b-4c3d-8e9f-0a1b2c3d4e05",
                "amount": 18.75,
                "type": "EXPENSE",
                "transactionDate": "2024-02-29",
                "categoryId": category_id,
                "accountId": account_id,
                "description": "Lunch"
            }
        ],
        "budgets": [
            {
                "id": "9e8d7c6b-5a49-4382-9170-6f5e4d3c2b06",
                "amount": 300,
                "type": "MONTHLY",
                "startDate": "2024-01-01",
                "scope": { "kind": "category", "categoryId": category_id },
                "alertThreshold": 75
            }
        ]
    });

    let snapshot: LedgerSnapshot = serde_json::from_value(raw).expect("snapshot parses");
    assert_eq!(snapshot.version, 7);
    assert_eq!(snapshot.accounts[0].kind, AccountKind::CreditCard);
    assert_eq!(snapshot.accounts[0].balance, dec!(120.50));
    assert!(snapshot.accounts[0].is_active);
    assert!(snapshot.categories[0].is_default);

    let txn = &snapshot.transactions[0];
    assert_eq!(txn.kind, TransactionKind::Expense);
    assert_eq!(txn.amount, dec!(18.75));
    assert_eq!(txn.signed_amount(), dec!(-18.75));
    assert_eq!(txn.transaction_date, sample_date(2024, 2, 29));

    let budget = &snapshot.budgets[0];
    assert_eq!(budget.kind, BudgetKind::Monthly);
    assert_eq!(budget.alert_threshold, 75);
    assert_eq!(budget.category_id(), Some(txn.category_id));
    assert!(snapshot.validate().is_ok());
}

#[test]
fn validate_reports_first_invalid_entity() {
    let mut snapshot = LedgerSnapshot::new();
    let account = snapshot.add_account(Account::new("Checking", AccountKind::Bank));
    let category = snapshot.add_category(Category::new("Rent"));
    let txn = Transaction::new(
        account,
        category,
        TransactionKind::Income,
        sample_date(2024, 1, 1),
        dec!(0),
    );
    let txn_id = snapshot.add_transaction(txn);
    snapshot.add_budget(Budget::new(
        dec!(-5),
        BudgetKind::Weekly,
        sample_date(2024, 1, 1),
        BudgetScope::TotalExpenses,
    ));

    assert_eq!(
        snapshot.validate(),
        Err(ModelError::NonPositiveAmount {
            transaction_id: txn_id
        })
    );
}
