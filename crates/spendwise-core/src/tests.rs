use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise_domain::{
    Account, AccountKind, Budget, BudgetKind, BudgetScope, Category, LedgerSnapshot, Period,
    PeriodPhase, Transaction, YearMonth,
};
use uuid::Uuid;

use crate::{
    AggregateCache, BucketKey, BudgetEvaluator, CoreError, Flow, GroupBy, ReportAssembler,
    SpendAggregator,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> Period {
    Period::new(start, end).expect("valid range")
}

struct Fixture {
    snapshot: LedgerSnapshot,
    checking: Uuid,
    groceries: Uuid,
    dining: Uuid,
    travel: Uuid,
    salary: Uuid,
}

fn fixture() -> Fixture {
    let mut snapshot = LedgerSnapshot::new();
    let checking = snapshot.add_account(Account::new("Checking", AccountKind::Bank));
    let groceries = snapshot.add_category(Category::new("Groceries"));
    let dining = snapshot.add_category(Category::new("Dining"));
    let travel = snapshot.add_category(Category::new("Travel"));
    let salary = snapshot.add_category(Category::new("Salary").as_default());
    Fixture {
        snapshot,
        checking,
        groceries,
        dining,
        travel,
        salary,
    }
}

impl Fixture {
    fn expense(&mut self, category: Uuid, date: NaiveDate, amount: Decimal) {
        self.snapshot
            .add_transaction(Transaction::expense(self.checking, category, date, amount));
    }

    fn income(&mut self, date: NaiveDate, amount: Decimal) {
        self.snapshot
            .add_transaction(Transaction::income(self.checking, self.salary, date, amount));
    }
}

#[test]
fn monthly_category_budget_near_limit() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 3, 2), dec!(200));
    fx.expense(fx.groceries, sample_date(2024, 3, 18), dec!(250));
    fx.expense(fx.dining, sample_date(2024, 3, 18), dec!(99));
    fx.expense(fx.groceries, sample_date(2024, 2, 28), dec!(500));
    let budget = Budget::new(
        dec!(500),
        BudgetKind::Monthly,
        sample_date(2024, 1, 1),
        BudgetScope::Category {
            category_id: fx.groceries,
        },
    )
    .with_alert_threshold(80);

    let status = BudgetEvaluator::evaluate(&budget, &fx.snapshot.transactions, sample_date(2024, 3, 20))
        .expect("evaluates");

    assert_eq!(status.spent, dec!(450));
    assert_eq!(status.remaining, dec!(50));
    assert_eq!(status.percentage, dec!(90.0));
    assert!(status.is_near_limit);
    assert!(!status.is_over_budget);
    assert_eq!(status.period, range(sample_date(2024, 3, 1), sample_date(2024, 3, 31)));
    assert_eq!(status.phase, PeriodPhase::Current);
}

#[test]
fn total_budget_excludes_income() {
    let mut fx = fixture();
    let day = sample_date(2024, 5, 10);
    fx.expense(fx.groceries, day, dec!(400));
    fx.expense(fx.dining, day, dec!(300));
    fx.expense(fx.travel, day, dec!(500));
    fx.income(day, dec!(300));
    let budget = Budget::new(
        dec!(1000),
        BudgetKind::Monthly,
        sample_date(2024, 5, 1),
        BudgetScope::TotalExpenses,
    );

    let status = BudgetEvaluator::evaluate(&budget, &fx.snapshot.transactions, day).unwrap();

    assert_eq!(status.spent, dec!(1200));
    assert_eq!(status.remaining, dec!(-200));
    assert_eq!(status.percentage, dec!(120.0));
    assert!(status.is_over_budget);
    assert!(status.is_near_limit);
}

#[test]
fn ended_custom_budget_keeps_its_window() {
    let mut fx = fixture();
    fx.expense(fx.travel, sample_date(2024, 1, 15), dec!(320));
    fx.expense(fx.travel, sample_date(2024, 6, 1), dec!(999));
    let budget = Budget::new(
        dec!(400),
        BudgetKind::Custom,
        sample_date(2024, 1, 1),
        BudgetScope::Category {
            category_id: fx.travel,
        },
    )
    .with_end_date(sample_date(2024, 1, 31));

    let status =
        BudgetEvaluator::evaluate(&budget, &fx.snapshot.transactions, sample_date(2024, 6, 1))
            .unwrap();

    assert_eq!(status.period, range(sample_date(2024, 1, 1), sample_date(2024, 1, 31)));
    assert_eq!(status.spent, dec!(320));
    assert_eq!(status.phase, PeriodPhase::Past);
}

#[test]
fn empty_category_is_omitted_from_breakdown_but_evaluates_to_zero() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 4, 3), dec!(80));
    fx.expense(fx.dining, sample_date(2024, 4, 4), dec!(45.50));
    let travel_budget = Budget::new(
        dec!(300),
        BudgetKind::Monthly,
        sample_date(2024, 4, 1),
        BudgetScope::Category {
            category_id: fx.travel,
        },
    );
    fx.snapshot.add_budget(travel_budget.clone());
    let april = range(sample_date(2024, 4, 1), sample_date(2024, 4, 30));

    let reports = ReportAssembler::new(&fx.snapshot).expect("snapshot verifies");
    let breakdown = reports.build_category_breakdown(april).unwrap();
    let names: Vec<&str> = breakdown.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Groceries", "Dining"]);

    let status =
        BudgetEvaluator::evaluate_in(&fx.snapshot, &travel_budget, sample_date(2024, 4, 15))
            .unwrap();
    assert_eq!(status.spent, Decimal::ZERO);
    assert_eq!(status.remaining, dec!(300));
    assert!(!status.is_near_limit);
}

#[test]
fn zero_amount_budget_is_never_over() {
    let mut fx = fixture();
    fx.expense(fx.dining, sample_date(2024, 2, 2), dec!(12));
    let budget = Budget::new(
        Decimal::ZERO,
        BudgetKind::Weekly,
        sample_date(2024, 2, 1),
        BudgetScope::TotalExpenses,
    );

    let status =
        BudgetEvaluator::evaluate(&budget, &fx.snapshot.transactions, sample_date(2024, 2, 3))
            .unwrap();

    assert_eq!(status.percentage, Decimal::ZERO);
    assert!(!status.is_over_budget);
    assert_eq!(status.remaining, dec!(-12));
}

#[test]
fn monthly_grouping_has_no_gaps_and_preserves_sum() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 1, 31), dec!(10.10));
    fx.expense(fx.dining, sample_date(2024, 4, 1), dec!(20.20));
    fx.income(sample_date(2024, 4, 15), dec!(1000));
    fx.expense(fx.dining, sample_date(2023, 12, 31), dec!(5));
    let window = range(sample_date(2024, 1, 15), sample_date(2024, 5, 2));

    let buckets =
        SpendAggregator::aggregate(&fx.snapshot.transactions, window, GroupBy::Month, Flow::Net);

    let months: Vec<BucketKey> = buckets.iter().map(|b| b.key).collect();
    let expected: Vec<BucketKey> = (1..=5)
        .map(|m| BucketKey::Month(YearMonth::new(2024, m).unwrap()))
        .collect();
    assert_eq!(months, expected);
    let sum: Decimal = buckets.iter().map(|b| b.total).sum();
    assert_eq!(sum, SpendAggregator::total(&fx.snapshot.transactions, window, Flow::Net));
    assert_eq!(sum, dec!(969.70));
    assert_eq!(buckets[1].total, Decimal::ZERO);
}

#[test]
fn aggregation_is_idempotent() {
    let mut fx = fixture();
    for day in 1..=28 {
        fx.expense(fx.groceries, sample_date(2024, 2, day), dec!(0.10));
        fx.expense(fx.dining, sample_date(2024, 2, day), dec!(3.33));
    }
    let feb = range(sample_date(2024, 2, 1), sample_date(2024, 2, 29));
    let first =
        SpendAggregator::aggregate(&fx.snapshot.transactions, feb, GroupBy::Category, Flow::Expense);
    let second =
        SpendAggregator::aggregate(&fx.snapshot.transactions, feb, GroupBy::Category, Flow::Expense);

    assert_eq!(first, second);
    assert_eq!(first[0].total, dec!(2.80));
    assert_eq!(first[1].total, dec!(93.24));
}

#[test]
fn aggregate_known_zero_fills_in_caller_order() {
    let mut fx = fixture();
    fx.expense(fx.dining, sample_date(2024, 3, 3), dec!(15));
    let march = range(sample_date(2024, 3, 1), sample_date(2024, 3, 31));
    let known = [fx.travel, fx.dining];

    let buckets = SpendAggregator::aggregate_known(&fx.snapshot.transactions, march, Flow::Expense, &known);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].key, BucketKey::Category(fx.travel));
    assert_eq!(buckets[0].total, Decimal::ZERO);
    assert_eq!(buckets[1].total, dec!(15));
}

#[test]
fn dashboard_totals_cover_full_range() {
    let mut fx = fixture();
    fx.income(sample_date(2024, 1, 1), dec!(2500));
    fx.expense(fx.groceries, sample_date(2024, 1, 5), dec!(120.25));
    fx.expense(fx.dining, sample_date(2024, 2, 9), dec!(60));
    let window = range(sample_date(2024, 1, 1), sample_date(2024, 2, 29));

    let dashboard = ReportAssembler::new(&fx.snapshot)
        .unwrap()
        .build_dashboard(window)
        .unwrap();

    assert_eq!(dashboard.total_income, dec!(2500));
    assert_eq!(dashboard.total_expenses, dec!(180.25));
    assert_eq!(dashboard.net_amount, dec!(2319.75));
    assert_eq!(dashboard.category_spending.len(), 2);
    assert_eq!(dashboard.monthly_trend.len(), 2);
    assert_eq!(dashboard.monthly_trend[0].amount, dec!(120.25));
}

#[test]
fn budget_status_list_orders_by_start_desc_and_skips_inactive_and_future() {
    let mut fx = fixture();
    let older = fx.snapshot.add_budget(Budget::new(
        dec!(100),
        BudgetKind::Monthly,
        sample_date(2023, 6, 1),
        BudgetScope::TotalExpenses,
    ));
    let newer = fx.snapshot.add_budget(Budget::new(
        dec!(50),
        BudgetKind::Weekly,
        sample_date(2024, 3, 4),
        BudgetScope::Category {
            category_id: fx.dining,
        },
    ));
    fx.snapshot.add_budget(
        Budget::new(
            dec!(75),
            BudgetKind::Monthly,
            sample_date(2024, 1, 1),
            BudgetScope::TotalExpenses,
        )
        .deactivated(),
    );
    fx.snapshot.add_budget(Budget::new(
        dec!(75),
        BudgetKind::Yearly,
        sample_date(2025, 1, 1),
        BudgetScope::TotalExpenses,
    ));

    let reports = ReportAssembler::new(&fx.snapshot).unwrap();
    let statuses = reports.build_budget_status_list(sample_date(2024, 3, 10)).unwrap();
    let ids: Vec<Uuid> = statuses.iter().map(|s| s.budget.id).collect();
    assert_eq!(ids, vec![newer, older]);

    let dining_only = reports
        .build_budget_statuses_for_category(fx.dining, sample_date(2024, 3, 10))
        .unwrap();
    assert_eq!(dining_only.len(), 1);
    assert_eq!(dining_only[0].budget.id, newer);
}

#[test]
fn dangling_references_fail_verification() {
    let mut fx = fixture();
    let ghost = Uuid::new_v4();
    fx.expense(ghost, sample_date(2024, 1, 1), dec!(1));

    let err = ReportAssembler::new(&fx.snapshot).err().expect("verification fails");
    assert_eq!(
        err,
        CoreError::NotFound {
            entity: "category",
            id: ghost
        }
    );
}

#[test]
fn unknown_category_scope_is_not_found() {
    let fx = fixture();
    let budget = Budget::new(
        dec!(10),
        BudgetKind::Monthly,
        sample_date(2024, 1, 1),
        BudgetScope::Category {
            category_id: Uuid::new_v4(),
        },
    );
    let err = BudgetEvaluator::evaluate_in(&fx.snapshot, &budget, sample_date(2024, 1, 2))
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "category", .. }));

    let reports = ReportAssembler::new(&fx.snapshot).unwrap();
    assert!(reports
        .build_budget_statuses_for_category(Uuid::new_v4(), sample_date(2024, 1, 2))
        .is_err());
}

#[test]
fn inverted_range_is_a_validation_error() {
    let err: CoreError = Period::new(sample_date(2024, 2, 1), sample_date(2024, 1, 1))
        .unwrap_err()
        .into();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn cached_reports_match_uncached() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 1, 5), dec!(12));
    fx.expense(fx.dining, sample_date(2024, 1, 6), dec!(8));
    let window = range(sample_date(2024, 1, 1), sample_date(2024, 1, 31));
    let cache = AggregateCache::new();

    let plain = ReportAssembler::new(&fx.snapshot).unwrap();
    let cached = ReportAssembler::new(&fx.snapshot).unwrap().with_cache(&cache);

    assert_eq!(
        plain.build_category_breakdown(window).unwrap(),
        cached.build_category_breakdown(window).unwrap()
    );
    assert_eq!(
        cached.build_monthly_trend(window).unwrap(),
        cached.build_monthly_trend(window).unwrap()
    );
    assert_eq!(cache.len(), 2);
}

#[test]
fn alert_flags_use_the_unrounded_ratio() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 7, 3), dec!(1000.01));
    fx.expense(fx.dining, sample_date(2024, 7, 4), dec!(799.96));
    let over = Budget::new(
        dec!(1000),
        BudgetKind::Monthly,
        sample_date(2024, 1, 1),
        BudgetScope::Category {
            category_id: fx.groceries,
        },
    );
    let under = Budget::new(
        dec!(1000),
        BudgetKind::Monthly,
        sample_date(2024, 1, 1),
        BudgetScope::Category {
            category_id: fx.dining,
        },
    )
    .with_alert_threshold(80);
    let reference = sample_date(2024, 7, 20);

    let over_status = BudgetEvaluator::evaluate(&over, &fx.snapshot.transactions, reference).unwrap();
    assert_eq!(over_status.percentage, dec!(100));
    assert_eq!(over_status.remaining, dec!(-0.01));
    assert!(over_status.is_over_budget);

    let under_status =
        BudgetEvaluator::evaluate(&under, &fx.snapshot.transactions, reference).unwrap();
    assert_eq!(under_status.percentage, dec!(80));
    assert!(!under_status.is_near_limit);
    assert!(!under_status.is_over_budget);
}

#[test]
fn non_positive_transaction_amount_is_rejected_before_reporting() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 2, 2), dec!(-50));
    fx.snapshot.add_budget(Budget::new(
        dec!(100),
        BudgetKind::Monthly,
        sample_date(2024, 2, 1),
        BudgetScope::TotalExpenses,
    ));

    let err = ReportAssembler::new(&fx.snapshot).err().expect("invalid amount rejected");
    assert!(matches!(err, CoreError::Validation(_)));

    let mut zero = fixture();
    zero.expense(zero.dining, sample_date(2024, 2, 2), Decimal::ZERO);
    assert!(matches!(
        ReportAssembler::new(&zero.snapshot).err(),
        Some(CoreError::Validation(_))
    ));
}

#[test]
fn monthly_budget_rolls_across_year_boundary() {
    let mut fx = fixture();
    fx.expense(fx.groceries, sample_date(2024, 12, 30), dec!(70));
    fx.expense(fx.groceries, sample_date(2025, 2, 14), dec!(40));
    fx.expense(fx.groceries, sample_date(2025, 3, 1), dec!(15));
    let budget = Budget::new(
        dec!(200),
        BudgetKind::Monthly,
        sample_date(2024, 11, 20),
        BudgetScope::Category {
            category_id: fx.groceries,
        },
    );

    let status =
        BudgetEvaluator::evaluate(&budget, &fx.snapshot.transactions, sample_date(2025, 2, 14))
            .unwrap();

    assert_eq!(status.period, range(sample_date(2025, 2, 1), sample_date(2025, 2, 28)));
    assert_eq!(status.spent, dec!(40));
    assert_eq!(status.percentage, dec!(20));
}
