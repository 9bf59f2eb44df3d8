//! Groups transaction amounts into ordered buckets over an inclusive date range.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_domain::{Period, Transaction, YearMonth};
use tracing::debug;
use uuid::Uuid;

/// Bucket dimension for [`SpendAggregator::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// First-seen order; categories without matches are omitted.
    Category,
    /// First-seen order; accounts without matches are omitted.
    Account,
    /// Every month of the range, ascending, zero-filled.
    Month,
    /// Every day of the range, ascending, zero-filled.
    Day,
}

/// Which transactions contribute, and with which sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// `+amount` for income, `-amount` for expenses.
    Net,
    /// Expense magnitudes only, positive.
    Expense,
    /// Income magnitudes only, positive.
    Income,
}

impl Flow {
    /// The amount `transaction` contributes under this flow, if any.
    pub fn contribution(self, transaction: &Transaction) -> Option<Decimal> {
        match self {
            Flow::Net => Some(transaction.signed_amount()),
            Flow::Expense => transaction.is_expense().then_some(transaction.amount),
            Flow::Income => transaction.is_income().then_some(transaction.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Category(Uuid),
    Account(Uuid),
    Month(YearMonth),
    Day(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    pub total: Decimal,
}

impl Bucket {
    fn empty(key: BucketKey) -> Self {
        Self {
            key,
            total: Decimal::ZERO,
        }
    }
}

pub struct SpendAggregator;

impl SpendAggregator {
    /// Sums contributions of transactions dated within `range`, grouped by `group_by`.
    pub fn aggregate(
        transactions: &[Transaction],
        range: Period,
        group_by: GroupBy,
        flow: Flow,
    ) -> Vec<Bucket> {
        let in_range = contributions(transactions, range, flow);
        let buckets = match group_by {
            GroupBy::Category => first_seen(in_range, |txn| BucketKey::Category(txn.category_id)),
            GroupBy::Account => first_seen(in_range, |txn| BucketKey::Account(txn.account_id)),
            GroupBy::Month => {
                let months = range.months();
                let first = months.first().map(|month| month.index()).unwrap_or_default();
                let mut buckets: Vec<Bucket> = months
                    .into_iter()
                    .map(|month| Bucket::empty(BucketKey::Month(month)))
                    .collect();
                for (txn, amount) in in_range {
                    let slot = (YearMonth::of(txn.transaction_date).index() - first) as usize;
                    if let Some(bucket) = buckets.get_mut(slot) {
                        bucket.total += amount;
                    }
                }
                buckets
            }
            GroupBy::Day => {
                let mut buckets: Vec<Bucket> = range
                    .days()
                    .map(|day| Bucket::empty(BucketKey::Day(day)))
                    .collect();
                for (txn, amount) in in_range {
                    let slot = (txn.transaction_date - range.start_date).num_days() as usize;
                    if let Some(bucket) = buckets.get_mut(slot) {
                        bucket.total += amount;
                    }
                }
                buckets
            }
        };
        debug!(
            range = %range,
            group_by = ?group_by,
            flow = ?flow,
            rows = buckets.len(),
            "aggregated transactions"
        );
        buckets
    }

    /// Category totals for exactly `known`, in that order, with zero where nothing matched.
    pub fn aggregate_known(
        transactions: &[Transaction],
        range: Period,
        flow: Flow,
        known: &[Uuid],
    ) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = known
            .iter()
            .map(|id| Bucket::empty(BucketKey::Category(*id)))
            .collect();
        let slots: HashMap<Uuid, usize> = known
            .iter()
            .enumerate()
            .map(|(slot, id)| (*id, slot))
            .collect();
        for (txn, amount) in contributions(transactions, range, flow) {
            if let Some(&slot) = slots.get(&txn.category_id) {
                buckets[slot].total += amount;
            }
        }
        buckets
    }

    /// Sum of every contribution in `range`.
    pub fn total(transactions: &[Transaction], range: Period, flow: Flow) -> Decimal {
        contributions(transactions, range, flow)
            .map(|(_, amount)| amount)
            .sum()
    }
}

fn contributions(
    transactions: &[Transaction],
    range: Period,
    flow: Flow,
) -> impl Iterator<Item = (&Transaction, Decimal)> {
    transactions
        .iter()
        .filter(move |txn| range.contains(txn.transaction_date))
        .filter_map(move |txn| flow.contribution(txn).map(|amount| (txn, amount)))
}

fn first_seen<'a>(
    entries: impl Iterator<Item = (&'a Transaction, Decimal)>,
    key_of: impl Fn(&Transaction) -> BucketKey,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut slots: HashMap<BucketKey, usize> = HashMap::new();
    for (txn, amount) in entries {
        let key = key_of(txn);
        let slot = *slots.entry(key).or_insert_with(|| {
            buckets.push(Bucket::empty(key));
            buckets.len() - 1
        });
        buckets[slot].total += amount;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn flow_signs_contributions() {
        let account = Uuid::new_v4();
        let category = Uuid::new_v4();
        let day = sample_date(2024, 1, 1);
        let expense = Transaction::expense(account, category, day, dec!(40));
        let income = Transaction::income(account, category, day, dec!(100));

        assert_eq!(Flow::Net.contribution(&expense), Some(dec!(-40)));
        assert_eq!(Flow::Net.contribution(&income), Some(dec!(100)));
        assert_eq!(Flow::Expense.contribution(&expense), Some(dec!(40)));
        assert_eq!(Flow::Expense.contribution(&income), None);
        assert_eq!(Flow::Income.contribution(&expense), None);
        assert_eq!(Flow::Income.contribution(&income), Some(dec!(100)));
    }

    #[test]
    fn day_grouping_zero_fills_every_day() {
        let account = Uuid::new_v4();
        let category = Uuid::new_v4();
        let txns = vec![
            Transaction::expense(account, category, sample_date(2024, 1, 2), dec!(5)),
            Transaction::expense(account, category, sample_date(2024, 1, 2), dec!(2.5)),
        ];
        let range = Period::new(sample_date(2024, 1, 1), sample_date(2024, 1, 3)).unwrap();
        let buckets = SpendAggregator::aggregate(&txns, range, GroupBy::Day, Flow::Expense);
        let totals: Vec<Decimal> = buckets.iter().map(|b| b.total).collect();
        assert_eq!(totals, vec![dec!(0), dec!(7.5), dec!(0)]);
        assert_eq!(buckets[0].key, BucketKey::Day(sample_date(2024, 1, 1)));
    }
}
