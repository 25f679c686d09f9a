//! Grouping and summation of amounts.
//!
//! Every report in this crate starts the same way: bucket a list of records by a key and add up
//! the amounts in each bucket. The results are `BTreeMap`s so that reports and charts list keys
//! in a stable order.

use crate::model::Amount;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A record that carries a group key and an amount.
pub trait Grouped {
    type Key: Ord + Clone;

    fn key(&self) -> Self::Key;

    fn amount(&self) -> Amount;
}

/// Sums the amounts of `records` per group key. Keys that are never observed are absent from
/// the result.
pub fn aggregate<'a, R>(records: impl IntoIterator<Item = &'a R>) -> BTreeMap<R::Key, Decimal>
where
    R: Grouped + 'a,
{
    aggregate_by(records, |r| r.key(), |r| r.amount())
}

/// Like `aggregate`, for records that can be grouped more than one way.
pub fn aggregate_by<'a, T, K>(
    records: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    amount: impl Fn(&T) -> Amount,
) -> BTreeMap<K, Decimal>
where
    T: 'a,
    K: Ord,
{
    let mut sums: BTreeMap<K, Decimal> = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_default() += amount(record).value();
    }
    sums
}

/// The sum of every amount in `sums`.
pub fn total<K>(sums: &BTreeMap<K, Decimal>) -> Decimal {
    sums.values().copied().sum()
}

/// Running totals in key order.
pub fn cumulative<K: Clone>(sums: &BTreeMap<K, Decimal>) -> Vec<(K, Decimal)> {
    let mut running = Decimal::ZERO;
    sums.iter()
        .map(|(k, v)| {
            running += *v;
            (k.clone(), running)
        })
        .collect()
}

/// The key with the largest sum. Ties go to the first key in key order.
pub fn top<K: Clone>(sums: &BTreeMap<K, Decimal>) -> Option<K> {
    let mut best: Option<(&K, &Decimal)> = None;
    for (k, v) in sums {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((k, v)),
        }
    }
    best.map(|(k, _)| k.clone())
}

/// Adds a zero entry for each of `keys` that is missing from `sums`.
pub fn fill<K: Ord + Clone>(
    mut sums: BTreeMap<K, Decimal>,
    keys: impl IntoIterator<Item = K>,
) -> BTreeMap<K, Decimal> {
    for k in keys {
        sums.entry(k).or_insert(Decimal::ZERO);
    }
    sums
}
