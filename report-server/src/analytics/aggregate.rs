//! Reduce-by-key engine
//!
//! An [`Aggregator`] is parameterized by a predicate, a key function, an
//! optional label function and any number of named `Decimal` extractors.
//! Running it over records yields one [`AggregateRow`] per distinct key with
//! the record count and per-extractor sums.
//!
//! Rows come out in first-seen key order, so a report that does not sort is
//! still deterministic for an unchanged input. All sorts offered here are
//! stable.
//!
//! ```ignore
//! let by_method = Aggregator::new(|t: &Transaction| t.payment_method)
//!     .filter(|t| t.status == TransactionStatus::Completed)
//!     .sum("revenue", |t| t.total)
//!     .run(&transactions);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;

type KeyFn<'a, R, K> = Box<dyn Fn(&R) -> K + 'a>;
type Predicate<'a, R> = Box<dyn Fn(&R) -> bool + 'a>;
type LabelFn<'a, R> = Box<dyn Fn(&R) -> String + 'a>;
type Extractor<'a, R> = Box<dyn Fn(&R) -> Decimal + 'a>;

/// Summed/counted result for one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow<K> {
    pub key: K,
    /// Label of the first record seen for this key
    pub label: Option<String>,
    /// Number of records folded into this row
    pub count: u64,
    sums: Vec<(&'static str, Decimal)>,
}

impl<K> AggregateRow<K> {
    /// Sum for a named extractor; zero for unknown names
    pub fn sum(&self, name: &str) -> Decimal {
        self.sums
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or(Decimal::ZERO)
    }
}

pub struct Aggregator<'a, R, K> {
    key_fn: KeyFn<'a, R, K>,
    predicate: Option<Predicate<'a, R>>,
    label_fn: Option<LabelFn<'a, R>>,
    extractors: Vec<(&'static str, Extractor<'a, R>)>,
}

impl<'a, R: 'a, K> Aggregator<'a, R, K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(key_fn: impl Fn(&R) -> K + 'a) -> Self {
        Self {
            key_fn: Box::new(key_fn),
            predicate: None,
            label_fn: None,
            extractors: Vec::new(),
        }
    }

    /// Only fold records for which `predicate` holds. Multiple calls AND together.
    pub fn filter(mut self, predicate: impl Fn(&R) -> bool + 'a) -> Self {
        self.predicate = Some(match self.predicate.take() {
            None => Box::new(predicate),
            Some(prev) => Box::new(move |r: &R| prev(r) && predicate(r)),
        });
        self
    }

    /// Attach display metadata taken from the first record of each key
    pub fn label(mut self, label_fn: impl Fn(&R) -> String + 'a) -> Self {
        self.label_fn = Some(Box::new(label_fn));
        self
    }

    /// Add a named numeric projection summed per key
    pub fn sum(mut self, name: &'static str, extractor: impl Fn(&R) -> Decimal + 'a) -> Self {
        self.extractors.push((name, Box::new(extractor)));
        self
    }

    pub fn run<'r, I>(&self, records: I) -> Aggregation<K>
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        let mut rows: Vec<AggregateRow<K>> = Vec::new();
        let mut index: HashMap<K, usize> = HashMap::new();

        for record in records {
            if let Some(predicate) = &self.predicate
                && !predicate(record)
            {
                continue;
            }

            let key = (self.key_fn)(record);
            let slot = match index.get(&key) {
                Some(&i) => i,
                None => {
                    rows.push(AggregateRow {
                        key: key.clone(),
                        label: self.label_fn.as_ref().map(|f| f(record)),
                        count: 0,
                        sums: self
                            .extractors
                            .iter()
                            .map(|(name, _)| (*name, Decimal::ZERO))
                            .collect(),
                    });
                    index.insert(key, rows.len() - 1);
                    rows.len() - 1
                }
            };

            let row = &mut rows[slot];
            row.count += 1;
            for ((_, extract), (_, acc)) in self.extractors.iter().zip(row.sums.iter_mut()) {
                *acc += extract(record);
            }
        }

        Aggregation { rows }
    }
}

/// Output of [`Aggregator::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<K> {
    rows: Vec<AggregateRow<K>>,
}

impl<K> Aggregation<K> {
    pub fn rows(&self) -> &[AggregateRow<K>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AggregateRow<K>> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Total record count across all rows
    pub fn count(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Sum of a named extractor across all rows
    pub fn total(&self, name: &str) -> Decimal {
        self.rows.iter().map(|r| r.sum(name)).sum()
    }

    /// Ascending by key (stable)
    pub fn sort_by_key(mut self) -> Self
    where
        K: Ord,
    {
        self.rows.sort_by(|a, b| a.key.cmp(&b.key));
        self
    }

    /// Descending by a named sum (stable: ties keep first-seen order)
    pub fn sort_by_sum_desc(mut self, name: &str) -> Self {
        self.rows.sort_by(|a, b| b.sum(name).cmp(&a.sum(name)));
        self
    }

    /// Keep at most `n` rows
    pub fn limit(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }
}
