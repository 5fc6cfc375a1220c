//! Pure projections of the expense list into the series that the charts display.
//!
//! Nothing here keeps state between calls: every view is rebuilt from the records it is given.

use crate::model::{Amount, Expense, Granularity};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Expense sums bucketed by date, with bucket keys in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesView {
    labels: Vec<String>,
    values: Vec<Amount>,
    title: String,
}

impl TimeSeriesView {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Expense sums per category, in the order each category is first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    labels: Vec<String>,
    values: Vec<Amount>,
}

impl CategoryView {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }
}

/// Groups `records` by their date truncated to `granularity` and sums each group. ISO dates sort
/// chronologically as strings, so the keys are simply sorted lexicographically.
pub fn time_series(records: &[Expense], granularity: Granularity) -> TimeSeriesView {
    let mut buckets: BTreeMap<&str, Amount> = BTreeMap::new();
    for record in records {
        *buckets.entry(granularity.key(record.date())).or_default() += record.amount();
    }
    let (labels, values) = buckets
        .into_iter()
        .map(|(key, sum)| (key.to_string(), sum))
        .unzip();
    TimeSeriesView {
        labels,
        values,
        title: granularity.title(),
    }
}

/// Groups `records` by exact category string and sums each group.
pub fn category_breakdown(records: &[Expense]) -> CategoryView {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut labels = Vec::new();
    let mut values: Vec<Amount> = Vec::new();
    for record in records {
        match index.get(record.category()) {
            Some(&ix) => values[ix] += record.amount(),
            None => {
                index.insert(record.category(), labels.len());
                labels.push(record.category().to_string());
                values.push(record.amount());
            }
        }
    }
    CategoryView { labels, values }
}

/// The sum of every record's amount.
pub fn total(records: &[Expense]) -> Amount {
    records.iter().map(Expense::amount).sum()
}
