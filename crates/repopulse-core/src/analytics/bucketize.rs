//! Monthly bucketing of dated count series
//!
//! Groups events by calendar month for the star and influence charts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ChartDataset, MonthBucket, MonthKey, Series};

/// How events falling in the same month are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Add counts together (series of incremental deltas)
    #[default]
    Sum,
    /// Keep the last value seen in the month (series of running totals)
    Latest,
}

/// Group a series into one bucket per calendar month, ascending by month.
///
/// Empty input yields an empty dataset. With [`Aggregation::Latest`] the
/// "last" value is the last one in input order.
pub fn bucketize_by_month(series: &Series, policy: Aggregation) -> ChartDataset {
    month_buckets(series, policy).into()
}

/// Same as [`bucketize_by_month`] but keeps the structured month keys
pub fn month_buckets(series: &Series, policy: Aggregation) -> Vec<MonthBucket> {
    let mut months: BTreeMap<MonthKey, f64> = BTreeMap::new();

    for event in series.iter() {
        let slot = months.entry(MonthKey::of(event.date)).or_insert(0.0);
        match policy {
            Aggregation::Sum => *slot += event.count,
            Aggregation::Latest => *slot = event.count,
        }
    }

    if !series.is_chronological() {
        tracing::debug!(
            events = series.len(),
            "Series not in date order, buckets sorted by month"
        );
    }

    months
        .into_iter()
        .map(|(key, value)| MonthBucket { key, value })
        .collect()
}
