//! Unit tests for analytics module

use super::*;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{Event, MonthKey, Series};

fn ev(y: i32, m: u32, d: u32, count: f64) -> Event {
    Event::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), count)
}

/// Daily series starting at `start`, one event per day
fn generate_daily_series(start: NaiveDate, days: i64) -> Series {
    (0..days)
        .map(|i| Event::new(start + Duration::days(i), (i % 7) as f64))
        .collect()
}

// ============================================================================
// Bucketize Tests
// ============================================================================

#[test]
fn test_bucketize_empty_series() {
    let dataset = bucketize_by_month(&Series::default(), Aggregation::Sum);
    assert!(dataset.is_empty());

    let dataset = bucketize_by_month(&Series::default(), Aggregation::Latest);
    assert!(dataset.is_empty());
}

#[test]
fn test_bucketize_single_event() {
    let series = Series::new(vec![ev(2021, 6, 15, 42.0)]);
    let dataset = bucketize_by_month(&series, Aggregation::Sum);

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.points()[0].label, "2021-06");
    assert_eq!(dataset.points()[0].value, 42.0);
}

#[test]
fn test_bucketize_sum_scenario() {
    let series = Series::new(vec![
        ev(2023, 1, 5, 3.0),
        ev(2023, 1, 20, 2.0),
        ev(2023, 2, 1, 5.0),
    ]);
    let dataset = bucketize_by_month(&series, Aggregation::Sum);

    let pairs: Vec<(&str, f64)> = dataset
        .points()
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();
    assert_eq!(pairs, vec![("2023-01", 5.0), ("2023-02", 5.0)]);
}

#[test]
fn test_bucketize_latest_keeps_last_value() {
    let series = Series::new(vec![
        ev(2023, 1, 5, 10.0),
        ev(2023, 1, 20, 12.5),
        ev(2023, 2, 1, 13.0),
        ev(2023, 2, 28, 11.0),
    ]);
    let dataset = bucketize_by_month(&series, Aggregation::Latest);

    let values: Vec<f64> = dataset.values().collect();
    assert_eq!(values, vec![12.5, 11.0]);
}

#[test]
fn test_bucketize_crosses_year_boundary() {
    let series = Series::new(vec![ev(2022, 12, 31, 1.0), ev(2023, 1, 1, 1.0)]);
    let dataset = bucketize_by_month(&series, Aggregation::Sum);

    let labels: Vec<&str> = dataset.labels().collect();
    assert_eq!(labels, vec!["2022-12", "2023-01"]);
}

#[test]
fn test_bucketize_same_month_different_years_stay_apart() {
    let series = Series::new(vec![ev(2022, 3, 1, 1.0), ev(2023, 3, 1, 2.0)]);
    let dataset = bucketize_by_month(&series, Aggregation::Sum);
    assert_eq!(dataset.len(), 2);
}

#[test]
fn test_bucketize_output_ascending_and_unique() {
    let series = generate_daily_series(NaiveDate::from_ymd_opt(2020, 11, 17).unwrap(), 500);
    let buckets = month_buckets(&series, Aggregation::Sum);

    assert!(buckets.windows(2).all(|w| w[0].key < w[1].key));

    let distinct: BTreeSet<MonthKey> = series.iter().map(|e| MonthKey::of(e.date)).collect();
    assert_eq!(buckets.len(), distinct.len());

    let total: f64 = series.iter().map(|e| e.count).sum();
    let bucket_total: f64 = buckets.iter().map(|b| b.value).sum();
    assert_eq!(total, bucket_total, "Sum policy must conserve counts");
}

#[test]
fn test_bucketize_is_deterministic() {
    let series = generate_daily_series(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), 120);
    let first = bucketize_by_month(&series, Aggregation::Latest);
    let second = bucketize_by_month(&series.clone(), Aggregation::Latest);
    assert_eq!(first, second);
}

#[test]
fn test_bucketize_unordered_input_still_sorted_by_month() {
    let series = Series::new(vec![ev(2023, 3, 1, 1.0), ev(2023, 1, 1, 2.0), ev(2023, 3, 9, 4.0)]);
    let dataset = bucketize_by_month(&series, Aggregation::Sum);

    let labels: Vec<&str> = dataset.labels().collect();
    assert_eq!(labels, vec!["2023-01", "2023-03"]);
    assert_eq!(dataset.points()[1].value, 5.0);
}
