//! Chart-ready datasets

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar month key, ordered by (year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "YYYY-MM"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One aggregated month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub value: f64,
}

/// A single (label, value) point handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl From<(String, f64)> for ChartPoint {
    fn from((label, value): (String, f64)) -> Self {
        Self { label, value }
    }
}

impl From<ChartPoint> for (String, f64) {
    fn from(point: ChartPoint) -> Self {
        (point.label, point.value)
    }
}

impl From<MonthBucket> for ChartPoint {
    fn from(bucket: MonthBucket) -> Self {
        Self {
            label: bucket.key.label(),
            value: bucket.value,
        }
    }
}

/// Ordered `[label, value]` pairs. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartDataset {
    points: Vec<ChartPoint>,
}

impl ChartDataset {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn get(&self, idx: usize) -> Option<&ChartPoint> {
        self.points.get(idx)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Largest value, 0.0 for an empty dataset
    pub fn max_value(&self) -> f64 {
        self.values().fold(0.0, f64::max)
    }
}

impl From<Vec<MonthBucket>> for ChartDataset {
    fn from(buckets: Vec<MonthBucket>) -> Self {
        Self {
            points: buckets.into_iter().map(ChartPoint::from).collect(),
        }
    }
}
