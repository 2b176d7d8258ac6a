//! Data models for repopulse

pub mod dataset;
pub mod repo;
pub mod series;

pub use dataset::{ChartDataset, ChartPoint, MonthBucket, MonthKey};
pub use repo::{RepoDetail, RepoId};
pub use series::{parse_event_date, Event, Series};
