//! Series analytics
//!
//! Reshapes raw dated series into chart datasets.

pub mod bucketize;

#[cfg(test)]
mod tests;

pub use bucketize::{bucketize_by_month, month_buckets, Aggregation};
