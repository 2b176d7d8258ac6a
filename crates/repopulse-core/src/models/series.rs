//! Dated count series as served by the repo detail API
//!
//! Wire form is an array of `[date, count]` pairs, oldest first:
//! `[["2023-01-05", 3], ["2023-01-20", 2]]`.

use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Parse the date formats the API emits.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of the month) and RFC 3339
/// timestamps (calendar date in the timestamp's own offset).
pub fn parse_event_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }

    Err(CoreError::InvalidDate {
        input: input.to_string(),
    })
}

/// A single dated count (stars gained, influence value, ...)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(String, f64)", into = "(String, f64)")]
pub struct Event {
    pub date: NaiveDate,
    pub count: f64,
}

impl Event {
    pub fn new(date: NaiveDate, count: f64) -> Self {
        Self { date, count }
    }
}

impl TryFrom<(String, f64)> for Event {
    type Error = CoreError;

    fn try_from((date, count): (String, f64)) -> Result<Self> {
        Ok(Self {
            date: parse_event_date(&date)?,
            count,
        })
    }
}

impl From<Event> for (String, f64) {
    fn from(event: Event) -> Self {
        (event.date.format("%Y-%m-%d").to_string(), event.count)
    }
}

/// Ordered sequence of events, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Event>);

impl Series {
    pub fn new(events: Vec<Event>) -> Self {
        Self(events)
    }

    pub fn events(&self) -> &[Event] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when dates never go backwards
    pub fn is_chronological(&self) -> bool {
        self.0.windows(2).all(|w| w[0].date <= w[1].date)
    }

    /// Parse a series from its JSON wire form
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Event>> for Series {
    fn from(events: Vec<Event>) -> Self {
        Self(events)
    }
}

impl FromIterator<Event> for Series {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
