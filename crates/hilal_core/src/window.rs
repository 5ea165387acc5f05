use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::Article;
use crate::{Error, Result};

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses the `publish_date` formats the API emits into a calendar date.
///
/// Timestamps with an offset keep the calendar date of that offset.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A target month/year that article views are restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct DateWindow {
    month: u32,
    year: i32,
}

#[derive(Deserialize)]
struct RawWindow {
    month: u32,
    year: i32,
}

impl TryFrom<RawWindow> for DateWindow {
    type Error = Error;

    fn try_from(raw: RawWindow) -> Result<Self> {
        DateWindow::new(raw.month, raw.year)
    }
}

impl DateWindow {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidConfig(format!(
                "target month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { month, year })
    }

    /// For compile-time constants already known to be in range.
    pub(crate) const fn new_unchecked(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn contains(&self, article: &Article) -> bool {
        article
            .published_on()
            .is_some_and(|date| self.contains_date(date))
    }

    pub fn filter<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        filter_by_month(articles, self.month, self.year)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Keeps the articles published in `target_month` (1-12) of `target_year`,
/// in their original order. Articles without a readable date are dropped.
pub fn filter_by_month(articles: &[Article], target_month: u32, target_year: i32) -> Vec<&Article> {
    articles
        .iter()
        .filter(|article| {
            article
                .published_on()
                .is_some_and(|date| date.month() == target_month && date.year() == target_year)
        })
        .collect()
}
