use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered list of calendar years to snapshot (evaluated at Dec 31).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetYears(Vec<i32>);

/// Years shown by the price overview unless configured otherwise.
pub const DEFAULT_TARGET_YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

/// A dataset whose last point falls on or after this day of December counts
/// as covering the full year (the last trading session is rarely Dec 31).
const YEAR_COMPLETE_FROM_DAY: u32 = 24;

impl TargetYears {
    pub fn new(years: Vec<i32>) -> Self {
        Self(years)
    }

    /// `count` consecutive years ending at `last_year` (inclusive).
    pub fn ending_at(last_year: i32, count: usize) -> Self {
        let first = last_year - count as i32 + 1;
        Self((first..=last_year).collect())
    }

    /// `count` consecutive years ending at the most recent complete year
    /// covered by `axis`. `None` if the axis has no parseable point.
    pub fn for_axis(axis: &[Option<DateTime<Utc>>], count: usize) -> Option<Self> {
        let last = axis.iter().flatten().max()?;
        let last_year = if last.month() == 12 && last.day() >= YEAR_COMPLETE_FROM_DAY {
            last.year()
        } else {
            last.year() - 1
        };
        Some(Self::ending_at(last_year, count))
    }

    pub fn years(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Year-end instants (`YYYY-12-31T00:00:00Z`) in year order. Years
    /// outside chrono's range are skipped.
    pub fn year_ends(&self) -> Vec<(i32, Option<DateTime<Utc>>)> {
        self.0
            .iter()
            .map(|&y| (y, Utc.with_ymd_and_hms(y, 12, 31, 0, 0, 0).single()))
            .collect()
    }
}

impl Default for TargetYears {
    fn default() -> Self {
        Self(DEFAULT_TARGET_YEARS.to_vec())
    }
}

impl From<Vec<i32>> for TargetYears {
    fn from(years: Vec<i32>) -> Self {
        Self(years)
    }
}

/// One value per target year per ticker. Every row has exactly
/// `years.len()` slots; `None` marks a year without a usable price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub years: Vec<i32>,
    pub rows: HashMap<String, Vec<Option<f64>>>,
}

impl YearSnapshot {
    pub fn row(&self, ticker: &str) -> Option<&[Option<f64>]> {
        self.rows.get(ticker).map(Vec::as_slice)
    }

    /// `true` if the ticker has at least one usable year value.
    pub fn has_data(&self, ticker: &str) -> bool {
        self.row(ticker)
            .is_some_and(|row| row.iter().any(Option::is_some))
    }

    pub fn ticker_count(&self) -> usize {
        self.rows.len()
    }
}
