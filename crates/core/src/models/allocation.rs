use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json;

/// One ticker of a proposed allocation, as received from the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Ticker symbol (e.g., "TCS", "HDFCBANK")
    pub ticker: String,

    /// Amount in currency units. `None` when the backend omitted it or sent
    /// something non-numeric.
    pub amount: Option<f64>,

    /// Portfolio weight (0..1) when the backend provides one.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl AllocationEntry {
    pub fn new(ticker: impl Into<String>, amount: f64) -> Self {
        Self {
            ticker: ticker.into(),
            amount: Some(amount),
            weight: None,
        }
    }

    /// Amount counted towards the total: positive finite amounts only.
    pub fn effective_amount(&self) -> f64 {
        match self.amount {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => 0.0,
        }
    }
}

/// A display-ready allocation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub ticker: String,

    /// Effective amount (0 for missing / non-positive input)
    pub amount: f64,

    /// Rounded share of the total, 0..=100. Rows are rounded independently,
    /// so the sum may drift from 100.
    pub percent: i64,
}

/// Result of aggregating an allocation: the total plus one row per entry,
/// in the order the entries were received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub total: f64,
    pub rows: Vec<AllocationRow>,
}

impl AllocationBreakdown {
    /// Number of tickers in the allocation (shown as "Number of Stocks").
    pub fn stock_count(&self) -> usize {
        self.rows.len()
    }

    /// Sum of the rounded percentages; anything other than 100 is rounding drift.
    pub fn percent_sum(&self) -> i64 {
        self.rows.iter().map(|r| r.percent).sum()
    }
}

/// Decode the `allocation` object of a response into entries, preserving
/// the key order of the JSON document. `None` if the field is absent or not
/// an object.
pub(crate) fn allocation_entries(value: &Value) -> Option<Vec<AllocationEntry>> {
    json::object(value, "allocation").map(|map| {
        map.iter()
            .map(|(ticker, detail)| AllocationEntry {
                ticker: ticker.clone(),
                amount: json::number_field(detail, "amount"),
                weight: json::number_field(detail, "weight"),
            })
            .collect()
    })
}
