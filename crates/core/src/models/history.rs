use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::allocation::{allocation_entries, AllocationEntry};
use super::json;

/// Request body for the ticker-history call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub tickers: Vec<String>,
    pub amount: f64,
}

/// Dense daily price history for a set of tickers.
///
/// `dates` is the raw ISO-8601 axis shared by every series; each series is
/// positionally aligned to it. A date slot is `None` where the response held
/// something other than a string, so later positions never shift. A `None`
/// price is a day without a usable price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub dates: Vec<Option<String>>,
    pub series: HashMap<String, Vec<Option<f64>>>,
}

impl PriceHistory {
    /// Decode the `history` object of a response. Absent or wrong-typed
    /// parts become empty collections.
    pub fn from_json(value: &Value) -> Self {
        let dates = json::string_slots(value, "dates").unwrap_or_default();

        let series = json::object(value, "series")
            .map(|map| {
                map.iter()
                    .map(|(ticker, values)| {
                        let points = values
                            .as_array()
                            .map(|arr| arr.iter().map(json::finite_number).collect())
                            .unwrap_or_default();
                        (ticker.clone(), points)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { dates, series }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Decoded response of the ticker-history call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryResponse {
    pub history: PriceHistory,

    /// Most recent close per ticker.
    pub latest: HashMap<String, f64>,

    /// Allocation the backend computed for the requested tickers, in
    /// response order.
    pub allocation: Vec<AllocationEntry>,
}

impl HistoryResponse {
    pub fn from_json(value: &Value) -> Self {
        let history = value
            .get("history")
            .map(PriceHistory::from_json)
            .unwrap_or_default();

        let latest = json::object(value, "latest")
            .map(|map| {
                map.iter()
                    .filter_map(|(ticker, v)| json::finite_number(v).map(|p| (ticker.clone(), p)))
                    .collect()
            })
            .unwrap_or_default();

        let allocation = allocation_entries(value).unwrap_or_default();

        Self {
            history,
            latest,
            allocation,
        }
    }
}
