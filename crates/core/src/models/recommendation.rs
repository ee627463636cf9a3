use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::allocation::{allocation_entries, AllocationBreakdown, AllocationEntry};
use super::json;
use crate::errors::CoreError;

/// Risk tolerance sent with a sector recommendation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(CoreError::ValidationError(format!(
                "Unknown risk level '{other}': expected low, medium or high"
            ))),
        }
    }
}

/// Request body for the sector-based allocation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecommendationRequest {
    pub amount: f64,
    pub sectors: Vec<String>,
    pub risk: RiskLevel,
}

/// Optimizer statistics for the chosen portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub expected_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
}

/// Decoded response of the sector-based allocation call.
///
/// `selected_tickers` and `allocation` are kept apart on purpose: the first
/// is the set of tickers the backend considered for the sector, the second
/// only those that received a meaningful weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectorRecommendation {
    pub selected_tickers: Option<Vec<String>>,
    pub allocation: Option<Vec<AllocationEntry>>,
    pub chosen: Option<Vec<String>>,
    pub stats: Option<PortfolioStats>,
}

impl SectorRecommendation {
    pub fn from_json(value: &Value) -> Self {
        let stats = value.get("portfolio_stats").filter(|v| v.is_object()).map(|s| PortfolioStats {
            expected_return: json::number_field(s, "expected_return"),
            volatility: json::number_field(s, "volatility"),
            sharpe_ratio: json::number_field(s, "sharpe_ratio"),
        });

        Self {
            selected_tickers: json::string_list(value, "selected_tickers"),
            allocation: allocation_entries(value),
            chosen: json::string_list(value, "chosen"),
            stats,
        }
    }

    /// Allocation keys in response order (empty if no allocation was sent).
    pub fn allocated_tickers(&self) -> Vec<String> {
        self.allocation
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|e| e.ticker.clone())
            .collect()
    }
}

/// Where a sector's ticker list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickerSource {
    /// The fixed "All" basket
    Basket,
    /// `selected_tickers` of the recommender response
    Selected,
    /// Keys of the allocation map (response had no `selected_tickers`)
    AllocationKeys,
    /// Session cache
    Cache,
}

/// A full recommendation ready for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    pub breakdown: AllocationBreakdown,
    pub chosen: Vec<String>,
    pub selected_tickers: Vec<String>,
    pub stats: Option<PortfolioStats>,
}

/// Date span of the backend dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Response of the dataset summary call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_stocks: usize,
    pub date_range: DateRange,
    pub sectors: Vec<String>,
}

impl DatasetSummary {
    /// Decode the `summary` object. A summary the backend could not produce
    /// (e.g. `{"error": "Data not loaded"}`) decodes as the empty default.
    pub fn from_json(value: &Value) -> Self {
        let Some(summary) = value.get("summary").filter(|v| v.is_object()) else {
            return Self::default();
        };

        let date_range = summary
            .get("date_range")
            .map(|r| DateRange {
                start: json::string_field(r, "start"),
                end: json::string_field(r, "end"),
            })
            .unwrap_or_default();

        Self {
            total_stocks: summary
                .get("total_stocks")
                .and_then(Value::as_u64)
                .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
                .unwrap_or(0),
            date_range,
            sectors: json::string_list(summary, "sectors").unwrap_or_default(),
        }
    }
}
