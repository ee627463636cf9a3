use serde::{Deserialize, Serialize};

use super::recommendation::RiskLevel;
use super::snapshot::TargetYears;
use crate::errors::CoreError;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the recommender/history service (no trailing path).
    pub api_base_url: String,

    /// Amount sent with sector lookups and history requests. The backend
    /// needs one, but only the returned ticker lists and prices are used.
    pub nominal_amount: f64,

    /// Risk level used when none is given explicitly.
    pub default_risk: RiskLevel,

    /// Years shown in the price overview.
    pub target_years: TargetYears,

    /// Derive the years from each history response instead: as many
    /// consecutive years as `target_years` holds, ending at the latest
    /// complete year in the data.
    pub years_from_data: bool,

    /// Per-request HTTP timeout (ignored on wasm32).
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            nominal_amount: 100_000.0,
            default_risk: RiskLevel::Medium,
            target_years: TargetYears::default(),
            years_from_data: false,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::InvalidConfig(format!(
                "api_base_url '{url}' must start with http:// or https://"
            )));
        }
        if !self.nominal_amount.is_finite() || self.nominal_amount <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "nominal_amount must be a positive number, got {}",
                self.nominal_amount
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.target_years.is_empty() {
            return Err(CoreError::InvalidConfig(
                "at least one target year is required".into(),
            ));
        }
        Ok(())
    }
}
