use super::allocation_service::aggregate_allocation;
use crate::errors::CoreError;
use crate::models::allocation::AllocationBreakdown;
use crate::models::history::HistoryRequest;
use crate::models::recommendation::{Recommendation, RiskLevel, SectorRecommendationRequest};
use crate::providers::traits::RecommenderProvider;

/// Status shown when a recommendation cannot be fetched.
pub const RECOMMENDATIONS_FAILED: &str = "Failed to load recommendations";

/// Fetches allocations from the recommender and turns them into
/// display-ready breakdowns.
///
/// The optimizer lives behind the provider; this service only validates the
/// request and aggregates what comes back.
pub struct RecommendationService;

impl RecommendationService {
    pub fn new() -> Self {
        Self
    }

    /// Allocation of `amount` across the given sectors (all sectors if empty).
    pub async fn recommend(
        &self,
        provider: &dyn RecommenderProvider,
        amount: f64,
        sectors: &[String],
        risk: RiskLevel,
    ) -> Result<Recommendation, CoreError> {
        validate_amount(amount)?;

        let request = SectorRecommendationRequest {
            amount,
            sectors: sectors.to_vec(),
            risk,
        };
        let response = provider.recommend_by_sectors(&request).await.map_err(|e| {
            tracing::warn!(provider = provider.name(), error = %e, "recommendation failed");
            e
        })?;

        let breakdown = aggregate_allocation(response.allocation.as_deref().unwrap_or_default());
        tracing::info!(
            sectors = sectors.len(),
            %risk,
            stocks = breakdown.stock_count(),
            "recommendation loaded"
        );

        Ok(Recommendation {
            breakdown,
            chosen: response.chosen.unwrap_or_default(),
            selected_tickers: response.selected_tickers.unwrap_or_default(),
            stats: response.stats,
        })
    }

    /// Allocation of `amount` across explicitly chosen tickers.
    pub async fn recommend_for_tickers(
        &self,
        provider: &dyn RecommenderProvider,
        amount: f64,
        tickers: &[String],
    ) -> Result<AllocationBreakdown, CoreError> {
        validate_amount(amount)?;
        if tickers.is_empty() {
            return Err(CoreError::ValidationError("at least one ticker is required".into()));
        }

        let request = HistoryRequest {
            tickers: tickers.to_vec(),
            amount,
        };
        let response = provider.ticker_history(&request).await?;
        Ok(aggregate_allocation(&response.allocation))
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Short status line for a failed recommendation. Input problems are shown
/// as-is so the user can fix them; anything else gets the generic message.
pub fn failure_status(error: &CoreError) -> String {
    match error {
        CoreError::ValidationError(msg) => msg.clone(),
        _ => RECOMMENDATIONS_FAILED.to_string(),
    }
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Investment amount must be a positive number, got {amount}"
        )));
    }
    Ok(())
}
