use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::history::{HistoryRequest, HistoryResponse};
use crate::models::recommendation::{
    DatasetSummary, SectorRecommendation, SectorRecommendationRequest,
};

/// Boundary to the external recommender/history service.
///
/// The HTTP client implements it for production; tests and offline front
/// ends plug in their own. Everything behind this trait is out of scope for
/// the analytics core: it only consumes the decoded responses.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecommenderProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Liveness probe. `Ok(false)` means the service answered but reported
    /// itself unhealthy.
    async fn health(&self) -> Result<bool, CoreError>;

    /// Names of the sectors the backend knows about (without "All").
    async fn list_sectors(&self) -> Result<Vec<String>, CoreError>;

    /// Size and date span of the backend dataset.
    async fn dataset_summary(&self) -> Result<DatasetSummary, CoreError>;

    /// Allocation for an amount spread over the given sectors.
    async fn recommend_by_sectors(
        &self,
        request: &SectorRecommendationRequest,
    ) -> Result<SectorRecommendation, CoreError>;

    /// Daily price history, latest prices and an allocation for explicit tickers.
    async fn ticker_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<HistoryResponse, CoreError>;
}
