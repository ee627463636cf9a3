use crate::errors::CoreError;
use crate::models::recommendation::{RiskLevel, SectorRecommendationRequest, TickerSource};
use crate::models::session::{SectorTickerCache, ALL_SECTORS};
use crate::providers::traits::RecommenderProvider;

/// Resolve a sector to its ticker list, memoizing per session.
///
/// - "All" returns the fixed basket without touching the provider.
/// - A cached sector returns the cached list without touching the provider.
/// - Otherwise one sector recommendation is requested for `nominal_amount`;
///   the list is its `selected_tickers`, or the allocation keys when that
///   field is absent. The result is cached.
/// - A failed request yields an empty list and leaves the cache untouched.
pub async fn resolve_sector_tickers(
    provider: &dyn RecommenderProvider,
    cache: &mut SectorTickerCache,
    sector: &str,
    nominal_amount: f64,
) -> Vec<String> {
    match try_resolve_sector_tickers(provider, cache, sector, nominal_amount).await {
        Ok((tickers, _)) => tickers,
        Err(e) => {
            tracing::warn!(sector, error = %e, "sector lookup failed");
            Vec::new()
        }
    }
}

/// Like [`resolve_sector_tickers`], but surfaces the failure and reports
/// where the list came from.
pub async fn try_resolve_sector_tickers(
    provider: &dyn RecommenderProvider,
    cache: &mut SectorTickerCache,
    sector: &str,
    nominal_amount: f64,
) -> Result<(Vec<String>, TickerSource), CoreError> {
    if let Some(tickers) = cache.lookup(sector) {
        let source = if sector == ALL_SECTORS {
            TickerSource::Basket
        } else {
            tracing::debug!(sector, "sector cache hit");
            TickerSource::Cache
        };
        return Ok((tickers, source));
    }

    let request = SectorRecommendationRequest {
        amount: nominal_amount,
        sectors: vec![sector.to_string()],
        risk: RiskLevel::Medium,
    };
    let mut response = provider.recommend_by_sectors(&request).await?;

    let (tickers, source) = match response.selected_tickers.take() {
        Some(selected) => (selected, TickerSource::Selected),
        None => {
            let keys = response.allocated_tickers();
            tracing::warn!(
                sector,
                provider = provider.name(),
                "response has no selected_tickers, using allocation keys"
            );
            (keys, TickerSource::AllocationKeys)
        }
    };

    cache.insert(sector, tickers.clone());
    tracing::debug!(sector, count = tickers.len(), ?source, "sector resolved");
    Ok((tickers, source))
}
