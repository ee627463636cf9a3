use super::alignment::DateAxis;
use super::return_service::compute_return;
use super::sector_service::resolve_sector_tickers;
use super::snapshot_service::snapshot_from_axis;
use super::visibility::filter_visible;
use crate::models::history::{HistoryRequest, HistoryResponse};
use crate::models::session::{SectorTickerCache, ALL_SECTORS};
use crate::models::settings::Settings;
use crate::models::snapshot::TargetYears;
use crate::models::view::{MarketRow, MarketTable};
use crate::providers::traits::RecommenderProvider;

/// Status shown when the sector list cannot be fetched.
pub const SECTORS_FAILED: &str = "Failed to load sectors";
/// Status shown when the price history cannot be fetched.
pub const HISTORY_FAILED: &str = "Failed to load stock history";

/// Sector choices for the filter, always starting with "All".
#[derive(Debug, Clone, PartialEq)]
pub struct SectorList {
    pub sectors: Vec<String>,
    pub error: Option<String>,
}

/// Drives the sector-filtered price overview.
///
/// The async part is only fetching: sector resolution, then history. The
/// numbers come from the synchronous transforms in this module's siblings.
pub struct MarketService {
    target_years: TargetYears,
    years_from_data: bool,
    nominal_amount: f64,
}

impl MarketService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            target_years: settings.target_years.clone(),
            years_from_data: settings.years_from_data,
            nominal_amount: settings.nominal_amount,
        }
    }

    /// Backend sectors prefixed with "All". On failure only "All" is offered,
    /// together with a status message.
    pub async fn list_sectors(&self, provider: &dyn RecommenderProvider) -> SectorList {
        let mut sectors = vec![ALL_SECTORS.to_string()];
        match provider.list_sectors().await {
            Ok(names) => {
                sectors.extend(names.into_iter().filter(|n| n != ALL_SECTORS));
                SectorList {
                    sectors,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "sector list failed");
                SectorList {
                    sectors,
                    error: Some(SECTORS_FAILED.to_string()),
                }
            }
        }
    }

    /// Load the rows for one sector: resolve tickers, fetch their history,
    /// then snapshot, filter and compute returns.
    ///
    /// An empty ticker list gives an empty row set without a history call.
    /// `Err` carries a short status message for the view.
    pub async fn load_sector_rows(
        &self,
        provider: &dyn RecommenderProvider,
        cache: &mut SectorTickerCache,
        sector: &str,
    ) -> Result<MarketTable, String> {
        let tickers = resolve_sector_tickers(provider, cache, sector, self.nominal_amount).await;
        if tickers.is_empty() {
            tracing::debug!(sector, "no tickers for sector");
            return Ok(MarketTable {
                years: self.target_years.years().to_vec(),
                rows: Vec::new(),
            });
        }

        let request = HistoryRequest {
            tickers: tickers.clone(),
            amount: self.nominal_amount,
        };
        let history = provider.ticker_history(&request).await.map_err(|e| {
            tracing::warn!(sector, provider = provider.name(), error = %e, "history fetch failed");
            HISTORY_FAILED.to_string()
        })?;

        let table = self.table_from_history(&tickers, &history);
        tracing::info!(sector, requested = tickers.len(), shown = table.rows.len(), "sector rows loaded");
        Ok(table)
    }

    /// Display table for `tickers`, in their order, skipping tickers with no
    /// yearly data at all.
    pub fn table_from_history(&self, tickers: &[String], response: &HistoryResponse) -> MarketTable {
        let axis = DateAxis::from_slots(&response.history.dates);
        let years = self.years_for(&axis);
        let snapshot = snapshot_from_axis(&axis, &response.history.series, &years);

        let rows = filter_visible(tickers, &snapshot)
            .into_iter()
            .filter_map(|ticker| {
                let prices = snapshot.rows.get(&ticker)?.clone();
                Some(MarketRow {
                    return_pct: compute_return(&prices),
                    latest: response.latest.get(&ticker).copied(),
                    prices,
                    ticker,
                })
            })
            .collect();

        MarketTable {
            years: snapshot.years,
            rows,
        }
    }

    /// Years used for a given axis.
    pub fn years_for(&self, axis: &DateAxis) -> TargetYears {
        if self.years_from_data {
            if let Some(years) = TargetYears::for_axis(axis.points(), self.target_years.len()) {
                return years;
            }
        }
        self.target_years.clone()
    }
}
