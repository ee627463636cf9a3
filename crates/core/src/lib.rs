pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    allocation::AllocationBreakdown,
    recommendation::{DatasetSummary, Recommendation, RiskLevel},
    session::Session,
    settings::Settings,
    view::{MarketTable, RequestToken, ViewState},
};
use providers::{http::HttpRecommender, traits::RecommenderProvider};
use services::{
    market_service::{MarketService, SectorList},
    recommendation_service::RecommendationService,
};

use errors::CoreError;

pub use services::allocation_service::aggregate_allocation;
pub use services::return_service::compute_return;
pub use services::sector_service::resolve_sector_tickers;
pub use services::snapshot_service::build_year_snapshot;
pub use services::visibility::filter_visible;

/// Main entry point for the Spread Wealth core library.
///
/// Owns the session state (sector cache, price-overview view) and the
/// provider it talks to. All numbers are computed here; the front end only
/// renders what it gets back.
#[must_use]
pub struct SpreadWealth {
    settings: Settings,
    provider: Box<dyn RecommenderProvider>,
    session: Session,
    market_service: MarketService,
    recommendation_service: RecommendationService,
}

impl std::fmt::Debug for SpreadWealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadWealth")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .field("cached_sectors", &self.session.sector_cache.len())
            .field("market_view", self.session.market_view.state())
            .finish()
    }
}

impl SpreadWealth {
    /// Create a session talking to the HTTP recommender at
    /// `settings.api_base_url`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let provider = HttpRecommender::from_settings(&settings);
        Ok(Self::build(settings, Box::new(provider)))
    }

    /// Create a session over any provider (mock, offline fixture, ...).
    pub fn with_provider(
        settings: Settings,
        provider: Box<dyn RecommenderProvider>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings, provider))
    }

    // ── Backend Metadata ────────────────────────────────────────────

    /// `true` if the backend answers its health probe with `ok: true`.
    pub async fn is_backend_healthy(&self) -> bool {
        match self.provider.health().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "health probe failed");
                false
            }
        }
    }

    /// Sector filter choices, "All" first.
    pub async fn list_sectors(&self) -> SectorList {
        self.market_service.list_sectors(self.provider.as_ref()).await
    }

    /// Size and date span of the backend dataset.
    pub async fn dataset_summary(&self) -> Result<DatasetSummary, CoreError> {
        self.provider.dataset_summary().await
    }

    // ── Price Overview ──────────────────────────────────────────────

    /// Select a sector and load its price overview.
    ///
    /// Runs sector resolution, history fetch and the yearly transforms in
    /// that order, then returns the resulting view state.
    pub async fn select_sector(&mut self, sector: &str) -> &ViewState {
        let token = self.begin_sector_load(sector);
        let outcome = self.load_sector(&token).await;
        self.finish_sector_load(token, outcome);
        self.session.market_view.state()
    }

    /// Start a load for `sector`. Any load started earlier becomes stale and
    /// its outcome will be discarded by [`Self::finish_sector_load`].
    pub fn begin_sector_load(&mut self, sector: &str) -> RequestToken {
        tracing::debug!(sector, "sector load started");
        self.session.market_view.begin(sector)
    }

    /// Fetch and compute the table for a started load. Does not touch the
    /// view state.
    pub async fn load_sector(&mut self, token: &RequestToken) -> Result<MarketTable, String> {
        self.market_service
            .load_sector_rows(
                self.provider.as_ref(),
                &mut self.session.sector_cache,
                &token.sector,
            )
            .await
    }

    /// Apply a load outcome if `token` is still the latest request.
    /// Returns `false` if it was discarded as stale.
    pub fn finish_sector_load(
        &mut self,
        token: RequestToken,
        outcome: Result<MarketTable, String>,
    ) -> bool {
        let generation = token.generation;
        let applied = self.session.market_view.complete(token, outcome);
        if !applied {
            tracing::warn!(
                generation,
                latest = self.session.market_view.generation(),
                "discarding stale sector load"
            );
        }
        applied
    }

    /// Current state of the price overview.
    #[must_use]
    pub fn market_view(&self) -> &ViewState {
        self.session.market_view.state()
    }

    /// Resolve a sector to its tickers through the session cache.
    pub async fn sector_tickers(&mut self, sector: &str) -> Vec<String> {
        resolve_sector_tickers(
            self.provider.as_ref(),
            &mut self.session.sector_cache,
            sector,
            self.settings.nominal_amount,
        )
        .await
    }

    // ── Recommendations ─────────────────────────────────────────────

    /// Recommended allocation of `amount` across `sectors` (all sectors if
    /// empty). Uses the configured default risk when `risk` is `None`.
    pub async fn recommend(
        &self,
        amount: f64,
        sectors: &[String],
        risk: Option<RiskLevel>,
    ) -> Result<Recommendation, CoreError> {
        let risk = risk.unwrap_or(self.settings.default_risk);
        self.recommendation_service
            .recommend(self.provider.as_ref(), amount, sectors, risk)
            .await
    }

    /// Recommended allocation of `amount` across explicit tickers.
    pub async fn recommend_for_tickers(
        &self,
        amount: f64,
        tickers: &[String],
    ) -> Result<AllocationBreakdown, CoreError> {
        self.recommendation_service
            .recommend_for_tickers(self.provider.as_ref(), amount, tickers)
            .await
    }

    // ── Session Cache ───────────────────────────────────────────────

    /// Number of sectors resolved and cached this session.
    #[must_use]
    pub fn cached_sector_count(&self) -> usize {
        self.session.sector_cache.len()
    }

    /// Forget all resolved sectors; the next lookup goes to the backend.
    pub fn clear_sector_cache(&mut self) {
        self.session.sector_cache.clear();
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, provider: Box<dyn RecommenderProvider>) -> Self {
        let market_service = MarketService::new(&settings);
        let recommendation_service = RecommendationService::new();

        Self {
            settings,
            provider,
            session: Session::new(),
            market_service,
            recommendation_service,
        }
    }
}
