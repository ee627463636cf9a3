use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RecommenderProvider;
use crate::errors::CoreError;
use crate::models::history::{HistoryRequest, HistoryResponse};
use crate::models::json;
use crate::models::recommendation::{
    DatasetSummary, SectorRecommendation, SectorRecommendationRequest,
};
use crate::models::settings::Settings;

const PROVIDER_NAME: &str = "Recommender";

const HEALTH_PATH: &str = "/api/health";
const SECTORS_PATH: &str = "/api/portfolio/sectors";
const SUMMARY_PATH: &str = "/api/portfolio/summary";
const RECOMMEND_SECTORS_PATH: &str = "/api/portfolio/recommend/sectors";
const RECOMMEND_TICKERS_PATH: &str = "/api/portfolio/recommend/tickers";

/// JSON-over-HTTP client for the portfolio recommender service.
///
/// - **Endpoints**: `/api/health`, `/api/portfolio/sectors`,
///   `/api/portfolio/summary`, `/api/portfolio/recommend/{sectors,tickers}`
/// - **Failures**: a non-2xx status or a body that is not JSON is an
///   `Api` error; connection problems are `Network` errors.
/// - **Decoding**: fields that are missing or of the wrong type decode to
///   empty collections.
pub struct HttpRecommender {
    client: Client,
    base_url: String,
}

impl HttpRecommender {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::build(base_url.into(), 30)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::build(settings.api_base_url.clone(), settings.request_timeout_secs)
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn build(base_url: String, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json(&self, path: &str) -> Result<Value, CoreError> {
        tracing::debug!(path, "GET recommender");
        let resp = self.client.get(self.url(path)).send().await?;
        Self::read_json(path, resp).await
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, CoreError> {
        tracing::debug!(path, "POST recommender");
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::read_json(path, resp).await
    }

    async fn read_json(path: &str, resp: Response) -> Result<Value, CoreError> {
        let status = resp.status();
        if !status.is_success() {
            // The backend reports failures as {"detail": "..."}.
            let detail = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| json::string_field(&v, "detail"));
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: match detail {
                    Some(d) => format!("{path} returned HTTP {status}: {d}"),
                    None => format!("{path} returned HTTP {status}"),
                },
            });
        }

        resp.json::<Value>().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse response from {path}: {e}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecommenderProvider for HttpRecommender {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn health(&self) -> Result<bool, CoreError> {
        let body = self.get_json(HEALTH_PATH).await?;
        Ok(body.get("ok").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn list_sectors(&self) -> Result<Vec<String>, CoreError> {
        let body = self.get_json(SECTORS_PATH).await?;
        Ok(json::string_list(&body, "sectors").unwrap_or_default())
    }

    async fn dataset_summary(&self) -> Result<DatasetSummary, CoreError> {
        let body = self.get_json(SUMMARY_PATH).await?;
        Ok(DatasetSummary::from_json(&body))
    }

    async fn recommend_by_sectors(
        &self,
        request: &SectorRecommendationRequest,
    ) -> Result<SectorRecommendation, CoreError> {
        let body = self.post_json(RECOMMEND_SECTORS_PATH, request).await?;
        Ok(SectorRecommendation::from_json(&body))
    }

    async fn ticker_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<HistoryResponse, CoreError> {
        let body = self.post_json(RECOMMEND_TICKERS_PATH, request).await?;
        Ok(HistoryResponse::from_json(&body))
    }
}
