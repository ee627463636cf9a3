// ═══════════════════════════════════════════════════════════════════
// HTTP Provider Tests: HttpRecommender against a local mock server
// ═══════════════════════════════════════════════════════════════════

use mockito::{Matcher, Server};
use serde_json::json;

use spread_wealth_core::errors::CoreError;
use spread_wealth_core::models::history::HistoryRequest;
use spread_wealth_core::models::recommendation::{RiskLevel, SectorRecommendationRequest};
use spread_wealth_core::models::settings::Settings;
use spread_wealth_core::models::view::ViewState;
use spread_wealth_core::providers::http::HttpRecommender;
use spread_wealth_core::providers::traits::RecommenderProvider;
use spread_wealth_core::SpreadWealth;

fn json_body(value: serde_json::Value) -> String {
    value.to_string()
}

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider = HttpRecommender::new("http://localhost:8000/");
        assert_eq!(provider.base_url(), "http://localhost:8000");
        assert_eq!(provider.name(), "Recommender");
    }

    #[test]
    fn from_settings_uses_configured_url() {
        let settings = Settings {
            api_base_url: "https://recommender.internal".into(),
            ..Settings::default()
        };
        let provider = HttpRecommender::from_settings(&settings);
        assert_eq!(provider.base_url(), "https://recommender.internal");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Metadata endpoints
// ═══════════════════════════════════════════════════════════════════

mod metadata {
    use super::*;

    #[tokio::test]
    async fn health_reads_ok_flag() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({ "ok": true })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        assert!(provider.health().await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn health_without_flag_is_unhealthy() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        assert!(!provider.health().await.unwrap());
    }

    #[tokio::test]
    async fn sectors_are_decoded_leniently() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/portfolio/sectors")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({ "sectors": ["IT", 42, "Banking", null] })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        assert_eq!(provider.list_sectors().await.unwrap(), vec!["IT", "Banking"]);
    }

    #[tokio::test]
    async fn summary_is_decoded() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/portfolio/summary")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({
                "summary": {
                    "total_stocks": 48,
                    "date_range": { "start": "2015-01-01", "end": "2024-12-31" },
                    "sectors": ["IT", "Pharma"]
                }
            })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let summary = provider.dataset_summary().await.unwrap();
        assert_eq!(summary.total_stocks, 48);
        assert_eq!(summary.date_range.end.as_deref(), Some("2024-12-31"));
        assert_eq!(summary.sectors, vec!["IT", "Pharma"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Recommendation & history endpoints
// ═══════════════════════════════════════════════════════════════════

mod recommendations {
    use super::*;

    #[tokio::test]
    async fn sector_request_body_and_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/portfolio/recommend/sectors")
            .match_body(Matcher::PartialJson(json!({
                "amount": 100000.0,
                "sectors": ["IT"],
                "risk": "medium"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({
                "selected_tickers": ["TCS", "INFY"],
                "allocation": {
                    "INFY": { "amount": 40000.0, "weight": 0.4 },
                    "TCS": { "amount": 60000.0, "weight": 0.6 }
                },
                "chosen": ["INFY", "TCS"],
                "portfolio_stats": { "expected_return": 0.12, "volatility": "n/a" }
            })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let request = SectorRecommendationRequest {
            amount: 100_000.0,
            sectors: vec!["IT".into()],
            risk: RiskLevel::Medium,
        };
        let rec = provider.recommend_by_sectors(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rec.selected_tickers, Some(vec!["TCS".into(), "INFY".into()]));
        // Allocation keeps the response's key order
        assert_eq!(rec.allocated_tickers(), vec!["INFY", "TCS"]);
        let stats = rec.stats.unwrap();
        assert_eq!(stats.expected_return, Some(0.12));
        assert_eq!(stats.volatility, None);
    }

    #[tokio::test]
    async fn history_request_body_and_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/portfolio/recommend/tickers")
            .match_body(Matcher::PartialJson(json!({ "tickers": ["TCS"] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({
                "history": {
                    "dates": ["2023-12-29T00:00:00", "2024-12-31T00:00:00"],
                    "series": { "TCS": [3800.5, null] }
                },
                "latest": { "TCS": 4100.0 },
                "allocation": { "TCS": { "amount": 1000.0 } }
            })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let request = HistoryRequest {
            tickers: vec!["TCS".into()],
            amount: 1000.0,
        };
        let response = provider.ticker_history(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.history.dates.len(), 2);
        assert_eq!(response.history.series["TCS"], vec![Some(3800.5), None]);
        assert_eq!(response.latest.get("TCS"), Some(&4100.0));
        assert_eq!(response.allocation.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Failures
// ═══════════════════════════════════════════════════════════════════

mod failures {
    use super::*;

    #[tokio::test]
    async fn non_success_status_carries_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/portfolio/recommend/sectors")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({ "detail": "No data for sectors" })))
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let request = SectorRecommendationRequest {
            amount: 1.0,
            sectors: vec!["Nope".into()],
            risk: RiskLevel::Low,
        };
        let err = provider.recommend_by_sectors(&request).await.unwrap_err();

        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Recommender");
                assert!(message.contains("400"));
                assert!(message.contains("No data for sectors"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_without_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/portfolio/sectors")
            .with_status(500)
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let err = provider.list_sectors().await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert!(err.to_string().contains("/api/portfolio/sectors"));
    }

    #[tokio::test]
    async fn non_json_body_is_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let provider = HttpRecommender::new(server.url());
        let err = provider.health().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse response"));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = HttpRecommender::new("http://127.0.0.1:1");
        let err = provider.list_sectors().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// End-to-end through the facade
// ═══════════════════════════════════════════════════════════════════

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn all_sector_overview_skips_sector_lookup() {
        let mut server = Server::new_async().await;
        let lookup = server
            .mock("POST", "/api/portfolio/recommend/sectors")
            .expect(0)
            .create_async()
            .await;
        let history = server
            .mock("POST", "/api/portfolio/recommend/tickers")
            .match_body(Matcher::PartialJson(json!({ "amount": 100000.0 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json_body(json!({
                "history": {
                    "dates": [
                        "2020-12-31T00:00:00",
                        "2021-12-31T00:00:00",
                        "2022-12-30T00:00:00",
                        "2023-12-29T00:00:00",
                        "2024-12-31T00:00:00"
                    ],
                    "series": {
                        "TCS": [2900.0, 3800.0, 3200.0, 3800.0, 4350.0],
                        "RELIANCE": [null, null, null, null, null]
                    }
                },
                "latest": { "TCS": 4400.0 }
            })))
            .create_async()
            .await;

        let settings = Settings {
            api_base_url: server.url(),
            ..Settings::default()
        };
        let mut app = SpreadWealth::new(settings).unwrap();
        let state = app.select_sector("All").await.clone();

        lookup.assert_async().await;
        history.assert_async().await;

        match state {
            ViewState::Ready { table, .. } => {
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.rows[0].ticker, "TCS");
                assert_eq!(table.rows[0].return_pct, 50);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_leaves_only_all() {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:1".into(),
            request_timeout_secs: 2,
            ..Settings::default()
        };
        let app = SpreadWealth::new(settings).unwrap();

        let list = app.list_sectors().await;
        assert_eq!(list.sectors, vec!["All"]);
        assert!(list.error.is_some());
        assert!(!app.is_backend_healthy().await);
    }
}
