//! Integration tests for the HTTP analytics source

mod common;

use alumni_analytics::{
    AnalyticsError, AnalyticsSource, Dashboard, FetchState, HttpAnalyticsSource, LoadingScope,
};
use alumni_core::config::DashboardConfig;
use alumni_core::{EntityKind, FilterState, ViewMode};
use common::init_test_logging;
use serde_json::json;
use similar_asserts::assert_eq;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpAnalyticsSource {
    HttpAnalyticsSource::new(server.uri(), Duration::from_secs(5))
        .unwrap_or_else(|e| panic!("source: {e}"))
        .with_api_key("test-key")
}

#[tokio::test]
async fn test_fetches_companies_page() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/companies"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(query_param("sortBy", "count"))
        .and(query_param("sortOrder", "desc"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": 42, "name": "Acme", "alumniCount": 1200, "logo": "https://cdn.example.org/acme.png" },
                { "id": "7", "name": "Globex", "count": 30 }
            ],
            "totalCount": 512,
            "filteredCount": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let loading = LoadingScope::new();
    let mut dashboard = Dashboard::new(
        EntityKind::Company,
        &DashboardConfig {
            default_page_size: 10,
            ..DashboardConfig::default()
        },
    );
    dashboard.refresh(&source_for(&server), &loading).await;

    let FetchState::Ready(page) = dashboard.state() else {
        panic!("expected a page, got {:?}", dashboard.state());
    };
    let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["42", "7"]);
    assert_eq!(page.items[0].count, 1200);
    assert_eq!(
        page.items[0].image.as_deref(),
        Some("https://cdn.example.org/acme.png")
    );
    assert_eq!(dashboard.counts(), (512, 2));
    assert!(!loading.is_loading());
}

#[tokio::test]
async fn test_sends_filters_and_trend_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/industries"))
        .and(query_param("companyIds", "1"))
        .and(query_param("companyIds", "2"))
        .and(query_param("includeTrend", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "count": 0,
            "filteredCount": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = FilterState {
        company_ids: vec!["1".to_string(), "2".to_string()],
        ..FilterState::initial()
    };
    let mut dashboard = Dashboard::new(EntityKind::Industry, &DashboardConfig::default());
    dashboard.set_filters(filters);
    dashboard.set_view(ViewMode::Trend);
    dashboard.refresh(&source_for(&server), &LoadingScope::new()).await;

    assert!(matches!(dashboard.state(), FetchState::Ready(page) if page.is_empty()));
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/geo/countries"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let dashboard = Dashboard::new(EntityKind::Country, &DashboardConfig::default());
    let err = source
        .fetch_page(EntityKind::Country, &dashboard.request())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyticsError::Status { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::new(EntityKind::Role, &DashboardConfig::default());
    dashboard.refresh(&source_for(&server), &LoadingScope::new()).await;

    let FetchState::Failed { message, retryable } = dashboard.state() else {
        panic!("expected a failure, got {:?}", dashboard.state());
    };
    assert!(message.contains("analytics/roles"));
    assert!(!retryable);
}

#[tokio::test]
async fn test_oversized_page_is_truncated() {
    let server = MockServer::start().await;
    let items: Vec<_> = (0..12)
        .map(|i| json!({ "id": i, "name": format!("Seniority {i}"), "count": 10 }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/analytics/roles/seniority"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "count": 12,
            "filteredCount": 3
        })))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(
        EntityKind::Seniority,
        &DashboardConfig {
            default_page_size: 5,
            ..DashboardConfig::default()
        },
    );
    let page = source_for(&server)
        .fetch_page(EntityKind::Seniority, &dashboard.request())
        .await
        .unwrap_or_else(|e| panic!("fetch: {e}"));

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.filtered_count, 5);
}
