//! End-to-end dashboard flows against the in-memory backend

mod common;

use alumni_analytics::view::{ChartBody, MetricCell, TableBody};
use alumni_analytics::{
    Completion, Dashboard, FetchStart, FetchState, FilterController, LoadingScope, ViewModel,
};
use alumni_core::config::DashboardConfig;
use alumni_core::{AddToFilterExtra, EntityKind, GeoTarget, SortField, ViewMode};
use common::{init_test_logging, mock_source, today};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn rows(model: &ViewModel) -> &[alumni_analytics::view::Row] {
    match model {
        ViewModel::Table(table) => match &table.body {
            TableBody::Rows(rows) => rows,
            other => panic!("expected rows, got {other:?}"),
        },
        ViewModel::Chart(_) => panic!("expected a table"),
    }
}

#[tokio::test]
async fn test_paging_through_companies() {
    init_test_logging();
    let source = mock_source();
    let loading = LoadingScope::new();
    let config = DashboardConfig {
        default_page_size: 5,
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::new(EntityKind::Company, &config);

    dashboard.refresh(&source, &loading).await;
    let model = dashboard.view_model(today());
    let names: Vec<&str> = rows(&model).iter().map(|r| r.name.text.as_str()).collect();
    assert_eq!(
        names,
        vec!["Company 00", "Company 01", "Company 02", "Company 03", "Company 04"]
    );

    assert!(dashboard.next_page());
    dashboard.refresh(&source, &loading).await;
    let model = dashboard.view_model(today());
    let numbers: Vec<u64> = rows(&model).iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![6, 7, 8, 9, 10]);
    assert!(!dashboard.pagination().has_next());

    dashboard.set_sort(SortField::Name);
    dashboard.refresh(&source, &loading).await;
    let model = dashboard.view_model(today());
    assert_eq!(rows(&model)[0].name.text, "Company 05");
    assert_eq!(source.request_count(), 3);
}

#[tokio::test]
async fn test_add_to_filter_resets_dashboards() {
    init_test_logging();
    let source = mock_source();
    let loading = LoadingScope::new();
    let mut filters = FilterController::new();
    let config = DashboardConfig {
        default_page_size: 5,
        ..DashboardConfig::default()
    };
    let mut companies = Dashboard::new(EntityKind::Company, &config);
    let mut geo = Dashboard::new(filters.geo_kind(), &config);

    companies.follow(&filters);
    geo.follow(&filters);
    companies.refresh(&source, &loading).await;
    companies.next_page();
    assert_eq!(companies.pagination().page(), 2);

    let extra = AddToFilterExtra {
        year: None,
        kind: Some(GeoTarget::Role),
    };
    assert!(filters.add_to_filters(EntityKind::Country, "PT", extra));
    assert_eq!(filters.geo_kind(), EntityKind::City);

    assert!(companies.follow(&filters));
    assert!(geo.follow(&filters));
    geo.set_kind(filters.geo_kind());

    assert_eq!(companies.pagination().page(), 1);
    assert_eq!(companies.request().filters.role_country_codes, vec!["PT".to_string()]);
    assert_eq!(geo.kind(), EntityKind::City);
}

#[tokio::test]
async fn test_trend_view_buckets_quarters() {
    let source = mock_source();
    let loading = LoadingScope::new();
    let mut dashboard = Dashboard::new(EntityKind::Company, &DashboardConfig::default());
    dashboard.set_view(ViewMode::Trend);
    dashboard.refresh(&source, &loading).await;

    assert!(source.requests()[0].1.include_trend);
    let model = dashboard.view_model(today());
    let MetricCell::Trend(spark) = &rows(&model)[0].metric else {
        panic!("expected a sparkline");
    };
    let labels: Vec<&str> = spark.series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["2023-Q1", "2023-Q2", "2023-Q3", "2023-Q4"]);
    assert_eq!(spark.series[0].value, 102.0);
}

#[tokio::test]
async fn test_chart_view_of_countries() {
    let source = mock_source();
    let loading = LoadingScope::new();
    let mut dashboard = Dashboard::new(EntityKind::Country, &DashboardConfig::default());
    dashboard.set_view(ViewMode::Chart);
    dashboard.refresh(&source, &loading).await;

    let ViewModel::Chart(ChartBody::Ready(chart)) = dashboard.view_model(today()) else {
        panic!("expected a chart");
    };
    let ids: Vec<&str> = chart.arcs.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["PT", "ES", "FR"]);
    assert_eq!(chart.total, 480);
}

#[tokio::test]
async fn test_backend_failure_is_not_empty() {
    let source = alumni_analytics::MockAnalyticsSource::new().with_failure("connection refused");
    let loading = LoadingScope::new();
    let mut dashboard = Dashboard::new(EntityKind::Industry, &DashboardConfig::default());

    assert_eq!(dashboard.refresh(&source, &loading).await, Completion::Applied);
    assert!(matches!(dashboard.state(), FetchState::Failed { retryable: true, .. }));
    let ViewModel::Table(table) = dashboard.view_model(today()) else {
        panic!("expected a table");
    };
    assert!(matches!(table.body, TableBody::Failed { .. }));
    assert!(table.footer.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_for_old_filters_is_discarded() {
    let source = mock_source().with_delay(500);
    let mut filters = FilterController::new();
    let mut dashboard = Dashboard::new(EntityKind::Company, &DashboardConfig::default());
    dashboard.follow(&filters);

    let FetchStart::Pending(old) = dashboard.begin_fetch() else {
        panic!("expected a network fetch");
    };
    let slow = {
        let source = source.clone();
        let request = old.request().clone();
        tokio::spawn(async move {
            use alumni_analytics::AnalyticsSource;
            source.fetch_page(EntityKind::Company, &request).await
        })
    };

    filters.add_to_filters(EntityKind::Company, "c3", AddToFilterExtra::default());
    dashboard.follow(&filters);
    let FetchStart::Pending(new) = dashboard.begin_fetch() else {
        panic!("expected a network fetch");
    };
    let fresh = {
        use alumni_analytics::AnalyticsSource;
        source.fetch_page(EntityKind::Company, new.request()).await
    };
    assert_eq!(dashboard.complete(&new, fresh), Completion::Applied);

    tokio::time::sleep(Duration::from_millis(10)).await;
    let stale = slow.await.unwrap_or_else(|e| panic!("fetch task failed: {e}"));
    assert_eq!(dashboard.complete(&old, stale), Completion::Discarded);

    let model = dashboard.view_model(today());
    let ids: Vec<&str> = rows(&model).iter().map(|r| r.filter.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["c3"]);
}
