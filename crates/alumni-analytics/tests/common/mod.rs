//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use alumni_core::{DataPoint, EntityKind, EntityListItem};
use alumni_analytics::MockAnalyticsSource;
use chrono::NaiveDate;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Fixed reference date for trend windows
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default()
}

/// Companies with alumni counts 100, 90, ... and a monthly trend each
pub fn companies(n: usize) -> Vec<EntityListItem> {
    (0..n)
        .map(|i| {
            let count = 100 - 10 * i as u64;
            let mut item = EntityListItem::new(format!("c{i}"), format!("Company {i:02}"), count);
            item.trend = Some(
                (1..=12)
                    .map(|month| {
                        DataPoint::new(format!("2023-{month:02}-01"), (count + month) as f64)
                    })
                    .collect(),
            );
            item
        })
        .collect()
}

/// Countries with company counts
pub fn countries() -> Vec<EntityListItem> {
    [("PT", "Portugal", 300, 40), ("ES", "Spain", 120, 25), ("FR", "France", 60, 12)]
        .into_iter()
        .map(|(id, name, count, companies)| {
            let mut item = EntityListItem::new(id, name, count);
            item.secondary_count = Some(companies);
            item
        })
        .collect()
}

/// Mock backend serving the fixtures
pub fn mock_source() -> MockAnalyticsSource {
    MockAnalyticsSource::new()
        .with_rows(EntityKind::Company, companies(10))
        .with_rows(EntityKind::Country, countries())
}
