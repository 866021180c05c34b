//! In-memory analytics source for tests and demos

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::fetch::AnalyticsSource;
use crate::request::FetchRequest;
use alumni_core::{
    EntityKind, EntityListItem, FilterField, FilterState, ResultPage, SortDirection, SortField,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{Duration, sleep};

/// Mock analytics source backed by fixed rows per entity kind
///
/// Applies the kind's own filter set, the free-text search, sort and paging
/// of each request the way the backend does. Every request is recorded for later inspection.
#[derive(Debug, Clone, Default)]
pub struct MockAnalyticsSource {
    rows: HashMap<EntityKind, Vec<EntityListItem>>,
    delay_ms: u64,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<(EntityKind, FetchRequest)>>>,
}

impl MockAnalyticsSource {
    /// Create an empty mock source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `rows` for `kind`
    #[must_use]
    pub fn with_rows(mut self, kind: EntityKind, rows: Vec<EntityListItem>) -> Self {
        self.rows.insert(kind, rows);
        self
    }

    /// Wait before answering
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Fail every request with `message`
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<(EntityKind, FetchRequest)> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

fn own_fields(kind: EntityKind) -> &'static [FilterField] {
    match kind {
        EntityKind::Country => &[FilterField::RoleCountryCodes, FilterField::CompanyHqCountryCodes],
        EntityKind::City => &[FilterField::RoleCityIds, FilterField::CompanyHqCityIds],
        EntityKind::Company => &[FilterField::CompanyIds],
        EntityKind::Industry => &[FilterField::IndustryIds],
        EntityKind::Role => &[FilterField::EscoCodes],
        EntityKind::Seniority => &[FilterField::SeniorityLevels],
        EntityKind::Faculty => &[FilterField::FacultyIds],
        EntityKind::Course | EntityKind::Graduation => &[FilterField::CourseIds],
    }
}

fn selected_by(kind: EntityKind, filters: &FilterState, row: &EntityListItem) -> bool {
    let mut selected = own_fields(kind)
        .iter()
        .flat_map(|field| filters.values(*field))
        .peekable();
    selected.peek().is_none() || selected.any(|id| *id == row.id)
}

fn compare(a: &EntityListItem, b: &EntityListItem, field: SortField) -> Ordering {
    let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());
    match field {
        SortField::Count => a.count.cmp(&b.count).then_with(by_name),
        SortField::Name => by_name(),
        SortField::Year => a.year.cmp(&b.year).then_with(by_name),
    }
}

#[async_trait]
impl AnalyticsSource for MockAnalyticsSource {
    async fn fetch_page(
        &self,
        kind: EntityKind,
        request: &FetchRequest,
    ) -> AnalyticsResult<ResultPage<EntityListItem>> {
        self.requests.lock().push((kind, request.clone()));

        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if let Some(ref message) = self.failure {
            return Err(AnalyticsError::source_unavailable(message.clone()));
        }

        let all = self.rows.get(&kind).map_or(&[][..], Vec::as_slice);
        let needle = request
            .filters
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matching: Vec<EntityListItem> = all
            .iter()
            .filter(|row| selected_by(kind, &request.filters, row))
            .filter(|row| {
                needle
                    .as_deref()
                    .is_none_or(|needle| row.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, request.sort_by);
            match request.sort_order {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let filtered_count = matching.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let items: Vec<EntityListItem> = matching
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .map(|mut row| {
                if !request.include_trend {
                    row.trend = None;
                }
                row
            })
            .collect();

        Ok(ResultPage {
            items,
            count: all.len() as u64,
            filtered_count,
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
