//! Fetch request derived from filters, paging, sort and view

use crate::pagination::PaginationController;
use alumni_core::{FilterField, FilterState, SortDirection, SortField, ViewMode};
use serde::Serialize;

/// Everything the backend needs to produce one page
///
/// The request doubles as the cache and in-flight key: two requests are the
/// same request exactly when they are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Active filters
    #[serde(flatten)]
    pub filters: FilterState,
    /// Page size
    pub limit: u32,
    /// Rows to skip
    pub offset: u64,
    /// Sort column
    pub sort_by: SortField,
    /// Sort direction
    pub sort_order: SortDirection,
    /// Ask for per-row trend series
    pub include_trend: bool,
}

impl FetchRequest {
    /// Derive the request for the current dashboard state
    #[must_use]
    pub fn derive(filters: &FilterState, pagination: &PaginationController, view: ViewMode) -> Self {
        let sort = pagination.sort();
        Self {
            filters: filters.clone(),
            limit: pagination.page_size(),
            offset: pagination.offset(),
            sort_by: sort.field,
            sort_order: sort.direction,
            include_trend: view.includes_trend(),
        }
    }

    /// Query parameters in wire order
    ///
    /// Arrays become repeated keys. Unset, empty and `false` values are left
    /// out so the backend applies its own defaults.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let filters = &self.filters;
        let mut pairs = Vec::new();

        if let Some(start) = filters.date_range.start {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = filters.date_range.end {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        for field in FilterField::ALL {
            for value in filters.values(field) {
                pairs.push((field.wire_name(), value.clone()));
            }
        }
        if let Some(search) = filters.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            pairs.push(("search", search.to_string()));
        }

        let toggles = [
            ("currentRolesOnly", filters.current_roles_only),
            ("excludeResearchAndHighEducation", filters.exclude_education_roles),
            ("onlyInternational", filters.only_international),
            ("includeTrend", Some(self.include_trend)),
        ];
        for (name, value) in toggles {
            if value == Some(true) {
                pairs.push((name, "true".to_string()));
            }
        }

        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs.push(("sortBy", self.sort_by.to_string()));
        pairs.push(("sortOrder", self.sort_order.to_string()));
        pairs
    }

    /// Percent-encoded query string without the leading `?`
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alumni_core::DateRange;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pagination() -> PaginationController {
        PaginationController::new(10, vec![5, 10, 25, 50, 100])
    }

    #[test]
    fn test_derive_default_table_request() {
        let filters = FilterState {
            company_ids: vec!["A".to_string()],
            ..FilterState::default()
        };
        let request = FetchRequest::derive(&filters, &pagination(), ViewMode::Table);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "companyIds": ["A"],
                "limit": 10,
                "offset": 0,
                "sortBy": "count",
                "sortOrder": "desc",
                "includeTrend": false
            })
        );
    }

    #[test]
    fn test_derive_follows_page_sort_and_view() {
        let mut p = pagination();
        p.set_total_items(100);
        p.set_page(4).unwrap();
        p.set_sort(SortField::Name);

        let request = FetchRequest::derive(&FilterState::default(), &p, ViewMode::Trend);
        assert_eq!(request.offset, 30);
        assert_eq!(request.sort_by, SortField::Name);
        assert_eq!(request.sort_order, SortDirection::Asc);
        assert!(request.include_trend);
    }

    #[test]
    fn test_query_string_encodes_and_repeats() {
        let filters = FilterState {
            date_range: DateRange {
                start: NaiveDate::from_ymd_opt(2020, 1, 1),
                end: None,
            },
            role_country_codes: vec!["PT".to_string(), "ES".to_string()],
            search: Some("data & ai".to_string()),
            current_roles_only: Some(true),
            only_international: Some(false),
            ..FilterState::default()
        };
        let request = FetchRequest::derive(&filters, &pagination(), ViewMode::Chart);

        assert_eq!(
            request.query_string(),
            "startDate=2020-01-01&roleCountryCodes=PT&roleCountryCodes=ES\
             &search=data%20%26%20ai&currentRolesOnly=true\
             &limit=10&offset=0&sortBy=count&sortOrder=desc"
        );
    }

    #[test]
    fn test_requests_with_same_state_are_equal() {
        let filters = FilterState::initial();
        let a = FetchRequest::derive(&filters, &pagination(), ViewMode::Table);
        let b = FetchRequest::derive(&filters, &pagination(), ViewMode::Chart);
        assert_eq!(a, b);

        let c = FetchRequest::derive(&filters, &pagination(), ViewMode::Trend);
        assert_ne!(a, c);
    }
}
