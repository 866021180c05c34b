//! Page-level filter ownership
//!
//! Dashboards never edit filters themselves. They hand "add to filter"
//! clicks to the [`FilterController`], which routes them to the right
//! filter set, drives the geographic and education drill-downs, and bumps a
//! revision on every change so each dashboard knows to reset its page.

use alumni_core::{
    AddToFilterExtra, DateRange, EntityKind, FilterField, FilterState, GeoTarget, YearRange,
};
use chrono::NaiveDate;
use tracing::debug;

/// Owner of the page's [`FilterState`]
#[derive(Debug, Clone)]
pub struct FilterController {
    filters: FilterState,
    revision: u64,
    geo_kind: EntityKind,
    education_kind: EntityKind,
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterController {
    /// Controller holding the initial filters
    #[must_use]
    pub fn new() -> Self {
        Self::with_filters(FilterState::initial())
    }

    /// Controller holding `filters`
    #[must_use]
    pub const fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            revision: 0,
            geo_kind: EntityKind::Country,
            education_kind: EntityKind::Faculty,
        }
    }

    /// Current filters
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Incremented on every change
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Level shown by the geographic dashboard
    #[must_use]
    pub const fn geo_kind(&self) -> EntityKind {
        self.geo_kind
    }

    /// Level shown by the education dashboard
    #[must_use]
    pub const fn education_kind(&self) -> EntityKind {
        self.education_kind
    }

    /// Navigate the geographic dashboard by hand
    pub fn set_geo_kind(&mut self, kind: EntityKind) {
        if matches!(kind, EntityKind::Country | EntityKind::City) {
            self.geo_kind = kind;
        }
    }

    /// Navigate the education dashboard by hand
    pub fn set_education_kind(&mut self, kind: EntityKind) {
        if matches!(
            kind,
            EntityKind::Faculty | EntityKind::Course | EntityKind::Graduation
        ) {
            self.education_kind = kind;
        }
    }

    /// Add a clicked row to the filters; returns true if anything changed
    ///
    /// Adding an identifier that is already present is a no-op. Graduation
    /// rows add both their year and their course.
    pub fn add_to_filters(&mut self, kind: EntityKind, id: &str, extra: AddToFilterExtra) -> bool {
        let changed = match (kind, extra.year) {
            (EntityKind::Graduation, Some(year)) => {
                let year_added = self.filters.insert(FilterField::GraduationYears, year.to_string());
                let course_added = self.filters.insert(FilterField::CourseIds, id);
                year_added || course_added
            }
            _ => {
                let field = kind.filter_field(extra.kind.unwrap_or(GeoTarget::Role));
                self.filters.insert(field, id)
            }
        };

        if changed {
            self.drill_down(kind, extra);
            self.bump(kind.filter_field(extra.kind.unwrap_or_default()));
        }
        changed
    }

    /// Remove a row from the filters; returns true if anything changed
    ///
    /// For graduation rows with a year only the year is removed.
    pub fn remove_from_filters(
        &mut self,
        kind: EntityKind,
        id: &str,
        extra: AddToFilterExtra,
    ) -> bool {
        let (field, removed) = match (kind, extra.year) {
            (EntityKind::Graduation, Some(year)) => (
                FilterField::GraduationYears,
                self.filters
                    .remove(FilterField::GraduationYears, &year.to_string()),
            ),
            _ => {
                let field = kind.filter_field(extra.kind.unwrap_or_default());
                (field, self.filters.remove(field, id))
            }
        };
        if removed {
            self.bump(field);
        }
        removed
    }

    /// Replace one filter set
    pub fn set_field(&mut self, field: FilterField, values: Vec<String>) {
        if self.filters.values(field) != values.as_slice() {
            self.filters.set_values(field, values);
            self.bump(field);
        }
    }

    /// Overlay the constraints `patch` sets; unset parts are left alone
    pub fn merge(&mut self, patch: &FilterState) {
        let mut next = self.filters.clone();
        next.merge(patch);
        self.replace(next);
    }

    /// Set the free-text search
    pub fn set_search(&mut self, search: Option<String>) {
        let search = search.filter(|s| !s.trim().is_empty());
        if self.filters.search != search {
            self.filters.search = search;
            self.revision += 1;
        }
    }

    /// Restrict roles to the committed span of years
    pub fn apply_year_range(&mut self, range: YearRange) {
        let start = NaiveDate::from_ymd_opt(range.start, 1, 1);
        let end = NaiveDate::from_ymd_opt(range.end, 12, 31);
        let date_range = DateRange { start, end };
        if self.filters.date_range != date_range {
            debug!(%range, "Applying year range");
            self.filters.date_range = date_range;
            self.revision += 1;
        }
    }

    /// Replace the filters wholesale
    pub fn replace(&mut self, filters: FilterState) {
        if self.filters != filters {
            self.filters = filters;
            self.revision += 1;
        }
    }

    /// Back to the initial filters and the top drill-down levels
    pub fn clear(&mut self) {
        self.filters = FilterState::initial();
        self.geo_kind = EntityKind::Country;
        self.education_kind = EntityKind::Faculty;
        self.revision += 1;
        debug!(revision = self.revision, "Filters cleared");
    }

    fn drill_down(&mut self, kind: EntityKind, extra: AddToFilterExtra) {
        let target = extra.kind.unwrap_or_default();
        let first = |filters: &FilterState, field: FilterField| filters.values(field).len() == 1;
        match kind {
            EntityKind::Country
                if self.geo_kind == EntityKind::Country
                    && first(&self.filters, kind.filter_field(target)) =>
            {
                debug!("Drilling geography down to cities");
                self.geo_kind = EntityKind::City;
            }
            EntityKind::Faculty
                if self.education_kind == EntityKind::Faculty
                    && first(&self.filters, FilterField::FacultyIds) =>
            {
                debug!("Drilling education down to courses");
                self.education_kind = EntityKind::Course;
            }
            EntityKind::Course
                if self.education_kind == EntityKind::Course
                    && first(&self.filters, FilterField::CourseIds) =>
            {
                debug!("Drilling education down to graduation years");
                self.education_kind = EntityKind::Graduation;
            }
            _ => {}
        }
    }

    fn bump(&mut self, field: FilterField) {
        self.revision += 1;
        debug!(field = field.wire_name(), revision = self.revision, "Filters changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn extra(year: Option<i32>, kind: Option<GeoTarget>) -> AddToFilterExtra {
        AddToFilterExtra { year, kind }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut c = FilterController::new();
        assert!(c.add_to_filters(EntityKind::Company, "42", AddToFilterExtra::default()));
        assert!(!c.add_to_filters(EntityKind::Company, "42", AddToFilterExtra::default()));
        assert_eq!(c.filters().company_ids, vec!["42".to_string()]);
        assert_eq!(c.revision(), 1);
    }

    #[rstest]
    #[case(EntityKind::Country, None, FilterField::RoleCountryCodes)]
    #[case(EntityKind::Country, Some(GeoTarget::Company), FilterField::CompanyHqCountryCodes)]
    #[case(EntityKind::City, Some(GeoTarget::Role), FilterField::RoleCityIds)]
    #[case(EntityKind::City, Some(GeoTarget::Company), FilterField::CompanyHqCityIds)]
    #[case(EntityKind::Industry, None, FilterField::IndustryIds)]
    #[case(EntityKind::Role, None, FilterField::EscoCodes)]
    #[case(EntityKind::Seniority, None, FilterField::SeniorityLevels)]
    fn test_add_routes_by_kind(
        #[case] kind: EntityKind,
        #[case] target: Option<GeoTarget>,
        #[case] field: FilterField,
    ) {
        let mut c = FilterController::new();
        c.add_to_filters(kind, "x", extra(None, target));
        assert_eq!(c.filters().values(field), ["x".to_string()]);
    }

    #[test]
    fn test_graduation_adds_year_and_course() {
        let mut c = FilterController::new();
        assert!(c.add_to_filters(EntityKind::Graduation, "17", extra(Some(2019), None)));
        assert_eq!(c.filters().graduation_years, vec!["2019".to_string()]);
        assert_eq!(c.filters().course_ids, vec!["17".to_string()]);

        assert!(c.add_to_filters(EntityKind::Graduation, "17", extra(Some(2020), None)));
        assert_eq!(c.filters().course_ids.len(), 1);

        assert!(c.remove_from_filters(EntityKind::Graduation, "17", extra(Some(2019), None)));
        assert_eq!(c.filters().graduation_years, vec!["2020".to_string()]);
        assert_eq!(c.filters().course_ids, vec!["17".to_string()]);
    }

    #[test]
    fn test_geo_drill_down_on_first_country() {
        let mut c = FilterController::new();
        assert_eq!(c.geo_kind(), EntityKind::Country);
        c.add_to_filters(EntityKind::Country, "PT", AddToFilterExtra::default());
        assert_eq!(c.geo_kind(), EntityKind::City);

        c.set_geo_kind(EntityKind::Country);
        c.add_to_filters(EntityKind::Country, "ES", AddToFilterExtra::default());
        assert_eq!(c.geo_kind(), EntityKind::Country);
    }

    #[test]
    fn test_education_drill_down() {
        let mut c = FilterController::new();
        c.add_to_filters(EntityKind::Faculty, "FEUP", AddToFilterExtra::default());
        assert_eq!(c.education_kind(), EntityKind::Course);
        c.add_to_filters(EntityKind::Course, "17", AddToFilterExtra::default());
        assert_eq!(c.education_kind(), EntityKind::Graduation);

        c.clear();
        assert_eq!(c.education_kind(), EntityKind::Faculty);
        assert_eq!(c.geo_kind(), EntityKind::Country);
        assert_eq!(c.filters(), &FilterState::initial());
    }

    #[test]
    fn test_every_change_bumps_revision() {
        let mut c = FilterController::new();
        c.set_field(FilterField::IndustryIds, vec!["1".into(), "2".into()]);
        c.set_field(FilterField::IndustryIds, vec!["1".into(), "2".into()]);
        assert_eq!(c.revision(), 1);

        c.set_search(Some("  ".to_string()));
        assert_eq!(c.revision(), 1);
        c.set_search(Some("eng".to_string()));
        assert_eq!(c.revision(), 2);

        c.apply_year_range(YearRange::new(2010, 2015));
        assert_eq!(
            c.filters().date_range,
            DateRange::between(
                NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2015, 12, 31).unwrap_or_default()
            )
        );
        assert_eq!(c.revision(), 3);

        c.clear();
        assert_eq!(c.revision(), 4);
    }

    #[test]
    fn test_merge_overlays_set_parts() {
        let mut c = FilterController::new();
        c.add_to_filters(EntityKind::Company, "1", AddToFilterExtra::default());
        let patch = FilterState {
            industry_ids: vec!["9".to_string()],
            only_international: Some(true),
            ..FilterState::default()
        };
        c.merge(&patch);

        assert_eq!(c.filters().company_ids, vec!["1".to_string()]);
        assert_eq!(c.filters().industry_ids, vec!["9".to_string()]);
        assert_eq!(c.filters().only_international, Some(true));
        assert_eq!(c.filters().current_roles_only, Some(true));
        assert_eq!(c.revision(), 2);
    }
}
