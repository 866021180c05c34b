//! Shared data model for the analytics engine
//!
//! Everything here is plain data: the filter record every dashboard reads,
//! the sort and paging vocabulary, the paged result envelope returned by the
//! backend and the enumerations that select views and trend windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive date window; either end may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included
    #[serde(rename = "startDate", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// Last day included
    #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range with both ends set
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A range with neither end set places no constraint
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Identifier sets carried by [`FilterState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    /// Companies the alumni work(ed) at
    CompanyIds,
    /// Courses (majors)
    CourseIds,
    /// Faculties
    FacultyIds,
    /// Graduation years
    GraduationYears,
    /// Industries
    IndustryIds,
    /// Country codes of the role location
    RoleCountryCodes,
    /// City identifiers of the role location
    RoleCityIds,
    /// Country codes of company headquarters
    CompanyHqCountryCodes,
    /// City identifiers of company headquarters
    CompanyHqCityIds,
    /// ESCO occupation codes
    EscoCodes,
    /// Seniority levels
    SeniorityLevels,
}

impl FilterField {
    /// Every identifier set, in wire order
    pub const ALL: [Self; 11] = [
        Self::CompanyIds,
        Self::CourseIds,
        Self::FacultyIds,
        Self::GraduationYears,
        Self::IndustryIds,
        Self::RoleCountryCodes,
        Self::RoleCityIds,
        Self::CompanyHqCountryCodes,
        Self::CompanyHqCityIds,
        Self::EscoCodes,
        Self::SeniorityLevels,
    ];

    /// Query parameter / JSON key used by the backend
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CompanyIds => "companyIds",
            Self::CourseIds => "courseIds",
            Self::FacultyIds => "facultyIds",
            Self::GraduationYears => "graduationYears",
            Self::IndustryIds => "industryIds",
            Self::RoleCountryCodes => "roleCountryCodes",
            Self::RoleCityIds => "roleCityIds",
            Self::CompanyHqCountryCodes => "companyHQsCountryCodes",
            Self::CompanyHqCityIds => "companyHQsCityIds",
            Self::EscoCodes => "escoCodes",
            Self::SeniorityLevels => "seniorityLevel",
        }
    }
}

/// The filter record shared by every dashboard on the page
///
/// An empty identifier set or an unset option means "no constraint", never
/// "exclude everything". The record is replaced wholesale when filters are
/// cleared and patched field by field otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Date window applied to role start/end dates
    #[serde(flatten)]
    pub date_range: DateRange,

    /// Selected companies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_ids: Vec<String>,

    /// Selected courses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub course_ids: Vec<String>,

    /// Selected faculties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faculty_ids: Vec<String>,

    /// Selected graduation years
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graduation_years: Vec<String>,

    /// Selected industries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industry_ids: Vec<String>,

    /// Role location countries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_country_codes: Vec<String>,

    /// Role location cities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_city_ids: Vec<String>,

    /// Company headquarters countries
    #[serde(
        rename = "companyHQsCountryCodes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub company_hq_country_codes: Vec<String>,

    /// Company headquarters cities
    #[serde(
        rename = "companyHQsCityIds",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub company_hq_city_ids: Vec<String>,

    /// ESCO occupation codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub esco_codes: Vec<String>,

    /// Seniority levels
    #[serde(rename = "seniorityLevel", default, skip_serializing_if = "Vec::is_empty")]
    pub seniority_levels: Vec<String>,

    /// Free-text search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only count roles the alumni currently hold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_roles_only: Option<bool>,

    /// Leave out research and higher-education roles
    #[serde(
        rename = "excludeResearchAndHighEducation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_education_roles: Option<bool>,

    /// Only international alumni
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_international: Option<bool>,
}

impl FilterState {
    /// Filters a page starts with: current roles only, other toggles off
    #[must_use]
    pub fn initial() -> Self {
        Self {
            current_roles_only: Some(true),
            exclude_education_roles: Some(false),
            only_international: Some(false),
            ..Self::default()
        }
    }

    /// Identifiers selected for a field
    #[must_use]
    pub fn values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::CompanyIds => &self.company_ids,
            FilterField::CourseIds => &self.course_ids,
            FilterField::FacultyIds => &self.faculty_ids,
            FilterField::GraduationYears => &self.graduation_years,
            FilterField::IndustryIds => &self.industry_ids,
            FilterField::RoleCountryCodes => &self.role_country_codes,
            FilterField::RoleCityIds => &self.role_city_ids,
            FilterField::CompanyHqCountryCodes => &self.company_hq_country_codes,
            FilterField::CompanyHqCityIds => &self.company_hq_city_ids,
            FilterField::EscoCodes => &self.esco_codes,
            FilterField::SeniorityLevels => &self.seniority_levels,
        }
    }

    fn values_mut(&mut self, field: FilterField) -> &mut Vec<String> {
        match field {
            FilterField::CompanyIds => &mut self.company_ids,
            FilterField::CourseIds => &mut self.course_ids,
            FilterField::FacultyIds => &mut self.faculty_ids,
            FilterField::GraduationYears => &mut self.graduation_years,
            FilterField::IndustryIds => &mut self.industry_ids,
            FilterField::RoleCountryCodes => &mut self.role_country_codes,
            FilterField::RoleCityIds => &mut self.role_city_ids,
            FilterField::CompanyHqCountryCodes => &mut self.company_hq_country_codes,
            FilterField::CompanyHqCityIds => &mut self.company_hq_city_ids,
            FilterField::EscoCodes => &mut self.esco_codes,
            FilterField::SeniorityLevels => &mut self.seniority_levels,
        }
    }

    /// Whether `id` is selected in `field`
    #[must_use]
    pub fn contains(&self, field: FilterField, id: &str) -> bool {
        self.values(field).iter().any(|value| value == id)
    }

    /// Add `id` to `field`; returns `false` when it was already present
    pub fn insert(&mut self, field: FilterField, id: impl Into<String>) -> bool {
        let id = id.into();
        let values = self.values_mut(field);
        if values.contains(&id) {
            return false;
        }
        values.push(id);
        true
    }

    /// Remove `id` from `field`; returns `false` when it was not present
    pub fn remove(&mut self, field: FilterField, id: &str) -> bool {
        let values = self.values_mut(field);
        let before = values.len();
        values.retain(|value| value != id);
        values.len() != before
    }

    /// Replace every identifier of `field`
    pub fn set_values(&mut self, field: FilterField, values: Vec<String>) {
        *self.values_mut(field) = values;
    }

    /// Copy of `self` with `id` added to `field`
    #[must_use]
    pub fn with_added(mut self, field: FilterField, id: impl Into<String>) -> Self {
        self.insert(field, id);
        self
    }

    /// Copy of `self` with `id` removed from `field`
    #[must_use]
    pub fn with_removed(mut self, field: FilterField, id: &str) -> Self {
        self.remove(field, id);
        self
    }

    /// Overlay the constraints `patch` sets; unset parts are left alone
    pub fn merge(&mut self, patch: &Self) {
        for field in FilterField::ALL {
            let values = patch.values(field);
            if !values.is_empty() {
                self.set_values(field, values.to_vec());
            }
        }
        if patch.date_range.start.is_some() {
            self.date_range.start = patch.date_range.start;
        }
        if patch.date_range.end.is_some() {
            self.date_range.end = patch.date_range.end;
        }
        if patch.search.is_some() {
            self.search.clone_from(&patch.search);
        }
        self.current_roles_only = patch.current_roles_only.or(self.current_roles_only);
        self.exclude_education_roles = patch.exclude_education_roles.or(self.exclude_education_roles);
        self.only_international = patch.only_international.or(self.only_international);
    }

    /// Number of constraints that differ from [`FilterState::initial`]
    #[must_use]
    pub fn active_count(&self) -> usize {
        let initial = Self::initial();
        let sets = FilterField::ALL
            .iter()
            .filter(|field| !self.values(**field).is_empty())
            .count();
        let search = self
            .search
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        let toggles = [
            self.current_roles_only
                .is_some_and(|on| on != initial.current_roles_only.unwrap_or(true)),
            toggle_on(self.exclude_education_roles),
            toggle_on(self.only_international),
        ];

        sets + usize::from(!self.date_range.is_open())
            + usize::from(search)
            + toggles.iter().filter(|changed| **changed).count()
    }

    /// True when nothing narrows the result set beyond the page defaults
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }
}

fn toggle_on(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// One raw point of a trend series as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Date label (`YYYY-MM-DD`, RFC 3339 or `YYYY-MM`) or a bucket label
    pub label: String,

    /// Measured value
    pub value: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Columns a result set can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Alumni count
    #[default]
    Count,
    /// Display name
    Name,
    /// Year column (graduations)
    Year,
}

impl SortField {
    /// Direction a field starts in when it becomes the active sort
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Name => SortDirection::Asc,
            Self::Count | Self::Year => SortDirection::Desc,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Name => "name",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "name" => Ok(Self::Name),
            "year" => Ok(Self::Year),
            other => Err(crate::Error::Validation {
                field: "sort_by".to_string(),
                message: format!("unknown sort field {other:?}"),
            }),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(crate::Error::Validation {
                field: "sort_order".to_string(),
                message: format!("unknown sort order {other:?}"),
            }),
        }
    }
}

/// The single active sort of a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Active field
    pub field: SortField,
    /// Active direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort spec for a field in its default direction
    #[must_use]
    pub const fn for_field(field: SortField) -> Self {
        Self {
            field,
            direction: field.default_direction(),
        }
    }

    /// Same field flips the direction, a new field starts at its default
    #[must_use]
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Self::for_field(field)
        }
    }
}

/// One page of a server-side result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Size of the whole unfiltered collection
    #[serde(alias = "totalCount")]
    pub count: u64,

    /// Size of the collection after filters are applied
    pub filtered_count: u64,
}

impl<T> ResultPage<T> {
    /// A page with no items and zero counts
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            filtered_count: 0,
        }
    }

    /// True when the page holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Enforce `items.len() <= page_size` and `filtered_count >= items.len()`
    ///
    /// A backend that breaks either bound gets its excess items dropped and
    /// its filtered count raised rather than an error.
    #[must_use]
    pub fn normalized(mut self, page_size: u32) -> Self {
        let page_size = page_size as usize;
        if self.items.len() > page_size {
            tracing::warn!(
                received = self.items.len(),
                page_size,
                "Backend returned more items than requested, truncating"
            );
            self.items.truncate(page_size);
        }
        let len = self.items.len() as u64;
        if self.filtered_count < len {
            tracing::warn!(
                filtered_count = self.filtered_count,
                items = len,
                "Filtered count below page length, raising it"
            );
            self.filtered_count = len;
        }
        self
    }
}

/// Which population a geographic "add to filter" targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoTarget {
    /// Where the role is located
    #[default]
    Role,
    /// Where the employer is headquartered
    Company,
}

/// Extra context attached to an "add to filter" action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddToFilterExtra {
    /// Graduation year of the row, for graduation tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Geographic target, for country and city tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GeoTarget>,
}

/// Row returned by every analytics list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityListItem {
    /// Identifier (company id, country code, ESCO code, ...)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Alumni count
    #[serde(alias = "alumniCount")]
    pub count: u64,

    /// Logo or flag URL
    #[serde(default, alias = "logo", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Raw trend series, present when the trend was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<DataPoint>>,

    /// Graduation year, for graduation rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Short form shown before the name (faculties, courses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,

    /// Secondary metric (companies per location)
    #[serde(default, alias = "companyCount", skip_serializing_if = "Option::is_none")]
    pub secondary_count: Option<u64>,
}

impl EntityListItem {
    /// Row with just an identifier, a name and a count
    pub fn new(id: impl Into<String>, name: impl Into<String>, count: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            image: None,
            trend: None,
            year: None,
            acronym: None,
            secondary_count: None,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
    })
}

/// Trend window selectable on trend views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendFrequency {
    /// Thirty years
    Max,
    /// Twenty years
    Y20,
    /// Ten years
    Y10,
    /// Five years
    #[default]
    Y5,
    /// Three years
    Y3,
    /// Year to date
    Ytd,
}

impl TrendFrequency {
    /// Frequencies in selector order
    pub const ALL: [Self; 6] = [
        Self::Max,
        Self::Y20,
        Self::Y10,
        Self::Y5,
        Self::Y3,
        Self::Ytd,
    ];

    /// Years covered by the window; 0 for year to date
    #[must_use]
    pub const fn window_years(self) -> i32 {
        match self {
            Self::Max => 30,
            Self::Y20 => 20,
            Self::Y10 => 10,
            Self::Y5 => 5,
            Self::Y3 => 3,
            Self::Ytd => 0,
        }
    }

    /// Year to date keeps monthly points, every other window is quarterly
    #[must_use]
    pub const fn is_quarterly(self) -> bool {
        !matches!(self, Self::Ytd)
    }

    /// Selector label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Max => "MAX",
            Self::Y20 => "Y20",
            Self::Y10 => "Y10",
            Self::Y5 => "Y5",
            Self::Y3 => "Y3",
            Self::Ytd => "YTD",
        }
    }

    /// Caption shown above trend columns, e.g. `2021 - 2026` or `Jan - Oct.26`
    #[must_use]
    pub fn date_range_label(self, today: NaiveDate) -> String {
        match self {
            Self::Ytd => format!("Jan - {}", today.format("%b.%y")),
            windowed => format!(
                "{} - {}",
                today.year() - windowed.window_years(),
                today.year()
            ),
        }
    }
}

impl fmt::Display for TrendFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendFrequency {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::Validation {
                field: "frequency".to_string(),
                message: format!("unknown trend frequency {s:?}"),
            })
    }
}

/// How a result set is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Paginated table with counts
    #[default]
    Table,
    /// Pie chart of the current page
    Chart,
    /// Table with sparkline trends
    Trend,
}

impl ViewMode {
    /// Only the trend view asks the backend for per-row series
    #[must_use]
    pub const fn includes_trend(self) -> bool {
        matches!(self, Self::Trend)
    }
}

impl FromStr for ViewMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "chart" => Ok(Self::Chart),
            "trend" => Ok(Self::Trend),
            other => Err(crate::Error::Validation {
                field: "view".to_string(),
                message: format!("unknown view mode {other:?}"),
            }),
        }
    }
}

/// What kind of picture sits next to a row name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Company logo
    Company,
    /// Country flag or city picture
    Location,
}

impl ImageKind {
    /// Placeholder shown when the picture fails to load
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Company => "/images/placeholders/no-logo.png",
            Self::Location => "/images/placeholders/no-location.png",
        }
    }
}

/// The dashboards sharing the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Employers
    Company,
    /// Countries (role location or headquarters)
    Country,
    /// Cities (role location or headquarters)
    City,
    /// Industries
    Industry,
    /// ESCO occupations
    Role,
    /// Seniority levels
    Seniority,
    /// Faculties
    Faculty,
    /// Courses (majors)
    Course,
    /// Graduation cohorts
    Graduation,
}

impl EntityKind {
    /// All kinds
    pub const ALL: [Self; 9] = [
        Self::Company,
        Self::Country,
        Self::City,
        Self::Industry,
        Self::Role,
        Self::Seniority,
        Self::Faculty,
        Self::Course,
        Self::Graduation,
    ];

    /// Backend path below the API base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Company => "analytics/companies",
            Self::Country => "analytics/geo/countries",
            Self::City => "analytics/geo/cities",
            Self::Industry => "analytics/industries",
            Self::Role => "analytics/roles",
            Self::Seniority => "analytics/roles/seniority",
            Self::Faculty => "analytics/education/faculties",
            Self::Course => "analytics/education/majors",
            Self::Graduation => "analytics/education/graduations",
        }
    }

    /// Lower-case singular noun
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Country => "country",
            Self::City => "city",
            Self::Industry => "industry",
            Self::Role => "role",
            Self::Seniority => "seniority level",
            Self::Faculty => "faculty",
            Self::Course => "course",
            Self::Graduation => "graduation",
        }
    }

    /// Lower-case plural noun
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Country => "countries",
            Self::City => "cities",
            Self::Industry => "industries",
            Self::Role => "roles",
            Self::Seniority => "seniority levels",
            Self::Faculty => "faculties",
            Self::Course => "courses",
            Self::Graduation => "graduations",
        }
    }

    /// Picture shown beside the name, if any
    #[must_use]
    pub const fn image_kind(self) -> Option<ImageKind> {
        match self {
            Self::Company => Some(ImageKind::Company),
            Self::Country | Self::City => Some(ImageKind::Location),
            _ => None,
        }
    }

    /// Detail page for a row, if the entity has one
    #[must_use]
    pub fn link(self, id: &str) -> Option<String> {
        match self {
            Self::Company => Some(format!("/company/{id}")),
            _ => None,
        }
    }

    /// Filter set an "add to filter" on a row of this kind writes to
    #[must_use]
    pub const fn filter_field(self, target: GeoTarget) -> FilterField {
        match (self, target) {
            (Self::Company, _) => FilterField::CompanyIds,
            (Self::Country, GeoTarget::Role) => FilterField::RoleCountryCodes,
            (Self::Country, GeoTarget::Company) => FilterField::CompanyHqCountryCodes,
            (Self::City, GeoTarget::Role) => FilterField::RoleCityIds,
            (Self::City, GeoTarget::Company) => FilterField::CompanyHqCityIds,
            (Self::Industry, _) => FilterField::IndustryIds,
            (Self::Role, _) => FilterField::EscoCodes,
            (Self::Seniority, _) => FilterField::SeniorityLevels,
            (Self::Faculty, _) => FilterField::FacultyIds,
            (Self::Course | Self::Graduation, _) => FilterField::CourseIds,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.singular() == wanted || kind.plural() == wanted)
            .ok_or_else(|| crate::Error::Validation {
                field: "entity".to_string(),
                message: format!("unknown entity {s:?}"),
            })
    }
}

/// Inclusive span of whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    /// First year
    pub start: i32,
    /// Last year
    pub end: i32,
}

impl YearRange {
    /// Range between two years in either order
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Range covering one year
    #[must_use]
    pub const fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// True when start and end coincide
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Whether `year` is inside the range
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}
