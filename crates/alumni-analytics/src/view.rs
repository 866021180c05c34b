//! View-mode rendering
//!
//! Turns the state of one dashboard into a framework-agnostic view model.
//! The same row type drives the table, chart and trend views through the
//! [`TableEntity`] accessor trait, and a [`ColumnSpec`] declares the headers
//! and the optional extra column. Rendering is a pure function; only the
//! image slot carries client-side state (whether the picture failed).

use crate::chart::{ChartOptions, PieChart};
use crate::pagination::{PaginationController, PaginationFooter};
use crate::sparkline::Sparkline;
use crate::trend;
use alumni_core::utils::{format_count, initials};
use alumni_core::{
    AddToFilterExtra, DataPoint, EntityKind, EntityListItem, FilterField, FilterState, GeoTarget,
    SortDirection, SortField, TrendFrequency, ViewMode,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Read access to the fields a row is rendered from
pub trait TableEntity {
    /// Identifier passed to "add to filter"
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Primary metric
    fn count(&self) -> u64;

    /// Secondary metric, if the entity has one
    fn secondary_count(&self) -> Option<u64> {
        None
    }

    /// Raw trend series
    fn trend(&self) -> Option<&[DataPoint]> {
        None
    }

    /// Picture URL
    fn image(&self) -> Option<&str> {
        None
    }

    /// Short form displayed before the name
    fn acronym(&self) -> Option<&str> {
        None
    }

    /// Year attached to the row
    fn year(&self) -> Option<i32> {
        None
    }
}

impl TableEntity for EntityListItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn secondary_count(&self) -> Option<u64> {
        self.secondary_count
    }

    fn trend(&self) -> Option<&[DataPoint]> {
        self.trend.as_deref()
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn acronym(&self) -> Option<&str> {
        self.acronym.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Value shown in the optional extra column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraValue {
    /// The row's year
    Year,
    /// The row's secondary count
    SecondaryCount,
}

/// Optional column between the name and the metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraColumn {
    /// Header label
    pub header: String,
    /// Sort field the header toggles, if sortable
    pub sort_field: Option<SortField>,
    /// What the cells show
    pub value: ExtraValue,
}

/// Declarative description of a dashboard's columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Entity the rows belong to
    pub kind: EntityKind,
    /// Name column header
    pub name_header: String,
    /// Metric column header
    pub count_header: String,
    /// Tooltip on the metric header
    pub count_hover: Option<String>,
    /// Optional extra column
    pub extra: Option<ExtraColumn>,
    /// Geographic target attached to "add to filter" on location rows
    pub geo_target: Option<GeoTarget>,
}

impl ColumnSpec {
    /// Columns used by the stock dashboard for `kind`
    #[must_use]
    pub fn for_kind(kind: EntityKind) -> Self {
        let name_header = match kind {
            EntityKind::Company => "Company",
            EntityKind::Country => "Country",
            EntityKind::City => "City",
            EntityKind::Industry => "Industry",
            EntityKind::Role => "Role",
            EntityKind::Seniority => "Seniority",
            EntityKind::Faculty => "Faculty",
            EntityKind::Course | EntityKind::Graduation => "Course",
        };
        let extra = match kind {
            EntityKind::Graduation => Some(ExtraColumn {
                header: "Year".to_string(),
                sort_field: Some(SortField::Year),
                value: ExtraValue::Year,
            }),
            EntityKind::Country | EntityKind::City => Some(ExtraColumn {
                header: "Companies".to_string(),
                sort_field: None,
                value: ExtraValue::SecondaryCount,
            }),
            _ => None,
        };
        let geo_target = matches!(kind, EntityKind::Country | EntityKind::City)
            .then_some(GeoTarget::Role);

        Self {
            kind,
            name_header: name_header.to_string(),
            count_header: "Alumni".to_string(),
            count_hover: Some(format!("Number of alumni per {}", kind.singular())),
            extra,
            geo_target,
        }
    }

    /// Switch location rows to company headquarters
    #[must_use]
    pub const fn with_geo_target(mut self, target: GeoTarget) -> Self {
        self.geo_target = Some(target);
        self
    }

    /// Number of rendered columns: number, name, extra, metric, action
    #[must_use]
    pub const fn column_count(&self) -> usize {
        if self.extra.is_some() { 5 } else { 4 }
    }
}

/// One header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    /// Label
    pub label: String,
    /// Sort field toggled by clicking, if sortable
    pub sort_field: Option<SortField>,
    /// Direction arrow, on the active sort column only
    pub indicator: Option<SortDirection>,
    /// Tooltip
    pub hover: Option<String>,
    /// Second line, e.g. the trend window
    pub caption: Option<String>,
}

impl HeaderCell {
    fn plain(label: &str) -> Self {
        Self {
            label: label.to_string(),
            sort_field: None,
            indicator: None,
            hover: None,
            caption: None,
        }
    }

    fn sortable(label: &str, field: SortField, active: (SortField, SortDirection)) -> Self {
        Self {
            sort_field: Some(field),
            indicator: (active.0 == field).then_some(active.1),
            ..Self::plain(label)
        }
    }
}

/// What an image slot currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImageDisplay {
    /// The remote picture
    Picture(String),
    /// Generic placeholder after a failed load
    Placeholder(&'static str),
    /// Initials when there is no picture at all
    Initials(String),
}

/// Picture next to a row name, with its fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlot {
    src: Option<String>,
    failed: bool,
    initials: String,
    placeholder: &'static str,
}

impl ImageSlot {
    /// Record that the picture failed to load
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Resolve what to draw
    #[must_use]
    pub fn display(&self) -> ImageDisplay {
        match (&self.src, self.failed) {
            (Some(src), false) => ImageDisplay::Picture(src.clone()),
            (Some(_), true) => ImageDisplay::Placeholder(self.placeholder),
            (None, _) => ImageDisplay::Initials(self.initials.clone()),
        }
    }
}

/// Name cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCell {
    /// Text, `ACR - Name` when there is an acronym
    pub text: String,
    /// Detail page
    pub link: Option<String>,
    /// Row is part of the active filters
    pub in_filters: bool,
    /// Picture slot, for entities that have pictures
    pub image: Option<ImageSlot>,
}

/// Metric cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetricCell {
    /// Formatted count
    Count(String),
    /// Trend sparkline
    Trend(Sparkline),
}

/// "Add to filter" button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterAffordance {
    /// Identifier handed to the callback
    pub entity_id: String,
    /// Extra context handed to the callback
    pub extra: AddToFilterExtra,
    /// Tooltip
    pub tooltip: String,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Positional number across pages
    pub number: u64,
    /// Name cell
    pub name: NameCell,
    /// Extra cell text
    pub extra: Option<String>,
    /// Metric cell
    pub metric: MetricCell,
    /// Filter button
    pub filter: FilterAffordance,
}

/// Placeholder shown when a result set is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    /// Headline
    pub message: String,
    /// Explanation
    pub description: String,
    /// Columns spanned
    pub col_span: usize,
}

/// Table body by state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableBody {
    /// Structural skeleton while loading
    Skeleton {
        /// Skeleton rows
        rows: usize,
        /// Columns per row
        columns: usize,
    },
    /// Empty result set
    NotFound(NotFound),
    /// Fetch failed
    Failed {
        /// Error text
        message: String,
        /// Columns spanned
        col_span: usize,
    },
    /// Rows of the current page
    Rows(Vec<Row>),
}

/// Trend window selector shown in the trend footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencySelector {
    /// Available windows
    pub options: Vec<TrendFrequency>,
    /// Active window
    pub selected: TrendFrequency,
}

/// Footer under a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Pagination controls
    pub pagination: PaginationFooter,
    /// Trend window selector, trend view only
    pub frequency: Option<FrequencySelector>,
}

/// Table or trend view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Header row
    pub header: Vec<HeaderCell>,
    /// Body
    pub body: TableBody,
    /// Footer, present only when there are rows
    pub footer: Option<Footer>,
}

/// Chart view body by state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartBody {
    /// Spinner while loading
    Loading,
    /// Empty result set
    NotFound(NotFound),
    /// Fetch failed
    Failed {
        /// Error text
        message: String,
    },
    /// Laid-out pie
    Ready(PieChart),
}

/// Rendered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewModel {
    /// Table or trend view
    Table(TableView),
    /// Chart view
    Chart(ChartBody),
}

/// Data state fed to the renderer
#[derive(Debug)]
pub enum DataState<'a, T> {
    /// Request outstanding
    Loading,
    /// Request failed
    Failed(&'a str),
    /// Rows of the current page
    Ready(&'a [T]),
}

/// Everything [`render`] reads
#[derive(Debug)]
pub struct RenderInput<'a, T> {
    /// Active view
    pub view: ViewMode,
    /// Data state
    pub data: DataState<'a, T>,
    /// Column declaration
    pub columns: &'a ColumnSpec,
    /// Paging and sort
    pub pagination: &'a PaginationController,
    /// Active filters
    pub filters: &'a FilterState,
    /// Trend window
    pub frequency: TrendFrequency,
    /// Reference date for trend windows
    pub today: NaiveDate,
    /// Skeleton row count
    pub skeleton_rows: usize,
    /// Chart layout options
    pub chart: &'a ChartOptions,
}

/// Render the view for the current state
#[must_use]
pub fn render<T: TableEntity>(input: &RenderInput<'_, T>) -> ViewModel {
    match input.view {
        ViewMode::Chart => ViewModel::Chart(render_chart(input)),
        ViewMode::Table | ViewMode::Trend => ViewModel::Table(render_table(input)),
    }
}

fn not_found(kind: EntityKind, filters: &FilterState, col_span: usize) -> NotFound {
    let description = if filters.is_unconstrained() {
        format!("There is no {} data to show yet.", kind.singular())
    } else {
        format!(
            "Try adjusting your filters to find {} that match your criteria.",
            kind.plural()
        )
    };
    NotFound {
        message: format!("No {} data available", kind.singular()),
        description,
        col_span,
    }
}

fn render_chart<T: TableEntity>(input: &RenderInput<'_, T>) -> ChartBody {
    match &input.data {
        DataState::Loading => ChartBody::Loading,
        DataState::Failed(message) => ChartBody::Failed {
            message: message.to_string(),
        },
        DataState::Ready([]) => ChartBody::NotFound(not_found(input.columns.kind, input.filters, 1)),
        DataState::Ready(items) => ChartBody::Ready(PieChart::layout(items, input.chart)),
    }
}

fn header<T>(input: &RenderInput<'_, T>) -> Vec<HeaderCell> {
    let columns = input.columns;
    let sort = input.pagination.sort();
    let active = (sort.field, sort.direction);

    let mut cells = vec![
        HeaderCell::plain("#"),
        HeaderCell::sortable(&columns.name_header, SortField::Name, active),
    ];

    if let Some(extra) = &columns.extra {
        cells.push(match extra.sort_field {
            Some(field) => HeaderCell::sortable(&extra.header, field, active),
            None => HeaderCell::plain(&extra.header),
        });
    }

    let mut metric = HeaderCell::sortable(&columns.count_header, SortField::Count, active);
    metric.hover.clone_from(&columns.count_hover);
    if input.view.includes_trend() {
        metric.caption = Some(input.frequency.date_range_label(input.today));
    }
    cells.push(metric);
    cells.push(HeaderCell::plain(""));
    cells
}

fn row<T: TableEntity>(input: &RenderInput<'_, T>, index: usize, item: &T) -> Row {
    let columns = input.columns;
    let kind = columns.kind;
    let target = columns.geo_target.unwrap_or_default();
    let id = item.id();

    let in_filters = match (kind, item.year()) {
        (EntityKind::Graduation, Some(year)) => {
            input
                .filters
                .contains(FilterField::GraduationYears, &year.to_string())
                && input.filters.contains(FilterField::CourseIds, id)
        }
        _ => input.filters.contains(kind.filter_field(target), id),
    };

    let text = match item.acronym() {
        Some(acronym) => format!("{acronym} - {}", item.name()),
        None => item.name().to_string(),
    };
    let image = kind.image_kind().map(|image_kind| ImageSlot {
        src: item.image().map(ToString::to_string),
        failed: false,
        initials: initials(item.name()),
        placeholder: image_kind.placeholder(),
    });

    let metric = if input.view.includes_trend() {
        let series = item
            .trend()
            .map(|points| trend::bucket(points, input.frequency, input.today))
            .unwrap_or_default();
        MetricCell::Trend(Sparkline::new(series))
    } else {
        MetricCell::Count(format_count(item.count()))
    };

    let extra = columns.extra.as_ref().map(|extra| match extra.value {
        ExtraValue::Year => item.year().map(|y| y.to_string()).unwrap_or_default(),
        ExtraValue::SecondaryCount => item.secondary_count().map(format_count).unwrap_or_default(),
    });

    Row {
        number: input.pagination.row_number(index),
        name: NameCell {
            text,
            link: kind.link(id),
            in_filters,
            image,
        },
        extra,
        metric,
        filter: FilterAffordance {
            entity_id: id.to_string(),
            extra: AddToFilterExtra {
                year: if kind == EntityKind::Graduation { item.year() } else { None },
                kind: columns.geo_target,
            },
            tooltip: format!("Filter on {}", item.name()),
        },
    }
}

fn render_table<T: TableEntity>(input: &RenderInput<'_, T>) -> TableView {
    let header = header(input);
    let col_span = header.len();

    let (body, has_rows) = match &input.data {
        DataState::Loading => (
            TableBody::Skeleton {
                rows: input.skeleton_rows,
                columns: col_span,
            },
            false,
        ),
        DataState::Failed(message) => (
            TableBody::Failed {
                message: format!(
                    "Could not load {} data: {message}",
                    input.columns.kind.singular()
                ),
                col_span,
            },
            false,
        ),
        DataState::Ready([]) => (
            TableBody::NotFound(not_found(input.columns.kind, input.filters, col_span)),
            false,
        ),
        DataState::Ready(items) => (
            TableBody::Rows(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| row(input, index, item))
                    .collect(),
            ),
            true,
        ),
    };

    let footer = has_rows.then(|| Footer {
        pagination: input.pagination.footer(),
        frequency: input.view.includes_trend().then(|| FrequencySelector {
            options: TrendFrequency::ALL.to_vec(),
            selected: input.frequency,
        }),
    });

    TableView {
        header,
        body,
        footer,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixture {
        columns: ColumnSpec,
        pagination: PaginationController,
        filters: FilterState,
        chart: ChartOptions,
    }

    impl Fixture {
        fn new(kind: EntityKind, total: u64) -> Self {
            let mut pagination = PaginationController::new(10, vec![5, 10, 25, 50, 100]);
            pagination.set_total_items(total);
            Self {
                columns: ColumnSpec::for_kind(kind),
                pagination,
                filters: FilterState::initial(),
                chart: ChartOptions::new(400.0, 400.0),
            }
        }

        fn input<'a>(
            &'a self,
            view: ViewMode,
            data: DataState<'a, EntityListItem>,
        ) -> RenderInput<'a, EntityListItem> {
            RenderInput {
                view,
                data,
                columns: &self.columns,
                pagination: &self.pagination,
                filters: &self.filters,
                frequency: TrendFrequency::Y5,
                today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                skeleton_rows: 8,
                chart: &self.chart,
            }
        }
    }

    fn table(model: ViewModel) -> TableView {
        match model {
            ViewModel::Table(table) => table,
            ViewModel::Chart(_) => panic!("expected a table"),
        }
    }

    fn rows(body: &TableBody) -> &[Row] {
        match body {
            TableBody::Rows(rows) => rows,
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_are_numbered_across_pages() {
        let mut fx = Fixture::new(EntityKind::Company, 23);
        fx.pagination.set_page(3).unwrap();
        let items = vec![
            EntityListItem::new("1", "Acme", 9),
            EntityListItem::new("2", "Globex", 4),
            EntityListItem::new("3", "Initech", 1),
        ];
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&items))));
        let numbers: Vec<u64> = rows(&view.body).iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![21, 22, 23]);

        let footer = view.footer.unwrap();
        assert!(!footer.pagination.has_next);
        assert!(footer.pagination.has_prev);
        assert!(footer.frequency.is_none());
    }

    #[test]
    fn test_header_marks_active_sort() {
        let mut fx = Fixture::new(EntityKind::Graduation, 0);
        fx.pagination.set_sort(SortField::Year);
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&[]))));

        let labels: Vec<&str> = view.header.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["#", "Course", "Year", "Alumni", ""]);
        assert_eq!(view.header[2].indicator, Some(SortDirection::Desc));
        assert_eq!(view.header[1].indicator, None);
        assert_eq!(view.header[3].sort_field, Some(SortField::Count));
        assert_eq!(view.header[3].indicator, None);
    }

    #[test]
    fn test_loading_skeleton_ignores_page_size() {
        let mut fx = Fixture::new(EntityKind::Industry, 500);
        fx.pagination.set_page_size(100).unwrap();
        let view = table(render(&fx.input(ViewMode::Table, DataState::Loading)));
        assert_eq!(view.body, TableBody::Skeleton { rows: 8, columns: 4 });
        assert!(view.footer.is_none());
    }

    #[test]
    fn test_not_found_copy_depends_on_filters() {
        let fx = Fixture::new(EntityKind::Company, 0);
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&[]))));
        let TableBody::NotFound(unfiltered) = view.body else {
            panic!("expected not found");
        };
        assert_eq!(unfiltered.message, "No company data available");
        assert_eq!(unfiltered.description, "There is no company data to show yet.");
        assert_eq!(unfiltered.col_span, 4);

        let mut fx = Fixture::new(EntityKind::Company, 0);
        fx.filters.industry_ids.push("3".to_string());
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&[]))));
        let TableBody::NotFound(filtered) = view.body else {
            panic!("expected not found");
        };
        assert_eq!(
            filtered.description,
            "Try adjusting your filters to find companies that match your criteria."
        );
    }

    #[test]
    fn test_failed_is_distinct_from_empty() {
        let fx = Fixture::new(EntityKind::City, 0);
        let view = table(render(&fx.input(ViewMode::Table, DataState::Failed("timeout"))));
        assert_eq!(
            view.body,
            TableBody::Failed {
                message: "Could not load city data: timeout".to_string(),
                col_span: 5,
            }
        );
    }

    #[test]
    fn test_trend_view_renders_sparklines_and_selector() {
        let fx = Fixture::new(EntityKind::Company, 1);
        let mut item = EntityListItem::new("1", "Acme", 9);
        item.trend = Some(vec![
            DataPoint::new("2021-01-01", 10.0),
            DataPoint::new("2021-02-01", 20.0),
            DataPoint::new("2023-05-01", 40.0),
        ]);
        let items = vec![item];
        let view = table(render(&fx.input(ViewMode::Trend, DataState::Ready(&items))));

        assert_eq!(view.header[2].caption.as_deref(), Some("2019 - 2024"));
        let MetricCell::Trend(spark) = &rows(&view.body)[0].metric else {
            panic!("expected a sparkline");
        };
        assert_eq!(spark.series.len(), 2);
        assert_eq!(spark.series[0], DataPoint::new("2021-Q1", 15.0));

        let selector = view.footer.unwrap().frequency.unwrap();
        assert_eq!(selector.selected, TrendFrequency::Y5);
        assert_eq!(selector.options.len(), 6);
    }

    #[test]
    fn test_row_in_filters_and_affordance() {
        let mut fx = Fixture::new(EntityKind::Country, 2);
        fx.filters.role_country_codes.push("PT".to_string());
        let mut pt = EntityListItem::new("PT", "Portugal", 120);
        pt.secondary_count = Some(1500);
        let items = vec![pt, EntityListItem::new("ES", "Spain", 30)];
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&items))));
        let rows = rows(&view.body);

        assert!(rows[0].name.in_filters);
        assert!(!rows[1].name.in_filters);
        assert_eq!(rows[0].extra.as_deref(), Some("1,500"));
        assert_eq!(rows[0].metric, MetricCell::Count("120".to_string()));
        assert_eq!(
            rows[0].filter,
            FilterAffordance {
                entity_id: "PT".to_string(),
                extra: AddToFilterExtra {
                    year: None,
                    kind: Some(GeoTarget::Role)
                },
                tooltip: "Filter on Portugal".to_string(),
            }
        );
    }

    #[test]
    fn test_graduation_row_carries_year() {
        let fx = Fixture::new(EntityKind::Graduation, 1);
        let mut item = EntityListItem::new("17", "Informatics", 80);
        item.year = Some(2019);
        item.acronym = Some("MIEIC".to_string());
        let items = vec![item];
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&items))));
        let row = &rows(&view.body)[0];

        assert_eq!(row.name.text, "MIEIC - Informatics");
        assert_eq!(row.extra.as_deref(), Some("2019"));
        assert_eq!(row.filter.extra.year, Some(2019));
        assert!(row.name.image.is_none());
    }

    #[test]
    fn test_image_slot_falls_back() {
        let fx = Fixture::new(EntityKind::Company, 2);
        let mut logo = EntityListItem::new("1", "Acme Corp", 5);
        logo.image = Some("https://cdn/acme.png".to_string());
        let items = vec![logo, EntityListItem::new("2", "globex industries", 3)];
        let view = table(render(&fx.input(ViewMode::Table, DataState::Ready(&items))));
        let rows = rows(&view.body);

        let mut slot = rows[0].name.image.clone().unwrap();
        assert_eq!(slot.display(), ImageDisplay::Picture("https://cdn/acme.png".to_string()));
        slot.mark_failed();
        assert_eq!(
            slot.display(),
            ImageDisplay::Placeholder("/images/placeholders/no-logo.png")
        );

        let slot = rows[1].name.image.clone().unwrap();
        assert_eq!(slot.display(), ImageDisplay::Initials("GI".to_string()));
        assert_eq!(rows[0].name.link.as_deref(), Some("/company/1"));
    }

    #[test]
    fn test_chart_view_states() {
        let fx = Fixture::new(EntityKind::Industry, 2);
        assert_eq!(
            render(&fx.input(ViewMode::Chart, DataState::Loading)),
            ViewModel::Chart(ChartBody::Loading)
        );

        let items = vec![
            EntityListItem::new("1", "Software", 30),
            EntityListItem::new("2", "Banking", 10),
        ];
        let ViewModel::Chart(ChartBody::Ready(chart)) =
            render(&fx.input(ViewMode::Chart, DataState::Ready(&items)))
        else {
            panic!("expected a chart");
        };
        assert_eq!(chart.arcs.len(), 2);
        assert_eq!(chart.arcs[0].percent_label.as_deref(), Some("75.0%"));
    }
}
