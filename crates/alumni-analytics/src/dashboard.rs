//! Entity-agnostic analytics dashboard
//!
//! One [`Dashboard`] drives any of the entity tables: it owns a read-only
//! copy of the page filters, the pagination and sort state, the view mode and
//! trend window, and the bookkeeping that makes sure only the response for
//! the latest request ever reaches the screen.

use crate::cache::ResponseCache;
use crate::chart::ChartOptions;
use crate::error::AnalyticsResult;
use crate::fetch::{AnalyticsSource, FetchState, FetchTicket, RequestTracker};
use crate::filters::FilterController;
use crate::loading::LoadingScope;
use crate::pagination::{PageInput, PaginationController};
use crate::request::FetchRequest;
use crate::view::{ColumnSpec, DataState, RenderInput, ViewModel, render};
use alumni_core::config::DashboardConfig;
use alumni_core::{
    EntityKind, EntityListItem, FilterState, ResultPage, SortField, SortSpec, TrendFrequency,
    ViewMode,
};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info, warn};

type Page = ResultPage<EntityListItem>;

/// How [`Dashboard::begin_fetch`] was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStart {
    /// A fresh cached page was applied immediately
    Cached,
    /// The caller must fetch and hand the result to [`Dashboard::complete`]
    Pending(FetchTicket),
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response became the visible state
    Applied,
    /// The response belonged to an abandoned request and was dropped
    Discarded,
}

/// State of one analytics table
#[derive(Debug)]
pub struct Dashboard {
    kind: EntityKind,
    columns: ColumnSpec,
    filters: FilterState,
    filters_revision: Option<u64>,
    pagination: PaginationController,
    page_input: PageInput,
    view: ViewMode,
    frequency: TrendFrequency,
    tracker: RequestTracker,
    cache: ResponseCache<Page>,
    state: FetchState,
    counts: (u64, u64),
    chart: ChartOptions,
    skeleton_rows: usize,
}

impl Dashboard {
    /// Dashboard for `kind` with the stock columns
    #[must_use]
    pub fn new(kind: EntityKind, config: &DashboardConfig) -> Self {
        let pagination =
            PaginationController::new(config.default_page_size, config.page_size_options.clone());
        let page_input = PageInput::new(pagination.page());
        Self {
            kind,
            columns: ColumnSpec::for_kind(kind),
            filters: FilterState::initial(),
            filters_revision: None,
            pagination,
            page_input,
            view: ViewMode::default(),
            frequency: config.default_trend_frequency,
            tracker: RequestTracker::new(),
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl), config.cache_capacity),
            state: FetchState::Idle,
            counts: (0, 0),
            chart: ChartOptions::new(560.0, 420.0),
            skeleton_rows: config.skeleton_rows,
        }
    }

    /// Use custom columns
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// Use custom chart options
    #[must_use]
    pub fn with_chart(mut self, chart: ChartOptions) -> Self {
        self.chart = chart;
        self
    }

    /// Entity shown
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Column declaration
    #[must_use]
    pub const fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    /// Filters in effect
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Paging and sort
    #[must_use]
    pub const fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    /// Page number box
    #[must_use]
    pub const fn page_input(&self) -> &PageInput {
        &self.page_input
    }

    /// Active view
    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Active trend window
    #[must_use]
    pub const fn frequency(&self) -> TrendFrequency {
        self.frequency
    }

    /// Data state
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// `(count, filtered_count)` of the last applied page
    #[must_use]
    pub const fn counts(&self) -> (u64, u64) {
        self.counts
    }

    /// Switch to another entity of the same family, e.g. after a drill-down
    pub fn set_kind(&mut self, kind: EntityKind) {
        if kind == self.kind {
            return;
        }
        let geo_target = self.columns.geo_target;
        self.kind = kind;
        self.columns = ColumnSpec::for_kind(kind);
        if let Some(target) = geo_target
            && self.columns.geo_target.is_some()
        {
            self.columns.geo_target = Some(target);
        }
        self.cache.clear();
        self.state = FetchState::Idle;
        self.reset_page();
        info!(kind = %kind, "Dashboard switched entity");
    }

    /// Replace the filters; the page goes back to 1
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.reset_page();
        debug!(kind = %self.kind, "Filters replaced");
    }

    /// Adopt the controller's filters if they changed since the last call
    ///
    /// Returns true when the filters were replaced.
    pub fn follow(&mut self, controller: &FilterController) -> bool {
        if self.filters_revision == Some(controller.revision()) {
            return false;
        }
        self.filters_revision = Some(controller.revision());
        self.set_filters(controller.filters().clone());
        true
    }

    /// Toggle the sort on `field`; the page is kept
    pub fn set_sort(&mut self, field: SortField) -> SortSpec {
        self.pagination.set_sort(field)
    }

    /// Jump to `page`
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is outside the known page range.
    pub fn set_page(&mut self, page: u32) -> AnalyticsResult<u32> {
        let page = self.pagination.set_page(page)?;
        self.page_input.sync(page);
        Ok(page)
    }

    /// Next page, if any
    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next_page();
        self.page_input.sync(self.pagination.page());
        moved
    }

    /// Previous page, if any
    pub fn prev_page(&mut self) -> bool {
        let moved = self.pagination.prev_page();
        self.page_input.sync(self.pagination.page());
        moved
    }

    /// Type into the page number box
    pub fn edit_page_input(&mut self, text: impl Into<String>) {
        self.page_input.edit(text);
    }

    /// Commit the page number box (Enter or blur)
    ///
    /// # Errors
    ///
    /// Returns an error for non-numeric or out-of-range input; the box
    /// reverts to the current page.
    pub fn commit_page_input(&mut self) -> AnalyticsResult<u32> {
        Ok(self.page_input.commit(&mut self.pagination)?)
    }

    /// Discard the page number edit (Escape)
    pub fn cancel_page_input(&mut self) {
        self.page_input.cancel();
    }

    /// Change rows per page; the page index is kept
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not an offered page size.
    pub fn set_page_size(&mut self, size: u32) -> AnalyticsResult<()> {
        Ok(self.pagination.set_page_size(size)?)
    }

    /// Switch between table, chart and trend
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Change the trend window; bucketing is client-side so nothing is refetched
    pub fn set_trend_frequency(&mut self, frequency: TrendFrequency) {
        self.frequency = frequency;
    }

    /// Request for the current state
    #[must_use]
    pub fn request(&self) -> FetchRequest {
        FetchRequest::derive(&self.filters, &self.pagination, self.view)
    }

    /// Start loading the current request
    ///
    /// A fresh cached page is applied at once; otherwise the state turns to
    /// loading and the returned ticket must be completed.
    pub fn begin_fetch(&mut self) -> FetchStart {
        let request = self.request();
        if let Some(page) = self.cache.get(&request) {
            debug!(kind = %self.kind, "Serving page from cache");
            self.apply(page);
            return FetchStart::Cached;
        }
        self.state = FetchState::Loading;
        FetchStart::Pending(self.tracker.begin(request))
    }

    /// Hand in the result for `ticket`
    ///
    /// The result is applied only if the ticket's request is still the
    /// current request; otherwise it is discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, result: AnalyticsResult<Page>) -> Completion {
        let current = self.request();
        if !self.tracker.settle(ticket, &current) {
            debug!(
                kind = %self.kind,
                sequence = ticket.sequence(),
                "Discarding response for abandoned request"
            );
            return Completion::Discarded;
        }

        match result {
            Ok(page) => {
                self.cache.insert(ticket.request().clone(), page.clone());
                self.apply(page);
            }
            Err(err) => {
                warn!(kind = %self.kind, error = %err, "Analytics fetch failed");
                self.state = FetchState::Failed {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                };
            }
        }
        Completion::Applied
    }

    /// Fetch the current request from `source` under `loading`
    ///
    /// When the response pulls the page back inside a shrunken result, the
    /// page it moved to is fetched as well.
    pub async fn refresh(
        &mut self,
        source: &dyn AnalyticsSource,
        loading: &LoadingScope,
    ) -> Completion {
        let requested = self.request();
        let completion = self.fetch_current(source, loading).await;
        if completion == Completion::Applied && self.request() != requested {
            debug!(kind = %self.kind, page = self.pagination.page(), "Page moved, fetching it");
            return self.fetch_current(source, loading).await;
        }
        completion
    }

    async fn fetch_current(
        &mut self,
        source: &dyn AnalyticsSource,
        loading: &LoadingScope,
    ) -> Completion {
        let ticket = match self.begin_fetch() {
            FetchStart::Cached => return Completion::Applied,
            FetchStart::Pending(ticket) => ticket,
        };
        debug!(kind = %self.kind, source = source.name(), "Refreshing dashboard");
        let result = loading
            .with_loading(source.fetch_page(self.kind, ticket.request()))
            .await;
        self.complete(&ticket, result)
    }

    /// Drop every cached page
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
    }

    /// Render the current state
    #[must_use]
    pub fn view_model(&self, today: NaiveDate) -> ViewModel {
        let data = match &self.state {
            FetchState::Idle | FetchState::Loading => DataState::Loading,
            FetchState::Failed { message, .. } => DataState::Failed(message),
            FetchState::Ready(page) => DataState::Ready(&page.items),
        };
        render(&RenderInput {
            view: self.view,
            data,
            columns: &self.columns,
            pagination: &self.pagination,
            filters: &self.filters,
            frequency: self.frequency,
            today,
            skeleton_rows: self.skeleton_rows,
            chart: &self.chart,
        })
    }

    fn apply(&mut self, page: Page) {
        self.pagination.set_total_items(page.filtered_count);
        if self.pagination.clamp_to_total() {
            self.page_input.sync(self.pagination.page());
        }
        self.counts = (page.count, page.filtered_count);
        self.state = FetchState::Ready(page);
    }

    fn reset_page(&mut self) {
        self.pagination.reset_page();
        self.page_input.sync(self.pagination.page());
    }
}
