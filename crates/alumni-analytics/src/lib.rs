//! Analytics view and temporal aggregation engine for alumni dashboards
//!
//! This crate turns paginated, filterable entity lists (companies, locations,
//! industries, roles, education) into table, pie-chart and trend views. It
//! derives backend requests from filter, paging and sort state, applies only
//! the newest response, buckets trend series into quarters, and drives the
//! year-range scrubber. Rendering produces plain view models so any frontend,
//! including the bundled terminal one, can draw them.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    clippy::suboptimal_flops
)]

pub mod cache;
pub mod chart;
pub mod client;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod loading;
pub mod mock;
pub mod pagination;
pub mod request;
pub mod scrubber;
pub mod sparkline;
pub mod text;
pub mod trend;
pub mod view;

pub use cache::ResponseCache;
pub use chart::{ChartMetric, ChartOptions, PieChart};
pub use client::HttpAnalyticsSource;
pub use dashboard::{Completion, Dashboard, FetchStart};
pub use debounce::DebouncedCommit;
pub use error::{AnalyticsError, AnalyticsResult};
pub use fetch::{AnalyticsSource, FetchState, FetchTicket, RequestTracker};
pub use filters::FilterController;
pub use loading::{LoadingGuard, LoadingScope};
pub use mock::MockAnalyticsSource;
pub use pagination::{PageInput, PaginationController, PaginationFooter};
pub use request::FetchRequest;
pub use scrubber::{PointerEvent, ScrubberMode, ScrubberState, TemporalScrubber, Track};
pub use sparkline::Sparkline;
pub use trend::{TrendDirection, bucket};
pub use view::{ColumnSpec, TableEntity, ViewModel, render};
