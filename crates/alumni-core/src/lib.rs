//! Core types and utilities for the alumni analytics engine

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use types::{
    AddToFilterExtra, DataPoint, DateRange, EntityKind, EntityListItem, FilterField, FilterState,
    GeoTarget, ResultPage, SortDirection, SortField, SortSpec, TrendFrequency, ViewMode, YearRange,
};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level. The `text` format writes
/// human-readable lines, anything else writes JSON. Logs go to stderr so
/// they never mix with rendered views on stdout.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format.eq_ignore_ascii_case("text") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Configuration {
        message: format!("failed to install tracing subscriber: {e}"),
    })
}
