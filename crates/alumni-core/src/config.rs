//! Configuration management for the alumni analytics engine

use crate::types::TrendFrequency;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Analytics backend
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,

    /// Table, paging and caching behaviour
    #[serde(default)]
    #[validate(nested)]
    pub dashboard: DashboardConfig,

    /// Temporal scrubber behaviour
    #[serde(default)]
    #[validate(nested)]
    pub scrubber: ScrubberConfig,

    /// Pie chart layout
    #[serde(default)]
    #[validate(nested)]
    pub chart: ChartConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL the entity paths are appended to
    #[serde(default = "default_base_url")]
    #[validate(length(min = 1))]
    pub base_url: String,

    /// Optional API key sent as `X-API-Key`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub request_timeout: u64,
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct DashboardConfig {
    /// Rows per page when a dashboard mounts
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Page sizes offered by the selector
    #[serde(default = "default_page_size_options")]
    #[validate(length(min = 1))]
    pub page_size_options: Vec<u32>,

    /// Rows drawn by the loading skeleton
    #[serde(default = "default_skeleton_rows")]
    #[validate(range(min = 1, max = 100))]
    pub skeleton_rows: usize,

    /// Trend window a dashboard starts with
    #[serde(default)]
    pub default_trend_frequency: TrendFrequency,

    /// Seconds a cached page is served without refetching
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    /// Maximum cached pages per dashboard
    #[serde(default = "default_cache_capacity")]
    #[validate(range(max = 10_000))]
    pub cache_capacity: usize,
}

/// Temporal scrubber configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScrubberConfig {
    /// First selectable year
    #[serde(default = "default_min_year")]
    #[validate(range(min = 1900, max = 2100))]
    pub min_year: i32,

    /// Last selectable year; the current year when unset
    #[serde(default)]
    pub max_year: Option<i32>,

    /// Quiet period before a range change is committed, in milliseconds
    #[serde(default = "default_debounce_ms")]
    #[validate(range(min = 1, max = 60_000))]
    pub debounce_ms: u64,

    /// Years between tick marks
    #[serde(default = "default_tick_interval")]
    #[validate(range(min = 1, max = 100))]
    pub tick_interval: i32,

    /// Pixels around a handle that still grab it
    #[serde(default = "default_handle_hit_radius")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub handle_hit_radius: f64,
}

/// Pie chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChartConfig {
    /// Items drawn as arcs
    #[serde(default = "default_top_n")]
    #[validate(range(min = 1, max = 50))]
    pub top_n: usize,

    /// Minimum share (percent) for a percentage label
    #[serde(default = "default_percent_label_threshold")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub percent_label_threshold: f64,

    /// Minimum share (percent) for a name label
    #[serde(default = "default_name_label_threshold")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub name_label_threshold: f64,

    /// Opacity of arcs that are not hovered
    #[serde(default = "default_dimmed_opacity")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub dimmed_opacity: f64,

    /// Pixels the hovered arc grows by
    #[serde(default = "default_hover_growth")]
    pub hover_growth: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    10
}

fn default_page_size_options() -> Vec<u32> {
    vec![5, 10, 25, 50, 100]
}

const fn default_skeleton_rows() -> usize {
    8
}

const fn default_cache_ttl() -> u64 {
    300
}

const fn default_cache_capacity() -> usize {
    64
}

const fn default_min_year() -> i32 {
    1994
}

const fn default_debounce_ms() -> u64 {
    1000
}

const fn default_tick_interval() -> i32 {
    5
}

const fn default_handle_hit_radius() -> f64 {
    12.0
}

const fn default_top_n() -> usize {
    10
}

const fn default_percent_label_threshold() -> f64 {
    4.0
}

const fn default_name_label_threshold() -> f64 {
    7.0
}

const fn default_dimmed_opacity() -> f64 {
    0.7
}

const fn default_hover_growth() -> f64 {
    15.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn validate_page_sizes(dashboard: &DashboardConfig) -> Result<(), ValidationError> {
    if dashboard.page_size_options.contains(&0) {
        return Err(ValidationError::new("page_size_zero"));
    }
    if !dashboard
        .page_size_options
        .contains(&dashboard.default_page_size)
    {
        return Err(ValidationError::new("default_page_size_not_offered"));
    }
    Ok(())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            skeleton_rows: default_skeleton_rows(),
            default_trend_frequency: TrendFrequency::default(),
            cache_ttl: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: None,
            debounce_ms: default_debounce_ms(),
            tick_interval: default_tick_interval(),
            handle_hit_radius: default_handle_hit_radius(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            percent_label_threshold: default_percent_label_threshold(),
            name_label_threshold: default_name_label_threshold(),
            dimmed_opacity: default_dimmed_opacity(),
            hover_growth: default_hover_growth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `alumni-analytics.{toml,json,yaml}` and `ALUMNI_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("alumni-analytics").required(false))
    }

    /// Load configuration from an explicit file, still honouring `ALUMNI_*` overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed or fails validation.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("ALUMNI").separator("__"))
            .build()?
            .try_deserialize()?;

        config.check()?;
        Ok(config)
    }

    /// Run the declarative validation rules
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the first offending field.
    pub fn check(&self) -> crate::Result<()> {
        self.validate().map_err(|errors| crate::Error::Validation {
            field: errors
                .errors()
                .keys()
                .next()
                .map_or_else(|| "config".to_string(), ToString::to_string),
            message: errors.to_string(),
        })
    }

    /// Last year the scrubber can select, given the current year
    #[must_use]
    pub fn scrubber_max_year(&self, current_year: i32) -> i32 {
        self.scrubber
            .max_year
            .unwrap_or(current_year)
            .max(self.scrubber.min_year)
    }
}
