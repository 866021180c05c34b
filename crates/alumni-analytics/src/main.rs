//! Alumni analytics dashboard CLI
//!
//! Fetches entity pages from the analytics backend and prints the table,
//! chart or trend view in the terminal. Also exposes the trend bucketer and
//! the scrubber tick layout for inspection.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use alumni_analytics::text::{render_text, spark_blocks};
use alumni_analytics::{
    AnalyticsSource, Dashboard, HttpAnalyticsSource, LoadingScope, TemporalScrubber, Track,
    bucket,
};
use alumni_core::{
    Config, DataPoint, EntityKind, FilterField, FilterState, SortDirection, SortField,
    TrendFrequency, ViewMode,
};
use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command line interface for the alumni analytics dashboards
#[derive(Parser)]
#[command(
    name = "alumni-dash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal front end for the alumni analytics dashboards"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print view models as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Fetch and print one page of an entity table
    List {
        /// Entity (company, country, city, industry, role, seniority, faculty, course, graduation)
        entity: EntityKind,

        /// View (table, chart, trend)
        #[arg(short, long, default_value = "table")]
        view: ViewMode,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Rows per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Sort column (count, name, year)
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort direction (asc, desc)
        #[arg(long)]
        order: Option<SortDirection>,

        /// Trend window (MAX, Y20, Y10, Y5, Y3, YTD)
        #[arg(long)]
        frequency: Option<TrendFrequency>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Filter as `field=value`, e.g. `companyIds=42`; repeatable
        #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,

        /// Reference date for trend windows (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Print total and filtered counts for every entity
    Summary {
        /// Filter as `field=value`; repeatable
        #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Bucket a JSON array of `{label, value}` points
    Bucket {
        /// JSON file with the raw series
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Trend window
        #[arg(short, long, default_value = "Y5")]
        frequency: TrendFrequency,

        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Print the scrubber tick marks for a span of years
    Ticks {
        /// First year (defaults to the configured minimum)
        #[arg(long)]
        from: Option<i32>,

        /// Last year (defaults to the configured maximum or the current year)
        #[arg(long)]
        to: Option<i32>,
    },
}

/// Main entry point for the dashboard CLI
///
/// # Errors
///
/// Returns error if configuration, the backend or the input files fail
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    alumni_core::init_logging(&config.logging)?;
    config.check()?;

    debug!(version = env!("CARGO_PKG_VERSION"), "alumni-dash starting");
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::List {
            entity,
            view,
            page,
            page_size,
            sort,
            order,
            frequency,
            search,
            filters,
            today: fixed_today,
        } => {
            let mut state = parse_filters(&filters)?;
            state.search = search;
            let options = ListOptions {
                view,
                page,
                page_size,
                sort,
                order,
                frequency,
                today: fixed_today.unwrap_or(today),
            };
            list(&config, entity, state, &options, cli.json).await
        }
        Commands::Summary { filters } => summary(&config, parse_filters(&filters)?, cli.json).await,
        Commands::Bucket {
            file,
            frequency,
            today: fixed_today,
        } => bucket_file(&file, frequency, fixed_today.unwrap_or(today), cli.json),
        Commands::Ticks { from, to } => {
            ticks(&config, from, to, today.year(), cli.json);
            Ok(())
        }
    }
}

/// Load configuration from file or environment
///
/// # Errors
///
/// Returns error if the configuration file cannot be read or parsed
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::load_from(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))
        }
        None => Config::load().context("failed to load configuration"),
    }
}

/// Parse repeated `field=value` arguments into a filter state
fn parse_filters(args: &[String]) -> Result<FilterState> {
    let mut state = FilterState::initial();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("filter {arg:?} is not of the form field=value");
        };
        let Some(field) = FilterField::ALL.into_iter().find(|f| f.wire_name() == key) else {
            let known: Vec<&str> = FilterField::ALL.iter().map(|f| f.wire_name()).collect();
            bail!("unknown filter field {key:?}; expected one of {}", known.join(", "));
        };
        state.insert(field, value.trim());
    }
    Ok(state)
}

/// Options of the `list` subcommand
struct ListOptions {
    view: ViewMode,
    page: u32,
    page_size: Option<u32>,
    sort: Option<SortField>,
    order: Option<SortDirection>,
    frequency: Option<TrendFrequency>,
    today: NaiveDate,
}

/// Fetch one page of `kind` and print it
///
/// # Errors
///
/// Returns error if the backend cannot be reached or the options are invalid
async fn list(
    config: &Config,
    kind: EntityKind,
    filters: FilterState,
    options: &ListOptions,
    json: bool,
) -> Result<()> {
    let source = HttpAnalyticsSource::from_config(&config.api)?;
    let loading = LoadingScope::new();
    let mut dashboard = Dashboard::new(kind, &config.dashboard);

    dashboard.set_filters(filters);
    dashboard.set_view(options.view);
    if let Some(size) = options.page_size {
        dashboard.set_page_size(size)?;
    }
    if let Some(field) = options.sort
        && dashboard.pagination().sort().field != field
    {
        dashboard.set_sort(field);
    }
    if let Some(order) = options.order
        && dashboard.pagination().sort().direction != order
    {
        let field = dashboard.pagination().sort().field;
        dashboard.set_sort(field);
    }
    if let Some(frequency) = options.frequency {
        dashboard.set_trend_frequency(frequency);
    }

    dashboard.refresh(&source, &loading).await;
    if options.page > 1 {
        dashboard.set_page(options.page)?;
        dashboard.refresh(&source, &loading).await;
    }

    let model = dashboard.view_model(options.today);
    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        let (count, filtered) = dashboard.counts();
        let title = format!("{} ({filtered} of {count})", capitalize(kind.plural()));
        print!("{}", render_text(&title, &model));
    }
    Ok(())
}

/// Fetch the counts of every entity concurrently and print them
///
/// # Errors
///
/// Returns error if the backend cannot be reached
async fn summary(config: &Config, filters: FilterState, json: bool) -> Result<()> {
    let source = HttpAnalyticsSource::from_config(&config.api)?;
    let loading = LoadingScope::new();

    let fetches = EntityKind::ALL.into_iter().map(|kind| {
        let mut dashboard = Dashboard::new(kind, &config.dashboard);
        dashboard.set_filters(filters.clone());
        let request = dashboard.request();
        let source = &source;
        let loading = &loading;
        async move {
            let result = loading.with_loading(source.fetch_page(kind, &request)).await;
            (kind, result)
        }
    });

    let mut rows = Vec::new();
    for (kind, result) in join_all(fetches).await {
        let page = result.with_context(|| format!("failed to fetch {}", kind.plural()))?;
        rows.push((kind, page.count, page.filtered_count));
    }

    if json {
        let value: Vec<_> = rows
            .iter()
            .map(|(kind, count, filtered)| {
                serde_json::json!({ "entity": kind.singular(), "count": count, "filteredCount": filtered })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (kind, count, filtered) in rows {
            println!("{:<12} {filtered:>8} of {count}", capitalize(kind.plural()));
        }
    }
    Ok(())
}

/// Bucket the series stored in `file`
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a JSON array of points
fn bucket_file(file: &Path, frequency: TrendFrequency, today: NaiveDate, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let points: Vec<DataPoint> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of points", file.display()))?;

    let series = bucket(&points, frequency, today);
    info!(input = points.len(), output = series.len(), %frequency, "Bucketed series");

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        println!("{} ({})", frequency, frequency.date_range_label(today));
        for point in &series {
            println!("{:<10} {}", point.label, point.value);
        }
        println!("{}", spark_blocks(&series));
    }
    Ok(())
}

/// Print tick marks for the configured or given span
fn ticks(config: &Config, from: Option<i32>, to: Option<i32>, current_year: i32, json: bool) {
    let mut scrubber_config = config.scrubber.clone();
    if let Some(from) = from {
        scrubber_config.min_year = from;
    }
    if let Some(to) = to {
        scrubber_config.max_year = Some(to);
    }
    let scrubber = TemporalScrubber::from_config(&scrubber_config, current_year, Track::new(0.0, 0.0));
    let ticks = scrubber.ticks();

    if json {
        println!("{}", serde_json::json!({ "range": scrubber.bounds(), "ticks": ticks }));
    } else {
        let labels: Vec<String> = ticks.iter().map(ToString::to_string).collect();
        println!("{}: {}", scrubber.bounds(), labels.join(" "));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
