//! Client-side trend bucketing
//!
//! The backend sends one point per month. Trend views show either the raw
//! months of the current year (YTD) or quarterly averages over a window of
//! whole years ending today. Bucketing is a pure function of the points,
//! the frequency and the reference date, so callers pass `today` explicitly.

use alumni_core::utils::{parse_point_date, quarter_of, round_half_up};
use alumni_core::{DataPoint, TrendFrequency};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

/// Bucket raw monthly points into the series drawn for `frequency`
///
/// Points are re-sorted by date, restricted to `[cutoff, today]` and, for
/// every window but YTD, averaged per calendar quarter with labels like
/// `2021-Q1`. Points whose label is not a date are skipped.
#[must_use]
pub fn bucket(points: &[DataPoint], frequency: TrendFrequency, today: NaiveDate) -> Vec<DataPoint> {
    let cutoff = window_start(frequency, today);

    let mut dated: Vec<(NaiveDate, &DataPoint)> = points
        .iter()
        .filter_map(|point| match parse_point_date(&point.label) {
            Ok(date) => Some((date, point)),
            Err(err) => {
                debug!(label = %point.label, error = %err, "Skipping trend point");
                None
            }
        })
        .filter(|(date, _)| *date >= cutoff && *date <= today)
        .collect();
    dated.sort_by_key(|(date, _)| *date);

    if !frequency.is_quarterly() {
        return dated.into_iter().map(|(_, point)| point.clone()).collect();
    }

    let mut quarters: BTreeMap<(i32, u32), (f64, u32)> = BTreeMap::new();
    for (date, point) in dated {
        let entry = quarters
            .entry((date.year(), quarter_of(date)))
            .or_insert((0.0, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    quarters
        .into_iter()
        .map(|((year, quarter), (sum, n))| {
            DataPoint::new(
                format!("{year}-Q{quarter}"),
                round_half_up(sum / f64::from(n)),
            )
        })
        .collect()
}

/// First day included by a window ending on `today`
#[must_use]
pub fn window_start(frequency: TrendFrequency, today: NaiveDate) -> NaiveDate {
    let (year, month) = match frequency {
        TrendFrequency::Ytd => (today.year(), 1),
        windowed => (today.year() - windowed.window_years(), today.month()),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Direction of a series from its first to its last value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    /// Last value above the first
    Up,
    /// Last value below the first
    Down,
    /// Equal ends, or nothing to compare
    Neutral,
}

impl TrendDirection {
    /// Compare the ends of a series
    #[must_use]
    pub fn of(series: &[DataPoint]) -> Self {
        match (series.first(), series.last()) {
            (Some(first), Some(last)) if last.value > first.value => Self::Up,
            (Some(first), Some(last)) if last.value < first.value => Self::Down,
            _ => Self::Neutral,
        }
    }
}
