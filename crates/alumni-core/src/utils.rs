//! Utility functions for the alumni analytics engine

use crate::Result;
use chrono::{DateTime, Datelike, NaiveDate};

/// Parse the date carried by a trend point label
///
/// # Errors
///
/// Returns [`crate::Error::MalformedLabel`] if the label is not one of
/// `YYYY-MM-DD`, an RFC 3339 timestamp or `YYYY-MM`.
pub fn parse_point_date(label: &str) -> Result<NaiveDate> {
    let label = label.trim();

    if let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(label) {
        return Ok(timestamp.date_naive());
    }
    // Month labels are anchored on the first day
    NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d").map_err(|_| {
        crate::Error::MalformedLabel {
            label: label.to_string(),
        }
    })
}

/// Calendar quarter (1..=4) of a date
#[must_use]
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Round half up, matching how the dashboards display averages
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Up to two upper-case initials of a name
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Cut a label to `max_chars` characters, appending `...` when shortened
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let head: String = label.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

/// Format a count with thousands separators
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
