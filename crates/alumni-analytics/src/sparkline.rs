//! Sparkline geometry for trend cells

use crate::trend::TrendDirection;
use alumni_core::DataPoint;
use serde::Serialize;
use std::fmt::Write as _;

/// Cell width in pixels
pub const WIDTH: f64 = 65.0;
/// Cell height in pixels
pub const HEIGHT: f64 = 30.0;
/// Inner padding in pixels
pub const PADDING: f64 = 2.0;
/// Radius of the marker on the last point
pub const MARKER_RADIUS: f64 = 3.0;

/// Stroke colour for a rising series
pub const COLOR_UP: &str = "#22c55e";
/// Stroke colour for a falling series
pub const COLOR_DOWN: &str = "#ef4444";
/// Stroke colour for a flat series
pub const COLOR_NEUTRAL: &str = "#9ca3af";

/// A point in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: f64,
    /// Vertical offset from the top edge
    pub y: f64,
}

/// Everything needed to draw one sparkline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    /// Points in drawing order
    pub points: Vec<Point>,
    /// SVG path through the points
    pub path: String,
    /// Marker on the last point
    pub marker: Option<Point>,
    /// Direction of the series
    #[serde(skip)]
    pub direction: TrendDirection,
    /// Stroke colour
    pub color: &'static str,
    /// Series the geometry was built from, for tooltips
    pub series: Vec<DataPoint>,
}

impl Sparkline {
    /// Lay out an already bucketed series in the fixed cell
    #[must_use]
    pub fn new(series: Vec<DataPoint>) -> Self {
        let direction = TrendDirection::of(&series);
        let points = layout(&series);
        let path = svg_path(&points);
        let marker = points.last().copied();

        Self {
            points,
            path,
            marker,
            direction,
            color: color_for(direction),
            series,
        }
    }

    /// True when there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

const fn color_for(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => COLOR_UP,
        TrendDirection::Down => COLOR_DOWN,
        TrendDirection::Neutral => COLOR_NEUTRAL,
    }
}

#[allow(clippy::cast_precision_loss)]
fn layout(series: &[DataPoint]) -> Vec<Point> {
    if series.is_empty() {
        return Vec::new();
    }

    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let y_lo = min * 0.9;
    let y_hi = max * 1.1;

    let left = PADDING;
    let right = WIDTH - PADDING;
    let bottom = HEIGHT - PADDING;
    let top = PADDING;
    let last_index = (series.len() - 1) as f64;

    series
        .iter()
        .enumerate()
        .map(|(i, p)| Point {
            x: scale(i as f64, 0.0, last_index, left, right),
            y: scale(p.value, y_lo, y_hi, bottom, top),
        })
        .collect()
}

/// Linear map of `value` from `[d0, d1]` onto `[r0, r1]`; a degenerate
/// domain maps to the middle of the range
fn scale(value: f64, d0: f64, d1: f64, r0: f64, r1: f64) -> f64 {
    let span = d1 - d0;
    if span.abs() < f64::EPSILON {
        return f64::midpoint(r0, r1);
    }
    ((value - d0) / span).mul_add(r1 - r0, r0)
}

fn svg_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{command}{:.2},{:.2}", p.x, p.y);
    }
    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series(values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(format!("2024-Q{}", i + 1), *v))
            .collect()
    }

    #[test]
    fn test_sparkline_spans_padded_width() {
        let spark = Sparkline::new(series(&[10.0, 20.0, 30.0]));
        assert_eq!(spark.points.len(), 3);
        assert_eq!(spark.points[0].x, PADDING);
        assert_eq!(spark.points[2].x, WIDTH - PADDING);
        assert_eq!(spark.marker, Some(spark.points[2]));
    }

    #[test]
    fn test_sparkline_higher_values_sit_higher() {
        let spark = Sparkline::new(series(&[10.0, 30.0]));
        assert!(spark.points[1].y < spark.points[0].y);
        for p in &spark.points {
            assert!(p.y >= PADDING && p.y <= HEIGHT - PADDING);
        }
    }

    #[test]
    fn test_sparkline_colors_follow_direction() {
        assert_eq!(Sparkline::new(series(&[1.0, 2.0])).color, COLOR_UP);
        assert_eq!(Sparkline::new(series(&[2.0, 1.0])).color, COLOR_DOWN);
        assert_eq!(Sparkline::new(series(&[2.0, 5.0, 2.0])).color, COLOR_NEUTRAL);
    }

    #[test]
    fn test_sparkline_single_point_is_centered() {
        let spark = Sparkline::new(series(&[0.0]));
        assert_eq!(spark.points, vec![Point { x: WIDTH / 2.0, y: HEIGHT / 2.0 }]);
        assert_eq!(spark.path, "M32.50,15.00");
    }

    #[test]
    fn test_sparkline_empty() {
        let spark = Sparkline::new(Vec::new());
        assert!(spark.is_empty());
        assert!(spark.marker.is_none());
        assert_eq!(spark.path, "");
        assert_eq!(spark.direction, TrendDirection::Neutral);
    }

    #[test]
    fn test_svg_path_commands() {
        let spark = Sparkline::new(series(&[5.0, 5.0]));
        assert!(spark.path.starts_with('M'));
        assert_eq!(spark.path.matches('L').count(), 1);
    }
}
