//! Pie chart layout for the chart view
//!
//! Ranks rows by the chosen metric, keeps the top N and turns them into
//! annular arcs running clockwise from twelve o'clock, with a legend and a
//! hover highlight shared between arcs and legend entries.

use crate::view::TableEntity;
use alumni_core::config::ChartConfig;
use alumni_core::utils::truncate_label;
use serde::Serialize;
use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

/// Arc colours, assigned by rank
pub const PALETTE: [&str; 15] = [
    "#8C2D19", "#D35400", "#E67E22", "#F39C12", "#F1C40F", "#27AE60", "#2ECC71", "#3498DB",
    "#9B59B6", "#34495E", "#16A085", "#2980B9", "#8E44AD", "#2C3E50", "#F39C12",
];

/// Characters of a name drawn inside an arc
pub const ARC_NAME_CHARS: usize = 12;
/// Characters of a name shown in the legend
pub const LEGEND_NAME_CHARS: usize = 27;
/// Gap between the pie and the drawing area edge
pub const MARGIN: f64 = 55.0;
/// Inner radius as a fraction of the outer radius
pub const INNER_RATIO: f64 = 0.3;

/// Which number the slices are sized by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMetric {
    /// Alumni count
    #[default]
    Alumni,
    /// Secondary count (companies per location)
    Companies,
}

impl ChartMetric {
    /// Chart heading
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Alumni => "Distribution by Alumni",
            Self::Companies => "Distribution by Companies",
        }
    }
}

/// Layout options
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Drawing area width
    pub width: f64,
    /// Drawing area height
    pub height: f64,
    /// Metric the slices are sized by
    pub metric: ChartMetric,
    /// Draw truncated names inside large arcs
    pub show_names: bool,
    /// Thresholds and counts
    pub config: ChartConfig,
}

impl ChartOptions {
    /// Options for a drawing area with default thresholds
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            metric: ChartMetric::Alumni,
            show_names: true,
            config: ChartConfig::default(),
        }
    }

    /// Outer radius of the pie
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - MARGIN).max(0.0)
    }
}

/// One slice of the pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arc {
    /// Row identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Metric value
    pub value: u64,
    /// Share of the drawn total, in percent
    pub share: f64,
    /// Start angle in radians, clockwise from twelve o'clock
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    /// Fill colour
    pub color: &'static str,
    /// `12.5%`, only for large enough slices
    pub percent_label: Option<String>,
    /// Truncated name, only for larger slices
    pub name_label: Option<String>,
}

impl Arc {
    /// Label anchor halfway through the ring
    #[must_use]
    pub fn centroid(&self, inner: f64, outer: f64) -> (f64, f64) {
        let angle = f64::midpoint(self.start_angle, self.end_angle);
        polar(f64::midpoint(inner, outer), angle)
    }

    /// SVG path of the ring segment centred on the origin
    #[must_use]
    pub fn path(&self, inner: f64, outer: f64) -> String {
        let span = self.end_angle - self.start_angle;
        if span >= TAU - 1e-9 {
            return full_ring(inner, outer);
        }
        let large = u8::from(span > PI);
        let (x0, y0) = polar(outer, self.start_angle);
        let (x1, y1) = polar(outer, self.end_angle);
        let (x2, y2) = polar(inner, self.end_angle);
        let (x3, y3) = polar(inner, self.start_angle);

        let mut path = String::new();
        let _ = write!(
            path,
            "M{x0:.2},{y0:.2}A{outer:.2},{outer:.2},0,{large},1,{x1:.2},{y1:.2}\
             L{x2:.2},{y2:.2}A{inner:.2},{inner:.2},0,{large},0,{x3:.2},{y3:.2}Z"
        );
        path
    }
}

fn palette_color(rank: usize) -> &'static str {
    PALETTE.iter().cycle().nth(rank).copied().unwrap_or(PALETTE[0])
}

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

fn full_ring(inner: f64, outer: f64) -> String {
    format!(
        "M0,{top:.2}A{outer:.2},{outer:.2},0,1,1,0,{bottom:.2}A{outer:.2},{outer:.2},0,1,1,0,{top:.2}\
         M0,{itop:.2}A{inner:.2},{inner:.2},0,1,0,0,{ibottom:.2}A{inner:.2},{inner:.2},0,1,0,0,{itop:.2}Z",
        top = -outer,
        bottom = outer,
        itop = -inner,
        ibottom = inner,
    )
}

/// Legend line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Row identifier
    pub id: String,
    /// Name cut to the legend width
    pub label: String,
    /// Swatch colour
    pub color: &'static str,
    /// Metric value
    pub value: u64,
}

/// Laid-out pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    /// Heading
    pub title: &'static str,
    /// Slices, largest first
    pub arcs: Vec<Arc>,
    /// Legend, same order as the slices
    pub legend: Vec<LegendEntry>,
    /// Pie centre inside the drawing area
    pub center: (f64, f64),
    /// Outer radius
    pub radius: f64,
    /// Inner radius
    pub inner_radius: f64,
    /// Sum of the drawn values
    pub total: u64,
    #[serde(skip)]
    dimmed_opacity: f64,
    #[serde(skip)]
    hover_growth: f64,
}

/// How one slice is drawn given the hover state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcStyle {
    /// Fill opacity
    pub opacity: f64,
    /// Outer radius
    pub outer_radius: f64,
    /// Whether this slice is the hovered one
    pub highlighted: bool,
}

impl PieChart {
    /// Lay out the top rows of `items`
    #[must_use]
    pub fn layout<T: TableEntity>(items: &[T], options: &ChartOptions) -> Self {
        let value_of = |item: &T| match options.metric {
            ChartMetric::Alumni => item.count(),
            ChartMetric::Companies => item.secondary_count().unwrap_or(0),
        };

        let mut ranked: Vec<&T> = items.iter().collect();
        ranked.sort_by(|a, b| value_of(*b).cmp(&value_of(*a)));
        ranked.truncate(options.config.top_n);

        let total: u64 = ranked.iter().map(|item| value_of(*item)).sum();
        let radius = options.radius();

        let mut arcs = Vec::with_capacity(ranked.len());
        let mut angle = 0.0;
        for (rank, item) in ranked.iter().enumerate() {
            let value = value_of(*item);
            #[allow(clippy::cast_precision_loss)]
            let fraction = if total == 0 {
                0.0
            } else {
                value as f64 / total as f64
            };
            let share = fraction * 100.0;
            let end = fraction.mul_add(TAU, angle);

            arcs.push(Arc {
                id: item.id().to_string(),
                name: item.name().to_string(),
                value,
                share,
                start_angle: angle,
                end_angle: end,
                color: palette_color(rank),
                percent_label: (share > options.config.percent_label_threshold)
                    .then(|| format!("{share:.1}%")),
                name_label: (options.show_names && share > options.config.name_label_threshold)
                    .then(|| truncate_label(item.name(), ARC_NAME_CHARS)),
            });
            angle = end;
        }

        let legend = arcs
            .iter()
            .map(|arc| LegendEntry {
                id: arc.id.clone(),
                label: truncate_label(&arc.name, LEGEND_NAME_CHARS),
                color: arc.color,
                value: arc.value,
            })
            .collect();

        Self {
            title: options.metric.title(),
            arcs,
            legend,
            center: (options.width / 3.5, options.height / 2.0 - 49.0),
            radius,
            inner_radius: radius * INNER_RATIO,
            total,
            dimmed_opacity: options.config.dimmed_opacity,
            hover_growth: options.config.hover_growth,
        }
    }

    /// True when there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Style of every slice while `hovered` (an arc or legend id) is hovered
    #[must_use]
    pub fn styles(&self, hovered: Option<&str>) -> Vec<ArcStyle> {
        self.arcs
            .iter()
            .map(|arc| match hovered {
                None => ArcStyle {
                    opacity: 1.0,
                    outer_radius: self.radius,
                    highlighted: false,
                },
                Some(id) if id == arc.id => ArcStyle {
                    opacity: 1.0,
                    outer_radius: self.radius + self.hover_growth,
                    highlighted: true,
                },
                Some(_) => ArcStyle {
                    opacity: self.dimmed_opacity,
                    outer_radius: self.radius,
                    highlighted: false,
                },
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use alumni_core::EntityListItem;
    use pretty_assertions::assert_eq;

    fn rows(counts: &[u64]) -> Vec<EntityListItem> {
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| EntityListItem::new(i.to_string(), format!("Entity {i}"), *c))
            .collect()
    }

    #[test]
    fn test_options_compare_by_value() {
        assert_eq!(ChartOptions::new(400.0, 400.0), ChartOptions::new(400.0, 400.0));
        assert_ne!(ChartOptions::new(400.0, 400.0), ChartOptions::new(400.0, 300.0));

        let mut dimmed = ChartOptions::new(400.0, 400.0);
        dimmed.config.dimmed_opacity = 0.1;
        assert_ne!(dimmed, ChartOptions::new(400.0, 400.0));
    }

    #[test]
    fn test_keeps_top_ten_descending() {
        let items = rows(&[5, 80, 3, 60, 1, 90, 7, 40, 2, 30, 8, 20, 4, 10, 6]);
        let chart = PieChart::layout(&items, &ChartOptions::new(600.0, 400.0));

        let values: Vec<u64> = chart.arcs.iter().map(|a| a.value).collect();
        assert_eq!(values, vec![90, 80, 60, 40, 30, 20, 10, 8, 7, 6]);
        assert_eq!(chart.total, 351);
        assert_eq!(chart.legend.len(), 10);
    }

    #[test]
    fn test_angles_cover_full_circle() {
        let items = rows(&[50, 30, 20]);
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));

        assert_eq!(chart.arcs[0].start_angle, 0.0);
        assert!((chart.arcs[2].end_angle - TAU).abs() < 1e-9);
        for pair in chart.arcs.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert_eq!(chart.radius, 145.0);
        assert!((chart.inner_radius - 43.5).abs() < 1e-9);
    }

    #[test]
    fn test_label_thresholds() {
        let items = rows(&[90, 6, 3, 1]);
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));

        assert_eq!(chart.arcs[0].percent_label.as_deref(), Some("90.0%"));
        assert_eq!(chart.arcs[0].name_label.as_deref(), Some("Entity 0"));
        assert_eq!(chart.arcs[1].percent_label.as_deref(), Some("6.0%"));
        assert!(chart.arcs[1].name_label.is_none());
        assert!(chart.arcs[2].percent_label.is_none());
        assert!(chart.arcs[3].percent_label.is_none());
    }

    #[test]
    fn test_names_are_truncated() {
        let items = vec![EntityListItem::new(
            "1",
            "Faculdade de Engenharia da Universidade do Porto",
            10,
        )];
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));
        assert_eq!(chart.arcs[0].name_label.as_deref(), Some("Faculdade de..."));
        assert_eq!(chart.legend[0].label, "Faculdade de Engenharia da ...");
    }

    #[test]
    fn test_hover_highlights_one_and_dims_others() {
        let items = rows(&[50, 30, 20]);
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));

        let idle = chart.styles(None);
        assert!(idle.iter().all(|s| s.opacity == 1.0 && !s.highlighted));

        let hovered = chart.styles(Some("1"));
        assert_eq!(hovered[1].outer_radius, 160.0);
        assert!(hovered[1].highlighted);
        assert_eq!(hovered[0].opacity, 0.7);
        assert_eq!(hovered[2].opacity, 0.7);
    }

    #[test]
    fn test_secondary_metric() {
        let mut items = rows(&[50, 10]);
        items[1].secondary_count = Some(9);
        let mut options = ChartOptions::new(400.0, 400.0);
        options.metric = ChartMetric::Companies;
        let chart = PieChart::layout(&items, &options);

        assert_eq!(chart.title, "Distribution by Companies");
        assert_eq!(chart.arcs[0].id, "1");
        assert_eq!(chart.arcs[1].value, 0);
    }

    #[test]
    fn test_paths_and_centroid() {
        let items = rows(&[1]);
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));
        let path = chart.arcs[0].path(chart.inner_radius, chart.radius);
        assert!(path.starts_with("M0,-145.00"));

        let items = rows(&[1, 1]);
        let chart = PieChart::layout(&items, &ChartOptions::new(400.0, 400.0));
        let (x, y) = chart.arcs[0].centroid(0.0, 100.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let chart = PieChart::layout::<EntityListItem>(&[], &ChartOptions::new(400.0, 400.0));
        assert!(chart.is_empty());
        assert_eq!(chart.total, 0);
    }
}
