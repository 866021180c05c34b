//! Plain-text rendering of view models for the terminal

use crate::chart::PieChart;
use crate::sparkline::Sparkline;
use crate::trend::TrendDirection;
use crate::view::{
    ChartBody, Footer, HeaderCell, ImageDisplay, ImageSlot, MetricCell, NotFound, Row, TableBody,
    TableView, ViewModel,
};
use alumni_core::{DataPoint, SortDirection};
use std::fmt::Write as _;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: usize = 30;

/// Render `model` under `title`
#[must_use]
pub fn render_text(title: &str, model: &ViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    match model {
        ViewModel::Table(table) => table_text(&mut out, table),
        ViewModel::Chart(chart) => chart_text(&mut out, chart),
    }
    out
}

/// Series drawn with block characters, one per point
#[must_use]
pub fn spark_blocks(series: &[DataPoint]) -> String {
    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let span = max - min;
    series
        .iter()
        .map(|p| {
            if span <= 0.0 {
                return BLOCKS[3];
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let level = (((p.value - min) / span) * 7.0).round() as usize;
            BLOCKS.get(level).copied().unwrap_or('█')
        })
        .collect()
}

fn header_label(cell: &HeaderCell) -> String {
    match cell.indicator {
        Some(SortDirection::Asc) => format!("{} ↑", cell.label),
        Some(SortDirection::Desc) => format!("{} ↓", cell.label),
        None => cell.label.clone(),
    }
}

fn sparkline_text(spark: &Sparkline) -> String {
    if spark.is_empty() {
        return "no trend".to_string();
    }
    let arrow = match spark.direction {
        TrendDirection::Up => '↗',
        TrendDirection::Down => '↘',
        TrendDirection::Neutral => '→',
    };
    format!("{} {arrow}", spark_blocks(&spark.series))
}

fn row_cells(row: &Row) -> Vec<String> {
    let mut name = row.name.text.clone();
    if let Some(ImageDisplay::Initials(initials)) = row.name.image.as_ref().map(ImageSlot::display) {
        name = format!("[{initials}] {name}");
    }
    if row.name.in_filters {
        name.push_str(" *");
    }

    let mut cells = vec![row.number.to_string(), name];
    if let Some(extra) = &row.extra {
        cells.push(extra.clone());
    }
    cells.push(match &row.metric {
        MetricCell::Count(count) => count.clone(),
        MetricCell::Trend(spark) => sparkline_text(spark),
    });
    cells
}

fn write_grid(out: &mut String, header: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", line(header));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule));
    for row in rows {
        let _ = writeln!(out, "{}", line(row));
    }
}

fn not_found_text(out: &mut String, not_found: &NotFound) {
    let _ = writeln!(out, "{}", not_found.message);
    let _ = writeln!(out, "{}", not_found.description);
}

fn footer_text(out: &mut String, footer: &Footer) {
    let p = &footer.pagination;
    let _ = writeln!(
        out,
        "Page {} of {} ({} items, {} per page){}{}",
        p.page,
        p.total_pages,
        p.total_items,
        p.page_size,
        if p.has_prev { "  [prev]" } else { "" },
        if p.has_next { "  [next]" } else { "" },
    );
    if let Some(selector) = &footer.frequency {
        let options: Vec<String> = selector
            .options
            .iter()
            .map(|f| {
                if *f == selector.selected {
                    format!("[{f}]")
                } else {
                    f.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Window: {}", options.join(" "));
    }
}

fn table_text(out: &mut String, table: &TableView) {
    // The action column carries no text
    let columns = table.header.len().saturating_sub(1);
    let header: Vec<String> = table.header.iter().take(columns).map(header_label).collect();
    if let Some(caption) = table.header.iter().find_map(|h| h.caption.as_deref()) {
        let _ = writeln!(out, "Trend window: {caption}");
    }

    match &table.body {
        TableBody::Skeleton { rows, .. } => {
            let placeholder: Vec<String> = header
                .iter()
                .map(|h| "░".repeat(h.chars().count().max(3)))
                .collect();
            let skeleton = vec![placeholder; *rows];
            write_grid(out, &header, &skeleton);
        }
        TableBody::NotFound(not_found) => not_found_text(out, not_found),
        TableBody::Failed { message, .. } => {
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "Retry to load the data again.");
        }
        TableBody::Rows(rows) => {
            let cells: Vec<Vec<String>> = rows.iter().map(row_cells).collect();
            write_grid(out, &header, &cells);
        }
    }

    if let Some(footer) = &table.footer {
        out.push('\n');
        footer_text(out, footer);
    }
}

fn pie_text(out: &mut String, chart: &PieChart) {
    let _ = writeln!(out, "{}", chart.title);
    let width = chart.legend.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    for (arc, entry) in chart.arcs.iter().zip(&chart.legend) {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let filled = ((arc.share / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<width$}  {:<bar$}  {:>6.1}%  {}",
            entry.label,
            "█".repeat(filled.min(BAR_WIDTH)),
            arc.share,
            entry.value,
            bar = BAR_WIDTH,
        );
    }
    let _ = writeln!(out, "Total: {}", chart.total);
}

fn chart_text(out: &mut String, chart: &ChartBody) {
    match chart {
        ChartBody::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ChartBody::NotFound(not_found) => not_found_text(out, not_found),
        ChartBody::Failed { message } => {
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "Retry to load the data again.");
        }
        ChartBody::Ready(pie) => pie_text(out, pie),
    }
}
