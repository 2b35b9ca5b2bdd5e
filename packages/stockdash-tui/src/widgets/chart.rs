//! Price chart widget.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use stockdash_core::PriceSeries;

/// Chart points for a series: x is days since the first bar, y the adjusted close.
pub fn price_points(series: &PriceSeries) -> Vec<(f64, f64)> {
    let Some(first) = series.first_date() else {
        return Vec::new();
    };
    series
        .bars()
        .iter()
        .map(|bar| ((bar.date - first).num_days() as f64, bar.adj_close))
        .collect()
}

/// Line chart of adjusted closes titled "{TICKER} Stock Price".
pub fn create_price_chart<'a>(series: &PriceSeries, points: &'a [(f64, f64)]) -> Chart<'a> {
    let title = format!(" {} Stock Price ", series.symbol().to_uppercase());

    let dataset = Dataset::default()
        .name("Adj Close")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(points);

    let x_max = points.last().map_or(1.0, |(x, _)| x.max(1.0));
    let (low, high) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    let (y_min, y_max) = if points.is_empty() {
        (0.0, 1.0)
    } else {
        // Flat series still need a visible band
        let pad = ((high - low) * 0.05).max(high.abs() * 0.01).max(0.01);
        (low - pad, high + pad)
    };

    let x_labels = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => {
            let middle = first + (last - first) / 2;
            vec![
                Span::raw(first.to_string()),
                Span::raw(middle.to_string()),
                Span::raw(last.to_string()),
            ]
        }
        _ => Vec::new(),
    };

    Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        )
}
