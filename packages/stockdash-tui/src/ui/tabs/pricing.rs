//! Pricing tab: price chart, return statistics and the daily price table.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use stockdash_core::{PricingView, RiskReport};

use super::{draw_placeholder, section_data};
use crate::app::App;
use crate::widgets::{create_price_chart, price_points};

pub(crate) const INSUFFICIENT_DATA_MESSAGE: &str =
    "Not enough price data to compute returns (at least two prices are needed).";

/// Draw the Pricing tab.
pub fn draw_pricing_tab(frame: &mut Frame, area: Rect, app: &App) {
    let view = match section_data(app, |s| &s.pricing) {
        Ok(view) => view,
        Err(placeholder) => return draw_placeholder(frame, area, "Pricing Data", placeholder),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Chart
            Constraint::Length(5),      // Risk
            Constraint::Min(4),         // Price table
        ])
        .split(area);

    let points = price_points(&view.series);
    frame.render_widget(create_price_chart(&view.series, &points), chunks[0]);

    draw_risk(frame, chunks[1], view);
    draw_movements(frame, chunks[2], view, app.scroll);
}

fn draw_risk(frame: &mut Frame, area: Rect, view: &PricingView) {
    let lines = match &view.risk {
        RiskReport::Summary(s) => vec![
            Line::from(format!("Annual Return is {:.2} %", s.annualized_return)),
            Line::from(format!("Standard Deviation is {:.2} %", s.annualized_stdev)),
            Line::from(format!("Risk Adjusted Return is {:.2}", s.risk_adjusted_return)),
        ],
        RiskReport::InsufficientData => vec![Line::from(Span::styled(
            INSUFFICIENT_DATA_MESSAGE,
            Style::default().fg(Color::Yellow),
        ))],
    };

    let risk = Paragraph::new(lines)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title(" Returns "));

    frame.render_widget(risk, area);
}

fn draw_movements(frame: &mut Frame, area: Rect, view: &PricingView, scroll: usize) {
    let header = Row::new(
        ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume", "% Change"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
    );

    let rows: Vec<Row> = view
        .movements
        .iter()
        .skip(scroll)
        .map(|m| {
            let change = m.pct_change * 100.0;
            let change_color = if change >= 0.0 { Color::Green } else { Color::Red };
            Row::new(vec![
                Cell::from(m.bar.date.to_string()),
                Cell::from(format!("{:.2}", m.bar.open)),
                Cell::from(format!("{:.2}", m.bar.high)),
                Cell::from(format!("{:.2}", m.bar.low)),
                Cell::from(format!("{:.2}", m.bar.close)),
                Cell::from(format!("{:.2}", m.bar.adj_close)),
                Cell::from(m.bar.volume.to_string()),
                Cell::from(format!("{:+.2}%", change)).style(Style::default().fg(change_color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(9),
    ];

    let title = format!(" Price Movements ({} days) ", view.movements.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
