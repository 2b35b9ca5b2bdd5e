//! Header bar widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Draw the header bar with the title and the loaded symbol.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Stock Dashboard",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if app.loading {
        spans.push(Span::styled(
            format!("  Loading {}...", app.inputs.ticker.trim().to_uppercase()),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(snapshot) = &app.snapshot {
        let request = &snapshot.request;
        spans.push(Span::styled(
            format!(
                "  {}  {} to {}",
                request.symbol.to_uppercase(),
                request.range.start,
                request.range.end
            ),
            Style::default().fg(Color::White),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
