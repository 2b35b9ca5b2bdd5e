//! Tab-specific UI modules.

mod fundamentals;
mod news;
mod pricing;

pub use fundamentals::draw_fundamentals_tab;
pub use news::draw_news_tab;
pub use pricing::draw_pricing_tab;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use stockdash_core::{DashboardSnapshot, Section};

use crate::app::App;

/// Message shown in place of a section, with its color.
type Placeholder = (String, Color);

/// The ready data of one section, or what to show instead.
fn section_data<'a, T, F>(app: &'a App, select: F) -> Result<&'a T, Placeholder>
where
    F: Fn(&DashboardSnapshot) -> &Section<T>,
{
    if let Some(error) = &app.input_error {
        return Err((format!("Invalid input: {error}"), Color::Red));
    }
    match app.snapshot.as_ref().map(select) {
        _ if app.loading => Err(("Loading...".to_string(), Color::Yellow)),
        None => Err((
            "No data loaded. Press [r] to load.".to_string(),
            Color::DarkGray,
        )),
        Some(Section::Ready(data)) => Ok(data),
        Some(Section::Notice(message)) => Err((message.clone(), Color::Yellow)),
        Some(Section::Failed(message)) => Err((message.clone(), Color::Red)),
    }
}

/// Bordered box with a centered message.
fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str, placeholder: Placeholder) {
    let (message, color) = placeholder;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));

    // Calculate inner area before rendering the block
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(1),
            Constraint::Percentage(40),
        ])
        .split(inner);
    let msg = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color));
    frame.render_widget(msg, centered[1]);
}
