//! Main layout for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};

use super::footer::draw_footer;
use super::header::draw_header;
use super::sidebar::draw_sidebar;
use super::tabs::{draw_fundamentals_tab, draw_news_tab, draw_pricing_tab};
use crate::app::{App, Tab};

/// Width of the input sidebar.
const SIDEBAR_WIDTH: u16 = 28;

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Create main layout: header, body, footer
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(2), // Footer
        ])
        .split(size);

    draw_header(frame, rows[0], app);

    // Sidebar on the left, tabs on the right
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    draw_sidebar(frame, body[0], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(5),    // Content
        ])
        .split(body[1]);

    draw_tab_bar(frame, main[0], app);

    let content_area = main[1];
    match app.current_tab {
        Tab::Pricing => draw_pricing_tab(frame, content_area, app),
        Tab::Fundamentals => draw_fundamentals_tab(frame, content_area, app),
        Tab::News => draw_news_tab(frame, content_area, app),
    }

    draw_footer(frame, rows[2], app);
}

/// Draw the tab bar.
fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!(" {} {} ", i + 1, app.tab_title(*tab))).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}
