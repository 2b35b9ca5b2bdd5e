//! Fundamentals tab: annual statements with fiscal periods as columns.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table, Tabs},
};
use stockdash_core::{FinancialStatement, StatementKind};

use super::{draw_placeholder, section_data};
use crate::app::App;

const STATEMENT_KEYS: [char; 3] = ['b', 'i', 'c'];

/// Draw the Fundamentals tab.
pub fn draw_fundamentals_tab(frame: &mut Frame, area: Rect, app: &App) {
    let view = match section_data(app, |s| &s.fundamentals) {
        Ok(view) => view,
        Err(placeholder) => return draw_placeholder(frame, area, "Fundamental Data", placeholder),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    draw_statement_selector(frame, chunks[0], app.statement);
    draw_statement(frame, chunks[1], view.statement(app.statement), app.scroll);
}

fn draw_statement_selector(frame: &mut Frame, area: Rect, selected: StatementKind) {
    let kinds = StatementKind::all();
    let titles: Vec<Line> = kinds
        .iter()
        .zip(STATEMENT_KEYS)
        .map(|(kind, key)| Line::from(format!(" [{key}] {} ", kind.title())))
        .collect();
    let index = kinds.iter().position(|k| *k == selected).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Statement "))
        .select(index)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

fn draw_statement(frame: &mut Frame, area: Rect, statement: &FinancialStatement, scroll: usize) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once(Cell::from("Line Item").style(bold)).chain(
            statement
                .periods
                .iter()
                .map(|p| Cell::from(p.as_str()).style(bold)),
        ),
    );

    let rows: Vec<Row> = statement
        .rows
        .iter()
        .skip(scroll)
        .map(|row| {
            Row::new(
                std::iter::once(Cell::from(row.label.as_str())).chain(
                    row.values
                        .iter()
                        .map(|v| Cell::from(v.as_deref().unwrap_or(""))),
                ),
            )
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(40))
        .chain(statement.periods.iter().map(|_| Constraint::Length(16)))
        .collect();

    let title = format!(
        " {} {} ({} line items) ",
        statement.symbol,
        statement.kind.title(),
        statement.rows.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
