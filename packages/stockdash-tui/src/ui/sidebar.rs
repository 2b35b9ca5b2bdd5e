//! Sidebar with the ticker and date inputs.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Field, InputMode};

pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    for field in Field::all() {
        let editing = app.input_mode == InputMode::Editing(field);
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", field.key()), Style::default().fg(Color::DarkGray)),
            Span::styled(field.label(), Style::default().add_modifier(Modifier::BOLD)),
        ]));

        let value = if editing {
            Line::from(vec![
                Span::styled(
                    format!("  {}", app.edit_buffer),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ])
        } else {
            Line::from(Span::styled(
                format!("  {}", app.inputs.get(field)),
                Style::default().fg(Color::White),
            ))
        };
        lines.push(value);
        lines.push(Line::default());
    }

    if let Some(error) = &app.input_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Inputs "));

    frame.render_widget(sidebar, area);
}
