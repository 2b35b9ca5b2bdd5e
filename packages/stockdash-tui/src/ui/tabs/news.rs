//! News tab: latest headlines with sentiment scores.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use stockdash_core::NewsItem;

use super::{draw_placeholder, section_data};
use crate::app::{App, Tab};

/// Draw the News tab.
pub fn draw_news_tab(frame: &mut Frame, area: Rect, app: &App) {
    let title = app.tab_title(Tab::News);
    let items = match section_data(app, |s| &s.news) {
        Ok(items) => items,
        Err(placeholder) => return draw_placeholder(frame, area, &title, placeholder),
    };

    if items.is_empty() {
        return draw_placeholder(
            frame,
            area,
            &title,
            ("No news found for this ticker.".to_string(), Color::DarkGray),
        );
    }

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(app.scroll)
        .flat_map(|(i, item)| news_lines(i + 1, item))
        .collect();

    let news = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")));

    frame.render_widget(news, area);
}

fn news_lines(number: usize, item: &NewsItem) -> Vec<Line<'_>> {
    let published = item
        .published_at
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| item.published.clone());

    vec![
        Line::from(Span::styled(
            format!("News {number}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(published, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(item.summary.as_str()),
        Line::from(vec![
            Span::raw("Title Sentiment "),
            sentiment_span(item.title_sentiment),
        ]),
        Line::from(vec![
            Span::raw("News Sentiment "),
            sentiment_span(item.summary_sentiment),
        ]),
        Line::default(),
    ]
}

fn sentiment_span(score: f64) -> Span<'static> {
    let color = if score > 0.05 {
        Color::Green
    } else if score < -0.05 {
        Color::Red
    } else {
        Color::Gray
    };
    Span::styled(format!("{score:.4}"), Style::default().fg(color))
}
