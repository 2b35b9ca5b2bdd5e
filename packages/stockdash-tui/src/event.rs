//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stockdash_core::StatementKind;

use crate::app::{App, Field, InputMode, Tab};

/// Rows moved by PageUp/PageDown.
const PAGE: usize = 10;

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Key release and repeat events are reported on some platforms
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global shortcuts (work in all modes)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if app.input_mode == InputMode::Normal => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing(_) => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab navigation
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char('1') => app.goto_tab(1),
        KeyCode::Char('2') => app.goto_tab(2),
        KeyCode::Char('3') => app.goto_tab(3),

        KeyCode::Char('r') => {
            app.request_reload();
            app.set_status("Reloading...");
        }

        // Scrolling
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Home => app.scroll = 0,

        // Sidebar inputs, then tab-specific actions
        KeyCode::Char(c) => match Field::from_key(c) {
            Some(field) => app.begin_edit(field),
            None if app.current_tab == Tab::Fundamentals => handle_fundamentals_tab_keys(app, c),
            None => {}
        },
        _ => {}
    }
}

fn handle_fundamentals_tab_keys(app: &mut App, c: char) {
    match c {
        'b' => app.select_statement(StatementKind::BalanceSheet),
        'i' => app.select_statement(StatementKind::IncomeStatement),
        'c' => app.select_statement(StatementKind::CashFlow),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => app.edit_buffer.push(c),
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{inputs, snapshot};

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(inputs(), 10);
        app.take_reload();
        app.apply_snapshot(snapshot());
        app
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = loaded_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_edit_ticker_and_reload() {
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.input_mode, InputMode::Editing(Field::Ticker));

        // 'q' is text while editing
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "qqq");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.inputs.ticker, "qqq");
        assert_eq!(app.take_reload().unwrap().symbol, "qqq");
    }

    #[test]
    fn test_escape_discards_edit() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('s'));
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.inputs.start_date, "2020-01-01");
        assert!(app.take_reload().is_none());
    }

    #[test]
    fn test_end_date_edit() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2021-06-30");
        press(&mut app, KeyCode::Enter);

        let request = app.take_reload().unwrap();
        assert_eq!(request.range.end.to_string(), "2021-06-30");
    }

    #[test]
    fn test_manual_reload() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.take_reload().is_some());
    }

    #[test]
    fn test_tab_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_tab, Tab::News);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_tab, Tab::Pricing);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_tab, Tab::News);
    }

    #[test]
    fn test_statement_keys_only_on_fundamentals_tab() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.statement, StatementKind::BalanceSheet);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.statement, StatementKind::CashFlow);
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.statement, StatementKind::IncomeStatement);
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.scroll, 2);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = loaded_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(!app.should_quit);
    }
}
