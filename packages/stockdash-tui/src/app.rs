//! Application state for the dashboard.

use std::time::Instant;

use stockdash_core::{DashboardRequest, DashboardSnapshot, StatementKind};

/// Main application state.
pub struct App {
    /// Current active tab
    pub current_tab: Tab,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Sidebar inputs
    pub inputs: Inputs,
    /// Text being typed while editing a sidebar field
    pub edit_buffer: String,
    /// Why the current inputs cannot be loaded
    pub input_error: Option<String>,
    /// Result of the last load
    pub snapshot: Option<DashboardSnapshot>,
    /// Set whenever the inputs change; cleared when the load starts
    pub needs_reload: bool,
    /// Whether a load is in progress
    pub loading: bool,
    /// Status message with expiry
    pub status_message: Option<(String, Instant)>,
    /// Statement shown on the fundamentals tab
    pub statement: StatementKind,
    /// First visible row of the active table or list
    pub scroll: usize,
    /// Number of headlines requested
    pub news_limit: usize,
}

/// The three sidebar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

impl Inputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Ticker => &self.ticker,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Ticker => &mut self.ticker,
            Field::StartDate => &mut self.start_date,
            Field::EndDate => &mut self.end_date,
        }
    }
}

impl App {
    /// Create the app with initial inputs. The first frame triggers a load.
    pub fn new(inputs: Inputs, news_limit: usize) -> Self {
        Self {
            current_tab: Tab::default(),
            should_quit: false,
            input_mode: InputMode::Normal,
            inputs,
            edit_buffer: String::new(),
            input_error: None,
            snapshot: None,
            needs_reload: true,
            loading: false,
            status_message: None,
            statement: StatementKind::BalanceSheet,
            scroll: 0,
            news_limit,
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    /// Move to next tab.
    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
        self.scroll = 0;
    }

    /// Move to previous tab.
    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
        self.scroll = 0;
    }

    /// Jump to a specific tab by number (1-3).
    pub fn goto_tab(&mut self, num: u8) {
        self.current_tab = Tab::from_num(num);
        self.scroll = 0;
    }

    pub fn tab_title(&self, tab: Tab) -> String {
        match tab {
            Tab::News => format!("Top {} News", self.news_limit),
            _ => tab.name().to_string(),
        }
    }

    /// Start editing a sidebar field, seeded with its current value.
    pub fn begin_edit(&mut self, field: Field) {
        self.edit_buffer = self.inputs.get(field).to_string();
        self.input_mode = InputMode::Editing(field);
    }

    /// Store the edited value. A changed value triggers a reload.
    pub fn commit_edit(&mut self) {
        if let InputMode::Editing(field) = self.input_mode {
            let value = self.edit_buffer.trim().to_string();
            let current = self.inputs.get_mut(field);
            if *current != value {
                *current = value;
                self.needs_reload = true;
            }
        }
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Ask for the dashboard to be loaded again with the current inputs.
    pub fn request_reload(&mut self) {
        self.needs_reload = true;
    }

    /// The request for the current inputs.
    pub fn request(&self) -> Result<DashboardRequest, String> {
        DashboardRequest::parse(
            &self.inputs.ticker,
            &self.inputs.start_date,
            &self.inputs.end_date,
        )
        .map_err(|e| e.to_string())
    }

    /// Take a pending reload. Invalid inputs are reported instead of loaded.
    pub fn take_reload(&mut self) -> Option<DashboardRequest> {
        if !self.needs_reload {
            return None;
        }
        self.needs_reload = false;

        match self.request() {
            Ok(request) => {
                self.input_error = None;
                self.loading = true;
                Some(request)
            }
            Err(e) => {
                self.input_error = Some(e);
                self.snapshot = None;
                None
            }
        }
    }

    /// Store the result of a load.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.loading = false;
        self.scroll = 0;
        self.set_status(format!("Loaded {}", snapshot.request.symbol.to_uppercase()));
        self.snapshot = Some(snapshot);
    }

    pub fn select_statement(&mut self, kind: StatementKind) {
        if self.statement != kind {
            self.statement = kind;
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines).min(self.scroll_limit());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Largest useful scroll offset for the active tab.
    fn scroll_limit(&self) -> usize {
        let Some(snapshot) = &self.snapshot else {
            return 0;
        };
        let rows = match self.current_tab {
            Tab::Pricing => snapshot.pricing.ready().map_or(0, |p| p.movements.len()),
            Tab::Fundamentals => snapshot
                .fundamentals
                .ready()
                .map_or(0, |f| f.statement(self.statement).rows.len()),
            Tab::News => snapshot.news.ready().map_or(0, Vec::len),
        };
        rows.saturating_sub(1)
    }
}

/// Available tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pricing,
    Fundamentals,
    News,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Pricing => Tab::Fundamentals,
            Tab::Fundamentals => Tab::News,
            Tab::News => Tab::Pricing,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Pricing => Tab::News,
            Tab::Fundamentals => Tab::Pricing,
            Tab::News => Tab::Fundamentals,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => Tab::Fundamentals,
            3 => Tab::News,
            _ => Tab::Pricing,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Pricing => 0,
            Tab::Fundamentals => 1,
            Tab::News => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Pricing => "Pricing Data",
            Tab::Fundamentals => "Fundamental Data",
            Tab::News => "News",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Pricing, Tab::Fundamentals, Tab::News]
    }
}

/// Sidebar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ticker,
    StartDate,
    EndDate,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Ticker => "Ticker",
            Field::StartDate => "Start Date",
            Field::EndDate => "End Date",
        }
    }

    /// Key that starts editing this field.
    pub fn key(self) -> char {
        match self {
            Field::Ticker => 't',
            Field::StartDate => 's',
            Field::EndDate => 'e',
        }
    }

    pub fn from_key(c: char) -> Option<Field> {
        Self::all().into_iter().find(|f| f.key() == c)
    }

    pub fn all() -> [Field; 3] {
        [Field::Ticker, Field::StartDate, Field::EndDate]
    }
}

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(Field),
}
