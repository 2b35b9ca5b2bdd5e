//! stockdash-tui - terminal stock dashboard.

mod app;
mod event;
mod services;
mod ui;
mod widgets;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use stockdash_core::{Dashboard, DashboardConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Inputs};
use event::{handle_key_event, poll_event};
use services::DataLoader;
use ui::draw_ui;

#[derive(Parser)]
#[command(name = "stockdash-tui")]
#[command(about = "Terminal dashboard for stock prices, fundamentals and news")]
#[command(version)]
struct Cli {
    /// Ticker symbol to load first
    #[arg(short, long)]
    ticker: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD), exclusive
    #[arg(short, long)]
    end: Option<String>,

    /// Config file (defaults to $STOCKDASH_CONFIG or the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = init_logging()?;
    tracing::info!(log = %log_path.display(), "Starting stockdash-tui");

    let config_path = cli.config.unwrap_or_else(DashboardConfig::default_path);
    let config = DashboardConfig::load_path(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let defaults = &config.defaults;
    let inputs = Inputs {
        ticker: cli.ticker.unwrap_or_else(|| defaults.ticker.clone()),
        start_date: cli.start.unwrap_or_else(|| defaults.start_date.clone()),
        end_date: cli.end.unwrap_or_else(|| defaults.end_date.clone()),
    };

    let loader = DataLoader::new(Dashboard::from_config(&config)?)
        .context("failed to start the async runtime")?;

    // Create app state
    let mut app = App::new(inputs, loader.news_limit());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app, &loader);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "stockdash-tui exited with an error");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file so output does not corrupt the terminal.
fn init_logging() -> Result<PathBuf> {
    let dir = directories::BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().join("stockdash"))
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let path = dir.join("stockdash-tui.log");
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(path)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    loader: &DataLoader,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Reload when the inputs changed
        if let Some(request) = app.take_reload() {
            terminal.draw(|frame| draw_ui(frame, app))?;
            let snapshot = loader.load(&request);
            app.apply_snapshot(snapshot);
        }

        // Draw UI
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Clear expired status messages
        app.clear_expired_status();

        // Handle events
        if let Some(event) = poll_event(tick_rate)? {
            match event {
                Event::Key(key) => handle_key_event(app, key),
                Event::Resize(_, _) => {} // Terminal will redraw automatically
                _ => {}
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
