//! Portalgun - a terminal browser for Rick and Morty locations.
//!
//! Loads every location from the public Rick and Morty API, lists them in a
//! searchable table, and shows the residents of the selected location as
//! cards with portraits.

mod app;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portalgun_core::{fetch_all_locations, ApiClient, Config, LocationStats};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name inside the log directory
const LOG_FILE_NAME: &str = "portalgun.log";

const USAGE: &str = "\
Usage: portalgun [OPTION]

Browse Rick and Morty locations and their residents.

Options:
  --dump-locations   Fetch every location and print it as JSON
  --stats            Fetch every location and print summary statistics
  -h, --help         Show this help

Environment:
  PORTALGUN_API_URL       API base URL (default https://rickandmortyapi.com/api)
  PORTALGUN_TIMEOUT_SECS  Per-request timeout in seconds (default: none)
  PORTALGUN_LOG_DIR       Directory for portalgun.log
  RUST_LOG                Log filter (default: warn)";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a file; the terminal belongs to the UI while it runs
fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();

    Ok(guard)
}

/// Log to stderr for the one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("Invalid configuration")?;

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--dump-locations") => {
            init_cli_tracing();
            return dump_locations(&config).await;
        }
        Some("--stats") => {
            init_cli_tracing();
            return print_stats(&config).await;
        }
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Initialize logging
    let log_dir = config.log_dir()?;
    let _log_guard = init_tracing(&log_dir)?;
    info!(log_dir = %log_dir.display(), "Portalgun starting");

    // Create app before touching the terminal so config errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.load_locations_background();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Portalgun shutting down");
    Ok(())
}

/// Dump all locations to stdout as JSON
async fn dump_locations(config: &Config) -> Result<()> {
    let api = ApiClient::new(config)?;
    eprintln!("Fetching locations from {}...", api.base_url());

    let locations = fetch_all_locations(&api).await;

    let json = serde_json::to_string_pretty(&locations)?;
    println!("{}", json);

    eprintln!("Done! {} locations exported.", locations.len());
    Ok(())
}

/// Print collection statistics to stdout
async fn print_stats(config: &Config) -> Result<()> {
    let api = ApiClient::new(config)?;
    eprintln!("Fetching locations from {}...", api.base_url());

    let locations = fetch_all_locations(&api).await;

    match LocationStats::compute(&locations) {
        Some(stats) => {
            for line in stats.summary_lines() {
                println!("{}", line);
            }
            Ok(())
        }
        None => Err(anyhow::anyhow!("No locations could be loaded")),
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished background work before drawing the frame
        app.check_background_tasks();

        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
