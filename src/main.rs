//! fxconv - Currency converter for the terminal
//!
//! Converts amounts between currencies using live exchange rates, falling back
//! to the last cached rates when the rates API is unreachable.

use std::fs::{File, OpenOptions};
use std::io;
use std::panic;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Target};
use log::{info, warn, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};

use fxconv::app::{App, LoadState, LOAD_FAILED, OFFLINE_NOTICE};
use fxconv::cache::CacheManager;
use fxconv::cli::{conversion_report, currency_listing, Cli, Mode, StartupConfig};
use fxconv::config::Preferences;
use fxconv::data::{ConversionRequest, LoadedRates, RateSource};
use fxconv::refresh::{try_recv, RefreshConfig, RefreshHandle};
use fxconv::ui;

/// Log file written inside the cache directory while the TUI is running
const LOG_FILE_NAME: &str = "fxconv.log";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Initializes logging at `warn` unless RUST_LOG says otherwise
///
/// `Some(file)` sends records to the file. `None` with `quiet` disables
/// logging, otherwise records go to stderr.
fn init_logging(log_file: Option<File>, quiet: bool) {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.parse_default_env();
    match log_file {
        Some(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if quiet => {
            builder.filter_level(LevelFilter::Off);
        }
        None => {}
    }
    let _ = builder.try_init();
}

fn open_log_file(store: &CacheManager) -> Option<File> {
    store.ensure_dir().ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(store.cache_dir().join(LOG_FILE_NAME))
        .ok()
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    if app.load_state == LoadState::Loading && app.snapshot.is_none() {
        render_loading(frame);
    } else {
        ui::render(frame, app);
    }
}

/// Renders a loading message while rates are being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading exchange rates...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Converts once and prints the report; exits non-zero on failure
async fn run_once(startup: &StartupConfig, request: &ConversionRequest) {
    let loader = startup.config.rate_loader();

    let loaded = if startup.offline {
        loader.cached_any().map(|snapshot| LoadedRates {
            snapshot,
            source: RateSource::Cached,
        })
    } else {
        match loader.refresh().await {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                warn!("rates unavailable: {:?}", e);
                None
            }
        }
    };

    let Some(loaded) = loaded else {
        eprintln!("{}", LOAD_FAILED);
        process::exit(1);
    };

    if loaded.is_offline() {
        eprintln!(
            "{} (rates from {})",
            OFFLINE_NOTICE,
            ui::format_time(loaded.snapshot.timestamp)
        );
    }

    match conversion_report(request, &loaded.snapshot) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs the interactive converter until the user quits
async fn run_tui(startup: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = startup.config.cache_manager();
    init_logging(store.as_ref().and_then(open_log_file), true);

    let mut preferences = store.as_ref().map(Preferences::load).unwrap_or_default();
    if let Some(from) = startup.from {
        preferences.from = from;
    }
    if let Some(to) = startup.to {
        preferences.to = to;
    }

    let loader = startup.config.rate_loader();
    let mut app = App::new(preferences, startup.config.debounce);
    if let Some(snapshot) = loader.cached_fresh() {
        info!("showing cached rates from {}", snapshot.timestamp);
        app.apply_cached_snapshot(snapshot);
    }

    let probe_enabled = !startup.offline;
    let mut refresh = RefreshHandle::spawn(
        loader.clone(),
        RefreshConfig {
            probe_enabled,
            ..Default::default()
        },
    );
    if startup.offline {
        match loader.cached_any() {
            Some(snapshot) => app.apply_loaded(LoadedRates {
                snapshot,
                source: RateSource::Cached,
            }),
            None => app.apply_failure(),
        }
    } else {
        refresh.request_refresh();
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        while let Some(message) = try_recv(&mut refresh) {
            app.apply_refresh_message(message);
        }

        app.tick(Instant::now());

        if app.take_refresh_request() && !startup.offline {
            refresh.request_refresh();
        }

        if app.take_preferences_dirty() {
            if let Some(ref store) = store {
                if let Err(e) = app.preferences().save(store) {
                    warn!("failed to save preferences: {}", e);
                }
            }
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    refresh.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    match startup.mode {
        Mode::List => {
            print!("{}", currency_listing());
            Ok(())
        }
        Mode::Convert(ref request) => {
            init_logging(None, false);
            run_once(&startup, request).await;
            Ok(())
        }
        Mode::Interactive => run_tui(startup).await,
    }
}
