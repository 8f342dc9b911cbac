//! neowatch - NASA near-Earth-object proxy and terminal dashboard
//!
//! `serve` runs the caching proxy, `dashboard` renders its data as a sortable
//! table in the terminal.

use std::io;
use std::panic;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use neowatch::app::App;
use neowatch::cli::{Cli, Command, StartupConfig};
use neowatch::config::ServerConfig;
use neowatch::server::ApiServer;
use neowatch::ui;

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

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "neowatch=debug,tower_http=debug"
    } else {
        "neowatch=info,tower_http=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(host: Option<String>, port: Option<u16>, verbose: bool) -> anyhow::Result<()> {
    init_tracing(verbose);

    let config = ServerConfig::from_env().with_overrides(host, port);
    let addr = config
        .socket_addr()
        .await
        .with_context(|| format!("cannot bind host '{}'", config.host))?;

    ApiServer::new(&config)
        .run(addr)
        .await
        .with_context(|| format!("server on {} stopped", addr))
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_neo_table(frame, app);

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

async fn dashboard(config: StartupConfig) -> anyhow::Result<()> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(config);
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        // Show the loading state before blocking on the fetch
        if app.take_refresh_request() {
            terminal.draw(|f| render_ui(f, app))?;
            app.load().await;
        }

        terminal.draw(|f| render_ui(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            verbose,
        } => serve(host, port, verbose).await,
        Command::Dashboard { server, date } => {
            let config = StartupConfig::from_args(&server, date.as_deref())?;
            dashboard(config).await
        }
    }
}
