// ABOUTME: Main entry point for Aparcería with TUI and CLI support
//
// Binary: aparceria
// Usage: aparceria [COMMAND]
// - No command: launches TUI
// - login / logout / whoami: manage the backend session
// - projects: list projects
// - new-project: create a project from a TOML draft

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, prelude::*};
use std::{
    io::{self, IsTerminal},
    sync::Arc,
    time::{Duration, Instant},
};

use aparceria::api::HttpProjectClient;
use aparceria::app::{App, AppState, EventHandler, NavigationGuard, state::View};
use aparceria::cli;
use aparceria::components::LayoutComponent;
use aparceria::config::{self, AppConfig};
use aparceria::session::SessionContext;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let result = match args.command {
        // CLI commands
        Some(cli::Commands::Login(login_args)) => cli::auth::login(login_args, args.format).await,
        Some(cli::Commands::Logout) => cli::auth::logout(args.format),
        Some(cli::Commands::Whoami) => cli::auth::whoami(args.format),
        Some(cli::Commands::Projects(projects_args)) => {
            cli::projects::execute(projects_args, args.format).await
        }
        Some(cli::Commands::NewProject(new_args)) => {
            cli::new_project::execute(new_args, args.format).await
        }

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => launch_tui().await,
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn launch_tui() -> Result<()> {
    let config = AppConfig::load()?;
    let session = SessionContext::load()?;

    if let Err(denied) = NavigationGuard::check(&View::Projects, &session) {
        bail!("{denied}");
    }

    let service = Arc::new(HttpProjectClient::new(&config.api, &session)?);
    tracing::info!("Starting TUI against {}", config.api.base_url);

    let mut app = App::new(AppState::new(config, session), service);
    app.init();
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout).await
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        bail!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        );
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, layout, &mut terminal).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &mut app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports releases too
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) =
                        EventHandler::handle_key_event(key_event, &mut app.state)
                    {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick().await?;
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = config::base_dir()
        .map(|base| base.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".aparceria/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "aparceria-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let writer = match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => tracing_subscriber::fmt::writer::BoxMakeWriter::new(Arc::new(file)),
        // Never log to the terminal the TUI draws on
        Err(_) => tracing_subscriber::fmt::writer::BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aparceria=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
