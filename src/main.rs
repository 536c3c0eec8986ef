// dagscope - Job detail dashboard with a live pipeline DAG view
// A terminal client for batch/streaming data-integration job services

mod app;
mod dag;
mod job;
mod logging;
mod metrics;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::{
    config::{Cli, SourceConfig},
    event::handle_key_event,
    AppConfig, AppState, StatusAnimator,
};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use job::{FileJobSource, HttpJobSource, JobSource};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.log_file)?;
    let config = AppConfig::from_cli(&cli);

    let source = build_source(&config.source)?;
    let animator = load_animator(&config)?;
    info!(
        job_id = %config.job_id,
        source = %source.describe(),
        simulated = animator.is_some(),
        "Starting dagscope"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = AppState::new(&config, source, animator);
    app.activate();
    let res = run_app(&mut terminal, &mut app);
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "UI loop failed");
        println!("Error: {:?}", err);
    }
    info!("dagscope exited");
    Ok(())
}

fn build_source(config: &SourceConfig) -> Result<Box<dyn JobSource>> {
    Ok(match config {
        SourceConfig::File(path) => Box::new(FileJobSource::new(path)),
        SourceConfig::Http(base_url) => Box::new(
            HttpJobSource::new(base_url)
                .with_context(|| format!("failed to create HTTP client for {}", base_url))?,
        ),
    })
}

fn load_animator(config: &AppConfig) -> Result<Option<StatusAnimator>> {
    let Some(path) = config.simulate_status.as_ref() else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read status snapshots from {}", path.display()))?;
    let animator = StatusAnimator::from_json(&content)
        .with_context(|| format!("malformed status snapshots in {}", path.display()))?;
    if animator.is_empty() {
        warn!(path = %path.display(), "No status snapshots, simulation will stop on the first tick");
    }
    info!(snapshots = animator.len(), "Loaded simulated status snapshots");
    Ok(Some(animator))
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(app.refresh_config.ui_interval())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, key.code);
                }
            }
        }
    }
}
