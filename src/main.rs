// src/main.rs

use std::io::stdout;
use std::time::Duration;

use bounty_rs_scanner::core::ScanOrchestrator;
use bounty_rs_scanner::core::models::ScanResult;
use bounty_rs_scanner::{logging, ScanConfig};
use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info};

mod app;
mod ui;

use app::{App, AppState};

type ScanOutcome = Result<ScanResult, String>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let config = ScanConfig::load()?;
    let orchestrator = ScanOrchestrator::new(config)?;
    info!("Starting bounty-rs-scanner.");

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<ScanOutcome>(1);

    let outcome = run(&mut terminal, &mut app, &orchestrator, &tx, &mut rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    outcome
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    orchestrator: &ScanOrchestrator,
    tx: &mpsc::Sender<ScanOutcome>,
    rx: &mut mpsc::Receiver<ScanOutcome>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(app, orchestrator, tx)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            app.finish_scan(outcome);
        }
        app.on_tick();
    }
    Ok(())
}

fn handle_events(app: &mut App, orchestrator: &ScanOrchestrator, tx: &mpsc::Sender<ScanOutcome>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if app.show_disclaimer {
            if key.code == KeyCode::Enter {
                app.show_disclaimer = false;
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Left if app.show_logs => app.scroll_log_left(),
            KeyCode::Right if app.show_logs => app.scroll_log_right(),
            code => match app.state {
                AppState::Idle => handle_idle_input(app, code, orchestrator, tx),
                AppState::Finished => handle_finished_input(app, code),
                AppState::Scanning => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
                    KeyCode::Char('l') | KeyCode::Char('L') => app.toggle_logs(),
                    _ => {}
                },
            },
        }
    }
    Ok(())
}

fn handle_idle_input(app: &mut App, key_code: KeyCode, orchestrator: &ScanOrchestrator, tx: &mpsc::Sender<ScanOutcome>) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            let target = app.input.trim().to_string();
            if target.is_empty() {
                return;
            }
            app.start_scan();

            let orchestrator = orchestrator.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = orchestrator.run(&target).await.map_err(|e| {
                    error!(error = %e, "Scan aborted.");
                    e.to_string()
                });
                let _ = tx.send(outcome).await;
            });
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.reset(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.export(),
        KeyCode::Char('l') | KeyCode::Char('L') => app.toggle_logs(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
