//! Library entry point for the box-office TUI.
//!
//! Provides a reusable [`run`] function that launches the ratatui terminal UI
//! against a history store and a prediction service.

mod app;
mod event;
mod ui;

use anyhow::anyhow;
use app::{App, KeyOutcome};
use boxoffice_rs_client::Predictor;
use boxoffice_rs_core::FormController;
use boxoffice_rs_history::HistoryStore;
use boxoffice_rs_model::InputFields;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Collaborators for a TUI session.
pub struct TuiConfig {
    /// Where completed predictions are stored.
    pub history: Arc<dyn HistoryStore>,
    /// Prediction service.
    pub predictor: Arc<dyn Predictor>,
    /// Endpoint label shown in the header.
    pub endpoint: String,
}

/// Launch the box-office TUI.
///
/// The caller is responsible for initializing logging before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run(config: TuiConfig) -> anyhow::Result<()> {
    let controller = FormController::new(config.history.clone());
    let mut app = App::new(controller, config.endpoint.clone());
    info!(
        "starting tui (endpoint={}, records={})",
        config.endpoint,
        app.history.len()
    );

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());

    let result = async {
        loop {
            terminal.draw(|frame| ui::draw(frame, &app))?;
            let event = rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
            match event {
                AppEvent::Input(key) => match app.handle_key(key) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Submit(input) => {
                        spawn_submit(config.predictor.clone(), input, tx.clone());
                    }
                    KeyOutcome::Continue => {}
                },
                AppEvent::Prediction(result) => app.finish_submit(result),
            }
        }
        anyhow::Ok(())
    }
    .await;

    restore_terminal(&mut terminal)?;
    result
}

/// Spawn a task to run the prediction request.
fn spawn_submit(predictor: Arc<dyn Predictor>, input: InputFields, sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        debug!("dispatching prediction (title={})", input.title);
        let result = predictor.predict(&input).await;
        let _ = sender.send(AppEvent::Prediction(result)).await;
    });
}

/// Spawn a task to poll for key events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event
                        && key.kind == KeyEventKind::Press
                        && sender.send(AppEvent::Input(key)).await.is_err()
                    {
                        return;
                    }
                }
            }
            tokio::task::yield_now().await;
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
