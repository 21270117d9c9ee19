//! Dexter TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dexter_core::{HttpCatalogClient, SpeechBackend};
use dexter_tui::config::TuiConfig;
use dexter_tui::error::TuiError;
use dexter_tui::events::TuiEvent;
use dexter_tui::keys::map_key;
use dexter_tui::speech::{EspeakBackend, SilentBackend};
use dexter_tui::state::{App, Effect};
use dexter_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    dexter_tui::logging::init(&config.log_path)?;

    let client = HttpCatalogClient::new(&config.catalog_base_url, config.request_timeout())
        .map_err(|e| TuiError::Catalog(e.to_string()))?;
    tracing::info!(base_url = client.base_url(), "starting dexter");
    let speech: Arc<dyn SpeechBackend> = if config.speech.enabled {
        Arc::new(EspeakBackend::detect(&config.speech.program).await)
    } else {
        Arc::new(SilentBackend)
    };
    let session = dexter_tui::build_session(&config, Arc::new(client), speech);
    let mut app = App::new(config, session);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    spawn_load(&app, event_tx.clone());

    let mut ticker = tokio::time::interval(app.config.tick_rate());

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.prune_notifications(chrono::Utc::now());
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx) {
                    break;
                }
            }
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Resolve the current record in the background and report back.
fn spawn_load(app: &App, sender: mpsc::Sender<TuiEvent>) {
    let load = app.session.resolve_current();
    tokio::spawn(async move {
        let (id, result) = load.await;
        let _ = sender.send(TuiEvent::RecordResolved { id, result }).await;
    });
}

fn handle_event(app: &mut App, event: TuiEvent, sender: &mpsc::Sender<TuiEvent>) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key) {
                match app.handle_action(action) {
                    Effect::Quit => return true,
                    Effect::LoadCurrent => spawn_load(app, sender.clone()),
                    Effect::None => {}
                }
            }
        }
        TuiEvent::RecordResolved { id, result } => app.apply_resolution(id, result),
        TuiEvent::Resize { .. } => {}
    }
    false
}
