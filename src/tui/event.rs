//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::analysis::MISSING_KEY_MESSAGE;
use crate::chain::RandomSource;
use crate::models::{OptionChain, Symbol};

use super::app::{AnalysisStatus, App, Mode};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI housekeeping.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Live-feed timer fired: advance the current snapshot.
    Refresh,
    /// A snapshot finished generating.
    ChainLoaded(Box<OptionChain>),
    /// The analysis request finished with commentary or a fallback.
    AnalysisReady(String),
    /// Request to quit the application.
    Quit,
}

/// Actions that require external handling (spawning tasks, keychain I/O).
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Generate a fresh snapshot for a symbol.
    LoadChain(Symbol),
    /// Request commentary on the current snapshot.
    RunAnalysis { api_key: String },
    /// Persist the typed API key to the keychain.
    SaveApiKey(String),
}

/// Handle to a recurring timer task. Dropping it stops the timer.
#[derive(Debug)]
pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Stops the timer.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    })
}

/// Spawns a timer that sends periodic UI tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval: Duration) -> RefreshTimer {
    spawn_timer(tx, interval, || Message::Input(Event::Tick))
}

/// Spawns the live-feed timer. The first refresh fires one full interval
/// after spawning.
pub fn spawn_refresh_timer(tx: mpsc::UnboundedSender<Message>, interval: Duration) -> RefreshTimer {
    spawn_timer(tx, interval, || Message::Refresh)
}

fn spawn_timer(
    tx: mpsc::UnboundedSender<Message>,
    interval: Duration,
    make: fn() -> Message,
) -> RefreshTimer {
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(make()).is_err() {
                break;
            }
        }
    });
    RefreshTimer { handle }
}

/// Updates application state based on a message.
pub fn update<R: RandomSource + ?Sized>(
    app: &mut App,
    message: Message,
    rng: &mut R,
) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Refresh => {
            app.tick(rng);
            None
        }
        Message::ChainLoaded(chain) => {
            app.apply_loaded(*chain);
            None
        }
        Message::AnalysisReady(text) => {
            app.analysis.finish(text);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Key(_) | Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Normal if app.analysis.open => handle_analysis_keys(app, key),
        Mode::Normal => handle_chain_keys(app, key),
    }
}

/// Handles keys on the option chain view.
fn handle_chain_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab => {
            let next = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.symbol.previous()
            } else {
                app.symbol.next()
            };
            app.select_symbol(next);
            Some(Action::LoadChain(next))
        }
        KeyCode::BackTab => {
            let previous = app.symbol.previous();
            app.select_symbol(previous);
            Some(Action::LoadChain(previous))
        }
        KeyCode::Char('r') => {
            app.loading = true;
            Some(Action::LoadChain(app.symbol))
        }
        KeyCode::Char('a') => {
            let configured = app.configured_key.clone();
            app.analysis.open_with_key(configured.as_deref());
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up();
            None
        }
        _ => None,
    }
}

/// Handles keys while the analysis overlay is open.
fn handle_analysis_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.analysis.open = false;
            None
        }
        KeyCode::Char('i') => {
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('s') => {
            let value = app.analysis.key_input.as_str().trim().to_string();
            if value.is_empty() {
                app.analysis.error = Some(MISSING_KEY_MESSAGE.to_string());
                return None;
            }
            Some(Action::SaveApiKey(value))
        }
        KeyCode::Enter => {
            if app.analysis.status == AnalysisStatus::Running || app.chain.is_none() {
                return None;
            }
            let api_key = app.analysis.key_input.as_str().trim().to_string();
            if api_key.is_empty() {
                app.analysis.error = Some(MISSING_KEY_MESSAGE.to_string());
                return None;
            }
            debug!("starting analysis request");
            app.analysis.begin();
            Some(Action::RunAnalysis { api_key })
        }
        _ => None,
    }
}

/// Handles keys in insert mode (API key field).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    let input = &mut app.analysis.key_input;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    None
}
