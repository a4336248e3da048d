use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use chainwatch::analysis::{GeminiClient, analyze_chain};
use chainwatch::chain::{RngSource, generate_snapshot};
use chainwatch::config::fetch_config;
use chainwatch::credentials::{self, CredentialKey};
use chainwatch::models::Symbol;
use chainwatch::tls::build_tls_config;
use chainwatch::tui::event::{
    spawn_event_reader, spawn_refresh_timer, spawn_tick_timer, update,
};
use chainwatch::tui::{Action, App, Message, Tui, render, restore_terminal, setup_terminal};
use chainwatch::{ChainError, Result};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Interval for UI housekeeping ticks (stale error clearing).
const UI_TICK: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    credentials::populate_env_from_keychain();

    let config = fetch_config()?;
    let tls_config = build_tls_config(config.ca_bundle.as_deref())?;
    let client = GeminiClient::new(&config.gemini, tls_config)?;
    info!(
        symbol = %config.chain.symbol,
        refresh_ms = config.chain.refresh_interval.as_millis() as u64,
        "starting dashboard"
    );

    let mut app = App::new(config.chain.symbol, config.chain.refresh_interval);
    app.key_in_keychain = credentials::is_set(CredentialKey::GeminiApiKey);
    app.configured_key = config.gemini.api_key.clone();

    let (tx, mut rx) = unbounded_channel();
    let _events = spawn_event_reader(tx.clone());
    let _ui_ticks = spawn_tick_timer(tx.clone(), UI_TICK);
    let _feed = spawn_refresh_timer(tx.clone(), config.chain.refresh_interval);
    spawn_ctrl_c(tx.clone());
    spawn_load(tx.clone(), app.symbol);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &mut rx, &tx, &client).await;
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!(error = %e, "dashboard exited with error");
    }
    result
}

/// Routes tracing output to a file, since the terminal belongs to the TUI.
fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("chainwatch.log");
    let file = File::create(&path)
        .map_err(|e| ChainError::Io(format!("failed to create {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut UnboundedReceiver<Message>,
    tx: &UnboundedSender<Message>,
    client: &GeminiClient,
) -> Result<()> {
    let mut rng = RngSource::from_os_rng();

    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| ChainError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = update(app, message, &mut rng) {
            execute(action, app, tx, client);
        }
    }
    Ok(())
}

/// Carries out the side effect an update asked for.
fn execute(action: Action, app: &mut App, tx: &UnboundedSender<Message>, client: &GeminiClient) {
    match action {
        Action::LoadChain(symbol) => spawn_load(tx.clone(), symbol),
        Action::RunAnalysis { api_key } => {
            let Some(chain) = app.chain.clone() else {
                return;
            };
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let text = analyze_chain(&chain, &api_key, &client).await;
                let _ = tx.send(Message::AnalysisReady(text));
            });
        }
        Action::SaveApiKey(value) => match credentials::save(CredentialKey::GeminiApiKey, &value) {
            Ok(()) => {
                info!("saved Gemini API key to keychain");
                app.key_in_keychain = true;
                app.configured_key = Some(value);
            }
            Err(e) => app.show_error(e.to_string()),
        },
    }
}

/// Generates a snapshot off the UI loop and posts it back.
fn spawn_load(tx: UnboundedSender<Message>, symbol: Symbol) {
    tokio::spawn(async move {
        let chain = generate_snapshot(symbol, &mut RngSource::from_os_rng());
        let _ = tx.send(Message::ChainLoaded(Box::new(chain)));
    });
}

fn spawn_ctrl_c(tx: UnboundedSender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Quit);
        }
    });
}
