//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::chain::{RandomSource, advance_snapshot};
use crate::models::{OptionChain, Symbol};

use super::input::TextInput;

/// How long an error stays in the status bar.
const ERROR_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
///
/// Owns the one mutable cell holding the current snapshot. Only the main
/// loop writes to it, so ticks are applied strictly one after another.
pub struct App {
    // -- Market State --
    /// Index currently displayed.
    pub symbol: Symbol,
    /// Current snapshot, absent until the first load completes.
    pub chain: Option<OptionChain>,
    /// A load for `symbol` is in flight.
    pub loading: bool,
    /// Live tick interval, shown in the header.
    pub refresh_interval: Duration,

    // -- UI State --
    /// First chain row drawn in the table.
    pub scroll: usize,
    /// Current input mode.
    pub mode: Mode,
    /// Analysis overlay state.
    pub analysis: AnalysisPanel,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Whether a Gemini key is stored in the keychain.
    pub key_in_keychain: bool,
    /// Key from config, used to pre-fill the overlay.
    pub configured_key: Option<String>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an App that is about to load `symbol`.
    pub fn new(symbol: Symbol, refresh_interval: Duration) -> Self {
        Self {
            symbol,
            chain: None,
            loading: true,
            refresh_interval,
            scroll: 0,
            mode: Mode::Normal,
            analysis: AnalysisPanel::default(),
            error_message: None,
            key_in_keychain: false,
            configured_key: None,
            should_quit: false,
        }
    }

    /// Switches to `symbol`, dropping the current snapshot.
    ///
    /// The caller is expected to start a load for the new symbol.
    pub fn select_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
        self.chain = None;
        self.loading = true;
        self.scroll = 0;
    }

    /// Installs a freshly generated snapshot.
    ///
    /// Returns `false` and keeps the current state if the snapshot belongs
    /// to a symbol that is no longer selected.
    pub fn apply_loaded(&mut self, chain: OptionChain) -> bool {
        if chain.symbol != self.symbol {
            debug!(loaded = %chain.symbol, selected = %self.symbol, "discarding stale load");
            return false;
        }
        self.chain = Some(chain);
        self.loading = false;
        true
    }

    /// Applies one live tick to the current snapshot, if there is one.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        if let Some(chain) = self.chain.take() {
            self.chain = Some(advance_snapshot(chain, rng));
        }
    }

    /// Scrolls the chain table down one row.
    pub fn scroll_down(&mut self) {
        let rows = self.chain.as_ref().map_or(0, |c| c.rows.len());
        if self.scroll + 1 < rows {
            self.scroll += 1;
        }
    }

    /// Scrolls the chain table up one row.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than five seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_TTL
        {
            self.error_message = None;
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the API key field.
    Insert,
}

/// Progress of an analysis request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Running,
    Done,
}

/// State of the analysis overlay.
#[derive(Clone, Debug, Default)]
pub struct AnalysisPanel {
    /// Whether the overlay is shown.
    pub open: bool,
    /// API key field.
    pub key_input: TextInput,
    pub status: AnalysisStatus,
    /// Commentary or fallback message from the last request.
    pub result: Option<String>,
    /// Validation message shown above the result area.
    pub error: Option<String>,
}

impl AnalysisPanel {
    /// Opens the overlay, pre-filling the key field when it is empty.
    pub fn open_with_key(&mut self, api_key: Option<&str>) {
        self.open = true;
        if self.key_input.is_empty()
            && let Some(key) = api_key
        {
            self.key_input.set(key);
        }
    }

    /// Marks a request as started.
    pub fn begin(&mut self) {
        self.status = AnalysisStatus::Running;
        self.result = None;
        self.error = None;
    }

    /// Stores the text a request produced.
    pub fn finish(&mut self, text: String) {
        self.status = AnalysisStatus::Done;
        self.result = Some(text);
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
