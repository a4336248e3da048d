//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::App;
use super::components::{header, status_bar, symbol_bar};
use super::views::{analysis, chain_table};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Market header
            Constraint::Length(1), // Symbol selector
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Chain table
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    header::render(frame, main_layout[0], app);
    symbol_bar::render(frame, main_layout[1], app);
    status_bar::render(frame, main_layout[2], app);
    chain_table::render(frame, main_layout[3], app);
    status_bar::render_keybindings(frame, main_layout[4], app);

    if app.analysis.open {
        analysis::render(frame, app);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::chain::{RngSource, generate_snapshot};
    use crate::models::Symbol;

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn draws_loading_state() {
        let app = App::new(Symbol::BankNifty, Duration::from_secs(5));
        let text = screen(&app, 120, 30);
        assert!(text.contains("BANK NIFTY"));
        assert!(text.contains("Loading option chain"));
    }

    #[test]
    fn draws_chain_and_overlay() {
        let mut app = App::new(Symbol::Nifty, Duration::from_secs(5));
        let chain = generate_snapshot(Symbol::Nifty, &mut RngSource::seeded(4));
        assert!(app.apply_loaded(chain));

        let text = screen(&app, 220, 40);
        assert!(text.contains("Strike"));
        assert!(text.contains("CALLS"));
        assert!(text.contains("B.Qty"));

        app.analysis.open = true;
        app.analysis.key_input.set("secret");
        let text = screen(&app, 220, 40);
        assert!(text.contains("AI Market Analysis"));
        assert!(!text.contains("secret"));
    }
}
