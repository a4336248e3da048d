//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{AnalysisStatus, App, Mode};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" DEMO ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::styled(
            " simulated data, not live market prices ",
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("│"),
    ];

    let key_span = if app.key_in_keychain {
        Span::styled(" Key: keychain ", Style::default().fg(Color::Green))
    } else if app.configured_key.is_some() {
        Span::styled(" Key: env ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" No API key ", Style::default().fg(Color::DarkGray))
    };
    spans.push(key_span);
    spans.push(Span::raw("│"));

    if app.analysis.status == AnalysisStatus::Running {
        spans.push(Span::styled(" analyzing… ", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("│"));
    }

    if let Some(ref error) = app.error_message {
        spans.push(Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray)),
        area,
    );
}

/// Renders the keybindings help line for the current mode.
pub fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.analysis.open) {
        (Mode::Insert, _) => "[Enter/Esc]done editing",
        (Mode::Normal, true) => "[i]edit key [Enter]generate [s]save key [Esc]close",
        (Mode::Normal, false) => {
            "[Tab/S-Tab]switch index [r]reload [a]analysis [j/k]scroll [q]quit"
        }
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
