//! Market header: title, index, spot and feed state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::format::format_price;
use crate::tui::app::App;

/// Renders the one-line market header.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " Option Chain Dashboard ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.symbol.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    match app.chain {
        Some(ref chain) => {
            spans.push(Span::styled(
                format!("₹{} ", format_price(chain.underlying_value)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("Last updated: {} ", chain.timestamp),
                Style::default().fg(Color::Gray),
            ));
            if let Some(expiry) = chain.expiry_dates.first() {
                spans.push(Span::styled(
                    format!("Expiry: {expiry} "),
                    Style::default().fg(Color::Gray),
                ));
            }
        }
        None => spans.push(Span::styled(" -- ", Style::default().fg(Color::DarkGray))),
    }

    let feed = if app.loading {
        Span::styled("● loading ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("● auto-refresh {}s ", app.refresh_interval.as_secs_f64()),
            Style::default().fg(Color::Green),
        )
    };
    spans.push(feed);

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
