//! Analysis overlay: API key field and the commentary.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::{AnalysisStatus, App, Mode};

/// Returns a rectangle of the given percentage size centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Renders the overlay on top of whatever is already drawn.
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 70, 70);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" AI Market Analysis: {} ", app.symbol.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Key field
            Constraint::Length(1), // Validation line
            Constraint::Min(3),    // Result
        ])
        .split(inner);

    render_key_field(frame, layout[0], app);

    if let Some(ref error) = app.analysis.error {
        let para = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(para, layout[1]);
    }

    render_result(frame, layout[2], app);
}

fn render_key_field(frame: &mut Frame, area: Rect, app: &App) {
    let is_insert = app.mode == Mode::Insert;
    let border_style = if is_insert {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if is_insert {
        " Gemini API Key (INSERT) "
    } else {
        " Gemini API Key "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = &app.analysis.key_input;
    let text = if input.is_empty() && !is_insert {
        Span::styled("press i to enter a key", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input.masked())
    };
    frame.render_widget(Paragraph::new(Line::from(text)), inner);

    if is_insert {
        let cursor_x = inner.x + u16::try_from(input.cursor()).unwrap_or(u16::MAX);
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let panel = &app.analysis;
    let lines: Vec<Line> = match panel.status {
        AnalysisStatus::Idle => vec![Line::from(Span::styled(
            "Press Enter to generate commentary on the current chain.",
            Style::default().fg(Color::DarkGray),
        ))],
        AnalysisStatus::Running => vec![Line::from(Span::styled(
            "Analyzing market data…",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ))],
        AnalysisStatus::Done => panel
            .result
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect(),
    };

    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(para, area);
}
