//! Option chain table: calls | strike | puts.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use rust_decimal::Decimal;

use crate::models::{OptionChain, OptionContract, OptionSide, StrikeRow};
use crate::tui::app::App;
use crate::tui::components::format::{format_price, group_indian, signed};

/// Distance from spot inside which a strike counts as at-the-money.
const ATM_BAND: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Below this width the quantity columns are dropped.
const WIDE_LAYOUT: u16 = 200;
/// Below this width Greeks and change in OI are dropped as well.
const NARROW_LAYOUT: u16 = 175;

const ITM_SHADE: Color = Color::Rgb(46, 42, 18);
const ATM_SHADE: Color = Color::Rgb(18, 40, 70);

/// Per-side columns, ordered outside-in for the call side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Greeks,
    OpenInterest,
    ChangeInOi,
    Volume,
    Iv,
    Ltp,
    Change,
    BidQty,
    Bid,
    Ask,
    AskQty,
}

impl Column {
    fn title(self) -> &'static str {
        match self {
            Self::Greeks => "Δ / θ",
            Self::OpenInterest => "OI",
            Self::ChangeInOi => "Chg OI",
            Self::Volume => "Volume",
            Self::Iv => "IV",
            Self::Ltp => "LTP",
            Self::Change => "Chg",
            Self::BidQty => "B.Qty",
            Self::Bid => "Bid",
            Self::Ask => "Ask",
            Self::AskQty => "A.Qty",
        }
    }

    fn width(self) -> u16 {
        match self {
            Self::Greeks => 12,
            Self::ChangeInOi | Self::Change => 7,
            Self::Iv => 5,
            Self::BidQty | Self::AskQty => 6,
            Self::OpenInterest | Self::Volume | Self::Ltp | Self::Bid | Self::Ask => 8,
        }
    }
}

/// Call-side columns that fit in `width`; the put side mirrors them.
fn columns_for(width: u16) -> Vec<Column> {
    let mut columns = vec![
        Column::Greeks,
        Column::OpenInterest,
        Column::ChangeInOi,
        Column::Volume,
        Column::Iv,
        Column::Ltp,
        Column::Change,
        Column::BidQty,
        Column::Bid,
        Column::Ask,
        Column::AskQty,
    ];
    if width < WIDE_LAYOUT {
        columns.retain(|c| !matches!(c, Column::BidQty | Column::AskQty));
    }
    if width < NARROW_LAYOUT {
        columns.retain(|c| !matches!(c, Column::Greeks | Column::ChangeInOi));
    }
    columns
}

/// Whether a strike is close enough to spot to be highlighted as ATM.
fn is_atm(strike: Decimal, spot: Decimal) -> bool {
    (strike - spot).abs() < ATM_BAND
}

fn change_style(value: Decimal) -> Style {
    if value > Decimal::ZERO {
        Style::default().fg(Color::Green)
    } else if value < Decimal::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

fn cell(contract: &OptionContract, column: Column, base: Style) -> Cell<'static> {
    let (text, style) = match column {
        Column::Greeks => (
            format!("{:.2}/{:.2}", contract.greeks.delta, contract.greeks.theta),
            Style::default().fg(Color::Gray),
        ),
        Column::OpenInterest => (group_indian(contract.open_interest), Style::default()),
        Column::ChangeInOi => (
            signed(contract.change_in_open_interest),
            change_style(Decimal::from(contract.change_in_open_interest)),
        ),
        Column::Volume => (
            group_indian(i64::try_from(contract.total_traded_volume).unwrap_or(i64::MAX)),
            Style::default(),
        ),
        Column::Iv => (
            format!("{:.1}", contract.implied_volatility),
            Style::default(),
        ),
        Column::Ltp => (
            format_price(contract.last_price),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Column::Change => (format_price(contract.change), change_style(contract.change)),
        Column::BidQty => (
            group_indian(i64::from(contract.bid_qty)),
            Style::default(),
        ),
        Column::Bid => (
            format_price(contract.bid_price),
            Style::default().fg(Color::Green),
        ),
        Column::Ask => (
            format_price(contract.ask_price),
            Style::default().fg(Color::Red),
        ),
        Column::AskQty => (
            group_indian(i64::from(contract.ask_qty)),
            Style::default(),
        ),
    };
    Cell::from(Line::from(text).alignment(Alignment::Right)).style(base.patch(style))
}

fn side_cells(
    row: &StrikeRow,
    side: OptionSide,
    columns: &[Column],
    spot: Decimal,
) -> Vec<Cell<'static>> {
    let contract = row.contract(side);
    let shade = if contract.is_itm(spot) {
        Style::default().bg(ITM_SHADE)
    } else {
        Style::default()
    };
    let cells = columns.iter().map(|&column| cell(contract, column, shade));
    match side {
        OptionSide::Call => cells.collect(),
        OptionSide::Put => cells.rev().collect(),
    }
}

fn table_rows(chain: &OptionChain, columns: &[Column], skip: usize) -> Vec<Row<'static>> {
    let spot = chain.underlying_value;
    chain
        .rows
        .iter()
        .skip(skip)
        .map(|row| {
            let atm = is_atm(row.strike_price, spot);
            let mut cells = side_cells(row, OptionSide::Call, columns, spot);
            cells.push(
                Cell::from(Line::from(format_price(row.strike_price)).alignment(Alignment::Center))
                    .style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
            cells.extend(side_cells(row, OptionSide::Put, columns, spot));

            let row_style = if atm {
                Style::default().bg(ATM_SHADE).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect()
}

/// Renders the chain table, or a placeholder while loading.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.chain {
        Some(ref chain) => format!(
            " CALLS │ {} │ PUTS ",
            chain.expiry_dates.first().map_or("", String::as_str)
        ),
        None => " Option Chain ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(ref chain) = app.chain else {
        let text = if app.loading {
            "Loading option chain…"
        } else {
            "No data"
        };
        let para = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let columns = columns_for(area.width);
    let mut widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width())).collect();
    widths.push(Constraint::Length(10));
    widths.extend(columns.iter().rev().map(|c| Constraint::Length(c.width())));

    let mut header: Vec<Cell> = columns
        .iter()
        .map(|c| Cell::from(Line::from(c.title()).alignment(Alignment::Right)))
        .collect();
    header.push(Cell::from(Line::from("Strike").alignment(Alignment::Center)));
    header.extend(
        columns
            .iter()
            .rev()
            .map(|c| Cell::from(Line::from(c.title()).alignment(Alignment::Right))),
    );

    let table = Table::new(table_rows(chain, &columns, app.scroll), widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .column_spacing(1)
        .block(block);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn atm_band_is_exclusive() {
        assert!(is_atm(dec!(22500), dec!(22512.40)));
        assert!(is_atm(dec!(22550), dec!(22500.01)));
        assert!(!is_atm(dec!(22550), dec!(22500)));
    }

    #[test]
    fn narrow_layout_drops_quantities() {
        assert_eq!(columns_for(220).len(), 11);
        let medium = columns_for(180);
        assert_eq!(medium.len(), 9);
        assert!(!medium.contains(&Column::BidQty));
        assert!(medium.contains(&Column::Greeks));
        let narrow = columns_for(120);
        assert_eq!(narrow.len(), 7);
        assert!(narrow.contains(&Column::Ltp));
    }
}
