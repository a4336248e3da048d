use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contract::{OptionContract, OptionSide};
use super::symbol::Symbol;

/// A strike with its call and put.
///
/// `ce.strike_price == pe.strike_price == strike_price` for the row's
/// whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeRow {
    #[serde(with = "rust_decimal::serde::float")]
    pub strike_price: Decimal,
    pub expiry_date: String,
    #[serde(rename = "CE")]
    pub ce: OptionContract,
    #[serde(rename = "PE")]
    pub pe: OptionContract,
}

impl StrikeRow {
    /// Returns the contract on the given side.
    pub fn contract(&self, side: OptionSide) -> &OptionContract {
        match side {
            OptionSide::Call => &self.ce,
            OptionSide::Put => &self.pe,
        }
    }
}

/// A full option chain snapshot.
///
/// Rows are in strictly ascending strike order with a constant step. The
/// strike set and row count are fixed when the snapshot is generated; live
/// ticks only change values inside rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    pub symbol: Symbol,
    pub expiry_dates: Vec<String>,
    #[serde(rename = "data")]
    pub rows: Vec<StrikeRow>,
    pub timestamp: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub underlying_value: Decimal,
}

impl OptionChain {
    /// Strike prices in row order.
    pub fn strikes(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.strike_price).collect()
    }

    /// Row whose strike is nearest the spot. The lower strike wins a tie.
    pub fn atm_row(&self) -> Option<&StrikeRow> {
        let spot = self.underlying_value;
        self.rows.iter().reduce(|best, row| {
            if (row.strike_price - spot).abs() < (best.strike_price - spot).abs() {
                row
            } else {
                best
            }
        })
    }

    /// Sum of open interest across every strike on one side.
    pub fn total_open_interest(&self, side: OptionSide) -> i64 {
        self.rows
            .iter()
            .map(|r| r.contract(side).open_interest)
            .sum()
    }

    /// Strike holding the largest open interest on one side.
    ///
    /// On a tie the higher strike wins.
    pub fn max_open_interest_strike(&self, side: OptionSide) -> Option<Decimal> {
        self.rows
            .iter()
            .reduce(|best, row| {
                if best.contract(side).open_interest > row.contract(side).open_interest {
                    best
                } else {
                    row
                }
            })
            .map(|r| r.strike_price)
    }
}
