use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of a strike a contract sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    /// Call (CE): right to buy at the strike.
    #[serde(rename = "CE")]
    Call,
    /// Put (PE): right to sell at the strike.
    #[serde(rename = "PE")]
    Put,
}

impl OptionSide {
    /// Exchange tag, `CE` or `PE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approximate sensitivities, rounded for display.
#[cfg_attr(feature = "python", pyo3::pyclass(frozen, get_all, from_py_object))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionGreeks {
    pub delta: f64,
    pub theta: f64,
    pub gamma: f64,
    pub vega: f64,
}

/// One side of one strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    #[serde(with = "rust_decimal::serde::float")]
    pub strike_price: Decimal,
    pub expiry_date: String,
    #[serde(rename = "type")]
    pub side: OptionSide,
    pub underlying: String,
    pub identifier: String,
    /// Outstanding contracts. Signed: live ticks may drift it below zero.
    pub open_interest: i64,
    #[serde(rename = "changeinOpenInterest")]
    pub change_in_open_interest: i64,
    #[serde(rename = "pchangeinOpenInterest")]
    pub pchange_in_open_interest: f64,
    pub total_traded_volume: u64,
    /// Percent, e.g. `14.2`.
    pub implied_volatility: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub last_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    pub p_change: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub bid_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ask_price: Decimal,
    pub bid_qty: u32,
    pub ask_qty: u32,
    pub greeks: OptionGreeks,
}

impl OptionContract {
    /// Builds the identifier that keys a contract within one snapshot.
    pub fn make_identifier(
        underlying: &str,
        expiry: &str,
        strike: Decimal,
        side: OptionSide,
    ) -> String {
        format!("{underlying}{expiry}{strike}{side}")
    }

    /// Whether the contract has intrinsic value at `spot`.
    pub fn is_itm(&self, spot: Decimal) -> bool {
        match self.side {
            OptionSide::Call => spot > self.strike_price,
            OptionSide::Put => spot < self.strike_price,
        }
    }
}
