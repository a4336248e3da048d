use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Index underlyings the simulator knows how to build a chain for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    #[default]
    Nifty,
    BankNifty,
    FinNifty,
}

impl Symbol {
    /// All symbols in selector order.
    pub const ALL: [Symbol; 3] = [Self::Nifty, Self::BankNifty, Self::FinNifty];

    /// Exchange ticker, as used in contract identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nifty => "NIFTY",
            Self::BankNifty => "BANKNIFTY",
            Self::FinNifty => "FINNIFTY",
        }
    }

    /// Human-readable index name for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nifty => "NIFTY 50",
            Self::BankNifty => "BANK NIFTY",
            Self::FinNifty => "FIN NIFTY",
        }
    }

    /// Spot level the simulator jitters around.
    pub fn base_price(self) -> f64 {
        match self {
            Self::Nifty => 22_500.0,
            Self::BankNifty => 48_000.0,
            Self::FinNifty => 21_400.0,
        }
    }

    /// Distance between adjacent strikes.
    pub fn strike_step(self) -> u32 {
        match self {
            Self::Nifty | Self::FinNifty => 50,
            Self::BankNifty => 100,
        }
    }

    /// Next symbol in selector order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous symbol in selector order, wrapping around.
    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = crate::ChainError;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sym| sym.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::ChainError::InvalidInput(format!("unknown symbol: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("banknifty".parse::<Symbol>().unwrap(), Symbol::BankNifty);
        assert_eq!(" NIFTY ".parse::<Symbol>().unwrap(), Symbol::Nifty);
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = "SENSEX".parse::<Symbol>().unwrap_err();
        assert!(matches!(err, crate::ChainError::InvalidInput(_)));
    }

    #[test]
    fn selector_order_wraps() {
        assert_eq!(Symbol::FinNifty.next(), Symbol::Nifty);
        assert_eq!(Symbol::Nifty.previous(), Symbol::FinNifty);
    }

    #[test]
    fn serializes_as_ticker() {
        let json = serde_json::to_string(&Symbol::BankNifty).unwrap();
        assert_eq!(json, "\"BANKNIFTY\"");
    }
}
