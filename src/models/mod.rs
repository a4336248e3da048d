//! Value types for a simulated option chain.
//!
//! Snapshots are plain values: the generator creates them, the updater
//! consumes one and returns the next, and nothing mutates a snapshot after
//! it has been handed out. Field names on the wire follow the NSE option
//! chain JSON shape (`strikePrice`, `changeinOpenInterest`, `CE`, `PE`).

pub mod chain;
pub mod contract;
pub mod symbol;

pub use chain::{OptionChain, StrikeRow};
pub use contract::{OptionContract, OptionGreeks, OptionSide};
pub use symbol::Symbol;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a simulated `f64` price into a 2 dp [`Decimal`].
///
/// Rounds half away from zero. Non-finite input is a programming error in
/// the caller and maps to zero in release builds.
pub fn price_from_f64(value: f64) -> Decimal {
    debug_assert!(value.is_finite(), "non-finite price {value}");
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an `f64` to `dp` decimal places, half away from zero.
pub fn round_f64(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}
