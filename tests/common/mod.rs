//! Shared test utilities.

#![allow(dead_code)]

use chainwatch::chain::{RngSource, generate_snapshot};
use chainwatch::models::{OptionChain, Symbol};

/// Two-strike FINNIFTY snapshot in the exchange-style JSON shape.
pub const CHAIN_JSON: &str = include_str!("../fixtures/option_chain.json");

/// Parses [`CHAIN_JSON`].
pub fn fixture_chain() -> OptionChain {
    serde_json::from_str(CHAIN_JSON).expect("fixture chain should deserialize")
}

/// A generated snapshot from a fixed seed.
pub fn seeded_chain(symbol: Symbol, seed: u64) -> OptionChain {
    generate_snapshot(symbol, &mut RngSource::seeded(seed))
}
