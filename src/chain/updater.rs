//! Live-tick evolution of an existing snapshot.

use chrono::{Local, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::random::RandomSource;
use super::{MIN_LAST_PRICE, TIMESTAMP_FORMAT};
use crate::models::{OptionChain, OptionContract, StrikeRow, price_from_f64};

/// Maximum absolute spot move per tick.
const SPOT_STEP: f64 = 2.0;

/// Maximum absolute last-price move per tick.
const LTP_STEP: f64 = 1.0;

/// Advances `previous` by one tick stamped with the local wall clock.
pub fn advance_snapshot<R: RandomSource + ?Sized>(previous: OptionChain, rng: &mut R) -> OptionChain {
    advance_snapshot_at(previous, rng, Local::now().naive_local())
}

/// Advances `previous` by one tick as of `now`.
///
/// The spot drifts by up to ±2. Each call and put moves independently via
/// [`evolve_contract`]. Strikes, expiry labels and row count carry over.
pub fn advance_snapshot_at<R: RandomSource + ?Sized>(
    previous: OptionChain,
    rng: &mut R,
    now: NaiveDateTime,
) -> OptionChain {
    let spot = previous.underlying_value.to_f64().unwrap_or_default()
        + rng.uniform(-SPOT_STEP, SPOT_STEP);

    let rows = previous
        .rows
        .into_iter()
        .map(|row| {
            let ce = evolve_contract(row.ce, rng);
            let pe = evolve_contract(row.pe, rng);
            StrikeRow { ce, pe, ..row }
        })
        .collect();

    let chain = OptionChain {
        rows,
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        underlying_value: price_from_f64(spot),
        ..previous
    };
    debug!(symbol = %chain.symbol, spot = %chain.underlying_value, "advanced option chain snapshot");
    chain
}

/// Moves one contract by a tick.
///
/// Draws, in order: last-price delta in `[-1, 1)`, volume increment in
/// `[0, 100)`, open interest delta in `[-25, 25)`. The last price never
/// falls below 0.05 and the change accumulates the same delta. Open interest
/// has no floor. Bid/ask, quantities, IV and Greeks are left as they were.
pub fn evolve_contract<R: RandomSource + ?Sized>(
    contract: OptionContract,
    rng: &mut R,
) -> OptionContract {
    let delta = rng.uniform(-LTP_STEP, LTP_STEP);
    let last = contract.last_price.to_f64().unwrap_or_default();
    let change = contract.change.to_f64().unwrap_or_default();
    let volume = rng.int_in(0, 100) as u64;
    let oi = rng.int_in(-25, 25);

    OptionContract {
        last_price: price_from_f64((last + delta).max(MIN_LAST_PRICE)),
        change: price_from_f64(change + delta),
        total_traded_volume: contract.total_traded_volume + volume,
        open_interest: contract.open_interest + oi,
        ..contract
    }
}
