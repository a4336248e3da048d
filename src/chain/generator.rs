//! Fresh option chain snapshots.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::greeks::{DEFAULT_TIME_TO_EXPIRY, compute_greeks};
use super::random::RandomSource;
use super::{MIN_LAST_PRICE, TIMESTAMP_FORMAT};
use crate::models::{OptionChain, OptionContract, OptionSide, StrikeRow, Symbol, price_from_f64};

/// Strikes generated below the at-the-money rounding point.
const STRIKES_BELOW: i64 = 10;

/// Total strikes per chain: 10 below, the rounding point, 10 above.
pub const STRIKE_COUNT: usize = 21;

/// Maximum absolute jitter applied to the base spot.
const SPOT_JITTER: f64 = 10.0;

/// Time value per unit of spot, before distance decay.
const TIME_VALUE_RATE: f64 = 0.015;

/// Time value lost per unit of distance from the strike.
const TIME_VALUE_DECAY: f64 = 0.005;

/// Time value used when the decay overshoots below zero.
const TIME_VALUE_FLOOR: f64 = 5.0;

/// Half the bid/ask spread around the last price.
const HALF_SPREAD: f64 = 0.5;

/// Weekday of contract expiry, counted from Sunday (Thursday).
const EXPIRY_WEEKDAY: u32 = 4;

/// Labels following the front expiry in the expiry list.
const LATER_EXPIRIES: [&str; 2] = ["Next Week", "Next Month"];

/// Builds one call or put at `strike`.
///
/// Draws, in order: last-price noise, change, open interest, change in open
/// interest, percent change in open interest, volume, implied volatility,
/// bid quantity, ask quantity.
///
/// The bid is not floored at zero, so a very cheap contract can quote a
/// negative bid.
///
/// # Errors
///
/// Returns [`ChainError::InvalidInput`](crate::ChainError::InvalidInput) if
/// `spot` or `strike` is not positive.
pub fn synthesize_contract<R: RandomSource + ?Sized>(
    side: OptionSide,
    strike: Decimal,
    spot: f64,
    expiry: &str,
    underlying: &str,
    rng: &mut R,
) -> crate::Result<OptionContract> {
    let strike_f = strike.to_f64().unwrap_or_default();
    let greeks = compute_greeks(side, spot, strike_f, DEFAULT_TIME_TO_EXPIRY)?;

    let itm = match side {
        OptionSide::Call => spot > strike_f,
        OptionSide::Put => spot < strike_f,
    };
    let distance = (spot - strike_f).abs();
    let intrinsic = if itm { distance } else { 0.0 };
    let mut time_value = spot * TIME_VALUE_RATE - distance * TIME_VALUE_DECAY;
    if time_value < 0.0 {
        time_value = TIME_VALUE_FLOOR;
    }

    let ltp = (intrinsic + time_value + rng.uniform(0.0, 2.0)).max(MIN_LAST_PRICE);
    let change = rng.uniform(-10.0, 10.0);

    Ok(OptionContract {
        strike_price: strike,
        expiry_date: expiry.to_string(),
        side,
        underlying: underlying.to_string(),
        identifier: OptionContract::make_identifier(underlying, expiry, strike, side),
        open_interest: rng.int_in(5_000, 105_000),
        change_in_open_interest: rng.int_in(-10_000, 10_000),
        pchange_in_open_interest: rng.uniform(-5.0, 5.0),
        total_traded_volume: rng.int_in(0, 500_000) as u64,
        implied_volatility: 12.0 + rng.uniform(0.0, 5.0),
        last_price: price_from_f64(ltp),
        change: price_from_f64(change),
        p_change: change / ltp * 100.0,
        bid_price: price_from_f64(ltp - HALF_SPREAD),
        ask_price: price_from_f64(ltp + HALF_SPREAD),
        bid_qty: rng.int_in(0, 1_000) as u32,
        ask_qty: rng.int_in(0, 1_000) as u32,
        greeks,
    })
}

/// Generates a snapshot for `symbol` stamped with the local wall clock.
pub fn generate_snapshot<R: RandomSource + ?Sized>(symbol: Symbol, rng: &mut R) -> OptionChain {
    generate_snapshot_at(symbol, rng, Local::now().naive_local())
}

/// Generates a snapshot for a symbol given by name.
///
/// # Errors
///
/// Returns [`ChainError::InvalidInput`](crate::ChainError::InvalidInput) if
/// `name` is not a known index.
pub fn generate_snapshot_for<R: RandomSource + ?Sized>(
    name: &str,
    rng: &mut R,
) -> crate::Result<OptionChain> {
    let symbol: Symbol = name.parse()?;
    Ok(generate_snapshot(symbol, rng))
}

/// Generates a snapshot as of `now`.
///
/// The spot is the symbol's base price plus up to ±10 jitter. Strikes start
/// ten steps below the spot rounded down to the step and run for
/// [`STRIKE_COUNT`] consecutive steps. Every row shares one expiry label.
pub fn generate_snapshot_at<R: RandomSource + ?Sized>(
    symbol: Symbol,
    rng: &mut R,
    now: NaiveDateTime,
) -> OptionChain {
    let spot = symbol.base_price() + rng.uniform(-SPOT_JITTER, SPOT_JITTER);
    let step = i64::from(symbol.strike_step());
    let start = (spot / step as f64).floor() as i64 * step - STRIKES_BELOW * step;
    let expiry = expiry_label(now.date());

    let rows: Vec<StrikeRow> = (0..STRIKE_COUNT as i64)
        .map(|i| {
            let strike = Decimal::from(start + i * step);
            let ce = synthesize_contract(OptionSide::Call, strike, spot, &expiry, symbol.as_str(), rng)
                .expect("generated spot and strikes are positive");
            let pe = synthesize_contract(OptionSide::Put, strike, spot, &expiry, symbol.as_str(), rng)
                .expect("generated spot and strikes are positive");
            StrikeRow {
                strike_price: strike,
                expiry_date: expiry.clone(),
                ce,
                pe,
            }
        })
        .collect();

    let mut expiry_dates = vec![expiry];
    expiry_dates.extend(LATER_EXPIRIES.iter().map(|s| s.to_string()));

    let chain = OptionChain {
        symbol,
        expiry_dates,
        rows,
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        underlying_value: price_from_f64(spot),
    };
    debug!(
        symbol = %symbol,
        spot = %chain.underlying_value,
        first_strike = start,
        "generated option chain snapshot"
    );
    chain
}

/// Label of the next Thursday on or after `today`, e.g. `Thu Oct 22 2026`.
pub fn expiry_label(today: NaiveDate) -> String {
    let weekday = today.weekday().num_days_from_sunday();
    let days_ahead = (EXPIRY_WEEKDAY + 7 - weekday) % 7;
    let expiry = today + Days::new(u64::from(days_ahead));
    expiry.format("%a %b %d %Y").to_string()
}
