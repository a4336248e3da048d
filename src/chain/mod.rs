//! Synthetic option chain generator.
//!
//! [`generate_snapshot`] fabricates a 21-strike chain around a jittered
//! spot; [`advance_snapshot`] turns one snapshot into the next live tick.
//! Both are pure over their inputs apart from the draws they pull from the
//! caller's [`RandomSource`]. The caller owns whatever cell holds the
//! current snapshot and must apply ticks one at a time.

pub mod generator;
pub mod greeks;
pub mod random;
pub mod updater;

pub use generator::{
    STRIKE_COUNT, expiry_label, generate_snapshot, generate_snapshot_at, generate_snapshot_for,
    synthesize_contract,
};
pub use greeks::{DEFAULT_TIME_TO_EXPIRY, compute_greeks};
pub use random::{RandomSource, ReplaySource, RngSource};
pub use updater::{advance_snapshot, advance_snapshot_at, evolve_contract};

/// Lowest last price a contract can show.
pub const MIN_LAST_PRICE: f64 = 0.05;

/// Wall-clock format for snapshot timestamps.
const TIMESTAMP_FORMAT: &str = "%H:%M:%S";
