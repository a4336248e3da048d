//! Simulated index option chain dashboard.
//!
//! Generates NSE-style option chains for NIFTY, BANKNIFTY and FINNIFTY,
//! evolves them with a live tick, derives approximate Greeks, and asks a
//! Gemini model for commentary on the current snapshot. All market data is
//! synthetic.

pub mod analysis;
pub mod chain;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
#[cfg(feature = "python")]
mod python;
pub mod tls;
pub mod tui;

pub use error::{ChainError, Result};
