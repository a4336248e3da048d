//! PyO3 bindings for the chain core.
//!
//! Snapshots cross the boundary as JSON strings in the exchange-style shape
//! the models serialize to, so Python callers can use `json.loads` directly.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::ChainError;
use crate::chain::{self, RngSource};
use crate::models::{OptionChain, OptionGreeks, OptionSide};

impl From<ChainError> for PyErr {
    fn from(e: ChainError) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

fn rng(seed: Option<u64>) -> RngSource<rand::rngs::StdRng> {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os_rng(),
    }
}

fn parse_side(side: &str) -> PyResult<OptionSide> {
    match side.trim().to_ascii_uppercase().as_str() {
        "CE" | "CALL" => Ok(OptionSide::Call),
        "PE" | "PUT" => Ok(OptionSide::Put),
        other => Err(PyValueError::new_err(format!("unknown option side: {other}"))),
    }
}

/// Generates a fresh snapshot for `symbol` and returns it as JSON.
#[pyfunction]
#[pyo3(signature = (symbol, seed = None))]
fn generate_chain(symbol: &str, seed: Option<u64>) -> PyResult<String> {
    let snapshot = chain::generate_snapshot_for(symbol, &mut rng(seed))?;
    Ok(serde_json::to_string(&snapshot).map_err(ChainError::from)?)
}

/// Applies one live tick to a JSON snapshot and returns the next one.
#[pyfunction]
#[pyo3(signature = (snapshot, seed = None))]
fn advance_chain(snapshot: &str, seed: Option<u64>) -> PyResult<String> {
    let previous: OptionChain = serde_json::from_str(snapshot).map_err(ChainError::from)?;
    let next = chain::advance_snapshot(previous, &mut rng(seed));
    Ok(serde_json::to_string(&next).map_err(ChainError::from)?)
}

/// Approximate Greeks for one contract.
#[pyfunction]
#[pyo3(signature = (side, spot, strike, time_to_expiry = chain::DEFAULT_TIME_TO_EXPIRY))]
fn compute_greeks(side: &str, spot: f64, strike: f64, time_to_expiry: f64) -> PyResult<OptionGreeks> {
    Ok(chain::compute_greeks(parse_side(side)?, spot, strike, time_to_expiry)?)
}

#[pymodule]
fn chainwatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<OptionGreeks>()?;
    m.add_function(wrap_pyfunction!(generate_chain, m)?)?;
    m.add_function(wrap_pyfunction!(advance_chain, m)?)?;
    m.add_function(wrap_pyfunction!(compute_greeks, m)?)?;
    Ok(())
}
