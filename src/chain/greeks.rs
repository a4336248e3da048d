//! Display-grade option sensitivities.
//!
//! These are Black-Scholes-shaped approximations with fixed rate and
//! volatility and a logistic stand-in for the normal CDF. They exist so the
//! chain looks plausible on screen; nothing should price or hedge off them.

use std::f64::consts::PI;

use crate::models::{OptionGreeks, OptionSide, round_f64};

/// Time to expiry, in years, used when none is given.
pub const DEFAULT_TIME_TO_EXPIRY: f64 = 0.05;

/// Assumed risk-free rate.
const RATE: f64 = 0.05;

/// Assumed volatility.
const SIGMA: f64 = 0.2;

/// Steepness of the logistic approximation of N(d1).
const SIGMOID_SCALE: f64 = 3.0;

/// Computes rounded Greeks for one contract.
///
/// Delta and theta are rounded to 2 dp, gamma to 4 dp, vega to 2 dp. Theta
/// is a per-day figure and carries the same sign for calls and puts.
///
/// # Errors
///
/// Returns [`ChainError::InvalidInput`](crate::ChainError::InvalidInput) if
/// `spot`, `strike` or `time_to_expiry` is not a positive finite number.
pub fn compute_greeks(
    side: OptionSide,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
) -> crate::Result<OptionGreeks> {
    require_positive("spot", spot)?;
    require_positive("strike", strike)?;
    require_positive("time to expiry", time_to_expiry)?;

    let sqrt_t = time_to_expiry.sqrt();
    let d1 = ((spot / strike).ln() + (RATE + 0.5 * SIGMA * SIGMA) * time_to_expiry)
        / (SIGMA * sqrt_t);

    let sig = 1.0 / (1.0 + (-SIGMOID_SCALE * d1).exp());
    let delta = match side {
        OptionSide::Call => sig,
        OptionSide::Put => sig - 1.0,
    };

    let pdf = normal_pdf(d1);
    let gamma = pdf / (spot * SIGMA * sqrt_t);
    let theta = -(spot * SIGMA * pdf / (2.0 * sqrt_t)) / 365.0;
    let vega = spot * sqrt_t * pdf / 100.0;

    Ok(OptionGreeks {
        delta: round_f64(delta, 2),
        theta: round_f64(theta, 2),
        gamma: round_f64(gamma, 4),
        vega: round_f64(vega, 2),
    })
}

/// Standard normal density.
fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

fn require_positive(name: &str, value: f64) -> crate::Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(crate::ChainError::InvalidInput(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
