//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `CHAINWATCH_SYMBOL`: index shown at startup (default `NIFTY`)
//! - `CHAINWATCH_REFRESH_MS`: live tick interval (default `5000`)
//! - `CHAINWATCH_CA_BUNDLE`: extra PEM roots for the HTTP client
//! - `GEMINI_API_KEY`: credential for the analysis panel
//! - `GEMINI_API_URL`, `GEMINI_MODEL`, `GEMINI_TIMEOUT_SECS`: endpoint tuning

use std::path::PathBuf;
use std::time::Duration;

use crate::models::Symbol;

/// Default live tick interval.
const DEFAULT_REFRESH_MS: u64 = 5000;

/// Default Gemini REST endpoint.
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default request timeout for analysis calls.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub gemini: GeminiConfig,
    pub ca_bundle: Option<PathBuf>,
}

/// Simulator and refresh settings.
#[derive(Debug)]
pub struct ChainConfig {
    pub symbol: Symbol,
    pub refresh_interval: Duration,
}

/// Gemini completion service settings.
#[derive(Debug)]
pub struct GeminiConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ChainError::Config`](crate::ChainError::Config) if the symbol
/// is unknown or an interval is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let symbol = match non_empty_var("CHAINWATCH_SYMBOL") {
        Some(name) => name
            .parse::<Symbol>()
            .map_err(|e| crate::ChainError::Config(format!("CHAINWATCH_SYMBOL: {e}")))?,
        None => Symbol::default(),
    };

    let refresh_ms = positive_u64("CHAINWATCH_REFRESH_MS", DEFAULT_REFRESH_MS)?;
    let timeout_secs = positive_u64("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

    Ok(AppConfig {
        chain: ChainConfig {
            symbol,
            refresh_interval: Duration::from_millis(refresh_ms),
        },
        gemini: GeminiConfig {
            api_url: non_empty_var("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            api_key: non_empty_var("GEMINI_API_KEY"),
            timeout: Duration::from_secs(timeout_secs),
        },
        ca_bundle: non_empty_var("CHAINWATCH_CA_BUNDLE").map(PathBuf::from),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a positive integer variable, falling back to `default` when unset.
fn positive_u64(name: &str, default: u64) -> crate::Result<u64> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(crate::ChainError::Config(format!("{name} must be greater than zero"))),
        Ok(v) => Ok(v),
        Err(e) => Err(crate::ChainError::Config(format!("{name}={raw:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "CHAINWATCH_SYMBOL",
        "CHAINWATCH_REFRESH_MS",
        "CHAINWATCH_CA_BUNDLE",
        "GEMINI_API_KEY",
        "GEMINI_API_URL",
        "GEMINI_MODEL",
        "GEMINI_TIMEOUT_SECS",
    ];

    /// Clears every config variable, applies `vars`, runs `f`, then restores
    /// the originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> =
            VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();

        // SAFETY: ENV_LOCK serializes every test in this module that reads
        // or writes these variables.
        unsafe {
            for k in VARS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: restoring original values under the same lock.
        unsafe {
            for (k, original) in originals {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.chain.symbol, Symbol::Nifty);
            assert_eq!(config.chain.refresh_interval, Duration::from_millis(5000));
            assert_eq!(config.gemini.api_url, DEFAULT_GEMINI_URL);
            assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
            assert!(config.gemini.api_key.is_none());
            assert!(config.ca_bundle.is_none());
        });
    }

    #[test]
    fn reads_symbol_and_interval() {
        with_env(
            &[
                ("CHAINWATCH_SYMBOL", "banknifty"),
                ("CHAINWATCH_REFRESH_MS", "1500"),
                ("GEMINI_API_KEY", "test-key"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.chain.symbol, Symbol::BankNifty);
                assert_eq!(config.chain.refresh_interval, Duration::from_millis(1500));
                assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
            },
        );
    }

    #[test]
    fn rejects_unknown_symbol() {
        with_env(&[("CHAINWATCH_SYMBOL", "DOW")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("CHAINWATCH_SYMBOL"));
        });
    }

    #[test]
    fn rejects_zero_interval() {
        with_env(&[("CHAINWATCH_REFRESH_MS", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        with_env(&[("GEMINI_TIMEOUT_SECS", "soon")], || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("CHAINWATCH_SYMBOL", ""),
                ("GEMINI_API_KEY", ""),
                ("GEMINI_MODEL", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.chain.symbol, Symbol::Nifty);
                assert!(config.gemini.api_key.is_none());
                assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
            },
        );
    }
}
