//! Crate-level error types.
//!
//! [`ChainError`] unifies every error source (bad input to the generator,
//! configuration, HTTP, JSON) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A symbol name, price, strike or time horizon was rejected before it
    /// could turn into NaN or infinity downstream.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or filesystem I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The TLS trust store could not be assembled.
    #[error("tls error: {0}")]
    Tls(String),

    /// An HTTP request to the completion service failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The completion service answered but the answer was unusable.
    #[error("analysis error: {0}")]
    Analysis(String),
}
