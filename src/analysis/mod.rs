//! LLM commentary on a snapshot.
//!
//! [`analyze_chain`] is the only entry point the dashboard uses. It never
//! returns an error: a missing key, a failed call or an empty answer all
//! come back as fixed, human-readable messages.

pub mod gemini;
pub mod summary;

use std::future::Future;

use tracing::warn;

pub use gemini::GeminiClient;
pub use summary::{ChainSummary, build_prompt};

use crate::models::OptionChain;

/// Shown instead of calling the service when no key was supplied.
pub const MISSING_KEY_MESSAGE: &str =
    "Please provide a valid API Key to use the AI analysis feature.";

/// Shown when the service call fails for any reason.
pub const FAILURE_MESSAGE: &str =
    "Failed to generate analysis. Please check your API key or try again later.";

/// Shown when the service answers with no text.
pub const EMPTY_MESSAGE: &str = "Analysis could not be generated.";

/// Shown when there is no snapshot content to summarize.
pub const NO_DATA_MESSAGE: &str = "No option chain data to analyze yet.";

/// A text-completion backend.
pub trait TextCompletion {
    /// Sends `prompt` and returns the generated text.
    fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> impl Future<Output = crate::Result<String>> + Send;
}

/// Produces markdown commentary for `chain`, or a fallback message.
pub async fn analyze_chain<C: TextCompletion>(
    chain: &OptionChain,
    api_key: &str,
    service: &C,
) -> String {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return MISSING_KEY_MESSAGE.to_string();
    }
    let Some(summary) = ChainSummary::from_chain(chain) else {
        return NO_DATA_MESSAGE.to_string();
    };

    let prompt = build_prompt(&summary);
    match service.complete(api_key, &prompt).await {
        Ok(text) if text.trim().is_empty() => EMPTY_MESSAGE.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "analysis request failed");
            FAILURE_MESSAGE.to_string()
        }
    }
}
