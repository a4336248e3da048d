//! Credential storage in the system keychain.
//!
//! The Gemini key can live in the OS keychain instead of the shell
//! environment. At startup, [`populate_env_from_keychain`] copies a stored
//! key into `GEMINI_API_KEY` so [`crate::config::fetch_config`] picks it up.

use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "chainwatch";

/// API credentials managed by this module.
#[derive(Clone, Copy, Debug)]
pub enum CredentialKey {
    GeminiApiKey,
}

impl CredentialKey {
    /// Returns the keychain entry identifier.
    pub fn keyring_id(self) -> &'static str {
        match self {
            Self::GeminiApiKey => "gemini_api_key",
        }
    }

    /// Returns the environment variable name for this credential.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::GeminiApiKey => "GEMINI_API_KEY",
        }
    }

    /// Returns a human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::GeminiApiKey => "Gemini API Key",
        }
    }

    /// All credential keys.
    pub const ALL: [CredentialKey; 1] = [Self::GeminiApiKey];
}

/// Loads a credential from the keychain, returning `None` if not set.
pub fn load(key: CredentialKey) -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id()).ok()?;
    match entry.get_password() {
        Ok(password) => Some(Zeroizing::new(password)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(key = key.keyring_id(), error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Saves a credential to the keychain.
///
/// # Errors
///
/// Returns [`ChainError::Config`](crate::ChainError::Config) if the value
/// is blank or the keychain rejects the write.
pub fn save(key: CredentialKey, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::ChainError::Config(format!(
            "{} must not be empty",
            key.label()
        )));
    }
    let entry = keyring::Entry::new(SERVICE, key.keyring_id())
        .map_err(|e| crate::ChainError::Config(format!("keyring entry error: {e}")))?;
    entry
        .set_password(value.trim())
        .map_err(|e| crate::ChainError::Config(format!("failed to save to keychain: {e}")))
}

/// Checks whether a credential exists in the keychain.
pub fn is_set(key: CredentialKey) -> bool {
    load(key).is_some()
}

/// Populates environment variables from the keychain for any
/// credentials not already set in the environment.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() {
    for key in CredentialKey::ALL {
        if std::env::var(key.env_var()).is_err()
            && let Some(value) = load(key)
        {
            debug!(key = key.env_var(), "loaded credential from keychain");
            // SAFETY: called from main before the tokio runtime spawns tasks.
            unsafe {
                std::env::set_var(key.env_var(), value.as_str());
            }
        }
    }
}
