//! TLS configuration for the analysis HTTP client.
//!
//! Trusts the Mozilla root set bundled by `webpki-roots`, optionally
//! extended with certificates from a PEM bundle (for intercepting proxies).

use std::path::Path;

use rustls::ClientConfig;
use tracing::debug;

use crate::Result;

/// Builds a [`ClientConfig`] trusting the bundled roots plus `extra_ca`.
///
/// # Errors
///
/// Returns [`ChainError::Tls`](crate::ChainError::Tls) if the bundle cannot
/// be read, fails to parse, or contains no usable certificate.
pub fn build_tls_config(extra_ca: Option<&Path>) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = extra_ca {
        let pem = std::fs::read(path).map_err(|e| {
            crate::ChainError::Tls(format!("failed to read {}: {e}", path.display()))
        })?;
        let certs: Vec<_> = rustls_pemfile::certs(&mut pem.as_slice())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| crate::ChainError::Tls(format!("failed to parse CA PEM: {e}")))?;

        let (added, ignored) = root_store.add_parsable_certificates(certs);
        if added == 0 {
            return Err(crate::ChainError::Tls(format!(
                "no usable certificates in {}",
                path.display()
            )));
        }
        debug!(added, ignored, path = %path.display(), "loaded extra CA certificates");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
