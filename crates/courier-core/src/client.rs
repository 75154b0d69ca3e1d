//! Injectable HTTP client shared by all outbound calls.
//!
//! The client is constructed once at startup and passed into the
//! orchestrator by reference, never held as an implicit singleton. It is
//! the only process-wide resource the pipeline uses.

use std::time::Duration;

use thiserror::Error;

/// Error constructing the underlying HTTP client.
#[derive(Debug, Error)]
#[error("failed to construct HTTP client: {message}")]
pub struct ClientBuildError {
    message: String,
}

/// Configuration for outbound HTTP behavior.
///
/// # Examples
///
/// ```
/// use courier_core::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_accept_invalid_certs(false);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for outbound requests
    pub user_agent: String,
    /// Per-call timeout; expiry surfaces as the failing phase's error kind
    pub timeout: Duration,
    /// Accept self-signed TLS certificates on outbound calls.
    ///
    /// A deliberate relaxation for private-network deployments of the
    /// receiving service; disable it anywhere certificates are expected
    /// to verify.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("webhook-courier/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: true,
        }
    }
}

impl ClientConfig {
    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set whether self-signed TLS certificates are accepted.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// HTTP client for attachment transfers and document submission.
#[derive(Debug, Clone)]
pub struct CourierClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CourierClient {
    /// Build a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientBuildError {
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying HTTP client (internal use by the pipeline).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
