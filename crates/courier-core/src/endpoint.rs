//! Webhook endpoint configuration and URL derivation.
//!
//! The caller supplies a single `webhookUrl` plus a shared secret. The URL
//! must contain a `webhook/{id}` path segment; the id and the URL's
//! scheme+host are extracted once and reused to build the two outbound
//! endpoint URLs (attachments, document).

use serde::Deserialize;
use url::{Position, Url};

use crate::error::ValidationError;

/// Endpoint configuration as received from the caller.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    pub webhook_url: String,
    pub secret: String,
}

// Security: don't expose the shared secret in debug output
impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("webhook_url", &self.webhook_url)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Validated webhook endpoint derived from a [`WebhookConfig`].
///
/// Carries the webhook id, the `scheme://host` base, and the shared secret.
/// Parsing happens before any network activity; a config that fails here is
/// rejected without a single outbound call.
#[derive(Clone)]
pub struct WebhookEndpoint {
    webhook_id: String,
    base_url: String,
    secret: String,
}

impl WebhookEndpoint {
    /// Parse and validate an endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] when `secret` or `webhookUrl`
    /// is empty, and [`ValidationError::MalformedWebhookUrl`] when the URL
    /// does not parse or lacks a `webhook/{id}` path segment.
    pub fn parse(config: &WebhookConfig) -> Result<Self, ValidationError> {
        if config.webhook_url.is_empty() {
            return Err(ValidationError::Required {
                field: "webhookUrl".to_string(),
            });
        }

        if config.secret.is_empty() {
            return Err(ValidationError::Required {
                field: "secret".to_string(),
            });
        }

        let url = Url::parse(&config.webhook_url).map_err(|e| {
            ValidationError::MalformedWebhookUrl {
                url: config.webhook_url.clone(),
                message: e.to_string(),
            }
        })?;

        let webhook_id = extract_webhook_id(&url).ok_or_else(|| {
            ValidationError::MalformedWebhookUrl {
                url: config.webhook_url.clone(),
                message: "expected a 'webhook/{id}' path segment".to_string(),
            }
        })?;

        // scheme://host[:port], dropping the original path
        let base_url = url[..Position::BeforePath].to_string();

        Ok(Self {
            webhook_id,
            base_url,
            secret: config.secret.clone(),
        })
    }

    /// Webhook id extracted from the configured URL.
    pub fn webhook_id(&self) -> &str {
        &self.webhook_id
    }

    /// `scheme://host` base shared by both outbound endpoints.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared secret used to sign outbound requests.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// URL of the signed attachment upload endpoint.
    pub fn attachments_url(&self) -> String {
        format!(
            "{}/api/v1/integrations/webhook/{}/attachments",
            self.base_url, self.webhook_id
        )
    }

    /// URL of the signed document submission endpoint.
    pub fn document_url(&self) -> String {
        format!(
            "{}/api/v1/integrations/webhook/{}/document",
            self.base_url, self.webhook_id
        )
    }
}

// Security: don't expose the shared secret in debug output
impl std::fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("webhook_id", &self.webhook_id)
            .field("base_url", &self.base_url)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Find the path segment following `webhook`.
fn extract_webhook_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment == "webhook" {
            return segments
                .next()
                .filter(|id| !id.is_empty())
                .map(|id| id.to_string());
        }
    }
    None
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
