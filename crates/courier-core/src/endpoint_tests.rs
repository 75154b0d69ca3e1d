//! Tests for webhook endpoint parsing.

use super::*;
use crate::error::ValidationError;

fn config(webhook_url: &str, secret: &str) -> WebhookConfig {
    WebhookConfig {
        webhook_url: webhook_url.to_string(),
        secret: secret.to_string(),
    }
}

#[test]
fn extracts_webhook_id_and_base_url() {
    let endpoint =
        WebhookEndpoint::parse(&config("https://h/v1/integrations/webhook/W1/x", "s")).unwrap();

    assert_eq!(endpoint.webhook_id(), "W1");
    assert_eq!(endpoint.base_url(), "https://h");
}

#[test]
fn base_url_keeps_the_port() {
    let endpoint = WebhookEndpoint::parse(&config(
        "http://127.0.0.1:8443/v1/integrations/webhook/abc-123/document",
        "s",
    ))
    .unwrap();

    assert_eq!(endpoint.webhook_id(), "abc-123");
    assert_eq!(endpoint.base_url(), "http://127.0.0.1:8443");
}

#[test]
fn builds_both_endpoint_urls_from_one_config() {
    let endpoint =
        WebhookEndpoint::parse(&config("https://h/v1/integrations/webhook/W1/x", "s")).unwrap();

    assert_eq!(
        endpoint.attachments_url(),
        "https://h/api/v1/integrations/webhook/W1/attachments"
    );
    assert_eq!(
        endpoint.document_url(),
        "https://h/api/v1/integrations/webhook/W1/document"
    );
}

#[test]
fn rejects_empty_webhook_url() {
    let error = WebhookEndpoint::parse(&config("", "s")).unwrap_err();

    assert!(matches!(
        error,
        ValidationError::Required { ref field } if field == "webhookUrl"
    ));
}

#[test]
fn rejects_empty_secret() {
    let error =
        WebhookEndpoint::parse(&config("https://h/v1/integrations/webhook/W1/x", "")).unwrap_err();

    assert!(matches!(
        error,
        ValidationError::Required { ref field } if field == "secret"
    ));
}

#[test]
fn rejects_url_without_webhook_segment() {
    let error =
        WebhookEndpoint::parse(&config("https://h/v1/integrations/other/W1", "s")).unwrap_err();

    assert!(matches!(error, ValidationError::MalformedWebhookUrl { .. }));
}

#[test]
fn rejects_url_where_webhook_is_the_last_segment() {
    let error =
        WebhookEndpoint::parse(&config("https://h/v1/integrations/webhook", "s")).unwrap_err();

    assert!(matches!(error, ValidationError::MalformedWebhookUrl { .. }));
}

#[test]
fn rejects_unparsable_url() {
    let error = WebhookEndpoint::parse(&config("not a url", "s")).unwrap_err();

    assert!(matches!(error, ValidationError::MalformedWebhookUrl { .. }));
}

#[test]
fn debug_output_redacts_the_secret() {
    let config = config("https://h/v1/integrations/webhook/W1/x", "very-secret");
    let endpoint = WebhookEndpoint::parse(&config).unwrap();

    let config_debug = format!("{:?}", config);
    let endpoint_debug = format!("{:?}", endpoint);

    assert!(!config_debug.contains("very-secret"));
    assert!(!endpoint_debug.contains("very-secret"));
    assert!(config_debug.contains("<REDACTED>"));
}
