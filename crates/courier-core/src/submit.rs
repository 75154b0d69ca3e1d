//! Submission orchestration.
//!
//! Sequences the full pipeline for one push request: validate the endpoint
//! config, resolve attachment URLs, transfer each attachment strictly in
//! order, inject the resulting references into a document copy, then sign
//! and submit the finalized document. Each request is one independent,
//! self-contained execution; nothing is shared across requests beyond the
//! injected client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::client::CourierClient;
use crate::document::{inject_references, resolve_attachment_urls};
use crate::endpoint::{WebhookConfig, WebhookEndpoint};
use crate::error::CourierError;
use crate::signature::{self, NONCE_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::transfer::AttachmentTransfer;
use crate::{AttachmentReference, CourierResult, Document};

// ============================================================================
// Request and Response Types
// ============================================================================

/// The single inbound operation's payload: a document, optional explicit
/// attachment URLs, and the endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub document_data: Document,
    #[serde(default)]
    pub attachment_urls: Vec<String>,
    pub config: WebhookConfig,
}

/// Successful pipeline result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushOutcome {
    pub success: bool,
    pub message: String,
    pub uploaded_attachments: usize,
    /// Remote service's document response, passed through verbatim
    pub result: Value,
}

/// Failure payload for the boundary layer to serialize back to the caller.
#[derive(Debug, Serialize)]
pub struct PushFailure {
    pub success: bool,
    pub error: String,
    /// Diagnostic detail, attached only in non-production contexts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PushFailure {
    /// Build a failure payload from a pipeline error.
    ///
    /// `include_detail` controls whether diagnostic detail (failing phase
    /// and debug rendering) is attached.
    pub fn from_error(error: &CourierError, include_detail: bool) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            detail: include_detail.then(|| format!("phase: {}, {:?}", error.phase(), error)),
        }
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs the signed submission pipeline against an injected client.
#[derive(Debug)]
pub struct DocumentSubmitter<'a> {
    client: &'a CourierClient,
}

impl<'a> DocumentSubmitter<'a> {
    /// Create a submitter borrowing the shared HTTP client.
    pub fn new(client: &'a CourierClient) -> Self {
        Self { client }
    }

    /// Execute the full pipeline for one push request.
    ///
    /// Attachment transfers run strictly in sequence and the whole request
    /// aborts on the first failure; attachments already uploaded at that
    /// point are not rolled back. Reference injection happens whenever the
    /// document has an attachment-typed field, even with zero transfers.
    ///
    /// # Errors
    ///
    /// [`CourierError::Validation`] before any network activity for a bad
    /// config, [`CourierError::Download`]/[`CourierError::Upload`] from the
    /// failing attachment, or [`CourierError::Submission`] when the final
    /// document push is rejected.
    pub async fn submit(&self, request: &PushRequest) -> CourierResult<PushOutcome> {
        let endpoint = WebhookEndpoint::parse(&request.config)?;

        info!(
            document_id = %request.document_data.document_id,
            webhook_id = %endpoint.webhook_id(),
            explicit_urls = request.attachment_urls.len(),
            "processing push request"
        );

        let urls = resolve_attachment_urls(&request.document_data, &request.attachment_urls);

        let mut references: Vec<AttachmentReference> = Vec::new();
        if !urls.is_empty() {
            info!(count = urls.len(), "transferring attachments");
            let transfer = AttachmentTransfer::new(self.client, &endpoint);

            // Strictly sequential: one buffered file at a time, abort on
            // first failure
            for url in &urls {
                match transfer.transfer(url).await {
                    Ok(transferred) => references.extend(transferred),
                    Err(e) => {
                        error!(url = %url, phase = e.phase(), "attachment transfer failed");
                        return Err(e);
                    }
                }
            }

            info!(count = references.len(), "attachments transferred");
        }

        let finalized = inject_references(&request.document_data, &references);
        let outcome = self
            .push_document(&endpoint, &finalized, references.len())
            .await?;

        Ok(outcome)
    }

    /// Sign the finalized document body and POST it to the document endpoint.
    async fn push_document(
        &self,
        endpoint: &WebhookEndpoint,
        document: &Document,
        uploaded_attachments: usize,
    ) -> CourierResult<PushOutcome> {
        let body =
            serde_json::to_value(document).map_err(|e| CourierError::Submission {
                message: format!("failed to encode document body: {}", e),
            })?;

        // The receiver merges the path parameter into the signature input,
        // so webhookId is signed but deliberately absent from the body
        let mut payload = body.as_object().cloned().unwrap_or_default();
        payload.insert("webhookId".to_string(), Value::from(endpoint.webhook_id()));

        let envelope = signature::sign(payload, endpoint.secret());

        let document_url = endpoint.document_url();
        info!(document_url = %document_url, "submitting document");

        let response = self
            .client
            .http()
            .post(&document_url)
            .header(SIGNATURE_HEADER, &envelope.signature)
            .header(TIMESTAMP_HEADER, envelope.timestamp.to_string())
            .header(NONCE_HEADER, &envelope.nonce)
            .json(&body)
            .send()
            .await
            .map_err(|e| CourierError::Submission {
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| CourierError::Submission {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), "document submission rejected");
            return Err(CourierError::Submission {
                message: format!("{}: {}", status.as_u16(), text),
            });
        }

        let result: Value =
            serde_json::from_str(&text).map_err(|_| CourierError::Submission {
                message: format!("unparsable response body: {}", text),
            })?;

        info!(uploaded_attachments, "document submitted");

        Ok(PushOutcome {
            success: true,
            message: "document submitted successfully".to_string(),
            uploaded_attachments,
            result,
        })
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
