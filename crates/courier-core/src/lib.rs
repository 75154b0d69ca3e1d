//! # Courier Core
//!
//! Core pipeline for submitting signed business documents to a webhook
//! receiving service.
//!
//! Given a document and a set of remote attachment URLs, the pipeline
//! downloads each attachment, uploads it to the receiving service under an
//! HMAC-signed multipart request, substitutes the service-assigned
//! attachment references back into the document, and finally submits the
//! finalized document as signed JSON.
//!
//! ## Architecture
//!
//! The transport boundary (HTTP server, request parsing, response codes) is
//! external to this crate. Callers hand a parsed [`PushRequest`] to a
//! [`DocumentSubmitter`] and receive a [`PushOutcome`] or a [`CourierError`]
//! to serialize back out. The HTTP client is an explicitly constructed,
//! injectable object ([`CourierClient`]), built once at startup and shared
//! by reference.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use courier_core::{ClientConfig, CourierClient, DocumentSubmitter, PushRequest};
//!
//! # async fn example(request: PushRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let client = CourierClient::new(ClientConfig::default())?;
//! let submitter = DocumentSubmitter::new(&client);
//! let outcome = submitter.submit(&request).await?;
//! println!("uploaded {} attachments", outcome.uploaded_attachments);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard result type for courier operations
pub type CourierResult<T> = Result<T, CourierError>;

// ============================================================================
// Domain Types
// ============================================================================

/// A business document as received from the caller.
///
/// The document is a read-only input: the pipeline clones it and mutates only
/// the clone. Wire names follow the receiving service's camelCase contract;
/// `documentURL` is omitted from the serialized body when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    #[serde(rename = "documentSN")]
    pub document_sn: String,
    #[serde(rename = "documentURL", skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub start_time: i64,
    pub fields: Vec<Field>,
}

/// A typed key/value entry within a document.
///
/// A field with type [`ATTACHMENT_FIELD_TYPE`] holds either a list of source
/// URLs (before processing) or a list of uploaded-attachment references
/// (after processing). The same slot is reused; the two interpretations are
/// never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: Value,
}

/// Opaque reference to a file stored by the receiving service.
///
/// Returned by the attachment endpoint per uploaded file and inserted
/// verbatim into the document's attachment field. The core never inspects
/// its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentReference(pub Value);

// ============================================================================
// Module declarations
// ============================================================================

/// Injectable HTTP client shared by all outbound calls
pub mod client;

/// Document field scanning and attachment reference injection
pub mod document;

/// Webhook endpoint configuration and URL derivation
pub mod endpoint;

/// Error taxonomy for the submission pipeline
pub mod error;

/// Signature envelope generation for outbound requests
pub mod signature;

/// Submission orchestration
pub mod submit;

/// Attachment download and signed upload
pub mod transfer;

// Re-export key types for convenience
pub use client::{ClientBuildError, ClientConfig, CourierClient};
pub use document::{inject_references, resolve_attachment_urls, ATTACHMENT_FIELD_TYPE};
pub use endpoint::{WebhookConfig, WebhookEndpoint};
pub use error::{CourierError, ValidationError};
pub use signature::{
    SignatureEnvelope, NONCE_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use submit::{DocumentSubmitter, PushFailure, PushOutcome, PushRequest};
pub use transfer::AttachmentTransfer;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
