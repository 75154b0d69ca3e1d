//! Error types for the submission pipeline.
//!
//! Every error is terminal for the current request: nothing is retried
//! internally and there is no partial-success result. Attachments already
//! uploaded when a later step fails are left orphaned on the remote service.

use thiserror::Error;

/// Error type for input validation failures.
///
/// Validation runs before any network activity; a validation error
/// guarantees that no outbound call was made.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Webhook URL '{url}' is malformed: {message}")]
    MalformedWebhookUrl { url: String, message: String },
}

/// Top-level error type for the submission pipeline.
///
/// The boundary layer maps [`CourierError::Validation`] to a client-fault
/// response and everything else to a server-fault response.
#[derive(Debug, Error)]
pub enum CourierError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Attachment download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("Attachment upload failed for {url}: {message}")]
    Upload { url: String, message: String },

    #[error("Document submission failed: {message}")]
    Submission { message: String },
}

impl CourierError {
    /// Check if the caller, rather than a downstream service, caused this error.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Name of the pipeline phase that produced this error.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Download { .. } => "download",
            Self::Upload { .. } => "upload",
            Self::Submission { .. } => "submission",
        }
    }

    /// The attachment source URL this error concerns, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Download { url, .. } | Self::Upload { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
