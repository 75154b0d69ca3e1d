//! Attachment download and signed upload.
//!
//! One transfer fetches a remote file into memory, signs a payload
//! describing the file, and uploads it as a single multipart part to the
//! attachment endpoint. The service answers with one reference per stored
//! file, either as a bare `data` value or as an `attachments` batch.

use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use crate::client::CourierClient;
use crate::endpoint::WebhookEndpoint;
use crate::error::CourierError;
use crate::signature::{self, NONCE_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::{AttachmentReference, CourierResult};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_FILE_NAME: &str = "attachment";

/// Transfers one attachment at a time from a source URL to the receiving
/// service.
///
/// Borrowing the client and endpoint keeps the transfer stateless: each
/// call is one download plus one signed upload, buffering a single file in
/// memory.
#[derive(Debug)]
pub struct AttachmentTransfer<'a> {
    client: &'a CourierClient,
    endpoint: &'a WebhookEndpoint,
}

impl<'a> AttachmentTransfer<'a> {
    /// Create a transfer bound to a client and validated endpoint.
    pub fn new(client: &'a CourierClient, endpoint: &'a WebhookEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Download `url` and upload it under a signed multipart request.
    ///
    /// Returns the service-assigned references in server order. Although
    /// only one file is sent per call, a batch-shaped response is honored.
    ///
    /// # Errors
    ///
    /// [`CourierError::Download`] when the source fetch fails or returns a
    /// non-success status; [`CourierError::Upload`] when the signed upload
    /// fails, is rejected, or returns an unparsable body. Both name the
    /// offending source URL.
    pub async fn transfer(&self, url: &str) -> CourierResult<Vec<AttachmentReference>> {
        let (body, content_type, file_name) = self.download(url).await?;
        self.upload(url, body, content_type, file_name).await
    }

    /// Fetch the source file into memory, capturing content type and name.
    async fn download(&self, url: &str) -> CourierResult<(Vec<u8>, String, String)> {
        info!(url, "downloading attachment");

        let response = self.client.http().get(url).send().await.map_err(|e| {
            CourierError::Download {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CourierError::Download {
                url: url.to_string(),
                message: format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let body = response.bytes().await.map_err(|e| CourierError::Download {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let file_name = file_name_from_url(url);

        info!(
            url,
            file = %file_name,
            size = body.len(),
            content_type = %content_type,
            "attachment downloaded"
        );

        Ok((body.to_vec(), content_type, file_name))
    }

    /// Sign the file descriptor and POST the multipart body.
    async fn upload(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: String,
        file_name: String,
    ) -> CourierResult<Vec<AttachmentReference>> {
        let mut payload = Map::new();
        payload.insert(
            "webhookId".to_string(),
            Value::from(self.endpoint.webhook_id()),
        );
        payload.insert(
            "files".to_string(),
            serde_json::json!([{
                "name": file_name,
                "size": body.len(),
                "type": content_type,
            }]),
        );

        let envelope = signature::sign(payload, self.endpoint.secret());

        let part = reqwest::multipart::Part::bytes(body)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| CourierError::Upload {
                url: url.to_string(),
                message: format!("invalid content type '{}': {}", content_type, e),
            })?;
        let form = reqwest::multipart::Form::new().part("files", part);

        let upload_url = self.endpoint.attachments_url();
        info!(url, upload_url = %upload_url, "uploading attachment");

        let response = self
            .client
            .http()
            .post(&upload_url)
            .header(SIGNATURE_HEADER, &envelope.signature)
            .header(TIMESTAMP_HEADER, envelope.timestamp.to_string())
            .header(NONCE_HEADER, &envelope.nonce)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CourierError::Upload {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| CourierError::Upload {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "attachment upload rejected");
            return Err(CourierError::Upload {
                url: url.to_string(),
                message: format!("{}: {}", status.as_u16(), text),
            });
        }

        let parsed: Value =
            serde_json::from_str(&text).map_err(|_| CourierError::Upload {
                url: url.to_string(),
                message: format!("unparsable response body: {}", text),
            })?;

        Ok(extract_references(&parsed))
    }
}

/// Pull the references out of an upload response, preserving server order.
///
/// A batch response carries `{attachments: [{data}, ...]}`; a single-file
/// response carries its reference directly under `data`.
fn extract_references(response: &Value) -> Vec<AttachmentReference> {
    match response.get("attachments").and_then(Value::as_array) {
        Some(batch) => batch
            .iter()
            .map(|entry| AttachmentReference(entry.get("data").cloned().unwrap_or(Value::Null)))
            .collect(),
        None => vec![AttachmentReference(
            response.get("data").cloned().unwrap_or(Value::Null),
        )],
    }
}

/// Derive a filename from the URL's last path segment.
fn file_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
