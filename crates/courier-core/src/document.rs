//! Document field scanning and attachment reference injection.
//!
//! Both operations use first-match semantics over the document's field
//! list: only one attachment-typed field per document is supported, and
//! scanning stops at the first field that qualifies.

use serde_json::Value;
use tracing::debug;

use crate::{AttachmentReference, Document};

/// Field type marking an attachment slot.
pub const ATTACHMENT_FIELD_TYPE: &str = "ATTACHMENT";

/// Resolve the attachment source URLs for a document.
///
/// An explicit, non-empty URL list always wins over field contents.
/// Otherwise the fields are scanned in order: the first attachment-typed
/// field whose value is an array contributes its http(s) string entries,
/// and the scan stops at the first field yielding at least one URL. When no
/// field yields URLs the result is empty and attachment processing is
/// skipped entirely; that is not an error.
pub fn resolve_attachment_urls(document: &Document, explicit: &[String]) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    for field in &document.fields {
        if field.field_type != ATTACHMENT_FIELD_TYPE {
            continue;
        }

        let Some(items) = field.value.as_array() else {
            continue;
        };

        let urls: Vec<String> = items
            .iter()
            .filter_map(Value::as_str)
            .filter(|entry| entry.starts_with("http://") || entry.starts_with("https://"))
            .map(str::to_string)
            .collect();

        if !urls.is_empty() {
            debug!(field = %field.key, count = urls.len(), "extracted attachment URLs from field");
            return urls;
        }
    }

    Vec::new()
}

/// Replace the first attachment field's value with uploaded references.
///
/// Produces an independent copy of `document`; the caller's value is never
/// mutated. The replacement happens even when `references` is empty. Fields
/// after the first attachment-typed one are left untouched, and a document
/// without any attachment field is returned unchanged.
pub fn inject_references(document: &Document, references: &[AttachmentReference]) -> Document {
    let mut finalized = document.clone();

    // Linear search, first match only
    for index in 0..finalized.fields.len() {
        if finalized.fields[index].field_type == ATTACHMENT_FIELD_TYPE {
            debug!(
                field = %finalized.fields[index].key,
                count = references.len(),
                "injecting attachment references"
            );
            finalized.fields[index].value =
                Value::Array(references.iter().map(|reference| reference.0.clone()).collect());
            break;
        }
    }

    finalized
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
