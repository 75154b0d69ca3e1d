//! Signature envelope generation for outbound requests.
//!
//! Every outbound call to the receiving service carries an HMAC-SHA256
//! signature over a canonical JSON rendering of the request payload merged
//! with a fresh timestamp and nonce. The receiver recomputes the digest, so
//! canonicalization must be byte-for-byte deterministic: object keys are
//! sorted recursively and no insignificant whitespace is emitted.
//!
//! Envelopes have no independent lifecycle. One is computed immediately
//! before each signed call and discarded afterwards; reusing a nonce or
//! timestamp across requests would defeat the receiver's replay defense.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;
use uuid::Uuid;

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Header carrying the Unix-seconds timestamp.
pub const TIMESTAMP_HEADER: &str = "x-webhook-timestamp";

/// Header carrying the per-request nonce.
pub const NONCE_HEADER: &str = "x-webhook-nonce";

type HmacSha256 = Hmac<Sha256>;

/// Timestamp, nonce, and signature authenticating one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEnvelope {
    /// Current time in whole seconds since the Unix epoch
    pub timestamp: i64,
    /// Fresh random token, unique per call, opaque to the receiver
    pub nonce: String,
    /// Hex-encoded HMAC-SHA256 over the canonical payload
    pub signature: String,
}

/// Sign a payload with the shared secret.
///
/// Derives the current timestamp and a fresh nonce, merges both into the
/// payload, and computes the keyed digest over its canonical form. Call
/// once per distinct outbound request.
pub fn sign(payload: Map<String, Value>, secret: &str) -> SignatureEnvelope {
    let timestamp = Utc::now().timestamp();
    let nonce = Uuid::new_v4().simple().to_string();
    let signature = sign_at(&payload, secret, timestamp, &nonce);

    SignatureEnvelope {
        timestamp,
        nonce,
        signature,
    }
}

/// Deterministic signing core: compute the signature for a fixed timestamp
/// and nonce.
///
/// The same payload, secret, timestamp, and nonce always yield the same
/// signature; changing any payload field changes it.
pub fn sign_at(
    payload: &Map<String, Value>,
    secret: &str,
    timestamp: i64,
    nonce: &str,
) -> String {
    let mut merged = payload.clone();
    merged.insert("timestamp".to_string(), Value::from(timestamp));
    merged.insert("nonce".to_string(), Value::from(nonce));

    let canonical = canonical_json(&Value::Object(merged));

    // HMAC-SHA256 accepts keys of any length, so construction cannot fail
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(canonical.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Render a JSON value with recursively sorted object keys and no
/// insignificant whitespace.
fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (index, (key, entry)) in entries.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(entry, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars already render compactly
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
