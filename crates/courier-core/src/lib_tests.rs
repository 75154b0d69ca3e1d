//! Tests for the domain types' wire representation.

use super::*;
use serde_json::json;

#[test]
fn document_deserializes_from_camel_case_wire_names() {
    let document: Document = serde_json::from_value(json!({
        "documentId": "D1",
        "documentSN": "S1",
        "documentURL": "https://example.test/doc/1",
        "startTime": 100,
        "fields": [
            {"key": "att", "type": "ATTACHMENT", "value": ["http://x/f.pdf"]}
        ]
    }))
    .unwrap();

    assert_eq!(document.document_id, "D1");
    assert_eq!(document.document_sn, "S1");
    assert_eq!(document.document_url.as_deref(), Some("https://example.test/doc/1"));
    assert_eq!(document.start_time, 100);
    assert_eq!(document.fields.len(), 1);
    assert_eq!(document.fields[0].field_type, "ATTACHMENT");
}

#[test]
fn document_serializes_back_to_wire_names() {
    let document = Document {
        document_id: "D1".to_string(),
        document_sn: "S1".to_string(),
        document_url: Some("https://example.test/doc/1".to_string()),
        start_time: 100,
        fields: vec![Field {
            key: "att".to_string(),
            field_type: "ATTACHMENT".to_string(),
            value: json!([]),
        }],
    };

    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["documentId"], "D1");
    assert_eq!(value["documentSN"], "S1");
    assert_eq!(value["documentURL"], "https://example.test/doc/1");
    assert_eq!(value["startTime"], 100);
    assert_eq!(value["fields"][0]["type"], "ATTACHMENT");
    assert_eq!(value["fields"][0]["key"], "att");
}

#[test]
fn absent_document_url_is_omitted_from_the_body() {
    let document = Document {
        document_id: "D1".to_string(),
        document_sn: "S1".to_string(),
        document_url: None,
        start_time: 100,
        fields: Vec::new(),
    };

    let value = serde_json::to_value(&document).unwrap();

    assert!(value.get("documentURL").is_none());
}

#[test]
fn attachment_reference_is_transparent_over_its_value() {
    let reference = AttachmentReference(json!({"id": "A1"}));

    let value = serde_json::to_value(&reference).unwrap();

    assert_eq!(value, json!({"id": "A1"}));

    let roundtrip: AttachmentReference = serde_json::from_value(value).unwrap();
    assert_eq!(roundtrip, reference);
}
