//! Tests for CLI argument parsing and request loading.

use super::*;
use std::io::Write;

#[test]
fn defaults_read_stdin_with_info_logging() {
    let cli = Cli::parse_from(["courier"]);

    assert!(cli.input.is_none());
    assert_eq!(cli.log_level, "info");
    assert!(!cli.json_logs);
    assert!(!cli.debug_detail);
    assert_eq!(cli.timeout, 30);
    assert!(!cli.verify_certs);
}

#[test]
fn flags_override_defaults() {
    let cli = Cli::parse_from([
        "courier",
        "--input",
        "request.json",
        "--log-level",
        "debug",
        "--json-logs",
        "--debug-detail",
        "--timeout",
        "5",
        "--verify-certs",
    ]);

    assert_eq!(cli.input.as_deref(), Some(Path::new("request.json")));
    assert_eq!(cli.log_level, "debug");
    assert!(cli.json_logs);
    assert!(cli.debug_detail);
    assert_eq!(cli.timeout, 5);
    assert!(cli.verify_certs);
}

#[test]
fn load_request_parses_a_valid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "documentData": {{
                "documentId": "D1",
                "documentSN": "S1",
                "startTime": 100,
                "fields": []
            }},
            "attachmentUrls": ["http://x/f.pdf"],
            "config": {{
                "webhookUrl": "https://h/v1/integrations/webhook/W1/x",
                "secret": "s"
            }}
        }}"#
    )
    .unwrap();

    let request = load_request(Some(file.path())).unwrap();

    assert_eq!(request.document_data.document_id, "D1");
    assert_eq!(request.attachment_urls, vec!["http://x/f.pdf"]);
}

#[test]
fn load_request_defaults_missing_attachment_urls_to_empty() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "documentData": {{
                "documentId": "D1",
                "documentSN": "S1",
                "startTime": 100,
                "fields": []
            }},
            "config": {{
                "webhookUrl": "https://h/v1/integrations/webhook/W1/x",
                "secret": "s"
            }}
        }}"#
    )
    .unwrap();

    let request = load_request(Some(file.path())).unwrap();

    assert!(request.attachment_urls.is_empty());
}

#[test]
fn load_request_reports_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let error = load_request(Some(file.path())).unwrap_err();

    assert!(matches!(error, CliError::InvalidInput { .. }));
}

#[test]
fn load_request_reports_missing_files() {
    let error = load_request(Some(Path::new("/nonexistent/request.json"))).unwrap_err();

    assert!(matches!(error, CliError::Io(_)));
}
