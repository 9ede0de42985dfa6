// Tests for output formatting
//
// These tests check the human rendering of canonical resources and the
// machine formats written through OutputWriter.

use super::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Writer that keeps everything written to it
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat) -> (OutputWriter, Captured) {
    let captured = Captured::default();
    let writer = OutputWriter::with_writer(format, false, false, Box::new(captured.clone()));
    (writer, captured)
}

fn canonical_user() -> Payload {
    Payload::from(json!({
        "login": "octocat",
        "_links": {
            "self": {"href": "https://api.github.com/users/octocat"},
            "html": {"href": "https://github.com/octocat"}
        },
        "public_repositories": 8
    }))
}

#[test]
fn test_human_object_lists_links_then_fields() {
    let formatted = format_payload_human(&canonical_user());

    assert_eq!(
        formatted,
        "Links:\n  self  https://api.github.com/users/octocat\n  html  https://github.com/octocat\n\
         Fields:\n  login                \"octocat\"\n  public_repositories  8\n"
    );
}

#[test]
fn test_human_sequence_numbers_items() {
    let formatted = format_payload_human(&Payload::from(json!([{"login": "a"}, {"login": "b"}])));

    assert!(formatted.starts_with("2 item(s)\n"));
    assert!(formatted.contains("[0]\n"));
    assert!(formatted.contains("[1]\n"));
    assert!(formatted.contains("\"b\""));
}

#[test]
fn test_human_scalar() {
    assert_eq!(format_payload_human(&Payload::from(json!(42))), "42\n");
}

#[test]
fn test_json_output() {
    let (mut out, captured) = writer(OutputFormat::Json);
    out.payload(&canonical_user()).unwrap();

    let written: Value = serde_json::from_str(captured.text().trim()).unwrap();
    assert_eq!(written["_links"]["self"]["href"], "https://api.github.com/users/octocat");
    assert!(captured.text().ends_with('\n'));
}

#[test]
fn test_yaml_output() {
    let (mut out, captured) = writer(OutputFormat::Yaml);
    out.payload(&Payload::from(json!({"login": "octocat"}))).unwrap();
    assert_eq!(captured.text(), "login: octocat\n");
}

#[test]
fn test_response_header_only_in_human_format() {
    let response = Response::new("users/octocat", canonical_user());

    let (mut human, captured) = writer(OutputFormat::Human);
    human.response(&response).unwrap();
    assert!(captured.text().starts_with("=== users/octocat ===\n"));

    let (mut json_out, captured) = writer(OutputFormat::JsonPretty);
    json_out.response(&response).unwrap();
    assert!(captured.text().starts_with('{'));
}

#[test]
fn test_messages_are_suppressed_for_machine_formats() {
    let (mut out, captured) = writer(OutputFormat::Json);
    out.info("hello").unwrap();
    out.warning("careful").unwrap();
    assert!(captured.text().is_empty());
}

#[test]
fn test_format_value_compact() {
    assert_eq!(format_value_compact(&json!([1, 2, 3, 4])), "[4 items]");
    assert_eq!(format_value_compact(&json!({"a": 1})), "{a: 1}");
    assert_eq!(format_value_compact(&json!({"a": 1, "b": 2, "c": 3})), "{3 fields}");
}
