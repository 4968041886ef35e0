//! JSON rendering of validation outcomes
//!
//! An accepted record renders as the normalized user. Anything else renders
//! as `{"error": [...]}`; undecodable input becomes a single `json_invalid`
//! entry so callers only ever see those two shapes.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::models::User;
use crate::validation::{ValidationFailure, Violations, validate};

/// Indentation used by [`process_registration`]
pub const DEFAULT_INDENT: usize = 4;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a Violations,
}

/// Render a validation result. `indent == 0` produces compact single-line JSON.
pub fn render(
    result: &Result<User, ValidationFailure>,
    indent: usize,
) -> Result<String, serde_json::Error> {
    match result {
        Ok(user) => to_json(user, indent),
        Err(failure) => render_violations(&failure.to_violations(), indent),
    }
}

pub fn render_violations(
    violations: &Violations,
    indent: usize,
) -> Result<String, serde_json::Error> {
    to_json(&ErrorEnvelope { error: violations }, indent)
}

/// Validate `raw` with default options and render the outcome with 4-space indentation
pub fn process_registration(raw: &str) -> Result<String, serde_json::Error> {
    render(&validate(raw), DEFAULT_INDENT)
}

fn to_json<T: Serialize>(value: &T, indent: usize) -> Result<String, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_string(value);
    }

    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const ALICE: &str = r#"{
        "name": "Alice",
        "age": 30,
        "email": "alice@example.com",
        "is_employed": true,
        "address": {"city": "Moscow", "street": "Tverskaya", "house_number": 10}
    }"#;

    #[test]
    fn test_accepted_record_renders_normalized_user() {
        let output = process_registration(ALICE).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Alice",
                "age": 30,
                "email": "alice@example.com",
                "is_employed": true,
                "address": {"city": "Moscow", "street": "Tverskaya", "house_number": 10}
            })
        );
        assert!(output.starts_with("{\n    \"name\": \"Alice\","));
    }

    #[test]
    fn test_rejected_record_renders_error_envelope() {
        let output = process_registration(r#"{"name": "J"}"#).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        let errors = value["error"].as_array().unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(errors[0]["type"], "string_too_short");
        assert_eq!(errors[0]["loc"], json!(["name"]));
        assert_eq!(errors[0]["input"], "J");
    }

    #[test]
    fn test_malformed_input_renders_json_invalid() {
        let output = process_registration(r#"{"name": "Alice", "age": "#).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        let errors = value["error"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["type"], "json_invalid");
        assert_eq!(errors[0]["loc"], json!([]));
        assert!(errors[0]["msg"].as_str().unwrap().starts_with("Invalid JSON: "));
        assert!(errors[0].get("input").is_none());
    }

    #[test]
    fn test_compact_rendering() {
        let output = render(&validate(ALICE), 0).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.starts_with(r#"{"name":"Alice","age":30,"#));
    }

    #[test]
    fn test_non_ascii_is_written_verbatim() {
        let output = process_registration(r#"{"name": "Иван"}"#).unwrap();
        assert!(output.contains("\"Иван\""));
    }
}
