//! Validation entry points and test assertions.
//!
//! These wrap the pattern compiler for callers holding raw JSON (text, bytes,
//! readers), decoded `serde_json::Value`s or any `Serialize` value.
//!
//! # Example
//!
//! ```rust
//! use jshape::{assert_json, validate_json};
//!
//! let body = r#"{"id": 7, "tags": ["a", "b"]}"#;
//! assert!(validate_json(body, r#"{"id": uint, "tags": strings}"#).is_ok());
//! assert!(validate_json(body, r#"{"id": string, "tags": strings}"#).is_err());
//!
//! assert_json(body, r#"{"id": int, "tags": array}"#);
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::pattern::{Matcher, parse};

/// Compile a pattern, attaching `cannot compile pattern` to any error.
pub fn compile(pattern: &str) -> Result<Matcher> {
    parse(pattern).context("cannot compile pattern")
}

/// Validate a decoded value against a pattern.
pub fn validate(given: &Value, pattern: &str) -> Result<()> {
    let matcher = compile(pattern)?;
    matcher.evaluate(given)?;
    Ok(())
}

/// Validate JSON text or bytes against a pattern.
pub fn validate_json(given: impl AsRef<[u8]>, pattern: &str) -> Result<()> {
    validate(&decode_json(given.as_ref())?, pattern)
}

/// Validate a JSON document read to the end of `reader`.
pub fn validate_reader(reader: impl Read, pattern: &str) -> Result<()> {
    validate(&decode_reader(reader)?, pattern)
}

/// Validate any serializable value against a pattern.
pub fn validate_serialize<T: Serialize + ?Sized>(given: &T, pattern: &str) -> Result<()> {
    validate(&to_value(given)?, pattern)
}

/// Panic unless `given` matches `pattern`.
///
/// The panic message includes the mismatch, the pretty-printed input and
/// the pattern.
#[track_caller]
pub fn assert_value(given: &Value, pattern: &str) {
    if let Err(err) = validate(given, pattern) {
        fail(given, pattern, &err);
    }
}

/// Panic unless the JSON text or bytes in `given` match `pattern`.
#[track_caller]
pub fn assert_json(given: impl AsRef<[u8]>, pattern: &str) {
    match decode_json(given.as_ref()) {
        Ok(value) => assert_value(&value, pattern),
        Err(err) => panic!("failed to read input: {err:#}"),
    }
}

/// Panic unless the JSON document in `reader` matches `pattern`.
#[track_caller]
pub fn assert_reader(reader: impl Read, pattern: &str) {
    match decode_reader(reader) {
        Ok(value) => assert_value(&value, pattern),
        Err(err) => panic!("failed to read input: {err:#}"),
    }
}

/// Panic unless the serialized form of `given` matches `pattern`.
#[track_caller]
pub fn assert_serialize<T: Serialize + ?Sized>(given: &T, pattern: &str) {
    match to_value(given) {
        Ok(value) => assert_value(&value, pattern),
        Err(err) => panic!("failed to read input: {err:#}"),
    }
}

fn decode_json(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).context("input is not valid JSON")
}

fn decode_reader(reader: impl Read) -> Result<Value> {
    serde_json::from_reader(reader).context("cannot decode JSON from reader")
}

fn to_value<T: Serialize + ?Sized>(given: &T) -> Result<Value> {
    serde_json::to_value(given).context("cannot convert input to JSON")
}

#[track_caller]
fn fail(given: &Value, pattern: &str, err: &anyhow::Error) -> ! {
    let input = serde_json::to_string_pretty(given)
        .unwrap_or_else(|e| format!("input cannot be serialized: {e}"));
    panic!("validation error: {err:#}\n\ninput:\n{input}\n\npattern:\n{pattern}");
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u32,
        friends: Vec<String>,
    }

    fn person() -> Person {
        Person {
            name: "aragorn".to_string(),
            age: 82,
            friends: vec!["gimli".to_string(), "legolas".to_string()],
        }
    }

    #[test]
    fn test_validate_value() {
        assert!(validate(&json!({"a": 1}), r#"{"a": int}"#).is_ok());
        assert!(validate(&json!({"a": 1}), r#"{"a": str}"#).is_err());
    }

    #[test]
    fn test_validate_json_text_and_bytes() {
        assert!(validate_json(r#"[1, 2]"#, "ints").is_ok());
        assert!(validate_json(b"[1, 2]".as_slice(), "ints").is_ok());
        assert!(validate_json(String::from("[1, \"x\"]"), "ints").is_err());
        assert!(validate_json(vec![b'[', b']'], "[]").is_ok());
    }

    #[test]
    fn test_validate_reader() {
        let body = std::io::Cursor::new(r#"{"ok": true}"#);
        assert!(validate_reader(body, r#"{"ok": bool}"#).is_ok());
    }

    #[test]
    fn test_validate_serialize() {
        let p = person();
        assert!(
            validate_serialize(&p, r#"{"name": str, "age": uint, "friends": strings}"#).is_ok()
        );
        assert!(validate_serialize(&p, r#"{"name": str, "age": uint}"#).is_err());
    }

    #[test]
    fn test_compile_error_message() {
        let err = validate(&json!({}), r#"{"key": "value",}"#).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "cannot compile pattern: Expected a string key, found RBRACE '}' at line 1, column 17"
        );
    }

    #[test]
    fn test_mismatch_error_message() {
        let err = validate_json(r#"{"a": [1, "x"]}"#, r#"{"a": ints}"#).unwrap_err();
        assert_eq!(format!("{err:#}"), "$.a[1]: expected integer, found string \"x\"");
        assert!(err.downcast_ref::<crate::pattern::Mismatch>().is_some());
    }

    #[test]
    fn test_invalid_json_input() {
        let err = validate_json("{not json", "any").unwrap_err();
        assert!(format!("{err:#}").starts_with("input is not valid JSON: "));
    }

    #[test]
    fn test_assert_json_passes() {
        assert_json(r#"{"name": "aragorn", "age": 82}"#, r#"{"name": "aragorn", "age": 82}"#);
        assert_value(&json!(null), "none");
        assert_reader(std::io::Cursor::new(b"[]"), "strings");
        assert_serialize(&person(), r#"{"name": str, "age": int, "friends": [str, str]}"#);
    }

    #[test]
    #[should_panic(expected = "validation error: $.age: expected string, found number 82")]
    fn test_assert_json_reports_mismatch() {
        assert_json(r#"{"age": 82}"#, r#"{"age": string}"#);
    }

    #[test]
    #[should_panic(expected = "input:\n{\n  \"age\": 82\n}\n\npattern:\n{\"age\": string}")]
    fn test_assert_json_prints_input_and_pattern() {
        assert_json(r#"{"age": 82}"#, r#"{"age": string}"#);
    }

    #[test]
    #[should_panic(expected = "validation error: cannot compile pattern: ")]
    fn test_assert_value_reports_bad_pattern() {
        assert_value(&json!(1), "[");
    }

    #[test]
    #[should_panic(expected = "failed to read input: input is not valid JSON")]
    fn test_assert_json_reports_bad_input() {
        assert_json("nope", "any");
    }
}
