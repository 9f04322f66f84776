use proptest::prelude::*;
use serde_json::{Value, json};

use super::*;

fn compile_and_match(pattern: &str, value: &Value) -> bool {
    parse(pattern).unwrap().matches(value)
}

#[test]
fn test_identity_for_literal_documents() {
    for text in [
        r#"{"name":"aragorn","age":82}"#,
        r#"{"a":1,"b":[true,false,null]}"#,
        r#"[[], {}, "", 0, 0.5]"#,
        r#"{"nested":{"deeper":{"list":["x","y"]}}}"#,
        r#""quote \" and backslash \\""#,
    ] {
        let value: Value = serde_json::from_str(text).unwrap();
        assert!(compile_and_match(text, &value), "{text} should match itself");
    }
}

#[test]
fn test_type_words_do_not_match_as_literals() {
    // `"string"` is a literal; `string` is a type word.
    assert!(compile_and_match(r#""string""#, &json!("string")));
    assert!(!compile_and_match(r#""string""#, &json!("other")));
    assert!(compile_and_match("string", &json!("other")));
}

#[test]
fn test_compilation_is_idempotent() {
    let text = r#"{"id": uint, "tags": strings, "owner": {"name": str, "admin": bool}}"#;
    let first = parse(text).unwrap();
    let second = parse(text).unwrap();
    assert_eq!(first, second);

    for value in [
        json!({"id": 1, "tags": [], "owner": {"name": "a", "admin": false}}),
        json!({"id": -1, "tags": [], "owner": {"name": "a", "admin": false}}),
        json!({"id": 1, "tags": [1], "owner": {"name": "a", "admin": false}}),
        json!({"id": 1, "tags": []}),
    ] {
        assert_eq!(first.evaluate(&value), second.evaluate(&value));
    }
}

#[test]
fn test_compiled_pattern_is_shareable_across_threads() {
    let matcher = std::sync::Arc::new(parse("{\"n\": int}").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let matcher = std::sync::Arc::clone(&matcher);
            std::thread::spawn(move || matcher.matches(&json!({"n": i})))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_realistic_api_response() {
    let matcher = parse(
        r#"{
            "status": "ok",
            "count": uint,
            "items": objects,
            "meta": {"page": int, "next": any, "ratio": float}
        }"#,
    )
    .unwrap();

    let good = json!({
        "status": "ok",
        "count": 2,
        "items": [{"id": 1}, {"id": 2}],
        "meta": {"page": 1, "next": null, "ratio": 0.25}
    });
    assert!(matcher.evaluate(&good).is_ok());

    let bad = json!({
        "status": "ok",
        "count": 2,
        "items": [{"id": 1}, {"id": 2}],
        "meta": {"page": 1.5, "next": null, "ratio": 0.25}
    });
    let err = matcher.evaluate(&bad).unwrap_err();
    assert_eq!(err.to_string(), "$.meta.page: expected integer, found number 1.5");
}

// ─── Property tests ─────────────────────────────────────────────────────────

/// JSON values the pattern language can spell as literals.
fn literal_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<u32>().prop_map(|n| json!(n)),
        (0u32..10_000).prop_map(|n| json!(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 _\"\\\\]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z\"]{0,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn literal_document_matches_itself(value in literal_value()) {
        let text = serde_json::to_string(&value).unwrap();
        let matcher = parse(&text).unwrap();
        prop_assert!(matcher.evaluate(&value).is_ok(), "{} should match itself", text);
    }

    #[test]
    fn pretty_printed_document_matches_itself(value in literal_value()) {
        let text = serde_json::to_string_pretty(&value).unwrap();
        prop_assert!(parse(&text).unwrap().matches(&value));
    }

    #[test]
    fn compiling_twice_gives_equal_matchers(value in literal_value()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), parse(&text).unwrap());
    }

    #[test]
    fn any_matches_everything(value in literal_value()) {
        prop_assert!(Matcher::Any.matches(&value));
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,40}") {
        let _ = parse(&text);
    }
}
