//! Compile JSON shape patterns and check decoded JSON values against them.
//!
//! A pattern is JSON-like text where bare type words (`string`, `int`,
//! `objects`, `any`, ...) stand for "any value of this kind".  Objects must
//! have exactly the declared keys and arrays exactly the declared length.
//!
//! # Example
//!
//! ```rust
//! use jshape::{PathSegment, parse};
//! use serde_json::json;
//!
//! let matcher = parse(r#"{"name": string, "age": uint, "friends": strings}"#).unwrap();
//!
//! assert!(matcher.matches(&json!({"name": "aragorn", "age": 82, "friends": []})));
//!
//! let err = matcher
//!     .evaluate(&json!({"name": "aragorn", "age": 82, "friends": ["gimli", 3]}))
//!     .unwrap_err();
//! assert_eq!(err.path.segments(), &[PathSegment::Key("friends".into()), PathSegment::Index(1)]);
//! assert_eq!(err.to_string(), "$.friends[1]: expected string, found number 3");
//! ```

pub mod pattern;
pub mod validate;

pub use pattern::{
    Kind, Lexer, Literal, MatchResult, Matcher, Mismatch, MismatchReason, Parser, Path,
    PathSegment, PatternError, Token, TokenKind, evaluate, parse,
};
pub use validate::{
    assert_json, assert_reader, assert_serialize, assert_value, compile, validate, validate_json,
    validate_reader, validate_serialize,
};
