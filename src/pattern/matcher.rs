//! Pattern matcher: judge a decoded JSON value against a compiled [`Matcher`].
//!
//! Evaluation stops at the first failure.  Object members are checked for
//! missing keys first, then unexpected keys, then each member in key order;
//! array elements are checked in index order.  The returned [`Mismatch`]
//! carries the path to the failing location.

use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

use super::ast::*;

/// Outcome of matching one value against a pattern.
pub type MatchResult = Result<(), Mismatch>;

/// One step from a value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a mismatch, relative to the root value.
///
/// Rendered as `$` for the root, `$.name` or `$["odd key"]` for object
/// members and `$[3]` for array elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Why a value failed to match.
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchReason {
    /// The value has the wrong runtime kind.
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    /// The value is not equal to the pattern literal.
    NotEqual { expected: Literal, found: String },
    /// Keys in the pattern that are absent from the object, sorted.
    MissingKeys(Vec<String>),
    /// Keys in the object that the pattern doesn't declare, sorted.
    UnexpectedKeys(Vec<String>),
    LengthMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::NotEqual { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::MissingKeys(keys) => write!(f, "missing {}", key_list(keys)),
            Self::UnexpectedKeys(keys) => write!(f, "unexpected {}", key_list(keys)),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "expected array of {}, found {}",
                plural(*expected, "element"),
                plural(*found, "element")
            ),
        }
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn key_list(keys: &[String]) -> String {
    let word = if keys.len() == 1 { "key" } else { "keys" };
    format!("{word}: {}", keys.iter().map(|k| format!("{k:?}")).join(", "))
}

/// A failed match: where, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub path: Path,
    pub reason: MismatchReason,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl std::error::Error for Mismatch {}

impl Matcher {
    /// Check `value` against this pattern.
    pub fn evaluate(&self, value: &Value) -> MatchResult {
        evaluate(self, value)
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.evaluate(value).is_ok()
    }
}

/// Check `value` against `matcher`, reporting the first mismatch.
pub fn evaluate(matcher: &Matcher, value: &Value) -> MatchResult {
    let mut path = Vec::new();
    match_node(matcher, value, &mut path).map_err(|reason| {
        let mismatch = Mismatch {
            path: Path(path),
            reason,
        };
        debug!(%mismatch, "value did not match pattern");
        mismatch
    })
}

// ─── Core matching functions ─────────────────────────────────────────────────

/// Match one node.  On failure `path` is left pointing at the failing value.
fn match_node(
    matcher: &Matcher,
    value: &Value,
    path: &mut Vec<PathSegment>,
) -> Result<(), MismatchReason> {
    match matcher {
        Matcher::Const(literal) => match_literal(literal, value),
        Matcher::Object(members) => {
            let Value::Object(map) = value else {
                return Err(type_mismatch("object", value));
            };

            let missing = members
                .keys()
                .filter(|k| !map.contains_key(k.as_str()))
                .cloned()
                .collect_vec();
            if !missing.is_empty() {
                return Err(MismatchReason::MissingKeys(missing));
            }

            let unexpected = map
                .keys()
                .filter(|k| !members.contains_key(k.as_str()))
                .cloned()
                .sorted()
                .collect_vec();
            if !unexpected.is_empty() {
                return Err(MismatchReason::UnexpectedKeys(unexpected));
            }

            let pairs = members
                .iter()
                .filter_map(|(key, sub)| Some((key, sub, map.get(key)?)));
            for (key, sub, child) in pairs {
                path.push(PathSegment::Key(key.clone()));
                match_node(sub, child, path)?;
                path.pop();
            }
            Ok(())
        }
        Matcher::Array(items) => {
            let Value::Array(values) = value else {
                return Err(type_mismatch("array", value));
            };
            if values.len() != items.len() {
                return Err(MismatchReason::LengthMismatch {
                    expected: items.len(),
                    found: values.len(),
                });
            }
            for (i, (sub, child)) in items.iter().zip(values).enumerate() {
                path.push(PathSegment::Index(i));
                match_node(sub, child, path)?;
                path.pop();
            }
            Ok(())
        }
        Matcher::Any => Ok(()),
        Matcher::Kind(kind) => match_kind(*kind, value),
        Matcher::ArrayOf(kind) => {
            let Value::Array(values) = value else {
                return Err(type_mismatch("array", value));
            };
            for (i, child) in values.iter().enumerate() {
                path.push(PathSegment::Index(i));
                match_kind(*kind, child)?;
                path.pop();
            }
            Ok(())
        }
    }
}

fn match_literal(literal: &Literal, value: &Value) -> Result<(), MismatchReason> {
    let equal = match (literal, value) {
        (Literal::String(expected), Value::String(found)) => expected == found,
        (Literal::Number(expected), Value::Number(found)) => found.as_f64() == Some(*expected),
        (Literal::Bool(expected), Value::Bool(found)) => expected == found,
        (Literal::Null, Value::Null) => true,
        _ => false,
    };
    if equal {
        Ok(())
    } else {
        Err(MismatchReason::NotEqual {
            expected: literal.clone(),
            found: describe(value),
        })
    }
}

/// Integer kinds rely on the decoder's integer/float distinction: `1` is an
/// integer, `1.0` is not.  `Float` accepts every number.
fn match_kind(kind: Kind, value: &Value) -> Result<(), MismatchReason> {
    let (ok, expected) = match kind {
        Kind::String => (value.is_string(), "string"),
        Kind::Bool => (value.is_boolean(), "bool"),
        Kind::Int => (value.is_i64() || value.is_u64(), "integer"),
        Kind::Uint => (value.is_u64(), "non-negative integer"),
        Kind::Float => (value.is_number(), "number"),
        Kind::Object => (value.is_object(), "object"),
        Kind::Array => (value.is_array(), "array"),
    };
    if ok {
        Ok(())
    } else {
        Err(type_mismatch(expected, value))
    }
}

fn type_mismatch(expected: &'static str, value: &Value) -> MismatchReason {
    MismatchReason::TypeMismatch {
        expected,
        found: describe(value),
    }
}

/// Short human-readable description of a value for mismatch messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", plural(items.len(), "element")),
        Value::Object(_) => "object".to_string(),
    }
}
