//! AST types for shape patterns.

use std::collections::BTreeMap;

/// One compiled node of a pattern.
///
/// A pattern like `{"name": string, "tags": strings}` becomes an `Object`
/// whose members are `Kind(String)` and `ArrayOf(String)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Exact value: string, number, boolean or null.
    Const(Literal),
    /// Exact key set; every member must match.  An empty map matches only `{}`.
    Object(BTreeMap<String, Matcher>),
    /// Exact length, positional.  An empty vec matches only `[]`.
    Array(Vec<Matcher>),
    /// `any`
    Any,
    /// `string`, `int`, `object`, ...
    Kind(Kind),
    /// `strings`, `ints`, `objects`, ... : an array whose every element is of
    /// the given kind.
    ArrayOf(Kind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// Runtime kinds that a bare type word can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    /// Integer-typed number.
    Int,
    /// Integer-typed number >= 0.
    Uint,
    /// Any number.
    Float,
    Object,
    Array,
}

impl Kind {
    /// The pattern word for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl Matcher {
    /// Depth of the deepest object/array nesting in this pattern.
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(members) => 1 + members.values().map(Matcher::depth).max().unwrap_or(0),
            Self::Array(items) => 1 + items.iter().map(Matcher::depth).max().unwrap_or(0),
            Self::Const(_) | Self::Any | Self::Kind(_) | Self::ArrayOf(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        assert_eq!(Matcher::Any.depth(), 0);
        assert_eq!(Matcher::Array(vec![]).depth(), 1);
        let nested = Matcher::Object(BTreeMap::from([(
            "a".to_string(),
            Matcher::Array(vec![Matcher::Kind(Kind::Int), Matcher::Array(vec![])]),
        )]));
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::String("a\"b".into()).to_string(), r#""a\"b""#);
        assert_eq!(Literal::Number(82.0).to_string(), "82");
        assert_eq!(Literal::Number(5.7).to_string(), "5.7");
        assert_eq!(Literal::Null.to_string(), "null");
    }
}
