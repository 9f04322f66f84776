//! Token types and the keyword table for shape patterns.

use phf::{Map, phf_map};

/// The closed set of token kinds produced by the [`Lexer`](super::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,

    String,
    Number,

    True,
    False,
    Null,

    TypeAny,
    TypeString,
    TypeBool,
    TypeInt,
    TypeUint,
    TypeFloat,
    TypeObject,
    TypeArray,

    TypeStrings,
    TypeBools,
    TypeInts,
    TypeUints,
    TypeFloats,
    TypeObjects,
}

impl TokenKind {
    /// Upper-case name used by the token dumper and in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
            Self::TypeAny => "TYPE_ANY",
            Self::TypeString => "TYPE_STRING",
            Self::TypeBool => "TYPE_BOOL",
            Self::TypeInt => "TYPE_INT",
            Self::TypeUint => "TYPE_UINT",
            Self::TypeFloat => "TYPE_FLOAT",
            Self::TypeObject => "TYPE_OBJECT",
            Self::TypeArray => "TYPE_ARRAY",
            Self::TypeStrings => "TYPE_STRINGS",
            Self::TypeBools => "TYPE_BOOLS",
            Self::TypeInts => "TYPE_INTS",
            Self::TypeUints => "TYPE_UINTS",
            Self::TypeFloats => "TYPE_FLOATS",
            Self::TypeObjects => "TYPE_OBJECTS",
        }
    }

    /// Map a single punctuation byte to its token kind.
    pub(super) fn from_punct(ch: u8) -> Option<Self> {
        match ch {
            b'{' => Some(Self::LBrace),
            b'}' => Some(Self::RBrace),
            b'[' => Some(Self::LBracket),
            b']' => Some(Self::RBracket),
            b':' => Some(Self::Colon),
            b',' => Some(Self::Comma),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A single lexical token with its position in the pattern text.
///
/// `line` and `column` are 1-based and point at the first character of the
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of pattern"),
            TokenKind::String => write!(f, "{} \"{}\"", self.kind, self.literal),
            _ => write!(f, "{} '{}'", self.kind, self.literal),
        }
    }
}

/// Bare words recognised in pattern text.  Keep grouped by token kind; every
/// spelling maps to exactly one kind.
static KEYWORDS: Map<&'static str, TokenKind> = phf_map! {
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "null" => TokenKind::Null,
    "nil" => TokenKind::Null,
    "none" => TokenKind::Null,

    "any" => TokenKind::TypeAny,
    "string" => TokenKind::TypeString,
    "str" => TokenKind::TypeString,
    "bool" => TokenKind::TypeBool,
    "boolean" => TokenKind::TypeBool,
    "int" => TokenKind::TypeInt,
    "integer" => TokenKind::TypeInt,
    "uint" => TokenKind::TypeUint,
    "float" => TokenKind::TypeFloat,
    "number" => TokenKind::TypeFloat,
    "object" => TokenKind::TypeObject,
    "array" => TokenKind::TypeArray,

    "strings" => TokenKind::TypeStrings,
    "bools" => TokenKind::TypeBools,
    "booleans" => TokenKind::TypeBools,
    "ints" => TokenKind::TypeInts,
    "integers" => TokenKind::TypeInts,
    "uints" => TokenKind::TypeUints,
    "floats" => TokenKind::TypeFloats,
    "numbers" => TokenKind::TypeFloats,
    "objects" => TokenKind::TypeObjects,
};

/// Classify an identifier.  Unknown words are [`TokenKind::Illegal`].
pub fn lookup_keyword(ident: &str) -> TokenKind {
    KEYWORDS.get(ident).copied().unwrap_or(TokenKind::Illegal)
}
