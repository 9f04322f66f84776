//! Recursive descent parser for shape patterns.
//!
//! The parser keeps one token of lookahead beyond the current token; it is
//! used to recognise the empty `{}` and `[]` productions up front.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::ast::*;
use super::lexer::{Lexer, UNTERMINATED_STRING};
use super::token::{Token, TokenKind};

/// Default bound on `{`/`[` nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Errors that can occur while compiling a pattern.
///
/// Every variant carries the offending token, so the kind, literal, line and
/// column are always available for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The lexer produced an `ILLEGAL` token: an unknown bare word, a stray
    /// character, or an unterminated string.
    IllegalToken(Token),
    UnexpectedToken {
        expected: &'static str,
        found: Token,
    },
    UnexpectedEnd {
        expected: &'static str,
        found: Token,
    },
    InvalidNumber(Token),
    InvalidString(Token),
    DuplicateKey(Token),
    NestingTooDeep {
        limit: usize,
        found: Token,
    },
}

impl PatternError {
    /// The token at which compilation stopped.
    pub fn token(&self) -> &Token {
        match self {
            Self::IllegalToken(t)
            | Self::InvalidNumber(t)
            | Self::InvalidString(t)
            | Self::DuplicateKey(t) => t,
            Self::UnexpectedToken { found, .. }
            | Self::UnexpectedEnd { found, .. }
            | Self::NestingTooDeep { found, .. } => found,
        }
    }

    pub fn line(&self) -> usize {
        self.token().line
    }

    pub fn column(&self) -> usize {
        self.token().column
    }
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalToken(t) if t.literal == UNTERMINATED_STRING => {
                write!(f, "Unterminated string in pattern")?
            }
            Self::IllegalToken(t) => write!(f, "Illegal token {:?} in pattern", t.literal)?,
            Self::UnexpectedToken { expected, found } => {
                write!(f, "Expected {expected}, found {found}")?
            }
            Self::UnexpectedEnd { expected, .. } => {
                write!(f, "Unexpected end of pattern, expected {expected}")?
            }
            Self::InvalidNumber(t) => write!(f, "Invalid number {:?} in pattern", t.literal)?,
            Self::InvalidString(t) => {
                write!(f, "Invalid escape in string literal \"{}\"", t.literal)?
            }
            Self::DuplicateKey(t) => {
                write!(f, "Duplicate key \"{}\" in object pattern", t.literal)?
            }
            Self::NestingTooDeep { limit, .. } => {
                write!(f, "Pattern nested deeper than {limit} levels")?
            }
        }
        write!(f, " at line {}, column {}", self.line(), self.column())
    }
}

impl std::error::Error for PatternError {}

/// Compile a pattern string into a [`Matcher`].
pub fn parse(input: &str) -> Result<Matcher, PatternError> {
    let result = Parser::new(Lexer::new(input)).parse_pattern();
    match &result {
        Ok(matcher) => debug!(depth = matcher.depth(), "compiled pattern"),
        Err(err) => debug!(%err, "pattern rejected"),
    }
    result
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_max_depth(lexer, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser that rejects patterns nested deeper than `max_depth`.
    pub fn with_max_depth(mut lexer: Lexer<'a>, max_depth: usize) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            depth: 0,
            max_depth,
        }
    }

    /// Parse exactly one value, which must be followed by end of input.
    pub fn parse_pattern(&mut self) -> Result<Matcher, PatternError> {
        let matcher = self.parse_value()?;
        if !self.cur.is_eof() {
            return Err(self.unexpected("end of pattern"));
        }
        Ok(matcher)
    }

    /// Move to the next token, returning the one just left behind.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let peek = std::mem::replace(&mut self.peek, next);
        let prev = std::mem::replace(&mut self.cur, peek);
        trace!(
            kind = %self.cur.kind,
            line = self.cur.line,
            column = self.cur.column,
            "advance"
        );
        prev
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, PatternError> {
        if self.cur.kind != kind {
            return Err(self.unexpected(expected));
        }
        Ok(self.advance())
    }

    /// Build the error for a current token that doesn't fit the grammar.
    fn unexpected(&self, expected: &'static str) -> PatternError {
        let found = self.cur.clone();
        match found.kind {
            TokenKind::Illegal => PatternError::IllegalToken(found),
            TokenKind::Eof => PatternError::UnexpectedEnd { expected, found },
            _ => PatternError::UnexpectedToken { expected, found },
        }
    }

    fn parse_value(&mut self) -> Result<Matcher, PatternError> {
        let matcher = match self.cur.kind {
            TokenKind::LBrace => return self.parse_object(),
            TokenKind::LBracket => return self.parse_array(),

            TokenKind::String => Matcher::Const(Literal::String(unescape(&self.cur)?)),
            TokenKind::Number => Matcher::Const(Literal::Number(parse_number(&self.cur)?)),
            TokenKind::True => Matcher::Const(Literal::Bool(true)),
            TokenKind::False => Matcher::Const(Literal::Bool(false)),
            TokenKind::Null => Matcher::Const(Literal::Null),

            TokenKind::TypeAny => Matcher::Any,
            TokenKind::TypeString => Matcher::Kind(Kind::String),
            TokenKind::TypeBool => Matcher::Kind(Kind::Bool),
            TokenKind::TypeInt => Matcher::Kind(Kind::Int),
            TokenKind::TypeUint => Matcher::Kind(Kind::Uint),
            TokenKind::TypeFloat => Matcher::Kind(Kind::Float),
            TokenKind::TypeObject => Matcher::Kind(Kind::Object),
            TokenKind::TypeArray => Matcher::Kind(Kind::Array),

            TokenKind::TypeStrings => Matcher::ArrayOf(Kind::String),
            TokenKind::TypeBools => Matcher::ArrayOf(Kind::Bool),
            TokenKind::TypeInts => Matcher::ArrayOf(Kind::Int),
            TokenKind::TypeUints => Matcher::ArrayOf(Kind::Uint),
            TokenKind::TypeFloats => Matcher::ArrayOf(Kind::Float),
            TokenKind::TypeObjects => Matcher::ArrayOf(Kind::Object),

            TokenKind::Illegal
            | TokenKind::Eof
            | TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Colon
            | TokenKind::Comma => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(matcher)
    }

    /// Parse `{}` or `{ "key": value, ... }`.  The current token is `{`.
    fn parse_object(&mut self) -> Result<Matcher, PatternError> {
        self.enter()?;
        let mut members = BTreeMap::new();

        if self.peek.kind == TokenKind::RBrace {
            self.advance();
            self.advance();
            self.depth -= 1;
            return Ok(Matcher::Object(members));
        }
        self.advance(); // '{'

        loop {
            let key_token = self.expect(TokenKind::String, "a string key")?;
            let key = unescape(&key_token)?;
            if members.contains_key(&key) {
                return Err(PatternError::DuplicateKey(key_token));
            }
            self.expect(TokenKind::Colon, "':'")?;
            let value = self.parse_value()?;
            members.insert(key, value);

            match self.cur.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Matcher::Object(members))
    }

    /// Parse `[]` or `[ value, ... ]`.  The current token is `[`.
    fn parse_array(&mut self) -> Result<Matcher, PatternError> {
        self.enter()?;
        let mut items = Vec::new();

        if self.peek.kind == TokenKind::RBracket {
            self.advance();
            self.advance();
            self.depth -= 1;
            return Ok(Matcher::Array(items));
        }
        self.advance(); // '['

        loop {
            items.push(self.parse_value()?);

            match self.cur.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBracket => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Matcher::Array(items))
    }

    fn enter(&mut self) -> Result<(), PatternError> {
        if self.depth >= self.max_depth {
            return Err(PatternError::NestingTooDeep {
                limit: self.max_depth,
                found: self.cur.clone(),
            });
        }
        self.depth += 1;
        Ok(())
    }
}

/// Decode JSON escapes in a string token.  Raw control characters are kept
/// as written, with or without escapes elsewhere in the literal.
fn unescape(token: &Token) -> Result<String, PatternError> {
    if !token.literal.contains('\\') {
        return Ok(token.literal.clone());
    }
    let mut quoted = String::with_capacity(token.literal.len() + 2);
    quoted.push('"');
    for ch in token.literal.chars() {
        if ch.is_ascii_control() && ch != '\u{7f}' {
            quoted.push_str(&format!("\\u{:04x}", u32::from(ch)));
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('"');
    serde_json::from_str::<String>(&quoted).map_err(|_| PatternError::InvalidString(token.clone()))
}

fn parse_number(token: &Token) -> Result<f64, PatternError> {
    match token.literal.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(PatternError::InvalidNumber(token.clone())),
    }
}
