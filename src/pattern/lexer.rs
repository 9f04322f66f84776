//! Lexer for shape pattern text.
//!
//! The lexer works on bytes; every token other than `ILLEGAL` is made of
//! ASCII, so token boundaries always fall on character boundaries.

use super::token::{Token, TokenKind, lookup_keyword};

/// Literal carried by the `ILLEGAL` token for a string that never closes.
pub const UNTERMINATED_STRING: &str = "unterminated string";

/// Pull-based tokenizer over a pattern string.
///
/// Once the input is exhausted every call to [`Lexer::next_token`] returns an
/// EOF token.  The [`Iterator`] impl stops after the first EOF.
pub struct Lexer<'a> {
    input: &'a str,
    /// Index of `ch` in `input`.
    position: usize,
    /// Index of the next byte to read.
    read_position: usize,
    /// Current byte; 0 at end of input.
    ch: u8,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);

        if let Some(kind) = TokenKind::from_punct(self.ch) {
            let token = Token::new(kind, char::from(self.ch).to_string(), line, column);
            self.read_char();
            return token;
        }

        match self.ch {
            0 => Token::new(TokenKind::Eof, "", line, column),
            b'"' => self.read_string(line, column),
            c if c.is_ascii_alphabetic() => self.read_identifier(line, column),
            c if c.is_ascii_digit() => self.read_number(line, column),
            _ => self.read_illegal(line, column),
        }
    }

    fn read_char(&mut self) {
        // Never move more than one step past the end of input.
        if self.read_position > self.input.len() {
            return;
        }
        self.ch = self
            .input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0);
        self.position = self.read_position;
        self.read_position += 1;

        if self.ch == b'\n' {
            self.line += 1;
            self.column = 0;
        } else if !is_continuation_byte(self.ch) {
            self.column += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Read a `"`-delimited string.  A backslash escapes the following byte;
    /// escapes are left in the literal for the parser to decode.
    fn read_string(&mut self, line: usize, column: usize) -> Token {
        let start = self.position + 1;
        loop {
            self.read_char();
            match self.ch {
                b'\\' => {
                    self.read_char();
                    if self.ch == 0 {
                        break;
                    }
                }
                b'"' | 0 => break,
                _ => {}
            }
        }

        if self.ch == 0 {
            return Token::new(TokenKind::Illegal, UNTERMINATED_STRING, line, column);
        }

        let literal = &self.input[start..self.position];
        self.read_char(); // closing quote
        Token::new(TokenKind::String, literal, line, column)
    }

    fn read_identifier(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        while self.ch.is_ascii_alphabetic() {
            self.read_char();
        }
        let ident = &self.input[start..self.position];
        Token::new(lookup_keyword(ident), ident, line, column)
    }

    /// Read digits with at most one decimal point.  A second point ends the
    /// numeral; the parser rejects whatever follows.
    fn read_number(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        let mut decimal_seen = false;
        while self.ch.is_ascii_digit() || (self.ch == b'.' && !decimal_seen) {
            if self.ch == b'.' {
                decimal_seen = true;
            }
            self.read_char();
        }
        Token::new(
            TokenKind::Number,
            &self.input[start..self.position],
            line,
            column,
        )
    }

    fn read_illegal(&mut self, line: usize, column: usize) -> Token {
        let ch = self
            .input
            .get(self.position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::from(self.ch));
        for _ in 0..ch.len_utf8() {
            self.read_char();
        }
        Token::new(TokenKind::Illegal, ch.to_string(), line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}
