//! Shape pattern compiler and matcher.
//!
//! A pattern is JSON-like text in which bare type words may stand in for
//! values.  [`parse`] compiles it into a [`Matcher`], which is then evaluated
//! against decoded `serde_json::Value`s.
//!
//! # Pattern syntax
//!
//! | Pattern                    | Matches                                         |
//! |----------------------------|-------------------------------------------------|
//! | `"text"`, `12`, `3.5`      | exactly that string or number                   |
//! | `true`, `false`            | that boolean                                    |
//! | `null`, `nil`, `none`      | null                                            |
//! | `{"k": P, ...}`            | an object with exactly these keys               |
//! | `[P, ...]`                 | an array of exactly this length, positionally   |
//! | `any`                      | anything                                        |
//! | `string`, `str`            | any string                                      |
//! | `bool`, `boolean`          | any boolean                                     |
//! | `int`, `integer`           | any integer-typed number                        |
//! | `uint`                     | any integer-typed number >= 0                   |
//! | `float`, `number`          | any number                                      |
//! | `object`                   | any object                                      |
//! | `array`                    | any array                                       |
//! | `strings`                  | an array of strings                             |
//! | `bools`, `booleans`        | an array of booleans                            |
//! | `ints`, `integers`         | an array of integers                            |
//! | `uints`                    | an array of non-negative integers               |
//! | `floats`, `numbers`        | an array of numbers                             |
//! | `objects`                  | an array of objects                             |
//!
//! Numerals are unsigned: the lexer has no `-`, so negative literals cannot
//! be written.

pub mod ast;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

pub use ast::{Kind, Literal, Matcher};
pub use lexer::Lexer;
pub use matcher::{MatchResult, Mismatch, MismatchReason, Path, PathSegment, evaluate};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, PatternError, parse};
pub use token::{Token, TokenKind};
