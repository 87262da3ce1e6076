//! Lexer for a Racket-like reader grammar.
//!
//! Implements the Racket reader's token grammar: booleans, characters, the full
//! numeric tower's surface syntax, strings, reader directives (`#lang`, `#reader`),
//! symbols (bare, `|piped|`, and `\`-escaped), and the paren/quote-family delimiters.
//! Whitespace and line comments are consumed internally and never surfaced as tokens.
//!
//! The entry point is [`Lexer`], which implements `Iterator<Item = Result<Token,
//! LexError>>`, or [`Lexer::tokenize`] to collect the whole stream at once.

pub mod cursor;
mod error;
mod lexer;
mod token;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
