//! Token definitions for the Racket-like reader grammar.

/// The kind of lexical token produced by the lexer.
///
/// `Whitespace` and `Comment` are produced internally but are always filtered out of
/// the token stream the parser sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Boolean,
    Character,
    Number,
    String,
    Symbol,
    ReaderDirective,
    LParen,
    RParen,
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    Comment,
    Whitespace,
    Eof,
}

/// A lexical token: its kind, exact source text, and position.
///
/// `source` is the exact lexeme that produced the token; it is empty only for `Eof`.
/// `offset` is a 0-indexed byte offset into the original source; `line`/`column` are
/// 1-indexed. The invariant `source[offset..offset + source.len()] == token.source`
/// holds for every non-`Eof` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub source: String,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, source: impl Into<String>, offset: usize, line: u32, column: u32) -> Self {
        Self { kind, source: source.into(), offset, line, column }
    }

    /// Builds a token with no real source position, for synthesized AST nodes (e.g.
    /// a mutation's replacement name, or the desugared `else` branch of an `if`).
    pub fn synthesized(kind: TokenKind, source: impl Into<String>) -> Self {
        Self { kind, source: source.into(), offset: 0, line: 0, column: 0 }
    }

    pub fn eof(offset: usize, line: u32, column: u32) -> Self {
        Self { kind: TokenKind::Eof, source: String::new(), offset, line, column }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
