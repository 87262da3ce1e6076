use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

use super::character;
use super::delimiter;
use super::number;
use super::string;
use super::symbol;

fn is_delimiter_or_end(c: char) -> bool {
    c == '\0' || c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ';' | '\'' | '`' | ',' | '|')
}

/// Tokenizes a Racket-like source string, producing a sequence of tokens
/// terminated by a single `Eof`. Whitespace and comments are consumed and never
/// surfaced.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), done: false }
    }

    /// Runs the lexer to completion, collecting every token (including the
    /// trailing `Eof`).
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        Lexer::new(source).collect()
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current_char() == ';' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }
            break;
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, line: u32, column: u32, len: usize) -> Token {
        let source = &self.cursor.source()[start..start + len];
        Token::new(kind, source, start, line, column)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(Token::eof(start, line, column));
        }

        let rest = self.cursor.remaining();
        let c0 = self.cursor.current_char();

        if c0 == '#' {
            if let Some(tok) = self.try_hash_forms(rest, start, line, column)? {
                self.cursor.advance_bytes(tok.source.len());
                return Ok(tok);
            }
        } else if c0 == '"' {
            string::scan_string(&mut self.cursor)?;
            return Ok(self.make_token(TokenKind::String, start, line, column, self.cursor.position() - start));
        } else if c0 == '\'' {
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::Quote, start, line, column, 1));
        } else if c0 == '`' {
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::Quasiquote, start, line, column, 1));
        } else if c0 == ',' {
            if self.cursor.char_at(1) == '@' {
                self.cursor.advance_bytes(2);
                return Ok(self.make_token(TokenKind::UnquoteSplicing, start, line, column, 2));
            }
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::Unquote, start, line, column, 1));
        } else if let Some(kind) = delimiter::classify(c0) {
            self.cursor.advance();
            return Ok(self.make_token(kind, start, line, column, 1));
        } else if c0 == '|' {
            if let Some(len) = symbol::match_piped_symbol(rest) {
                self.cursor.advance_bytes(len);
                return Ok(self.make_token(TokenKind::Symbol, start, line, column, len));
            }
            return Err(LexError::UnrecognizedToken { offset: start });
        }

        if let Some(len) = symbol::match_bare_symbol(rest) {
            self.cursor.advance_bytes(len);
            return Ok(self.make_token(TokenKind::Symbol, start, line, column, len));
        }

        Err(LexError::UnrecognizedToken { offset: start })
    }

    /// Handles every token kind that can start with `#`: booleans, characters,
    /// numbers, and reader directives. Falls back to `None` (meaning: try a bare
    /// symbol instead) when none apply, matching the spec's priority order.
    fn try_hash_forms(&self, rest: &str, start: usize, line: u32, column: u32) -> Result<Option<Token>, LexError> {
        if rest.starts_with("#lang") || rest.starts_with("#reader") {
            let len = rest.find('\n').unwrap_or(rest.len());
            return Ok(Some(self.make_token(TokenKind::ReaderDirective, start, line, column, len)));
        }

        if let Some(len) = match_boolean(rest) {
            return Ok(Some(self.make_token(TokenKind::Boolean, start, line, column, len)));
        }

        if let Some(body) = rest.strip_prefix("#\\") {
            let body_len = character::match_char_body(body).unwrap_or(0);
            let len = 2 + body_len;
            return Ok(Some(self.make_token(TokenKind::Character, start, line, column, len)));
        }

        if let Some(len) = number::match_number(rest) {
            if is_delimiter_or_end(rest[len..].chars().next().unwrap_or('\0')) {
                return Ok(Some(self.make_token(TokenKind::Number, start, line, column, len)));
            }
        }

        Ok(None)
    }
}

fn match_boolean(rest: &str) -> Option<usize> {
    for (kw, len) in [("#true", 5), ("#false", 6)] {
        if rest.starts_with(kw) && is_delimiter_or_end(rest[len..].chars().next().unwrap_or('\0')) {
            return Some(len);
        }
    }
    let bytes = rest.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'#' && matches!(bytes[1], b't' | b'T' | b'f' | b'F') {
        if is_delimiter_or_end(rest[2..].chars().next().unwrap_or('\0')) {
            return Some(2);
        }
    }
    None
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(tok) => {
                if tok.is_eof() {
                    self.done = true;
                }
                Some(Ok(tok))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_application() {
        let toks = Lexer::tokenize("(+ 1 2)").unwrap();
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::LParen,
                TokenKind::Symbol,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn offsets_round_trip() {
        let src = "(define x 42)";
        for tok in Lexer::tokenize(src).unwrap() {
            if tok.is_eof() {
                continue;
            }
            assert_eq!(&src[tok.offset..tok.offset + tok.source.len()], tok.source);
        }
    }

    #[test]
    fn number_then_symbol_backoff() {
        assert_eq!(kinds("1a"), vec![TokenKind::Symbol, TokenKind::Eof]);
        assert_eq!(kinds("1.."), vec![TokenKind::Symbol, TokenKind::Eof]);
    }

    #[test]
    fn char_then_number_split() {
        // #\49 lexes as char `#\4` then number `9`.
        assert_eq!(kinds("#\\49"), vec![TokenKind::Character, TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn number_then_string() {
        assert_eq!(kinds(r#"1"a""#), vec![TokenKind::Number, TokenKind::String, TokenKind::Eof]);
    }

    #[test]
    fn booleans() {
        assert_eq!(kinds("#t #f #true #false"), vec![
            TokenKind::Boolean,
            TokenKind::Boolean,
            TokenKind::Boolean,
            TokenKind::Boolean,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        let toks = Lexer::tokenize("; a comment\n  42 ; trailing\n").unwrap();
        assert_eq!(toks.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn reader_directive() {
        let toks = Lexer::tokenize("#lang racket\n(+ 1 2)").unwrap();
        assert_eq!(toks[0].kind, TokenKind::ReaderDirective);
        assert_eq!(toks[0].source, "#lang racket");
    }

    #[test]
    fn quote_family() {
        assert_eq!(kinds("'a `a ,a ,@a"), vec![
            TokenKind::Quote,
            TokenKind::Symbol,
            TokenKind::Quasiquote,
            TokenKind::Symbol,
            TokenKind::Unquote,
            TokenKind::Symbol,
            TokenKind::UnquoteSplicing,
            TokenKind::Symbol,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn unrecognized_token_errors() {
        assert!(Lexer::tokenize("\"unterminated").is_err());
    }

    // ------------------------------------------------------------------------
    // PROPERTY-BASED TESTS - Using proptest for arbitrary inputs
    // ------------------------------------------------------------------------

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_bare_symbols_lex_to_one_symbol_token(input in "[a-zA-Z+*/<>=!?-][a-zA-Z0-9+*/<>=!?-]{0,30}") {
            let toks = kinds(&input);
            prop_assert_eq!(toks, vec![TokenKind::Symbol, TokenKind::Eof]);
        }

        #[test]
        fn arbitrary_decimal_integers_lex_to_one_number_token(input in "[0-9]{1,15}") {
            let toks = kinds(&input);
            prop_assert_eq!(toks, vec![TokenKind::Number, TokenKind::Eof]);
        }

        #[test]
        fn arbitrary_string_literals_lex_to_one_string_token(input in "[a-zA-Z0-9 ]{0,40}") {
            let source = format!("\"{input}\"");
            let toks = kinds(&source);
            prop_assert_eq!(toks, vec![TokenKind::String, TokenKind::Eof]);
        }

        #[test]
        fn whitespace_padding_never_changes_token_kinds(pad in " {0,5}") {
            let with_pad = format!("{pad}(+ 1 2){pad}");
            prop_assert_eq!(kinds(&with_pad), kinds("(+ 1 2)"));
        }
    }
}
