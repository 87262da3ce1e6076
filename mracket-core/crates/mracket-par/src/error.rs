use mracket_lex::Token;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("program is missing a #lang or #reader directive")]
    ExpectedReaderDirective,

    #[error("unexpected end of file while parsing at byte offset {0}", .token.offset)]
    UnexpectedEofToken { token: Token },

    #[error("unexpected right parenthesis `{}` at byte offset {}", .token.source, .token.offset)]
    UnexpectedRightParenthesis { token: Token },

    #[error(
        "mismatched parentheses: `{}` at byte offset {} closed by `{}` at byte offset {}",
        .lparen.source, .lparen.offset, .rparen.source, .rparen.offset
    )]
    MismatchedParentheses { lparen: Token, rparen: Token },

    #[error("no grammar rule applies to token `{}` at byte offset {}", .token.source, .token.offset)]
    IllegalState { token: Token },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
