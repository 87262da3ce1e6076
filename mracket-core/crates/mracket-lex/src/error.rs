use thiserror::Error;

/// Errors raised while tokenizing source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized token at byte offset {offset}")]
    UnrecognizedToken { offset: usize },

    #[error("unexpected end of file inside string literal starting at byte offset {offset}")]
    UnexpectedEofInString { offset: usize },
}

pub type LexResult<T> = std::result::Result<T, LexError>;
