use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unterminated string literal at position {position}")]
    UnterminatedString { position: usize },
    #[error("Number literal '{literal}' at position {position} does not fit a 64-bit integer")]
    NumberOutOfRange { literal: String, position: usize },
}

pub type LexResult<T> = Result<T, LexError>;
