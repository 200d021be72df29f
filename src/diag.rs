use std::fmt;

use thiserror::Error;

/// Line number (starting at one).
pub type Position = u32;

/// A [`ParseError`] tied to the place in the source that triggered it.
#[derive(Debug, PartialEq)]
pub struct FullParseError {
    pub line: Position,
    /// Lexeme of the offending token, or `None` at end of input.
    pub lexeme: Option<String>,
    pub error: ParseError,
}

impl fmt::Display for FullParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "[Line {}] Error at '{}': {}", self.line, lexeme, self.error),
            None => write!(f, "[Line {}] Error at end: {}", self.line, self.error),
        }
    }
}

impl std::error::Error for FullParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("Unexpected character: {0}")]
    BadChar(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Cannot parse number literal: {0}")]
    BadNumberLiteral(String),
    /// The parser expected a specific token or construct; the message names it.
    #[error("{0}")]
    Expected(&'static str),
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    #[error("Cannot have more than 8 parameters.")]
    TooManyParameters,
    #[error("Cannot have more than 8 arguments.")]
    TooManyArguments,
}
