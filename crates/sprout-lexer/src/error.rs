/// Lexical errors

use crate::token::Position;
use thiserror::Error;

/// Fatal lexer failure; the scan stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid identifier '{text}' at {position}: identifiers must start with a letter")]
    InvalidIdentifierStart { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::InvalidIdentifierStart { position, .. } => *position,
        }
    }
}
