/// Syntax errors

use sprout_lexer::{LexError, Position, SyntaxKind};
use thiserror::Error;

/// Fatal parser failure; there is no recovery past the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("`{expected}` expected instead of `{found}` at {position}")]
    UnexpectedToken {
        expected: SyntaxKind,
        found: SyntaxKind,
        position: Position,
    },

    #[error("unterminated block opened at {position}")]
    UnterminatedBlock { position: Position },

    #[error("`{found}` at {position} cannot start a statement")]
    UnexpectedStatement { found: SyntaxKind, position: Position },

    #[error("expression expected instead of `{found}` at {position}")]
    ExpectedExpression { found: SyntaxKind, position: Position },

    #[error("nesting deeper than {limit} levels at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnterminatedBlock { position }
            | ParseError::UnexpectedStatement { position, .. }
            | ParseError::ExpectedExpression { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}
