/// Error types for the sprout compiler

use sprout_lexer::{LexError, SyntaxKind};
use sprout_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Failure while translating a tree into script text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("no emission rule for `{kind}`")]
    Unsupported { kind: SyntaxKind },

    #[error("malformed `{kind}` node: {reason}")]
    Malformed { kind: SyntaxKind, reason: String },

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl EmitError {
    pub fn malformed(kind: SyntaxKind, reason: impl Into<String>) -> Self {
        EmitError::Malformed {
            kind,
            reason: reason.into(),
        }
    }
}

/// Any failure of the pipeline, tagged with the stage that raised it
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Lexical error in {file}: {error}")]
    Lex {
        file: PathBuf,
        #[source]
        error: LexError,
    },

    #[error("Syntax error in {file}: {error}")]
    Parse {
        file: PathBuf,
        #[source]
        error: ParseError,
    },

    #[error("Emission error: {0}")]
    Emit(#[from] EmitError),
}

impl CompileError {
    pub fn lex(file: impl Into<PathBuf>, error: LexError) -> Self {
        CompileError::Lex {
            file: file.into(),
            error,
        }
    }

    /// Lexer failures surfacing through the parser keep their own stage tag.
    pub fn parse(file: impl Into<PathBuf>, error: ParseError) -> Self {
        match error {
            ParseError::Lex(error) => Self::lex(file, error),
            error => CompileError::Parse {
                file: file.into(),
                error,
            },
        }
    }
}
