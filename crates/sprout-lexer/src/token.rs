/// Tokens produced by the sprout lexer

use crate::kind::SyntaxKind;
use std::fmt;

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// 1-based line and column (counted in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Typed payload of a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Punctuation, trivia and end of input
    None,
    /// Parsed value of a numeric literal
    Number(f64),
    /// String content without delimiters, or the raw text of a name
    Text(String),
}

/// A leaf of the syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub value: TokenValue,
    pub span: Span,
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<String>,
        value: TokenValue,
        span: Span,
        position: Position,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
            span,
            position,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::EndOfFile
    }

    pub fn number(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} = {:?}", self.kind, self.position, self.text)
    }
}
