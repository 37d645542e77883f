/// Kind tags for tokens and syntax nodes
///
/// Token kinds occupy the range before `Program`; everything from `Program`
/// on tags a branching node.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia and end of input
    EndOfFile,
    Whitespace,
    EndOfLine,

    // Literals and names
    Identifier,
    NumberLiteral,
    StringLiteral,

    // Keywords
    ProgramKeyword,
    CallKeyword,
    LetKeyword,

    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Semicolon,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Equals,
    Bar,

    // Nodes
    Program,
    Block,
    VariableDeclaration,
    Invocation,
    ArgumentList,
    ParenthesizedExpression,
    UnaryExpression,
    BinaryExpression,
}

impl SyntaxKind {
    /// True for leaf kinds produced by the lexer.
    pub fn is_token(self) -> bool {
        (self as u16) < (SyntaxKind::Program as u16)
    }

    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Whitespace and line breaks; the parser never sees these.
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::EndOfLine)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::ProgramKeyword | SyntaxKind::CallKeyword | SyntaxKind::LetKeyword
        )
    }

    /// Maps a single punctuation character to its kind.
    pub fn from_punctuation(c: char) -> Option<SyntaxKind> {
        let kind = match c {
            '{' => SyntaxKind::OpenBrace,
            '}' => SyntaxKind::CloseBrace,
            '(' => SyntaxKind::OpenParen,
            ')' => SyntaxKind::CloseParen,
            ';' => SyntaxKind::Semicolon,
            '+' => SyntaxKind::Plus,
            '-' => SyntaxKind::Minus,
            '*' => SyntaxKind::Asterisk,
            '/' => SyntaxKind::Slash,
            '=' => SyntaxKind::Equals,
            '|' => SyntaxKind::Bar,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::EndOfFile => "EndOfFile",
            SyntaxKind::Whitespace => "Whitespace",
            SyntaxKind::EndOfLine => "EndOfLine",
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::NumberLiteral => "NumberLiteral",
            SyntaxKind::StringLiteral => "StringLiteral",
            SyntaxKind::ProgramKeyword => "ProgramKeyword",
            SyntaxKind::CallKeyword => "CallKeyword",
            SyntaxKind::LetKeyword => "LetKeyword",
            SyntaxKind::OpenBrace => "OpenBrace",
            SyntaxKind::CloseBrace => "CloseBrace",
            SyntaxKind::OpenParen => "OpenParen",
            SyntaxKind::CloseParen => "CloseParen",
            SyntaxKind::Semicolon => "Semicolon",
            SyntaxKind::Plus => "Plus",
            SyntaxKind::Minus => "Minus",
            SyntaxKind::Asterisk => "Asterisk",
            SyntaxKind::Slash => "Slash",
            SyntaxKind::Equals => "Equals",
            SyntaxKind::Bar => "Bar",
            SyntaxKind::Program => "Program",
            SyntaxKind::Block => "Block",
            SyntaxKind::VariableDeclaration => "VariableDeclaration",
            SyntaxKind::Invocation => "Invocation",
            SyntaxKind::ArgumentList => "ArgumentList",
            SyntaxKind::ParenthesizedExpression => "ParenthesizedExpression",
            SyntaxKind::UnaryExpression => "UnaryExpression",
            SyntaxKind::BinaryExpression => "BinaryExpression",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_node_boundary() {
        assert!(SyntaxKind::EndOfFile.is_token());
        assert!(SyntaxKind::Bar.is_token());
        assert!(SyntaxKind::Program.is_node());
        assert!(SyntaxKind::BinaryExpression.is_node());
        assert!(!SyntaxKind::Block.is_token());
    }

    #[test]
    fn test_punctuation_table() {
        assert_eq!(SyntaxKind::from_punctuation('|'), Some(SyntaxKind::Bar));
        assert_eq!(SyntaxKind::from_punctuation('{'), Some(SyntaxKind::OpenBrace));
        assert_eq!(SyntaxKind::from_punctuation('#'), None);
        for c in "{}();+-*/=|".chars() {
            let kind = SyntaxKind::from_punctuation(c).unwrap();
            assert!(kind.is_token(), "{} maps to node kind {}", c, kind);
        }
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(SyntaxKind::Semicolon.to_string(), "Semicolon");
        assert_eq!(SyntaxKind::VariableDeclaration.to_string(), "VariableDeclaration");
    }
}
