//! Lexer for the sprout teaching language.
//!
//! Turns source text into a lazy, restartable sequence of [`Token`]s. The
//! reserved words come from a [`KeywordTable`] passed in by the caller.

pub mod chars;
pub mod error;
pub mod keywords;
pub mod kind;
pub mod token;

pub use error::LexError;
pub use keywords::KeywordTable;
pub use kind::SyntaxKind;
pub use token::{Position, Span, Token, TokenValue};

use chars::{is_digit, is_identifier_part, is_identifier_start, is_line_break, is_whitespace};
use try_next::TryNextWithContext;

pub type Result<T> = std::result::Result<T, LexError>;

/// Scanner over a borrowed source string
#[derive(Debug, Clone)]
pub struct Lexer<'input> {
    source: &'input str,
    /// Byte offset of the next unread character
    cursor: usize,
    /// Byte offset one past the last valid character
    end: usize,
    line: usize,
    column: usize,
    keywords: KeywordTable,
    /// Set once the streaming interface has handed out `EndOfFile` or an error
    drained: bool,
}

impl<'input> Lexer<'input> {
    pub fn new(source: &'input str, keywords: KeywordTable) -> Self {
        Self {
            source,
            cursor: 0,
            end: source.len(),
            line: 1,
            column: 1,
            keywords,
            drained: false,
        }
    }

    pub fn source(&self) -> &'input str {
        self.source
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.end
    }

    /// Rewinds to the start of the source so the same text can be scanned again.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.line = 1;
        self.column = 1;
        self.drained = false;
    }

    /// Scans the next token, trivia included.
    ///
    /// Past the end of input this keeps returning `EndOfFile`.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let start = self.cursor;
            let position = self.position();
            let Some(c) = self.peek() else {
                return Ok(self.token(SyntaxKind::EndOfFile, start, position, TokenValue::None));
            };

            if is_line_break(c) {
                self.bump();
                if c == '\r' && self.peek() == Some('\n') {
                    self.bump();
                }
                return Ok(self.token(SyntaxKind::EndOfLine, start, position, TokenValue::None));
            }

            if is_whitespace(c) {
                self.eat_while(is_whitespace);
                return Ok(self.token(SyntaxKind::Whitespace, start, position, TokenValue::None));
            }

            if is_digit(c) {
                return self.number(start, position);
            }

            if is_identifier_part(c) {
                self.eat_while(is_identifier_part);
                return self.word(start, position);
            }

            if c == '"' || c == '\'' {
                return self.string(c, start, position);
            }

            if let Some(kind) = SyntaxKind::from_punctuation(c) {
                self.bump();
                return Ok(self.token(kind, start, position, TokenValue::None));
            }

            // Unknown characters are dropped without producing a token.
            self.bump();
            tracing::debug!(
                character = ?c,
                line = position.line,
                column = position.column,
                "skipping unrecognized character"
            );
        }
    }

    /// Scans everything up to and including `EndOfFile`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn number(&mut self, start: usize, position: Position) -> Result<Token> {
        self.eat_while(is_digit);
        if self.peek() == Some('.') && self.peek_second().is_some_and(is_digit) {
            self.bump();
            self.eat_while(is_digit);
        }

        // `1abc` is an identifier run with a bad first character
        if self.peek().is_some_and(is_identifier_part) {
            self.eat_while(is_identifier_part);
            return self.word(start, position);
        }

        let value = self.source[start..self.cursor]
            .parse::<f64>()
            .map(TokenValue::Number)
            .unwrap_or(TokenValue::None);
        Ok(self.token(SyntaxKind::NumberLiteral, start, position, value))
    }

    /// Classifies an identifier-like run that ends at the cursor.
    fn word(&self, start: usize, position: Position) -> Result<Token> {
        let text = &self.source[start..self.cursor];
        let value = TokenValue::Text(text.to_string());

        if let Some(kind) = self.keywords.lookup(text) {
            return Ok(self.token(kind, start, position, value));
        }

        if text.chars().next().is_some_and(is_identifier_start) {
            Ok(self.token(SyntaxKind::Identifier, start, position, value))
        } else {
            Err(LexError::InvalidIdentifierStart {
                text: text.to_string(),
                position,
            })
        }
    }

    fn string(&mut self, quote: char, start: usize, position: Position) -> Result<Token> {
        self.bump();
        let content_start = self.cursor;
        loop {
            match self.bump() {
                Some(c) if c == quote => break,
                Some(_) => {}
                None => return Err(LexError::UnterminatedString { position }),
            }
        }

        let content = &self.source[content_start..self.cursor - quote.len_utf8()];
        let value = TokenValue::Text(content.to_string());
        Ok(self.token(SyntaxKind::StringLiteral, start, position, value))
    }

    fn token(&self, kind: SyntaxKind, start: usize, position: Position, value: TokenValue) -> Token {
        Token::new(
            kind,
            &self.source[start..self.cursor],
            value,
            Span::new(start, self.cursor),
            position,
        )
    }

    fn peek(&self) -> Option<char> {
        if self.cursor >= self.end {
            return None;
        }
        self.source[self.cursor..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut rest = self.source.get(self.cursor..self.end)?.chars();
        rest.next();
        rest.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        if is_line_break(c) {
            // CR of a CRLF pair: the LF ends the line
            if !(c == '\r' && self.peek() == Some('\n')) {
                self.line += 1;
                self.column = 1;
            }
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }
}

/// Streaming interface: every token including one final `EndOfFile`, then `None`.
impl<'input> TryNextWithContext<()> for Lexer<'input> {
    type Item = Token;
    type Error = LexError;

    fn try_next_with_context(&mut self, _context: &mut ()) -> std::result::Result<Option<Self::Item>, Self::Error> {
        if self.drained {
            return Ok(None);
        }
        match self.next_token() {
            Ok(token) => {
                if token.is_eof() {
                    self.drained = true;
                }
                Ok(Some(token))
            }
            Err(e) => {
                self.drained = true;
                Err(e)
            }
        }
    }
}

/// Create a lexer over `input` using the canonical keyword table
pub fn lex_str(input: &str) -> Lexer<'_> {
    Lexer::new(input, KeywordTable::canonical())
}
