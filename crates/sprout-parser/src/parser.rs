/// Recursive-descent parser
///
/// One token of lookahead, no backtracking. Trivia is dropped as the cursor
/// advances, so every rule below only sees significant tokens.
///
/// ```text
/// program    = "program" identifier block ;
/// block      = "{" { block | statement } "}" ;
/// statement  = varDecl | invocation ;
/// varDecl    = "let" identifier [ "=" expression ] ";" ;
/// invocation = "call" identifier arguments [ ";" ] ;
/// arguments  = expression { "|" expression } ;
/// expression = term { ("+"|"-") term } ;
/// term       = factor { ("*"|"/") factor } ;
/// factor     = number | string | identifier | "(" expression ")"
///            | ("+"|"-") factor | invocation ;
/// ```

use crate::error::ParseError;
use crate::tree::{Element, NodeId, SyntaxTree, TreeBuilder};
use sprout_lexer::{Lexer, Position, Span, SyntaxKind, Token, TokenValue};

pub type Result<T> = std::result::Result<T, ParseError>;

/// Deepest allowed stack of open blocks and operand levels (parentheses,
/// unary operators, nested calls).
pub const MAX_NESTING: usize = 256;

pub struct Parser<'input> {
    lexer: Lexer<'input>,
    /// The lookahead token
    current: Token,
    builder: TreeBuilder,
    depth: usize,
}

impl<'input> Parser<'input> {
    pub fn new(lexer: Lexer<'input>) -> Self {
        Self {
            lexer,
            current: Token::new(
                SyntaxKind::EndOfFile,
                "",
                TokenValue::None,
                Span::default(),
                Position::default(),
            ),
            builder: TreeBuilder::new(),
            depth: 0,
        }
    }

    /// Parses a whole program from the start of the lexer's source.
    pub fn parse(mut self) -> Result<SyntaxTree> {
        self.lexer.reset();
        self.depth = 0;
        self.advance()?;
        let root = self.parse_program()?;
        if !self.at(SyntaxKind::EndOfFile) {
            return Err(self.unexpected(SyntaxKind::EndOfFile));
        }
        Ok(self.builder.finish(root))
    }

    fn parse_program(&mut self) -> Result<NodeId> {
        let keyword = self.expect(SyntaxKind::ProgramKeyword)?;
        let name = self.expect(SyntaxKind::Identifier)?;
        let block = self.parse_block()?;
        Ok(self.builder.node(SyntaxKind::Program, vec![
            Element::Token(keyword),
            Element::Token(name),
            Element::Node(block),
        ]))
    }

    fn parse_block(&mut self) -> Result<NodeId> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> Result<NodeId> {
        let open = self.expect(SyntaxKind::OpenBrace)?;
        let opened_at = open.position;
        let mut children = vec![Element::Token(open)];

        loop {
            match self.current.kind {
                SyntaxKind::CloseBrace => break,
                SyntaxKind::EndOfFile => {
                    return Err(ParseError::UnterminatedBlock { position: opened_at });
                }
                SyntaxKind::OpenBrace => children.push(Element::Node(self.parse_block()?)),
                _ => children.push(Element::Node(self.parse_statement()?)),
            }
        }

        children.push(Element::Token(self.advance()?));
        Ok(self.builder.node(SyntaxKind::Block, children))
    }

    fn parse_statement(&mut self) -> Result<NodeId> {
        match self.current.kind {
            SyntaxKind::LetKeyword => self.parse_variable_declaration(),
            SyntaxKind::CallKeyword => self.parse_invocation(true),
            found => Err(ParseError::UnexpectedStatement {
                found,
                position: self.current.position,
            }),
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<NodeId> {
        let keyword = self.expect(SyntaxKind::LetKeyword)?;
        let name = self.expect(SyntaxKind::Identifier)?;
        let mut children = vec![Element::Token(keyword), Element::Token(name)];

        if let Some(equals) = self.accept(SyntaxKind::Equals)? {
            children.push(Element::Token(equals));
            children.push(self.parse_expression()?);
        }

        children.push(Element::Token(self.expect(SyntaxKind::Semicolon)?));
        Ok(self.builder.node(SyntaxKind::VariableDeclaration, children))
    }

    /// `statement` decides who owns a following `;`: a statement takes it,
    /// an invocation nested in an expression leaves it for the enclosing rule.
    fn parse_invocation(&mut self, statement: bool) -> Result<NodeId> {
        let keyword = self.expect(SyntaxKind::CallKeyword)?;
        let name = self.expect(SyntaxKind::Identifier)?;
        let arguments = self.parse_arguments()?;
        let mut children = vec![
            Element::Token(keyword),
            Element::Token(name),
            Element::Node(arguments),
        ];

        if statement {
            if let Some(semicolon) = self.accept(SyntaxKind::Semicolon)? {
                children.push(Element::Token(semicolon));
            }
        }

        Ok(self.builder.node(SyntaxKind::Invocation, children))
    }

    fn parse_arguments(&mut self) -> Result<NodeId> {
        let mut children = vec![self.parse_expression()?];
        while let Some(bar) = self.accept(SyntaxKind::Bar)? {
            children.push(Element::Token(bar));
            children.push(self.parse_expression()?);
        }
        Ok(self.builder.node(SyntaxKind::ArgumentList, children))
    }

    fn parse_expression(&mut self) -> Result<Element> {
        let mut left = self.parse_term()?;
        while matches!(self.current.kind, SyntaxKind::Plus | SyntaxKind::Minus) {
            let operator = self.advance()?;
            let right = self.parse_term()?;
            left = self.binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Element> {
        let mut left = self.parse_factor()?;
        while matches!(self.current.kind, SyntaxKind::Asterisk | SyntaxKind::Slash) {
            let operator = self.advance()?;
            let right = self.parse_factor()?;
            left = self.binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Element> {
        self.nested(Self::parse_operand)
    }

    fn parse_operand(&mut self) -> Result<Element> {
        match self.current.kind {
            SyntaxKind::NumberLiteral | SyntaxKind::StringLiteral | SyntaxKind::Identifier => {
                Ok(Element::Token(self.advance()?))
            }
            SyntaxKind::OpenParen => {
                let open = self.advance()?;
                let inner = self.parse_expression()?;
                let close = self.expect(SyntaxKind::CloseParen)?;
                Ok(Element::Node(self.builder.node(SyntaxKind::ParenthesizedExpression, vec![
                    Element::Token(open),
                    inner,
                    Element::Token(close),
                ])))
            }
            SyntaxKind::Plus | SyntaxKind::Minus => {
                let operator = self.advance()?;
                let operand = self.parse_factor()?;
                Ok(Element::Node(self.builder.node(SyntaxKind::UnaryExpression, vec![
                    Element::Token(operator),
                    operand,
                ])))
            }
            SyntaxKind::CallKeyword => Ok(Element::Node(self.parse_invocation(false)?)),
            found => Err(ParseError::ExpectedExpression {
                found,
                position: self.current.position,
            }),
        }
    }

    fn binary(&mut self, left: Element, operator: Token, right: Element) -> Element {
        Element::Node(self.builder.node(SyntaxKind::BinaryExpression, vec![
            left,
            Element::Token(operator),
            right,
        ]))
    }

    /// Runs `rule` one level deeper, failing instead of recursing past
    /// [`MAX_NESTING`].
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                position: self.current.position,
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    /// Moves to the next significant token and returns the one it replaces.
    fn advance(&mut self) -> Result<Token> {
        let next = loop {
            let token = self.lexer.next_token()?;
            if !token.kind.is_trivia() {
                break token;
            }
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consumes a token of `kind` or fails.
    fn expect(&mut self, kind: SyntaxKind) -> Result<Token> {
        if self.at(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind))
        }
    }

    /// Consumes a token of `kind` if it is next; otherwise leaves the cursor alone.
    fn accept(&mut self, kind: SyntaxKind) -> Result<Option<Token>> {
        if self.at(kind) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    fn unexpected(&self, expected: SyntaxKind) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current.kind,
            position: self.current.position,
        }
    }
}
