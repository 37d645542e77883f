/// Script emission
///
/// Walks a sprout syntax tree and writes JavaScript. Expressions are emitted
/// exactly as the tree groups them; nothing is re-parenthesized. Names that
/// JavaScript reserves get a `$` prefix, which no sprout name can carry.

use crate::error::EmitError;
use sprout_lexer::{SyntaxKind, Token};
use sprout_parser::{SyntaxElement, SyntaxNode, SyntaxTree};
use std::fmt::Write as _;

type Result<T> = std::result::Result<T, EmitError>;

/// Formatting knobs for emitted code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// One level of indentation
    pub indent: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

/// JavaScript emitter
pub struct Emitter {
    options: EmitOptions,
    /// Current block nesting
    depth: usize,
    output: String,
}

impl Emitter {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            depth: 0,
            output: String::new(),
        }
    }

    /// Emit script text for a whole tree
    pub fn emit(&mut self, tree: &SyntaxTree) -> Result<String> {
        self.depth = 0;
        self.output.clear();
        self.emit_node(tree.root())?;
        Ok(std::mem::take(&mut self.output))
    }

    fn emit_node(&mut self, node: SyntaxNode<'_>) -> Result<()> {
        check_arity(node)?;
        match node.kind() {
            SyntaxKind::Program => self.emit_program(node),
            SyntaxKind::Block => self.emit_block(node),
            SyntaxKind::VariableDeclaration => self.emit_variable_declaration(node),
            SyntaxKind::Invocation => {
                let call = self.invocation(node)?;
                self.output.push_str(&call);
                Ok(())
            }
            kind => Err(EmitError::Unsupported { kind }),
        }
    }

    /// `let Name = function() { ... };` followed by `Name();`
    fn emit_program(&mut self, program: SyntaxNode<'_>) -> Result<()> {
        let name = required_token(program, SyntaxKind::Identifier)?;
        let block = program
            .child_nodes()
            .find(|child| child.kind() == SyntaxKind::Block)
            .ok_or_else(|| EmitError::malformed(SyntaxKind::Program, "missing block"))?;

        let name = identifier(name);
        write!(self.output, "let {} = function() ", name)?;
        self.emit_node(block)?;
        self.output.push_str(";\n");
        writeln!(self.output, "{}();", name)?;
        Ok(())
    }

    fn emit_block(&mut self, block: SyntaxNode<'_>) -> Result<()> {
        let statements: Vec<_> = block.child_nodes().collect();
        if statements.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }

        self.output.push('{');
        self.depth += 1;
        for statement in statements {
            self.output.push('\n');
            self.write_indent();
            self.emit_node(statement)?;
        }
        self.depth -= 1;
        self.output.push('\n');
        self.write_indent();
        self.output.push('}');
        Ok(())
    }

    fn emit_variable_declaration(&mut self, declaration: SyntaxNode<'_>) -> Result<()> {
        let name = required_token(declaration, SyntaxKind::Identifier)?;
        write!(self.output, "let {}", identifier(name))?;

        if declaration.child_count() == 5 {
            if required_child(declaration, 2)?.kind() != SyntaxKind::Equals {
                return Err(EmitError::malformed(
                    SyntaxKind::VariableDeclaration,
                    "initializer without `=`",
                ));
            }
            let init = self.expression(required_child(declaration, 3)?)?;
            write!(self.output, " = {}", init)?;
        }

        self.output.push(';');
        Ok(())
    }

    /// `name(arg1, arg2)`, terminated only when the call is a block statement.
    fn invocation(&self, call: SyntaxNode<'_>) -> Result<String> {
        let name = required_token(call, SyntaxKind::Identifier)?;
        let arguments = call
            .child_nodes()
            .find(|child| child.kind() == SyntaxKind::ArgumentList)
            .ok_or_else(|| EmitError::malformed(SyntaxKind::Invocation, "missing argument list"))?;
        check_arity(arguments)?;

        let arguments = arguments
            .children()
            .filter(|element| element.kind() != SyntaxKind::Bar)
            .map(|element| self.expression(element))
            .collect::<Result<Vec<_>>>()?;

        let mut text = format!("{}({})", identifier(name), arguments.join(", "));
        if call.parent().map(|parent| parent.kind()) == Some(SyntaxKind::Block) {
            text.push(';');
        }
        Ok(text)
    }

    fn expression(&self, element: SyntaxElement<'_>) -> Result<String> {
        let node = match element {
            SyntaxElement::Token(token) => return literal(token),
            SyntaxElement::Node(node) => node,
        };

        check_arity(node)?;
        match node.kind() {
            SyntaxKind::ParenthesizedExpression => {
                let inner = self.expression(required_child(node, 1)?)?;
                Ok(format!("({})", inner))
            }
            SyntaxKind::UnaryExpression => {
                let operator = operator_text(node, 0)?;
                let operand = self.expression(required_child(node, 1)?)?;
                Ok(prefix(operator, &operand))
            }
            SyntaxKind::BinaryExpression => self.binary(node),
            SyntaxKind::Invocation => self.invocation(node),
            kind => Err(EmitError::Unsupported { kind }),
        }
    }

    /// Operator chains nest to the left, so the left spine is walked in a
    /// loop; only right operands recurse.
    fn binary(&self, node: SyntaxNode<'_>) -> Result<String> {
        let mut rights = Vec::new();
        let mut left = SyntaxElement::Node(node);
        while let SyntaxElement::Node(inner) = left {
            if inner.kind() != SyntaxKind::BinaryExpression {
                break;
            }
            check_arity(inner)?;
            rights.push((operator_text(inner, 1)?, required_child(inner, 2)?));
            left = required_child(inner, 0)?;
        }

        let mut text = self.expression(left)?;
        for (operator, right) in rights.into_iter().rev() {
            let right = self.expression(right)?;
            text.push_str(&prefix(operator, &right));
        }
        Ok(text)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(&self.options.indent);
        }
    }
}

/// Words JavaScript will not accept as a binding or reference name
/// (strict mode included).
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export",
    "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];

fn literal(token: &Token) -> Result<String> {
    match token.kind {
        SyntaxKind::NumberLiteral => Ok(number_literal(&token.text).to_string()),
        SyntaxKind::Identifier => Ok(identifier(token)),
        SyntaxKind::StringLiteral => Ok(string_literal(token)),
        kind => Err(EmitError::Unsupported { kind }),
    }
}

/// A name as written, or `$name` when JavaScript reserves it.
fn identifier(token: &Token) -> String {
    if RESERVED_WORDS.contains(&token.text.as_str()) {
        format!("${}", token.text)
    } else {
        token.text.clone()
    }
}

/// Drops redundant leading zeros; JavaScript reads `010` as octal and
/// rejects `010.5`.
fn number_literal(text: &str) -> &str {
    let trimmed = text.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        &text[text.len() - trimmed.len() - 1..]
    } else {
        trimmed
    }
}

/// Sprout strings have no escapes, so content that JavaScript would read
/// differently is re-quoted.
fn string_literal(token: &Token) -> String {
    let content = token.text_value().unwrap_or("");
    let needs_escape = |c: char| matches!(c, '\\' | '\n' | '\r' | '\u{2028}' | '\u{2029}');
    if !content.contains(needs_escape) {
        return token.text.clone();
    }

    let quote = token.text.chars().next().unwrap_or('"');
    let mut out = String::with_capacity(content.len() + 2);
    out.push(quote);
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Glues an operator to its right operand; `-` before `-` (or `+` before `+`)
/// gets a space so the pair never reads as `--`/`++`.
fn prefix(operator: &str, operand: &str) -> String {
    let fuses = matches!(operator, "+" | "-") && operand.starts_with(operator);
    if fuses {
        format!("{} {}", operator, operand)
    } else {
        format!("{}{}", operator, operand)
    }
}

/// Child counts fixed by each grammar rule.
fn check_arity(node: SyntaxNode<'_>) -> Result<()> {
    let count = node.child_count();
    let fits = match node.kind() {
        SyntaxKind::Program => count == 3,
        SyntaxKind::Block => count >= 2,
        SyntaxKind::VariableDeclaration => count == 3 || count == 5,
        SyntaxKind::Invocation => count == 3 || count == 4,
        SyntaxKind::ArgumentList => count % 2 == 1,
        SyntaxKind::ParenthesizedExpression | SyntaxKind::BinaryExpression => count == 3,
        SyntaxKind::UnaryExpression => count == 2,
        _ => true,
    };
    if fits {
        Ok(())
    } else {
        Err(EmitError::malformed(node.kind(), format!("unexpected child count {}", count)))
    }
}

fn required_child(node: SyntaxNode<'_>, index: usize) -> Result<SyntaxElement<'_>> {
    node.child(index)
        .ok_or_else(|| EmitError::malformed(node.kind(), format!("missing child {}", index)))
}

fn required_token(node: SyntaxNode<'_>, kind: SyntaxKind) -> Result<&Token> {
    node.token(kind)
        .ok_or_else(|| EmitError::malformed(node.kind(), format!("missing {}", kind)))
}

fn operator_text(node: SyntaxNode<'_>, index: usize) -> Result<&str> {
    match required_child(node, index)? {
        SyntaxElement::Token(token) => Ok(token.text.as_str()),
        SyntaxElement::Node(_) => Err(EmitError::malformed(node.kind(), "operator is not a token")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_lexer::{Position, Span, TokenValue};
    use sprout_parser::{Element, TreeBuilder, parse};

    fn emit(source: &str) -> String {
        let tree = parse(source).unwrap();
        Emitter::new(EmitOptions::default()).emit(&tree).unwrap()
    }

    fn token(kind: SyntaxKind, text: &str) -> Element {
        Element::Token(Token::new(kind, text, TokenValue::None, Span::default(), Position::default()))
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(emit("program P { }"), "let P = function() {};\nP();\n");
    }

    #[test]
    fn test_statement_layout() {
        let js = emit("program Demo { let x = 1 + 2 * 3; call speak x }");
        assert_eq!(js, "let Demo = function() {\n  let x = 1+2*3;\n  speak(x);\n};\nDemo();\n");
    }

    #[test]
    fn test_nested_indentation() {
        let js = emit("program P { { let a = 1; { call speak a; } } }");
        let expected = "\
let P = function() {
  {
    let a = 1;
    {
      speak(a);
    }
  }
};
P();
";
        assert_eq!(js, expected);
    }

    #[test]
    fn test_custom_indent() {
        let tree = parse("program P { let a; }").unwrap();
        let options = EmitOptions { indent: "\t".to_string() };
        let js = Emitter::new(options).emit(&tree).unwrap();
        assert_eq!(js, "let P = function() {\n\tlet a;\n};\nP();\n");
    }

    #[test]
    fn test_expression_forms() {
        let js = emit("program P { let a = (1 + 2) * -b / 'x'; }");
        assert!(js.contains("let a = (1+2)*-b/'x';"), "{}", js);
    }

    #[test]
    fn test_operator_spacing() {
        let js = emit("program P { let a = 1 - -2; let b = 1 + +c; let d = - -e; let f = 1 - +2; }");
        assert!(js.contains("let a = 1- -2;"), "{}", js);
        assert!(js.contains("let b = 1+ +c;"), "{}", js);
        assert!(js.contains("let d = - -e;"), "{}", js);
        assert!(js.contains("let f = 1-+2;"), "{}", js);
    }

    #[test]
    fn test_invocation_terminator_depends_on_parent() {
        let js = emit("program P { call speak 'hi' | 2; let r = call dialog 'name?'; }");
        assert!(js.contains("  speak('hi', 2);\n"), "{}", js);
        assert!(js.contains("  let r = dialog('name?');\n"), "{}", js);
        assert!(!js.contains("dialog('name?');;"), "{}", js);
    }

    #[test]
    fn test_nested_invocation_argument() {
        let js = emit("program P { call speak call upper 'a' | 'b' }");
        assert!(js.contains("speak(upper('a', 'b'));"), "{}", js);
    }

    #[test]
    fn test_string_passthrough_and_escaping() {
        let js = emit("program P { let a = \"plain\"; let b = 'two\nlines'; let c = 'back\\slash'; }");
        assert!(js.contains("let a = \"plain\";"), "{}", js);
        assert!(js.contains("let b = 'two\\nlines';"), "{}", js);
        assert!(js.contains("let c = 'back\\\\slash';"), "{}", js);
    }

    #[test]
    fn test_unsupported_root() {
        let mut builder = TreeBuilder::new();
        let args = builder.node(SyntaxKind::ArgumentList, vec![token(SyntaxKind::NumberLiteral, "1")]);
        let tree = builder.finish(args);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert_eq!(err, EmitError::Unsupported { kind: SyntaxKind::ArgumentList });
    }

    #[test]
    fn test_unsupported_operand() {
        let mut builder = TreeBuilder::new();
        let bad = builder.node(SyntaxKind::UnaryExpression, vec![
            token(SyntaxKind::Minus, "-"),
            token(SyntaxKind::Semicolon, ";"),
        ]);
        let decl = builder.node(SyntaxKind::VariableDeclaration, vec![
            token(SyntaxKind::LetKeyword, "let"),
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::Equals, "="),
            Element::Node(bad),
            token(SyntaxKind::Semicolon, ";"),
        ]);
        let tree = builder.finish(decl);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert_eq!(err, EmitError::Unsupported { kind: SyntaxKind::Semicolon });
    }

    #[test]
    fn test_malformed_program() {
        let mut builder = TreeBuilder::new();
        let program = builder.node(SyntaxKind::Program, vec![token(SyntaxKind::ProgramKeyword, "program")]);
        let tree = builder.finish(program);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { kind: SyntaxKind::Program, .. }));
    }

    #[test]
    fn test_emitter_is_reusable() {
        let tree = parse("program P { let a = 1; }").unwrap();
        let mut emitter = Emitter::new(EmitOptions::default());
        let first = emitter.emit(&tree).unwrap();
        let second = emitter.emit(&tree).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_number_leading_zeros() {
        assert_eq!(number_literal("010.5"), "10.5");
        assert_eq!(number_literal("007"), "7");
        assert_eq!(number_literal("0"), "0");
        assert_eq!(number_literal("000"), "0");
        assert_eq!(number_literal("00.25"), "0.25");
        assert_eq!(number_literal("100"), "100");

        let js = emit("program P { let x = 010.5; let y = 007 + 0.5; }");
        assert!(js.contains("let x = 10.5;"), "{}", js);
        assert!(js.contains("let y = 7+0.5;"), "{}", js);
    }

    #[test]
    fn test_reserved_names_are_prefixed() {
        let js = emit("program class { let new = 1; call speak new; call return this | typeof }");
        let expected = "\
let $class = function() {
  let $new = 1;
  speak($new);
  $return($this, $typeof);
};
$class();
";
        assert_eq!(js, expected);
    }

    #[test]
    fn test_long_operator_chain() {
        let source = format!("program P {{ let x = 1{}; }}", " - 1".repeat(10_000));
        let js = emit(&source);
        assert!(js.contains(&format!("let x = 1{};", "-1".repeat(10_000))));
    }

    #[test]
    fn test_mixed_chain_keeps_grouping() {
        let js = emit("program P { let x = 1 * 2 - 3 / (4 + 5) + -6; }");
        assert!(js.contains("let x = 1*2-3/(4+5)+-6;"), "{}", js);
    }

    #[test]
    fn test_binary_arity_is_checked() {
        let mut builder = TreeBuilder::new();
        let bad = builder.node(SyntaxKind::BinaryExpression, vec![
            token(SyntaxKind::NumberLiteral, "1"),
            token(SyntaxKind::Plus, "+"),
            token(SyntaxKind::NumberLiteral, "2"),
            token(SyntaxKind::NumberLiteral, "3"),
        ]);
        let decl = builder.node(SyntaxKind::VariableDeclaration, vec![
            token(SyntaxKind::LetKeyword, "let"),
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::Equals, "="),
            Element::Node(bad),
            token(SyntaxKind::Semicolon, ";"),
        ]);
        let tree = builder.finish(decl);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { kind: SyntaxKind::BinaryExpression, .. }), "{:?}", err);
    }

    #[test]
    fn test_declaration_arity_is_checked() {
        let mut builder = TreeBuilder::new();
        let decl = builder.node(SyntaxKind::VariableDeclaration, vec![
            token(SyntaxKind::LetKeyword, "let"),
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::Equals, "="),
            token(SyntaxKind::Semicolon, ";"),
        ]);
        let tree = builder.finish(decl);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { kind: SyntaxKind::VariableDeclaration, .. }), "{:?}", err);

        let mut builder = TreeBuilder::new();
        let decl = builder.node(SyntaxKind::VariableDeclaration, vec![
            token(SyntaxKind::LetKeyword, "let"),
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::Plus, "+"),
            token(SyntaxKind::NumberLiteral, "1"),
            token(SyntaxKind::Semicolon, ";"),
        ]);
        let tree = builder.finish(decl);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { kind: SyntaxKind::VariableDeclaration, .. }), "{:?}", err);
    }

    #[test]
    fn test_argument_list_arity_is_checked() {
        let mut builder = TreeBuilder::new();
        let args = builder.node(SyntaxKind::ArgumentList, vec![
            token(SyntaxKind::NumberLiteral, "1"),
            token(SyntaxKind::Bar, "|"),
        ]);
        let call = builder.node(SyntaxKind::Invocation, vec![
            token(SyntaxKind::CallKeyword, "call"),
            token(SyntaxKind::Identifier, "f"),
            Element::Node(args),
        ]);
        let tree = builder.finish(call);
        let err = Emitter::new(EmitOptions::default()).emit(&tree).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { kind: SyntaxKind::ArgumentList, .. }), "{:?}", err);
    }
}
