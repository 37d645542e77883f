/// Tree dumping utilities for testing and debugging
///
/// Provides an indented, human-readable view of a syntax tree: one line per
/// node kind, one line per token with its lexeme.

use crate::tree::{SyntaxElement, SyntaxNode, SyntaxTree};
use std::fmt;

/// Dump a whole tree as a pretty-printed outline
pub fn dump_tree(tree: &SyntaxTree) -> String {
    TreeDump(tree.root()).to_string()
}

/// Display adapter that writes a node and everything below it
pub struct TreeDump<'a>(pub SyntaxNode<'a>);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

/// Depth-first with an explicit stack; operator chains nest as deep as they
/// are long.
fn write_node(f: &mut fmt::Formatter<'_>, root: SyntaxNode<'_>, indent: usize) -> fmt::Result {
    let mut pending = vec![(SyntaxElement::Node(root), indent)];
    while let Some((element, indent)) = pending.pop() {
        match element {
            SyntaxElement::Node(node) => {
                writeln!(f, "{}{}", "  ".repeat(indent), node.kind())?;
                let children: Vec<_> = node.children().collect();
                pending.extend(children.into_iter().rev().map(|child| (child, indent + 1)));
            }
            SyntaxElement::Token(token) => {
                writeln!(f, "{}{} {:?}", "  ".repeat(indent), token.kind, token.text)?
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_dump_shape() {
        let tree = parse("program P { let x = -1; }").unwrap();
        let expected = "\
Program
  ProgramKeyword \"program\"
  Identifier \"P\"
  Block
    OpenBrace \"{\"
    VariableDeclaration
      LetKeyword \"let\"
      Identifier \"x\"
      Equals \"=\"
      UnaryExpression
        Minus \"-\"
        NumberLiteral \"1\"
      Semicolon \";\"
    CloseBrace \"}\"
";
        assert_eq!(dump_tree(&tree), expected);
    }

    #[test]
    fn test_dump_long_chain() {
        let source = format!("program P {{ let x = 1{}; }}", " + 1".repeat(5_000));
        let tree = parse(&source).unwrap();
        let dump = dump_tree(&tree);
        assert_eq!(dump.matches("BinaryExpression").count(), 5_000);
        assert!(dump.ends_with("    CloseBrace \"}\"\n"));
    }
}
