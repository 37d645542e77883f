pub mod ast_dump;
pub mod error;
pub mod parser;
pub mod tree;

pub use error::ParseError;
pub use parser::{MAX_NESTING, Parser};
pub use tree::{Element, NodeId, SyntaxElement, SyntaxNode, SyntaxTree, TreeBuilder};

use sprout_lexer::{KeywordTable, Lexer, lex_str};

/// Parse a sprout program from a string
pub fn parse(input: &str) -> Result<SyntaxTree, ParseError> {
    Parser::new(lex_str(input)).parse()
}

/// Parse with a caller-supplied keyword table
pub fn parse_with_keywords(input: &str, keywords: &KeywordTable) -> Result<SyntaxTree, ParseError> {
    Parser::new(Lexer::new(input, keywords.clone())).parse()
}
