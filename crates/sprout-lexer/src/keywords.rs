/// Reserved-word table handed to the lexer
///
/// The lexer never hard-codes its keywords; swapping the table swaps the
/// spelling of the grammar.

use crate::kind::SyntaxKind;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    words: HashMap<String, SyntaxKind>,
}

impl KeywordTable {
    /// An empty table: every word lexes as an identifier.
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// `program`, `call` and `let`.
    pub fn canonical() -> Self {
        Self::empty()
            .with("program", SyntaxKind::ProgramKeyword)
            .with("call", SyntaxKind::CallKeyword)
            .with("let", SyntaxKind::LetKeyword)
    }

    /// Adds or replaces one entry.
    ///
    /// `kind` must be a keyword kind; anything else is a caller bug.
    pub fn with(mut self, word: impl Into<String>, kind: SyntaxKind) -> Self {
        self.insert(word, kind);
        self
    }

    pub fn insert(&mut self, word: impl Into<String>, kind: SyntaxKind) {
        debug_assert!(kind.is_keyword(), "{} is not a keyword kind", kind);
        self.words.insert(word.into(), kind);
    }

    /// Rebinds `kind` to `word`, dropping whatever spelled it before.
    pub fn rebind(&mut self, word: impl Into<String>, kind: SyntaxKind) {
        self.words.retain(|_, existing| *existing != kind);
        self.insert(word, kind);
    }

    pub fn lookup(&self, word: &str) -> Option<SyntaxKind> {
        self.words.get(word).copied()
    }

    /// The spelling currently bound to `kind`, if any.
    pub fn spelling(&self, kind: SyntaxKind) -> Option<&str> {
        self.words
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(word, _)| word.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::canonical()
    }
}
