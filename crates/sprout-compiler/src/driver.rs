/// Compiler driver that orchestrates the compilation pipeline

use std::fs;
use std::path::PathBuf;
use sprout_lexer::{KeywordTable, Lexer, Token};
use sprout_parser::{Parser, SyntaxTree};
use crate::emitter::{EmitOptions, Emitter};
use crate::error::{CompileError, Result};

/// Compilation output structure
#[derive(Debug)]
pub struct CompileOutput {
    /// Source file that was compiled, or the name given to in-memory text
    pub source_file: PathBuf,
    /// Source text
    pub source: String,
    /// Generated JavaScript
    pub javascript: String,
    /// Full token stream, trivia included (empty unless requested)
    pub tokens: Vec<Token>,
    /// The parsed program
    pub tree: SyntaxTree,
}

/// Options for compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Input source file
    pub input: PathBuf,
    /// Where `compile` writes the script, if anywhere
    pub output: Option<PathBuf>,
    /// Reserved words handed to the lexer
    pub keywords: KeywordTable,
    pub emit: EmitOptions,
    /// Keep the token stream in the output
    pub collect_tokens: bool,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            keywords: KeywordTable::canonical(),
            emit: EmitOptions::default(),
            collect_tokens: false,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.emit.indent = indent.into();
        self
    }

    pub fn collect_tokens(mut self, collect: bool) -> Self {
        self.collect_tokens = collect;
        self
    }
}

/// The sprout compiler
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile the input file, writing the script to `output` when set
    pub fn compile(&self) -> Result<CompileOutput> {
        let source = self.read_source()?;
        let output = self.compile_source(&self.options.input, source)?;

        if let Some(path) = &self.options.output {
            fs::write(path, &output.javascript)?;
            tracing::info!(path = %path.display(), bytes = output.javascript.len(), "wrote script");
        }

        Ok(output)
    }

    /// Run lex, parse and emit over in-memory text
    ///
    /// `file` only names the source in errors and in the output.
    pub fn compile_source(&self, file: impl Into<PathBuf>, source: impl Into<String>) -> Result<CompileOutput> {
        let file = file.into();
        let source = source.into();
        tracing::debug!(file = %file.display(), bytes = source.len(), "compiling");

        let mut lexer = Lexer::new(&source, self.options.keywords.clone());

        // A display pass over the tokens; the parser rescans from the start.
        let tokens = if self.options.collect_tokens {
            let tokens = lexer.tokenize().map_err(|e| CompileError::lex(&file, e))?;
            tracing::debug!(tokens = tokens.len(), "lexing successful");
            lexer.reset();
            tokens
        } else {
            Vec::new()
        };

        let tree = Parser::new(lexer)
            .parse()
            .map_err(|e| CompileError::parse(&file, e))?;
        tracing::debug!(nodes = tree.len(), "parse successful");

        let javascript = Emitter::new(self.options.emit.clone()).emit(&tree)?;
        tracing::debug!(bytes = javascript.len(), "emission successful");

        Ok(CompileOutput {
            source_file: file,
            source,
            javascript,
            tokens,
            tree,
        })
    }

    fn read_source(&self) -> Result<String> {
        let path = &self.options.input;
        if !path.exists() {
            return Err(CompileError::FileNotFound(path.clone()));
        }
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "read source");
        Ok(source)
    }
}
