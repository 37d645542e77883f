/// Sprout compiler CLI

use std::path::PathBuf;
use std::process;
use clap::Parser;
use sprout_compiler::{Compiler, CompileOptions};
use sprout_lexer::chars::is_identifier;
use sprout_lexer::{KeywordTable, SyntaxKind};
use sprout_parser::ast_dump::dump_tree;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sproutc")]
#[command(about = "Sprout compiler - translates sprout programs into JavaScript")]
#[command(version)]
struct Args {
    /// Input sprout source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the generated script to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Spaces per indentation level in the generated script
    #[arg(long, value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Rebind a reserved word, e.g. `--keyword programa=program`
    #[arg(long = "keyword", value_name = "WORD=ROLE", value_parser = parse_keyword)]
    keywords: Vec<(String, SyntaxKind)>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree instead of the script
    #[arg(long)]
    dump_ast: bool,
}

/// Parses `WORD=ROLE` where ROLE is `program`, `call` or `let`
fn parse_keyword(arg: &str) -> Result<(String, SyntaxKind), String> {
    let (word, role) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected WORD=ROLE, got '{}'", arg))?;
    if word.is_empty() {
        return Err("keyword spelling cannot be empty".to_string());
    }
    if !is_identifier(word) {
        return Err(format!("'{}' is not a single identifier and would never be lexed as a keyword", word));
    }
    let kind = match role {
        "program" => SyntaxKind::ProgramKeyword,
        "call" => SyntaxKind::CallKeyword,
        "let" => SyntaxKind::LetKeyword,
        other => return Err(format!("unknown keyword role '{}' (expected program, call or let)", other)),
    };
    Ok((word.to_string(), kind))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut keywords = KeywordTable::canonical();
    for (word, kind) in &args.keywords {
        keywords.rebind(word.as_str(), *kind);
    }

    let mut options = CompileOptions::new(&args.input)
        .keywords(keywords)
        .indent(" ".repeat(args.indent))
        .collect_tokens(args.tokens);

    if let Some(output) = &args.output {
        options = options.output(output);
    }

    let output = Compiler::new(options).compile()?;

    if args.tokens {
        for token in &output.tokens {
            println!("{}", token);
        }
    }

    if args.dump_ast {
        print!("{}", dump_tree(&output.tree));
    } else if args.output.is_none() {
        print!("{}", output.javascript);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Compilation failed: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_roles() {
        assert_eq!(parse_keyword("programa=program"), Ok(("programa".to_string(), SyntaxKind::ProgramKeyword)));
        assert_eq!(parse_keyword("llamar=call"), Ok(("llamar".to_string(), SyntaxKind::CallKeyword)));
        assert_eq!(parse_keyword("sea=let"), Ok(("sea".to_string(), SyntaxKind::LetKeyword)));
        assert!(parse_keyword("sea=var").is_err());
        assert!(parse_keyword("sea").is_err());
        assert!(parse_keyword("=let").is_err());
    }

    #[test]
    fn test_parse_keyword_rejects_unlexable_spellings() {
        for arg in ["1x=program", "a b=call", "_x=let", "a-b=let"] {
            let err = parse_keyword(arg).unwrap_err();
            assert!(err.contains("not a single identifier"), "{}: {}", arg, err);
        }
    }
}
