use sprout_parser::{parse, ast_dump::dump_tree};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.sprout>", args[0]);
        eprintln!();
        eprintln!("Parse a sprout file and dump its syntax tree");
        process::exit(1);
    }

    let filename = &args[1];

    // Read file
    let input = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    // Parse
    let tree = match parse(&input) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Parse error in '{}': {}", filename, e);
            process::exit(1);
        }
    };

    print!("{}", dump_tree(&tree));
}
