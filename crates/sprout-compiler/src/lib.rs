/// Sprout compiler
///
/// Translates sprout programs into self-invoking JavaScript functions.

pub mod driver;
pub mod emitter;
pub mod error;

pub use driver::{Compiler, CompileOptions, CompileOutput};
pub use emitter::{EmitOptions, Emitter};
pub use error::{CompileError, EmitError, Result};

/// Name used for in-memory sources
pub const INLINE_SOURCE: &str = "<input>";

/// Compile source text with the default options
pub fn compile_str(source: &str) -> Result<String> {
    Compiler::new(CompileOptions::new(INLINE_SOURCE))
        .compile_source(INLINE_SOURCE, source)
        .map(|output| output.javascript)
}
