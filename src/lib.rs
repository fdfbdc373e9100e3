//! # Introduction
//!
//! cwalk lexes, parses, and directly executes programs written in a small
//! C-like language: `int`, `char` and `float` values, pointers to local
//! variables, `while` and `if`, user functions, and a `print` builtin.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → FunctionTable → Interpreter → print output + exit code
//! ```
//!
//! 1. [`parser`]: tokenises the source, builds an AST, and indexes functions
//!    by name.
//! 2. [`interpreter`]: walks the AST from `main`, writing `print` output to an
//!    injected [`PrintSink`].
//! 3. [`memory`]: tagged [`memory::Value`]s stored in a generational slot
//!    arena, addressed through a [`memory::Stack`] of frames and scopes.
//! 4. [`config`]: [`RunConfig`], optionally loaded from TOML.
//! 5. [`diagnostics`]: renders errors with the offending source line.
//!
//! ## Example
//!
//! ```
//! let (code, output) = cwalk::run_captured(
//!     "int main() { print(6 * 7); return 0; }",
//!     &cwalk::RunConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(code, 0);
//! assert_eq!(output, "42\n");
//! ```

pub mod config;
pub mod diagnostics;
pub mod interpreter;
pub mod memory;
pub mod parser;

pub use config::{ConfigError, RunConfig};
pub use interpreter::{CaptureSink, Interpreter, PrintSink, RuntimeError, StdoutSink, SymbolKind};
pub use parser::lexer::LexError;
pub use parser::{FunctionTable, ParseError, Parser};

use parser::ast::SourceLocation;
use thiserror::Error;

/// Remaining stack below which the recursive walkers grow onto a new segment
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each extra stack segment
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Any error that stops a program from producing a result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Error::Lex(err) => Some(err.location),
            Error::Parse(err) => Some(err.location),
            Error::Runtime(err) => err.location(),
        }
    }

    /// Short phase name for reports: "lex", "parse" or "runtime"
    pub fn phase(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lex",
            Error::Parse(_) => "parse",
            Error::Runtime(_) => "runtime",
        }
    }
}

/// Lex, parse, and index a program
pub fn parse_source(source: &str) -> Result<FunctionTable, Error> {
    let program = Parser::new(source)?.parse_program()?;
    Ok(FunctionTable::from_program(program)?)
}

/// Run a program, sending `print` output to `sink`, and return `main`'s value
pub fn run_source(source: &str, config: &RunConfig, sink: impl PrintSink) -> Result<i64, Error> {
    let functions = parse_source(source)?;
    let mut interpreter = Interpreter::new(functions, config.clone(), sink);
    Ok(interpreter.run()?)
}

/// Run a program and return `main`'s value together with everything it printed
pub fn run_captured(source: &str, config: &RunConfig) -> Result<(i64, String), Error> {
    let capture = CaptureSink::new();
    let code = run_source(source, config, capture.clone())?;
    Ok((code, capture.contents()))
}
