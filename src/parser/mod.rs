//! Source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, helpers, and the [`FunctionTable`]
//! - `declarations`, `statements`, `expressions`: the grammar, as `impl Parser` blocks
//! - [`ast`]: AST node definitions
//! - [`printer`]: AST → canonical source text
//!
//! # Supported Language
//!
//! - Types: `int`, `char`, `float`, `void` (return type only), pointers to any of them
//! - Statements: declarations (no initializers), assignments, `while`, `if`/`else`,
//!   `return`, blocks, expression statements
//! - Expressions: arithmetic, comparison, logical, bitwise, shifts, conditional,
//!   casts, `sizeof(type)`, address-of, dereference, function calls
//! - No preprocessor, arrays, structs or heap allocation
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;

pub use parse::{FunctionTable, ParseError, Parser};
