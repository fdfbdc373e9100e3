//! Execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`Interpreter`], function calls, and the control-flow signal
//! - [`errors`]: Runtime error types
//! - [`output`]: Where `print` writes
//! - `statements`, `loops`, `jumps`, `expressions`, `builtins`, `ops`: the tree walk,
//!   split into `impl Interpreter` blocks
//!
//! # Execution Model
//!
//! The interpreter walks the AST directly, one statement at a time, starting
//! from `main`. Each call gets a fresh frame; variables live in a slot arena
//! and pointers are generational handles into it.

mod builtins;
pub mod engine;
pub mod errors;
mod expressions;
mod jumps;
mod loops;
mod ops;
pub mod output;
mod statements;

pub use engine::Interpreter;
pub use errors::{RuntimeError, SymbolKind};
pub use output::{CaptureSink, PrintSink, StdoutSink};
