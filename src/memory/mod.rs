//! Memory model for the interpreter
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Float, Char, Pointer, Null, Str)
//! - [`arena`]: Generational slot arena that owns every variable
//! - [`stack`]: Call stack of frames, each a stack of lexical scopes
//!
//! # Type Sizes
//!
//! Sizes are fixed and platform-independent:
//! - `int`: 4 bytes
//! - `char`: 1 byte
//! - `float`: 8 bytes
//! - `pointer`: 8 bytes (regardless of pointee type)
//!
//! Sizes only matter to `sizeof`; values themselves are tagged, not laid out
//! in bytes, and there is no pointer arithmetic.

pub mod arena;
pub mod stack;
pub mod value;

pub use arena::{Slot, SlotArena, SlotId};
pub use stack::{Stack, StackError, StackFrame};
pub use value::{format_float, sizeof_type, Value};
