//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal - they halt execution and unwind to the caller of
//! [`Interpreter::run`](super::engine::Interpreter::run).

use crate::parser::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// What an unresolved name was expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => f.write_str("variable"),
            SymbolKind::Function => f.write_str("function"),
        }
    }
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Operand or value of the wrong type for an operation
    #[error("Type mismatch at line {}: {message}", .location.line)]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    /// Name not visible in the current frame, or no such function
    #[error("Undefined {kind} '{name}' at line {}", .location.line)]
    UndefinedSymbol {
        kind: SymbolKind,
        name: String,
        location: SourceLocation,
    },

    /// Same name declared twice in one scope
    #[error("Redeclaration of '{name}' at line {}", .location.line)]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Non-void function finished without a value
    #[error("Function '{function}' must return a value (line {})", .location.line)]
    MissingReturn {
        function: String,
        location: SourceLocation,
    },

    /// Pointer to a variable whose scope has ended
    #[error("Dangling pointer dereference at line {}", .location.line)]
    DanglingPointer { location: SourceLocation },

    /// Call depth limit exceeded
    #[error("Call depth limit of {limit} exceeded at line {}", .location.line)]
    ResourceExhausted {
        limit: usize,
        location: SourceLocation,
    },

    /// Null pointer dereference
    #[error("Null pointer dereference at line {}", .location.line)]
    NullDereference { location: SourceLocation },

    /// Integer division or remainder by zero
    #[error("{operation} by zero at line {}", .location.line)]
    DivisionByZero {
        operation: &'static str,
        location: SourceLocation,
    },

    /// Function argument count mismatch
    #[error(
        "Function '{function}' takes {expected} parameter(s) but was called with {got} argument(s) at line {}",
        .location.line
    )]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Main function not found
    #[error("No main() function found")]
    NoMainFunction,
}

impl RuntimeError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::UndefinedSymbol { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::MissingReturn { location, .. }
            | RuntimeError::DanglingPointer { location }
            | RuntimeError::ResourceExhausted { location, .. }
            | RuntimeError::NullDereference { location }
            | RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::ArgumentCountMismatch { location, .. } => Some(*location),
            RuntimeError::NoMainFunction => None,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, location: SourceLocation) -> Self {
        RuntimeError::TypeMismatch {
            message: message.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let loc = SourceLocation::new(3, 7);
        assert_eq!(
            RuntimeError::UndefinedSymbol {
                kind: SymbolKind::Function,
                name: "f".to_string(),
                location: loc
            }
            .to_string(),
            "Undefined function 'f' at line 3"
        );
        assert_eq!(
            RuntimeError::ArgumentCountMismatch {
                function: "sum".to_string(),
                expected: 1,
                got: 2,
                location: loc
            }
            .to_string(),
            "Function 'sum' takes 1 parameter(s) but was called with 2 argument(s) at line 3"
        );
        assert_eq!(
            RuntimeError::DivisionByZero {
                operation: "Division",
                location: loc
            }
            .to_string(),
            "Division by zero at line 3"
        );
    }

    #[test]
    fn test_location() {
        let loc = SourceLocation::new(1, 2);
        assert_eq!(RuntimeError::DanglingPointer { location: loc }.location(), Some(loc));
        assert_eq!(RuntimeError::NoMainFunction.location(), None);
    }
}
