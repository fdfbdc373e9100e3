//! Built-in function implementations
//!
//! The only builtin is `print(value)`. It is intercepted by name before the
//! function table is consulted, so no user function may be called `print`.
//!
//! # Output format
//!
//! - Strings are written exactly as they are, escapes already decoded
//! - `int` and `char` values are written in decimal (`'Z'` prints `90`)
//! - `float` values use the shortest text that reads back to the same number,
//!   always with a decimal point (`4.0`, `3.14`)
//! - Numeric values are followed by a newline unless
//!   [`RunConfig::newline_after_value`](crate::config::RunConfig) is off
//!
//! Pointers have no printed form.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation};

impl Interpreter<'_> {
    pub(crate) fn builtin_print(
        &mut self,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let [arg] = args else {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: "print".to_string(),
                expected: 1,
                got: args.len(),
                location,
            });
        };

        let value = self.evaluate_expr(arg)?;
        let text = value.canonical_text().ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!("print cannot display a {}", value.type_name()),
                arg.location,
            )
        })?;

        self.sink.write_str(&text);
        if !matches!(value, Value::Str(_)) && self.config.newline_after_value {
            self.sink.write_str("\n");
        }

        Ok(())
    }
}
