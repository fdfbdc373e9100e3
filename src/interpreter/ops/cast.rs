//! Explicit casts: `(type) operand`

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation, Type};

impl Interpreter<'_> {
    pub(crate) fn evaluate_cast(
        &mut self,
        target: Type,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate_expr(operand)?;
        value
            .convert_to(target)
            .map_err(|message| RuntimeError::type_mismatch(message, location))
    }
}
