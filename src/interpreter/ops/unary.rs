//! Unary operator evaluation

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter<'_> {
    pub(crate) fn evaluate_unary_op(
        &mut self,
        op: UnOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Neg => {
                let val = self.evaluate_expr(operand)?;
                negate(&val, location)
            }
            UnOp::Not => {
                let b = self.evaluate_condition(operand)?;
                Ok(Value::Int(i64::from(!b)))
            }
        }
    }
}

pub(crate) fn negate(val: &Value, location: SourceLocation) -> Result<Value, RuntimeError> {
    match val {
        Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
        Value::Char(c) => Ok(Value::Int(-i64::from(*c))),
        Value::Float(x) => Ok(Value::Float(-x)),
        other => Err(RuntimeError::type_mismatch(
            format!("Cannot negate a {}", other.type_name()),
            location,
        )),
    }
}
