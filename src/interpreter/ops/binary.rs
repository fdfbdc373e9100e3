//! Binary operator evaluation
//!
//! Operand handling, in order:
//! 1. `&&` and `||` short-circuit and yield `Int` 1/0
//! 2. Pointers only take part in `==` and `!=`
//! 3. If either operand is a `Float`, both widen to `Float`; the bitwise and
//!    shift operators then fail with a type mismatch
//! 4. Otherwise both are integers (`Char` promotes to `Int`) and arithmetic wraps

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, Expr, SourceLocation};

impl Interpreter<'_> {
    pub(crate) fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::And => {
                let result = self.evaluate_condition(left)? && self.evaluate_condition(right)?;
                Ok(bool_value(result))
            }
            BinOp::Or => {
                let result = self.evaluate_condition(left)? || self.evaluate_condition(right)?;
                Ok(bool_value(result))
            }
            _ => {
                let left_val = self.evaluate_expr(left)?;
                let right_val = self.evaluate_expr(right)?;
                binary_values(op, &left_val, &right_val, location)
            }
        }
    }
}

#[inline]
fn bool_value(b: bool) -> Value {
    Value::Int(i64::from(b))
}

/// Apply a non-short-circuit binary operator to two evaluated operands
pub(crate) fn binary_values(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    if left.is_pointer() || right.is_pointer() {
        return pointer_comparison(op, left, right, location);
    }

    if !left.is_numeric() || !right.is_numeric() {
        let offender = if left.is_numeric() { right } else { left };
        return Err(RuntimeError::type_mismatch(
            format!(
                "Operator '{}' cannot be applied to a {}",
                op.symbol(),
                offender.type_name()
            ),
            location,
        ));
    }

    if left.is_float() || right.is_float() {
        if let (Some(a), Some(b)) = (left.as_float(), right.as_float()) {
            return float_op(op, a, b, location);
        }
    }

    match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => int_op(op, a, b, location),
        _ => Err(RuntimeError::type_mismatch(
            format!(
                "Operator '{}' cannot be applied to {} and {}",
                op.symbol(),
                left.type_name(),
                right.type_name()
            ),
            location,
        )),
    }
}

fn pointer_comparison(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let same = match (left, right) {
        (Value::Pointer(a), Value::Pointer(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Pointer(_), Value::Null) | (Value::Null, Value::Pointer(_)) => false,
        _ => {
            return Err(RuntimeError::type_mismatch(
                format!(
                    "Cannot compare {} with {}",
                    left.type_name(),
                    right.type_name()
                ),
                location,
            ))
        }
    };

    match op {
        BinOp::Eq => Ok(bool_value(same)),
        BinOp::Ne => Ok(bool_value(!same)),
        _ => Err(RuntimeError::type_mismatch(
            format!("Operator '{}' cannot be applied to pointers", op.symbol()),
            location,
        )),
    }
}

#[inline]
fn int_op(op: BinOp, a: i64, b: i64, location: SourceLocation) -> Result<Value, RuntimeError> {
    let value = match op {
        BinOp::Add => a.wrapping_add(b),
        BinOp::Sub => a.wrapping_sub(b),
        BinOp::Mul => a.wrapping_mul(b),
        BinOp::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero {
                    operation: "Division",
                    location,
                });
            }
            a.wrapping_div(b)
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero {
                    operation: "Modulo",
                    location,
                });
            }
            a.wrapping_rem(b)
        }
        BinOp::Eq => i64::from(a == b),
        BinOp::Ne => i64::from(a != b),
        BinOp::Lt => i64::from(a < b),
        BinOp::Le => i64::from(a <= b),
        BinOp::Gt => i64::from(a > b),
        BinOp::Ge => i64::from(a >= b),
        BinOp::BitAnd => a & b,
        BinOp::BitOr => a | b,
        BinOp::BitXor => a ^ b,
        // Shift counts are taken mod 64; `>>` on i64 is arithmetic
        BinOp::BitShl => a.wrapping_shl((b & 63) as u32),
        BinOp::BitShr => a.wrapping_shr((b & 63) as u32),
        BinOp::And => i64::from(a != 0 && b != 0),
        BinOp::Or => i64::from(a != 0 || b != 0),
    };
    Ok(Value::Int(value))
}

#[inline]
fn float_op(op: BinOp, a: f64, b: f64, location: SourceLocation) -> Result<Value, RuntimeError> {
    let value = match op {
        BinOp::Add => Value::Float(a + b),
        BinOp::Sub => Value::Float(a - b),
        BinOp::Mul => Value::Float(a * b),
        BinOp::Div => Value::Float(a / b),
        // Remainder keeps the sign of the dividend
        BinOp::Mod => Value::Float(a % b),
        BinOp::Eq => bool_value(a == b),
        BinOp::Ne => bool_value(a != b),
        BinOp::Lt => bool_value(a < b),
        BinOp::Le => bool_value(a <= b),
        BinOp::Gt => bool_value(a > b),
        BinOp::Ge => bool_value(a >= b),
        BinOp::And => bool_value(a != 0.0 && b != 0.0),
        BinOp::Or => bool_value(a != 0.0 || b != 0.0),
        BinOp::BitAnd
        | BinOp::BitOr
        | BinOp::BitXor
        | BinOp::BitShl
        | BinOp::BitShr => {
            return Err(RuntimeError::type_mismatch(
                format!("Operator '{}' requires integer operands", op.symbol()),
                location,
            ))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: BinOp, a: Value, b: Value) -> Result<Value, RuntimeError> {
        binary_values(op, &a, &b, SourceLocation::default())
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(
            eval(BinOp::Add, Value::Int(i64::MAX), Value::Int(1)),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            eval(BinOp::Div, Value::Int(i64::MIN), Value::Int(-1)),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn test_division_truncates() {
        assert_eq!(eval(BinOp::Div, Value::Int(-7), Value::Int(2)), Ok(Value::Int(-3)));
        assert_eq!(eval(BinOp::Mod, Value::Int(-7), Value::Int(2)), Ok(Value::Int(-1)));
        assert!(matches!(
            eval(BinOp::Mod, Value::Int(1), Value::Int(0)),
            Err(RuntimeError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_char_promotes() {
        assert_eq!(eval(BinOp::Add, Value::Char(b'A'), Value::Int(1)), Ok(Value::Int(66)));
        assert_eq!(
            eval(BinOp::Mul, Value::Char(2), Value::Float(1.5)),
            Ok(Value::Float(3.0))
        );
    }

    #[test]
    fn test_float_widening_and_ieee_division() {
        assert_eq!(eval(BinOp::Add, Value::Int(1), Value::Float(0.5)), Ok(Value::Float(1.5)));
        assert_eq!(
            eval(BinOp::Div, Value::Float(1.0), Value::Int(0)),
            Ok(Value::Float(f64::INFINITY))
        );
        assert_eq!(eval(BinOp::Lt, Value::Float(1.5), Value::Int(2)), Ok(Value::Int(1)));
    }

    #[test]
    fn test_bitwise_rejects_float() {
        assert!(matches!(
            eval(BinOp::BitAnd, Value::Float(1.0), Value::Int(1)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            eval(BinOp::BitShl, Value::Int(1), Value::Float(2.0)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_float_remainder() {
        assert_eq!(eval(BinOp::Mod, Value::Float(5.5), Value::Float(2.0)), Ok(Value::Float(1.5)));
        assert_eq!(eval(BinOp::Mod, Value::Float(-5.5), Value::Int(2)), Ok(Value::Float(-1.5)));
        assert_eq!(eval(BinOp::Mod, Value::Int(7), Value::Float(2.5)), Ok(Value::Float(2.0)));
        match eval(BinOp::Mod, Value::Float(1.0), Value::Int(0)) {
            Ok(Value::Float(x)) => assert!(x.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn test_shift_counts_are_masked() {
        assert_eq!(eval(BinOp::BitShl, Value::Int(1), Value::Int(64)), Ok(Value::Int(1)));
        assert_eq!(eval(BinOp::BitShr, Value::Int(-16), Value::Int(2)), Ok(Value::Int(-4)));
    }

    #[test]
    fn test_strings_are_rejected() {
        assert!(matches!(
            eval(BinOp::Add, Value::Str("a".to_string()), Value::Int(1)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_null_comparisons() {
        assert_eq!(eval(BinOp::Eq, Value::Null, Value::Null), Ok(Value::Int(1)));
        assert!(matches!(
            eval(BinOp::Eq, Value::Null, Value::Int(0)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            eval(BinOp::Lt, Value::Null, Value::Null),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }
}
