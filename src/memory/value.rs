//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! in the interpreter. Values are tagged: every operation checks the tag rather than
//! reinterpreting raw bytes.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer, wrapping arithmetic
//! - [`Value::Float`]: IEEE-754 double
//! - [`Value::Char`]: unsigned byte, promoted to `Int` in arithmetic
//! - [`Value::Pointer`]: handle to a slot in the [`SlotArena`](super::arena::SlotArena)
//! - [`Value::Null`]: the pointer every pointer slot starts as
//! - [`Value::Str`]: a string literal; only `print` accepts one

use super::arena::SlotId;
use crate::parser::ast::{BaseType, Type};
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Char(u8),
    Pointer(SlotId),
    Null,
    Str(String),
}

impl Value {
    /// The value a freshly declared slot of type `ty` holds.
    pub fn zero_of(ty: Type) -> Value {
        if ty.is_pointer() {
            return Value::Null;
        }
        match ty.base {
            BaseType::Int | BaseType::Void => Value::Int(0),
            BaseType::Char => Value::Char(0),
            BaseType::Float => Value::Float(0.0),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Pointer(_) => "pointer",
            Value::Null => "null pointer",
            Value::Str(_) => "string",
        }
    }

    /// Get the integer value, promoting Char. None for anything else.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Char(c) => Some(i64::from(*c)),
            _ => None,
        }
    }

    /// Get the value widened to a float. None for non-numeric values.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            Value::Char(c) => Some(f64::from(*c)),
            _ => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if this value is a pointer (including null)
    pub fn is_pointer(&self) -> bool {
        matches!(self, Value::Pointer(_) | Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Char(_))
    }

    /// Truthiness: non-zero numbers and live pointers are true.
    pub fn truthy(&self) -> Result<bool, String> {
        match self {
            Value::Int(n) => Ok(*n != 0),
            Value::Char(c) => Ok(*c != 0),
            Value::Float(x) => Ok(*x != 0.0),
            Value::Pointer(_) => Ok(true),
            Value::Null => Ok(false),
            Value::Str(_) => Err("A string cannot be used as a condition".to_string()),
        }
    }

    /// Convert to a value of type `target`, as an explicit cast or a store does.
    ///
    /// Numeric conversions truncate (float → int, toward zero and saturating;
    /// anything → char keeps the low 8 bits). Pointers only convert to pointer
    /// types and keep their target.
    pub fn convert_to(&self, target: Type) -> Result<Value, String> {
        if target.is_void() {
            return Err("Cannot convert a value to 'void'".to_string());
        }

        if target.is_pointer() {
            return match self {
                Value::Pointer(_) | Value::Null => Ok(self.clone()),
                _ => Err(format!(
                    "Cannot convert {} to pointer type '{}'",
                    self.type_name(),
                    target
                )),
            };
        }

        let converted = match (target.base, self) {
            (BaseType::Int, Value::Int(n)) => Value::Int(*n),
            (BaseType::Int, Value::Char(c)) => Value::Int(i64::from(*c)),
            // `as` saturates and maps NaN to 0
            (BaseType::Int, Value::Float(x)) => Value::Int(*x as i64),
            (BaseType::Float, Value::Int(n)) => Value::Float(*n as f64),
            (BaseType::Float, Value::Char(c)) => Value::Float(f64::from(*c)),
            (BaseType::Float, Value::Float(x)) => Value::Float(*x),
            (BaseType::Char, Value::Int(n)) => Value::Char(*n as u8),
            (BaseType::Char, Value::Char(c)) => Value::Char(*c),
            (BaseType::Char, Value::Float(x)) => Value::Char((*x as i64) as u8),
            _ => {
                return Err(format!(
                    "Cannot convert {} to '{}'",
                    self.type_name(),
                    target
                ))
            }
        };
        Ok(converted)
    }

    /// The text `print` writes for this value, without any trailing newline.
    /// None for pointers, which have no printed form.
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            Value::Int(n) => Some(n.to_string()),
            Value::Char(c) => Some(c.to_string()),
            Value::Float(x) => Some(format_float(*x)),
            Value::Str(s) => Some(s.clone()),
            Value::Pointer(_) | Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Pointer(id) => write!(f, "&{}", id),
            Value::Null => f.write_str("NULL"),
            Value::Str(s) => write!(f, "{:?}", s),
            other => f.write_str(&other.canonical_text().unwrap_or_default()),
        }
    }
}

/// Shortest decimal form that reads back as the same double, always with a
/// `.` for finite values: `4.0`, `3.14`, `0.1`.
pub fn format_float(x: f64) -> String {
    if !x.is_finite() {
        return if x.is_nan() {
            "nan".to_string()
        } else if x > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let mut text = x.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Size of a type in bytes: `int` 4, `char` 1, `float` 8, any pointer 8.
pub fn sizeof_type(ty: Type) -> Option<i64> {
    if ty.is_pointer() {
        return Some(8);
    }
    match ty.base {
        BaseType::Int => Some(4),
        BaseType::Char => Some(1),
        BaseType::Float => Some(8),
        BaseType::Void => None,
    }
}
