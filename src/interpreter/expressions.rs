//! Expression evaluation implementation
//!
//! This module handles evaluation of all expression types, including:
//!
//! - Literals (integers, floats, characters, strings)
//! - Variables and identifiers
//! - Binary and unary operators (delegated to `ops`)
//! - The conditional operator, which evaluates exactly one branch
//! - Address-of and dereference
//! - Function calls, including the `print` builtin
//! - Type casts and `sizeof`

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::arena::SlotId;
use crate::memory::{sizeof_type, value::Value};
use crate::parser::ast::*;
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};

impl Interpreter<'_> {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.evaluate_expr_inner(expr))
    }

    fn evaluate_expr_inner(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        let location = expr.location;

        match &expr.kind {
            ExprKind::IntLiteral(n) => Ok(Value::Int(*n)),
            ExprKind::FloatLiteral(x) => Ok(Value::Float(*x)),
            ExprKind::CharLiteral(c) => Ok(Value::Char(*c)),
            ExprKind::StringLiteral(s) => Ok(Value::Str(s.clone())),

            ExprKind::Identifier(name) => {
                let id = self.lookup_variable(name, location)?;
                self.read_slot(id, location)
            }

            ExprKind::Unary { op, operand } => self.evaluate_unary_op(*op, operand, location),

            ExprKind::Binary { op, left, right } => {
                self.evaluate_binary_op(*op, left, right, location)
            }

            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                if self.evaluate_condition(condition)? {
                    self.evaluate_expr(then_expr)
                } else {
                    self.evaluate_expr(else_expr)
                }
            }

            ExprKind::Call { name, args } => self
                .evaluate_call(name, args, location)?
                .ok_or_else(|| {
                    RuntimeError::type_mismatch(
                        format!("'{}' does not return a value", name),
                        location,
                    )
                }),

            ExprKind::Cast { target, operand } => self.evaluate_cast(*target, operand, location),

            ExprKind::SizeOf(ty) => sizeof_type(*ty).map(Value::Int).ok_or_else(|| {
                RuntimeError::type_mismatch(format!("'{}' has no size", ty), location)
            }),

            ExprKind::AddressOf(name) => {
                let id = self.lookup_variable(name, location)?;
                Ok(Value::Pointer(id))
            }

            ExprKind::Deref(pointer) => {
                let pointer_value = self.evaluate_expr(pointer)?;
                let id = self.pointer_target(&pointer_value, location)?;
                self.read_slot(id, location)
            }
        }
    }

    /// Evaluate a call. `print` is handled here, before any table lookup.
    /// Arguments are evaluated left to right in the caller's frame.
    pub(crate) fn evaluate_call(
        &mut self,
        name: &str,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        if name == "print" {
            self.builtin_print(args, location)?;
            return Ok(None);
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate_expr(arg)?);
        }

        self.call_user_function(name, values, location)
    }

    /// Evaluate a condition with C truthiness
    pub(crate) fn evaluate_condition(&mut self, condition: &Expr) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(condition)?;
        value
            .truthy()
            .map_err(|message| RuntimeError::type_mismatch(message, condition.location))
    }

    /// The live slot a pointer value refers to
    pub(crate) fn pointer_target(
        &self,
        value: &Value,
        location: SourceLocation,
    ) -> Result<SlotId, RuntimeError> {
        match value {
            Value::Pointer(id) if self.stack.slot(*id).is_some() => Ok(*id),
            Value::Pointer(_) => Err(RuntimeError::DanglingPointer { location }),
            Value::Null => Err(RuntimeError::NullDereference { location }),
            other => Err(RuntimeError::type_mismatch(
                format!("Cannot dereference a value of type {}", other.type_name()),
                location,
            )),
        }
    }

    fn read_slot(&self, id: SlotId, location: SourceLocation) -> Result<Value, RuntimeError> {
        self.stack
            .read(id)
            .cloned()
            .ok_or(RuntimeError::DanglingPointer { location })
    }
}
