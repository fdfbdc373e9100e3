//! Statement execution implementation
//!
//! This module handles the execution of statement types:
//!
//! - Variable declarations
//! - Assignments to variables and through pointers
//! - `if`/`else`
//! - Blocks, which open a scope
//! - Expression statements
//!
//! `while` lives in `loops` and `return` in `jumps`.
//!
//! # Implementation
//!
//! All statement execution methods are implemented as `pub(crate)` methods
//! on the [`Interpreter`] struct. Each returns a [`ControlFlow`] so a `return`
//! deep inside nested blocks and loops unwinds to the enclosing call.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::{RuntimeError, SymbolKind};
use crate::memory::arena::SlotId;
use crate::memory::stack::StackError;
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};
use tracing::{debug, trace};

impl Interpreter<'_> {
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.execute_statement_inner(stmt)
        })
    }

    fn execute_statement_inner(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        trace!(line = stmt.location.line, column = stmt.location.column, "statement");

        match &stmt.kind {
            StmtKind::VarDecl { ty, name } => {
                self.execute_var_decl(name, *ty, stmt.location)?;
                Ok(ControlFlow::Normal)
            }
            StmtKind::Assign { target, value } => {
                self.execute_assignment(target, value, stmt.location)?;
                Ok(ControlFlow::Normal)
            }
            StmtKind::Expr(expr) => {
                // A call may be to a void function; its missing value is fine here
                if let ExprKind::Call { name, args } = &expr.kind {
                    self.evaluate_call(name, args, expr.location)?;
                } else {
                    self.evaluate_expr(expr)?;
                }
                Ok(ControlFlow::Normal)
            }
            StmtKind::While { condition, body } => self.execute_while(condition, body),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.execute_if(condition, then_branch, else_branch.as_deref()),
            StmtKind::Return(value) => self.execute_return(value.as_ref(), stmt.location),
            StmtKind::Block(statements) => self.execute_block(statements),
        }
    }

    /// Run `statements` in a new scope. The scope is closed on every exit,
    /// errors included.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        self.stack.push_scope();
        debug!(depth = self.scope_depth(), "enter scope");

        let mut result = Ok(ControlFlow::Normal);
        for stmt in statements {
            result = self.execute_statement(stmt);
            if !matches!(result, Ok(ControlFlow::Normal)) {
                break;
            }
        }

        self.stack.pop_scope();
        debug!(depth = self.scope_depth(), "exit scope");
        result
    }

    fn scope_depth(&self) -> usize {
        self.stack
            .current_frame()
            .map(|frame| frame.scope_depth())
            .unwrap_or(0)
    }

    pub(crate) fn execute_var_decl(
        &mut self,
        name: &str,
        ty: Type,
        location: SourceLocation,
    ) -> Result<SlotId, RuntimeError> {
        self.stack.declare(name, ty).map_err(|err| match err {
            StackError::AlreadyDeclared(name) | StackError::NoScope(name) => {
                RuntimeError::Redeclaration { name, location }
            }
        })
    }

    fn execute_assignment(
        &mut self,
        target: &LValue,
        value: &Expr,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let id = self.resolve_lvalue(target, location)?;
        let value = self.evaluate_expr(value)?;
        self.store(id, value, location)
    }

    /// The slot an assignment writes to
    fn resolve_lvalue(&mut self, target: &LValue, location: SourceLocation) -> Result<SlotId, RuntimeError> {
        match target {
            LValue::Variable(name) => self.lookup_variable(name, location),
            LValue::Deref(pointer) => {
                let pointer_value = self.evaluate_expr(pointer)?;
                self.pointer_target(&pointer_value, pointer.location)
            }
        }
    }

    pub(crate) fn lookup_variable(&self, name: &str, location: SourceLocation) -> Result<SlotId, RuntimeError> {
        self.stack
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedSymbol {
                kind: SymbolKind::Variable,
                name: name.to_string(),
                location,
            })
    }

    /// Write `value` into a slot, converted to the slot's declared type
    pub(crate) fn store(
        &mut self,
        id: SlotId,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let slot = self
            .stack
            .slot_mut(id)
            .ok_or(RuntimeError::DanglingPointer { location })?;
        let converted = value.convert_to(slot.ty).map_err(|message| {
            RuntimeError::type_mismatch(format!("{} (assigning to '{}')", message, slot.name), location)
        })?;
        slot.value = converted;
        Ok(())
    }

    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> Result<ControlFlow, RuntimeError> {
        if self.evaluate_condition(condition)? {
            self.execute_statement(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.execute_statement(else_branch)
        } else {
            Ok(ControlFlow::Normal)
        }
    }
}
