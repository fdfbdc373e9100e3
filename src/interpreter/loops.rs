//! Loop statement execution (`while`).
//!
//! The condition is evaluated before every iteration. A body that is a block
//! gets a fresh scope per iteration, so its variables start from zero each
//! time round and their slots are reused. A `return` inside the body stops the
//! loop and is handed back to the caller unchanged.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, Stmt};

impl Interpreter<'_> {
    /// Executes a `while (condition) body` loop.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expr,
        body: &Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        while self.evaluate_condition(condition)? {
            match self.execute_statement(body)? {
                ControlFlow::Normal => {}
                flow @ ControlFlow::Return { .. } => return Ok(flow),
            }
        }

        Ok(ControlFlow::Normal)
    }
}
