use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, SourceLocation};

impl Interpreter<'_> {
    /// Evaluate the returned expression and start unwinding. Whether a value
    /// was allowed is decided by the call that receives it.
    pub(crate) fn execute_return(
        &mut self,
        expr: Option<&Expr>,
        location: SourceLocation,
    ) -> Result<ControlFlow, RuntimeError> {
        let value = match expr {
            Some(expr) => Some(self.evaluate_expr(expr)?),
            None => None,
        };

        Ok(ControlFlow::Return { value, location })
    }
}
