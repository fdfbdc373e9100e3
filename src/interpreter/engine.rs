// Execution engine for the interpreter

use crate::config::RunConfig;
use crate::interpreter::errors::{RuntimeError, SymbolKind};
use crate::interpreter::output::PrintSink;
use crate::memory::stack::Stack;
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::parser::FunctionTable;
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};
use std::rc::Rc;
use tracing::debug;

/// How a statement finished
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlFlow {
    Normal,
    /// A `return` is unwinding to the enclosing call
    Return {
        value: Option<Value>,
        location: SourceLocation,
    },
}

/// The main interpreter that executes a program
pub struct Interpreter<'a> {
    /// Function definitions (name -> Function)
    functions: Rc<FunctionTable>,

    pub(crate) config: RunConfig,

    /// Call stack and every live variable
    pub(crate) stack: Stack,

    /// Where `print` output goes
    pub(crate) sink: Box<dyn PrintSink + 'a>,
}

impl<'a> Interpreter<'a> {
    /// Create a new interpreter for a parsed program
    pub fn new(functions: FunctionTable, config: RunConfig, sink: impl PrintSink + 'a) -> Self {
        Interpreter {
            functions: Rc::new(functions),
            config,
            stack: Stack::new(),
            sink: Box::new(sink),
        }
    }

    /// Run the program from start to finish, returning `main`'s result
    pub fn run(&mut self) -> Result<i64, RuntimeError> {
        let main = self
            .functions
            .get("main")
            .ok_or(RuntimeError::NoMainFunction)?;
        let location = main.location;
        debug!("starting main");

        let result = self.call_function("main", Vec::new());
        self.sink.flush();

        match result? {
            Some(value) => value.as_int().ok_or_else(|| {
                RuntimeError::type_mismatch(
                    format!("main must return an integer, got {}", value.type_name()),
                    location,
                )
            }),
            None => Err(RuntimeError::type_mismatch(
                "main must return an integer, but it is declared 'void'",
                location,
            )),
        }
    }

    /// Call a user function with already-evaluated arguments.
    ///
    /// Returns the converted return value, or `None` for a `void` function.
    pub fn call_function(
        &mut self,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Option<Value>, RuntimeError> {
        let location = self
            .functions
            .get(name)
            .map(|f| f.location)
            .unwrap_or_default();
        self.call_user_function(name, args, location)
    }

    /// Enter a function: check arity and depth, bind parameters in a fresh
    /// frame, run the body, and convert what it returns.
    pub(crate) fn call_user_function(
        &mut self,
        name: &str,
        args: Vec<Value>,
        call_location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.call_user_function_inner(name, args, call_location)
        })
    }

    fn call_user_function_inner(
        &mut self,
        name: &str,
        args: Vec<Value>,
        call_location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        let functions = Rc::clone(&self.functions);
        let function = functions
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedSymbol {
                kind: SymbolKind::Function,
                name: name.to_string(),
                location: call_location,
            })?;

        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: name.to_string(),
                expected: function.params.len(),
                got: args.len(),
                location: call_location,
            });
        }

        if self.stack.depth() >= self.config.max_call_depth {
            return Err(RuntimeError::ResourceExhausted {
                limit: self.config.max_call_depth,
                location: call_location,
            });
        }

        debug!(function = name, depth = self.stack.depth() + 1, "enter");
        self.stack.push_frame(name);
        let result = self.run_function_body(function, args);
        self.stack.pop_frame();
        debug!(function = name, "exit");

        result
    }

    fn run_function_body(
        &mut self,
        function: &Function,
        args: Vec<Value>,
    ) -> Result<Option<Value>, RuntimeError> {
        for (param, arg) in function.params.iter().zip(args) {
            let id = self
                .stack
                .declare(&param.name, param.param_type)
                .map_err(|_| RuntimeError::Redeclaration {
                    name: param.name.clone(),
                    location: function.location,
                })?;
            self.store(id, arg, function.location)?;
        }

        // The body shares the parameters' scope
        let mut flow = ControlFlow::Normal;
        for stmt in &function.body {
            flow = self.execute_statement(stmt)?;
            if flow != ControlFlow::Normal {
                break;
            }
        }

        let returns_void = function.return_type.is_void();
        match flow {
            ControlFlow::Normal if returns_void => Ok(None),
            ControlFlow::Normal => Err(RuntimeError::MissingReturn {
                function: function.name.clone(),
                location: function.location,
            }),
            ControlFlow::Return { value: None, .. } if returns_void => Ok(None),
            ControlFlow::Return {
                value: None,
                location,
            } => Err(RuntimeError::MissingReturn {
                function: function.name.clone(),
                location,
            }),
            ControlFlow::Return {
                value: Some(_),
                location,
            } if returns_void => Err(RuntimeError::type_mismatch(
                format!("void function '{}' cannot return a value", function.name),
                location,
            )),
            ControlFlow::Return {
                value: Some(value),
                location,
            } => value
                .convert_to(function.return_type)
                .map(Some)
                .map_err(|message| RuntimeError::type_mismatch(message, location)),
        }
    }

    /// Read access to the functions this interpreter runs
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Current call depth (0 when not running)
    pub fn call_depth(&self) -> usize {
        self.stack.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn table(source: &str) -> FunctionTable {
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        FunctionTable::from_program(program).unwrap()
    }

    #[test]
    fn test_run_returns_main_value() {
        let mut interp = Interpreter::new(
            table("int main() { return 7; }"),
            RunConfig::default(),
            |_: &str| {},
        );
        assert_eq!(interp.run(), Ok(7));
        assert_eq!(interp.call_depth(), 0);
    }

    #[test]
    fn test_missing_main() {
        let mut interp = Interpreter::new(
            table("int f() { return 1; }"),
            RunConfig::default(),
            |_: &str| {},
        );
        assert_eq!(interp.run(), Err(RuntimeError::NoMainFunction));
    }

    #[test]
    fn test_call_function_directly() {
        let mut interp = Interpreter::new(
            table("int sum(int a, int b) { return a + b; } int main() { return 0; }"),
            RunConfig::default(),
            |_: &str| {},
        );
        assert_eq!(
            interp.call_function("sum", vec![Value::Int(7), Value::Int(5)]),
            Ok(Some(Value::Int(12)))
        );
        assert!(matches!(
            interp.call_function("sum", vec![Value::Int(1)]),
            Err(RuntimeError::ArgumentCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_return_value_converted_to_declared_type() {
        let mut interp = Interpreter::new(
            table("char c() { return 321; } float f() { return 2; } int main() { return 0; }"),
            RunConfig::default(),
            |_: &str| {},
        );
        assert_eq!(interp.call_function("c", vec![]), Ok(Some(Value::Char(65))));
        assert_eq!(interp.call_function("f", vec![]), Ok(Some(Value::Float(2.0))));
    }

    #[test]
    fn test_void_function_returns_none() {
        let mut interp = Interpreter::new(
            table("void f() { return; } void g() { } int main() { return 0; }"),
            RunConfig::default(),
            |_: &str| {},
        );
        assert_eq!(interp.call_function("f", vec![]), Ok(None));
        assert_eq!(interp.call_function("g", vec![]), Ok(None));
    }
}
