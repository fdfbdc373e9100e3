//! Canonical source printer
//!
//! Renders an AST back to source text that parses to a structurally equal
//! tree. Binary and conditional expressions are fully parenthesized, so the
//! output never depends on precedence. Statements are indented four spaces
//! per nesting level.

use crate::memory::value::format_float;
use crate::parser::ast::*;

/// Render a whole program, functions separated by a blank line.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    for (i, function) in program.functions.iter().enumerate() {
        if i > 0 {
            printer.output.push('\n');
        }
        printer.function(function);
    }
    printer.output
}

/// Render a single expression.
pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// Render a single statement at the outermost indentation.
pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new();
    printer.stmt(stmt);
    printer.output
}

struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Printer {
            output: String::new(),
            indent: 0,
        }
    }

    fn function(&mut self, function: &Function) {
        let params: Vec<String> = function
            .params
            .iter()
            .map(|p| format!("{} {}", p.param_type, p.name))
            .collect();
        self.output.push_str(&format!(
            "{} {}({}) ",
            function.return_type,
            function.name,
            params.join(", ")
        ));
        self.block(&function.body);
        self.output.push('\n');
    }

    /// Writes `{ ... }` starting at the current position; no trailing newline.
    fn block(&mut self, statements: &[Stmt]) {
        self.output.push_str("{\n");
        self.indent += 1;
        for stmt in statements {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.pad();
        self.output.push('}');
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.pad();
        self.stmt_inline(stmt);
        self.output.push('\n');
    }

    /// Body of `while`/`if`: blocks stay on the header line, anything else
    /// goes on its own indented line.
    fn body(&mut self, stmt: &Stmt) {
        if let StmtKind::Block(statements) = &stmt.kind {
            self.output.push(' ');
            self.block(statements);
        } else {
            self.output.push('\n');
            self.indent += 1;
            self.pad();
            self.stmt_inline(stmt);
            self.indent -= 1;
        }
    }

    fn stmt_inline(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl { ty, name } => {
                self.output.push_str(&format!("{} {};", ty, name));
            }
            StmtKind::Assign { target, value } => {
                match target {
                    LValue::Variable(name) => self.output.push_str(name),
                    LValue::Deref(pointer) => {
                        self.output.push('*');
                        write_expr(&mut self.output, pointer);
                    }
                }
                self.output.push_str(" = ");
                write_expr(&mut self.output, value);
                self.output.push(';');
            }
            StmtKind::Expr(expr) => {
                write_expr(&mut self.output, expr);
                self.output.push(';');
            }
            StmtKind::While { condition, body } => {
                self.output.push_str("while (");
                write_expr(&mut self.output, condition);
                self.output.push(')');
                self.body(body);
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.output.push_str("if (");
                write_expr(&mut self.output, condition);
                self.output.push(')');
                self.body(then_branch);
                if let Some(else_branch) = else_branch {
                    if matches!(then_branch.kind, StmtKind::Block(_)) {
                        self.output.push(' ');
                    } else {
                        self.output.push('\n');
                        self.pad();
                    }
                    self.output.push_str("else");
                    self.body(else_branch);
                }
            }
            StmtKind::Return(None) => self.output.push_str("return;"),
            StmtKind::Return(Some(value)) => {
                self.output.push_str("return ");
                write_expr(&mut self.output, value);
                self.output.push(';');
            }
            StmtKind::Block(statements) => self.block(statements),
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match &expr.kind {
        ExprKind::IntLiteral(n) => out.push_str(&n.to_string()),
        ExprKind::FloatLiteral(x) => out.push_str(&format_float(*x)),
        ExprKind::CharLiteral(c) => {
            out.push('\'');
            push_escaped(out, *c as char, '\'');
            out.push('\'');
        }
        ExprKind::StringLiteral(s) => {
            out.push('"');
            for ch in s.chars() {
                push_escaped(out, ch, '"');
            }
            out.push('"');
        }
        ExprKind::Identifier(name) => out.push_str(name),
        ExprKind::Unary { op, operand } => {
            out.push_str(op.symbol());
            write_expr(out, operand);
        }
        ExprKind::Binary { op, left, right } => {
            out.push('(');
            write_expr(out, left);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            write_expr(out, right);
            out.push(')');
        }
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            out.push('(');
            write_expr(out, condition);
            out.push_str(" ? ");
            write_expr(out, then_expr);
            out.push_str(" : ");
            write_expr(out, else_expr);
            out.push(')');
        }
        ExprKind::Call { name, args } => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push(')');
        }
        ExprKind::Cast { target, operand } => {
            out.push_str(&format!("({}) ", target));
            write_expr(out, operand);
        }
        ExprKind::SizeOf(ty) => out.push_str(&format!("sizeof({})", ty)),
        ExprKind::AddressOf(name) => {
            out.push('&');
            out.push_str(name);
        }
        ExprKind::Deref(pointer) => {
            out.push('*');
            write_expr(out, pointer);
        }
    }
}

fn push_escaped(out: &mut String, ch: char, quote: char) {
    match ch {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\0' => out.push_str("\\0"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse_program().unwrap()
    }

    #[test]
    fn test_function_layout() {
        let program = parse("int add(int a,int b){return a+b*2;}");
        assert_eq!(
            print_program(&program),
            "int add(int a, int b) {\n    return (a + (b * 2));\n}\n"
        );
    }

    #[test]
    fn test_literals_are_escaped() {
        let program = parse(r#"int main() { print("a\"b\\c\n"); print('\''); print(2.50); return 0; }"#);
        let text = print_program(&program);
        assert!(text.contains(r#"print("a\"b\\c\n");"#));
        assert!(text.contains(r#"print('\'');"#));
        assert!(text.contains("print(2.5);"));
    }

    #[test]
    fn test_if_else_and_while_layout() {
        let program = parse(
            "void f(int n) { while (n) n = n - 1; if (n) { return; } else return; }",
        );
        assert_eq!(
            print_program(&program),
            "void f(int n) {\n    while (n)\n        n = (n - 1);\n    if (n) {\n        return;\n    } else\n        return;\n}\n"
        );
    }

    #[test]
    fn test_output_reparses_to_same_tree() {
        let source = "int main() { int* p; int x; p = &x; *p = (int) -3.5 + sizeof(char); \
                      print(x > 0 ? !x : -x); { char c; c = 'A'; } return x; }";
        let program = parse(source);
        let printed = print_program(&program);
        assert_eq!(parse(&printed), program);
    }

    #[test]
    fn test_print_stmt_and_expr() {
        let program = parse("int main() { **pp = a & b; }");
        let stmt = &program.functions[0].body[0];
        assert_eq!(print_stmt(stmt), "**pp = (a & b);\n");
        if let StmtKind::Assign { value, .. } = &stmt.kind {
            assert_eq!(print_expr(value), "(a & b)");
        }
    }
}
