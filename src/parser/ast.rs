// AST (Abstract Syntax Tree) definitions for the interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Base types supported by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Char,
    Float,
    Void,
}

/// Type representation: a base type plus pointer depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub pointer_depth: usize, // 0 = not pointer, 1 = *, 2 = **, etc.
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            pointer_depth: 0,
        }
    }

    pub fn int() -> Self {
        Type::new(BaseType::Int)
    }

    pub fn char() -> Self {
        Type::new(BaseType::Char)
    }

    pub fn float() -> Self {
        Type::new(BaseType::Float)
    }

    pub fn void() -> Self {
        Type::new(BaseType::Void)
    }

    pub fn with_pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// `void` itself; `void*` is an ordinary pointer type.
    pub fn is_void(&self) -> bool {
        self.base == BaseType::Void && self.pointer_depth == 0
    }

    /// The type a pointer of this type points to.
    pub fn pointee(&self) -> Option<Type> {
        if self.pointer_depth == 0 {
            None
        } else {
            Some(Type {
                base: self.base,
                pointer_depth: self.pointer_depth - 1,
            })
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            BaseType::Int => "int",
            BaseType::Char => "char",
            BaseType::Float => "float",
            BaseType::Void => "void",
        };
        f.write_str(base)?;
        for _ in 0..self.pointer_depth {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    BitShl,
    BitShr,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitShl => "<<",
            BinOp::BitShr => ">>",
        }
    }
}

/// Unary operators that produce a fresh value from one operand.
///
/// Address-of and dereference are separate expression kinds because they
/// work on storage rather than values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// An expression together with where it starts in the source.
///
/// Equality is structural: two expressions are equal when their kinds are,
/// wherever they were parsed from.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: SourceLocation,
}

impl Expr {
    pub fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Expr { kind, location }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(u8),
    StringLiteral(String),
    Identifier(String),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Cast {
        target: Type,
        operand: Box<Expr>,
    },
    SizeOf(Type),
    AddressOf(String),
    Deref(Box<Expr>),
}

/// Assignment targets
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Variable(String),
    Deref(Expr),
}

/// A statement together with where it starts in the source.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: SourceLocation,
}

impl Stmt {
    pub fn new(kind: StmtKind, location: SourceLocation) -> Self {
        Stmt { kind, location }
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    VarDecl {
        ty: Type,
        name: String,
    },
    Assign {
        target: LValue,
        value: Expr,
    },
    Expr(Expr),
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Return(Option<Expr>),
    Block(Vec<Stmt>),
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
}

/// A function definition
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && self.return_type == other.return_type
            && self.body == other.body
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>, // In source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
