// AST (Abstract Syntax Tree) definitions for the eud front end

use crate::parser::lexer::Token;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Source location information for error reporting
///
/// Rows and columns are 1-based. The source name is shared between every
/// location produced from the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "Position")]
pub struct SourceLocation {
    pub row: usize,
    pub col: usize,
    #[serde(rename = "filename")]
    pub source_name: Arc<str>,
}

impl SourceLocation {
    pub fn new(row: usize, col: usize, source_name: impl Into<Arc<str>>) -> Self {
        Self {
            row,
            col,
            source_name: source_name.into(),
        }
    }

    /// Location of the first character of a source.
    pub fn start(source_name: impl Into<Arc<str>>) -> Self {
        Self::new(1, 1, source_name)
    }

    /// Step over `ch`.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:", self.source_name, self.row, self.col)
    }
}

/// A fixed-width type keyword (`i32`, `u8`, `usize`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub token: Token,
}

impl TypeNode {
    pub fn location(&self) -> &SourceLocation {
        &self.token.location
    }

    pub fn name(&self) -> &str {
        &self.token.text
    }
}

/// `name: type`, used for function parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDecl {
    pub target: Token,
    pub value_type: TypeNode,
}

impl TypedDecl {
    pub fn location(&self) -> &SourceLocation {
        &self.target.location
    }
}

/// Binary operators, one per precedence level of the expression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    // Comparison
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Ne,
}

impl BinOp {
    /// Name of the node this operator builds, as used in dumps.
    pub fn node_name(self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
            BinOp::Mod => "Mod",
            BinOp::Exp => "Exp",
            BinOp::Lt => "LessThan",
            BinOp::Lte => "LessThanOrEqual",
            BinOp::Gt => "GreaterThan",
            BinOp::Gte => "GreaterThanOrEqual",
            BinOp::Eq => "Equal",
            BinOp::Ne => "NotEqual",
        }
    }
}

/// Expression nodes
///
/// Expressions do not store a location of their own: every variant starts
/// with a token or a sub-expression, and [`Expr::location`] reads it from
/// there.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assign {
        target: Token,
        value: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    FuncCall {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    Int {
        token: Token,
    },
    Var {
        token: Token,
    },
}

impl Expr {
    /// Get the source location of the leftmost token of this expression
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::Assign { target, .. } => &target.location,
            Expr::Binary { left, .. } => left.location(),
            Expr::FuncCall { target, .. } => target.location(),
            Expr::Int { token } | Expr::Var { token } => &token.location,
        }
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FuncDef {
        target: Token,
        return_type: TypeNode,
        params: Vec<TypedDecl>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    VarDecl {
        target: Token,
        value_type: TypeNode,
        location: SourceLocation,
    },
    VarInit {
        target: Token,
        value_type: TypeNode,
        value: Expr,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    IfElse {
        condition: Expr,
        truthy: Vec<Stmt>,
        falsy: Vec<Stmt>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Expr(Expr),
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::FuncDef { location, .. } => location,
            Stmt::VarDecl { location, .. } => location,
            Stmt::VarInit { location, .. } => location,
            Stmt::Return { location, .. } => location,
            Stmt::If { location, .. } => location,
            Stmt::IfElse { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::Expr(expr) => expr.location(),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Program {
    pub statements: Vec<Stmt>, // Declaration/execution order
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// Compact tree form: `Sub(Int(1), Sub(Int(2), Int(3)))`

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.token.text)
    }
}

impl fmt::Display for TypedDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedDecl({}, {})", self.target.text, self.value_type)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Assign { target, value } => write!(f, "Assign({}, {})", target.text, value),
            Expr::Binary { op, left, right } => {
                write!(f, "{}({}, {})", op.node_name(), left, right)
            }
            Expr::FuncCall { target, args } => {
                write!(f, "FuncCall({}, ", target)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expr::Int { token } => write!(f, "Int({})", token.text),
            Expr::Var { token } => write!(f, "Var({})", token.text),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::FuncDef {
                target,
                return_type,
                params,
                body,
                ..
            } => {
                write!(f, "FuncDef({}, {}, ", target.text, return_type)?;
                write_list(f, params)?;
                write!(f, ", ")?;
                write_list(f, body)?;
                write!(f, ")")
            }
            Stmt::VarDecl {
                target, value_type, ..
            } => write!(f, "VarDecl({}, {})", target.text, value_type),
            Stmt::VarInit {
                target,
                value_type,
                value,
                ..
            } => write!(f, "VarInit({}, {}, {})", target.text, value_type, value),
            Stmt::Return { value, .. } => write!(f, "Return({})", value),
            Stmt::If {
                condition, body, ..
            } => {
                write!(f, "If({}, ", condition)?;
                write_list(f, body)?;
                write!(f, ")")
            }
            Stmt::IfElse {
                condition,
                truthy,
                falsy,
                ..
            } => {
                write!(f, "IfElse({}, ", condition)?;
                write_list(f, truthy)?;
                write!(f, ", ")?;
                write_list(f, falsy)?;
                write!(f, ")")
            }
            Stmt::While {
                condition, body, ..
            } => {
                write!(f, "While({}, ", condition)?;
                write_list(f, body)?;
                write!(f, ")")
            }
            Stmt::Expr(expr) => write!(f, "{}", expr),
        }
    }
}
