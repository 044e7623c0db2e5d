//! Calculator syntax tree.

use std::fmt;

use glossa_ir::{Name, Span, StringLookup};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnaryOp {
    Pos,
    Neg,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Builtin {
    Abs,
    Min,
    Max,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Min => "min",
            Builtin::Max => "max",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Int(u64),
    Var(Name),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Builtin, Vec<Expr>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Fully parenthesized rendering, e.g. `(1 + (2 * x))`.
    pub fn display<'a, L: StringLookup + ?Sized>(&'a self, interner: &'a L) -> ExprDisplay<'a, L> {
        ExprDisplay {
            expr: self,
            interner,
        }
    }
}

/// One input line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Stmt {
    /// `name = expr`
    Assign { name: Name, span: Span, value: Expr },
    Expr(Expr),
}

pub struct ExprDisplay<'a, L: ?Sized> {
    expr: &'a Expr,
    interner: &'a L,
}

impl<'a, L: ?Sized> ExprDisplay<'a, L> {
    fn sub(&self, expr: &'a Expr) -> Self {
        ExprDisplay {
            expr,
            interner: self.interner,
        }
    }
}

impl<L: StringLookup + ?Sized> fmt::Display for ExprDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = self.expr;
        match &expr.kind {
            ExprKind::Int(value) => write!(f, "{value}"),
            ExprKind::Var(name) => f.write_str(self.interner.lookup(*name)),
            ExprKind::Unary(op, operand) => {
                let op = match op {
                    UnaryOp::Pos => "+",
                    UnaryOp::Neg => "-",
                };
                write!(f, "{op}{}", self.sub(operand))
            }
            ExprKind::Binary(op, lhs, rhs) => {
                write!(f, "({} {} {})", self.sub(lhs), op.symbol(), self.sub(rhs))
            }
            ExprKind::Call(builtin, args) => {
                write!(f, "{}(", builtin.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.sub(arg))?;
                }
                f.write_str(")")
            }
        }
    }
}
