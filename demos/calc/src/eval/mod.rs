//! Expression evaluation over signed 64-bit integers.
//!
//! Runtime failures (division by zero, overflow, unknown variables) are
//! reported at the span of the failing expression and produce `None`.

use glossa_diagnostic::error;
use glossa_ir::{Name, StringLookup};
use rustc_hash::FxHashMap;

use crate::ast::{BinaryOp, Builtin, Expr, ExprKind, UnaryOp};

/// Variables assigned so far in a session.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: FxHashMap<Name, i64>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: Name) -> Option<i64> {
        self.vars.get(&name).copied()
    }

    pub fn set(&mut self, name: Name, value: i64) {
        self.vars.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

pub struct Evaluator<'a, L: ?Sized> {
    env: &'a Env,
    interner: &'a L,
}

impl<'a, L: StringLookup + ?Sized> Evaluator<'a, L> {
    pub fn new(env: &'a Env, interner: &'a L) -> Self {
        Evaluator { env, interner }
    }

    pub fn eval(&self, expr: &Expr) -> Option<i64> {
        match &expr.kind {
            ExprKind::Int(value) => {
                let value = i64::try_from(*value).ok();
                if value.is_none() {
                    error(expr.span, "integer literal does not fit in a signed 64-bit value");
                }
                value
            }
            ExprKind::Var(name) => {
                let value = self.env.get(*name);
                if value.is_none() {
                    error(
                        expr.span,
                        format!("unknown variable '{}'", self.interner.lookup(*name)),
                    );
                }
                value
            }
            ExprKind::Unary(op, operand) => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Pos => Some(value),
                    UnaryOp::Neg => checked(expr, "-", value.checked_neg()),
                }
            }
            ExprKind::Binary(op, lhs, rhs) => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                binary(expr, *op, lhs, rhs)
            }
            ExprKind::Call(builtin, args) => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Option<Vec<_>>>()?;
                call(expr, *builtin, &values)
            }
        }
    }
}

fn checked(expr: &Expr, op: &str, result: Option<i64>) -> Option<i64> {
    if result.is_none() {
        error(expr.span, format!("arithmetic overflow in '{op}'"));
    }
    result
}

fn binary(expr: &Expr, op: BinaryOp, lhs: i64, rhs: i64) -> Option<i64> {
    if rhs == 0 && matches!(op, BinaryOp::Div | BinaryOp::Mod) {
        error(expr.span, "division by zero");
        return None;
    }
    let result = match op {
        BinaryOp::Add => lhs.checked_add(rhs),
        BinaryOp::Sub => lhs.checked_sub(rhs),
        BinaryOp::Mul => lhs.checked_mul(rhs),
        BinaryOp::Div => lhs.checked_div(rhs),
        BinaryOp::Mod => lhs.checked_rem(rhs),
        BinaryOp::Pow => {
            if rhs < 0 {
                error(expr.span, format!("negative exponent {rhs}"));
                return None;
            }
            u32::try_from(rhs).ok().and_then(|exp| lhs.checked_pow(exp))
        }
    };
    checked(expr, op.symbol(), result)
}

fn call(expr: &Expr, builtin: Builtin, args: &[i64]) -> Option<i64> {
    match (builtin, args) {
        (Builtin::Abs, &[value]) => checked(expr, "abs", value.checked_abs()),
        (Builtin::Abs, _) => {
            error(
                expr.span,
                format!("abs takes 1 argument but got {}", args.len()),
            );
            None
        }
        (Builtin::Min | Builtin::Max, []) => {
            error(
                expr.span,
                format!("{} needs at least 1 argument", builtin.name()),
            );
            None
        }
        (Builtin::Min, _) => args.iter().copied().min(),
        (Builtin::Max, _) => args.iter().copied().max(),
    }
}
