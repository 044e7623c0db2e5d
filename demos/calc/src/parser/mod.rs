//! Recursive-descent parser for one calculator line.
//!
//! ```text
//! line           ::= assignment | expression
//! assignment     ::= identifier '=' expression
//! expression     ::= additive
//! additive       ::= multiplicative (('+' | '-') multiplicative)*
//! multiplicative ::= prefix (('*' | '/' | '%') prefix)*
//! prefix         ::= ('+' | '-')* power
//! power          ::= primary ['**' prefix]
//! primary        ::= integer | identifier | builtin '(' [arguments] ')'
//!                  | '(' expression ')'
//! arguments      ::= expression (',' expression)*
//! ```
//!
//! Every failure is reported through the diagnostic facade before `None`
//! is returned, so callers only need to check the error count.

use glossa_diagnostic::error;
use glossa_ir::{Span, StringInterner, Token, TokenKind, TokenKindRegistry, TokenStream};
use glossa_syntax::{
    as_integer, attempt, expect_if, expect_token, match_if, match_token, next_token_in_range,
    next_token_kind, parse_enclosed, parse_left_binary_term, parse_list, parse_prefix_term,
    Enclosed,
};

use crate::ast::{BinaryOp, Builtin, Expr, ExprKind, Stmt, UnaryOp};
use crate::tokens;

pub struct Parser<'a> {
    registry: &'a TokenKindRegistry,
    interner: &'a StringInterner,
}

impl<'a> Parser<'a> {
    pub fn new(registry: &'a TokenKindRegistry, interner: &'a StringInterner) -> Self {
        Parser { registry, interner }
    }

    /// Parse a whole line. Trailing tokens are an error.
    pub fn parse_line(&self, stream: &mut TokenStream<'_>) -> Option<Stmt> {
        let stmt = match self.assignment_target(stream) {
            Some(target) => {
                let value = self.expression(stream)?;
                Stmt::Assign {
                    name: target.symbol(),
                    span: target.span().merge(value.span),
                    value,
                }
            }
            None => Stmt::Expr(self.expression(stream)?),
        };
        if !stream.eof() {
            let next = stream.peek();
            error(
                next.span(),
                format!("expected end of line but got '{}'", next.text(self.interner)),
            );
            return None;
        }
        Some(stmt)
    }

    /// `identifier '='`, tried speculatively so `x + 1` falls through to
    /// the expression grammar without a stray "expected '='".
    fn assignment_target<'t>(&self, stream: &mut TokenStream<'t>) -> Option<&'t Token> {
        attempt(stream, |s| {
            let target = match_token(s, TokenKind::IDENTIFIER)?;
            expect_token(s, TokenKind::EQUAL, self.registry, self.interner)?;
            Some(target)
        })
    }

    pub fn expression(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        self.additive(stream)
    }

    fn additive(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        parse_left_binary_term(
            stream,
            self.interner,
            "multiplicative-expression",
            additive_operator,
            |s| self.multiplicative(s),
            binary,
        )
    }

    fn multiplicative(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        parse_left_binary_term(
            stream,
            self.interner,
            "prefix-expression",
            multiplicative_operator,
            |s| self.prefix(s),
            binary,
        )
    }

    fn prefix(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        parse_prefix_term(
            stream,
            self.interner,
            "power-expression",
            prefix_operator,
            |s| self.power(s),
            |(op, span), operand| {
                let span = span.merge(operand.span);
                Expr::new(ExprKind::Unary(op, Box::new(operand)), span)
            },
        )
    }

    /// Right associative, binding tighter than prefix operators on its
    /// left: `-2 ** 2` is `-(2 ** 2)`.
    fn power(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        let base = self.primary(stream)?;
        if match_token(stream, tokens::STAR_STAR).is_none() {
            return Some(base);
        }
        let exponent = self.prefix(stream)?;
        Some(binary(BinaryOp::Pow, base, exponent))
    }

    fn primary(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        let kind = next_token_kind(stream);
        if kind.is_integer() {
            let token = stream.get();
            let value = as_integer(token, self.interner)?;
            return Some(Expr::new(ExprKind::Int(value), token.span()));
        }
        if let Some(token) = match_token(stream, TokenKind::IDENTIFIER) {
            return Some(Expr::new(ExprKind::Var(token.symbol()), token.span()));
        }
        if tokens::is_builtin_function(kind) {
            return self.call(stream);
        }
        if kind == TokenKind::LPAREN {
            let group = self.parenthesized(stream, |s| self.expression(s))?;
            let Some(expr) = group.inner else {
                error(
                    group.close.span(),
                    "expected 'primary-expression' but got ')'",
                );
                return None;
            };
            return Some(expr);
        }
        // Never matches; only reports.
        expect_if(stream, |_| false, "primary-expression", self.interner);
        None
    }

    fn call(&self, stream: &mut TokenStream<'_>) -> Option<Expr> {
        let name = stream.get();
        let builtin = match name.kind() {
            tokens::KW_ABS => Builtin::Abs,
            tokens::KW_MIN => Builtin::Min,
            _ => Builtin::Max,
        };
        let args = self.parenthesized(stream, |s| {
            parse_list(s, TokenKind::COMMA, self.interner, "argument", |arg| {
                self.expression(arg)
            })
        })?;
        let span = name.span().merge(args.span());
        Some(Expr::new(
            ExprKind::Call(builtin, args.inner.unwrap_or_default()),
            span,
        ))
    }

    fn parenthesized<'t, T>(
        &self,
        stream: &mut TokenStream<'t>,
        inner: impl FnOnce(&mut TokenStream<'t>) -> Option<T>,
    ) -> Option<Enclosed<'t, T>> {
        parse_enclosed(
            stream,
            (TokenKind::LPAREN, TokenKind::RPAREN),
            self.registry,
            self.interner,
            "expression",
            inner,
        )
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.merge(rhs.span);
    Expr::new(ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)), span)
}

fn additive_operator(stream: &mut TokenStream<'_>) -> Option<BinaryOp> {
    if !next_token_in_range(stream, TokenKind::PLUS, TokenKind::MINUS) {
        return None;
    }
    match stream.get().kind() {
        TokenKind::PLUS => Some(BinaryOp::Add),
        _ => Some(BinaryOp::Sub),
    }
}

fn multiplicative_operator(stream: &mut TokenStream<'_>) -> Option<BinaryOp> {
    if !next_token_in_range(stream, TokenKind::STAR, TokenKind::PERCENT) {
        return None;
    }
    match stream.get().kind() {
        TokenKind::STAR => Some(BinaryOp::Mul),
        TokenKind::SLASH => Some(BinaryOp::Div),
        _ => Some(BinaryOp::Mod),
    }
}

fn prefix_operator(stream: &mut TokenStream<'_>) -> Option<(UnaryOp, Span)> {
    let token = match_if(stream, |t| {
        matches!(t.kind(), TokenKind::PLUS | TokenKind::MINUS)
    })?;
    let op = if token.kind() == TokenKind::PLUS {
        UnaryOp::Pos
    } else {
        UnaryOp::Neg
    };
    Some((op, token.span()))
}
