//! Reusable grammar shapes.
//!
//! Each combinator takes the grammar's own rules as closures and builds
//! results through caller-supplied constructors, so the same shapes serve
//! any AST. Rules report their own failures; when a rule fails *without*
//! reporting anything, the combinator reports `expected '<what>'` at the
//! point where the rule was tried.
//!
//! ```text
//! enclosed         ::= open [rule] close
//! prefix-term      ::= op prefix-term | rule
//! left-binary-term ::= rule (op rule)*
//! list             ::= rule (separator rule)*
//! sequence         ::= rule*            (until end of stream)
//! ```

use glossa_diagnostic::ErrorCountGuard;
use glossa_ir::{Span, StringLookup, Token, TokenKind, TokenKindRegistry, TokenStream};

use crate::{expect_if, expect_token, match_token};

/// Result of [`parse_enclosed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enclosed<'a, T> {
    pub open: &'a Token,
    pub close: &'a Token,
    /// `None` for an empty enclosure such as `()`.
    pub inner: Option<T>,
}

impl<T> Enclosed<'_, T> {
    /// From the opening token through the closing one.
    pub fn span(&self) -> Span {
        self.open.span().merge(self.close.span())
    }
}

/// Report `expected '<what>'` at the current token unless `guard` saw an
/// error since it was taken.
fn expected_unless_reported<L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'_>,
    guard: &ErrorCountGuard,
    what: &str,
    interner: &L,
) {
    if guard.is_ok() {
        expect_if(stream, |_| false, what, interner);
    }
}

/// `open [inner] close`.
///
/// An immediately following `close` yields an empty enclosure without
/// running `inner`.
pub fn parse_enclosed<'a, T, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    (open, close): (TokenKind, TokenKind),
    registry: &TokenKindRegistry,
    interner: &L,
    what: &str,
    inner: impl FnOnce(&mut TokenStream<'a>) -> Option<T>,
) -> Option<Enclosed<'a, T>> {
    let open = expect_token(stream, open, registry, interner)?;
    if let Some(close) = match_token(stream, close) {
        return Some(Enclosed {
            open,
            close,
            inner: None,
        });
    }

    let guard = ErrorCountGuard::new();
    let Some(value) = inner(stream) else {
        expected_unless_reported(stream, &guard, what, interner);
        return None;
    };
    let close = expect_token(stream, close, registry, interner)?;
    Some(Enclosed {
        open,
        close,
        inner: Some(value),
    })
}

/// `op* operand`, with `on_unary` applied innermost operator first.
///
/// `what` names the operand for the report when it is missing after an
/// operator.
pub fn parse_prefix_term<'a, O, T, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    interner: &L,
    what: &str,
    mut op: impl FnMut(&mut TokenStream<'a>) -> Option<O>,
    operand: impl FnOnce(&mut TokenStream<'a>) -> Option<T>,
    mut on_unary: impl FnMut(O, T) -> T,
) -> Option<T> {
    let mut ops = Vec::new();
    while let Some(prefix) = op(stream) {
        ops.push(prefix);
    }

    let guard = ErrorCountGuard::new();
    let Some(mut term) = operand(stream) else {
        if !ops.is_empty() {
            expected_unless_reported(stream, &guard, what, interner);
        }
        return None;
    };
    for prefix in ops.into_iter().rev() {
        term = on_unary(prefix, term);
    }
    Some(term)
}

/// `operand (op operand)*`, folded to the left with `on_binary`.
pub fn parse_left_binary_term<'a, O, T, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    interner: &L,
    what: &str,
    mut op: impl FnMut(&mut TokenStream<'a>) -> Option<O>,
    mut operand: impl FnMut(&mut TokenStream<'a>) -> Option<T>,
    mut on_binary: impl FnMut(O, T, T) -> T,
) -> Option<T> {
    let mut lhs = operand(stream)?;
    while let Some(infix) = op(stream) {
        let guard = ErrorCountGuard::new();
        let Some(rhs) = operand(stream) else {
            expected_unless_reported(stream, &guard, what, interner);
            return None;
        };
        lhs = on_binary(infix, lhs, rhs);
    }
    Some(lhs)
}

/// One or more `item`s separated by `separator`.
///
/// The list ends at the first item not followed by `separator`; a dangling
/// separator is reported as a missing `what`.
pub fn parse_list<'a, T, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    separator: TokenKind,
    interner: &L,
    what: &str,
    mut item: impl FnMut(&mut TokenStream<'a>) -> Option<T>,
) -> Option<Vec<T>> {
    let mut items = Vec::new();
    loop {
        let guard = ErrorCountGuard::new();
        let Some(value) = item(stream) else {
            expected_unless_reported(stream, &guard, what, interner);
            return None;
        };
        items.push(value);
        if match_token(stream, separator).is_none() {
            return Some(items);
        }
    }
}

/// `item`s back to back until the end of the stream.
pub fn parse_sequence<'a, T, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    interner: &L,
    what: &str,
    mut item: impl FnMut(&mut TokenStream<'a>) -> Option<T>,
) -> Option<Vec<T>> {
    let mut items = Vec::new();
    while !stream.eof() {
        let guard = ErrorCountGuard::new();
        let Some(value) = item(stream) else {
            expected_unless_reported(stream, &guard, what, interner);
            return None;
        };
        items.push(value);
    }
    Some(items)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
