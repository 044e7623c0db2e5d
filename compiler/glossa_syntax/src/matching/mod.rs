//! Token matching over a [`TokenStream`].
//!
//! `next_token_*` look without consuming. `match_*` consume only on
//! success and stay silent on failure. `expect_*` consume on success and
//! report an error at the current location on failure.

use glossa_diagnostic::{error, DiagnosticScope};
use glossa_ir::{StringLookup, Token, TokenKind, TokenKindRegistry, TokenStream};

/// Kind of the next token, `ERROR` at end-of-stream.
#[inline]
pub fn next_token_kind(stream: &TokenStream<'_>) -> TokenKind {
    stream.peek_kind()
}

#[inline]
pub fn next_token_is(stream: &TokenStream<'_>, kind: TokenKind) -> bool {
    next_token_kind(stream) == kind
}

#[inline]
pub fn next_token_is_not(stream: &TokenStream<'_>, kind: TokenKind) -> bool {
    next_token_kind(stream) != kind
}

/// True if the next token's kind lies in `first..=last`.
#[inline]
pub fn next_token_in_range(stream: &TokenStream<'_>, first: TokenKind, last: TokenKind) -> bool {
    (first..=last).contains(&next_token_kind(stream))
}

/// Consume and return the next token if `pred` accepts it.
pub fn match_if<'a>(
    stream: &mut TokenStream<'a>,
    pred: impl FnOnce(&Token) -> bool,
) -> Option<&'a Token> {
    if !stream.eof() && pred(stream.peek()) {
        Some(stream.get())
    } else {
        None
    }
}

/// Consume and return the next token if it has `kind`.
pub fn match_token<'a>(stream: &mut TokenStream<'a>, kind: TokenKind) -> Option<&'a Token> {
    match_if(stream, |token| token.kind() == kind)
}

/// Like [`match_if`], but report `expected '<expected>' but got '<text>'`
/// on failure. At end-of-stream the error points at the last token and
/// says `end-of-file`.
pub fn expect_if<'a, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    pred: impl FnOnce(&Token) -> bool,
    expected: &str,
    interner: &L,
) -> Option<&'a Token> {
    if stream.eof() {
        error(
            stream.last_location(),
            format!("expected '{expected}' but got end-of-file"),
        );
        return None;
    }
    let next = stream.peek();
    if pred(next) {
        return Some(stream.get());
    }
    error(
        next.span(),
        format!("expected '{expected}' but got '{}'", next.text(interner)),
    );
    None
}

/// Consume a token of `kind` or report that its spelling was expected.
pub fn expect_token<'a, L: StringLookup + ?Sized>(
    stream: &mut TokenStream<'a>,
    kind: TokenKind,
    registry: &TokenKindRegistry,
    interner: &L,
) -> Option<&'a Token> {
    expect_if(
        stream,
        |token| token.kind() == kind,
        registry.spelling(kind),
        interner,
    )
}

/// Run `parse` speculatively.
///
/// Diagnostics reported by `parse` are held in a suppressed scope. If it
/// returns `Some`, they are handed to the enclosing context and the stream
/// keeps its new position. If it returns `None`, they are discarded and the
/// stream is rewound to where it was.
pub fn attempt<'a, T>(
    stream: &mut TokenStream<'a>,
    parse: impl FnOnce(&mut TokenStream<'a>) -> Option<T>,
) -> Option<T> {
    let checkpoint = stream.checkpoint();
    let scope = DiagnosticScope::suppressed();
    match parse(stream) {
        Some(value) => {
            scope.propagate();
            Some(value)
        }
        None => {
            tracing::trace!(
                discarded = scope.errors(),
                rewind_to = stream.position(),
                "speculative parse failed"
            );
            drop(scope);
            stream.rewind(checkpoint);
            None
        }
    }
}
