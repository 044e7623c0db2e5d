use super::*;
use crate::match_if;
use glossa_diagnostic::{error, with_diagnostic_stack, CollectingEmitter, DiagnosticStack};
use glossa_ir::StringInterner;
use pretty_assertions::assert_eq;

/// Space-separated words; each becomes one token.
fn scan(source: &str, interner: &StringInterner) -> Vec<Token> {
    let mut offset = 0u32;
    source
        .split(' ')
        .map(|word| {
            let kind = match word {
                "(" => TokenKind::LPAREN,
                ")" => TokenKind::RPAREN,
                "+" => TokenKind::PLUS,
                "-" => TokenKind::MINUS,
                "," => TokenKind::COMMA,
                w if w.bytes().all(|b| b.is_ascii_digit()) => TokenKind::DECIMAL_INTEGER,
                _ => TokenKind::IDENTIFIER,
            };
            let len = u32::try_from(word.len()).unwrap();
            let token = Token::with_kind(Span::new(offset, offset + len), kind, word, interner);
            offset += len + 1;
            token
        })
        .collect()
}

fn reported<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let sink = CollectingEmitter::new();
    let (result, _) = with_diagnostic_stack(DiagnosticStack::new(sink.clone()), f);
    (result, sink.messages())
}

/// Silent on failure.
fn number(stream: &mut TokenStream<'_>, interner: &StringInterner) -> Option<String> {
    match_token(stream, TokenKind::DECIMAL_INTEGER).map(|t| t.text(interner).to_owned())
}

fn sign(stream: &mut TokenStream<'_>) -> Option<char> {
    let token = match_if(stream, |t| {
        matches!(t.kind(), TokenKind::PLUS | TokenKind::MINUS)
    })?;
    Some(if token.kind() == TokenKind::PLUS { '+' } else { '-' })
}

fn parenthesized(
    source: &str,
    inner: impl FnOnce(&mut TokenStream<'_>, &StringInterner) -> Option<String>,
) -> (Option<(Option<String>, Span)>, Vec<String>) {
    let registry = TokenKindRegistry::new();
    let interner = StringInterner::new();
    let tokens = scan(source, &interner);
    reported(|| {
        let mut stream = TokenStream::new(&tokens);
        parse_enclosed(
            &mut stream,
            (TokenKind::LPAREN, TokenKind::RPAREN),
            &registry,
            &interner,
            "number",
            |s| inner(s, &interner),
        )
        .map(|e| {
            let span = e.span();
            (e.inner, span)
        })
    })
}

#[test]
fn test_enclosed_value() {
    let (result, messages) = parenthesized("( 42 )", number);
    assert_eq!(result, Some((Some("42".to_owned()), Span::new(0, 6))));
    assert!(messages.is_empty());
}

#[test]
fn test_enclosed_empty_skips_inner() {
    let (result, messages) = parenthesized("( )", |_, _| unreachable!("inner must not run"));
    assert_eq!(result, Some((None, Span::new(0, 3))));
    assert!(messages.is_empty());
}

#[test]
fn test_enclosed_silent_inner_failure_is_reported() {
    let (result, messages) = parenthesized("( x )", number);
    assert_eq!(result, None);
    assert_eq!(messages, vec!["expected 'number' but got 'x'"]);
}

#[test]
fn test_enclosed_inner_report_is_not_repeated() {
    let (result, messages) = parenthesized("( x )", |s, _| {
        error(s.location(), "not a number");
        None
    });
    assert_eq!(result, None);
    assert_eq!(messages, vec!["not a number"]);
}

#[test]
fn test_enclosed_missing_close() {
    let (result, messages) = parenthesized("( 1 2", number);
    assert_eq!(result, None);
    assert_eq!(messages, vec!["expected ')' but got '2'"]);

    let (result, messages) = parenthesized("x", number);
    assert_eq!(result, None);
    assert_eq!(messages, vec!["expected '(' but got 'x'"]);
}

fn prefix(source: &str) -> (Option<String>, Vec<String>) {
    let interner = StringInterner::new();
    let tokens = scan(source, &interner);
    reported(|| {
        let mut stream = TokenStream::new(&tokens);
        parse_prefix_term(
            &mut stream,
            &interner,
            "operand",
            sign,
            |s| number(s, &interner),
            |op, term| format!("{op}{term}"),
        )
    })
}

#[test]
fn test_prefix_term_applies_innermost_first() {
    assert_eq!(prefix("- + 7"), (Some("-+7".to_owned()), vec![]));
    assert_eq!(prefix("7"), (Some("7".to_owned()), vec![]));
}

#[test]
fn test_prefix_term_missing_operand() {
    let (result, messages) = prefix("- -");
    assert_eq!(result, None);
    assert_eq!(messages, vec!["expected 'operand' but got end-of-file"]);

    // No operator consumed: the failure belongs to the caller.
    let (result, messages) = prefix("x");
    assert_eq!(result, None);
    assert!(messages.is_empty());
}

fn difference(source: &str) -> (Option<String>, Vec<String>) {
    let interner = StringInterner::new();
    let tokens = scan(source, &interner);
    reported(|| {
        let mut stream = TokenStream::new(&tokens);
        parse_left_binary_term(
            &mut stream,
            &interner,
            "operand",
            sign,
            |s| number(s, &interner),
            |op, lhs, rhs| format!("({lhs} {op} {rhs})"),
        )
    })
}

#[test]
fn test_left_binary_term_folds_left() {
    assert_eq!(
        difference("1 - 2 + 3"),
        (Some("((1 - 2) + 3)".to_owned()), vec![])
    );
    assert_eq!(difference("5"), (Some("5".to_owned()), vec![]));
}

#[test]
fn test_left_binary_term_missing_rhs() {
    let (result, messages) = difference("1 - x");
    assert_eq!(result, None);
    assert_eq!(messages, vec!["expected 'operand' but got 'x'"]);
}

fn list(source: &str) -> (Option<Vec<String>>, Vec<String>, usize) {
    let interner = StringInterner::new();
    let tokens = scan(source, &interner);
    let ((items, position), messages) = reported(|| {
        let mut stream = TokenStream::new(&tokens);
        let items = parse_list(&mut stream, TokenKind::COMMA, &interner, "item", |s| {
            number(s, &interner)
        });
        (items, stream.position())
    });
    (items, messages, position)
}

#[test]
fn test_list_stops_before_non_separator() {
    let (items, messages, position) = list("1 , 2 , 3 )");
    assert_eq!(
        items,
        Some(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()])
    );
    assert!(messages.is_empty());
    assert_eq!(position, 5);
}

#[test]
fn test_list_dangling_separator() {
    let (items, messages, _) = list("1 , )");
    assert_eq!(items, None);
    assert_eq!(messages, vec!["expected 'item' but got ')'"]);
}

#[test]
fn test_sequence_runs_to_eof() {
    let interner = StringInterner::new();
    let tokens = scan("4 5 6", &interner);
    let (items, messages) = reported(|| {
        let mut stream = TokenStream::new(&tokens);
        let items = parse_sequence(&mut stream, &interner, "number", |s| number(s, &interner));
        assert!(stream.eof());
        items
    });
    assert_eq!(
        items,
        Some(vec!["4".to_owned(), "5".to_owned(), "6".to_owned()])
    );
    assert!(messages.is_empty());

    let (items, messages) = reported(|| {
        let mut stream = TokenStream::new(&[]);
        parse_sequence(&mut stream, &interner, "number", |s| number(s, &interner))
    });
    assert_eq!(items, Some(vec![]));
    assert!(messages.is_empty());
}

#[test]
fn test_sequence_bad_item() {
    let interner = StringInterner::new();
    let tokens = scan("4 + 6", &interner);
    let (items, messages) = reported(|| {
        let mut stream = TokenStream::new(&tokens);
        parse_sequence(&mut stream, &interner, "number", |s| number(s, &interner))
    });
    assert_eq!(items, None);
    assert_eq!(messages, vec!["expected 'number' but got '+'"]);
}
