//! A tiny list-literal grammar built from the matching and elaboration
//! helpers, run against the thread-local facade.
//!
//! ```text
//! list  ::= '[' [item (',' item)*] ']'
//! item  ::= integer | string | boolean | list
//! ```

use glossa_diagnostic::{error_count, with_diagnostic_stack, CollectingEmitter, DiagnosticStack};
use glossa_ir::{Span, StringInterner, Token, TokenKind, TokenKindRegistry, TokenList, TokenStream};
use glossa_syntax::{
    as_boolean, as_integer, as_string, attempt, next_token_in_range, next_token_kind,
    parse_enclosed, parse_list,
};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
enum Value {
    Int(u64),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
}

struct Grammar<'a> {
    registry: &'a TokenKindRegistry,
    interner: &'a StringInterner,
}

impl Grammar<'_> {
    fn item(&self, s: &mut TokenStream<'_>) -> Option<Value> {
        let kind = next_token_kind(s);
        if next_token_in_range(s, TokenKind::BINARY_INTEGER, TokenKind::HEXADECIMAL_INTEGER) {
            return as_integer(s.get(), self.interner).map(Value::Int);
        }
        if kind == TokenKind::STRING {
            return as_string(s.get(), self.interner).map(Value::Str);
        }
        if kind == TokenKind::BOOLEAN {
            return as_boolean(s.get(), self.interner).map(Value::Bool);
        }
        self.list(s)
    }

    fn list(&self, s: &mut TokenStream<'_>) -> Option<Value> {
        let group = parse_enclosed(
            s,
            (TokenKind::LBRACK, TokenKind::RBRACK),
            self.registry,
            self.interner,
            "item",
            |s| parse_list(s, TokenKind::COMMA, self.interner, "item", |s| self.item(s)),
        )?;
        Some(Value::List(group.inner.unwrap_or_default()))
    }
}

/// Whitespace-separated source; every word is one token.
fn scan(source: &str, registry: &TokenKindRegistry, interner: &StringInterner) -> TokenList {
    let mut offset = 0u32;
    source
        .split_whitespace()
        .map(|word| {
            let len = u32::try_from(word.len()).unwrap_or(u32::MAX);
            let span = Span::new(offset, offset + len);
            offset += len + 1;
            Token::lookup(span, word, registry, interner).unwrap_or_else(|| {
                let kind = if word.starts_with('"') {
                    TokenKind::STRING
                } else if word.starts_with("0x") {
                    TokenKind::HEXADECIMAL_INTEGER
                } else if word.starts_with("0b") {
                    TokenKind::BINARY_INTEGER
                } else {
                    TokenKind::DECIMAL_INTEGER
                };
                Token::with_kind(span, kind, word, interner)
            })
        })
        .collect()
}

fn parse(source: &str) -> (Option<Value>, usize, Vec<String>) {
    let registry = TokenKindRegistry::new();
    let interner = StringInterner::new();
    let tokens = scan(source, &registry, &interner);
    let grammar = Grammar {
        registry: &registry,
        interner: &interner,
    };
    let sink = CollectingEmitter::new();
    let ((value, errors), _) = with_diagnostic_stack(DiagnosticStack::new(sink.clone()), || {
        let mut stream = tokens.stream();
        let value = grammar.list(&mut stream);
        (value, error_count())
    });
    (value, errors, sink.messages())
}

#[test]
fn nested_lists() {
    let (value, errors, _) = parse(r#"[ 1 , 0x1F , "hi" , [ true , [ ] ] ]"#);
    assert_eq!(errors, 0);
    assert_eq!(
        value,
        Some(Value::List(vec![
            Value::Int(1),
            Value::Int(31),
            Value::Str("hi".to_owned()),
            Value::List(vec![Value::Bool(true), Value::List(vec![])]),
        ]))
    );
}

#[test]
fn missing_close_bracket() {
    let (value, errors, messages) = parse("[ 1 , 2");
    assert_eq!(value, None);
    assert_eq!(errors, 1);
    assert_eq!(messages, vec!["expected ']' but got end-of-file"]);
}

#[test]
fn dangling_comma() {
    let (value, errors, messages) = parse("[ 1 , ]");
    assert_eq!(value, None);
    assert_eq!(errors, 1);
    assert_eq!(messages, vec!["expected '[' but got ']'"]);
}

#[test]
fn bad_literal_inside_list() {
    let (value, errors, messages) = parse("[ 0b12 ]");
    assert_eq!(value, None);
    assert_eq!(errors, 1);
    assert_eq!(
        messages,
        vec!["invalid digit in binary integer literal '0b12'"]
    );
}

#[test]
fn speculative_list_falls_back_to_integer() {
    let registry = TokenKindRegistry::new();
    let interner = StringInterner::new();
    let tokens = scan("42", &registry, &interner);
    let grammar = Grammar {
        registry: &registry,
        interner: &interner,
    };

    let sink = CollectingEmitter::new();
    let ((value, errors), _) = with_diagnostic_stack(DiagnosticStack::new(sink.clone()), || {
        let mut stream = tokens.stream();
        let value = attempt(&mut stream, |s| grammar.list(s)).or_else(|| grammar.item(&mut stream));
        (value, error_count())
    });
    assert_eq!(value, Some(Value::Int(42)));
    assert_eq!(errors, 0);
    assert!(sink.is_empty());
}
