//! Line-by-line sessions, as the REPL drives them.

#![allow(clippy::unwrap_used)]

use glossa_calc::{tokens, Outcome, Session};
use glossa_diagnostic::{
    error_count, with_diagnostic_stack, CollectingEmitter, DiagnosticStack,
};
use glossa_ir::TokenKind;
use pretty_assertions::assert_eq;

/// Feed `lines` to one session; returns each line's printed outcome and the
/// collected diagnostic messages.
fn run(lines: &[&str]) -> (Vec<Option<String>>, Vec<String>) {
    let sink = CollectingEmitter::new();
    let (outcomes, _) = with_diagnostic_stack(DiagnosticStack::new(sink.clone()), || {
        let mut session = Session::new().unwrap();
        lines
            .iter()
            .map(|line| {
                let outcome = session.run_line(line).map(|o| o.to_string());
                assert_eq!(error_count(), 0, "errors must be reset after {line:?}");
                outcome
            })
            .collect::<Vec<_>>()
    });
    (outcomes, sink.messages())
}

#[test]
fn variables_persist_across_lines() {
    let (outcomes, messages) = run(&["x = 2 ** 10", "max(x, 7) % 1000"]);
    assert_eq!(
        outcomes,
        vec![
            Some("x = 1024".to_owned()),
            Some("(max(x, 7) % 1000) == 24".to_owned()),
        ]
    );
    assert!(messages.is_empty());
}

#[test]
fn errors_do_not_poison_later_lines() {
    let (outcomes, messages) = run(&["1 $ 2", "(1 +", "1 / 0", "1 + 1"]);
    assert_eq!(
        outcomes,
        vec![None, None, None, Some("(1 + 1) == 2".to_owned())]
    );
    assert_eq!(
        messages,
        vec![
            "unrecognized character '$'",
            "expected 'primary-expression' but got end-of-file",
            "division by zero",
        ]
    );
}

#[test]
fn lex_errors_stop_before_parsing() {
    // Parsing `1 2` would also complain about the trailing token.
    let (outcomes, messages) = run(&["1 @ 2"]);
    assert_eq!(outcomes, vec![None]);
    assert_eq!(messages, vec!["unrecognized character '@'"]);
}

#[test]
fn failed_assignment_keeps_old_value() {
    let (outcomes, _) = run(&["y = 3", "y = y / 0", "y"]);
    assert_eq!(outcomes[2].as_deref(), Some("y == 3"));
}

#[test]
fn calc_tokens_live_in_client_space() {
    let session = Session::new().unwrap();
    let registry = session.registry();
    assert!(!tokens::STAR_STAR.is_builtin());
    assert_eq!(registry.spelling(tokens::STAR_STAR), "**");
    assert_eq!(registry.name(tokens::KW_MAX), "kw_max");
    assert_eq!(registry.lookup("abs"), Some(tokens::KW_ABS));
    assert_eq!(registry.lookup("+"), Some(TokenKind::PLUS));
    assert!(session.env().is_empty());
}

#[test]
fn outcome_display() {
    let value = Outcome::Value {
        expr: "(1 + 2)".to_owned(),
        value: 3,
    };
    assert_eq!(value.to_string(), "(1 + 2) == 3");
}
