use super::*;
use crate::CollectingEmitter;
use glossa_ir::Span;
use pretty_assertions::assert_eq;

fn stack() -> (DiagnosticStack, CollectingEmitter) {
    let sink = CollectingEmitter::new();
    (DiagnosticStack::new(sink.clone()), sink)
}

#[test]
fn test_root_context_always_present() {
    let (stack, _) = stack();
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.top_id(), ContextId::ROOT);
    assert!(!stack.top().is_suppressed());
    assert_eq!(stack.error_count(), 0);
}

#[test]
fn test_reports_target_innermost_context() {
    let (mut stack, sink) = stack();
    stack.emit(Diagnostic::error(Span::DUMMY, "outer"));

    let inner = stack.push(true);
    stack.emit(Diagnostic::error(Span::DUMMY, "inner"));
    assert_eq!(stack.error_count(), 1);
    assert_eq!(sink.messages(), vec!["outer"]);

    let popped = stack.pop(inner);
    assert_eq!(popped.diagnostics().len(), 1);
    assert_eq!(stack.error_count(), 1);
    assert_eq!(sink.messages(), vec!["outer"]);
}

#[test]
fn test_lifo_restores_previous_state() {
    let (mut stack, _) = stack();
    let before = stack.top_id();

    let a = stack.push(false);
    let b = stack.push(true);
    assert_eq!(stack.depth(), 3);
    stack.pop(b);
    stack.pop(a);

    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.top_id(), before);
}

#[test]
#[should_panic(expected = "popped out of order")]
fn test_out_of_order_pop_panics() {
    let (mut stack, _) = stack();
    let a = stack.push(false);
    let _b = stack.push(false);
    stack.pop(a);
}

#[test]
#[should_panic(expected = "cannot pop the root")]
fn test_root_pop_panics() {
    let (mut stack, _) = stack();
    stack.pop(ContextId::ROOT);
}

#[test]
fn test_pop_if_top_never_panics() {
    let (mut stack, _) = stack();
    let a = stack.push(false);
    let b = stack.push(false);
    assert!(stack.pop_if_top(a).is_none());
    assert!(stack.pop_if_top(ContextId::ROOT).is_none());
    assert!(stack.pop_if_top(b).is_some());
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_emit_diagnostics_replays_suppressed_top() {
    let (mut stack, sink) = stack();
    let cx = stack.push(true);
    stack.emit(Diagnostic::warning(Span::new(1, 2), "w"));
    stack.emit(Diagnostic::error(Span::new(3, 4), "e"));

    stack.emit_diagnostics();
    assert_eq!(sink.messages(), vec!["w", "e"]);
    assert_eq!(stack.error_count(), 1);

    stack.reset_diagnostics();
    assert_eq!(stack.error_count(), 0);
    stack.emit_diagnostics();
    assert_eq!(sink.len(), 2);
    stack.pop(cx);
}

#[test]
fn test_replay_and_reset_by_id() {
    let (mut stack, sink) = stack();
    let outer = stack.push(true);
    stack.emit(Diagnostic::error(Span::DUMMY, "held"));
    let inner = stack.push(true);

    stack.replay(outer);
    assert_eq!(sink.messages(), vec!["held"]);
    stack.reset(outer);
    assert_eq!(stack.context(outer).map(DiagnosticContext::error_count), Some(0));

    stack.pop(inner);
    stack.pop(outer);
    assert!(stack.context(outer).is_none());
}

#[test]
fn test_pop_into_parent_suppressed_child() {
    let (mut stack, sink) = stack();
    let parent = stack.push(true);
    let child = stack.push(true);
    stack.emit(Diagnostic::error(Span::DUMMY, "e1"));
    stack.emit(Diagnostic::note(Span::DUMMY, "n1"));
    stack.emit(Diagnostic::error(Span::DUMMY, "e2"));

    stack.pop_into_parent(child);
    assert_eq!(stack.top_id(), parent);
    assert_eq!(stack.error_count(), 2);
    assert_eq!(stack.top().diagnostics().len(), 3);
    assert!(sink.is_empty());

    // Into an unsuppressed parent the diagnostics become visible.
    stack.pop_into_parent(parent);
    assert_eq!(sink.messages(), vec!["e1", "n1", "e2"]);
    assert_eq!(stack.error_count(), 2);
}

#[test]
fn test_pop_into_parent_unsuppressed_child_adds_count() {
    let (mut stack, sink) = stack();
    let child = stack.push(false);
    stack.emit(Diagnostic::error(Span::DUMMY, "shown"));
    assert_eq!(sink.len(), 1);

    stack.pop_into_parent(child);
    assert_eq!(stack.error_count(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_warnings_as_errors() {
    let sink = CollectingEmitter::new();
    let config = DiagnosticConfig::default().with_warnings_as_errors(true);
    let mut stack = DiagnosticStack::with_config(sink.clone(), config);

    stack.emit(Diagnostic::warning(Span::DUMMY, "promoted"));
    stack.emit(Diagnostic::note(Span::DUMMY, "untouched"));

    assert_eq!(stack.error_count(), 1);
    let severities: Vec<_> = sink.diagnostics().iter().map(|d| d.severity).collect();
    assert_eq!(severities, vec![Severity::Error, Severity::Note]);
}
