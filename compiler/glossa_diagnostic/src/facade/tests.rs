use super::*;
use crate::{CollectingEmitter, Severity};
use pretty_assertions::assert_eq;

fn isolated<R>(f: impl FnOnce() -> R) -> (R, CollectingEmitter) {
    let sink = CollectingEmitter::new();
    let (result, _) = with_diagnostic_stack(DiagnosticStack::new(sink.clone()), f);
    (result, sink)
}

#[test]
fn test_facade_reports_to_root() {
    let (count, sink) = isolated(|| {
        error(Span::new(0, 1), "bad");
        warning(Span::new(2, 3), "iffy");
        note(Span::new(4, 5), "fyi");
        error_count()
    });
    assert_eq!(count, 1);
    assert_eq!(
        sink.diagnostics(),
        vec![
            Diagnostic::error(Span::new(0, 1), "bad"),
            Diagnostic::warning(Span::new(2, 3), "iffy"),
            Diagnostic::note(Span::new(4, 5), "fyi"),
        ]
    );
}

#[test]
fn test_init_is_idempotent() {
    let ((), sink) = isolated(|| {
        error(Span::DUMMY, "kept");
        init_diagnostics();
        init_diagnostics();
        assert_eq!(error_count(), 1);
    });
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_reset_diagnostics_zeroes_root() {
    let ((), _) = isolated(|| {
        error(Span::DUMMY, "one");
        error(Span::DUMMY, "two");
        assert_eq!(error_count(), 2);
        reset_diagnostics();
        assert_eq!(error_count(), 0);
    });
}

#[test]
fn test_suppressed_scope_discards_on_drop() {
    let ((), sink) = isolated(|| {
        {
            let scope = DiagnosticScope::suppressed();
            error(Span::DUMMY, "speculative");
            assert_eq!(scope.errors(), 1);
            assert_eq!(error_count(), 1);
            assert!(!scope.is_ok());
            assert!(scope.is_suppressed());
        }
        assert_eq!(error_count(), 0);
    });
    assert!(sink.is_empty());
}

#[test]
fn test_suppressed_scope_emit_replays_in_order() {
    let ((), sink) = isolated(|| {
        let scope = DiagnosticScope::suppressed();
        warning(Span::DUMMY, "first");
        error(Span::DUMMY, "second");
        scope.emit();
        assert_eq!(scope.errors(), 1);
        assert_eq!(scope.diagnostics().len(), 2);
    });
    assert_eq!(sink.messages(), vec!["first", "second"]);
}

#[test]
fn test_scope_reset() {
    let ((), sink) = isolated(|| {
        let scope = DiagnosticScope::suppressed();
        error(Span::DUMMY, "forgotten");
        scope.reset();
        assert!(scope.is_ok());
        scope.emit();
    });
    assert!(sink.is_empty());
}

#[test]
fn test_scope_propagate_to_parent() {
    let (root_errors, sink) = isolated(|| {
        let scope = DiagnosticScope::suppressed();
        error(Span::DUMMY, "kept");
        note(Span::DUMMY, "context");
        scope.propagate();
        error_count()
    });
    assert_eq!(root_errors, 1);
    assert_eq!(sink.messages(), vec!["kept", "context"]);
}

#[test]
fn test_unsuppressed_scope_counts_separately() {
    let ((), sink) = isolated(|| {
        error(Span::DUMMY, "outer");
        {
            let scope = DiagnosticScope::new();
            error(Span::DUMMY, "inner");
            assert_eq!(scope.errors(), 1);
            assert!(!scope.is_suppressed());
        }
        assert_eq!(error_count(), 1);
    });
    assert_eq!(sink.messages(), vec!["outer", "inner"]);
}

#[test]
fn test_nested_scopes_lifo() {
    let ((), _) = isolated(|| {
        let depth = || with_stack(|stack| stack.depth());
        let a = DiagnosticScope::suppressed();
        let b = DiagnosticScope::suppressed();
        assert_eq!(depth(), 3);
        drop(b);
        drop(a);
        assert_eq!(depth(), 1);
    });
}

#[test]
fn test_out_of_order_drop_panics() {
    let result = std::panic::catch_unwind(|| {
        let ((), _) = isolated(|| {
            let a = DiagnosticScope::suppressed();
            let b = DiagnosticScope::suppressed();
            drop(a);
            drop(b);
        });
    });
    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("popped out of order"), "{message}");
}

#[test]
fn test_scope_from_another_stack_cannot_pop_current_top() {
    let inner_sink = CollectingEmitter::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let ((), _) = isolated(|| {
            let outer_scope = DiagnosticScope::suppressed();
            let ((), _) = with_diagnostic_stack(DiagnosticStack::new(inner_sink.clone()), || {
                let inner_scope = DiagnosticScope::suppressed();
                error(Span::DUMMY, "held by the inner scope");
                assert_eq!(inner_scope.errors(), 1);
                drop(outer_scope);
                drop(inner_scope);
            });
        });
    }));
    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("popped out of order"), "{message}");
    assert!(inner_sink.is_empty());
}

#[test]
fn test_context_ids_are_unique_across_stacks() {
    let mut first = DiagnosticStack::new(CollectingEmitter::new());
    let mut second = DiagnosticStack::new(CollectingEmitter::new());
    let a = first.push(true);
    let b = second.push(true);
    assert_ne!(a, b);
    assert_eq!(second.top_id(), b);
}

#[test]
fn test_error_count_guard() {
    let ((), _) = isolated(|| {
        error(Span::DUMMY, "before");
        let guard = ErrorCountGuard::new();
        assert!(guard.is_ok());
        warning(Span::DUMMY, "harmless");
        assert!(guard.is_ok());
        error(Span::DUMMY, "after");
        assert!(!guard.is_ok());
        assert_eq!(guard.new_errors(), 1);
    });
}

#[test]
fn test_with_diagnostic_stack_restores_previous() {
    let outer = CollectingEmitter::new();
    let inner = CollectingEmitter::new();
    let ((), outer_stack) = with_diagnostic_stack(DiagnosticStack::new(outer.clone()), || {
        error(Span::DUMMY, "outer");
        let ((), inner_stack) = with_diagnostic_stack(DiagnosticStack::new(inner.clone()), || {
            error(Span::DUMMY, "inner");
        });
        assert_eq!(inner_stack.error_count(), 1);
        error(Span::DUMMY, "outer again");
    });
    assert_eq!(outer_stack.error_count(), 2);
    assert_eq!(outer.messages(), vec!["outer", "outer again"]);
    assert_eq!(inner.messages(), vec!["inner"]);
}

#[test]
fn test_init_diagnostics_with_replaces_stack() {
    let ((), _) = isolated(|| {
        error(Span::DUMMY, "old");
        let sink = CollectingEmitter::new();
        let config = DiagnosticConfig::default().with_warnings_as_errors(true);
        let previous = init_diagnostics_with(sink.clone(), config).unwrap();
        assert_eq!(previous.error_count(), 1);

        warning(Span::DUMMY, "promoted");
        assert_eq!(error_count(), 1);
        assert_eq!(sink.diagnostics()[0].severity, Severity::Error);
    });
}

#[test]
fn test_threads_have_independent_stacks() {
    let ((), sink) = isolated(|| {
        error(Span::DUMMY, "main thread");
        let other = std::thread::spawn(|| {
            with_diagnostic_stack(DiagnosticStack::new(CollectingEmitter::new()), error_count).0
        })
        .join()
        .unwrap();
        assert_eq!(other, 0);
        assert_eq!(error_count(), 1);
    });
    assert_eq!(sink.len(), 1);
}
