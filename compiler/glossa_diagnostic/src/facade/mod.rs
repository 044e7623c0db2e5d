//! Thread-local reporting facade.
//!
//! Parsing code deep inside a front end reports with [`error`] or
//! [`warning`] and never passes a context around. Each thread owns one
//! [`DiagnosticStack`], created on first use with a stderr
//! [`TerminalEmitter`] configured from the environment.
//!
//! Tests and embedders that want an isolated stack use
//! [`with_diagnostic_stack`] or [`init_diagnostics_with`].

mod scope;

use std::cell::RefCell;
use std::io::IsTerminal;

use glossa_ir::Span;

use crate::{
    ContextId, Diagnostic, DiagnosticConfig, DiagnosticContext, DiagnosticStack, TerminalEmitter,
};

pub use scope::{DiagnosticScope, ErrorCountGuard};

thread_local! {
    static CURRENT: RefCell<Option<DiagnosticStack>> = const { RefCell::new(None) };
}

fn default_stack() -> DiagnosticStack {
    let config = DiagnosticConfig::from_env();
    let emitter = TerminalEmitter::stderr(config.color, std::io::stderr().is_terminal());
    DiagnosticStack::with_config(emitter, config)
}

/// Run `f` on this thread's stack, creating it if needed.
///
/// # Panics
/// Panics if called re-entrantly, e.g. from inside an emitter.
fn with_current<R>(f: impl FnOnce(&mut DiagnosticStack) -> R) -> R {
    CURRENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        f(slot.get_or_insert_with(default_stack))
    })
}

/// Make sure this thread has a stack with a root context. Idempotent.
pub fn init_diagnostics() {
    with_current(|_| ());
}

/// Replace this thread's stack with a fresh one over `emitter`.
///
/// Returns the previous stack, if there was one. Scopes created against the
/// previous stack must not outlive this call.
pub fn init_diagnostics_with(
    emitter: impl crate::DiagnosticEmitter + 'static,
    config: DiagnosticConfig,
) -> Option<DiagnosticStack> {
    let stack = DiagnosticStack::with_config(emitter, config);
    CURRENT.with(|slot| slot.replace(Some(stack)))
}

/// Run `f` with `stack` installed as this thread's stack, then hand the
/// stack back together with `f`'s result.
///
/// The previously installed stack is restored afterwards, also when `f`
/// panics.
pub fn with_diagnostic_stack<R>(
    stack: DiagnosticStack,
    f: impl FnOnce() -> R,
) -> (R, DiagnosticStack) {
    struct Restore(Option<Option<DiagnosticStack>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(previous) = self.0.take() {
                CURRENT.with(|slot| *slot.borrow_mut() = previous);
            }
        }
    }

    let mut restore = Restore(Some(CURRENT.with(|slot| slot.replace(Some(stack)))));
    let result = f();
    let previous = restore.0.take().flatten();
    let stack = CURRENT
        .with(|slot| slot.replace(previous))
        .unwrap_or_else(|| unreachable!("the installed stack is only ever replaced, never removed"));
    (result, stack)
}

/// Report a diagnostic to the innermost context.
pub fn report(diagnostic: Diagnostic) {
    with_current(|stack| stack.emit(diagnostic));
}

/// Report an error at `span`.
pub fn error(span: Span, message: impl Into<String>) {
    report(Diagnostic::error(span, message));
}

/// Report a warning at `span`.
pub fn warning(span: Span, message: impl Into<String>) {
    report(Diagnostic::warning(span, message));
}

/// Report a note at `span`.
pub fn note(span: Span, message: impl Into<String>) {
    report(Diagnostic::note(span, message));
}

/// Errors counted by the innermost context.
pub fn error_count() -> usize {
    with_current(|stack| stack.error_count())
}

/// Replay the innermost context, if it is suppressed.
pub fn emit_diagnostics() {
    with_current(DiagnosticStack::emit_diagnostics);
}

/// Clear the innermost context and zero its error count.
pub fn reset_diagnostics() {
    with_current(DiagnosticStack::reset_diagnostics);
}

pub fn flush_diagnostics() {
    with_current(DiagnosticStack::flush);
}

pub(crate) fn push_context(suppressed: bool) -> ContextId {
    with_current(|stack| stack.push(suppressed))
}

pub(crate) fn pop_context(id: ContextId) -> DiagnosticContext {
    with_current(|stack| stack.pop(id))
}

/// Pop without asserting; a no-op if the thread-local is already gone or
/// borrowed.
pub(crate) fn pop_context_quietly(id: ContextId) {
    let _ = CURRENT.try_with(|slot| {
        if let Ok(mut slot) = slot.try_borrow_mut() {
            if let Some(stack) = slot.as_mut() {
                stack.pop_if_top(id);
            }
        }
    });
}

pub(crate) fn with_context<R>(id: ContextId, f: impl FnOnce(&DiagnosticContext) -> R) -> Option<R> {
    with_current(|stack| stack.context(id).map(f))
}

pub(crate) fn with_stack<R>(f: impl FnOnce(&mut DiagnosticStack) -> R) -> R {
    with_current(f)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
