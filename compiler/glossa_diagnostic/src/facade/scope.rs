//! Scoped contexts on the thread-local stack.

use std::marker::PhantomData;

use crate::{ContextId, Diagnostic};

use super::{
    error_count, pop_context, pop_context_quietly, push_context, with_context, with_stack,
};

/// A context pushed on this thread's stack for as long as the scope lives.
///
/// Dropping the scope pops the context and discards whatever it stored.
/// Scopes must be dropped in reverse creation order; dropping an outer
/// scope while an inner one is alive panics.
///
/// Speculative parsing pushes a [`suppressed`](Self::suppressed) scope,
/// tries the parse, and then either drops the scope (discard), calls
/// [`emit`](Self::emit) (surface what was held back), or calls
/// [`propagate`](Self::propagate) (hand everything to the parent).
///
/// The scope is tied to the thread that created it.
#[must_use = "a diagnostic scope is popped as soon as it is dropped"]
pub struct DiagnosticScope {
    id: ContextId,
    active: bool,
    _not_send: PhantomData<*const ()>,
}

impl DiagnosticScope {
    /// Push a context that forwards diagnostics immediately and counts
    /// errors separately from its parent.
    pub fn new() -> Self {
        Self::push(false)
    }

    /// Push a context that holds diagnostics back.
    pub fn suppressed() -> Self {
        Self::push(true)
    }

    fn push(suppressed: bool) -> Self {
        DiagnosticScope {
            id: push_context(suppressed),
            active: true,
            _not_send: PhantomData,
        }
    }

    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Errors counted in this scope.
    pub fn errors(&self) -> usize {
        with_context(self.id, crate::DiagnosticContext::error_count).unwrap_or(0)
    }

    /// True while no error has been counted in this scope.
    pub fn is_ok(&self) -> bool {
        self.errors() == 0
    }

    pub fn is_suppressed(&self) -> bool {
        with_context(self.id, crate::DiagnosticContext::is_suppressed).unwrap_or(false)
    }

    /// Copies of the diagnostics held back so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        with_context(self.id, |cx| cx.diagnostics().to_vec()).unwrap_or_default()
    }

    /// Replay held-back diagnostics to the emitter.
    pub fn emit(&self) {
        with_stack(|stack| stack.replay(self.id));
    }

    /// Discard held-back diagnostics and zero the error count.
    pub fn reset(&self) {
        with_stack(|stack| stack.reset(self.id));
    }

    /// Pop the scope, re-reporting its diagnostics and errors to the parent.
    pub fn propagate(mut self) {
        self.active = false;
        with_stack(|stack| stack.pop_into_parent(self.id));
    }
}

impl Default for DiagnosticScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DiagnosticScope {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if std::thread::panicking() {
            pop_context_quietly(self.id);
        } else {
            pop_context(self.id);
        }
    }
}

impl std::fmt::Debug for DiagnosticScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticScope")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

/// Snapshot of [`error_count`] for "did this step fail?" checks.
///
/// ```text
/// let guard = ErrorCountGuard::new();
/// parse_declaration(&mut stream);
/// if !guard.is_ok() { recover(&mut stream); }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ErrorCountGuard {
    start: usize,
}

impl ErrorCountGuard {
    pub fn new() -> Self {
        ErrorCountGuard {
            start: error_count(),
        }
    }

    /// True while the innermost context has not counted any new error.
    pub fn is_ok(&self) -> bool {
        error_count() == self.start
    }

    /// Errors counted since the guard was created.
    pub fn new_errors(&self) -> usize {
        error_count().saturating_sub(self.start)
    }
}

impl Default for ErrorCountGuard {
    fn default() -> Self {
        Self::new()
    }
}
