//! Stack of nested diagnostic contexts.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Diagnostic, DiagnosticConfig, DiagnosticContext, DiagnosticEmitter, Severity};

/// Identity of a pushed context, used to check strict nesting on pop.
///
/// Ids other than [`ContextId::ROOT`] are unique across every stack in the
/// process, so a context from one stack never matches another stack's top.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ContextId(u64);

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

impl ContextId {
    /// The root context every stack starts with.
    pub const ROOT: ContextId = ContextId(0);

    fn fresh() -> Self {
        ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cx#{}", self.0)
    }
}

/// Strictly nested diagnostic contexts over one emitter.
///
/// The stack always holds the root context. Diagnostics go to the innermost
/// context; whatever that context decides to make visible goes to the
/// emitter.
///
/// # Invariants
///
/// - `contexts` is never empty; `contexts[0]` is the root.
/// - Contexts are popped in reverse push order. Popping anything but the
///   innermost context, or popping the root, panics.
pub struct DiagnosticStack {
    contexts: Vec<(ContextId, DiagnosticContext)>,
    emitter: Box<dyn DiagnosticEmitter>,
    config: DiagnosticConfig,
}

impl DiagnosticStack {
    pub fn new(emitter: impl DiagnosticEmitter + 'static) -> Self {
        Self::with_config(emitter, DiagnosticConfig::default())
    }

    pub fn with_config(emitter: impl DiagnosticEmitter + 'static, config: DiagnosticConfig) -> Self {
        DiagnosticStack {
            contexts: vec![(ContextId::ROOT, DiagnosticContext::new(false))],
            emitter: Box::new(emitter),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> DiagnosticConfig {
        self.config
    }

    /// Number of contexts, root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    fn top_entry(&self) -> &(ContextId, DiagnosticContext) {
        // contexts[0] is never popped.
        &self.contexts[self.contexts.len() - 1]
    }

    fn top_entry_mut(&mut self) -> &mut (ContextId, DiagnosticContext) {
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    /// The innermost context.
    pub fn top(&self) -> &DiagnosticContext {
        &self.top_entry().1
    }

    pub fn top_id(&self) -> ContextId {
        self.top_entry().0
    }

    /// Any live context by id.
    pub fn context(&self, id: ContextId) -> Option<&DiagnosticContext> {
        self.contexts
            .iter()
            .find(|(cx_id, _)| *cx_id == id)
            .map(|(_, cx)| cx)
    }

    fn context_mut(&mut self, id: ContextId) -> Option<&mut DiagnosticContext> {
        self.contexts
            .iter_mut()
            .find(|(cx_id, _)| *cx_id == id)
            .map(|(_, cx)| cx)
    }

    /// Push a new innermost context.
    pub fn push(&mut self, suppressed: bool) -> ContextId {
        let id = ContextId::fresh();
        self.contexts.push((id, DiagnosticContext::new(suppressed)));
        tracing::trace!(%id, suppressed, depth = self.contexts.len(), "push diagnostic context");
        id
    }

    /// Pop the innermost context, which must be `id`. Its stored
    /// diagnostics are returned to the caller, not emitted.
    ///
    /// # Panics
    /// Panics if `id` is the root or is not the innermost context.
    pub fn pop(&mut self, id: ContextId) -> DiagnosticContext {
        assert!(
            id != ContextId::ROOT,
            "cannot pop the root diagnostic context"
        );
        let top = self.top_id();
        assert!(
            top == id,
            "diagnostic contexts popped out of order: popping {id} while {top} is innermost"
        );
        let (_, cx) = self
            .contexts
            .pop()
            .unwrap_or_else(|| unreachable!("stack holds at least the root"));
        tracing::trace!(%id, errors = cx.error_count(), depth = self.contexts.len(), "pop diagnostic context");
        cx
    }

    /// Pop `id` without asserting. Used while unwinding, where a second
    /// panic would abort.
    pub(crate) fn pop_if_top(&mut self, id: ContextId) -> Option<DiagnosticContext> {
        if id == ContextId::ROOT || self.top_id() != id {
            return None;
        }
        self.contexts.pop().map(|(_, cx)| cx)
    }

    /// Pop `id` and hand its results to the new innermost context.
    ///
    /// Stored diagnostics are re-emitted into the parent in order, which
    /// counts their errors there. A non-suppressed child stored nothing, so
    /// its error count is added to the parent directly.
    pub fn pop_into_parent(&mut self, id: ContextId) {
        let child = self.pop(id);
        let suppressed = child.is_suppressed();
        let errors = child.error_count();
        let last = self.contexts.len() - 1;
        let (_, parent) = &mut self.contexts[last];
        if suppressed {
            for diag in child.into_diagnostics() {
                parent.emit(diag, self.emitter.as_mut());
            }
        } else {
            parent.add_errors(errors);
        }
    }

    /// Report `diagnostic` to the innermost context.
    pub fn emit(&mut self, mut diagnostic: Diagnostic) {
        if self.config.warnings_as_errors && diagnostic.severity == Severity::Warning {
            diagnostic.severity = Severity::Error;
        }
        let last = self.contexts.len() - 1;
        let (_, cx) = &mut self.contexts[last];
        cx.emit(diagnostic, self.emitter.as_mut());
    }

    /// Error count of the innermost context.
    pub fn error_count(&self) -> usize {
        self.top().error_count()
    }

    /// Replay the innermost context.
    pub fn emit_diagnostics(&mut self) {
        let top = self.top_id();
        self.replay(top);
    }

    /// Reset the innermost context.
    pub fn reset_diagnostics(&mut self) {
        self.top_entry_mut().1.reset();
    }

    /// Replay a live context by id. Unknown ids are ignored.
    pub fn replay(&mut self, id: ContextId) {
        if let Some((_, cx)) = self.contexts.iter().find(|(cx_id, _)| *cx_id == id) {
            tracing::trace!(%id, stored = cx.diagnostics().len(), "replay diagnostic context");
            cx.replay(self.emitter.as_mut());
        }
    }

    /// Reset a live context by id. Unknown ids are ignored.
    pub fn reset(&mut self, id: ContextId) {
        if let Some(cx) = self.context_mut(id) {
            cx.reset();
        }
    }

    pub fn flush(&mut self) {
        self.emitter.flush();
    }
}

impl fmt::Debug for DiagnosticStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticStack")
            .field("contexts", &self.contexts)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
