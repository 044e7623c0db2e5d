//! A single diagnostic context.

use crate::{Diagnostic, DiagnosticEmitter};

/// Pending diagnostics and an error counter for one level of nesting.
///
/// A non-suppressed context forwards each diagnostic to the emitter as it
/// arrives and keeps nothing. A suppressed context keeps every diagnostic
/// in arrival order until it is replayed, reset, or dropped. Both count
/// errors the same way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticContext {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    suppressed: bool,
}

impl DiagnosticContext {
    pub fn new(suppressed: bool) -> Self {
        DiagnosticContext {
            diagnostics: Vec::new(),
            error_count: 0,
            suppressed,
        }
    }

    /// Count `diagnostic` if it is an error, then store it (suppressed) or
    /// forward it to `sink` (not suppressed).
    pub fn emit(&mut self, diagnostic: Diagnostic, sink: &mut dyn DiagnosticEmitter) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        if self.suppressed {
            self.diagnostics.push(diagnostic);
        } else {
            sink.emit(&diagnostic);
        }
    }

    /// Send every stored diagnostic to `sink` in arrival order.
    ///
    /// Counters are untouched and the stored diagnostics are kept. A
    /// non-suppressed context has nothing stored, so this is a no-op there.
    pub fn replay(&self, sink: &mut dyn DiagnosticEmitter) {
        if self.suppressed {
            sink.emit_all(&self.diagnostics);
        }
    }

    /// Drop stored diagnostics and zero the error counter.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Stored diagnostics, oldest first.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn add_errors(&mut self, count: usize) {
        self.error_count += count;
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
