//! Diagnostic Emitters
//!
//! The reporting boundary. A [`DiagnosticStack`](crate::DiagnosticStack)
//! hands every diagnostic that should become visible to its emitter:
//! - Terminal: `severity:location: message` lines, optionally colored
//! - Collecting: in-memory buffer for tests and embedders
//!
//! Emitters only ever receive diagnostics; they must not report new ones
//! through the facade while emitting.

mod collecting;
mod terminal;

pub use collecting::CollectingEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Append-only sink for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);
}

impl<E: DiagnosticEmitter + ?Sized> DiagnosticEmitter for Box<E> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}
