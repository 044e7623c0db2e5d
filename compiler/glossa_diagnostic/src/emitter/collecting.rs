//! In-memory emitter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// Records emitted diagnostics in order.
///
/// Clones share one buffer, so a test can install one clone in a
/// [`DiagnosticStack`](crate::DiagnosticStack) and inspect the other.
#[derive(Clone, Default, Debug)]
pub struct CollectingEmitter {
    emitted: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.emitted.borrow().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.emitted.borrow_mut())
    }

    /// Messages only, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.emitted
            .borrow()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.emitted.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.borrow().is_empty()
    }
}

impl DiagnosticEmitter for CollectingEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.emitted.borrow_mut().push(diagnostic.clone());
    }

    fn flush(&mut self) {}
}
