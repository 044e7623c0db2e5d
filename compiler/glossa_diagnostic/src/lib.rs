//! Glossa Diagnostics
//!
//! Reporting for front ends built on `glossa_ir`:
//! - [`Diagnostic`]: severity, location, message
//! - [`DiagnosticContext`]: stored diagnostics, an error counter, and a
//!   suppression flag
//! - [`DiagnosticStack`]: strictly nested contexts over one emitter
//! - the reporting facade ([`error`], [`warning`], [`note`], ...), which
//!   always targets the innermost context of the current thread's stack
//! - [`DiagnosticScope`]: RAII push/pop for speculative work
//!
//! # Counting
//!
//! Every error is counted by the context it is emitted into, whether that
//! context prints it immediately or holds it back. Failure of a unit of
//! work is observed by reading [`error_count`] afterwards; reporting never
//! unwinds.
//!
//! # Threads
//!
//! Each thread has its own stack. Concurrent compilations on different
//! threads never see each other's diagnostics.

mod config;
mod context;
mod diagnostic;
mod emitter;
mod facade;
mod stack;

pub use config::DiagnosticConfig;
pub use context::DiagnosticContext;
pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{CollectingEmitter, ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use facade::{
    emit_diagnostics, error, error_count, flush_diagnostics, init_diagnostics,
    init_diagnostics_with, note, report, reset_diagnostics, warning, with_diagnostic_stack,
    DiagnosticScope, ErrorCountGuard,
};
pub use stack::{ContextId, DiagnosticStack};
