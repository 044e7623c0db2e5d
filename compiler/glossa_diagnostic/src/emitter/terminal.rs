//! Line-oriented output for people at a terminal.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

const RESET: &str = "\x1b[0m";

/// ANSI escape that introduces a severity label.
fn severity_escape(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[1;31m",
        Severity::Warning => "\x1b[1;33m",
        Severity::Note => "\x1b[1;36m",
    }
}

/// When to color severity labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Only when the destination is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` is consulted for `Auto` alone.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        matches!((self, is_tty), (ColorMode::Always, _) | (ColorMode::Auto, true))
    }

    /// Accepts `auto`, `always` and `never`, ignoring case and padding.
    pub fn parse(value: &str) -> Option<ColorMode> {
        let value = value.trim();
        [ColorMode::Auto, ColorMode::Always, ColorMode::Never]
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }
}

/// Prints `severity:span: message`, one diagnostic per line.
///
/// Write failures are traced and otherwise dropped.
pub struct TerminalEmitter<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        let colored = mode.should_use_colors(is_tty);
        TerminalEmitter { out, colored }
    }

    /// No escape codes at all.
    pub fn plain(out: W) -> Self {
        TerminalEmitter {
            out,
            colored: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let Diagnostic {
            severity,
            span,
            message,
        } = diagnostic;
        if self.colored {
            write!(self.out, "{}{severity}{RESET}", severity_escape(*severity))?;
        } else {
            write!(self.out, "{severity}")?;
        }
        writeln!(self.out, ":{span}: {message}")
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Err(err) = self.write_line(diagnostic) {
            tracing::trace!(%err, "dropped diagnostic output");
        }
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
