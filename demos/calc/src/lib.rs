//! Glossa Calc
//!
//! A line-oriented integer calculator written as a client of the Glossa
//! front-end crates. It installs its own token set next to the built-in
//! kinds, scans with the shared registry, parses with the `glossa_syntax`
//! matching helpers, and reports every problem through the thread-local
//! diagnostic facade.
//!
//! ```text
//! > x = 2 ** 10
//! x = 1024
//! > max(x, 7) % 1000
//! (max(x, 7) % 1000) == 24
//! ```

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod tokens;

use std::fmt;
use std::sync::Once;

use glossa_diagnostic::{error_count, reset_diagnostics};
use glossa_ir::{RegistryError, StringInterner, TokenKindRegistry};

use crate::ast::Stmt;
use crate::eval::{Env, Evaluator};
use crate::parser::Parser;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber when `RUST_LOG` is set. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}

/// Result of a successfully evaluated line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A bare expression, rendered fully parenthesized.
    Value { expr: String, value: i64 },
    Assigned { name: String, value: i64 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value { expr, value } => write!(f, "{expr} == {value}"),
            Outcome::Assigned { name, value } => write!(f, "{name} = {value}"),
        }
    }
}

/// Registry, symbols and variables that persist across lines.
pub struct Session {
    registry: TokenKindRegistry,
    interner: StringInterner,
    env: Env,
}

impl Session {
    pub fn new() -> Result<Self, RegistryError> {
        let mut registry = TokenKindRegistry::new();
        tokens::install(&mut registry)?;
        Ok(Session {
            registry,
            interner: StringInterner::new(),
            env: Env::new(),
        })
    }

    pub fn registry(&self) -> &TokenKindRegistry {
        &self.registry
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Scan, parse and evaluate one line.
    ///
    /// Each phase runs only if the previous one reported no error. On
    /// failure the diagnostics have already been emitted; the error count
    /// is reset so the next line starts clean.
    pub fn run_line(&mut self, line: &str) -> Option<Outcome> {
        let outcome = self.run_phases(line);
        if error_count() > 0 {
            reset_diagnostics();
            return None;
        }
        outcome
    }

    fn run_phases(&mut self, line: &str) -> Option<Outcome> {
        let tokens = lexer::lex(line, &self.registry, &self.interner);
        if error_count() > 0 {
            return None;
        }

        let stmt = Parser::new(&self.registry, &self.interner).parse_line(&mut tokens.stream())?;

        let evaluator = Evaluator::new(&self.env, &self.interner);
        match stmt {
            Stmt::Expr(expr) => {
                let value = evaluator.eval(&expr)?;
                Some(Outcome::Value {
                    expr: expr.display(&self.interner).to_string(),
                    value,
                })
            }
            Stmt::Assign { name, value, .. } => {
                let value = evaluator.eval(&value)?;
                self.env.set(name, value);
                Some(Outcome::Assigned {
                    name: self.interner.lookup(name).to_owned(),
                    value,
                })
            }
        }
    }
}
