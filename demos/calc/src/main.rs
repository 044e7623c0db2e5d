//! Glossa calculator REPL.
//!
//! Reads one expression or assignment per line from stdin. Diagnostics go to
//! stderr; `GLOSSA_COLOR` and `GLOSSA_WARNINGS_AS_ERRORS` configure them and
//! `RUST_LOG` enables internal tracing.

use std::io::{self, BufRead, IsTerminal, Write};

use glossa_calc::{init_tracing, Session};
use glossa_diagnostic::{flush_diagnostics, init_diagnostics};

fn main() {
    init_tracing();
    init_diagnostics();

    let mut session = match Session::new() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let interactive = io::stdin().is_terminal();
    let mut lines = io::stdin().lock().lines();
    loop {
        if interactive {
            print!("> ");
            let _ = io::stdout().flush();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Some(outcome) = session.run_line(&line) {
            println!("{outcome}");
        }
        flush_diagnostics();
    }
}
