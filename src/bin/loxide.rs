//! Lox interpreter command-line.
//!
//! `loxide SCRIPT` runs a script file and exits with the conventional codes:
//! 65 when the script does not scan or parse, 70 when it fails at runtime.
//!
//! `loxide` without arguments starts an interactive session.  Program output
//! goes to stdout; prompts and error reports go to stderr, so piping the
//! session's output still yields only what the program printed.

use std::env;
use std::fs;
use std::io;
use std::process::ExitCode;

use anyhow::Context;
use log::debug;

use loxide::interpreter::{Interpreter, LoxError};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    match (args.next(), args.next()) {
        (None, _) => interactive_session(),
        (Some(script), None) => run_script(&script),
        (Some(_), Some(_)) => {
            eprintln!("Usage: loxide [script]");
            ExitCode::from(64)
        }
    }
}

fn run_script(path: &str) -> ExitCode {
    let source = match fs::read_to_string(path).with_context(|| format!("failed to read {}", path)) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(66);
        }
    };
    debug!("running {} ({} bytes)", path, source.len());

    let mut stdout = io::stdout();
    let mut interp = Interpreter::new(&mut stdout);
    match interp.eval(source.as_bytes()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn exit_code_for(error: &LoxError) -> u8 {
    match error {
        LoxError::Io(_) => 74,
        LoxError::Parse(_) => 65,
        LoxError::Runtime(_) => 70,
    }
}

/// Read-evaluate-print loop.  Errors are reported and the session keeps its
/// global environment, so a bad line does not cost the definitions before it.
fn interactive_session() -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut interp = Interpreter::new(&mut stdout);

    let mut line = String::new();
    loop {
        eprint!("> ");
        line.clear();
        match stdin.read_line(&mut line) {
            // EOF ends the session.
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {
                if let Err(e) = interp.eval(line.as_bytes()) {
                    eprintln!("{}", e);
                }
            }
            Err(e) => {
                eprintln!("read error: {}", e);
                return ExitCode::from(74);
            }
        }
    }
}
