//! API to control the interpreter.

use std::error::Error;
use std::fmt;
use std::io;
use std::io::prelude::*;

use log::debug;

use crate::diag::FullParseError;
use crate::eval::{Evaluator, RuntimeError};
use crate::parser::Parser;

/// Tree-walk interpreter.
///
/// # Example
///
/// Invoke the interpreter a first time to define a function then additional times to call this
/// function:
///
/// ```
/// # use loxide::interpreter::{Interpreter, LoxError};
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interp = Interpreter::new(&mut output);
///
/// let func_def = r#"
///     fun max(x, y) {
///         if (x > y) {
///             return x;
///         } else {
///             return y;
///         }
///     }
/// "#;
/// interp.eval(func_def.as_bytes())?;
///
/// interp.eval("print max(10, 20);".as_bytes()).expect("interpreter error");
/// interp.eval("print max(5, 4);".as_bytes()).expect("interpreter error");
///
/// assert_eq!(output, b"20\n5\n");
/// # Ok::<(), LoxError>(())
/// ```
#[derive(Debug)]
pub struct Interpreter<'t> {
    evaluator: Evaluator<'t>,
}

/// Errors the interpreter can raise.
#[derive(Debug)]
pub enum LoxError {
    /// Error while reading the input.
    Io(io::Error),

    /// Error occurring during lexical or syntactic analysis.
    Parse(FullParseError),

    /// Error occurring during evaluation.
    Runtime(RuntimeError),
}

impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoxError::Io(e) => write!(f, "read error: {}", e),
            LoxError::Parse(e) => write!(f, "{}", e),
            // Runtime errors anchored to a token get the line-and-lexeme wrapper.
            LoxError::Runtime(e) => match e.token() {
                Some(token) => write!(f, "[Line {}] Error '{}': {}", token.line, token.kind, e),
                None => write!(f, "{}", e),
            },
        }
    }
}

impl Error for LoxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoxError::Io(e) => Some(e),
            LoxError::Parse(e) => Some(e),
            LoxError::Runtime(e) => Some(e),
        }
    }
}

impl From<FullParseError> for LoxError {
    fn from(e: FullParseError) -> LoxError {
        LoxError::Parse(e)
    }
}

impl From<RuntimeError> for LoxError {
    fn from(e: RuntimeError) -> LoxError {
        LoxError::Runtime(e)
    }
}

impl<'t> Interpreter<'t> {
    pub fn new(output: &'t mut dyn Write) -> Interpreter<'t> {
        Interpreter {
            evaluator: Evaluator::new(output),
        }
    }

    /// Scan, parse, and evaluate `input` against this interpreter's global environment.
    ///
    /// State accumulates across calls, so a REPL can feed one line at a time.
    pub fn eval<R: BufRead>(&mut self, mut input: R) -> Result<(), LoxError> {
        let mut source = String::new();
        input.read_to_string(&mut source).map_err(LoxError::Io)?;
        let prg = Parser::new(&source).parse_program()?;
        debug!("parsed {} statement(s)", prg.len());
        self.evaluator.interpret(&prg)?;
        Ok(())
    }
}
