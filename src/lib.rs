//! A tree-walking interpreter for the Lox language.
//!
//! See [Crafting Interpreters](https://craftinginterpreters.com/).
//!
//! # Examples
//!
//! See [`crate::interpreter::Interpreter`].
//!
//! # Limitations
//!
//! - The scanner and parser do not attempt any error recovery.  They bail out on the first
//! encountered error.
//! - The interpreter implements the pre-class subset of Lox: no classes, no inheritance.
//! - The only native function is `clock`.

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]

pub mod interpreter;

mod ast;
mod diag;
mod eval;
mod parser;
mod scanner;
mod token;
