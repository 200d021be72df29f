//! Runtime value model, lexical environments, and the tree-walking evaluator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::ast::{Expr, FunctionDecl, Stmt};
use crate::token::{Token, TokenKind};

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Callable(Rc<dyn Callable>),
}

impl Value {
    /// Nil and false are falsey, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

/// Values of different variants always compare unequal; callables compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::Str(lhs), Value::Str(rhs)) => lhs == rhs,
            (Value::Callable(lhs), Value::Callable(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            // `{}` on f64 already drops the fraction of integral doubles (`3`, not `3.0`).
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Callable(c) => write!(f, "<fn {}>", c.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({:?})", b),
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Callable(c) => write!(f, "Callable(<fn {}>)", c.name()),
        }
    }
}

/// Anything a call expression can invoke: user functions and natives.
pub trait Callable {
    fn arity(&self) -> usize;

    /// Invoke with already-evaluated arguments.  The caller has checked the count.
    fn call(&self, evaluator: &mut Evaluator<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError>;

    /// Name shown by `<fn NAME>`.
    fn name(&self) -> &str;
}

/// A user-declared function together with the environment it closed over.
#[derive(Debug)]
struct Function {
    declaration: Rc<FunctionDecl>,
    closure: Rc<Env>,
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, evaluator: &mut Evaluator<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        // Parameters live in a fresh frame enclosed by the captured environment,
        // not by the caller's.  The caller's chain is untouched, so there is
        // nothing to restore on error.
        let env = Env::with_enclosing(self.closure.clone());
        for (param, value) in self.declaration.params.iter().zip(arguments) {
            env.define(param.name.clone(), value);
        }
        evaluator.eval_block(&self.declaration.body, env)?;
        Ok(evaluator.returning.take().unwrap_or(Value::Nil))
    }

    fn name(&self) -> &str {
        &self.declaration.name.name
    }
}

/// A native function backed by a plain Rust function pointer.
#[derive(Debug)]
struct NativeFunction {
    name: &'static str,
    arity: usize,
    function: fn(&[Value]) -> Result<Value, RuntimeError>,
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _evaluator: &mut Evaluator<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.function)(&arguments)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Wall-clock seconds since the epoch, truncated to whole seconds.
fn native_clock(_args: &[Value]) -> Result<Value, RuntimeError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is set before the Unix epoch");
    Ok(Value::Number(now.as_secs() as f64))
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Operands must be numbers.")]
    NumberOperands { op: Token },
    #[error("Operands must be two numbers or two strings.")]
    AddOperands,
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: Rc<str> },
    #[error("Can only call functions and classes.")]
    NotCallable,
    #[error("Expected {expected} arguments but got {got}.")]
    Arity { expected: usize, got: usize, paren: Token },
    /// The parser handed us an operator the evaluator does not know.
    #[error("Unreachable.")]
    Unreachable { op: Token },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    /// The token this error is anchored to, when there is one to report.
    pub fn token(&self) -> Option<&Token> {
        match self {
            RuntimeError::NumberOperands { op } | RuntimeError::Unreachable { op } => Some(op),
            RuntimeError::Arity { paren, .. } => Some(paren),
            RuntimeError::AddOperands
            | RuntimeError::UndefinedVariable { .. }
            | RuntimeError::NotCallable
            | RuntimeError::Io(_) => None,
        }
    }
}

/// One frame of the lexical scope chain.
///
/// Frames are shared: the active chain holds them, and so does every closure
/// that captured them.  A function stored in its own frame forms a reference
/// cycle; that only delays reclamation, it never affects lookups.
#[derive(Debug)]
pub struct Env {
    enclosing: Option<Rc<Env>>,
    values: RefCell<HashMap<Rc<str>, Value>>,
}

impl Env {
    fn new() -> Rc<Env> {
        Rc::new(Env {
            enclosing: None,
            values: RefCell::new(HashMap::new()),
        })
    }

    fn with_enclosing(enclosing: Rc<Env>) -> Rc<Env> {
        Rc::new(Env {
            enclosing: Some(enclosing),
            values: RefCell::new(HashMap::new()),
        })
    }

    /// Bind `name` in this frame, overwriting any previous binding here.
    fn define(&self, name: Rc<str>, value: Value) {
        self.values.borrow_mut().insert(name, value);
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match self.values.borrow().get(name) {
            Some(v) => Some(v.clone()),
            None => self.enclosing.as_ref().and_then(|env| env.lookup(name)),
        }
    }

    /// Overwrite an existing binding somewhere in the chain.  Never creates one.
    fn assign(&self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.borrow_mut().get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.enclosing {
            Some(env) => env.assign(name, value),
            None => false,
        }
    }

    fn add_native(&self, name: &'static str, arity: usize, function: fn(&[Value]) -> Result<Value, RuntimeError>) {
        self.define(
            Rc::from(name),
            Value::Callable(Rc::new(NativeFunction { name, arity, function })),
        );
    }
}

pub struct Evaluator<'t> {
    output: &'t mut dyn Write,
    globals: Rc<Env>,
    /// Set by a `return` statement; every enclosing block and loop unwinds
    /// until the nearest function call consumes it.
    returning: Option<Value>,
}

impl fmt::Debug for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("globals", &self.globals)
            .field("returning", &self.returning)
            .finish()
    }
}

impl<'t> Evaluator<'t> {
    pub fn new(output: &'t mut dyn Write) -> Evaluator<'t> {
        let globals = Env::new();
        globals.add_native("clock", 0, native_clock);
        Evaluator {
            output,
            globals,
            returning: None,
        }
    }

    /// Run the statements of a program in the global environment.
    ///
    /// A runtime error aborts the remaining statements; the global environment
    /// survives intact for the next call (e.g. the next REPL line).
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            let result = self.eval_stmt(stmt, self.globals.clone());
            // A stray top-level `return` must not bleed into later statements.
            self.returning = None;
            result?;
        }
        Ok(())
    }

    fn eval_stmt(&mut self, stmt: &Stmt, env: Rc<Env>) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr, env)?;
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                writeln!(self.output, "{}", value)?;
            }
            Stmt::Var(name, initializer) => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, env.clone())?,
                    None => Value::Nil,
                };
                env.define(name.name.clone(), value);
            }
            Stmt::Function(declaration) => {
                // The closure is the environment current right now, so the
                // function can see itself and recurse.
                let function = Function {
                    declaration: declaration.clone(),
                    closure: env.clone(),
                };
                env.define(declaration.name.name.clone(), Value::Callable(Rc::new(function)));
            }
            Stmt::Block(stmts) => {
                self.eval_block(stmts, Env::with_enclosing(env))?;
            }
            Stmt::If(condition, then_branch, else_branch) => {
                if self.eval_expr(condition, env.clone())?.is_truthy() {
                    self.eval_stmt(then_branch, env)?;
                } else if let Some(else_branch) = else_branch {
                    self.eval_stmt(else_branch, env)?;
                }
            }
            Stmt::While(condition, body) => {
                while self.eval_expr(condition, env.clone())?.is_truthy() {
                    self.eval_stmt(body, env.clone())?;
                    if self.returning.is_some() {
                        break;
                    }
                }
            }
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                self.returning = Some(value);
            }
        };
        Ok(())
    }

    /// Run the statements of a block or function body in `env`.
    ///
    /// Each `var` declaration begins a fresh frame for the statements after it,
    /// so a closure made earlier keeps resolving names through the chain it
    /// captured, even when a later declaration would shadow one of them.
    fn eval_block(&mut self, stmts: &[Stmt], mut env: Rc<Env>) -> Result<(), RuntimeError> {
        for stmt in stmts {
            if let Stmt::Var(name, initializer) = stmt {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, env.clone())?,
                    None => Value::Nil,
                };
                let scope = Env::with_enclosing(env);
                scope.define(name.name.clone(), value);
                env = scope;
            } else {
                self.eval_stmt(stmt, env.clone())?;
                if self.returning.is_some() {
                    break;
                }
            }
        }
        Ok(())
    }

    fn eval_expr(&mut self, expr: &Expr, env: Rc<Env>) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Nil => Ok(Value::Nil),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Group(expr) => self.eval_expr(expr, env),
            Expr::Var(name) => env.lookup(&name.name).ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.name.clone(),
            }),
            Expr::Assign(name, rhs) => {
                let value = self.eval_expr(rhs, env.clone())?;
                if env.assign(&name.name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UndefinedVariable { name: name.name.clone() })
                }
            }
            Expr::Unary(op, right) => {
                let right = self.eval_expr(right, env)?;
                match op.kind {
                    TokenKind::Minus => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::NumberOperands { op: op.clone() }),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(RuntimeError::Unreachable { op: op.clone() }),
                }
            }
            Expr::Binary(op, lhs, rhs) => {
                let left = self.eval_expr(lhs, env.clone())?;
                let right = self.eval_expr(rhs, env)?;
                match op.kind {
                    TokenKind::Plus => match (left, right) {
                        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
                        (Value::Str(l), Value::Str(r)) => {
                            Ok(Value::Str(Rc::from(format!("{}{}", l, r))))
                        }
                        _ => Err(RuntimeError::AddOperands),
                    },
                    TokenKind::Minus => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Number(l - r))
                    }
                    TokenKind::Star => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Number(l * r))
                    }
                    TokenKind::Slash => {
                        // Division by zero follows IEEE-754.
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Number(l / r))
                    }
                    TokenKind::Greater => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Bool(l > r))
                    }
                    TokenKind::GreaterEqual => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Bool(l >= r))
                    }
                    TokenKind::Less => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Bool(l < r))
                    }
                    TokenKind::LessEqual => {
                        let (l, r) = number_operands(op, left, right)?;
                        Ok(Value::Bool(l <= r))
                    }
                    TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
                    TokenKind::BangEqual => Ok(Value::Bool(left != right)),
                    _ => Err(RuntimeError::Unreachable { op: op.clone() }),
                }
            }
            Expr::Logical(op, lhs, rhs) => {
                let left = self.eval_expr(lhs, env.clone())?;
                match op.kind {
                    // The operand itself comes back, not a coerced boolean.
                    TokenKind::Or if left.is_truthy() => Ok(left),
                    TokenKind::And if !left.is_truthy() => Ok(left),
                    TokenKind::Or | TokenKind::And => self.eval_expr(rhs, env),
                    _ => Err(RuntimeError::Unreachable { op: op.clone() }),
                }
            }
            Expr::Call(callee, closing_paren, args) => {
                let callee = self.eval_expr(callee, env.clone())?;
                let callable = match callee {
                    Value::Callable(c) => c,
                    _ => return Err(RuntimeError::NotCallable),
                };
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(self.eval_expr(arg, env.clone())?);
                }
                if arguments.len() != callable.arity() {
                    return Err(RuntimeError::Arity {
                        expected: callable.arity(),
                        got: arguments.len(),
                        paren: closing_paren.clone(),
                    });
                }
                callable.call(self, arguments)
            }
        }
    }
}

fn number_operands(op: &Token, left: Value, right: Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok((l, r)),
        _ => Err(RuntimeError::NumberOperands { op: op.clone() }),
    }
}
