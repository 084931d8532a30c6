use std::rc::Rc;

use crate::{
    ast::{Expression, Token},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            print::PrintHandler,
            scope::{Frame, Scopes},
        },
        parser::parse,
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default bound on nested expression evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Resource limits for one evaluation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest allowed nesting of evaluated expressions, counting function
    /// bodies. Exceeding it raises [`RuntimeError::RecursionLimit`].
    pub max_depth:      usize,
    /// Most iterations any single loop may run, or `None` for no limit.
    /// Exceeding it raises [`RuntimeError::IterationLimit`].
    pub max_iterations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth:      DEFAULT_MAX_DEPTH,
               max_iterations: None, }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope frames, the names of the
/// loops currently running, and where `print` writes to.
///
/// ## Usage
///
/// A `Context` is long-lived. Each call to [`Context::run`] evaluates one piece
/// of source against the same global frame, so an interactive session keeps its
/// variables from line to line. Independent contexts share nothing.
#[derive(Debug)]
pub struct Context {
    pub(crate) scopes:  Scopes,
    pub(crate) loops:   Vec<String>,
    pub(crate) depth:   usize,
    pub(crate) config:  Config,
    pub(crate) printer: PrintHandler,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a context with an empty global frame, default limits and
    /// `print` writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a context with the given limits.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { scopes: Scopes::new(),
               loops: Vec::new(),
               depth: 0,
               config,
               printer: PrintHandler::Stdout }
    }

    /// Redirects `print` output into an in-memory buffer.
    #[must_use]
    pub fn buffered(mut self) -> Self {
        self.printer = PrintHandler::Buffer(String::new());
        self
    }

    /// Drains everything printed so far when output is buffered.
    pub fn take_output(&mut self) -> String {
        self.printer.take_output()
    }

    /// The active limits.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Looks up a binding in the global frame.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.scopes.global(name)
    }

    /// Number of scope frames currently pushed, including the global frame.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Names of the loops currently running, innermost last.
    #[must_use]
    pub fn active_loops(&self) -> &[String] {
        &self.loops
    }

    /// Parses and evaluates `source`, returning the program's value.
    ///
    /// On failure the context is returned to its resting shape: only the
    /// global frame is left and no loop is running. Global assignments made
    /// before the failure are kept.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the source does not parse, or
    /// [`Error::Runtime`] if evaluation fails.
    ///
    /// # Example
    /// ```
    /// use brak::interpreter::{evaluator::core::Context, value::Value};
    ///
    /// let mut context = Context::new();
    /// context.run("f = | n | ( n * 2 )").unwrap();
    /// assert_eq!(context.run("@f ( 21 )").unwrap(), Value::Number(42.0));
    /// ```
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parse(source)?;
        tracing::debug!(tokens = program.tokens.len(), "parsed program");
        Ok(self.eval_program(&program)?)
    }

    /// Evaluates an already parsed program.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised while evaluating.
    pub fn eval_program(&mut self, program: &Expression) -> EvalResult<Value> {
        let result = self.eval_expression(program, Frame::new());
        if let Err(error) = &result {
            tracing::debug!(%error, "evaluation failed");
            self.loops.clear();
        }
        result
    }

    /// Evaluates an expression in a new scope frame seeded with `seed`.
    ///
    /// The frame is popped when evaluation finishes, whether it succeeded or
    /// not.
    ///
    /// # Errors
    /// Returns [`RuntimeError::RecursionLimit`] when nesting is already at the
    /// configured maximum, or any error raised by the expression's tokens.
    pub fn eval_expression(&mut self, expression: &Expression, seed: Frame) -> EvalResult<Value> {
        if self.depth >= self.config.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.config.max_depth });
        }

        let mut scoped = self.scoped(seed);
        scoped.eval_tokens(&expression.tokens)
    }

    /// Evaluates a single token.
    ///
    /// The evaluator dispatches based on token variant: literals, identifiers,
    /// bracketed groups, conditionals, loops, breaks, closures and calls.
    /// Operators are only meaningful inside reduction and are rejected here.
    ///
    /// # Errors
    /// Returns any [`RuntimeError`] raised by the token.
    pub fn eval_token(&mut self, token: &Token) -> EvalResult<Value> {
        match token {
            Token::Literal(value) => Ok(Value::from(*value)),
            Token::Ident(name) => Ok(self.scopes.resolve(name)),
            Token::Op(op) => Err(RuntimeError::UnexpectedOperator { op: *op }),
            Token::Expression(expression) => self.eval_expression(expression, Frame::new()),
            Token::Condition(condition) => self.eval_condition(condition),
            Token::Loop(looped) => self.eval_loop(looped),
            Token::Break(brk) => self.eval_break(brk),
            Token::Func(func) => Ok(Value::Func(Rc::clone(func))),
            Token::Call(call) => self.eval_call(call),
        }
    }
}
