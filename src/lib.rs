//! # brak
//!
//! brak is a small expression language written in Rust. Source text is parsed
//! by a stack-driven bracket parser into a tree of tokens, and a tree-walking
//! evaluator runs that tree with block scopes, first-class closures, labeled
//! loops with named breaks, and conditional expressions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

/// Defines the structure of parsed code.
///
/// This module declares the `Token` enum and the structured constructs it
/// carries. Every bracketed region becomes an `Expression`; conditionals,
/// loops, breaks, closures and calls are sealed only once all their parts have
/// been parsed.
///
/// # Responsibilities
/// - Defines the closed set of token variants handed to the evaluator.
/// - Defines operator codes and their source spelling.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating code. Each carries a short message fit for display.
///
/// # Responsibilities
/// - Defines error enums for the parser and the evaluator.
/// - Wraps both in a single `Error` for callers that run source end to end.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and runtime values,
/// and exposes the evaluation context that callers keep between inputs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities.
///
/// Character classification shared by the lexer and the parser.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::{
        evaluator::core::{Config, Context},
        parser::parse,
        value::Value,
    },
};

/// Evaluates `source` in a fresh context and returns its value.
///
/// This is the one-shot form of [`Context::run`]; nothing carries over between
/// calls.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use brak::{Value, get_result};
///
/// assert_eq!(get_result("2 + 3 * 4").unwrap(), Value::Number(14.0));
///
/// // Calling something that is not a closure is a runtime error.
/// assert!(get_result("@nothing ( )").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Value, Error> {
    Context::new().run(source)
}
