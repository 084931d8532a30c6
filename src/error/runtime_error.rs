use thiserror::Error;

use crate::ast::OpCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
///
/// A runtime error aborts the whole top-level input; nothing is resumed after
/// a bad operand.
pub enum RuntimeError {
    /// A binary operator had nothing usable on its left.
    #[error("Runtime error: No left operand for '{op}'.")]
    MissingLeftOperand {
        /// The operator being reduced.
        op: OpCode,
    },
    /// A binary operator had nothing usable on its right.
    #[error("Runtime error: No right operand for '{op}'.")]
    MissingRightOperand {
        /// The operator being reduced.
        op: OpCode,
    },
    /// The left side of `=` was not an identifier.
    #[error("Runtime error: Assignment allowed only to idents.")]
    AssignmentToNonIdent,
    /// An arithmetic or comparison operand was not a number.
    #[error("Runtime error: Operand of '{op}' must be a number, found {found}.")]
    ExpectedNumber {
        /// The operator being applied.
        op:    OpCode,
        /// The kind of value that was found instead.
        found: &'static str,
    },
    /// A call named something that does not hold a closure.
    #[error("Runtime error: '{name}' is not a function.")]
    NotAFunction {
        /// The name that was called.
        name: String,
    },
    /// A loop was entered while a loop with the same name was still running.
    #[error("Runtime error: Loop '{name}' is already running.")]
    LoopAlreadyActive {
        /// The loop name.
        name: String,
    },
    /// A `break` named a loop that is not running.
    #[error("Runtime error: No running loop named '{name}' to break.")]
    UnknownLoop {
        /// The loop name the break targeted.
        name: String,
    },
    /// An operator was evaluated on its own instead of being reduced.
    #[error("Runtime error: Can't calculate value of '{op}'.")]
    UnexpectedOperator {
        /// The stray operator.
        op: OpCode,
    },
    /// Nested evaluation went deeper than the configured limit.
    #[error("Runtime error: Maximum recursion depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured depth limit.
        limit: usize,
    },
    /// A loop ran more iterations than the configured limit.
    #[error("Runtime error: Loop '{name}' exceeded {limit} iterations.")]
    IterationLimit {
        /// The loop name.
        name:  String,
        /// The configured iteration limit.
        limit: u64,
    },
}
