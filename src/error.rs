use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unknown operators, unclosed literals, unbalanced brackets and
/// malformed keyword constructs.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: missing
/// operands, non-numeric operands, calls to non-functions, loop name clashes
/// and resource limits.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// A failure from either phase of running a piece of source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
