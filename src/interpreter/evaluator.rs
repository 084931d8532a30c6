/// Core evaluation logic and context management.
///
/// Contains the evaluation context, its configuration, the session entry
/// points and the dispatch over token kinds.
pub mod core;

/// Scope frames and identifier resolution.
///
/// Implements the frame stack with its permanent global frame, resolution
/// from the innermost frame outward, assignment with global fallback, and the
/// guard that pops a frame when an expression finishes.
pub mod scope;

/// Expression reduction.
///
/// Splits token lists into comma-delimited chunks and reduces each chunk by
/// operator tier, rightmost operator first.
pub mod reduce;

/// Control flow.
///
/// Evaluates conditionals, labeled loops and labeled breaks against the
/// loop-name stack.
pub mod control;

/// Function calls.
///
/// Invokes closures with a fresh parameter frame and provides the `print`
/// builtin.
pub mod function;

/// Output handling.
///
/// Routes `print` output to stdout or to an in-memory buffer.
pub mod print;
