/// Core parsing state and the main loop.
///
/// Holds the stack of open bracket frames, drives the lexer one unit at a
/// time and attaches each closed frame to the construct waiting for it.
pub mod core;

/// Keyword handlers.
///
/// Implements `if`, `then`, `else`, `loop`, `break`, `with`, closures and
/// calls, each of which opens or reopens a slot on a structured token.
pub mod keyword;

/// Structured tokens under construction.
///
/// Models conditionals, loops, breaks, closures and calls whose bracketed
/// parts have not all been read yet, and seals them into finished tokens.
pub mod pending;

pub use self::core::{MAX_NESTING, ParseResult, parse};
