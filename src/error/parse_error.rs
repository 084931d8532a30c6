use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant that can be pinned to a place in the source carries the byte
/// offset at which the problem was detected.
pub enum ParseError {
    /// A run of characters that is neither a reserved word, a number nor an
    /// identifier.
    #[error("Error at {position}: Unknown operator '{text}'.")]
    UnknownOperator {
        /// The offending run.
        text:     String,
        /// Byte offset of the run.
        position: usize,
    },
    /// A character literal was opened with `'` but never closed, or was empty.
    #[error("Error at {position}: Unclosed literal.")]
    UnclosedLiteral {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// A `)` appeared with no matching `(`.
    #[error("Error at {position}: Bracket not opened before closing.")]
    UnopenedBracket {
        /// Byte offset of the closing bracket.
        position: usize,
    },
    /// Input ended while brackets were still open.
    #[error("Error at end of input: {open} bracket(s) left open.")]
    UnclosedBracket {
        /// How many brackets were still open.
        open: usize,
    },
    /// A keyword that must be followed by `(` was not.
    #[error("Error at {position}: Expected '(' after '{after}'.")]
    ExpectedOpenBracket {
        /// The keyword that required the bracket.
        after:    &'static str,
        /// Byte offset where the bracket was expected.
        position: usize,
    },
    /// A continuation keyword (`then`, `else`, `with`) was used without its
    /// required predecessor.
    #[error("Error at {position}: '{keyword}' must directly follow '{expected}'.")]
    MisplacedKeyword {
        /// The misplaced keyword.
        keyword:  &'static str,
        /// The construct it has to follow.
        expected: &'static str,
        /// Byte offset of the keyword.
        position: usize,
    },
    /// A keyword that introduces a name was not followed by one.
    #[error("Error at {position}: Expected a name after '{after}'.")]
    ExpectedName {
        /// The keyword that required the name.
        after:    &'static str,
        /// Byte offset where the name was expected.
        position: usize,
    },
    /// A function parameter list was opened with `|` but not closed.
    #[error("Error at {position}: Expected closing '|' after function parameter.")]
    UnclosedPipe {
        /// Byte offset where the closing pipe was expected.
        position: usize,
    },
    /// A numeric run could not be read as a 64-bit float.
    #[error("Error at {position}: Invalid number '{text}'.")]
    InvalidNumber {
        /// The numeric run as written.
        text:     String,
        /// Byte offset of the run.
        position: usize,
    },
    /// Brackets were nested deeper than the parser allows.
    #[error("Error at {position}: Brackets nested deeper than {limit}.")]
    NestingLimit {
        /// The nesting limit.
        limit:    usize,
        /// Byte offset of the first bracket past the limit.
        position: usize,
    },
    /// A structured construct was sealed with one of its parts missing.
    #[error("Error: Incomplete '{construct}' construct.")]
    IncompleteConstruct {
        /// The keyword naming the construct.
        construct: &'static str,
    },
}
