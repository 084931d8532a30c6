/// The evaluator module executes the token tree and computes results.
///
/// The evaluator walks the tree against a live stack of scope frames,
/// reduces operator chunks by precedence, resolves and assigns identifiers,
/// and runs conditionals, labeled loops and closure calls.
///
/// # Responsibilities
/// - Reduces operators by tier and evaluates what remains left to right.
/// - Manages scope frames and the loop-name stack.
/// - Reports runtime errors such as missing operands or calls to
///   non-functions.
pub mod evaluator;
/// The lexer module reads lexical units from source text.
///
/// The lexer is a cursor the parser drives one unit at a time: reserved
/// words, numeric runs, identifier runs and character literals.
///
/// # Responsibilities
/// - Matches the longest reserved word at the cursor, or nothing.
/// - Consumes numeric and identifier runs by character class.
/// - Reports unclosed character literals.
pub mod lexer;
/// The parser module builds the token tree from source text.
///
/// The parser keeps an explicit stack of open bracket frames and attaches
/// each closed frame to the construct waiting for it.
///
/// # Responsibilities
/// - Converts source into a root expression of nested tokens.
/// - Fills the slots of conditionals, loops, breaks, closures and calls.
/// - Reports unbalanced brackets and malformed keyword constructs.
pub mod parser;
/// The value module defines the runtime values.
///
/// Every expression evaluates to `null`, a number, or a closure.
pub mod value;
