/// Character classification predicates.
///
/// The lexer decides what kind of run starts at the cursor by asking these
/// predicates about single characters. They are pure and carry no state, so
/// the same source always classifies the same way.
///
/// # Responsibilities
/// - Recognize the whitespace skipped between lexical units.
/// - Recognize the characters that make up numeric literals.
/// - Recognize the characters that make up identifiers.
pub mod chars;
