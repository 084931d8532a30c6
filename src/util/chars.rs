/// Returns `true` for the characters skipped between lexical units.
///
/// Only the space and the newline separate tokens; tabs are not part of the
/// language's whitespace.
///
/// # Example
/// ```
/// use brak::util::chars::is_whitespace;
///
/// assert!(is_whitespace(' '));
/// assert!(is_whitespace('\n'));
/// assert!(!is_whitespace('x'));
/// ```
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n')
}

/// Returns `true` for characters that may appear in a numeric literal run.
///
/// The decimal point is accepted anywhere in the run; whether the run is a
/// well-formed number is decided once the whole run has been consumed.
///
/// # Example
/// ```
/// use brak::util::chars::is_digit;
///
/// assert!(is_digit('7'));
/// assert!(is_digit('.'));
/// assert!(!is_digit('e'));
/// ```
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Returns `true` for characters that may appear in an identifier run:
/// ASCII letters, digits and the underscore.
///
/// # Example
/// ```
/// use brak::util::chars::is_ident;
///
/// assert!(is_ident('_'));
/// assert!(is_ident('Z'));
/// assert!(is_ident('4'));
/// assert!(!is_ident('-'));
/// ```
#[must_use]
pub const fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
