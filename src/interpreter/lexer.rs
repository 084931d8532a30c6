use logos::Logos;

use crate::{
    ast::OpCode,
    error::ParseError,
    util::chars::{is_digit, is_ident, is_whitespace},
};

/// The fixed set of reserved words: operators, punctuation and keywords.
///
/// None of these can be used as an identifier. The lexer only ever asks logos
/// for a single reserved word anchored at the cursor, so logos' longest-match
/// rule gives exactly "the longest reserved word the input starts with", and an
/// input that starts with none of them is rejected without consuming anything.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `'`
    #[token("'")]
    Quote,
    /// `|`
    #[token("|")]
    Pipe,
    /// `,`
    #[token(",")]
    Comma,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    Pow,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `null`
    #[token("null")]
    Null,
    /// `loop`
    #[token("loop")]
    Loop,
    /// `break`
    #[token("break")]
    Break,
    /// `with`
    #[token("with")]
    With,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `@`
    #[token("@")]
    At,
}

impl Reserved {
    /// Returns the operator this reserved word stands for, if it is one.
    #[must_use]
    pub const fn op(self) -> Option<OpCode> {
        match self {
            Self::Plus => Some(OpCode::Add),
            Self::Minus => Some(OpCode::Sub),
            Self::Star => Some(OpCode::Mul),
            Self::Slash => Some(OpCode::Div),
            Self::Pow => Some(OpCode::Pow),
            Self::Equals => Some(OpCode::Assign),
            Self::Less => Some(OpCode::Less),
            Self::Greater => Some(OpCode::Greater),
            Self::Comma => Some(OpCode::Comma),
            _ => None,
        }
    }
}

/// A cursor over the source text.
///
/// The parser drives the lexer one unit at a time and decides, per call, what
/// kind of unit it wants next. Every attempt skips leading whitespace first.
/// A failed attempt leaves the cursor where the whitespace ended.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source:   &'src str,
    position: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { source,
               position: 0 }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` once only whitespace (or nothing) is left.
    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.position >= self.source.len()
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Consumes characters while `test` holds and returns the consumed run.
    ///
    /// Returns `None`, consuming nothing, when the very first character fails
    /// the test or the input is exhausted.
    ///
    /// # Example
    /// ```
    /// use brak::{interpreter::lexer::Lexer, util::chars::is_digit};
    ///
    /// let mut lexer = Lexer::new("12.5+x");
    /// assert_eq!(lexer.pop_while(is_digit), Some("12.5"));
    /// assert_eq!(lexer.pop_while(is_digit), None);
    /// assert_eq!(lexer.position(), 4);
    /// ```
    pub fn pop_while(&mut self, test: impl Fn(char) -> bool) -> Option<&'src str> {
        let rest = self.rest();
        let len = rest.char_indices()
                      .find(|&(_, c)| !test(c))
                      .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return None;
        }
        self.position += len;
        Some(&rest[..len])
    }

    /// Skips spaces and newlines.
    pub fn skip_whitespace(&mut self) {
        self.pop_while(is_whitespace);
    }

    /// Matches the longest reserved word at the cursor.
    ///
    /// On success the word is consumed. If the input does not start with a
    /// complete reserved word nothing past the skipped whitespace is consumed,
    /// so `lox` leaves the cursor on `l` while `loopy` yields `loop` and
    /// leaves `y`.
    pub fn reserved(&mut self) -> Option<Reserved> {
        self.skip_whitespace();
        let mut words = Reserved::lexer(self.rest());
        match words.next() {
            Some(Ok(word)) => {
                self.position += words.span().end;
                Some(word)
            },
            _ => None,
        }
    }

    /// Consumes a numeric run such as `42` or `3.5`.
    pub fn number(&mut self) -> Option<&'src str> {
        self.skip_whitespace();
        self.pop_while(is_digit)
    }

    /// Consumes an identifier run.
    pub fn ident(&mut self) -> Option<&'src str> {
        self.skip_whitespace();
        self.pop_while(is_ident)
    }

    /// Reads the rest of a character literal whose opening `'` started at
    /// `start` and has already been consumed.
    ///
    /// The literal's value is the first UTF-16 code unit of its first
    /// character, so characters outside the basic plane yield their high
    /// surrogate.
    ///
    /// # Errors
    /// Returns [`ParseError::UnclosedLiteral`] when the closing quote is
    /// missing or the literal is empty.
    pub fn char_literal(&mut self, start: usize) -> Result<f64, ParseError> {
        let first = self.pop_while(|c| c != '\'').and_then(|body| body.chars().next());
        match first {
            Some(c) if self.rest().starts_with('\'') => {
                self.position += 1;
                Ok(f64::from(c.encode_utf16(&mut [0; 2])[0]))
            },
            _ => Err(ParseError::UnclosedLiteral { position: start }),
        }
    }

    /// Consumes the run of characters the cursor is stuck on, for error
    /// reporting.
    pub fn unknown_run(&mut self) -> &'src str {
        self.skip_whitespace();
        let stuck = |c: char| !is_whitespace(c) && !is_ident(c) && !is_digit(c);
        if let Some(run) = self.pop_while(stuck) {
            return run;
        }
        let rest = self.rest();
        let len = rest.chars().next().map_or(0, char::len_utf8);
        self.position += len;
        &rest[..len]
    }
}
