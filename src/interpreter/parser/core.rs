use crate::{
    ast::{Expression, Token},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Reserved},
        parser::pending::Pending,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest allowed nesting of brackets. Trees are dropped and evaluated
/// recursively, so the parser refuses to build deeper ones.
pub const MAX_NESTING: usize = 1024;

/// One element of an open bracket frame: either a finished token or a
/// structured token still waiting for some of its bracketed parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A token that needs nothing more.
    Token(Token),
    /// A construct with open slots.
    Pending(Pending),
}

/// The stack-driven parser.
///
/// Instead of recursing on `(`, the parser keeps an explicit stack of open
/// bracket frames. The root frame is the program and is never popped; every
/// `(` pushes a frame onto `open` and every `)` pops one and attaches it to
/// whatever is waiting for it in the frame below.
#[derive(Debug)]
pub struct Parser<'src> {
    pub(super) lexer: Lexer<'src>,
    root:             Vec<Node>,
    open:             Vec<Vec<Node>>,
}

/// Parses source text into the root [`Expression`] of a program.
///
/// Parsing holds no state outside the returned tree, so parsing the same
/// text twice yields equal trees.
///
/// # Errors
/// Returns a [`ParseError`] for unknown operators, unclosed literals,
/// unbalanced brackets or malformed keyword constructs.
///
/// # Example
/// ```
/// use brak::{
///     ast::{OpCode, Token},
///     interpreter::parser::parse,
/// };
///
/// let program = parse("x = 'a'").unwrap();
/// assert_eq!(program.tokens,
///            vec![Token::Ident("x".into()), Token::Op(OpCode::Assign), Token::Literal(Some(97.0))]);
/// ```
pub fn parse(source: &str) -> ParseResult<Expression> {
    Parser::new(source).parse()
}

impl<'src> Parser<'src> {
    /// Creates a parser with only the root frame open.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { lexer: Lexer::new(source),
               root:  Vec::new(),
               open:  Vec::new(), }
    }

    /// Consumes the whole input and returns the program.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered, or
    /// [`ParseError::UnclosedBracket`] if brackets remain open at the end.
    pub fn parse(mut self) -> ParseResult<Expression> {
        while !self.lexer.is_at_end() {
            self.step()?;
        }

        if !self.open.is_empty() {
            return Err(ParseError::UnclosedBracket { open: self.open.len() });
        }

        seal_frame(self.root)
    }

    /// Parses one reserved word, literal or identifier.
    fn step(&mut self) -> ParseResult<()> {
        let start = self.lexer.position();

        if let Some(word) = self.lexer.reserved() {
            return self.reserved(word, start);
        }

        if let Some(run) = self.lexer.number() {
            let value = run.parse::<f64>()
                           .map_err(|_| ParseError::InvalidNumber { text:     run.to_owned(),
                                                                    position: start, })?;
            self.push(Token::Literal(Some(value)));
            return Ok(());
        }

        if let Some(name) = self.lexer.ident() {
            self.push(Token::Ident(name.to_owned()));
            return Ok(());
        }

        let text = self.lexer.unknown_run().to_owned();
        Err(ParseError::UnknownOperator { text,
                                          position: start })
    }

    fn reserved(&mut self, word: Reserved, start: usize) -> ParseResult<()> {
        if let Some(op) = word.op() {
            self.push(Token::Op(op));
            return Ok(());
        }

        match word {
            Reserved::LParen => self.open_frame(start),
            Reserved::RParen => self.close_frame(start),
            Reserved::If => self.parse_if(),
            Reserved::Then | Reserved::Else => self.parse_branch(word, start),
            Reserved::Loop => self.parse_loop(),
            Reserved::Break => self.parse_break(),
            Reserved::With => self.parse_with(start),
            Reserved::Pipe => self.parse_func(),
            Reserved::At => self.parse_call(),
            Reserved::Null => {
                self.push(Token::Literal(None));
                Ok(())
            },
            Reserved::Quote => {
                let code = self.lexer.char_literal(start)?;
                self.push(Token::Literal(Some(code)));
                Ok(())
            },
            _ => Err(ParseError::UnknownOperator { text:     format!("{word:?}"),
                                                   position: start, }),
        }
    }

    /// The innermost open frame.
    pub(super) fn top(&mut self) -> &mut Vec<Node> {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    pub(super) fn push(&mut self, token: Token) {
        self.top().push(Node::Token(token));
    }

    pub(super) fn push_pending(&mut self, pending: Pending) {
        self.top().push(Node::Pending(pending));
    }

    /// Opens a frame for the `(` at `position`.
    ///
    /// # Errors
    /// Returns [`ParseError::NestingLimit`] if [`MAX_NESTING`] frames are
    /// already open.
    pub(super) fn open_frame(&mut self, position: usize) -> ParseResult<()> {
        if self.open.len() >= MAX_NESTING {
            return Err(ParseError::NestingLimit { limit: MAX_NESTING,
                                                  position });
        }
        self.open.push(Vec::new());
        Ok(())
    }

    /// Closes the innermost frame and attaches it below.
    ///
    /// The closed frame fills the first empty slot of the construct most
    /// recently pushed onto the frame below. When there is no such slot it
    /// becomes a plain bracketed [`Token::Expression`].
    fn close_frame(&mut self, position: usize) -> ParseResult<()> {
        let Some(frame) = self.open.pop() else {
            return Err(ParseError::UnopenedBracket { position });
        };
        let expression = seal_frame(frame)?;

        let top = self.top();
        let expression = match top.last_mut() {
            Some(Node::Pending(pending)) => match pending.fill(expression) {
                Ok(()) => return Ok(()),
                Err(expression) => expression,
            },
            _ => expression,
        };
        top.push(Node::Token(Token::Expression(expression)));
        Ok(())
    }
}

/// Seals every node of a closed frame into a finished [`Expression`].
fn seal_frame(frame: Vec<Node>) -> ParseResult<Expression> {
    let tokens = frame.into_iter()
                      .map(|node| match node {
                          Node::Token(token) => Ok(token),
                          Node::Pending(pending) => pending.seal(),
                      })
                      .collect::<ParseResult<Vec<_>>>()?;
    Ok(Expression::new(tokens))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{Break, Condition, Func, FuncCall, Loop, OpCode};

    fn number(value: f64) -> Token {
        Token::Literal(Some(value))
    }

    fn group(tokens: Vec<Token>) -> Expression {
        Expression::new(tokens)
    }

    #[test]
    fn flat_expression_keeps_source_order() {
        assert_eq!(parse("2 + 3 * 4").unwrap().tokens,
                   vec![number(2.0),
                        Token::Op(OpCode::Add),
                        number(3.0),
                        Token::Op(OpCode::Mul),
                        number(4.0)]);
    }

    #[test]
    fn brackets_become_nested_expressions() {
        assert_eq!(parse("( 2 + 3 ) * 4").unwrap().tokens,
                   vec![Token::Expression(group(vec![number(2.0),
                                                     Token::Op(OpCode::Add),
                                                     number(3.0)])),
                        Token::Op(OpCode::Mul),
                        number(4.0)]);
    }

    #[test]
    fn numbers_and_identifiers_split_where_classes_change() {
        assert_eq!(parse("12abc null").unwrap().tokens,
                   vec![number(12.0), Token::Ident("abc".into()), Token::Literal(None)]);
    }

    #[test]
    fn conditional_fills_branches_in_order() {
        let expected = Token::Condition(Condition { condition:   group(vec![number(0.0)]),
                                                    then_branch: group(vec![number(1.0)]),
                                                    else_branch: group(vec![number(2.0)]), });
        assert_eq!(parse("if ( 0 ) then ( 1 ) else ( 2 )").unwrap().tokens,
                   vec![expected]);
    }

    #[test]
    fn else_without_then_leaves_empty_then() {
        let expected = Token::Condition(Condition { condition:   group(vec![number(1.0)]),
                                                    then_branch: Expression::default(),
                                                    else_branch: group(vec![number(2.0)]), });
        assert_eq!(parse("if (1) else (2)").unwrap().tokens, vec![expected]);
    }

    #[test]
    fn bracket_after_complete_condition_is_plain_group() {
        let tokens = parse("if (1) then (2) else (3) (4)").unwrap().tokens;
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::Expression(group(vec![number(4.0)])));
    }

    #[test]
    fn named_loop_with_break_value() {
        let inner = Token::Loop(Loop { name: "inner".into(),
                                       body: group(vec![Token::Break(Break { name:  "outer".into(),
                                                                             value:
                                                                                 group(vec![number(9.0)]), })]), });
        let expected = Token::Loop(Loop { name: "outer".into(),
                                          body: group(vec![inner]), });
        assert_eq!(parse("loop outer ( loop inner ( break outer with ( 9 ) ) )").unwrap().tokens,
                   vec![expected]);
    }

    #[test]
    fn break_without_with_has_empty_value() {
        assert_eq!(parse("break l").unwrap().tokens,
                   vec![Token::Break(Break { name:  "l".into(),
                                             value: Expression::default(), })]);
    }

    #[test]
    fn closures_and_calls() {
        let func = Token::Func(Rc::new(Func { param: Some("n".into()),
                                              body:  group(vec![Token::Ident("n".into()),
                                                                Token::Op(OpCode::Mul),
                                                                number(2.0)]), }));
        assert_eq!(parse("f = | n | ( n * 2 )").unwrap().tokens,
                   vec![Token::Ident("f".into()), Token::Op(OpCode::Assign), func]);

        assert_eq!(parse("@f ( 21 ) @g ( )").unwrap().tokens,
                   vec![Token::Call(FuncCall { name:     "f".into(),
                                               argument: Some(group(vec![number(21.0)])), }),
                        Token::Call(FuncCall { name:     "g".into(),
                                               argument: None, })]);
    }

    #[test]
    fn parameterless_closure() {
        let Token::Func(func) = &parse("||(1)").unwrap().tokens[0] else {
            panic!("expected a closure");
        };
        assert_eq!(func.param, None);
    }

    #[test]
    fn parsing_is_repeatable() {
        let source = "f = |x|(if (x > 1) then (x * @f(x - 1)) else (1)), @f(5)";
        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn closing_without_opening_is_an_error() {
        assert_eq!(parse("1 + )"), Err(ParseError::UnopenedBracket { position: 4 }));
    }

    #[test]
    fn bracket_left_open_is_an_error() {
        assert_eq!(parse("((1)"), Err(ParseError::UnclosedBracket { open: 1 }));
    }

    #[test]
    fn keyword_syntax_errors() {
        assert_eq!(parse("if 1"),
                   Err(ParseError::ExpectedOpenBracket { after:    "if",
                                                         position: 3, }));
        assert_eq!(parse("1 then (2)"),
                   Err(ParseError::MisplacedKeyword { keyword:  "then",
                                                      expected: "if",
                                                      position: 2, }));
        assert_eq!(parse("x with (2)"),
                   Err(ParseError::MisplacedKeyword { keyword:  "with",
                                                      expected: "break",
                                                      position: 2, }));
        assert_eq!(parse("| x (x)"), Err(ParseError::UnclosedPipe { position: 4 }));
        assert_eq!(parse("loop (1)"),
                   Err(ParseError::ExpectedName { after:    "loop",
                                                  position: 5, }));
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(parse("1 % 2"),
                   Err(ParseError::UnknownOperator { text:     "%".into(),
                                                     position: 2, }));
        assert_eq!(parse("1.2.3"),
                   Err(ParseError::InvalidNumber { text:     "1.2.3".into(),
                                                   position: 0, }));
        assert_eq!(parse("x = 'a"), Err(ParseError::UnclosedLiteral { position: 4 }));
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse(&nested(MAX_NESTING)).is_ok());
        assert_eq!(parse(&nested(100_000)),
                   Err(ParseError::NestingLimit { limit:    MAX_NESTING,
                                                  position: MAX_NESTING, }));
        assert_eq!(parse(&"if ( ".repeat(MAX_NESTING + 1)),
                   Err(ParseError::NestingLimit { limit:    MAX_NESTING,
                                                  position: MAX_NESTING * 5 + 3, }));
    }
}
