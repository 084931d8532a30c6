use crate::{
    error::ParseError,
    interpreter::{
        lexer::Reserved,
        parser::{
            core::{Node, ParseResult, Parser},
            pending::Pending,
        },
    },
};

impl Parser<'_> {
    /// Requires the next unit to be `(` and opens a frame for it.
    fn expect_open(&mut self, after: &'static str) -> ParseResult<()> {
        self.lexer.skip_whitespace();
        let position = self.lexer.position();
        match self.lexer.reserved() {
            Some(Reserved::LParen) => self.open_frame(position),
            _ => Err(ParseError::ExpectedOpenBracket { after, position }),
        }
    }

    /// Reads the identifier run that names a loop or a callee.
    fn expect_name(&mut self, after: &'static str) -> ParseResult<String> {
        self.lexer.skip_whitespace();
        let position = self.lexer.position();
        self.lexer
            .ident()
            .map(str::to_owned)
            .ok_or(ParseError::ExpectedName { after, position })
    }

    /// `if (`
    ///
    /// Pushes a conditional whose branches are empty placeholders, so the
    /// frame opened here becomes its condition.
    pub(super) fn parse_if(&mut self) -> ParseResult<()> {
        self.push_pending(Pending::condition());
        self.expect_open("if")
    }

    /// `then (` or `else (`
    ///
    /// Clears the matching placeholder of the conditional right before the
    /// keyword so that the frame opened here fills it.
    pub(super) fn parse_branch(&mut self, word: Reserved, start: usize) -> ParseResult<()> {
        let keyword = if word == Reserved::Then { "then" } else { "else" };

        let slot = match self.top().last_mut() {
            Some(Node::Pending(Pending::Condition { then_branch,
                                                    else_branch,
                                                    .. })) => {
                if word == Reserved::Then {
                    then_branch
                } else {
                    else_branch
                }
            },
            _ => {
                return Err(ParseError::MisplacedKeyword { keyword,
                                                          expected: "if",
                                                          position: start });
            },
        };
        *slot = None;

        self.expect_open(keyword)
    }

    /// `loop name (`
    pub(super) fn parse_loop(&mut self) -> ParseResult<()> {
        let name = self.expect_name("loop")?;
        self.push_pending(Pending::Loop { name,
                                          body: None });
        self.expect_open("loop")
    }

    /// `break name`
    ///
    /// No bracket follows; the break carries an empty value until a `with`
    /// replaces it.
    pub(super) fn parse_break(&mut self) -> ParseResult<()> {
        let name = self.expect_name("break")?;
        self.push_pending(Pending::break_to(name));
        Ok(())
    }

    /// `with (`
    pub(super) fn parse_with(&mut self, start: usize) -> ParseResult<()> {
        match self.top().last_mut() {
            Some(Node::Pending(Pending::Break { value, .. })) => *value = None,
            _ => {
                return Err(ParseError::MisplacedKeyword { keyword:  "with",
                                                          expected: "break",
                                                          position: start, });
            },
        }
        self.expect_open("with")
    }

    /// `| param | (` or `| | (`
    pub(super) fn parse_func(&mut self) -> ParseResult<()> {
        let param = self.lexer.ident().map(str::to_owned);

        self.lexer.skip_whitespace();
        let position = self.lexer.position();
        if self.lexer.reserved() != Some(Reserved::Pipe) {
            return Err(ParseError::UnclosedPipe { position });
        }

        self.push_pending(Pending::Func { param,
                                          body: None });
        self.expect_open("|")
    }

    /// `@name (`
    pub(super) fn parse_call(&mut self) -> ParseResult<()> {
        let name = self.expect_name("@")?;
        self.push_pending(Pending::Call { name,
                                          argument: None });
        self.expect_open("@")
    }
}
