use std::rc::Rc;

use crate::{
    ast::{Break, Condition, Expression, Func, FuncCall, Loop, Token},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// A structured token whose slots are filled as brackets close.
///
/// Each slot is `None` while it is waiting for the next closed frame. Slots
/// that are optional in the language start out as `Some(empty)` and are only
/// cleared when the matching keyword (`then`, `else`, `with`) asks for them.
#[derive(Debug, Clone, PartialEq)]
pub enum Pending {
    /// `if (…) then (…) else (…)`
    Condition {
        /// The tested expression.
        condition:   Option<Expression>,
        /// The truthy branch.
        then_branch: Option<Expression>,
        /// The falsy branch.
        else_branch: Option<Expression>,
    },
    /// `loop name (…)`
    Loop {
        /// Loop label.
        name: String,
        /// Loop body.
        body: Option<Expression>,
    },
    /// `break name with (…)`
    Break {
        /// Target loop label.
        name:  String,
        /// Break value.
        value: Option<Expression>,
    },
    /// `| param | (…)`
    Func {
        /// Parameter name.
        param: Option<String>,
        /// Closure body.
        body:  Option<Expression>,
    },
    /// `@name (…)`
    Call {
        /// Callee name.
        name:     String,
        /// Argument expression.
        argument: Option<Expression>,
    },
}

impl Pending {
    /// A conditional waiting for its condition, with both branches
    /// pre-filled as empty placeholders.
    #[must_use]
    pub fn condition() -> Self {
        Self::Condition { condition:   None,
                          then_branch: Some(Expression::default()),
                          else_branch: Some(Expression::default()), }
    }

    /// A break whose value defaults to an empty expression.
    #[must_use]
    pub fn break_to(name: String) -> Self {
        Self::Break { name,
                      value: Some(Expression::default()) }
    }

    /// The keyword that introduces this construct, for diagnostics.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Condition { .. } => "if",
            Self::Loop { .. } => "loop",
            Self::Break { .. } => "break",
            Self::Func { .. } => "|",
            Self::Call { .. } => "@",
        }
    }

    /// Puts a closed frame into the first empty slot.
    ///
    /// A conditional fills its condition, then its `then` branch, then its
    /// `else` branch. If no slot is empty the expression is handed back so the
    /// caller can keep it as a plain bracketed group.
    pub fn fill(&mut self, expression: Expression) -> Result<(), Expression> {
        let slot = match self {
            Self::Loop { body, .. } | Self::Func { body, .. } => body,
            Self::Break { value, .. } => value,
            Self::Call { argument, .. } => argument,
            Self::Condition { condition,
                              then_branch,
                              else_branch, } => {
                if condition.is_none() {
                    condition
                } else if then_branch.is_none() {
                    then_branch
                } else {
                    else_branch
                }
            },
        };

        if slot.is_some() {
            return Err(expression);
        }
        *slot = Some(expression);
        Ok(())
    }

    /// Converts the construct into a finished token.
    ///
    /// # Errors
    /// Returns [`ParseError::IncompleteConstruct`] if any slot is still empty.
    pub fn seal(self) -> ParseResult<Token> {
        let construct = self.keyword();
        let incomplete = || ParseError::IncompleteConstruct { construct };

        let token = match self {
            Self::Condition { condition,
                              then_branch,
                              else_branch, } => {
                Token::Condition(Condition { condition:   condition.ok_or_else(incomplete)?,
                                             then_branch: then_branch.ok_or_else(incomplete)?,
                                             else_branch: else_branch.ok_or_else(incomplete)?, })
            },
            Self::Loop { name, body } => Token::Loop(Loop { name,
                                                            body: body.ok_or_else(incomplete)? }),
            Self::Break { name, value } => {
                Token::Break(Break { name,
                                     value: value.ok_or_else(incomplete)? })
            },
            Self::Func { param, body } => {
                Token::Func(Rc::new(Func { param,
                                           body: body.ok_or_else(incomplete)? }))
            },
            Self::Call { name, argument } => {
                let argument = argument.ok_or_else(incomplete)?;
                Token::Call(FuncCall { name,
                                       argument: (!argument.is_empty()).then_some(argument) })
            },
        };
        Ok(token)
    }
}
