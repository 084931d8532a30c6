use std::{fmt, rc::Rc};

/// A binary operator code.
///
/// Operators only ever appear inside an [`Expression`]'s token list. They
/// are reduced away by the evaluator and never evaluated on their own. The
/// comma is the one exception: it is never reduced and instead separates the
/// list into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**`
    Pow,
    /// `=`
    Assign,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `,`
    Comma,
}

impl OpCode {
    /// Returns the operator as it is written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Assign => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Comma => ",",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The universal grouping node.
///
/// Every bracketed `( … )` region parses to exactly one `Expression`, and the
/// program itself is the root `Expression`. Tokens keep their left-to-right
/// source order; operator precedence is applied at evaluation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    /// The tokens between the brackets, in source order.
    pub tokens: Vec<Token>,
}

impl Expression {
    /// Wraps a token list.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Returns `true` for `( )`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// `if (condition) then (…) else (…)`.
///
/// Branches that were never written are empty expressions and evaluate to
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The tested expression.
    pub condition:   Expression,
    /// Evaluated when the condition is truthy.
    pub then_branch: Expression,
    /// Evaluated when the condition is falsy.
    pub else_branch: Expression,
}

/// `loop name (body)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    /// The label a `break` uses to end this loop.
    pub name: String,
    /// Evaluated once per iteration.
    pub body: Expression,
}

/// `break name` or `break name with (value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    /// The label of the loop to end.
    pub name:  String,
    /// The value the break produces; empty when no `with` was given.
    pub value: Expression,
}

/// `| param | (body)`, a closure.
///
/// A `Func` is both a syntax node and the runtime value bound to a variable
/// that holds a function. The body is shared, never copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    /// The parameter name, or `None` for `| |`.
    pub param: Option<String>,
    /// The closure body.
    pub body:  Expression,
}

/// `@name (argument)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    /// The callee: a variable holding a closure, or the `print` builtin.
    pub name:     String,
    /// The argument expression; `None` for an empty `( )`.
    pub argument: Option<Expression>,
}

/// A node of the program tree.
///
/// The set of variants is closed. Structured variants reach this type only
/// once the parser has filled every one of their slots, so the evaluator never
/// sees a half-built construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric constant, or `None` for `null`. Character literals lower to
    /// their character code.
    Literal(Option<f64>),
    /// A variable reference or assignment target.
    Ident(String),
    /// A binary operator or the chunk-separating comma.
    Op(OpCode),
    /// A bracketed group.
    Expression(Expression),
    /// A conditional.
    Condition(Condition),
    /// A labeled loop.
    Loop(Loop),
    /// A labeled break.
    Break(Break),
    /// A closure literal.
    Func(Rc<Func>),
    /// A function call.
    Call(FuncCall),
}

impl Token {
    /// Returns the operator code if this token is an operator.
    #[must_use]
    pub const fn op(&self) -> Option<OpCode> {
        match self {
            Self::Op(code) => Some(*code),
            _ => None,
        }
    }
}
