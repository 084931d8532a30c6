use crate::{
    ast::{OpCode, Token},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

/// Operator tiers, tightest first. Within a tier the rightmost operator is
/// reduced first.
const TIERS: [&[OpCode]; 5] = [&[OpCode::Pow],
                               &[OpCode::Mul, OpCode::Div],
                               &[OpCode::Add, OpCode::Sub],
                               &[OpCode::Less, OpCode::Greater],
                               &[OpCode::Assign]];

/// An element of a chunk being reduced: either a token from the tree or
/// the literal result of an already reduced operator.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand<'t> {
    Source(&'t Token),
    Reduced(Option<f64>),
}

impl Operand<'_> {
    fn op(self) -> Option<OpCode> {
        match self {
            Self::Source(token) => token.op(),
            Self::Reduced(_) => None,
        }
    }
}

/// Picks the operator to reduce next: the rightmost operator of the tightest
/// tier present in the chunk.
fn next_operator(chunk: &[Operand<'_>]) -> Option<(usize, OpCode)> {
    TIERS.iter().find_map(|tier| {
                    chunk.iter()
                         .enumerate()
                         .rev()
                         .find_map(|(index, operand)| {
                             operand.op()
                                    .filter(|op| tier.contains(op))
                                    .map(|op| (index, op))
                         })
                })
}

impl Context {
    /// Evaluates the token list of an expression.
    ///
    /// The list is split into chunks on top-level commas and every chunk is
    /// reduced. The remaining operands of all chunks are then evaluated once,
    /// left to right. The value of the last one is the value of the list, or
    /// `null` if nothing is left.
    ///
    /// # Errors
    /// Returns any [`RuntimeError`] raised while reducing or evaluating.
    pub fn eval_tokens(&mut self, tokens: &[Token]) -> EvalResult<Value> {
        let mut chunks = tokens.split(|token| token.op() == Some(OpCode::Comma))
                               .map(|chunk| chunk.iter().map(Operand::Source).collect::<Vec<_>>())
                               .collect::<Vec<_>>();

        for chunk in &mut chunks {
            self.reduce_chunk(chunk)?;
        }

        let mut last = Value::Null;
        for operand in chunks.iter().flatten() {
            last = self.eval_operand(*operand)?;
        }
        Ok(last)
    }

    /// Reduces operators until none is left in the chunk.
    ///
    /// Each step replaces an operator and its two neighbours with a single
    /// literal holding the result.
    fn reduce_chunk(&mut self, chunk: &mut Vec<Operand<'_>>) -> EvalResult<()> {
        while let Some((index, op)) = next_operator(chunk) {
            let left = index.checked_sub(1)
                            .filter(|&i| chunk[i].op().is_none())
                            .ok_or(RuntimeError::MissingLeftOperand { op })?;
            let right = Some(index + 1).filter(|&i| chunk.get(i).is_some_and(|o| o.op().is_none()))
                                       .ok_or(RuntimeError::MissingRightOperand { op })?;

            let result = if op == OpCode::Assign {
                self.reduce_assignment(chunk[left], chunk[right])?
            } else {
                self.reduce_binary(op, chunk[left], chunk[right])?
            };

            chunk[left] = Operand::Reduced(result);
            chunk.remove(right);
            chunk.remove(index);
        }
        Ok(())
    }

    fn eval_operand(&mut self, operand: Operand<'_>) -> EvalResult<Value> {
        match operand {
            Operand::Source(token) => self.eval_token(token),
            Operand::Reduced(value) => Ok(Value::from(value)),
        }
    }

    /// `ident = value`
    ///
    /// Closures have no literal form, so an assignment of a closure reduces to
    /// `null` even though the closure itself is stored.
    fn reduce_assignment(&mut self,
                         target: Operand<'_>,
                         source: Operand<'_>)
                         -> EvalResult<Option<f64>> {
        let Operand::Source(Token::Ident(name)) = target else {
            return Err(RuntimeError::AssignmentToNonIdent);
        };

        let value = self.eval_operand(source)?;
        let literal = value.to_literal();
        self.scopes.assign(name, value);
        Ok(literal)
    }

    /// Arithmetic and comparison. Comparisons yield `1` or `0`.
    fn reduce_binary(&mut self,
                     op: OpCode,
                     left: Operand<'_>,
                     right: Operand<'_>)
                     -> EvalResult<Option<f64>> {
        let left = self.eval_operand(left)?.as_number(op)?;
        let right = self.eval_operand(right)?.as_number(op)?;

        let result = match op {
            OpCode::Add => left + right,
            OpCode::Sub => left - right,
            OpCode::Mul => left * right,
            OpCode::Div => left / right,
            OpCode::Pow => left.powf(right),
            OpCode::Less => f64::from(u8::from(left < right)),
            OpCode::Greater => f64::from(u8::from(left > right)),
            OpCode::Assign | OpCode::Comma => return Err(RuntimeError::UnexpectedOperator { op }),
        };
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn eval(source: &str) -> Result<Value, Error> {
        Context::new().run(source)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(eval("2 + 3 * 4"), Ok(Value::Number(14.0)));
        assert_eq!(eval("( 2 + 3 ) * 4"), Ok(Value::Number(20.0)));
    }

    #[test]
    fn power_reduces_rightmost_first() {
        assert_eq!(eval("2 ** 3 ** 2"), Ok(Value::Number(512.0)));
    }

    #[test]
    fn same_tier_reduces_right_to_left() {
        // 10 - (3 - 2)
        assert_eq!(eval("10 - 3 - 2"), Ok(Value::Number(9.0)));
        // 1 - (2 + 3)
        assert_eq!(eval("1 - 2 + 3"), Ok(Value::Number(-4.0)));
    }

    #[test]
    fn comparisons_yield_one_or_zero() {
        assert_eq!(eval("1 + 1 < 3"), Ok(Value::Number(1.0)));
        assert_eq!(eval("2 > 3"), Ok(Value::Number(0.0)));
    }

    #[test]
    fn assignment_reduces_last_and_chains() {
        let mut context = Context::new();
        assert_eq!(context.run("a = b = 2 + 1"), Ok(Value::Number(3.0)));
        assert_eq!(context.global("a"), Some(&Value::Number(3.0)));
        assert_eq!(context.global("b"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn closure_assignment_reduces_to_null() {
        let mut context = Context::new();
        assert_eq!(context.run("f = | x | ( x )"), Ok(Value::Null));
        assert!(matches!(context.global("f"), Some(Value::Func(_))));
    }

    #[test]
    fn commas_separate_chunks_and_last_value_wins() {
        assert_eq!(eval("x = 2, y = x * 5, y + 1"), Ok(Value::Number(11.0)));
        assert_eq!(eval("1, 2,"), Ok(Value::Number(2.0)));
    }

    #[test]
    fn juxtaposed_operands_evaluate_in_order() {
        assert_eq!(eval("1 2 3"), Ok(Value::Number(3.0)));
        assert_eq!(eval("()"), Ok(Value::Null));
    }

    #[test]
    fn missing_operands_are_errors() {
        assert_eq!(eval("1 +"),
                   Err(Error::Runtime(RuntimeError::MissingRightOperand { op: OpCode::Add })));
        assert_eq!(eval("* 2"),
                   Err(Error::Runtime(RuntimeError::MissingLeftOperand { op: OpCode::Mul })));
        assert_eq!(eval("true_missing_operand = +"),
                   Err(Error::Runtime(RuntimeError::MissingLeftOperand { op: OpCode::Add })));
        assert_eq!(eval("1, + 2"),
                   Err(Error::Runtime(RuntimeError::MissingLeftOperand { op: OpCode::Add })));
    }

    #[test]
    fn assignment_target_must_be_an_identifier() {
        assert_eq!(eval("1 = 2"), Err(Error::Runtime(RuntimeError::AssignmentToNonIdent)));
        assert_eq!(eval("( x ) = 2"),
                   Err(Error::Runtime(RuntimeError::AssignmentToNonIdent)));
    }

    #[test]
    fn operands_must_be_numbers() {
        assert_eq!(eval("null + 1"),
                   Err(Error::Runtime(RuntimeError::ExpectedNumber { op:    OpCode::Add,
                                                                     found: "null", })));
        assert_eq!(eval("f = |x|(x), f * 2"),
                   Err(Error::Runtime(RuntimeError::ExpectedNumber { op:    OpCode::Mul,
                                                                     found: "closure", })));
    }

    #[test]
    fn division_follows_float_semantics() {
        assert_eq!(eval("1 / 0"), Ok(Value::Number(f64::INFINITY)));
    }
}
