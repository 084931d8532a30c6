use crate::{
    ast::{Break, Condition, Loop},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::Frame,
        },
        value::Value,
    },
};

impl Context {
    /// Evaluates a conditional.
    ///
    /// The condition is truthy when it is a nonzero number or a closure. A
    /// branch that was never written is empty and yields `null`.
    ///
    /// # Errors
    /// Propagates any error raised by the condition or the chosen branch.
    pub fn eval_condition(&mut self, condition: &Condition) -> EvalResult<Value> {
        let tested = self.eval_expression(&condition.condition, Frame::new())?;
        let branch = if tested.is_truthy() {
            &condition.then_branch
        } else {
            &condition.else_branch
        };
        self.eval_expression(branch, Frame::new())
    }

    /// Evaluates a labeled loop.
    ///
    /// The loop's name is pushed onto the loop-name stack and the body is
    /// evaluated, each time in a fresh frame, for as long as that name is the
    /// innermost running loop. A `break` naming this loop or any loop
    /// around it ends it. The value is that of the last iteration.
    ///
    /// # Errors
    /// - [`RuntimeError::LoopAlreadyActive`] if a loop with the same name is
    ///   already running.
    /// - [`RuntimeError::IterationLimit`] if the configured iteration limit is
    ///   reached.
    /// - Any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use brak::interpreter::{evaluator::core::Context, value::Value};
    ///
    /// let mut context = Context::new();
    /// let value = context.run("i = 0, loop count ( i = i + 1, if ( i > 4 ) then ( break count with ( i ) ) )")
    ///                    .unwrap();
    /// assert_eq!(value, Value::Number(5.0));
    /// ```
    pub fn eval_loop(&mut self, looped: &Loop) -> EvalResult<Value> {
        if self.loops.contains(&looped.name) {
            return Err(RuntimeError::LoopAlreadyActive { name: looped.name.clone() });
        }

        let base = self.loops.len();
        self.loops.push(looped.name.clone());
        tracing::trace!(name = %looped.name, "entering loop");

        let result = self.run_iterations(looped);
        if result.is_err() {
            self.loops.truncate(base);
        }

        tracing::trace!(name = %looped.name, "leaving loop");
        result
    }

    fn run_iterations(&mut self, looped: &Loop) -> EvalResult<Value> {
        let mut last = Value::Null;
        let mut iterations: u64 = 0;

        while self.loops.last() == Some(&looped.name) {
            if let Some(limit) = self.config.max_iterations
               && iterations >= limit
            {
                return Err(RuntimeError::IterationLimit { name: looped.name.clone(),
                                                          limit });
            }
            iterations += 1;
            last = self.eval_expression(&looped.body, Frame::new())?;
        }

        Ok(last)
    }

    /// Evaluates a labeled break.
    ///
    /// The break's value is evaluated first. Then the loop-name stack is
    /// truncated through the innermost loop with the break's name, which ends
    /// that loop and every loop nested inside it.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownLoop`] if no running loop has that name.
    /// - Any error raised by the break's value.
    pub fn eval_break(&mut self, brk: &Break) -> EvalResult<Value> {
        let value = self.eval_expression(&brk.value, Frame::new())?;

        let Some(position) = self.loops.iter().rposition(|name| *name == brk.name) else {
            return Err(RuntimeError::UnknownLoop { name: brk.name.clone() });
        };

        tracing::debug!(name = %brk.name, ended = self.loops.len() - position, "breaking out of loop");
        self.loops.truncate(position);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::Error, interpreter::evaluator::core::Config};

    fn eval(source: &str) -> Result<Value, Error> {
        Context::new().run(source)
    }

    #[test]
    fn zero_and_null_are_falsy() {
        assert_eq!(eval("if ( 0 ) then ( 1 ) else ( 2 )"), Ok(Value::Number(2.0)));
        assert_eq!(eval("if ( null ) then ( 1 ) else ( 2 )"), Ok(Value::Number(2.0)));
        assert_eq!(eval("if ( 5 ) then ( 1 ) else ( 2 )"), Ok(Value::Number(1.0)));
        assert_eq!(eval("if ( | | ( 0 ) ) then ( 1 ) else ( 2 )"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn missing_branch_is_null() {
        assert_eq!(eval("if ( 0 ) then ( 1 )"), Ok(Value::Null));
        assert_eq!(eval("if ( 1 ) else ( 1 )"), Ok(Value::Null));
    }

    #[test]
    fn break_ends_named_loop_and_loops_inside_it() {
        assert_eq!(eval("loop outer ( loop inner ( break outer with ( 9 ) ) )"),
                   Ok(Value::Number(9.0)));
    }

    #[test]
    fn inner_break_leaves_outer_loop_running() {
        let mut context = Context::new();
        let source = "n = 0, loop outer ( loop inner ( break inner ), n = n + 1, \
                      if ( n > 2 ) then ( break outer with ( n * 10 ) ) )";
        assert_eq!(context.run(source), Ok(Value::Number(30.0)));
        assert!(context.active_loops().is_empty());
    }

    #[test]
    fn assignment_inside_loop_creates_global() {
        let mut context = Context::new();
        context.run("loop l ( x = 1 break l )").unwrap();
        assert_eq!(context.run("x"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn same_name_cannot_run_twice() {
        assert_eq!(eval("loop l ( loop l ( break l ) )"),
                   Err(Error::Runtime(RuntimeError::LoopAlreadyActive { name: "l".into() })));
    }

    #[test]
    fn break_needs_a_running_loop() {
        assert_eq!(eval("break nowhere"),
                   Err(Error::Runtime(RuntimeError::UnknownLoop { name: "nowhere".into() })));
    }

    #[test]
    fn iterations_are_bounded_when_configured() {
        let mut context = Context::with_config(Config { max_iterations: Some(10),
                                                        ..Config::default() });
        assert_eq!(context.run("loop forever ( 1 )"),
                   Err(Error::Runtime(RuntimeError::IterationLimit { name:  "forever".into(),
                                                                     limit: 10, })));
        assert!(context.active_loops().is_empty());
    }
}
