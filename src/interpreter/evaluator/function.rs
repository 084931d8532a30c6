use crate::{
    ast::{Expression, FuncCall},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::Frame,
        },
        value::Value,
    },
};

/// Name of the builtin that prints its argument.
pub const PRINT: &str = "print";

impl Context {
    /// Evaluates a call.
    ///
    /// `print` is handled as a builtin. Any other name must resolve to a
    /// closure. The argument is evaluated in the caller's scope, and only when
    /// both the call site and the closure declare one. The body then runs with
    /// the caller's local frames detached, so it sees its own parameter frame
    /// and the global frame but none of the caller's locals.
    ///
    /// # Errors
    /// - [`RuntimeError::NotAFunction`] if the name does not hold a closure.
    /// - Any error raised by the argument or the body.
    pub fn eval_call(&mut self, call: &FuncCall) -> EvalResult<Value> {
        if call.name == PRINT {
            return self.eval_print(call.argument.as_ref());
        }

        let Value::Func(func) = self.scopes.resolve(&call.name) else {
            return Err(RuntimeError::NotAFunction { name: call.name.clone() });
        };

        let seed = match (&func.param, &call.argument) {
            (Some(param), Some(argument)) => {
                let value = self.eval_expression(argument, Frame::new())?;
                Frame::from([(param.clone(), value)])
            },
            _ => Frame::new(),
        };

        tracing::trace!(name = %call.name, "calling closure");
        let caller = self.scopes.detach_locals();
        let result = self.eval_expression(&func.body, seed);
        self.scopes.attach_locals(caller);
        result
    }

    /// `@print ( value )`: prints the value and yields `null`.
    fn eval_print(&mut self, argument: Option<&Expression>) -> EvalResult<Value> {
        let value = match argument {
            Some(argument) => self.eval_expression(argument, Frame::new())?,
            None => Value::Null,
        };
        self.printer.println(&value.to_string());
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    #[test]
    fn closure_doubles_its_argument() {
        let mut context = Context::new();
        context.run("f = | n | ( n * 2 )").unwrap();
        assert_eq!(context.run("@f ( 21 )"), Ok(Value::Number(42.0)));
    }

    #[test]
    fn missing_argument_binds_nothing() {
        let mut context = Context::new();
        context.run("n = 3, f = | n | ( n + 1 )").unwrap();
        // No parameter frame entry, so `n` falls through to the global frame.
        assert_eq!(context.run("@f ( )"), Ok(Value::Number(4.0)));
    }

    #[test]
    fn argument_is_ignored_without_parameter() {
        let mut context = Context::new().buffered();
        context.run("g = | | ( 7 )").unwrap();
        assert_eq!(context.run("@g ( @print ( 1 ) )"), Ok(Value::Number(7.0)));
        assert_eq!(context.take_output(), "");
    }

    #[test]
    fn body_does_not_see_caller_locals() {
        let mut context = Context::new();
        context.run("peek = | | ( hidden )").unwrap();
        let result = context.run("show = | hidden | ( @peek ( ) ), @show ( 5 )");
        assert_eq!(result, Ok(Value::Null));
    }

    #[test]
    fn recursion_through_global_binding() {
        let mut context = Context::new();
        context.run("fact = | n | ( if ( n < 2 ) then ( 1 ) else ( n * @fact ( n - 1 ) ) )")
               .unwrap();
        assert_eq!(context.run("@fact ( 5 )"), Ok(Value::Number(120.0)));
    }

    #[test]
    fn calling_a_non_function_fails() {
        assert_eq!(Context::new().run("@undefined_fn ( )"),
                   Err(Error::Runtime(RuntimeError::NotAFunction { name: "undefined_fn".into() })));
        assert_eq!(Context::new().run("x = 1, @x ( )"),
                   Err(Error::Runtime(RuntimeError::NotAFunction { name: "x".into() })));
    }

    #[test]
    fn print_writes_value_and_yields_null() {
        let mut context = Context::new().buffered();
        assert_eq!(context.run("@print ( 6 * 7 ) @print ( ) @print ( 2.5 )"),
                   Ok(Value::Null));
        assert_eq!(context.take_output(), "42\nnull\n2.5\n");
    }
}
