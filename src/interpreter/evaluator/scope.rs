use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use crate::interpreter::{evaluator::core::Context, value::Value};

/// One scope level: a mapping from identifier name to value.
pub type Frame = HashMap<String, Value>;

/// The stack of scope frames.
///
/// Frame 0 is the global frame. It exists from construction on and is never
/// popped, so the stack is never empty.
#[derive(Debug, Clone)]
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Scopes {
    /// Creates a stack holding only an empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::new()] }
    }

    /// Number of frames, including the global frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Looks up a binding in the global frame only.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.frames.first().and_then(|frame| frame.get(name))
    }

    /// Pushes a new innermost frame.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pops the innermost frame. The global frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Resolves `name`, searching from the innermost frame out to the global
    /// frame.
    ///
    /// The first binding found wins, even one holding `null`. Names bound
    /// nowhere resolve to `null`.
    ///
    /// # Example
    /// ```
    /// use brak::interpreter::{
    ///     evaluator::scope::{Frame, Scopes},
    ///     value::Value,
    /// };
    ///
    /// let mut scopes = Scopes::new();
    /// scopes.assign("x", Value::Number(1.0));
    /// scopes.push(Frame::from([("x".to_string(), Value::Number(2.0))]));
    ///
    /// assert_eq!(scopes.resolve("x"), Value::Number(2.0));
    /// assert_eq!(scopes.resolve("missing"), Value::Null);
    /// ```
    #[must_use]
    pub fn resolve(&self, name: &str) -> Value {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Assigns `value` to `name`.
    ///
    /// The innermost frame holding a non-null binding of `name` receives the
    /// write. If there is none, the binding is created in the global frame,
    /// however deeply nested the assignment is.
    pub fn assign(&mut self, name: &str, value: Value) {
        let index = self.frames
                        .iter()
                        .rposition(|frame| {
                            frame.get(name).is_some_and(|bound| *bound != Value::Null)
                        })
                        .unwrap_or(0);
        self.frames[index].insert(name.to_owned(), value);
    }

    /// Removes every frame above the global frame and returns them, so a
    /// closure body can run against the global frame alone.
    #[must_use]
    pub fn detach_locals(&mut self) -> Vec<Frame> {
        self.frames.split_off(1)
    }

    /// Puts back frames taken by [`Scopes::detach_locals`].
    pub fn attach_locals(&mut self, frames: Vec<Frame>) {
        self.frames.extend(frames);
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that pops the frame it pushed when dropped.
///
/// It dereferences to the [`Context`], so evaluation continues through the
/// guard, and the frame is popped on every exit path including `?`.
pub struct ScopedContext<'ctx> {
    context: &'ctx mut Context,
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.context.scopes.pop();
        self.context.depth -= 1;
    }
}

impl Deref for ScopedContext<'_> {
    type Target = Context;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Context {
    /// Pushes `seed` as a new frame and returns a guard that pops it.
    ///
    /// # Example
    /// ```
    /// use brak::interpreter::evaluator::{core::Context, scope::Frame};
    ///
    /// let mut context = Context::new();
    /// let before = context.scope_depth();
    /// {
    ///     let scoped = context.scoped(Frame::new());
    ///     assert_eq!(scoped.scope_depth(), before + 1);
    /// }
    /// assert_eq!(context.scope_depth(), before);
    /// ```
    pub fn scoped(&mut self, seed: Frame) -> ScopedContext<'_> {
        self.scopes.push(seed);
        self.depth += 1;
        ScopedContext { context: self }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn frame(name: &str, value: Value) -> Frame {
        Frame::from([(name.to_owned(), value)])
    }

    #[test]
    fn first_assignment_lands_in_global_frame() {
        let mut scopes = Scopes::new();
        scopes.push(Frame::new());
        scopes.push(Frame::new());
        scopes.assign("x", Value::Number(1.0));
        scopes.pop();
        scopes.pop();
        assert_eq!(scopes.global("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn assignment_updates_nearest_non_null_binding() {
        let mut scopes = Scopes::new();
        scopes.assign("n", Value::Number(1.0));
        scopes.push(frame("n", Value::Number(2.0)));
        scopes.push(Frame::new());

        scopes.assign("n", Value::Number(3.0));
        assert_eq!(scopes.resolve("n"), Value::Number(3.0));

        scopes.pop();
        scopes.pop();
        assert_eq!(scopes.resolve("n"), Value::Number(1.0));
    }

    #[test]
    fn null_binding_is_skipped_by_assignment_but_not_by_resolution() {
        let mut scopes = Scopes::new();
        scopes.assign("n", Value::Number(1.0));
        scopes.push(frame("n", Value::Null));

        assert_eq!(scopes.resolve("n"), Value::Null);

        scopes.assign("n", Value::Number(5.0));
        assert_eq!(scopes.global("n"), Some(&Value::Number(5.0)));
        assert_eq!(scopes.resolve("n"), Value::Null);
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut scopes = Scopes::new();
        scopes.pop();
        scopes.pop();
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn detached_locals_are_invisible_until_reattached() {
        let mut scopes = Scopes::new();
        scopes.push(frame("local", Value::Number(7.0)));

        let saved = scopes.detach_locals();
        assert_eq!(scopes.resolve("local"), Value::Null);
        assert_eq!(scopes.depth(), 1);

        scopes.attach_locals(saved);
        assert_eq!(scopes.resolve("local"), Value::Number(7.0));
    }
}
