/// A type that collects the steps taken while rewriting an expression.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which drops every step. Pass
/// `&mut ()` when only the result is wanted, and a `Vec` to record which rules fired, in order.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
