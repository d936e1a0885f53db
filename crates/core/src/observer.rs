/// Receives events from a solver and optionally returns a control action.
///
/// Solvers call [`observe`](Self::observe) once per event. Returning `None`
/// lets the solver continue; returning `Some(action)` asks it to react, for
/// example by stopping early.
///
/// The unit type `()` observes nothing, and any `FnMut(&E) -> Option<A>`
/// closure is an observer.
pub trait Observer<E, A> {
    /// Handles one event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
