use popdyn_core::{Identifier, Observer, PopulationState};
use tracing::debug;

use crate::traits::{CanStopEarly, HasState, HasStep};

/// An observer that stops a run as soon as a predicate on the state holds.
///
/// The step at which the run stopped is reported by the solver's solution,
/// whose last snapshot is the first state that satisfied the predicate.
///
/// # Example
///
/// ```ignore
/// let observer = StopWhen::new(|state: &PopulationState<Species>| state[Species::Target] < 1.0);
/// let solution = euler::solve(&model, initial, &config, &schedule, observer)?;
/// ```
#[derive(Debug, Clone)]
pub struct StopWhen<F> {
    predicate: F,
}

impl<F> StopWhen<F> {
    /// Creates an observer that stops when `predicate` returns `true`.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

/// Returns an observer that stops once `species` has been driven to zero.
pub fn extinction<S: Identifier>(species: S) -> StopWhen<impl FnMut(&PopulationState<S>) -> bool> {
    StopWhen::new(move |state: &PopulationState<S>| state[species] == 0.0)
}

impl<E, A, F> Observer<E, A> for StopWhen<F>
where
    E: HasStep + HasState,
    A: CanStopEarly,
    F: FnMut(&PopulationState<E::Species>) -> bool,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if (self.predicate)(event.state()) {
            debug!(step = event.step(), "stop condition met");
            Some(A::stop_early())
        } else {
            None
        }
    }
}
