use std::fmt;

use popdyn_core::{Identifier, PopulationState};

/// Event emitted by the Euler solver for each recorded snapshot.
///
/// Step 0 is the initial condition. Each event carries the state after the
/// step's perturbations and before its update, matching the snapshot stored
/// in the trajectory.
#[derive(Clone)]
pub struct Event<S> {
    /// The step number, starting at 0.
    pub step: usize,

    /// Elapsed time at this step, `step * dt`.
    pub time: f64,

    /// The recorded state.
    pub state: PopulationState<S>,
}

impl<S: Identifier> fmt::Debug for Event<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("step", &self.step)
            .field("time", &self.time)
            .field("state", &self.state)
            .finish()
    }
}
