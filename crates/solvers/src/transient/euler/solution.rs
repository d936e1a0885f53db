use std::fmt;

use popdyn_core::{Identifier, Trajectory};

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an Euler run.
#[derive(Clone)]
pub struct Solution<S> {
    /// How the solver terminated.
    pub status: Status,

    /// Recorded snapshots, one per step.
    pub trajectory: Trajectory<S>,

    /// Number of Euler updates performed.
    pub steps: usize,
}

impl<S: Identifier> fmt::Debug for Solution<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("status", &self.status)
            .field("trajectory", &self.trajectory)
            .field("steps", &self.steps)
            .finish()
    }
}

impl<S: Identifier> Solution<S> {
    /// Returns the step index of every recorded snapshot.
    #[must_use]
    pub fn time_indices(&self) -> Vec<usize> {
        self.trajectory.indices()
    }
}
