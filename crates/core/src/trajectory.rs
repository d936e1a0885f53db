use std::fmt;

use crate::{Identifier, PopulationState};

/// The recorded time series of one population run.
///
/// Snapshot `i` is the state at step `i` after that step's perturbations have
/// been applied and before its Euler update. Index 0 is the initial
/// condition. The state reached after the last update is kept separately as
/// the [`terminal`](Self::terminal) state.
#[derive(Clone, PartialEq)]
pub struct Trajectory<S> {
    snapshots: Vec<PopulationState<S>>,
    terminal: PopulationState<S>,
    dt: f64,
}

impl<S: Identifier> fmt::Debug for Trajectory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trajectory")
            .field("snapshots", &self.snapshots)
            .field("terminal", &self.terminal)
            .field("dt", &self.dt)
            .finish()
    }
}

impl<S: Identifier> Trajectory<S> {
    /// Assembles a trajectory from recorded snapshots.
    pub fn from_parts(snapshots: Vec<PopulationState<S>>, terminal: PopulationState<S>, dt: f64) -> Self {
        Self {
            snapshots,
            terminal,
            dt,
        }
    }

    /// Returns the number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the step size the run used.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns every snapshot, in step order.
    #[must_use]
    pub fn snapshots(&self) -> &[PopulationState<S>] {
        &self.snapshots
    }

    /// Returns the snapshot at `step`, if recorded.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<&PopulationState<S>> {
        self.snapshots.get(step)
    }

    /// Returns the state after the final update.
    #[must_use]
    pub fn terminal(&self) -> &PopulationState<S> {
        &self.terminal
    }

    /// Returns the full time series of one species.
    #[must_use]
    pub fn series(&self, species: S) -> Vec<f64> {
        self.snapshots.iter().map(|state| state[species]).collect()
    }

    /// Returns the step index of every snapshot.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        (0..self.snapshots.len()).collect()
    }

    /// Returns the elapsed time of every snapshot, `step * dt`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.snapshots.len())
            .map(|step| step as f64 * self.dt)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::state::tests::Cell;

    fn state(e: f64, t: f64) -> PopulationState<Cell> {
        PopulationState::from_values([e, t]).unwrap()
    }

    #[test]
    fn accessors_follow_snapshot_order() {
        let trajectory = Trajectory::from_parts(
            vec![state(1.0, 10.0), state(2.0, 9.0), state(3.0, 8.0)],
            state(4.0, 7.0),
            0.5,
        );

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.series(Cell::Effector), vec![1.0, 2.0, 3.0]);
        assert_eq!(trajectory.series(Cell::Target), vec![10.0, 9.0, 8.0]);
        assert_eq!(trajectory.indices(), vec![0, 1, 2]);
        assert_eq!(trajectory.terminal()[Cell::Effector], 4.0);
        assert!(trajectory.get(3).is_none());

        let time = trajectory.time_axis();
        assert_relative_eq!(time[2], 1.0);
    }

    #[test]
    fn debug_names_species_in_every_snapshot() {
        let trajectory = Trajectory::from_parts(vec![state(1.0, 2.0)], state(3.0, 4.0), 0.5);

        let text = format!("{trajectory:?}");
        assert!(text.starts_with("Trajectory"));
        assert!(text.contains(r#"{"E": 1.0, "T": 2.0}"#));
        assert!(text.contains(r#"terminal: {"E": 3.0, "T": 4.0}"#));
    }
}
