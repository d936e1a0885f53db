//! Forward Euler solver for population models.
//!
//! This module marches a [`PopulationModel`] forward with explicit Euler and a
//! non-negativity floor:
//!
//! ```text
//! state_{n+1} = max(0, state_n + rates(state_n) * dt)
//! ```
//!
//! Scheduled perturbations are added at the start of their step, each one
//! followed by the same floor.
//!
//! # Example
//!
//! ```ignore
//! use popdyn_solvers::transient::euler;
//!
//! let config = euler::Config::new(0.01, 1000)?;
//! let solution = euler::solve_unobserved(&model, initial, &config, &schedule)?;
//!
//! for (time, target) in solution.trajectory.time_axis().iter().zip(solution.trajectory.series(Species::Target)) {
//!     println!("t={time}: T={target}");
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod simulation;
mod solution;

pub use action::Action;
pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use simulation::Simulation;
pub use solution::{Solution, Status};

use popdyn_core::{
    Identifier, Observer, PerturbationSchedule, PopulationModel, PopulationState, StepIntegrable,
    Trajectory, schedule::ResolvedSchedule,
};
use tracing::{debug, trace};

/// Integrates a population model using forward Euler.
///
/// # Algorithm
///
/// 1. Resolve the schedule against `dt` and the step count, failing fast on
///    any invalid entry.
/// 2. For each step `i` in `0..steps`:
///    - Add every perturbation scheduled at `i`, flooring after each one.
///    - Record snapshot `i` and emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
///    - Compute all rates from the recorded state and step every species.
/// 3. Return the solution with the full trajectory.
///
/// # Errors
///
/// Returns [`Error::Invalid`] if the schedule cannot be resolved. No stepping
/// happens in that case.
pub fn solve<M, Obs>(
    model: &M,
    initial: PopulationState<M::Species>,
    config: &Config,
    schedule: &PerturbationSchedule<M::Species>,
    observer: Obs,
) -> Result<Solution<M::Species>, Error>
where
    M: PopulationModel,
    Obs: Observer<Event<M::Species>, Action>,
{
    let resolved = schedule.resolve(config.dt(), config.steps())?;
    Ok(integrate(model, initial, config, &resolved, observer))
}

/// Integrates a population model using forward Euler without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns [`Error::Invalid`] if the schedule cannot be resolved.
pub fn solve_unobserved<M>(
    model: &M,
    initial: PopulationState<M::Species>,
    config: &Config,
    schedule: &PerturbationSchedule<M::Species>,
) -> Result<Solution<M::Species>, Error>
where
    M: PopulationModel,
{
    solve(model, initial, config, schedule, ())
}

/// The driver loop. All inputs are already validated.
#[allow(clippy::cast_precision_loss)]
fn integrate<M, Obs>(
    model: &M,
    initial: PopulationState<M::Species>,
    config: &Config,
    schedule: &ResolvedSchedule<M::Species>,
    mut observer: Obs,
) -> Solution<M::Species>
where
    M: PopulationModel,
    Obs: Observer<Event<M::Species>, Action>,
{
    let dt = config.dt();
    let steps = config.steps();
    debug!(steps, dt, events = schedule.len(), "starting euler run");

    let mut snapshots = Vec::with_capacity(steps);
    let mut state = initial;

    for step in 0..steps {
        for event in schedule.at(step) {
            trace!(
                step,
                target = event.target.name(),
                magnitude = event.magnitude,
                "applying perturbation"
            );
            state = state.perturbed(event.target, event.magnitude);
        }

        snapshots.push(state.clone());

        let event = Event {
            step,
            time: step as f64 * dt,
            state: state.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(step, "euler run stopped by observer");
            return Solution {
                status: Status::StoppedByObserver,
                trajectory: Trajectory::from_parts(snapshots, state, dt),
                steps: step,
            };
        }

        let rates = model.rates(&state);
        state = state.step(rates, dt);
    }

    debug!(steps, "euler run complete");
    Solution {
        status: Status::Complete,
        trajectory: Trajectory::from_parts(snapshots, state, dt),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use popdyn_core::{ModelParameters, Perturbation, Rates, ValidationError};

    // --- Test fixtures ---

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Species {
        Decaying,
        Growing,
    }

    impl Identifier for Species {
        const ALL: &'static [Self] = &[Self::Decaying, Self::Growing];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                Self::Decaying => "A",
                Self::Growing => "B",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Parameter {
        Decay,
        Growth,
    }

    impl Identifier for Parameter {
        const ALL: &'static [Self] = &[Self::Decay, Self::Growth];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                Self::Decay => "lambda",
                Self::Growth => "g",
            }
        }
    }

    /// dA/dt = -lambda * A, dB/dt = g.
    #[derive(Debug, Clone)]
    struct DecayGrowth {
        parameters: ModelParameters<Parameter>,
    }

    impl PopulationModel for DecayGrowth {
        type Species = Species;
        type Parameter = Parameter;

        fn from_parameters(parameters: ModelParameters<Parameter>) -> Result<Self, ValidationError> {
            Ok(Self { parameters })
        }

        fn parameters(&self) -> &ModelParameters<Parameter> {
            &self.parameters
        }

        fn rates(&self, state: &PopulationState<Species>) -> Rates<Species> {
            let p = &self.parameters;
            Rates::from_fn(|species| match species {
                Species::Decaying => -p[Parameter::Decay] * state[Species::Decaying],
                Species::Growing => p[Parameter::Growth],
            })
        }
    }

    fn model(decay: f64, growth: f64) -> DecayGrowth {
        DecayGrowth::from_parameters(ModelParameters::from_values([decay, growth]).unwrap()).unwrap()
    }

    fn initial(a: f64, b: f64) -> PopulationState<Species> {
        PopulationState::from_values([a, b]).unwrap()
    }

    // --- Tests ---

    #[test]
    fn matches_discrete_exponential_decay() {
        let config = Config::new(0.1, 10).unwrap();
        let solution =
            solve_unobserved(&model(0.5, 1.0), initial(8.0, 0.0), &config, &PerturbationSchedule::new())
                .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.trajectory.len(), 10);

        for (n, value) in solution.trajectory.series(Species::Decaying).iter().enumerate() {
            let expected = 8.0 * 0.95_f64.powi(i32::try_from(n).unwrap());
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }

        // Terminal state is after all ten updates: B = 0 + 10 * 0.1 * 1.0.
        assert_relative_eq!(solution.trajectory.terminal()[Species::Growing], 1.0, epsilon = 1e-12);
        assert_relative_eq!(solution.trajectory.terminal()[Species::Decaying], 8.0 * 0.95_f64.powi(10));
    }

    #[test]
    fn first_snapshot_is_initial_condition() {
        let config = Config::new(0.1, 3).unwrap();
        let solution =
            solve_unobserved(&model(0.5, 1.0), initial(8.0, 2.0), &config, &PerturbationSchedule::new())
                .unwrap();

        assert_eq!(solution.trajectory.snapshots()[0], initial(8.0, 2.0));
        assert_eq!(solution.time_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn floor_pins_overshooting_species_without_affecting_others() {
        // lambda * dt = 2, so the raw update would flip A negative.
        let config = Config::new(1.0, 3).unwrap();
        let solution =
            solve_unobserved(&model(2.0, 1.0), initial(5.0, 0.0), &config, &PerturbationSchedule::new())
                .unwrap();

        assert_eq!(solution.trajectory.series(Species::Decaying), vec![5.0, 0.0, 0.0]);
        assert_eq!(solution.trajectory.series(Species::Growing), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn perturbation_appears_in_its_own_snapshot() {
        let config = Config::new(0.1, 20).unwrap();
        let base = solve_unobserved(&model(0.5, 1.0), initial(8.0, 0.0), &config, &PerturbationSchedule::new())
            .unwrap();

        let schedule =
            PerturbationSchedule::from_perturbations([Perturbation::at_step(Species::Growing, 10, 3.0)]);
        let perturbed = solve_unobserved(&model(0.5, 1.0), initial(8.0, 0.0), &config, &schedule).unwrap();

        let before = base.trajectory.series(Species::Growing);
        let after = perturbed.trajectory.series(Species::Growing);

        assert_eq!(before[..10], after[..10]);
        assert_eq!(after[10], before[10] + 3.0);
        // The unperturbed species never notices.
        assert_eq!(
            base.trajectory.series(Species::Decaying),
            perturbed.trajectory.series(Species::Decaying)
        );
    }

    #[test]
    fn negative_perturbation_is_floored() {
        let config = Config::new(0.1, 5).unwrap();
        let schedule =
            PerturbationSchedule::from_perturbations([Perturbation::at_step(Species::Decaying, 2, -100.0)]);

        let solution = solve_unobserved(&model(0.5, 1.0), initial(8.0, 0.0), &config, &schedule).unwrap();

        assert_eq!(solution.trajectory.series(Species::Decaying)[2..], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_magnitude_schedule_changes_nothing() {
        let config = Config::new(0.05, 50).unwrap();
        let empty = solve_unobserved(&model(0.3, 0.2), initial(4.0, 1.0), &config, &PerturbationSchedule::new())
            .unwrap();

        let zeros = PerturbationSchedule::from_perturbations([
            Perturbation::at_step(Species::Decaying, 0, 0.0),
            Perturbation::at_step(Species::Growing, 25, 0.0),
        ]);
        let zeroed = solve_unobserved(&model(0.3, 0.2), initial(4.0, 1.0), &config, &zeros).unwrap();

        assert_eq!(empty.trajectory, zeroed.trajectory);
    }

    #[test]
    fn runs_are_deterministic() {
        let config = Config::new(0.01, 500).unwrap();
        let schedule = PerturbationSchedule::from_perturbations([Perturbation::at_step(Species::Decaying, 100, 2.5)]);
        let simulation = Simulation::new(model(0.7, 0.1), initial(3.0, 1.0), config, &schedule).unwrap();

        assert_eq!(simulation.run().trajectory, simulation.run().trajectory);
    }

    #[test]
    fn observer_can_stop_early() {
        let config = Config::new(0.1, 100).unwrap();
        let observer = |event: &Event<Species>| (event.step >= 5).then_some(Action::StopEarly);

        let solution = solve(
            &model(0.5, 1.0),
            initial(1.0, 0.0),
            &config,
            &PerturbationSchedule::new(),
            observer,
        )
        .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.trajectory.len(), 6);
        assert_eq!(solution.trajectory.terminal(), &solution.trajectory.snapshots()[5]);
    }

    #[test]
    fn step_numbers_start_at_zero() {
        let config = Config::new(0.25, 4).unwrap();
        let mut steps = Vec::new();
        let mut times = Vec::new();

        solve(
            &model(0.5, 1.0),
            initial(1.0, 0.0),
            &config,
            &PerturbationSchedule::new(),
            |event: &Event<Species>| {
                steps.push(event.step);
                times.push(event.time);
                None
            },
        )
        .expect("should solve");

        assert_eq!(steps, vec![0, 1, 2, 3]);
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn invalid_schedule_fails_before_stepping() {
        let config = Config::new(0.1, 10).unwrap();
        let schedule =
            PerturbationSchedule::from_perturbations([Perturbation::at_step(Species::Growing, 10, 1.0)]);

        let mut observed = 0;
        let result = solve(
            &model(0.5, 1.0),
            initial(1.0, 0.0),
            &config,
            &schedule,
            |_: &Event<Species>| {
                observed += 1;
                None
            },
        );

        assert!(matches!(
            result,
            Err(Error::Invalid(ValidationError::InvalidConfiguration { .. }))
        ));
        assert_eq!(observed, 0);
    }

    #[test]
    fn derived_model_reuses_run_setup() {
        let config = Config::new(0.1, 10).unwrap();
        let base = Simulation::new(model(0.5, 1.0), initial(8.0, 0.0), config, &PerturbationSchedule::new())
            .unwrap();
        let faster = base.with_model(base.model().derive(Parameter::Decay, |l| l * 2.0).unwrap());

        let slow = base.run().trajectory.terminal()[Species::Decaying];
        let fast = faster.run().trajectory.terminal()[Species::Decaying];

        assert!(fast < slow);
        assert_eq!(base.model().parameters()[Parameter::Decay], 0.5);
    }

    #[test]
    fn events_and_solution_debug_by_species_name() {
        let config = Config::new(0.5, 2).unwrap();
        let mut seen = Vec::new();
        let solution = solve(
            &model(1.0, 1.0),
            initial(4.0, 0.0),
            &config,
            &PerturbationSchedule::new(),
            |event: &Event<Species>| -> Option<Action> {
                seen.push(format!("{event:?}"));
                None
            },
        )
        .unwrap();

        assert_eq!(seen[0], r#"Event { step: 0, time: 0.0, state: {"A": 4.0, "B": 0.0} }"#);
        assert!(format!("{solution:?}").contains(r#"terminal: {"A": 1.0, "B": 1.0}"#));
    }

    #[test]
    fn derived_initial_state_reuses_run_setup() {
        let config = Config::new(0.1, 10).unwrap();
        let base = Simulation::new(model(0.5, 1.0), initial(8.0, 0.0), config, &PerturbationSchedule::new())
            .unwrap();
        let doubled = base.with_initial(base.initial().derive(Species::Decaying, |a| a * 2.0));

        let slow = base.run();
        let scaled = doubled.run();

        assert_eq!(scaled.trajectory.len(), slow.trajectory.len());
        assert_relative_eq!(
            scaled.trajectory.terminal()[Species::Decaying],
            2.0 * slow.trajectory.terminal()[Species::Decaying],
            epsilon = 1e-12
        );
        assert_relative_eq!(
            scaled.trajectory.terminal()[Species::Growing],
            slow.trajectory.terminal()[Species::Growing]
        );
        assert_eq!(base.initial()[Species::Decaying], 8.0);
    }
}
