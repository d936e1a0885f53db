use popdyn_core::{
    Observer, PerturbationSchedule, PopulationModel, PopulationState, schedule::ResolvedSchedule,
};

use super::{Action, Config, Error, Event, Solution, integrate};

/// A validated Euler run, ready to execute.
///
/// Construction resolves the perturbation schedule against the step size and
/// step count, so every input is checked before any stepping occurs. Running
/// never fails and never mutates the simulation; the same `Simulation` can be
/// run repeatedly and always produces the same trajectory.
pub struct Simulation<M: PopulationModel> {
    model: M,
    initial: PopulationState<M::Species>,
    config: Config,
    schedule: ResolvedSchedule<M::Species>,
}

impl<M: PopulationModel> Simulation<M> {
    /// Validates and assembles a run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if any schedule entry falls outside the run
    /// or is otherwise invalid.
    pub fn new(
        model: M,
        initial: PopulationState<M::Species>,
        config: Config,
        schedule: &PerturbationSchedule<M::Species>,
    ) -> Result<Self, Error> {
        let schedule = schedule.resolve(config.dt(), config.steps())?;
        Ok(Self {
            model,
            initial,
            config,
            schedule,
        })
    }

    /// Runs all steps without observation.
    #[must_use]
    pub fn run(&self) -> Solution<M::Species> {
        self.observe(())
    }

    /// Runs all steps, emitting an [`Event`] per recorded snapshot.
    ///
    /// The observer may return [`Action::StopEarly`] to end the run.
    pub fn observe<Obs>(&self, observer: Obs) -> Solution<M::Species>
    where
        Obs: Observer<Event<M::Species>, Action>,
    {
        integrate(
            &self.model,
            self.initial.clone(),
            &self.config,
            &self.schedule,
            observer,
        )
    }

    /// Returns a run with the same initial state, config and schedule but a
    /// different model, typically one derived from this run's model.
    #[must_use]
    pub fn with_model(&self, model: M) -> Self {
        Self {
            model,
            initial: self.initial.clone(),
            config: self.config,
            schedule: self.schedule.clone(),
        }
    }

    /// Returns a run with the same model, config and schedule but a
    /// different initial state.
    #[must_use]
    pub fn with_initial(&self, initial: PopulationState<M::Species>) -> Self
    where
        M: Clone,
    {
        Self {
            model: self.model.clone(),
            initial,
            config: self.config,
            schedule: self.schedule.clone(),
        }
    }

    /// Returns the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &PopulationState<M::Species> {
        &self.initial
    }

    /// Returns the step size and count.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the resolved perturbation schedule.
    pub fn schedule(&self) -> &ResolvedSchedule<M::Species> {
        &self.schedule
    }
}
