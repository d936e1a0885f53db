//! Perturbation schedules for population runs.
//!
//! A [`PerturbationSchedule`] collects dosing events before a run starts. It
//! is built from two kinds of entries:
//!
//! - [`Perturbation`] — one signed adjustment to one species, triggered at an
//!   exact step index or at a time that is resolved to a step
//! - [`Periodic`] — a fixed dose injected at a regular step interval
//!
//! Both kinds are resolved against the run's step size and step count by
//! [`PerturbationSchedule::resolve`], which validates every entry and produces
//! a [`ResolvedSchedule`] keyed by step index. The driver loop only ever
//! compares integer step indices.
//!
//! # Example
//!
//! ```ignore
//! let schedule = PerturbationSchedule::from_named([("E", Trigger::Step(500), 50.0)])?
//!     .with_periodic(Periodic::new(Species::Target, 5.0, 4));
//!
//! let resolved = schedule.resolve(0.01, 1000)?;
//! assert_eq!(resolved.at(500).len(), 1);
//! ```

mod periodic;

pub use periodic::Periodic;

use tracing::debug;

use crate::{Identifier, ValidationError};

/// Relative distance from the step grid beyond which a time trigger is logged
/// as rounded.
const GRID_TOLERANCE: f64 = 1e-9;

/// When a perturbation fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// At an exact step index.
    Step(usize),

    /// At the step closest to an elapsed time.
    Time(f64),
}

/// A single signed adjustment to one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation<S> {
    /// The species the magnitude is added to.
    pub target: S,

    /// When the adjustment is applied.
    pub trigger: Trigger,

    /// The signed amount added to the target.
    pub magnitude: f64,
}

impl<S: Identifier> Perturbation<S> {
    /// Creates a perturbation.
    pub fn new(target: S, trigger: Trigger, magnitude: f64) -> Self {
        Self {
            target,
            trigger,
            magnitude,
        }
    }

    /// Creates a perturbation that fires at an exact step.
    pub fn at_step(target: S, step: usize, magnitude: f64) -> Self {
        Self::new(target, Trigger::Step(step), magnitude)
    }

    /// Creates a perturbation that fires at an elapsed time.
    pub fn at_time(target: S, time: f64, magnitude: f64) -> Self {
        Self::new(target, Trigger::Time(time), magnitude)
    }

    /// Creates a perturbation whose target is given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTarget`] if the model has no species
    /// with that name.
    pub fn named(target: &str, trigger: Trigger, magnitude: f64) -> Result<Self, ValidationError> {
        Ok(Self::new(S::parse(target)?, trigger, magnitude))
    }

    /// Resolves the trigger to a step index within a run.
    fn resolve(&self, dt: f64, steps: usize) -> Result<ScheduledEvent<S>, ValidationError> {
        if !self.magnitude.is_finite() {
            return Err(ValidationError::invalid(
                self.target.name(),
                format!("perturbation magnitude must be finite, got {}", self.magnitude),
            ));
        }

        let step = match self.trigger {
            Trigger::Step(step) => step,
            Trigger::Time(time) => step_for_time(time, dt)?,
        };

        if step >= steps {
            return Err(ValidationError::invalid(
                self.target.name(),
                format!("perturbation at step {step} is outside a run of {steps} steps"),
            ));
        }

        Ok(ScheduledEvent {
            step,
            target: self.target,
            magnitude: self.magnitude,
        })
    }
}

/// Maps an elapsed time onto the nearest step index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_for_time(time: f64, dt: f64) -> Result<usize, ValidationError> {
    if !time.is_finite() || time < 0.0 {
        return Err(ValidationError::invalid(
            "perturbation time",
            format!("must be finite and non-negative, got {time}"),
        ));
    }

    let exact = time / dt;
    let step = exact.round();
    if (exact - step).abs() > GRID_TOLERANCE * exact.max(1.0) {
        debug!(time, dt, step, "perturbation time rounded to nearest step");
    }

    Ok(step as usize)
}

/// Dosing events for one run, before they are resolved against `dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbationSchedule<S> {
    perturbations: Vec<Perturbation<S>>,
    periodic: Vec<Periodic<S>>,
}

impl<S> Default for PerturbationSchedule<S> {
    fn default() -> Self {
        Self {
            perturbations: Vec::new(),
            periodic: Vec::new(),
        }
    }
}

impl<S: Identifier> PerturbationSchedule<S> {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from explicit perturbations.
    ///
    /// Perturbations that share a step are applied in the order given.
    pub fn from_perturbations<I>(perturbations: I) -> Self
    where
        I: IntoIterator<Item = Perturbation<S>>,
    {
        Self {
            perturbations: perturbations.into_iter().collect(),
            periodic: Vec::new(),
        }
    }

    /// Creates a schedule from `(species name, trigger, magnitude)` triplets.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTarget`] for the first triplet that
    /// names a species the model does not have.
    pub fn from_named<I, K>(triplets: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Trigger, f64)>,
        K: AsRef<str>,
    {
        triplets
            .into_iter()
            .map(|(name, trigger, magnitude)| Perturbation::named(name.as_ref(), trigger, magnitude))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_perturbations)
    }

    /// Adds one explicit perturbation.
    pub fn push(&mut self, perturbation: Perturbation<S>) {
        self.perturbations.push(perturbation);
    }

    /// Adds a periodic dosing generator.
    pub fn push_periodic(&mut self, periodic: Periodic<S>) {
        self.periodic.push(periodic);
    }

    /// Returns the schedule with a periodic dosing generator added.
    #[must_use]
    pub fn with_periodic(mut self, periodic: Periodic<S>) -> Self {
        self.push_periodic(periodic);
        self
    }

    /// Returns the explicit perturbations.
    #[must_use]
    pub fn perturbations(&self) -> &[Perturbation<S>] {
        &self.perturbations
    }

    /// Returns the periodic generators.
    #[must_use]
    pub fn periodic(&self) -> &[Periodic<S>] {
        &self.periodic
    }

    /// Returns `true` if the schedule has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.perturbations.is_empty() && self.periodic.is_empty()
    }

    /// Resolves every entry to a step index within a run of `steps` steps.
    ///
    /// Time triggers are rounded to the nearest multiple of `dt`. Events are
    /// ordered by step; within a step, explicit perturbations come first in
    /// the order given, followed by periodic doses.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if `dt` is not
    /// positive, if any event falls outside the run, if a magnitude is
    /// non-finite, or if a periodic generator cannot fit its events.
    pub fn resolve(&self, dt: f64, steps: usize) -> Result<ResolvedSchedule<S>, ValidationError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ValidationError::invalid(
                "dt",
                format!("must be finite and positive, got {dt}"),
            ));
        }

        let mut events = self
            .perturbations
            .iter()
            .map(|perturbation| perturbation.resolve(dt, steps))
            .collect::<Result<Vec<_>, _>>()?;

        for periodic in &self.periodic {
            events.extend(periodic.resolve(steps)?);
        }

        events.sort_by_key(|event| event.step);

        Ok(ResolvedSchedule { events })
    }
}

/// A dosing event pinned to a step index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent<S> {
    /// The step at whose start the event is applied.
    pub step: usize,

    /// The species the magnitude is added to.
    pub target: S,

    /// The signed amount added to the target.
    pub magnitude: f64,
}

/// A validated schedule, ordered by step index.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchedule<S> {
    events: Vec<ScheduledEvent<S>>,
}

impl<S> Default for ResolvedSchedule<S> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<S> ResolvedSchedule<S> {
    /// Returns the events that fire at `step`, in application order.
    #[must_use]
    pub fn at(&self, step: usize) -> &[ScheduledEvent<S>] {
        let start = self.events.partition_point(|event| event.step < step);
        let end = self.events.partition_point(|event| event.step <= step);
        &self.events[start..end]
    }

    /// Returns every event in application order.
    #[must_use]
    pub fn events(&self) -> &[ScheduledEvent<S>] {
        &self.events
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no event fires during the run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
