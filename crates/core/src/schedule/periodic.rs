use crate::{Identifier, ValidationError};

use super::ScheduledEvent;

/// A fixed dose injected into one species at a regular step interval.
///
/// For a run of `steps` steps the interval is `steps / events` (rounded down),
/// and a dose fires at every multiple of the interval that is at least
/// `warmup` and before the end of the run. The default warm-up of one step
/// keeps the generator from dosing the initial condition.
///
/// # Example
///
/// ```
/// use popdyn_core::{Identifier, Periodic};
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// # enum Species { T }
/// # impl Identifier for Species {
/// #     const ALL: &'static [Self] = &[Self::T];
/// #     fn index(self) -> usize { 0 }
/// #     fn name(self) -> &'static str { "T" }
/// # }
///
/// let dosing = Periodic::new(Species::T, 5.0, 4);
/// assert_eq!(dosing.steps(1000).unwrap(), vec![250, 500, 750]);
///
/// let dosing = dosing.with_warmup(0);
/// assert_eq!(dosing.steps(1000).unwrap(), vec![0, 250, 500, 750]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Periodic<S> {
    /// The species the dose is added to.
    pub target: S,

    /// The signed amount added at each firing.
    pub dose: f64,

    /// The number of intervals the run is divided into.
    pub events: usize,

    /// Steps before this index never receive a dose.
    pub warmup: usize,
}

impl<S: Identifier> Periodic<S> {
    /// Creates a periodic generator with a warm-up of one step.
    pub fn new(target: S, dose: f64, events: usize) -> Self {
        Self {
            target,
            dose,
            events,
            warmup: 1,
        }
    }

    /// Creates a periodic generator whose target is given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTarget`] if the model has no species
    /// with that name.
    pub fn named(target: &str, dose: f64, events: usize) -> Result<Self, ValidationError> {
        Ok(Self::new(S::parse(target)?, dose, events))
    }

    /// Returns the generator with a different warm-up.
    #[must_use]
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Returns the step interval between doses for a run of `steps` steps.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if `events` is zero
    /// or larger than `steps`.
    pub fn interval(&self, steps: usize) -> Result<usize, ValidationError> {
        if self.events == 0 {
            return Err(ValidationError::invalid(
                self.target.name(),
                "periodic dosing needs at least one event",
            ));
        }
        match steps / self.events {
            0 => Err(ValidationError::invalid(
                self.target.name(),
                format!(
                    "{} periodic events do not fit in a run of {steps} steps",
                    self.events
                ),
            )),
            interval => Ok(interval),
        }
    }

    /// Returns the steps at which a dose fires.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if the interval is
    /// invalid or the dose is non-finite.
    pub fn steps(&self, steps: usize) -> Result<Vec<usize>, ValidationError> {
        if !self.dose.is_finite() {
            return Err(ValidationError::invalid(
                self.target.name(),
                format!("periodic dose must be finite, got {}", self.dose),
            ));
        }
        let interval = self.interval(steps)?;
        Ok((0..steps)
            .step_by(interval)
            .filter(|&step| step >= self.warmup)
            .collect())
    }

    pub(super) fn resolve(&self, steps: usize) -> Result<Vec<ScheduledEvent<S>>, ValidationError> {
        Ok(self
            .steps(steps)?
            .into_iter()
            .map(|step| ScheduledEvent {
                step,
                target: self.target,
                magnitude: self.dose,
            })
            .collect())
    }
}
