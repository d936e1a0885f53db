//! Capability traits for model-agnostic observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once and reused with any population model.
//!
//! # Event traits
//!
//! - [`HasStep`] — events that carry a step index and elapsed time
//! - [`HasState`] — events that carry a population state
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use popdyn_core::Observer;
//! use popdyn_observers::traits::{CanStopEarly, HasState};
//!
//! /// Stops once the total population exceeds a ceiling.
//! struct Ceiling(f64);
//!
//! impl<E: HasState, A: CanStopEarly> Observer<E, A> for Ceiling {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let total: f64 = event.state().values().iter().sum();
//!         (total > self.0).then(A::stop_early)
//!     }
//! }
//! ```

use popdyn_core::{Identifier, PopulationState};

use popdyn_solvers::transient::euler;

/// An event that carries a step index.
pub trait HasStep {
    /// Returns the step index of this event.
    fn step(&self) -> usize;

    /// Returns the elapsed time of this event.
    fn time(&self) -> f64;
}

/// An event that carries a population state.
pub trait HasState {
    /// The species of the state.
    type Species: Identifier;

    /// Returns the state recorded with this event.
    fn state(&self) -> &PopulationState<Self::Species>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- euler::Event ---

impl<S: Identifier> HasStep for euler::Event<S> {
    fn step(&self) -> usize {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }
}

impl<S: Identifier> HasState for euler::Event<S> {
    type Species = S;

    fn state(&self) -> &PopulationState<S> {
        &self.state
    }
}

// --- euler::Action ---

impl CanStopEarly for euler::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
