//! Core traits and types for popdyn.
//!
//! This crate defines the shared abstractions that the Euler driver, the
//! population models, and the observers build on:
//!
//! - [`Identifier`] — a closed, enumerated set of named species or parameters
//! - [`PopulationState`] — non-negative species values, clamped at zero
//! - [`ModelParameters`] — immutable named constants with copy-on-derive
//! - [`PopulationModel`] — rate laws that map a state to its [`Rates`]
//! - [`StepIntegrable`] — types that can be stepped by `derivative * delta`
//! - [`PerturbationSchedule`] — explicit and periodic dosing events
//! - [`Trajectory`] — the recorded time series of a run
//! - [`Observer`] — receives solver events and optionally returns control actions

mod error;
mod identifier;
mod model;
mod observer;
mod parameters;
mod state;
mod step;
mod trajectory;

pub mod schedule;

pub use error::ValidationError;
pub use identifier::Identifier;
pub use model::PopulationModel;
pub use observer::Observer;
pub use parameters::ModelParameters;
pub use schedule::{Periodic, Perturbation, PerturbationSchedule, Trigger};
pub use state::{PopulationState, Rates};
pub use step::{DerivativeOf, StepIntegrable};
pub use trajectory::Trajectory;
