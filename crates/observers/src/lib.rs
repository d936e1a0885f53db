//! Reusable observers for popdyn solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any population model driven by the Euler solver.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for model-agnostic observers
//!   ([`HasStep`], [`HasState`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`ProgressLogger`] — logs the state every `n` steps through `tracing`
//! - [`StopWhen`] — stops a run once a predicate on the state holds; see also
//!   [`extinction`]
//!
//! [`Observer`]: popdyn_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`HasState`]: traits::HasState
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod progress;
mod stop;

pub use progress::ProgressLogger;
pub use stop::{StopWhen, extinction};
