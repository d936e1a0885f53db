//! Fixed-step solvers for popdyn population models.
//!
//! # Modules
//!
//! - [`transient`] — time-stepping drivers that produce a
//!   [`Trajectory`](popdyn_core::Trajectory)

pub mod transient;
