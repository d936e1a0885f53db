//! Solvers that march a population model forward in time.
//!
//! # Solvers
//!
//! - [`euler`] — explicit Euler with a non-negativity floor and scheduled
//!   perturbations

pub mod euler;
