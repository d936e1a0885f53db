//! Population models for popdyn.
//!
//! Each model is a [`PopulationModel`](popdyn_core::PopulationModel) with its
//! own species and parameter identifiers:
//!
//! - [`effector_target`] — immune effector cells hunting a target population
//! - [`alzheimer`] — seven interacting neuron, astrocyte, microglia and
//!   amyloid-beta compartments
//!
//! The [`config`] module loads a complete run description from YAML.

pub mod alzheimer;
pub mod config;
pub mod effector_target;

mod hill;
