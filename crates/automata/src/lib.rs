//! One-dimensional binary cellular automata.
//!
//! A [`Grid`] of cells evolves under a [`RuleTable`] that maps each
//! three-cell neighborhood to the cell's next value. The boundary wraps.
//!
//! Two update variants are supported:
//!
//! - [`Variant::Plain`] reads every neighbor from the current generation.
//! - [`Variant::Memory`] reads the outer neighbors from the generation before
//!   last and the center from the current one.
//!
//! [`RuleSweep`] evolves one initial grid under all 256 elementary rules in
//! parallel.

mod error;
mod evolve;
mod grid;
mod history;
mod rule;
mod sweep;

pub use error::Error;
pub use evolve::{Automaton, Variant};
pub use grid::Grid;
pub use history::GridHistory;
pub use rule::RuleTable;
pub use sweep::RuleSweep;
