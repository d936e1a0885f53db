use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use rayon::prelude::*;
use tracing::info;

use crate::{Automaton, Error, Grid, GridHistory, RuleTable, Variant};

const RULES: usize = 256;
const PROGRESS_EVERY: usize = 10;

/// Evolves one initial grid under every rule from 0 to 255.
///
/// Each rule runs independently on the rayon pool. The result is the same as
/// evolving each rule on its own, keyed by rule number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSweep {
    template: Automaton,
}

impl RuleSweep {
    /// Creates a sweep with the variant's default reach.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            template: Automaton::new(RuleTable::from(0), variant),
        }
    }

    /// Returns the sweep with a different neighbor distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `reach` is zero.
    pub fn with_reach(self, reach: usize) -> Result<Self, Error> {
        Ok(Self {
            template: self.template.with_reach(reach)?,
        })
    }

    /// Runs all 256 rules for `epochs` generations.
    #[must_use]
    pub fn run(&self, initial: &Grid, epochs: usize) -> BTreeMap<u8, GridHistory> {
        let finished = AtomicUsize::new(0);

        let histories: BTreeMap<u8, GridHistory> = (0..=u8::MAX)
            .into_par_iter()
            .map(|rule| {
                let history = self
                    .template
                    .with_rule(RuleTable::from(rule))
                    .evolve(initial, epochs);
                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_EVERY == 0 {
                    info!(done, total = RULES, "rule sweep progress");
                }
                (rule, history)
            })
            .collect();

        info!(
            total = RULES,
            epochs,
            variant = ?self.template.variant(),
            "rule sweep complete"
        );
        histories
    }
}
