use tracing::debug;

use crate::{Error, Grid, GridHistory, RuleTable};

/// How a cell's neighborhood is gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Left, center and right all come from the current generation.
    Plain,
    /// Left and right come from the generation before last, the center from
    /// the current generation.
    Memory,
}

impl Variant {
    /// Returns the neighbor distance used unless overridden.
    #[must_use]
    pub fn default_reach(self) -> usize {
        match self {
            Self::Plain => 2,
            Self::Memory => 1,
        }
    }
}

/// A rule, an update variant and a neighbor distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Automaton {
    rule: RuleTable,
    variant: Variant,
    reach: usize,
}

impl Automaton {
    /// Creates an automaton with the variant's default reach.
    #[must_use]
    pub fn new(rule: RuleTable, variant: Variant) -> Self {
        Self {
            rule,
            variant,
            reach: variant.default_reach(),
        }
    }

    /// Creates a plain automaton with reach 2.
    #[must_use]
    pub fn plain(rule: RuleTable) -> Self {
        Self::new(rule, Variant::Plain)
    }

    /// Creates a memory automaton with reach 1.
    #[must_use]
    pub fn memory(rule: RuleTable) -> Self {
        Self::new(rule, Variant::Memory)
    }

    /// Returns the automaton with a different neighbor distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `reach` is zero.
    pub fn with_reach(self, reach: usize) -> Result<Self, Error> {
        if reach == 0 {
            return Err(Error::invalid("reach", "must be at least 1"));
        }
        Ok(Self { reach, ..self })
    }

    /// Returns the automaton with a different rule.
    #[must_use]
    pub fn with_rule(self, rule: RuleTable) -> Self {
        Self { rule, ..self }
    }

    #[must_use]
    pub fn rule(&self) -> RuleTable {
        self.rule
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn reach(&self) -> usize {
        self.reach
    }

    /// Computes the next generation.
    ///
    /// `previous` is the generation before `current`. The plain variant
    /// ignores it. Both grids must have the same length.
    #[must_use]
    pub fn next(&self, previous: &Grid, current: &Grid) -> Grid {
        let outer = match self.variant {
            Variant::Plain => current,
            Variant::Memory => previous,
        };
        let cells = (0..current.len())
            .map(|i| {
                self.rule.lookup(
                    outer.before(i, self.reach),
                    current.cells()[i],
                    outer.after(i, self.reach),
                )
            })
            .collect();
        Grid::from_cells(cells)
    }

    /// Evolves `initial` for `epochs` generations.
    ///
    /// The memory variant starts with both of its generations set to
    /// `initial`.
    #[must_use]
    pub fn evolve(&self, initial: &Grid, epochs: usize) -> GridHistory {
        debug!(
            rule = self.rule.number(),
            variant = ?self.variant,
            reach = self.reach,
            cells = initial.len(),
            epochs,
            "evolving automaton"
        );

        let mut history = GridHistory::with_capacity(initial.clone(), epochs);
        let mut previous = initial.clone();
        let mut current = initial.clone();

        for _ in 0..epochs {
            let next = self.next(&previous, &current);
            previous = std::mem::replace(&mut current, next);
            history.push(current.clone());
        }

        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cells(grid: &Grid) -> Vec<usize> {
        grid.cells()
            .iter()
            .enumerate()
            .filter_map(|(i, &cell)| cell.then_some(i))
            .collect()
    }

    #[test]
    fn history_has_one_grid_per_epoch_plus_initial() {
        let initial = Grid::seeded(32, 1).unwrap();
        for epochs in [0, 1, 17] {
            let history = Automaton::plain(RuleTable::from(30)).evolve(&initial, epochs);
            assert_eq!(history.len(), epochs + 1);
            assert_eq!(history.epochs(), epochs);
            assert_eq!(history.initial(), &initial);
        }
    }

    #[test]
    fn rule_90_wraps_at_both_ends() {
        let initial = Grid::single(11, 0).unwrap();
        let history = Automaton::plain(RuleTable::from(90)).evolve(&initial, 1);

        assert_eq!(set_cells(history.last()), vec![2, 9]);
    }

    #[test]
    fn left_is_most_significant_bit() {
        // Rule 16 fires only for code 4, a lone set cell on the left.
        let initial = Grid::single(5, 4).unwrap();
        let automaton = Automaton::plain(RuleTable::from(16)).with_reach(1).unwrap();
        let history = automaton.evolve(&initial, 2);

        assert_eq!(set_cells(history.epoch(1).unwrap()), vec![0]);
        assert_eq!(set_cells(history.epoch(2).unwrap()), vec![1]);
    }

    #[test]
    fn memory_epoch_zero_is_initial_grid() {
        let initial = Grid::single(9, 4).unwrap();
        let history = Automaton::memory(RuleTable::from(150)).evolve(&initial, 3);

        assert_eq!(history.epoch(0), Some(&initial));
        assert_eq!(history.to_matrix()[0], vec![0, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn memory_reads_outer_cells_from_two_generations_back() {
        // Rule 150 is the XOR of all three neighbors.
        let initial = Grid::single(7, 3).unwrap();
        let rule = RuleTable::from(150);

        let memory = Automaton::memory(rule).evolve(&initial, 2);
        assert_eq!(set_cells(memory.epoch(1).unwrap()), vec![2, 3, 4]);
        assert_eq!(set_cells(memory.epoch(2).unwrap()), vec![3]);

        let plain = Automaton::plain(rule).with_reach(1).unwrap().evolve(&initial, 2);
        assert_eq!(set_cells(plain.epoch(1).unwrap()), vec![2, 3, 4]);
        assert_eq!(set_cells(plain.epoch(2).unwrap()), vec![1, 3, 5]);
    }

    #[test]
    fn extreme_rules_saturate() {
        let initial = Grid::seeded(20, 9).unwrap();
        let zeros = Automaton::plain(RuleTable::from(0)).evolve(&initial, 3);
        let ones = Automaton::memory(RuleTable::from(255)).evolve(&initial, 3);

        assert!(zeros.grids()[1..].iter().all(|g| g.density() == 0.0));
        assert!(ones.grids()[1..].iter().all(|g| g.density() == 1.0));
    }

    #[test]
    fn with_rule_keeps_variant_and_reach() {
        let automaton = Automaton::memory(RuleTable::from(90)).with_reach(3).unwrap();
        let swapped = automaton.with_rule(RuleTable::from(30));

        assert_eq!(swapped.rule(), RuleTable::from(30));
        assert_eq!(swapped.variant(), Variant::Memory);
        assert_eq!(swapped.reach(), 3);
        assert_eq!(automaton.rule().number(), 90);
    }

    #[test]
    fn rejects_zero_reach() {
        assert!(Automaton::plain(RuleTable::from(90)).with_reach(0).is_err());
    }
}
