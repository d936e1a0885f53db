use crate::Grid;

/// Every generation of one run, starting with the initial grid.
///
/// A run of `E` epochs holds `E + 1` grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHistory {
    grids: Vec<Grid>,
}

impl GridHistory {
    pub(crate) fn with_capacity(initial: Grid, epochs: usize) -> Self {
        let mut grids = Vec::with_capacity(epochs + 1);
        grids.push(initial);
        Self { grids }
    }

    pub(crate) fn push(&mut self, grid: Grid) {
        self.grids.push(grid);
    }

    /// Returns the number of recorded grids, one more than the epoch count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always `false`; the initial grid is always recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Returns the number of evolved epochs.
    #[must_use]
    pub fn epochs(&self) -> usize {
        self.grids.len() - 1
    }

    /// Returns the grid at `epoch`, where epoch 0 is the initial grid.
    #[must_use]
    pub fn epoch(&self, epoch: usize) -> Option<&Grid> {
        self.grids.get(epoch)
    }

    /// Returns the initial grid.
    #[must_use]
    pub fn initial(&self) -> &Grid {
        &self.grids[0]
    }

    /// Returns the last grid.
    #[must_use]
    pub fn last(&self) -> &Grid {
        &self.grids[self.grids.len() - 1]
    }

    /// Returns every grid in epoch order.
    #[must_use]
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Returns the epoch × cell matrix of 0/1 values.
    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.grids.iter().map(Grid::to_row).collect()
    }

    /// Returns the fraction of set cells at every epoch.
    #[must_use]
    pub fn densities(&self) -> Vec<f64> {
        self.grids.iter().map(Grid::density).collect()
    }
}
