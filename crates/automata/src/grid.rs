use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::Error;

/// A fixed-length ring of binary cells.
///
/// A grid is never empty. Neighbor lookups wrap, so the cell after the last
/// one is the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid from 0/1 cell values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `cells` is empty or holds a value other
    /// than 0 or 1.
    pub fn new(cells: Vec<u8>) -> Result<Self, Error> {
        if let Some((index, value)) = cells.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(Error::invalid(
                "grid",
                format!("cell {index} must be 0 or 1, got {value}"),
            ));
        }
        Self::from_bits(cells.into_iter().map(|v| v == 1).collect())
    }

    /// Creates a grid from boolean cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `cells` is empty.
    pub fn from_bits(cells: Vec<bool>) -> Result<Self, Error> {
        if cells.is_empty() {
            return Err(Error::invalid("grid", "must have at least one cell"));
        }
        Ok(Self { cells })
    }

    /// `cells` must be non-empty.
    pub(crate) fn from_cells(cells: Vec<bool>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// Creates an all-zero grid with one set cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `len` is zero or `index` is out of
    /// bounds.
    pub fn single(len: usize, index: usize) -> Result<Self, Error> {
        if index >= len {
            return Err(Error::invalid(
                "grid",
                format!("set cell {index} is outside a grid of {len} cells"),
            ));
        }
        Self::from_bits((0..len).map(|i| i == index).collect())
    }

    /// Creates a grid of fair coin flips drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `len` is zero.
    pub fn random(len: usize, rng: &mut impl Rng) -> Result<Self, Error> {
        Self::from_bits((0..len).map(|_| rng.gen_bool(0.5)).collect())
    }

    /// Creates a random grid that is reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `len` is zero.
    pub fn seeded(len: usize, seed: u64) -> Result<Self, Error> {
        Self::random(len, &mut SmallRng::seed_from_u64(seed))
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; grids hold at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cells.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Returns the cell `reach` positions before `index`, wrapping.
    pub(crate) fn before(&self, index: usize, reach: usize) -> bool {
        let len = self.cells.len();
        self.cells[(index + len - reach % len) % len]
    }

    /// Returns the cell `reach` positions after `index`, wrapping.
    pub(crate) fn after(&self, index: usize, reach: usize) -> bool {
        self.cells[(index + reach) % self.cells.len()]
    }

    /// Returns the cells as 0/1.
    #[must_use]
    pub fn to_row(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| u8::from(cell)).collect()
    }

    /// Returns the fraction of set cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        self.cells.iter().filter(|&&cell| cell).count() as f64 / self.cells.len() as f64
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            f.write_str(if cell { "1" } else { "0" })?;
        }
        Ok(())
    }
}
