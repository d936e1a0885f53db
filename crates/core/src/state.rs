use std::{collections::BTreeSet, fmt, marker::PhantomData, ops::Index};

use crate::{Identifier, StepIntegrable, ValidationError};

/// Pins a value at zero from below.
///
/// `NaN` also maps to zero, so a state never holds a value that compares
/// false against the floor.
fn floor(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Species values of a population model at one point in time.
///
/// Components are indexed by the model's species identifier `S` and are
/// always non-negative. Updates never fail: any value that would drop below
/// zero after a step or a perturbation is pinned at zero instead.
///
/// A `PopulationState` is a plain value. Stepping and perturbing return a new
/// state, so snapshots stored in a [`Trajectory`](crate::Trajectory) are never
/// affected by later updates.
#[derive(Clone, PartialEq)]
pub struct PopulationState<S> {
    values: Vec<f64>,
    species: PhantomData<S>,
}

impl<S: Identifier> PopulationState<S> {
    /// Creates a state from values listed in species index order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if the number of
    /// values does not match the species count, or if any value is negative
    /// or non-finite.
    pub fn from_values(values: impl Into<Vec<f64>>) -> Result<Self, ValidationError> {
        let values = values.into();
        if values.len() != S::count() {
            return Err(ValidationError::invalid(
                "initial state",
                format!("expected {} values, got {}", S::count(), values.len()),
            ));
        }
        for (&species, &value) in S::ALL.iter().zip(&values) {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid(
                    species.name(),
                    format!("initial value must be finite and non-negative, got {value}"),
                ));
            }
        }
        Ok(Self {
            values,
            species: PhantomData,
        })
    }

    /// Creates a state from `(name, value)` pairs.
    ///
    /// Every species must be given exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if a species is
    /// missing, repeated, unknown, or has a negative or non-finite value.
    pub fn from_named<I, K>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut values = vec![f64::NAN; S::count()];
        let mut seen = BTreeSet::new();

        for (name, value) in pairs {
            let name = name.as_ref();
            let species = S::from_name(name)
                .ok_or_else(|| ValidationError::invalid(name, "not a species of this model"))?;
            if !seen.insert(species) {
                return Err(ValidationError::invalid(name, "given more than once"));
            }
            values[species.index()] = value;
        }

        if let Some(missing) = S::ALL.iter().find(|&&species| !seen.contains(&species)) {
            return Err(ValidationError::invalid(
                missing.name(),
                "missing initial value",
            ));
        }

        Self::from_values(values)
    }

    /// Returns the value of one species.
    #[must_use]
    pub fn get(&self, species: S) -> f64 {
        self.values[species.index()]
    }

    /// Returns all values in species index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(species, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        S::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns a new state with one species transformed.
    ///
    /// The rest of the state is copied unchanged. The transformed value is
    /// floored at zero like any other update.
    #[must_use]
    pub fn derive(&self, species: S, transform: impl FnOnce(f64) -> f64) -> Self {
        let mut values = self.values.clone();
        let slot = &mut values[species.index()];
        *slot = floor(transform(*slot));
        Self {
            values,
            species: PhantomData,
        }
    }

    /// Returns a new state with `magnitude` added to one species.
    #[must_use]
    pub fn perturbed(&self, species: S, magnitude: f64) -> Self {
        self.derive(species, |value| value + magnitude)
    }
}

impl<S: Identifier> Index<S> for PopulationState<S> {
    type Output = f64;

    fn index(&self, species: S) -> &f64 {
        &self.values[species.index()]
    }
}

impl<S: Identifier> fmt::Debug for PopulationState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(species, value)| (species.name(), value)))
            .finish()
    }
}

impl<S: Identifier> StepIntegrable<f64> for PopulationState<S> {
    type Derivative = Rates<S>;

    /// Forward Euler with a floor: `max(0, x + rate * dt)` for every species.
    ///
    /// All rates were evaluated from `self`, so pinning one species at zero
    /// has no effect on how the others move in this step.
    fn step(&self, derivative: Rates<S>, dt: f64) -> Self {
        let values = self
            .values
            .iter()
            .zip(&derivative.values)
            .map(|(x, rate)| floor(x + rate * dt))
            .collect();
        Self {
            values,
            species: PhantomData,
        }
    }
}

/// Instantaneous rates of change for every species of a model.
#[derive(Clone, PartialEq)]
pub struct Rates<S> {
    values: Vec<f64>,
    species: PhantomData<S>,
}

impl<S: Identifier> Rates<S> {
    /// Builds rates by evaluating `rate` once per species.
    ///
    /// ```
    /// # use popdyn_core::{Identifier, Rates};
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    /// # enum Species { A, B }
    /// # impl Identifier for Species {
    /// #     const ALL: &'static [Self] = &[Self::A, Self::B];
    /// #     fn index(self) -> usize { self as usize }
    /// #     fn name(self) -> &'static str { match self { Self::A => "A", Self::B => "B" } }
    /// # }
    /// let rates = Rates::from_fn(|species| match species {
    ///     Species::A => 1.5,
    ///     Species::B => -0.5,
    /// });
    /// assert_eq!(rates[Species::B], -0.5);
    /// ```
    pub fn from_fn(mut rate: impl FnMut(S) -> f64) -> Self {
        Self {
            values: S::ALL.iter().map(|&species| rate(species)).collect(),
            species: PhantomData,
        }
    }

    /// Returns rates of zero for every species.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_fn(|_| 0.0)
    }

    /// Returns the rate of one species.
    #[must_use]
    pub fn get(&self, species: S) -> f64 {
        self.values[species.index()]
    }

    /// Returns all rates in species index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl<S: Identifier> Index<S> for Rates<S> {
    type Output = f64;

    fn index(&self, species: S) -> &f64 {
        &self.values[species.index()]
    }
}

impl<S: Identifier> fmt::Debug for Rates<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                S::ALL
                    .iter()
                    .zip(&self.values)
                    .map(|(species, rate)| (species.name(), rate)),
            )
            .finish()
    }
}
