use std::{collections::BTreeSet, fmt, marker::PhantomData, ops::Index};

use crate::{Identifier, ValidationError};

/// Named rate and shape constants of a population model.
///
/// Parameters are fixed for the lifetime of a model instance. To explore a
/// variation, [`derive`](Self::derive) a new set with one field changed; the
/// original is never modified.
#[derive(Clone, PartialEq)]
pub struct ModelParameters<P> {
    values: Vec<f64>,
    parameter: PhantomData<P>,
}

impl<P: Identifier> ModelParameters<P> {
    /// Creates parameters from values listed in parameter index order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if the number of
    /// values does not match the parameter count or any value is non-finite.
    pub fn from_values(values: impl Into<Vec<f64>>) -> Result<Self, ValidationError> {
        let values = values.into();
        if values.len() != P::count() {
            return Err(ValidationError::invalid(
                "parameters",
                format!("expected {} values, got {}", P::count(), values.len()),
            ));
        }
        if let Some((parameter, value)) = P::ALL
            .iter()
            .zip(&values)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ValidationError::invalid(
                parameter.name(),
                format!("must be finite, got {value}"),
            ));
        }
        Ok(Self {
            values,
            parameter: PhantomData,
        })
    }

    /// Creates parameters from `(name, value)` pairs.
    ///
    /// Every parameter the rate laws reference must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if a parameter is
    /// missing, repeated, unknown, or non-finite.
    pub fn from_named<I, K>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut values = vec![f64::NAN; P::count()];
        let mut seen = BTreeSet::new();

        for (name, value) in pairs {
            let name = name.as_ref();
            let parameter = P::from_name(name)
                .ok_or_else(|| ValidationError::invalid(name, "not a parameter of this model"))?;
            if !seen.insert(parameter) {
                return Err(ValidationError::invalid(name, "given more than once"));
            }
            values[parameter.index()] = value;
        }

        if let Some(missing) = P::ALL.iter().find(|&&p| !seen.contains(&p)) {
            return Err(ValidationError::invalid(missing.name(), "missing parameter"));
        }

        Self::from_values(values)
    }

    /// Returns the value of one parameter.
    #[must_use]
    pub fn get(&self, parameter: P) -> f64 {
        self.values[parameter.index()]
    }

    /// Returns all values in parameter index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(parameter, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (P, f64)> + '_ {
        P::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns a new parameter set with exactly one field transformed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if the transformed
    /// value is non-finite.
    pub fn derive(
        &self,
        parameter: P,
        transform: impl FnOnce(f64) -> f64,
    ) -> Result<Self, ValidationError> {
        let mut values = self.values.clone();
        let slot = &mut values[parameter.index()];
        *slot = transform(*slot);
        if !slot.is_finite() {
            return Err(ValidationError::invalid(
                parameter.name(),
                format!("derived value must be finite, got {slot}"),
            ));
        }
        Ok(Self {
            values,
            parameter: PhantomData,
        })
    }

    /// Returns a new parameter set with one field multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaled value is non-finite.
    pub fn scaled(&self, parameter: P, factor: f64) -> Result<Self, ValidationError> {
        self.derive(parameter, |value| value * factor)
    }
}

impl<P: Identifier> Index<P> for ModelParameters<P> {
    type Output = f64;

    fn index(&self, parameter: P) -> &f64 {
        &self.values[parameter.index()]
    }
}

impl<P: Identifier> fmt::Debug for ModelParameters<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(parameter, value)| (parameter.name(), value)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Rate {
        Growth,
        Kill,
    }

    impl Identifier for Rate {
        const ALL: &'static [Self] = &[Self::Growth, Self::Kill];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                Self::Growth => "r",
                Self::Kill => "k",
            }
        }
    }

    #[test]
    fn from_named_requires_every_parameter() {
        let params = ModelParameters::<Rate>::from_named([("k", 0.05), ("r", 0.1)]).unwrap();
        assert_eq!(params[Rate::Growth], 0.1);
        assert_eq!(params[Rate::Kill], 0.05);

        let err = ModelParameters::<Rate>::from_named([("r", 0.1)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid("k", "missing parameter"),
            "missing names are reported by field"
        );
    }

    #[test]
    fn from_values_rejects_non_finite() {
        let err = ModelParameters::<Rate>::from_values([0.1, f64::INFINITY]).unwrap_err();
        assert_eq!(err.field(), "k");
    }

    #[test]
    fn derive_changes_exactly_one_field() {
        let base = ModelParameters::<Rate>::from_values([0.1, 0.05]).unwrap();
        let derived = base.scaled(Rate::Kill, 2.0).unwrap();

        assert_eq!(base.values(), &[0.1, 0.05]);
        assert_eq!(derived.values(), &[0.1, 0.1]);
    }

    #[test]
    fn derive_rejects_non_finite_result() {
        let base = ModelParameters::<Rate>::from_values([0.1, 0.05]).unwrap();
        assert!(base.derive(Rate::Growth, |_| f64::NAN).is_err());
    }
}
