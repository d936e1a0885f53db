use crate::{Identifier, ModelParameters, PopulationState, Rates, ValidationError};

/// A population model: a set of species and the rate laws that move them.
///
/// A model owns its [`ModelParameters`] and evaluates every species' rate of
/// change from a single state. It holds no simulation state of its own, so the
/// same model can drive any number of independent runs.
pub trait PopulationModel {
    /// The species tracked by this model.
    type Species: Identifier;

    /// The named constants the rate laws reference.
    type Parameter: Identifier;

    /// Builds a model from a parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the parameters violate a model-specific
    /// constraint, such as a half-saturation constant that must be positive.
    fn from_parameters(parameters: ModelParameters<Self::Parameter>) -> Result<Self, ValidationError>
    where
        Self: Sized;

    /// Returns the parameters this model was built with.
    fn parameters(&self) -> &ModelParameters<Self::Parameter>;

    /// Computes the instantaneous rate of change of every species.
    ///
    /// All rates must be computed from `state` alone. The caller applies them
    /// synchronously, so no rate may depend on an already-updated species.
    fn rates(&self, state: &PopulationState<Self::Species>) -> Rates<Self::Species>;

    /// Returns a new model with one parameter transformed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the derived parameter set is rejected
    /// by [`from_parameters`](Self::from_parameters).
    fn derive(
        &self,
        parameter: Self::Parameter,
        transform: impl FnOnce(f64) -> f64,
    ) -> Result<Self, ValidationError>
    where
        Self: Sized,
    {
        Self::from_parameters(self.parameters().derive(parameter, transform)?)
    }
}
