/// A trait for types that can be advanced by one explicit Euler step.
///
/// Implementing this trait lets the Euler driver work with any state type by
/// stepping it via `derivative * delta`. The implementor decides how the raw
/// update is constrained: [`PopulationState`](crate::PopulationState), for
/// example, pins every component at zero.
pub trait StepIntegrable<Delta> {
    /// The rate of change of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
