use thiserror::Error;

/// Errors raised while validating a simulation before it runs.
///
/// Every check happens up front. Once a run has been accepted it completes
/// without further failure, so these are the only errors a caller sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field holds a value the engine cannot run with.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// A perturbation or lookup names something the model does not have.
    #[error("unknown target: {name}")]
    UnknownTarget { name: String },
}

impl ValidationError {
    /// Creates an [`InvalidConfiguration`](Self::InvalidConfiguration) error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`UnknownTarget`](Self::UnknownTarget) error.
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }

    /// Returns the name of the field or target that failed validation.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidConfiguration { field, .. } => field,
            Self::UnknownTarget { name } => name,
        }
    }
}
