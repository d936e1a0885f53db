use popdyn_core::ValidationError;
use thiserror::Error;

/// Errors raised while building an automaton run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid automaton: {0}")]
    Invalid(#[from] ValidationError),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid(ValidationError::invalid(field, reason))
    }
}
