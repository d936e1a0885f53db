use popdyn_core::ValidationError;

/// Errors that can occur when setting up an Euler run.
///
/// Every check happens before the first step. A run that starts always
/// completes, so there is no error for failures during integration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid simulation: {0}")]
    Invalid(#[from] ValidationError),
}
