use popdyn_core::ValidationError;

/// Step size and step count for an Euler run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    dt: f64,
    steps: usize,
}

impl Config {
    /// Creates a new config with a validated step size and count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if `dt` is not finite
    /// and positive, or if `steps` is zero.
    pub fn new(dt: f64, steps: usize) -> Result<Self, ValidationError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ValidationError::invalid(
                "dt",
                format!("must be finite and positive, got {dt}"),
            ));
        }
        if steps == 0 {
            return Err(ValidationError::invalid("steps", "must be at least one"));
        }

        Ok(Self { dt, steps })
    }

    /// Returns the step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}
