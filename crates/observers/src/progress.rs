use popdyn_core::Observer;
use tracing::info;

use crate::traits::{HasState, HasStep};

/// An observer that logs the population state every `every` steps.
///
/// Logging goes through `tracing` at `info` level, so output is controlled by
/// whichever subscriber the application installs. The logger never acts on
/// the run.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    every: usize,
    label: String,
}

impl ProgressLogger {
    /// Creates a logger that fires on every `every`-th step, starting at 0.
    ///
    /// An interval of zero is treated as one.
    #[must_use]
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            label: String::from("run"),
        }
    }

    /// Sets the label attached to every log line.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns `true` if the logger fires at `step`.
    #[must_use]
    pub fn fires_at(&self, step: usize) -> bool {
        step % self.every == 0
    }
}

impl<E, A> Observer<E, A> for ProgressLogger
where
    E: HasStep + HasState,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.fires_at(event.step()) {
            info!(
                run = %self.label,
                step = event.step(),
                time = event.time(),
                state = ?event.state(),
                "progress"
            );
        }
        None
    }
}
