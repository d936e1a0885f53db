use std::{fmt::Debug, hash::Hash};

use crate::ValidationError;

/// A closed set of named identifiers, such as a model's species or parameters.
///
/// Implementors are small `Copy` enums. Each variant has a dense index into
/// [`ALL`](Self::ALL) and a stable name used by configuration files and
/// perturbation lists. Names are resolved once, at construction time; the
/// engine itself only ever works with the enum.
///
/// # Example
///
/// ```
/// use popdyn_core::Identifier;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// enum Species {
///     Prey,
///     Predator,
/// }
///
/// impl Identifier for Species {
///     const ALL: &'static [Self] = &[Self::Prey, Self::Predator];
///
///     fn index(self) -> usize {
///         self as usize
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Prey => "prey",
///             Self::Predator => "predator",
///         }
///     }
/// }
///
/// assert_eq!(Species::Predator.index(), 1);
/// assert_eq!(Species::from_name("prey"), Some(Species::Prey));
/// assert!(Species::parse("wolf").is_err());
/// ```
pub trait Identifier: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Every identifier, in index order.
    const ALL: &'static [Self];

    /// Returns the name used in configuration and perturbation inputs.
    fn name(self) -> &'static str;

    /// Returns the position of this identifier within [`ALL`](Self::ALL).
    fn index(self) -> usize;

    /// Returns the number of identifiers in the set.
    #[must_use]
    fn count() -> usize {
        Self::ALL.len()
    }

    /// Looks up an identifier by name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Looks up an identifier by name, failing with
    /// [`ValidationError::UnknownTarget`] if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if no identifier has the given name.
    fn parse(name: &str) -> Result<Self, ValidationError> {
        Self::from_name(name).ok_or_else(|| ValidationError::unknown_target(name))
    }
}
