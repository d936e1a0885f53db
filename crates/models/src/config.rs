//! YAML run descriptions.
//!
//! A [`SimulationConfig`] names a model and carries everything a run needs:
//! step size and count, parameters, initial state and perturbations.
//!
//! ```yaml
//! model: effector-target
//! dt: 0.01
//! steps: 1000
//! parameters: { p: 0.5, m: 1.0, n: 2.0, r: 0.1, k: 0.05, c: 1.0, u: 1.0, v: 1.0, s: 0.1, d: 0.01 }
//! initial: { E: 10.0, T: 100.0 }
//! perturbations:
//!   - { target: E, step: 500, magnitude: 50.0 }
//! periodic:
//!   - { target: T, dose: 5.0, events: 4 }
//! ```
//!
//! Parameters and initial values may also be listed in index order as
//! `{ values: [...] }`.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use popdyn_core::{
    Identifier, ModelParameters, Periodic, Perturbation, PerturbationSchedule, PopulationModel,
    PopulationState, Trigger, ValidationError,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{alzheimer, effector_target};

/// Errors raised while loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Which population model a configuration drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    EffectorTarget,
    Alzheimer,
}

impl ModelKind {
    /// Returns the step size used when a configuration gives none.
    #[must_use]
    pub fn default_dt(self) -> f64 {
        match self {
            Self::EffectorTarget => effector_target::DEFAULT_DT,
            Self::Alzheimer => alzheimer::DEFAULT_DT,
        }
    }

    /// Returns the step count used when a configuration gives none.
    #[must_use]
    pub fn default_steps(self) -> usize {
        match self {
            Self::EffectorTarget => effector_target::DEFAULT_STEPS,
            Self::Alzheimer => alzheimer::DEFAULT_STEPS,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EffectorTarget => "effector-target",
            Self::Alzheimer => "alzheimer",
        })
    }
}

/// Values given either by name or in index order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Ordered(OrderedValues),
    Named(BTreeMap<String, f64>),
}

/// Values listed in index order as `{ values: [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderedValues {
    pub values: Vec<f64>,
}

impl Values {
    fn parameters<P: Identifier>(&self) -> Result<ModelParameters<P>, ValidationError> {
        match self {
            Self::Ordered(ordered) => ModelParameters::from_values(ordered.values.clone()),
            Self::Named(map) => ModelParameters::from_named(map.iter().map(|(k, v)| (k, *v))),
        }
    }

    fn state<S: Identifier>(&self) -> Result<PopulationState<S>, ValidationError> {
        match self {
            Self::Ordered(ordered) => PopulationState::from_values(ordered.values.clone()),
            Self::Named(map) => PopulationState::from_named(map.iter().map(|(k, v)| (k, *v))),
        }
    }
}

/// One explicit perturbation, triggered by exactly one of `step` or `time`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerturbationEntry {
    pub target: String,
    #[serde(default)]
    pub step: Option<usize>,
    #[serde(default)]
    pub time: Option<f64>,
    pub magnitude: f64,
}

impl PerturbationEntry {
    fn trigger(&self) -> Result<Trigger, ValidationError> {
        match (self.step, self.time) {
            (Some(step), None) => Ok(Trigger::Step(step)),
            (None, Some(time)) => Ok(Trigger::Time(time)),
            _ => Err(ValidationError::invalid(
                &self.target,
                "perturbation needs exactly one of `step` or `time`",
            )),
        }
    }
}

/// One periodic dosing generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodicEntry {
    pub target: String,
    pub dose: f64,
    pub events: usize,
    #[serde(default = "default_warmup")]
    pub warmup: usize,
}

fn default_warmup() -> usize {
    1
}

/// A complete run description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub model: ModelKind,
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub steps: Option<usize>,
    pub parameters: Values,
    pub initial: Values,
    #[serde(default)]
    pub perturbations: Vec<PerturbationEntry>,
    #[serde(default)]
    pub periodic: Vec<PeriodicEntry>,
}

impl SimulationConfig {
    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the text is not a valid document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Yaml`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!(path = %path.display(), model = %config.model, "loaded simulation config");
        Ok(config)
    }

    /// Returns the configured step size, or the model's default.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt.unwrap_or_else(|| self.model.default_dt())
    }

    /// Returns the configured step count, or the model's default.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps.unwrap_or_else(|| self.model.default_steps())
    }

    /// Builds the model from the configured parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter is missing, unknown or
    /// rejected by the model.
    pub fn build_model<M: PopulationModel>(&self) -> Result<M, ValidationError> {
        M::from_parameters(self.parameters.parameters()?)
    }

    /// Builds the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a species is missing, unknown, negative
    /// or non-finite.
    pub fn initial_state<S: Identifier>(&self) -> Result<PopulationState<S>, ValidationError> {
        self.initial.state()
    }

    /// Builds the perturbation schedule.
    ///
    /// Target names are resolved here. Step bounds are checked later, when
    /// the schedule is resolved against a run.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTarget`] for a target the model does
    /// not have.
    pub fn schedule<S: Identifier>(&self) -> Result<PerturbationSchedule<S>, ValidationError> {
        let mut schedule = PerturbationSchedule::new();
        for entry in &self.perturbations {
            schedule.push(Perturbation::named(
                &entry.target,
                entry.trigger()?,
                entry.magnitude,
            )?);
        }
        for entry in &self.periodic {
            schedule.push_periodic(
                Periodic::named(&entry.target, entry.dose, entry.events)?
                    .with_warmup(entry.warmup),
            );
        }
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::effector_target::{EffectorTarget, Species};

    const NAMED: &str = "
model: effector-target
steps: 100
parameters: { p: 0.5, m: 1.0, n: 2.0, r: 0.1, k: 0.05, c: 1.0, u: 1.0, v: 1.0, s: 0.1, d: 0.01 }
initial: { E: 10.0, T: 100.0 }
perturbations:
  - { target: E, step: 50, magnitude: 5.0 }
  - { target: T, time: 0.25, magnitude: -1.0 }
";

    #[test]
    fn named_form_builds_every_part() {
        let config = SimulationConfig::from_yaml_str(NAMED).unwrap();

        assert_eq!(config.model, ModelKind::EffectorTarget);
        assert_eq!(config.dt(), effector_target::DEFAULT_DT);
        assert_eq!(config.steps(), 100);

        let model: EffectorTarget = config.build_model().unwrap();
        assert_eq!(model.parameters().values()[0], 0.5);

        let initial = config.initial_state::<Species>().unwrap();
        assert_eq!(initial[Species::Effector], 10.0);

        let resolved = config
            .schedule::<Species>()
            .unwrap()
            .resolve(config.dt(), config.steps())
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.at(25)[0].target, Species::Target);
        assert_eq!(resolved.at(50)[0].magnitude, 5.0);
    }

    #[test]
    fn ordered_form_matches_named_form() {
        let ordered = SimulationConfig::from_yaml_str(
            "
model: effector-target
parameters: { values: [0.5, 1.0, 2.0, 0.1, 0.05, 1.0, 1.0, 1.0, 0.1, 0.01] }
initial: { values: [10.0, 100.0] }
",
        )
        .unwrap();
        let named = SimulationConfig::from_yaml_str(NAMED).unwrap();

        let a: EffectorTarget = ordered.build_model().unwrap();
        let b: EffectorTarget = named.build_model().unwrap();
        assert_eq!(a, b);
        assert_eq!(
            ordered.initial_state::<Species>().unwrap(),
            named.initial_state::<Species>().unwrap()
        );
        assert_eq!(ordered.steps(), effector_target::DEFAULT_STEPS);
    }

    #[test]
    fn periodic_warmup_defaults_to_one() {
        let config = SimulationConfig::from_yaml_str(
            "
model: alzheimer
parameters: { values: [] }
initial: { values: [] }
periodic:
  - { target: AB, dose: 2.0, events: 4 }
",
        )
        .unwrap();

        assert_eq!(config.periodic[0].warmup, 1);
        assert_eq!(config.dt(), alzheimer::DEFAULT_DT);

        let schedule = config.schedule::<alzheimer::Species>().unwrap();
        assert_eq!(schedule.periodic()[0].steps(80).unwrap(), vec![20, 40, 60]);
    }

    #[test]
    fn rejects_ambiguous_trigger() {
        let config = SimulationConfig::from_yaml_str(
            "
model: effector-target
parameters: { values: [] }
initial: { values: [] }
perturbations:
  - { target: E, step: 1, time: 0.5, magnitude: 1.0 }
",
        )
        .unwrap();

        let err = config.schedule::<Species>().unwrap_err();
        assert_eq!(err.field(), "E");
    }

    #[test]
    fn rejects_unknown_target() {
        let config = SimulationConfig::from_yaml_str(
            "
model: effector-target
parameters: { values: [] }
initial: { values: [] }
perturbations:
  - { target: X, step: 1, magnitude: 1.0 }
",
        )
        .unwrap();

        assert_eq!(
            config.schedule::<Species>().unwrap_err(),
            ValidationError::unknown_target("X")
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SimulationConfig::from_yaml_str(
            "
model: effector-target
parameters: { values: [] }
initial: { values: [] }
stepz: 10
",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn rejects_names_mixed_into_ordered_values() {
        let err = SimulationConfig::from_yaml_str(
            "
model: effector-target
parameters: { values: [0.5, 1.0, 2.0, 0.1, 0.05, 1.0, 1.0, 1.0, 0.1, 0.01] }
initial: { values: [10.0, 100.0], E: 5.0 }
",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationConfig::from_path("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
