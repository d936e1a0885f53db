//! Effector/target immune-cell dynamics.
//!
//! Target cells `T` grow exponentially and are killed on contact with
//! effector cells `E`. Effectors are recruited by targets through a Hill-type
//! term, renew themselves through a second Hill-type term and die at a
//! constant rate:
//!
//! ```text
//! dT/dt = r·T − k·T·E
//! dE/dt = p·Tᵘ/(mᵛ + Tᵛ) + s·Eⁿ/(cⁿ + Eⁿ) − d·E
//! ```

use popdyn_core::{
    Identifier, ModelParameters, PopulationModel, PopulationState, Rates, ValidationError,
};

use crate::hill::hill;

/// Step size the reference run uses.
pub const DEFAULT_DT: f64 = 0.01;

/// Step count the reference run uses.
pub const DEFAULT_STEPS: usize = 10_000;

/// The two cell populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Effector,
    Target,
}

impl Identifier for Species {
    const ALL: &'static [Self] = &[Self::Effector, Self::Target];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Effector => "E",
            Self::Target => "T",
        }
    }
}

/// Rate and shape constants, named by their single-letter symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    /// `p`, maximal recruitment of effectors by targets.
    Recruitment,
    /// `m`, target count at which recruitment is half-saturated.
    RecruitmentHalfSaturation,
    /// `n`, Hill exponent of effector self-renewal.
    RenewalHill,
    /// `r`, target growth rate.
    TargetGrowth,
    /// `k`, rate at which effectors kill targets.
    KillRate,
    /// `c`, effector count at which self-renewal is half-saturated.
    RenewalHalfSaturation,
    /// `u`, numerator exponent of recruitment.
    RecruitmentNumeratorHill,
    /// `v`, denominator exponent of recruitment.
    RecruitmentHill,
    /// `s`, maximal effector self-renewal.
    SelfRenewal,
    /// `d`, effector death rate.
    EffectorDeath,
}

impl Identifier for Parameter {
    const ALL: &'static [Self] = &[
        Self::Recruitment,
        Self::RecruitmentHalfSaturation,
        Self::RenewalHill,
        Self::TargetGrowth,
        Self::KillRate,
        Self::RenewalHalfSaturation,
        Self::RecruitmentNumeratorHill,
        Self::RecruitmentHill,
        Self::SelfRenewal,
        Self::EffectorDeath,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Recruitment => "p",
            Self::RecruitmentHalfSaturation => "m",
            Self::RenewalHill => "n",
            Self::TargetGrowth => "r",
            Self::KillRate => "k",
            Self::RenewalHalfSaturation => "c",
            Self::RecruitmentNumeratorHill => "u",
            Self::RecruitmentHill => "v",
            Self::SelfRenewal => "s",
            Self::EffectorDeath => "d",
        }
    }
}

/// The effector/target model.
///
/// Both half-saturation constants must be positive and the Hill exponents
/// non-negative, which keeps every Hill denominator positive for any
/// non-negative population.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectorTarget {
    parameters: ModelParameters<Parameter>,
}

impl EffectorTarget {
    /// Builds an initial state from effector and target counts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if either count is negative or non-finite.
    pub fn initial(effector: f64, target: f64) -> Result<PopulationState<Species>, ValidationError> {
        PopulationState::from_values([effector, target])
    }
}

impl PopulationModel for EffectorTarget {
    type Species = Species;
    type Parameter = Parameter;

    fn from_parameters(parameters: ModelParameters<Parameter>) -> Result<Self, ValidationError> {
        for half_saturation in [
            Parameter::RecruitmentHalfSaturation,
            Parameter::RenewalHalfSaturation,
        ] {
            if parameters[half_saturation] <= 0.0 {
                return Err(ValidationError::invalid(
                    half_saturation.name(),
                    format!(
                        "half-saturation constant must be positive, got {}",
                        parameters[half_saturation]
                    ),
                ));
            }
        }

        for exponent in [
            Parameter::RenewalHill,
            Parameter::RecruitmentNumeratorHill,
            Parameter::RecruitmentHill,
        ] {
            if parameters[exponent] < 0.0 {
                return Err(ValidationError::invalid(
                    exponent.name(),
                    format!(
                        "Hill exponent must be non-negative, got {}",
                        parameters[exponent]
                    ),
                ));
            }
        }

        Ok(Self { parameters })
    }

    fn parameters(&self) -> &ModelParameters<Parameter> {
        &self.parameters
    }

    fn rates(&self, state: &PopulationState<Species>) -> Rates<Species> {
        let p = &self.parameters;
        let effector = state[Species::Effector];
        let target = state[Species::Target];

        let target_rate =
            p[Parameter::TargetGrowth] * target - p[Parameter::KillRate] * target * effector;

        let recruitment = p[Parameter::Recruitment]
            * hill(
                target,
                p[Parameter::RecruitmentHalfSaturation],
                p[Parameter::RecruitmentNumeratorHill],
                p[Parameter::RecruitmentHill],
            );
        let renewal = p[Parameter::SelfRenewal]
            * hill(
                effector,
                p[Parameter::RenewalHalfSaturation],
                p[Parameter::RenewalHill],
                p[Parameter::RenewalHill],
            );
        let effector_rate = recruitment + renewal - p[Parameter::EffectorDeath] * effector;

        Rates::from_fn(|species| match species {
            Species::Effector => effector_rate,
            Species::Target => target_rate,
        })
    }
}
