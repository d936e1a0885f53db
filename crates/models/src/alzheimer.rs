//! Alzheimer's disease cell-population dynamics.
//!
//! Seven compartments exchange mass in pairs: surviving and dead neurons,
//! quiescent and proliferating astrocytes, and type 1 and type 2 microglia
//! each gain exactly what their partner loses. Amyloid beta is produced by
//! surviving neurons, cleared by type 2 microglia and removed at a constant
//! rate:
//!
//! ```text
//! dNS = α1·AQ − α2·AP − α3·M1                      dND = −dNS
//! dAQ = α4·M2 − α5·M1                              dAP = −dAQ
//! dM2 = (α6+α11)·NS − α10·ND + (α7+α12)·AQ
//!       − α9·M1 + α14·M2 − (α8+α13)·AB             dM1 = −dM2
//! dAB = α15·NS − α16·M2 − αR·AB
//! ```
//!
//! Parameters carry no constraint beyond being finite.

use popdyn_core::{
    Identifier, ModelParameters, PopulationModel, PopulationState, Rates, ValidationError,
};

/// Step size the reference run uses.
pub const DEFAULT_DT: f64 = 0.25;

/// Step count the reference run uses, 20 time units at [`DEFAULT_DT`].
pub const DEFAULT_STEPS: usize = 80;

/// The seven cell and protein compartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    /// `NS`
    NeuronSurvival,
    /// `ND`
    NeuronDeath,
    /// `AQ`
    AstrocyteQuiescent,
    /// `AP`
    AstrocyteProliferating,
    /// `M1`
    MicrogliaM1,
    /// `M2`
    MicrogliaM2,
    /// `AB`
    AmyloidBeta,
}

impl Identifier for Species {
    const ALL: &'static [Self] = &[
        Self::NeuronSurvival,
        Self::NeuronDeath,
        Self::AstrocyteQuiescent,
        Self::AstrocyteProliferating,
        Self::MicrogliaM1,
        Self::MicrogliaM2,
        Self::AmyloidBeta,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::NeuronSurvival => "NS",
            Self::NeuronDeath => "ND",
            Self::AstrocyteQuiescent => "AQ",
            Self::AstrocyteProliferating => "AP",
            Self::MicrogliaM1 => "M1",
            Self::MicrogliaM2 => "M2",
            Self::AmyloidBeta => "AB",
        }
    }
}

/// Interaction coefficients `alpha1` through `alpha16` and the amyloid
/// removal rate `alphaR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,
    Alpha10,
    Alpha11,
    Alpha12,
    Alpha13,
    Alpha14,
    Alpha15,
    Alpha16,
    AlphaR,
}

impl Identifier for Parameter {
    const ALL: &'static [Self] = &[
        Self::Alpha1,
        Self::Alpha2,
        Self::Alpha3,
        Self::Alpha4,
        Self::Alpha5,
        Self::Alpha6,
        Self::Alpha7,
        Self::Alpha8,
        Self::Alpha9,
        Self::Alpha10,
        Self::Alpha11,
        Self::Alpha12,
        Self::Alpha13,
        Self::Alpha14,
        Self::Alpha15,
        Self::Alpha16,
        Self::AlphaR,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Alpha1 => "alpha1",
            Self::Alpha2 => "alpha2",
            Self::Alpha3 => "alpha3",
            Self::Alpha4 => "alpha4",
            Self::Alpha5 => "alpha5",
            Self::Alpha6 => "alpha6",
            Self::Alpha7 => "alpha7",
            Self::Alpha8 => "alpha8",
            Self::Alpha9 => "alpha9",
            Self::Alpha10 => "alpha10",
            Self::Alpha11 => "alpha11",
            Self::Alpha12 => "alpha12",
            Self::Alpha13 => "alpha13",
            Self::Alpha14 => "alpha14",
            Self::Alpha15 => "alpha15",
            Self::Alpha16 => "alpha16",
            Self::AlphaR => "alphaR",
        }
    }
}

/// The seven-compartment Alzheimer model.
#[derive(Debug, Clone, PartialEq)]
pub struct Alzheimer {
    parameters: ModelParameters<Parameter>,
}

impl PopulationModel for Alzheimer {
    type Species = Species;
    type Parameter = Parameter;

    fn from_parameters(parameters: ModelParameters<Parameter>) -> Result<Self, ValidationError> {
        Ok(Self { parameters })
    }

    fn parameters(&self) -> &ModelParameters<Parameter> {
        &self.parameters
    }

    fn rates(&self, state: &PopulationState<Species>) -> Rates<Species> {
        use Parameter::*;

        let a = &self.parameters;
        let ns = state[Species::NeuronSurvival];
        let nd = state[Species::NeuronDeath];
        let aq = state[Species::AstrocyteQuiescent];
        let ap = state[Species::AstrocyteProliferating];
        let m1 = state[Species::MicrogliaM1];
        let m2 = state[Species::MicrogliaM2];
        let ab = state[Species::AmyloidBeta];

        let neurons = a[Alpha1] * aq - a[Alpha2] * ap - a[Alpha3] * m1;
        let astrocytes = a[Alpha4] * m2 - a[Alpha5] * m1;
        let microglia = (a[Alpha6] + a[Alpha11]) * ns - a[Alpha10] * nd
            + (a[Alpha7] + a[Alpha12]) * aq
            - a[Alpha9] * m1
            + a[Alpha14] * m2
            - (a[Alpha8] + a[Alpha13]) * ab;
        let amyloid = a[Alpha15] * ns - a[Alpha16] * m2 - a[AlphaR] * ab;

        Rates::from_fn(|species| match species {
            Species::NeuronSurvival => neurons,
            Species::NeuronDeath => -neurons,
            Species::AstrocyteQuiescent => astrocytes,
            Species::AstrocyteProliferating => -astrocytes,
            Species::MicrogliaM1 => -microglia,
            Species::MicrogliaM2 => microglia,
            Species::AmyloidBeta => amyloid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn model(values: [f64; 17]) -> Alzheimer {
        Alzheimer::from_parameters(ModelParameters::from_values(values).unwrap()).unwrap()
    }

    fn unit_state() -> PopulationState<Species> {
        PopulationState::from_values([1.0; 7]).unwrap()
    }

    #[test]
    fn paired_compartments_mirror_each_other() {
        let values = [
            0.3, 0.1, 0.2, 0.4, 0.05, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09, 0.1,
            0.2, 0.3,
        ];
        let state = PopulationState::from_values([5.0, 1.0, 3.0, 2.0, 0.5, 0.7, 0.2]).unwrap();
        let rates = model(values).rates(&state);

        for (gain, loss) in [
            (Species::NeuronSurvival, Species::NeuronDeath),
            (Species::AstrocyteQuiescent, Species::AstrocyteProliferating),
            (Species::MicrogliaM2, Species::MicrogliaM1),
        ] {
            assert_relative_eq!(rates[gain], -rates[loss]);
        }
    }

    #[test]
    fn each_coefficient_enters_its_rate_law() {
        let mut values = [0.0; 17];
        values[Parameter::Alpha1.index()] = 2.0;
        values[Parameter::Alpha11.index()] = 3.0;
        values[Parameter::AlphaR.index()] = 0.5;
        let rates = model(values).rates(&unit_state());

        assert_relative_eq!(rates[Species::NeuronSurvival], 2.0);
        assert_relative_eq!(rates[Species::MicrogliaM2], 3.0);
        assert_relative_eq!(rates[Species::MicrogliaM1], -3.0);
        assert_relative_eq!(rates[Species::AmyloidBeta], -0.5);
        assert_relative_eq!(rates[Species::AstrocyteQuiescent], 0.0);
    }

    #[test]
    fn parameters_parse_by_name() {
        assert_eq!(Parameter::parse("alphaR").unwrap(), Parameter::AlphaR);
        assert_eq!(Parameter::parse("alpha16").unwrap(), Parameter::Alpha16);
        assert!(Parameter::parse("alpha17").is_err());
        assert_eq!(Species::parse("M2").unwrap(), Species::MicrogliaM2);
        assert_eq!(Parameter::count(), 17);
    }
}
