//! Law requests and responses
//!
//! A request is a typed action asked against a [`UniverseState`]. Every
//! recognised action is its own variant with its own fields; anything else
//! arrives as [`LawAction::Unrecognized`] and is never routed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Domain, PrecedenceClass, UniverseState};

/// Enthalpy and entropy change of a process (kJ/mol, kJ/(mol·K))
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Energetics {
    pub delta_enthalpy: f64,
    pub delta_entropy: f64,
}

impl Energetics {
    pub fn new(delta_enthalpy: f64, delta_entropy: f64) -> Self {
        Energetics {
            delta_enthalpy,
            delta_entropy,
        }
    }
}

/// Trophic strategy used by home-range scaling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    Herbivore,
    Carnivore,
}

/// Kind of agent asking for default goals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Creature,
    GasCloud,
    Star,
}

/// A law question with its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LawAction {
    /// ΔG at the state temperature
    GibbsFreeEnergy { energetics: Energetics },
    /// Thermodynamically tagged: vetoed when ΔG > 0
    ChemicalReaction { reaction: String, energetics: Energetics },
    /// Thermodynamically tagged: vetoed when ΔG > 0
    BiologicalProcess { process: String, energetics: Energetics },

    /// Cloud mass (kg), temperature (K), density (kg/m³)
    JeansInstability { cloud_mass: f64, temperature: f64, density: f64 },
    EscapeVelocity { mass: f64, radius: f64 },
    SurfaceGravity { mass: f64, radius: f64 },
    /// Heaviest viable body at a surface gravity (m/s²)
    MaxBodyMass { gravity: f64 },
    DegeneracyPressure { density: f64 },
    PairProduction { temperature: f64 },

    /// Stellar masses in solar units
    StellarLuminosity { mass: f64 },
    StellarTemperature { mass: f64 },
    StellarLifetime { mass: f64 },
    SpectralClass { temperature: f64 },
    MassiveStarFraction { threshold_mass: f64 },
    MolecularStability { temperature: f64 },

    Metabolism { mass: f64 },
    Lifespan { mass: f64 },
    HomeRange { mass: f64, diet: Diet },
    BrainMass { body_mass: f64 },
    SpawnConditions { atmosphere: f64, temperature: f64 },
    /// Population after `years` of logistic growth
    PopulationGrowth { population: f64, capacity: f64, rate: f64, years: f64 },
    AdvancePopulations {
        populations: BTreeMap<String, f64>,
        capacity: f64,
        rate: f64,
        years: f64,
    },
    DefaultGoals { agent: AgentKind },

    CarryingCapacity { productivity: f64, trophic_level: u32, metabolic_rate: f64 },
    /// Kelvin, millimetres per year, W/m²
    PrimaryProductivity { temperature: f64, rainfall_mm: f64, sunlight: f64 },

    GroupSize { brain_mass: f64 },
    HierarchyLevels { population: f64 },
    ConsensusViable { group_size: f64 },
    /// People per km², surplus as a fraction of subsistence
    SocietyType { population: f64, density: f64, surplus: f64 },

    ToolUse { body_mass: f64, has_society: bool },
    /// Surplus fraction when farming multiplies the foraging capacity
    AgriculturalSurplus { population: f64, foraging_capacity: f64 },

    /// Luminosities in solar units, orbits in AU
    FrostLine { luminosity: f64 },
    HabitableZone { luminosity: f64, orbit: f64 },
    EquilibriumTemperature { luminosity: f64, orbit: f64, albedo: f64 },

    /// Anything the engine does not recognise
    Unrecognized { domain: String, action: String },
}

impl LawAction {
    /// Domain the question is addressed to
    pub fn domain(&self) -> Domain {
        use LawAction::*;
        match self {
            GibbsFreeEnergy { .. } => Domain::Entropy,
            ChemicalReaction { .. } | MolecularStability { .. } => Domain::Chemistry,
            BiologicalProcess { .. } => Domain::Biochemistry,
            JeansInstability { .. }
            | EscapeVelocity { .. }
            | SurfaceGravity { .. }
            | MaxBodyMass { .. }
            | DegeneracyPressure { .. }
            | PairProduction { .. } => Domain::Physics,
            StellarLuminosity { .. }
            | StellarTemperature { .. }
            | StellarLifetime { .. }
            | SpectralClass { .. }
            | MassiveStarFraction { .. } => Domain::Stellar,
            Metabolism { .. }
            | Lifespan { .. }
            | HomeRange { .. }
            | BrainMass { .. }
            | SpawnConditions { .. }
            | PopulationGrowth { .. }
            | AdvancePopulations { .. }
            | DefaultGoals { .. } => Domain::Biology,
            CarryingCapacity { .. } | PrimaryProductivity { .. } => Domain::Ecology,
            GroupSize { .. } => Domain::Cognitive,
            HierarchyLevels { .. } | ConsensusViable { .. } | SocietyType { .. } => {
                Domain::Social
            }
            ToolUse { .. } => Domain::Technology,
            AgriculturalSurplus { .. } => Domain::Agriculture,
            FrostLine { .. } | HabitableZone { .. } | EquilibriumTemperature { .. } => {
                Domain::Planetary
            }
            Unrecognized { domain, .. } => Domain::from_name(domain),
        }
    }

    /// Short action name for logs
    pub fn name(&self) -> &str {
        use LawAction::*;
        match self {
            GibbsFreeEnergy { .. } => "gibbs-free-energy",
            ChemicalReaction { .. } => "chemical-reaction",
            BiologicalProcess { .. } => "biological-process",
            JeansInstability { .. } => "check-jeans-instability",
            EscapeVelocity { .. } => "escape-velocity",
            SurfaceGravity { .. } => "surface-gravity",
            MaxBodyMass { .. } => "max-body-mass",
            DegeneracyPressure { .. } => "degeneracy-pressure",
            PairProduction { .. } => "pair-production",
            StellarLuminosity { .. } => "stellar-luminosity",
            StellarTemperature { .. } => "stellar-temperature",
            StellarLifetime { .. } => "stellar-lifetime",
            SpectralClass { .. } => "spectral-class",
            MassiveStarFraction { .. } => "massive-star-fraction",
            MolecularStability { .. } => "molecular-stability",
            Metabolism { .. } => "calculate-metabolism",
            Lifespan { .. } => "calculate-lifespan",
            HomeRange { .. } => "calculate-home-range",
            BrainMass { .. } => "brain-mass",
            SpawnConditions { .. } => "evaluate-spawn-conditions",
            PopulationGrowth { .. } => "population-growth",
            AdvancePopulations { .. } => "advance-population-analytically",
            DefaultGoals { .. } => "get-default-goals",
            CarryingCapacity { .. } => "carrying-capacity",
            PrimaryProductivity { .. } => "primary-productivity",
            GroupSize { .. } => "group-size",
            HierarchyLevels { .. } => "hierarchy-levels",
            ConsensusViable { .. } => "consensus-viable",
            SocietyType { .. } => "society-type",
            ToolUse { .. } => "tool-use",
            AgriculturalSurplus { .. } => "agricultural-surplus",
            FrostLine { .. } => "frost-line",
            HabitableZone { .. } => "habitable-zone",
            EquilibriumTemperature { .. } => "equilibrium-temperature",
            Unrecognized { action, .. } => action,
        }
    }

    /// Energetics of a thermodynamically tagged action
    pub fn energetics(&self) -> Option<Energetics> {
        match self {
            LawAction::ChemicalReaction { energetics, .. }
            | LawAction::BiologicalProcess { energetics, .. } => Some(*energetics),
            _ => None,
        }
    }
}

/// A law question asked against a universe snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LawRequest {
    pub action: LawAction,
    pub state: UniverseState,
}

impl LawRequest {
    pub fn new(action: LawAction, state: UniverseState) -> Self {
        LawRequest { action, state }
    }

    pub fn domain(&self) -> Domain {
        self.action.domain()
    }
}

/// Value produced by a law
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LawValue {
    /// No answer. A valid outcome, not a failure.
    #[default]
    Null,
    Number(f64),
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Populations(BTreeMap<String, f64>),
}

impl LawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, LawValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            LawValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            LawValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for a number that is not finite
    pub fn is_invalid_number(&self) -> bool {
        matches!(self, LawValue::Number(n) if !n.is_finite())
    }
}

impl From<f64> for LawValue {
    fn from(v: f64) -> Self {
        LawValue::Number(v)
    }
}

impl From<bool> for LawValue {
    fn from(v: bool) -> Self {
        LawValue::Flag(v)
    }
}

/// How a response came about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    /// A regulator answered
    #[default]
    Answered,
    /// No regulator could handle the request
    Unroutable,
    /// Thermodynamics forbids the process
    Vetoed,
    /// The answer was not a finite number
    NumericInvalid,
}

/// Why one side of a conflict won
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum ConflictReason {
    /// Lower precedence class wins
    Precedence {
        winner: PrecedenceClass,
        loser: PrecedenceClass,
    },
    /// Same class, numeric: the smaller value wins
    ConservativeMinimum,
    /// Same class, not comparable: the earlier-registered side wins
    FirstRegistered,
}

/// Record of two regulators disagreeing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub domain_a: Domain,
    pub value_a: LawValue,
    pub domain_b: Domain,
    pub value_b: LawValue,
    pub winner: Domain,
    pub winning_value: LawValue,
    pub reason: ConflictReason,
}

/// Answer to a law request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LawResponse {
    pub value: LawValue,
    pub authority: Domain,
    /// In [0, 1]
    pub confidence: f64,
    pub precedents: Vec<String>,
    pub conflicts: Vec<ConflictRecord>,
    pub disposition: Disposition,
}

impl LawResponse {
    /// A regulator's answer
    pub fn answered(value: impl Into<LawValue>, authority: Domain, confidence: f64) -> Self {
        LawResponse {
            value: value.into(),
            authority,
            confidence: confidence.clamp(0.0, 1.0),
            precedents: Vec::new(),
            conflicts: Vec::new(),
            disposition: Disposition::Answered,
        }
    }

    /// A regulator that recognised the request but had no answer
    pub fn empty(authority: Domain) -> Self {
        LawResponse {
            value: LawValue::Null,
            authority,
            confidence: 0.0,
            precedents: Vec::new(),
            conflicts: Vec::new(),
            disposition: Disposition::Answered,
        }
    }

    pub fn with_precedent(mut self, precedent: impl Into<String>) -> Self {
        self.precedents.push(precedent.into());
        self
    }

    /// No capable regulator
    pub fn unroutable() -> Self {
        LawResponse {
            disposition: Disposition::Unroutable,
            ..Self::empty(Domain::Unknown)
        }
    }

    /// Forbidden by thermodynamics
    pub fn vetoed(precedent: String) -> Self {
        LawResponse {
            value: LawValue::Null,
            authority: Domain::Entropy,
            confidence: 1.0,
            precedents: vec![precedent],
            conflicts: Vec::new(),
            disposition: Disposition::Vetoed,
        }
    }

    /// Replace a non-finite number with null and zero confidence
    pub fn into_numeric_invalid(self) -> Self {
        LawResponse {
            value: LawValue::Null,
            confidence: 0.0,
            disposition: Disposition::NumericInvalid,
            ..self
        }
    }

    pub fn is_vetoed(&self) -> bool {
        self.disposition == Disposition::Vetoed
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_domains() {
        let a = LawAction::Metabolism { mass: 1.0 };
        assert_eq!(a.domain(), Domain::Biology);
        assert_eq!(a.name(), "calculate-metabolism");

        let u = LawAction::Unrecognized {
            domain: "alchemy".into(),
            action: "transmute".into(),
        };
        assert_eq!(u.domain(), Domain::Unknown);
        assert_eq!(u.name(), "transmute");
    }

    #[test]
    fn test_energetics_only_on_tagged_actions() {
        let e = Energetics::new(-10.0, 0.1);
        let reaction = LawAction::ChemicalReaction {
            reaction: "H2".into(),
            energetics: e,
        };
        assert_eq!(reaction.energetics(), Some(e));
        assert_eq!(LawAction::GibbsFreeEnergy { energetics: e }.energetics(), None);
    }

    #[test]
    fn test_response_constructors() {
        let r = LawResponse::answered(2.0, Domain::Biology, 1.5);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.disposition, Disposition::Answered);

        let u = LawResponse::unroutable();
        assert!(u.value.is_null());
        assert_eq!(u.confidence, 0.0);
        assert_eq!(u.authority, Domain::Unknown);

        let v = LawResponse::vetoed("x".into());
        assert!(v.is_vetoed());
        assert!(v.value.is_null());

        let n = LawResponse::answered(f64::NAN, Domain::Ecology, 0.8).into_numeric_invalid();
        assert!(n.value.is_null());
        assert_eq!(n.confidence, 0.0);
        assert_eq!(n.authority, Domain::Ecology);
    }

    #[test]
    fn test_invalid_number() {
        assert!(LawValue::Number(f64::NAN).is_invalid_number());
        assert!(LawValue::Number(f64::INFINITY).is_invalid_number());
        assert!(!LawValue::Number(1.0).is_invalid_number());
        assert!(!LawValue::Null.is_invalid_number());
    }

    #[test]
    fn test_request_serializes() {
        let req = LawRequest::new(
            LawAction::HomeRange {
                mass: 50.0,
                diet: Diet::Carnivore,
            },
            UniverseState::default(),
        );
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"type\":\"home-range\""));
        let back: LawRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
