//! Law domains and identifiers
//!
//! Every law the engine knows is named by a [`LawId`]. The set is closed:
//! regulators dispatch on it and the registry is populated with all of it at
//! startup, so a lookup can never miss.

use serde::{Deserialize, Serialize};

/// Domain a law or regulator belongs to.
///
/// Parsed from the prefix of a dot-separated rule name (`"biology.allometry.x"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Physics,
    Stellar,
    Chemistry,
    Biochemistry,
    Biology,
    Ecology,
    Cognitive,
    Social,
    Economics,
    Technology,
    Agriculture,
    Planetary,
    Entropy,
    /// Prefix not recognised
    Unknown,
}

impl Domain {
    pub const ALL: [Domain; 14] = [
        Domain::Physics,
        Domain::Stellar,
        Domain::Chemistry,
        Domain::Biochemistry,
        Domain::Biology,
        Domain::Ecology,
        Domain::Cognitive,
        Domain::Social,
        Domain::Economics,
        Domain::Technology,
        Domain::Agriculture,
        Domain::Planetary,
        Domain::Entropy,
        Domain::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Physics => "physics",
            Domain::Stellar => "stellar",
            Domain::Chemistry => "chemistry",
            Domain::Biochemistry => "biochemistry",
            Domain::Biology => "biology",
            Domain::Ecology => "ecology",
            Domain::Cognitive => "cognitive",
            Domain::Social => "social",
            Domain::Economics => "economics",
            Domain::Technology => "technology",
            Domain::Agriculture => "agriculture",
            Domain::Planetary => "planetary",
            Domain::Entropy => "entropy",
            Domain::Unknown => "unknown",
        }
    }

    /// Parse a bare domain name
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|d| *d != Domain::Unknown && d.as_str() == name)
            .unwrap_or(Domain::Unknown)
    }

    /// Domain of a dot-separated rule name, taken from its first segment.
    pub fn from_rule_name(rule: &str) -> Self {
        let prefix = rule.split('.').next().unwrap_or(rule);
        Self::from_name(prefix)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a single law function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LawId {
    // Thermodynamics
    GibbsFreeEnergy,
    ReactionSpontaneity,

    // Physics
    JeansInstability,
    EscapeVelocity,
    SurfaceGravity,
    SquareCubeMassLimit,
    DegeneracyPressure,
    PairProduction,

    // Stellar
    MainSequenceLuminosity,
    MainSequenceTemperature,
    MainSequenceLifetime,
    SpectralClass,
    MassiveStarFraction,

    // Chemistry
    MolecularStability,

    // Biology
    BasalMetabolicRate,
    MaxLifespan,
    HomeRange,
    BrainMass,
    MaxMassForGravity,
    SpawnConditions,
    LogisticAdvance,
    DefaultGoals,

    // Ecology
    CarryingCapacity,
    PrimaryProductivity,
    LogisticStep,

    // Social
    SocialBrainGroupSize,
    HierarchyLevels,
    ConsensusViable,
    SocietyType,

    // Technology
    ToolUseViable,
    AgriculturalSurplus,

    // Planetary
    FrostLine,
    HabitableZone,
    EquilibriumTemperature,
}

impl LawId {
    pub const ALL: [LawId; 34] = [
        LawId::GibbsFreeEnergy,
        LawId::ReactionSpontaneity,
        LawId::JeansInstability,
        LawId::EscapeVelocity,
        LawId::SurfaceGravity,
        LawId::SquareCubeMassLimit,
        LawId::DegeneracyPressure,
        LawId::PairProduction,
        LawId::MainSequenceLuminosity,
        LawId::MainSequenceTemperature,
        LawId::MainSequenceLifetime,
        LawId::SpectralClass,
        LawId::MassiveStarFraction,
        LawId::MolecularStability,
        LawId::BasalMetabolicRate,
        LawId::MaxLifespan,
        LawId::HomeRange,
        LawId::BrainMass,
        LawId::MaxMassForGravity,
        LawId::SpawnConditions,
        LawId::LogisticAdvance,
        LawId::DefaultGoals,
        LawId::CarryingCapacity,
        LawId::PrimaryProductivity,
        LawId::LogisticStep,
        LawId::SocialBrainGroupSize,
        LawId::HierarchyLevels,
        LawId::ConsensusViable,
        LawId::SocietyType,
        LawId::ToolUseViable,
        LawId::AgriculturalSurplus,
        LawId::FrostLine,
        LawId::HabitableZone,
        LawId::EquilibriumTemperature,
    ];

    /// Dot-separated rule name. The first segment decides gating and precedence.
    pub fn rule_name(self) -> &'static str {
        match self {
            LawId::GibbsFreeEnergy => "physics.thermodynamics.gibbsFreeEnergy",
            LawId::ReactionSpontaneity => "physics.thermodynamics.spontaneity",
            LawId::JeansInstability => "physics.cosmology.jeansInstability",
            LawId::EscapeVelocity => "physics.orbital.escapeVelocity",
            LawId::SurfaceGravity => "physics.gravity.surfaceGravity",
            LawId::SquareCubeMassLimit => "physics.structural.squareCubeLimit",
            LawId::DegeneracyPressure => "physics.quantum.degeneracyPressure",
            LawId::PairProduction => "physics.relativistic.pairProduction",
            LawId::MainSequenceLuminosity => "stellar.mainSequence.luminosity",
            LawId::MainSequenceTemperature => "stellar.mainSequence.temperature",
            LawId::MainSequenceLifetime => "stellar.mainSequence.lifetime",
            LawId::SpectralClass => "stellar.classification.spectralType",
            LawId::MassiveStarFraction => "stellar.imf.massiveFraction",
            LawId::MolecularStability => "chemistry.bonding.molecularStability",
            LawId::BasalMetabolicRate => "biology.allometry.basalMetabolicRate",
            LawId::MaxLifespan => "biology.allometry.maxLifespan",
            LawId::HomeRange => "biology.allometry.homeRange",
            LawId::BrainMass => "biology.allometry.brainMass",
            LawId::MaxMassForGravity => "biology.structural.maxMassForGravity",
            LawId::SpawnConditions => "biology.habitability.spawnConditions",
            LawId::LogisticAdvance => "biology.population.logisticAnalytic",
            LawId::DefaultGoals => "biology.behavior.defaultGoals",
            LawId::CarryingCapacity => "ecology.carryingCapacity.trophic",
            LawId::PrimaryProductivity => "ecology.productivity.miamiModel",
            LawId::LogisticStep => "ecology.population.logisticStep",
            LawId::SocialBrainGroupSize => "cognitive.socialBrain.groupSize",
            LawId::HierarchyLevels => "social.scalarStress.hierarchyLevels",
            LawId::ConsensusViable => "social.dunbar.consensusViable",
            LawId::SocietyType => "social.typology.societyType",
            LawId::ToolUseViable => "technology.tools.toolUseViable",
            LawId::AgriculturalSurplus => "agriculture.surplus.fraction",
            LawId::FrostLine => "planetary.disk.frostLine",
            LawId::HabitableZone => "planetary.habitability.habitableZone",
            LawId::EquilibriumTemperature => "planetary.radiation.equilibriumTemperature",
        }
    }

    pub fn domain(self) -> Domain {
        Domain::from_rule_name(self.rule_name())
    }

    /// Source the law is attributed to
    pub fn citation(self) -> &'static str {
        match self {
            LawId::GibbsFreeEnergy => "Gibbs 1876",
            LawId::ReactionSpontaneity => "Clausius 1865",
            LawId::JeansInstability => "Jeans 1902",
            LawId::EscapeVelocity | LawId::SurfaceGravity => "Newton 1687",
            LawId::SquareCubeMassLimit => "Galileo 1638",
            LawId::DegeneracyPressure => "Fowler 1926",
            LawId::PairProduction => "Breit & Wheeler 1934",
            LawId::MainSequenceLuminosity => "Eddington 1924",
            LawId::MainSequenceTemperature => "Hertzsprung-Russell",
            LawId::MainSequenceLifetime => "Kippenhahn & Weigert 1990",
            LawId::SpectralClass => "Morgan & Keenan 1943",
            LawId::MassiveStarFraction => "Salpeter 1955",
            LawId::MolecularStability => "Pauling 1939",
            LawId::BasalMetabolicRate => "Kleiber 1932",
            LawId::MaxLifespan => "Speakman 2005",
            LawId::HomeRange => "Kelt & Van Vuren 2001",
            LawId::BrainMass => "Jerison 1973",
            LawId::MaxMassForGravity => "Haldane 1926",
            LawId::SpawnConditions => "Kasting 1993",
            LawId::LogisticAdvance | LawId::LogisticStep => "Verhulst 1838",
            LawId::DefaultGoals => "Tinbergen 1951",
            LawId::CarryingCapacity => "Lindeman 1942",
            LawId::PrimaryProductivity => "Lieth 1975",
            LawId::SocialBrainGroupSize | LawId::ConsensusViable => "Dunbar 1992",
            LawId::HierarchyLevels => "Johnson 1982",
            LawId::SocietyType => "Service 1962",
            LawId::ToolUseViable => "Ambrose 2001",
            LawId::AgriculturalSurplus => "Boserup 1965",
            LawId::FrostLine => "Hayashi 1981",
            LawId::HabitableZone => "Kasting 1993",
            LawId::EquilibriumTemperature => "Stefan-Boltzmann",
        }
    }

    /// `"<rule> (<citation>)"`, the form cited in responses
    pub fn precedent(self) -> String {
        format!("{} ({})", self.rule_name(), self.citation())
    }
}

impl std::fmt::Display for LawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rule_name())
    }
}
