//! Complexity and precedence class definitions
//!
//! AEON orders the universe along two axes:
//! - Complexity: how far emergence has progressed (void through civilization)
//! - Precedence: which family of laws wins when two domains disagree

use serde::{Deserialize, Serialize};

/// Complexity level of a universe state.
///
/// Levels are totally ordered; a later level implies every earlier one
/// has already been reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ComplexityLevel {
    /// Before the Planck time
    #[default]
    Void = 0,
    /// Radiation dominated plasma
    Energy = 1,
    /// Quarks, leptons, photons
    Particles = 2,
    /// Bound nuclei and neutral atoms
    Atoms = 3,
    /// Chemistry in cold clouds
    Molecules = 4,
    /// Self-replicating chemistry
    Life = 5,
    Multicellular = 6,
    /// Organisms with nervous systems
    Cognitive = 7,
    /// Cooperating groups
    Social = 8,
    Technological = 9,
    Civilization = 10,
}

impl ComplexityLevel {
    /// All levels in ascending order
    pub const ALL: [ComplexityLevel; 11] = [
        ComplexityLevel::Void,
        ComplexityLevel::Energy,
        ComplexityLevel::Particles,
        ComplexityLevel::Atoms,
        ComplexityLevel::Molecules,
        ComplexityLevel::Life,
        ComplexityLevel::Multicellular,
        ComplexityLevel::Cognitive,
        ComplexityLevel::Social,
        ComplexityLevel::Technological,
        ComplexityLevel::Civilization,
    ];

    /// Parse from ordinal
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lower-case name used in logs and serialized snapshots
    pub fn name(self) -> &'static str {
        match self {
            ComplexityLevel::Void => "void",
            ComplexityLevel::Energy => "energy",
            ComplexityLevel::Particles => "particles",
            ComplexityLevel::Atoms => "atoms",
            ComplexityLevel::Molecules => "molecules",
            ComplexityLevel::Life => "life",
            ComplexityLevel::Multicellular => "multicellular",
            ComplexityLevel::Cognitive => "cognitive",
            ComplexityLevel::Social => "social",
            ComplexityLevel::Technological => "technological",
            ComplexityLevel::Civilization => "civilization",
        }
    }

    /// Next level up, `None` at civilization
    pub fn next(self) -> Option<Self> {
        Self::from_u8(self.as_u8() + 1)
    }

    /// Properties that first appear at this level.
    pub fn emergent_properties(self) -> &'static [&'static str] {
        match self {
            ComplexityLevel::Void | ComplexityLevel::Energy | ComplexityLevel::Particles => &[],
            ComplexityLevel::Atoms => &["atomic-structure", "electron-shells", "chemical-bonding"],
            ComplexityLevel::Molecules => &["molecular-geometry", "polarity", "hydrogen-bonding"],
            ComplexityLevel::Life => &["metabolism", "reproduction", "evolution"],
            ComplexityLevel::Multicellular => &["cell-differentiation", "tissues", "organs"],
            ComplexityLevel::Cognitive => &["learning", "memory", "prediction", "decision-making"],
            ComplexityLevel::Social => &["cooperation", "communication", "norms", "hierarchy"],
            ComplexityLevel::Technological => &["tool-use", "cumulative-culture", "innovation"],
            ComplexityLevel::Civilization => &["writing", "science", "institutions", "markets"],
        }
    }

    /// Every emergent property present at or below this level
    pub fn cumulative_properties(self) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .take_while(|l| **l <= self)
            .flat_map(|l| l.emergent_properties().iter().copied())
            .collect()
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Precedence class of a law domain.
///
/// Lower rank wins a cross-domain conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PrecedenceClass {
    /// Physics, stellar astrophysics, chemistry
    Fundamental = 0,
    /// Biology, cognition, and anything unclassified
    Emergent = 1,
    /// Ecology
    Statistical = 2,
    /// Social systems
    Social = 3,
}

impl PrecedenceClass {
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PrecedenceClass::Fundamental => "fundamental",
            PrecedenceClass::Emergent => "emergent",
            PrecedenceClass::Statistical => "statistical",
            PrecedenceClass::Social => "social",
        }
    }
}
