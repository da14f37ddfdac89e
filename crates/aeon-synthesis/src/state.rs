//! Synthesis state
//!
//! Everything a pipeline run has produced so far. Owned by one pipeline,
//! mutated stage by stage, handed out as a snapshot. Plain records and
//! ordered maps only, so it serializes deterministically.

use std::collections::BTreeMap;

use aeon_core::{
    AeonError, AeonResult, ComplexityLevel, Emergence, EmergenceFlags, SimTime, UniverseState,
};
use serde::{Deserialize, Serialize};

/// A star formed by planetary accretion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Solar masses
    pub mass: f64,
    /// Solar luminosities
    pub luminosity: f64,
    /// Kelvin
    pub temperature: f64,
    pub spectral_class: String,
    /// Mass fraction of everything heavier than helium
    pub metallicity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanetKind {
    Terrestrial,
    GasGiant,
}

/// Element fractions of one planetary layer
pub type Layer = BTreeMap<String, f64>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// kg
    pub mass: f64,
    /// AU
    pub orbit: f64,
    pub kind: PlanetKind,
    /// Layer name (core, mantle, crust, envelope) to composition
    pub composition: BTreeMap<String, Layer>,
    pub habitable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganismKind {
    Prokaryote,
    Multicellular,
    LargeMulticellular,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub kind: OrganismKind,
    /// kg
    pub mass: f64,
    /// W
    pub metabolism: f64,
    pub scientific_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupStructure {
    Simple,
    Complex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SocialGroup {
    pub species: String,
    pub size: u32,
    pub structure: GroupStructure,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub kind: String,
    pub materials: Vec<String>,
    pub era: String,
}

/// A recorded qualitative change
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub label: String,
    pub at: SimTime,
}

/// What exists at a moment of a synthesis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynthesisState {
    pub t: SimTime,
    /// Current adaptive step, years
    pub time_scale: f64,

    pub particles: BTreeMap<String, f64>,
    pub atoms: BTreeMap<String, f64>,
    pub molecules: BTreeMap<String, f64>,

    pub stars: Vec<Star>,
    pub planets: Vec<Planet>,
    /// When the local star system formed
    pub system_formed_at: Option<SimTime>,

    pub organisms: Vec<Organism>,
    /// Scientific names, in order of appearance
    pub species: Vec<String>,

    pub groups: Vec<SocialGroup>,
    pub tools: Vec<Technology>,

    pub complexity: ComplexityLevel,
    pub emergence: EmergenceFlags,
    /// Kelvin
    pub temperature: f64,
    /// kg/m³
    pub density: f64,

    pub events: Vec<EventRecord>,
    pub last_event_time: SimTime,
}

impl SynthesisState {
    /// The void before the Big Bang
    pub fn new() -> Self {
        SynthesisState {
            t: SimTime::ZERO,
            time_scale: 1.0,
            particles: BTreeMap::new(),
            atoms: BTreeMap::new(),
            molecules: BTreeMap::new(),
            stars: Vec::new(),
            planets: Vec::new(),
            system_formed_at: None,
            organisms: Vec::new(),
            species: Vec::new(),
            groups: Vec::new(),
            tools: Vec::new(),
            complexity: ComplexityLevel::Void,
            emergence: EmergenceFlags::new(),
            temperature: 0.0,
            density: 0.0,
            events: Vec::new(),
            last_event_time: SimTime::ZERO,
        }
    }

    /// Append an event stamped with the current time
    pub fn record_event(&mut self, label: impl Into<String>) {
        self.events.push(EventRecord {
            label: label.into(),
            at: self.t,
        });
        self.last_event_time = self.t;
    }

    /// Raise the complexity level. A lower level is a regression error.
    pub fn raise_complexity(&mut self, level: ComplexityLevel) -> AeonResult<()> {
        if level < self.complexity {
            return Err(AeonError::ComplexityRegression {
                from: self.complexity,
                to: level,
            });
        }
        self.complexity = level;
        Ok(())
    }

    pub fn raise(&mut self, emergence: Emergence) {
        self.emergence.raise(emergence);
    }

    pub fn atom(&self, symbol: &str) -> f64 {
        self.atoms.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn has_atom(&self, symbol: &str) -> bool {
        self.atom(symbol) > 0.0
    }

    pub fn molecule(&self, formula: &str) -> f64 {
        self.molecules.get(formula).copied().unwrap_or(0.0)
    }

    /// Heaviest organism, kg
    pub fn max_organism_mass(&self) -> Option<f64> {
        self.organisms.iter().map(|o| o.mass).reduce(f64::max)
    }

    /// Mass fraction of everything heavier than helium
    pub fn metallicity(&self) -> f64 {
        self.atoms
            .iter()
            .filter(|(symbol, _)| *symbol != "H" && *symbol != "He")
            .map(|(_, fraction)| fraction)
            .sum()
    }

    /// Brightness summary on a 0-10 scale: 0 primordial, 5 life, 9 technology
    pub fn activity_level(&self) -> f64 {
        let base: f64 = match self.complexity {
            ComplexityLevel::Void | ComplexityLevel::Energy => 0.0,
            ComplexityLevel::Particles => 0.5,
            ComplexityLevel::Atoms => 1.0,
            ComplexityLevel::Molecules => 2.0,
            ComplexityLevel::Life => 5.0,
            ComplexityLevel::Multicellular => 6.0,
            ComplexityLevel::Cognitive => 7.0,
            ComplexityLevel::Social => 8.0,
            ComplexityLevel::Technological => 9.0,
            ComplexityLevel::Civilization => 10.0,
        };

        let mut activity = base;
        // Iron means supernovae have happened
        if self.atoms.contains_key("Fe") {
            activity += 1.0;
        }
        if self.species.len() > 10 {
            activity += 0.5;
        }
        activity.min(10.0)
    }

    /// Snapshot for law questions
    pub fn universe_state(&self) -> UniverseState {
        UniverseState {
            t: self.t,
            local_time: self.t.elapsed_since(self.system_formed_at.unwrap_or(self.t)),
            temperature: self.temperature,
            pressure: 0.0,
            density: self.density,
            complexity: self.complexity,
            elements: self.atoms.clone(),
            emergence: self.emergence,
        }
    }
}

impl Default for SynthesisState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_event_stamps_time() {
        let mut state = SynthesisState::new();
        state.t = SimTime::from_gyr(1.0);
        state.record_event("Molecular Clouds");
        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].at, SimTime::from_gyr(1.0));
        assert_eq!(state.last_event_time, SimTime::from_gyr(1.0));
    }

    #[test]
    fn test_complexity_never_lowered() {
        let mut state = SynthesisState::new();
        state.raise_complexity(ComplexityLevel::Atoms).unwrap();
        state.raise_complexity(ComplexityLevel::Atoms).unwrap();
        let err = state.raise_complexity(ComplexityLevel::Particles);
        assert!(matches!(
            err,
            Err(AeonError::ComplexityRegression { .. })
        ));
        assert_eq!(state.complexity, ComplexityLevel::Atoms);
    }

    #[test]
    fn test_activity_level() {
        let mut state = SynthesisState::new();
        assert_eq!(state.activity_level(), 0.0);
        state.complexity = ComplexityLevel::Life;
        state.atoms.insert("Fe".into(), 1e-6);
        assert_eq!(state.activity_level(), 6.0);
        state.complexity = ComplexityLevel::Civilization;
        state.species = (0..11).map(|i| i.to_string()).collect();
        assert_eq!(state.activity_level(), 10.0);
    }

    #[test]
    fn test_snapshot_carries_flags() {
        let mut state = SynthesisState::new();
        state.t = SimTime::from_gyr(10.0);
        state.atoms.insert("H".into(), 0.75);
        state.raise(Emergence::Life);
        let snapshot = state.universe_state();
        assert!(snapshot.emergence.has_life());
        assert_eq!(snapshot.element("H"), 0.75);
        assert!(snapshot.is_physical());
    }

    #[test]
    fn test_state_serializes() {
        let mut state = SynthesisState::new();
        state.atoms.insert("H".into(), 0.75);
        state.record_event("Nucleosynthesis");
        let json = serde_json::to_string(&state).unwrap();
        let back: SynthesisState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
