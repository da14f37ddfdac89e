//! Complexity Classifier
//!
//! Fixed-order rules, first match wins:
//! 1. Absolute time thresholds for the earliest eras
//! 2. Below the elemental floor, particles regardless of time
//! 3. Emergence flags, most sophisticated first
//! 4. Thermal bounds pick atoms or molecules

use aeon_core::{ComplexityLevel, UniverseState, PLANCK_TIME, QUARK_EPOCH_END, RECOMBINATION};

/// Total element abundance below which matter is still a particle soup
pub const ELEMENT_FLOOR: f64 = 0.01;
/// Above this temperature molecules dissociate (K)
pub const MOLECULE_MAX_TEMPERATURE: f64 = 10_000.0;
/// Below this temperature chemistry freezes out (K)
pub const MOLECULE_MIN_TEMPERATURE: f64 = 10.0;

/// Classify a universe state.
pub fn classify(state: &UniverseState) -> ComplexityLevel {
    let t = state.t.as_seconds();

    if t < PLANCK_TIME {
        return ComplexityLevel::Void;
    }
    if t < QUARK_EPOCH_END {
        return ComplexityLevel::Energy;
    }
    if t < RECOMBINATION {
        return ComplexityLevel::Particles;
    }

    if state.total_elements() < ELEMENT_FLOOR {
        return ComplexityLevel::Particles;
    }

    // Emergence dominates thermal heuristics once it exists
    let flags = &state.emergence;
    if flags.has_technology() {
        return ComplexityLevel::Civilization;
    }
    if flags.has_society() {
        return ComplexityLevel::Social;
    }
    if flags.has_cognition() {
        return ComplexityLevel::Cognitive;
    }
    if flags.has_life() {
        return ComplexityLevel::Life;
    }

    if state.temperature > MOLECULE_MAX_TEMPERATURE || state.temperature < MOLECULE_MIN_TEMPERATURE
    {
        ComplexityLevel::Atoms
    } else {
        ComplexityLevel::Molecules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{Emergence, SimTime};

    fn enriched(t: SimTime) -> UniverseState {
        UniverseState::at(t)
            .with_element("H", 0.75)
            .with_element("He", 0.24)
    }

    #[test]
    fn test_early_eras() {
        assert_eq!(classify(&UniverseState::at(SimTime(0.0))), ComplexityLevel::Void);
        assert_eq!(classify(&UniverseState::at(SimTime(1e-43))), ComplexityLevel::Energy);
        assert_eq!(classify(&UniverseState::at(SimTime(1e-7))), ComplexityLevel::Energy);
        assert_eq!(classify(&UniverseState::at(SimTime(180.0))), ComplexityLevel::Particles);
    }

    #[test]
    fn test_time_dominates_flags() {
        let s = enriched(SimTime(1.0)).with_emergence(Emergence::Technology);
        assert_eq!(classify(&s), ComplexityLevel::Particles);
    }

    #[test]
    fn test_element_floor() {
        let s = UniverseState::at(SimTime::from_gyr(1.0))
            .with_temperature(100.0)
            .with_element("H", 0.005);
        assert_eq!(classify(&s), ComplexityLevel::Particles);
    }

    #[test]
    fn test_flags_in_order() {
        let t = SimTime::from_gyr(10.0);
        let life = enriched(t).with_temperature(1e6).with_emergence(Emergence::Life);
        assert_eq!(classify(&life), ComplexityLevel::Life);

        let all = life
            .clone()
            .with_emergence(Emergence::Cognition)
            .with_emergence(Emergence::Society);
        assert_eq!(classify(&all), ComplexityLevel::Social);

        let tech = enriched(t).with_emergence(Emergence::Technology);
        assert_eq!(classify(&tech), ComplexityLevel::Civilization);
    }

    #[test]
    fn test_thermal_bounds() {
        let t = SimTime::from_gyr(1.0);
        assert_eq!(classify(&enriched(t).with_temperature(100.0)), ComplexityLevel::Molecules);
        assert_eq!(classify(&enriched(t).with_temperature(10.0)), ComplexityLevel::Molecules);
        assert_eq!(classify(&enriched(t).with_temperature(5.0)), ComplexityLevel::Atoms);
        assert_eq!(classify(&enriched(t).with_temperature(20_000.0)), ComplexityLevel::Atoms);
    }
}
