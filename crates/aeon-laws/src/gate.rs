//! Law Applicability Gate
//!
//! A rule's domain prefix decides the minimum complexity it needs. Physics
//! always applies apart from the quantum and relativistic sub-rules, which
//! need a density or temperature floor. Unknown prefixes are allowed so that
//! new domains work before the gate learns about them.

use aeon_core::{ComplexityLevel, Domain, UniverseState};

use crate::classify;

/// Density floor for `physics.quantum.*` (kg/m³)
pub const QUANTUM_DENSITY_FLOOR: f64 = 1e10;
/// Temperature floor for `physics.relativistic.*` (K)
pub const RELATIVISTIC_TEMPERATURE_FLOOR: f64 = 1e9;

/// Minimum complexity for a domain, `None` when the domain has no floor
pub fn minimum_complexity(domain: Domain) -> Option<ComplexityLevel> {
    match domain {
        Domain::Stellar => Some(ComplexityLevel::Atoms),
        Domain::Chemistry | Domain::Biochemistry => Some(ComplexityLevel::Molecules),
        Domain::Biology | Domain::Ecology => Some(ComplexityLevel::Life),
        Domain::Cognitive => Some(ComplexityLevel::Cognitive),
        Domain::Social | Domain::Economics => Some(ComplexityLevel::Social),
        Domain::Technology | Domain::Agriculture => Some(ComplexityLevel::Technological),
        Domain::Physics | Domain::Planetary | Domain::Entropy | Domain::Unknown => None,
    }
}

/// Can the named rule apply to this state?
pub fn can_apply(rule: &str, state: &UniverseState) -> bool {
    can_apply_at(rule, classify(state), state)
}

/// Gate with an already computed complexity level.
pub fn can_apply_at(rule: &str, complexity: ComplexityLevel, state: &UniverseState) -> bool {
    let domain = Domain::from_rule_name(rule);

    if domain == Domain::Physics {
        let mut segments = rule.split('.').skip(1);
        return match segments.next() {
            Some("quantum") => state.density >= QUANTUM_DENSITY_FLOOR,
            Some("relativistic") => state.temperature >= RELATIVISTIC_TEMPERATURE_FLOOR,
            _ => true,
        };
    }

    match minimum_complexity(domain) {
        Some(floor) => complexity >= floor,
        None => true,
    }
}
