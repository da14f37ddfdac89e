//! Universe state snapshots
//!
//! A [`UniverseState`] is what every law question is asked against: the
//! physical conditions at a point in cosmic time plus the emergence flags
//! raised so far.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ComplexityLevel, SimTime};

/// One emergence milestone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emergence {
    Life,
    Cognition,
    Society,
    Technology,
}

/// Emergence flags.
///
/// Flags only ever go from false to true: there is no lowering mutator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmergenceFlags {
    life: bool,
    cognition: bool,
    society: bool,
    technology: bool,
}

impl EmergenceFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a flag
    pub fn raise(&mut self, e: Emergence) {
        match e {
            Emergence::Life => self.life = true,
            Emergence::Cognition => self.cognition = true,
            Emergence::Society => self.society = true,
            Emergence::Technology => self.technology = true,
        }
    }

    /// Builder form of [`raise`](Self::raise)
    pub fn with(mut self, e: Emergence) -> Self {
        self.raise(e);
        self
    }

    pub fn has(&self, e: Emergence) -> bool {
        match e {
            Emergence::Life => self.life,
            Emergence::Cognition => self.cognition,
            Emergence::Society => self.society,
            Emergence::Technology => self.technology,
        }
    }

    pub fn has_life(&self) -> bool {
        self.life
    }

    pub fn has_cognition(&self) -> bool {
        self.cognition
    }

    pub fn has_society(&self) -> bool {
        self.society
    }

    pub fn has_technology(&self) -> bool {
        self.technology
    }

    /// Union of two flag sets
    pub fn merge(&mut self, other: EmergenceFlags) {
        self.life |= other.life;
        self.cognition |= other.cognition;
        self.society |= other.society;
        self.technology |= other.technology;
    }

    /// True if every flag set in `self` is also set in `later`
    pub fn is_subset_of(&self, later: &EmergenceFlags) -> bool {
        (!self.life || later.life)
            && (!self.cognition || later.cognition)
            && (!self.society || later.society)
            && (!self.technology || later.technology)
    }
}

/// Snapshot of physical conditions at a point in cosmic time.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct UniverseState {
    /// Cosmic time
    pub t: SimTime,
    /// Time since the local system formed
    pub local_time: SimTime,
    /// Kelvin
    pub temperature: f64,
    /// Pascal
    pub pressure: f64,
    /// kg/m³
    pub density: f64,
    /// Level last assigned by the pipeline. The classifier recomputes its own.
    pub complexity: ComplexityLevel,
    /// Element symbol to abundance fraction
    pub elements: BTreeMap<String, f64>,
    pub emergence: EmergenceFlags,
}

impl UniverseState {
    /// Empty state at cosmic time `t`
    pub fn at(t: SimTime) -> Self {
        UniverseState {
            t,
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, kelvin: f64) -> Self {
        self.temperature = kelvin;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_element(mut self, symbol: &str, abundance: f64) -> Self {
        self.elements.insert(symbol.to_string(), abundance);
        self
    }

    pub fn with_emergence(mut self, e: Emergence) -> Self {
        self.emergence.raise(e);
        self
    }

    pub fn with_complexity(mut self, level: ComplexityLevel) -> Self {
        self.complexity = level;
        self
    }

    /// Sum of all element abundances
    pub fn total_elements(&self) -> f64 {
        self.elements.values().sum()
    }

    pub fn element(&self, symbol: &str) -> f64 {
        self.elements.get(symbol).copied().unwrap_or(0.0)
    }

    /// Physical sanity: non-negative, finite conditions
    pub fn is_physical(&self) -> bool {
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;
        finite_non_negative(self.t.as_seconds())
            && finite_non_negative(self.temperature)
            && finite_non_negative(self.pressure)
            && finite_non_negative(self.density)
            && self.elements.values().all(|v| finite_non_negative(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_only_raise() {
        let mut flags = EmergenceFlags::new();
        assert!(!flags.has_life());
        flags.raise(Emergence::Life);
        flags.raise(Emergence::Life);
        assert!(flags.has_life());
        assert!(!flags.has_cognition());
    }

    #[test]
    fn test_flags_merge_is_union() {
        let mut a = EmergenceFlags::new().with(Emergence::Life);
        let b = EmergenceFlags::new().with(Emergence::Society);
        a.merge(b);
        assert!(a.has(Emergence::Life));
        assert!(a.has(Emergence::Society));
        assert!(!a.has(Emergence::Technology));
        assert!(b.is_subset_of(&a));
        assert!(!a.is_subset_of(&b));
    }

    #[test]
    fn test_state_builder() {
        let s = UniverseState::at(SimTime::from_gyr(1.0))
            .with_temperature(100.0)
            .with_element("H", 0.75)
            .with_element("He", 0.24);
        assert!((s.total_elements() - 0.99).abs() < 1e-12);
        assert_eq!(s.element("Fe"), 0.0);
        assert!(s.is_physical());
        assert!(!s.clone().with_temperature(f64::NAN).is_physical());
    }

    #[test]
    fn test_state_serializes() {
        let s = UniverseState::at(SimTime(1.0)).with_emergence(Emergence::Life);
        let json = serde_json::to_string(&s).unwrap();
        let back: UniverseState = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
