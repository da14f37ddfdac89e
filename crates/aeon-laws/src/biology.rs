//! Biological scaling laws
//!
//! Masses in kg. Most of these are allometric power laws fitted across
//! mammals; they are used for every lineage regardless of planet.

use aeon_core::{AgentKind, ComplexityLevel, Diet};

use crate::constants::EARTH_GRAVITY;
use crate::physics::REFERENCE_MAX_MASS;

/// Habitable surface temperature window, K (exclusive)
pub const SPAWN_TEMPERATURE_RANGE: (f64, f64) = (250.0, 350.0);

/// Basal metabolic rate, W
pub fn basal_metabolic_rate(mass: f64) -> f64 {
    70.0 * mass.powf(0.75)
}

/// Maximum lifespan, years
pub fn max_lifespan(mass: f64) -> f64 {
    10.5 * mass.powf(0.25)
}

/// Home range, km²
pub fn home_range(mass: f64, diet: Diet) -> f64 {
    match diet {
        Diet::Herbivore => 0.011 * mass.powf(1.02),
        Diet::Carnivore => 0.019 * mass.powf(1.36),
    }
}

/// Brain mass, kg
pub fn brain_mass(body_mass: f64) -> f64 {
    0.01 * body_mass.powf(0.75)
}

/// Heaviest animal the empirical scaling allows at this gravity, kg
pub fn max_mass_for_gravity(gravity: f64) -> f64 {
    REFERENCE_MAX_MASS * (EARTH_GRAVITY / gravity).powi(3)
}

/// Can creatures spawn here?
pub fn spawn_conditions(complexity: ComplexityLevel, atmosphere: f64, temperature: f64) -> bool {
    let (low, high) = SPAWN_TEMPERATURE_RANGE;
    complexity >= ComplexityLevel::Life && atmosphere > 0.0 && temperature > low && temperature < high
}

/// Closed-form logistic population after `dt`.
///
/// N(t) = K / (1 + ((K − N) / N) e^(−r dt)). Extinct populations stay extinct.
pub fn logistic_analytic(population: f64, capacity: f64, rate: f64, dt: f64) -> f64 {
    if population <= 0.0 {
        return 0.0;
    }
    capacity / (1.0 + ((capacity - population) / population) * (-rate * dt).exp())
}

/// Goals an agent starts with
pub fn default_goals(agent: AgentKind) -> &'static [&'static str] {
    match agent {
        AgentKind::Creature => &["FindFood", "AvoidPredator", "Rest", "Reproduce"],
        AgentKind::GasCloud => &["Collapse", "Drift"],
        AgentKind::Star => &["Fuse", "Shed"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kleiber() {
        assert!((basal_metabolic_rate(1.0) - 70.0).abs() < 1e-12);
        // Three-quarter power: 16x the mass, 8x the metabolism
        let ratio = basal_metabolic_rate(16.0) / basal_metabolic_rate(1.0);
        assert!((ratio - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_home_range_carnivores_larger() {
        assert!(home_range(100.0, Diet::Carnivore) > home_range(100.0, Diet::Herbivore));
    }

    #[test]
    fn test_gravity_limit() {
        assert!((max_mass_for_gravity(EARTH_GRAVITY) - 1e5).abs() < 1e-6);
        assert!(max_mass_for_gravity(EARTH_GRAVITY / 2.0) > 1e5);
    }

    #[test]
    fn test_spawn_conditions() {
        assert!(spawn_conditions(ComplexityLevel::Life, 1.0, 288.0));
        assert!(!spawn_conditions(ComplexityLevel::Molecules, 1.0, 288.0));
        assert!(!spawn_conditions(ComplexityLevel::Life, 0.0, 288.0));
        assert!(!spawn_conditions(ComplexityLevel::Life, 1.0, 350.0));
    }

    #[test]
    fn test_logistic_analytic() {
        let n = logistic_analytic(100.0, 10_000.0, 0.1, 0.0);
        assert!((n - 100.0).abs() < 1e-9);
        let late = logistic_analytic(100.0, 10_000.0, 0.1, 1_000.0);
        assert!((late - 10_000.0).abs() < 1e-3);
        assert_eq!(logistic_analytic(0.0, 0.0, 0.1, 10.0), 0.0);
    }

    #[test]
    fn test_default_goals() {
        assert_eq!(default_goals(AgentKind::Creature).len(), 4);
        assert!(default_goals(AgentKind::GasCloud).contains(&"Collapse"));
    }
}
