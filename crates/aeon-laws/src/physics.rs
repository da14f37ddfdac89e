//! Physics laws: gravitation, collapse, structure, degenerate matter

use std::f64::consts::PI;

use crate::constants::{C, EARTH_GRAVITY, G, HBAR, K_B, M_E, M_H, M_U};
use crate::complexity::MOLECULE_MAX_TEMPERATURE;

/// Heaviest animal supportable at 1 g, kg
pub const REFERENCE_MAX_MASS: f64 = 1e5;
/// Bone stress safety factor used by the square-cube limit
pub const STRUCTURAL_SAFETY_FACTOR: f64 = 2.0;
/// Electrons per nucleon in fully ionised helium/carbon matter
const MU_E: f64 = 2.0;

/// Jeans mass of a cloud, kg
pub fn jeans_mass(temperature: f64, density: f64) -> f64 {
    (PI * K_B * temperature / (G * M_H)).powf(1.5) / density.sqrt()
}

/// Will a cloud of this mass collapse under its own gravity?
pub fn is_jeans_unstable(cloud_mass: f64, temperature: f64, density: f64) -> bool {
    if density <= 0.0 {
        return false;
    }
    if temperature <= 0.0 {
        // No thermal pressure support
        return cloud_mass > 0.0;
    }
    cloud_mass > jeans_mass(temperature, density)
}

/// Escape velocity, m/s
pub fn escape_velocity(mass: f64, radius: f64) -> f64 {
    (2.0 * G * mass / radius).sqrt()
}

/// Surface gravity, m/s²
pub fn surface_gravity(mass: f64, radius: f64) -> f64 {
    G * mass / (radius * radius)
}

/// Heaviest viable body from bone stress scaling.
///
/// Stress grows with length times gravity, so the limiting mass scales as g⁻³.
pub fn square_cube_mass_limit(gravity: f64) -> f64 {
    REFERENCE_MAX_MASS / STRUCTURAL_SAFETY_FACTOR * (EARTH_GRAVITY / gravity).powi(3)
}

/// Non-relativistic electron degeneracy pressure, Pa
pub fn degeneracy_pressure(density: f64) -> f64 {
    let k = HBAR * HBAR / (5.0 * M_E) * (3.0 * PI * PI).powf(2.0 / 3.0);
    k * (density / (MU_E * M_U)).powf(5.0 / 3.0)
}

/// Boltzmann suppression of thermal electron-positron pair creation
pub fn pair_production_fraction(temperature: f64) -> f64 {
    let threshold = 2.0 * M_E * C * C;
    (-threshold / (K_B * temperature)).exp()
}

/// Molecular bonds survive at this temperature
pub fn molecules_stable(temperature: f64) -> bool {
    temperature <= MOLECULE_MAX_TEMPERATURE
}
