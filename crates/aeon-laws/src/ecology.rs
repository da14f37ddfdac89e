//! Ecological laws: energy budgets and population growth

use crate::constants::SECONDS_PER_YEAR;

/// Energy passed up one trophic level
pub const TROPHIC_EFFICIENCY: f64 = 0.1;
/// Tropical rainforest productivity, kJ/km²/year
pub const MAX_PRIMARY_PRODUCTIVITY: f64 = 8e7;

/// Individuals per km² an energy supply supports.
///
/// `productivity` in kJ/km²/year, `metabolic_rate` in W, level 1 is a herbivore.
pub fn carrying_capacity(productivity: f64, trophic_level: u32, metabolic_rate: f64) -> f64 {
    let exponent = trophic_level.saturating_sub(1) as i32;
    let available = productivity * TROPHIC_EFFICIENCY.powi(exponent);
    let need_per_year = metabolic_rate * SECONDS_PER_YEAR / 1000.0;
    available / need_per_year
}

/// Net primary productivity, kJ/km²/year.
///
/// Temperature in K, rainfall in mm/year, sunlight in W/m².
pub fn primary_productivity(temperature: f64, rainfall_mm: f64, sunlight: f64) -> f64 {
    let temp_factor = (-((temperature - 298.0) / 15.0).powi(2)).exp();
    let rain_factor = (rainfall_mm / 1500.0).clamp(0.0, 1.0);
    let sun_factor = sunlight / 250.0;
    MAX_PRIMARY_PRODUCTIVITY * temp_factor * rain_factor * sun_factor
}

/// One explicit logistic step, N + rN(1 − N/K)dt
pub fn logistic_step(population: f64, capacity: f64, rate: f64, dt: f64) -> f64 {
    population + rate * population * (1.0 - population / capacity) * dt
}
