//! Physical constants (SI)

/// Gravitational constant, m³/(kg·s²)
pub const G: f64 = 6.674_30e-11;
/// Boltzmann constant, J/K
pub const K_B: f64 = 1.380_649e-23;
/// Hydrogen atom mass, kg
pub const M_H: f64 = 1.67e-27;
/// Atomic mass unit, kg
pub const M_U: f64 = 1.660_539e-27;
/// Electron mass, kg
pub const M_E: f64 = 9.109_384e-31;
/// Speed of light, m/s
pub const C: f64 = 2.997_924_58e8;
/// Reduced Planck constant, J·s
pub const HBAR: f64 = 1.054_571_8e-34;

/// Solar mass, kg
pub const SOLAR_MASS: f64 = 1.989e30;
/// Earth mass, kg
pub const EARTH_MASS: f64 = 5.972e24;
/// Jupiter mass in Earth masses
pub const JUPITER_EARTH_MASSES: f64 = 317.8;
/// Standard gravity, m/s²
pub const EARTH_GRAVITY: f64 = 9.81;
/// Seconds in a 365-day year (energy budgets)
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;
