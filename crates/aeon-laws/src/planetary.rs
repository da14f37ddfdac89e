//! Planetary laws. Luminosity in solar units, distances in AU.

/// Water ice condenses beyond this distance around a Sun-like star
pub const SOLAR_FROST_LINE: f64 = 2.7;

/// Frost line, AU
pub fn frost_line(luminosity: f64) -> f64 {
    luminosity.sqrt() * SOLAR_FROST_LINE
}

/// Inner and outer habitable zone edges, AU
pub fn habitable_zone(luminosity: f64) -> (f64, f64) {
    ((luminosity / 1.1).sqrt(), (luminosity / 0.53).sqrt())
}

pub fn in_habitable_zone(luminosity: f64, orbit: f64) -> bool {
    let (inner, outer) = habitable_zone(luminosity);
    orbit >= inner && orbit <= outer
}

/// Blackbody equilibrium temperature, K
pub fn equilibrium_temperature(luminosity: f64, orbit: f64, albedo: f64) -> f64 {
    278.6 * (1.0 - albedo).powf(0.25) * luminosity.powf(0.25) / orbit.sqrt()
}
