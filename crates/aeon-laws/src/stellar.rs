//! Stellar laws: main sequence relations and the initial mass function
//!
//! Masses and luminosities are in solar units.

/// Salpeter IMF slope
pub const SALPETER_ALPHA: f64 = 2.35;
/// Lightest hydrogen-burning star
pub const IMF_MIN_MASS: f64 = 0.08;
/// Heaviest star considered
pub const IMF_MAX_MASS: f64 = 100.0;
/// Stars above this mass end as core-collapse supernovae
pub const SUPERNOVA_MIN_MASS: f64 = 8.0;
/// Solar surface temperature, K
pub const SOLAR_TEMPERATURE: f64 = 5778.0;

/// Main sequence luminosity (piecewise mass-luminosity relation)
pub fn luminosity(mass: f64) -> f64 {
    if mass < 0.43 {
        0.23 * mass.powf(2.3)
    } else if mass < 2.0 {
        mass.powi(4)
    } else if mass < 55.0 {
        1.4 * mass.powf(3.5)
    } else {
        32_000.0 * mass
    }
}

/// Effective surface temperature, K
pub fn surface_temperature(mass: f64) -> f64 {
    SOLAR_TEMPERATURE * mass.powf(0.505)
}

/// Main sequence lifetime, years
pub fn lifetime_years(mass: f64) -> f64 {
    1e10 * mass / luminosity(mass)
}

/// Morgan-Keenan spectral class
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectralType {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralType {
    pub fn from_temperature(temperature: f64) -> Self {
        if temperature > 30_000.0 {
            SpectralType::O
        } else if temperature > 10_000.0 {
            SpectralType::B
        } else if temperature > 7_500.0 {
            SpectralType::A
        } else if temperature > 6_000.0 {
            SpectralType::F
        } else if temperature > 5_200.0 {
            SpectralType::G
        } else if temperature > 3_700.0 {
            SpectralType::K
        } else {
            SpectralType::M
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpectralType::O => "O",
            SpectralType::B => "B",
            SpectralType::A => "A",
            SpectralType::F => "F",
            SpectralType::G => "G",
            SpectralType::K => "K",
            SpectralType::M => "M",
        }
    }
}

/// Fraction of a power-law IMF (slope `alpha`) lying in `[lo, hi]` out of `[min, max]`.
///
/// Closed form of ∫m^-α dm, so no per-star sampling is needed.
pub fn imf_fraction(alpha: f64, lo: f64, hi: f64, min: f64, max: f64) -> f64 {
    let antiderivative = |m: f64| {
        if (alpha - 1.0).abs() < 1e-12 {
            m.ln()
        } else {
            m.powf(1.0 - alpha) / (1.0 - alpha)
        }
    };
    let lo = lo.clamp(min, max);
    let hi = hi.clamp(min, max);
    let total = antiderivative(max) - antiderivative(min);
    if total == 0.0 {
        return 0.0;
    }
    (antiderivative(hi) - antiderivative(lo)) / total
}

/// Salpeter fraction of stars heavier than `threshold_mass`
pub fn massive_star_fraction(threshold_mass: f64) -> f64 {
    imf_fraction(
        SALPETER_ALPHA,
        threshold_mass,
        IMF_MAX_MASS,
        IMF_MIN_MASS,
        IMF_MAX_MASS,
    )
}
