//! Simulation time
//!
//! Cosmic time spans sixty orders of magnitude (Planck time to tens of
//! gigayears), so it is carried as `f64` seconds since the Big Bang.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Seconds in a Julian year
pub const YEAR: f64 = 365.25 * 86_400.0;
/// Seconds in a megayear
pub const MYR: f64 = 1e6 * YEAR;
/// Seconds in a gigayear
pub const GYR: f64 = 1e9 * YEAR;

/// Planck time in seconds
pub const PLANCK_TIME: f64 = 1e-43;
/// End of the quark epoch in seconds
pub const QUARK_EPOCH_END: f64 = 1e-6;
/// Recombination: the universe becomes transparent
pub const RECOMBINATION: f64 = 380_000.0 * YEAR;

/// Simulation time in seconds since the Big Bang.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn from_seconds(s: f64) -> Self {
        SimTime(s)
    }

    #[inline]
    pub fn from_years(y: f64) -> Self {
        SimTime(y * YEAR)
    }

    #[inline]
    pub fn from_myr(m: f64) -> Self {
        SimTime(m * MYR)
    }

    #[inline]
    pub fn from_gyr(g: f64) -> Self {
        SimTime(g * GYR)
    }

    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn as_years(self) -> f64 {
        self.0 / YEAR
    }

    #[inline]
    pub fn as_myr(self) -> f64 {
        self.0 / MYR
    }

    #[inline]
    pub fn as_gyr(self) -> f64 {
        self.0 / GYR
    }

    /// Time elapsed since `earlier`, clamped at zero
    pub fn elapsed_since(self, earlier: SimTime) -> SimTime {
        SimTime((self.0 - earlier.0).max(0.0))
    }

    /// Later of two times
    pub fn max(self, other: SimTime) -> SimTime {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 - rhs.0)
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.0;
        if s >= GYR {
            write!(f, "{:.2} Gyr", s / GYR)
        } else if s >= MYR {
            write!(f, "{:.2} Myr", s / MYR)
        } else if s >= YEAR {
            write!(f, "{:.0} yr", s / YEAR)
        } else {
            write!(f, "{:.3e} s", s)
        }
    }
}
