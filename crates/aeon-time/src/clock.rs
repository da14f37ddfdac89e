//! Cosmic clock

use aeon_core::SimTime;

/// Cosmic clock - monotonic simulated time.
/// INVARIANT: time never moves backwards
#[derive(Clone, Debug, Default)]
pub struct CosmicClock {
    value: SimTime,
    ticks: u64,
}

impl CosmicClock {
    /// Clock at the Big Bang
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock starting at `t`
    pub fn starting_at(t: SimTime) -> Self {
        CosmicClock { value: t, ticks: 0 }
    }

    /// Advance by `step`. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, step: SimTime) -> SimTime {
        let s = step.as_seconds();
        if s.is_finite() && s > 0.0 {
            self.value = self.value + step;
        }
        self.ticks += 1;
        self.value
    }

    /// Jump forward to `t`; earlier targets are ignored
    pub fn jump_to(&mut self, t: SimTime) -> SimTime {
        if t.as_seconds().is_finite() && t > self.value {
            self.value = t;
        }
        self.value
    }

    pub fn now(&self) -> SimTime {
        self.value
    }

    /// Number of advances so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_monotonic() {
        let mut clock = CosmicClock::new();
        clock.advance(SimTime::from_years(10.0));
        let t1 = clock.now();
        clock.advance(SimTime(-5.0));
        clock.advance(SimTime(f64::NAN));
        assert_eq!(clock.now(), t1);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn test_jump_forward_only() {
        let mut clock = CosmicClock::starting_at(SimTime::from_gyr(1.0));
        clock.jump_to(SimTime::from_myr(1.0));
        assert_eq!(clock.now(), SimTime::from_gyr(1.0));
        clock.jump_to(SimTime::from_gyr(2.0));
        assert_eq!(clock.now(), SimTime::from_gyr(2.0));
    }
}
