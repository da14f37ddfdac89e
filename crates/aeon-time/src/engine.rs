//! Adaptive epoch clock - chooses the next simulated step

use std::fmt;

use aeon_core::{ComplexityLevel, SimTime};
use serde::{Deserialize, Serialize};

use crate::CosmicClock;

/// Adaptive epoch clock configuration. All values in years.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpochClockConfig {
    /// Step once cognition exists
    pub cognitive_step: f64,
    /// Step once life exists
    pub life_step: f64,
    /// Step right after an event, before life
    pub event_step: f64,
    /// Step when nothing special is going on
    pub default_step: f64,
    /// Step for long quiet eras
    pub quiet_step: f64,
    /// Quiet time after which the clock fast-forwards
    pub quiet_threshold: f64,
    /// How long an event keeps the clock in observing mode
    pub event_window: f64,
}

impl Default for EpochClockConfig {
    fn default() -> Self {
        EpochClockConfig {
            cognitive_step: 10.0,
            life_step: 100.0,
            event_step: 1e3,
            default_step: 1e6,
            quiet_step: 1e9,
            quiet_threshold: 1e9,
            event_window: 1e6,
        }
    }
}

impl EpochClockConfig {
    /// Finer steps for step-by-step visualisation
    pub fn fine_grained() -> Self {
        EpochClockConfig {
            cognitive_step: 1.0,
            life_step: 10.0,
            event_step: 100.0,
            default_step: 1e5,
            quiet_step: 1e8,
            quiet_threshold: 1e8,
            event_window: 1e5,
        }
    }

    /// Coarse steps for batch runs
    pub fn fast_forward() -> Self {
        EpochClockConfig {
            cognitive_step: 100.0,
            life_step: 1e4,
            event_step: 1e5,
            default_step: 1e7,
            quiet_step: 1e9,
            quiet_threshold: 1e8,
            event_window: 1e7,
        }
    }
}

/// Which rule picked the step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochTier {
    /// Cognition or beyond
    Cognitive,
    /// Life or beyond
    Biological,
    /// Shortly after an event
    Observing,
    Default,
    /// Nothing happened for a long time
    Quiet,
}

impl EpochTier {
    pub fn as_str(self) -> &'static str {
        match self {
            EpochTier::Cognitive => "cognitive",
            EpochTier::Biological => "biological",
            EpochTier::Observing => "observing",
            EpochTier::Default => "default",
            EpochTier::Quiet => "quiet",
        }
    }
}

impl fmt::Display for EpochTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adaptive epoch clock.
///
/// Quiet stretches fast-forward; any recorded event slows the clock, which
/// speeds back up once nothing new happens.
#[derive(Clone, Debug)]
pub struct AdaptiveEpochClock {
    clock: CosmicClock,
    last_event: Option<SimTime>,
    config: EpochClockConfig,
}

impl AdaptiveEpochClock {
    /// Create a clock with default configuration
    pub fn new() -> Self {
        Self::with_config(EpochClockConfig::default())
    }

    /// Create a clock with custom configuration
    pub fn with_config(config: EpochClockConfig) -> Self {
        AdaptiveEpochClock {
            clock: CosmicClock::new(),
            last_event: None,
            config,
        }
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn config(&self) -> &EpochClockConfig {
        &self.config
    }

    /// Record an event at the current time, resetting the quiet timer
    pub fn record_event(&mut self) {
        self.last_event = Some(self.clock.now());
    }

    /// Record an event at `t` (never earlier than a previous event)
    pub fn record_event_at(&mut self, t: SimTime) {
        self.clock.jump_to(t);
        let t = match self.last_event {
            Some(prev) => prev.max(t),
            None => t,
        };
        self.last_event = Some(t);
    }

    pub fn last_event(&self) -> Option<SimTime> {
        self.last_event
    }

    /// Time since the last event, or since the Big Bang if none
    pub fn quiet_time(&self) -> SimTime {
        self.clock
            .now()
            .elapsed_since(self.last_event.unwrap_or(SimTime::ZERO))
    }

    /// Rule that applies at this complexity
    pub fn tier(&self, complexity: ComplexityLevel) -> EpochTier {
        if complexity >= ComplexityLevel::Cognitive {
            return EpochTier::Cognitive;
        }
        if complexity >= ComplexityLevel::Life {
            return EpochTier::Biological;
        }

        let quiet = self.quiet_time().as_years();
        if quiet > self.config.quiet_threshold {
            EpochTier::Quiet
        } else if self.last_event.is_some() && quiet <= self.config.event_window {
            EpochTier::Observing
        } else {
            EpochTier::Default
        }
    }

    /// Step multiplier in years
    pub fn step_years(&self, complexity: ComplexityLevel) -> f64 {
        match self.tier(complexity) {
            EpochTier::Cognitive => self.config.cognitive_step,
            EpochTier::Biological => self.config.life_step,
            EpochTier::Observing => self.config.event_step,
            EpochTier::Default => self.config.default_step,
            EpochTier::Quiet => self.config.quiet_step,
        }
    }

    pub fn step(&self, complexity: ComplexityLevel) -> SimTime {
        SimTime::from_years(self.step_years(complexity))
    }

    /// Advance by the adaptive step and return the new time
    pub fn advance(&mut self, complexity: ComplexityLevel) -> SimTime {
        let step = self.step(complexity);
        self.clock.advance(step)
    }

    /// Jump to a scheduled epoch time
    pub fn jump_to(&mut self, t: SimTime) -> SimTime {
        self.clock.jump_to(t)
    }
}

impl Default for AdaptiveEpochClock {
    fn default() -> Self {
        Self::new()
    }
}
