//! Molecular cloud region that decides whether to collapse into a star
//!
//! The cloud asks the broker for the Jeans criterion once per tick and keeps
//! only the answer. Its goal evaluators read that cached flag.

use std::fmt;

use aeon_broker::Broker;
use aeon_core::{LawAction, LawRequest, SimTime, UniverseState, MYR};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Arbiter, DecisionCache, GatedAgent, GoalEvaluator};

/// Time a collapsing cloud needs to ignite, s
pub const COLLAPSE_DURATION: f64 = MYR;
/// Core temperature at which fusion ignites, K
pub const IGNITION_TEMPERATURE: f64 = 1e7;
/// Desirability of drifting, the fallback goal
pub const DRIFT_DESIRABILITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DensityGoal {
    Collapse,
    Drift,
}

/// Result of one cloud decision
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum CloudStep {
    Drifting,
    Collapsing { progress: f64 },
    StarFormed { mass: f64 },
    /// Already a star; nothing left to decide
    Spent,
}

/// Wants to collapse exactly when the cached Jeans check said so
pub struct ShouldCollapse;

impl GoalEvaluator<DensityAgent, DensityGoal> for ShouldCollapse {
    fn goal(&self) -> DensityGoal {
        DensityGoal::Collapse
    }

    fn desirability(&self, agent: &DensityAgent) -> f64 {
        if *agent.jeans.get() {
            1.0
        } else {
            0.0
        }
    }
}

pub struct ShouldDrift;

impl GoalEvaluator<DensityAgent, DensityGoal> for ShouldDrift {
    fn goal(&self) -> DensityGoal {
        DensityGoal::Drift
    }

    fn desirability(&self, _agent: &DensityAgent) -> f64 {
        DRIFT_DESIRABILITY
    }
}

/// Region of a molecular cloud
pub struct DensityAgent {
    name: String,
    /// kg/m³
    pub density: f64,
    /// K
    pub temperature: f64,
    /// kg
    pub mass: f64,
    age: SimTime,
    collapse_elapsed: f64,
    goal: Option<DensityGoal>,
    collapsed: bool,
    jeans: DecisionCache<bool>,
    brain: Arbiter<DensityAgent, DensityGoal>,
}

impl DensityAgent {
    pub fn new(density: f64, temperature: f64, mass: f64) -> Self {
        DensityAgent {
            name: format!("Cloud-{density:.1e}"),
            density,
            temperature,
            mass,
            age: SimTime::ZERO,
            collapse_elapsed: 0.0,
            goal: None,
            collapsed: false,
            jeans: DecisionCache::new(false),
            brain: Arbiter::new().with(ShouldCollapse).with(ShouldDrift),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn age(&self) -> SimTime {
        self.age
    }

    pub fn goal(&self) -> Option<DensityGoal> {
        self.goal
    }

    /// Has this cloud become a star?
    pub fn has_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Cached Jeans answer
    pub fn jeans_cache(&self) -> &DecisionCache<bool> {
        &self.jeans
    }

    fn request(&self, world: &UniverseState) -> LawRequest {
        let action = LawAction::JeansInstability {
            cloud_mass: self.mass,
            temperature: self.temperature,
            density: self.density,
        };
        let local = world
            .clone()
            .with_temperature(self.temperature)
            .with_density(self.density);
        LawRequest::new(action, local)
    }

    fn contract(&mut self, dt: SimTime) -> CloudStep {
        let dt = dt.as_seconds();
        self.collapse_elapsed += dt;
        self.density *= 1.0 + dt / COLLAPSE_DURATION;
        // Heats an order of magnitude slower than it contracts
        self.temperature *= 1.0 + dt / (COLLAPSE_DURATION * 10.0);

        if self.collapse_elapsed >= COLLAPSE_DURATION || self.temperature > IGNITION_TEMPERATURE {
            self.collapsed = true;
            tracing::info!(cloud = %self.name, mass = self.mass, "fusion ignites");
            CloudStep::StarFormed { mass: self.mass }
        } else {
            CloudStep::Collapsing {
                progress: self.collapse_elapsed / COLLAPSE_DURATION,
            }
        }
    }
}

impl fmt::Debug for DensityAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DensityAgent")
            .field("name", &self.name)
            .field("density", &self.density)
            .field("temperature", &self.temperature)
            .field("mass", &self.mass)
            .field("goal", &self.goal)
            .field("collapsed", &self.collapsed)
            .finish()
    }
}

#[async_trait]
impl GatedAgent for DensityAgent {
    type Answer = bool;
    type Step = CloudStep;

    fn name(&self) -> &str {
        &self.name
    }

    async fn prefetch(&self, broker: &Broker, world: &UniverseState) -> Option<bool> {
        if self.collapsed {
            return Some(false);
        }
        broker.ask(&self.request(world)).await.value.as_flag()
    }

    fn store(&mut self, answer: Option<bool>, tick: u64) {
        self.jeans.update(answer, tick);
    }

    fn think(&mut self, dt: SimTime) -> CloudStep {
        if self.collapsed {
            return CloudStep::Spent;
        }
        self.age = self.age + dt;

        let goal = self
            .brain
            .arbitrate(self)
            .map(|(goal, _)| goal)
            .unwrap_or(DensityGoal::Drift);
        if self.goal != Some(goal) {
            tracing::debug!(cloud = %self.name, ?goal, "goal changed");
            self.collapse_elapsed = 0.0;
            self.goal = Some(goal);
        }

        match goal {
            DensityGoal::Drift => CloudStep::Drifting,
            DensityGoal::Collapse => self.contract(dt),
        }
    }
}
