//! Tick driver: pre-fetch everything, then arbitrate
//!
//! Pre-fetches for all agents run concurrently, each bounded by the
//! configured timeout. Arbitration starts only once every pre-fetch has
//! answered, failed or timed out.

use std::time::Duration;

use aeon_broker::Broker;
use aeon_core::{SimTime, UniverseState};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// Agent whose decisions read only pre-fetched broker answers.
#[async_trait]
pub trait GatedAgent: Send + Sync {
    /// What the pre-fetch brings back
    type Answer: Send;
    /// What one synchronous decision produces
    type Step: Send;

    fn name(&self) -> &str;

    /// Ask the broker. `None` means no usable answer.
    async fn prefetch(&self, broker: &Broker, world: &UniverseState) -> Option<Self::Answer>;

    /// Cache an answer; `None` stores the safe default
    fn store(&mut self, answer: Option<Self::Answer>, tick: u64);

    /// Arbitrate and act, reading only cached answers
    fn think(&mut self, dt: SimTime) -> Self::Step;
}

/// Tick driver configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickDriverConfig {
    /// Longest a single pre-fetch may take
    pub prefetch_timeout_ms: u64,
}

impl Default for TickDriverConfig {
    fn default() -> Self {
        TickDriverConfig {
            prefetch_timeout_ms: 250,
        }
    }
}

impl TickDriverConfig {
    /// For brokers backed by slow out-of-process services
    pub fn patient() -> Self {
        TickDriverConfig {
            prefetch_timeout_ms: 2_000,
        }
    }

    /// For frame-locked visualisation
    pub fn realtime() -> Self {
        TickDriverConfig {
            prefetch_timeout_ms: 16,
        }
    }

    pub fn prefetch_timeout(&self) -> Duration {
        Duration::from_millis(self.prefetch_timeout_ms)
    }
}

/// What happened during one tick
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport<S> {
    pub tick: u64,
    /// One step per agent, in agent order
    pub steps: Vec<S>,
    /// Pre-fetches that came back without an answer
    pub failed: usize,
    pub timed_out: usize,
}

/// Runs agent ticks.
#[derive(Debug, Default)]
pub struct TickDriver {
    config: TickDriverConfig,
    tick: u64,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::with_config(TickDriverConfig::default())
    }

    pub fn with_config(config: TickDriverConfig) -> Self {
        TickDriver { config, tick: 0 }
    }

    pub fn config(&self) -> &TickDriverConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// One tick over every agent
    pub async fn tick<A: GatedAgent>(
        &mut self,
        agents: &mut [A],
        broker: &Broker,
        world: &UniverseState,
        dt: SimTime,
    ) -> TickReport<A::Step> {
        self.tick += 1;
        let tick = self.tick;
        let timeout = self.config.prefetch_timeout();

        let answers = join_all(
            agents
                .iter()
                .map(|agent| tokio::time::timeout(timeout, agent.prefetch(broker, world))),
        )
        .await;

        let mut failed = 0;
        let mut timed_out = 0;
        for (agent, answer) in agents.iter_mut().zip(answers) {
            let answer = match answer {
                Ok(Some(answer)) => Some(answer),
                Ok(None) => {
                    failed += 1;
                    None
                }
                Err(_) => {
                    timed_out += 1;
                    tracing::warn!(agent = agent.name(), tick, ?timeout, "pre-fetch timed out");
                    None
                }
            };
            agent.store(answer, tick);
        }

        let steps = agents.iter_mut().map(|agent| agent.think(dt)).collect();
        TickReport {
            tick,
            steps,
            failed,
            timed_out,
        }
    }
}
