//! Universe orchestrator

use std::sync::Arc;
use std::time::{Duration, Instant};

use aeon_agent::{CloudStep, DensityAgent, TickDriver};
use aeon_broker::Broker;
use aeon_core::{AeonError, AeonResult, ComplexityLevel, SimTime};
use aeon_synthesis::{
    RandomSource, Seed, SeededRng, SynthesisPipeline, SynthesisState, TerminalRegression,
};
use aeon_time::EpochTier;
use serde::Serialize;

use crate::{decision_sink, UniverseConfig};

/// Mixed into the seed for the cloud stream, so clouds do not replay synthesis draws
const CLOUD_STREAM: u64 = 0xC10D_5EED;
/// Typical dense-core density, kg/m³
const CLOUD_DENSITY: f64 = 1e-17;
/// Cloud masses span 10^30 .. 10^33 kg
const CLOUD_MASS_DECADES: (f64, f64) = (30.0, 33.0);
/// Cloud temperatures, K
const CLOUD_TEMPERATURE: (f64, f64) = (8.0, 30.0);

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub stars_formed: u64,
    pub events: usize,
    pub prefetch_failed: u64,
    pub prefetch_timed_out: u64,
    pub last_tick_duration: Duration,
}

/// What one tick did
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickSummary {
    pub tick: u64,
    pub dt: SimTime,
    pub now: SimTime,
    pub stars_formed: usize,
    /// Clock rule that picked `dt`
    pub tier: EpochTier,
    /// Adaptive step for the next tick, years
    pub time_scale: f64,
}

/// Serializable picture of a universe
#[derive(Clone, Debug, Serialize)]
pub struct UniverseSnapshot {
    pub seed: Seed,
    pub complexity: ComplexityLevel,
    pub clouds: usize,
    pub stats: RuntimeStats,
    pub state: SynthesisState,
}

/// A universe: synthesis followed by adaptive ticking.
pub struct Universe {
    config: UniverseConfig,
    broker: Arc<Broker>,
    pipeline: SynthesisPipeline,
    driver: TickDriver,
    agents: Vec<DensityAgent>,
    born: bool,
    stats: RuntimeStats,
}

impl Universe {
    /// Universe over the standard broker, logging decisions per the config
    pub fn new(config: UniverseConfig) -> Self {
        let broker = Arc::new(Broker::standard(decision_sink(&config.logging)));
        Self::with_broker(config, broker)
    }

    /// Universe over a caller-built broker
    pub fn with_broker(config: UniverseConfig, broker: Arc<Broker>) -> Self {
        let pipeline =
            SynthesisPipeline::with_config(config.seed, broker.clone(), config.pipeline.clone());
        let driver = TickDriver::with_config(config.agents.clone());
        Universe {
            config,
            broker,
            pipeline,
            driver,
            agents: Vec::new(),
            born: false,
            stats: RuntimeStats::default(),
        }
    }

    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    pub fn broker(&self) -> &Arc<Broker> {
        &self.broker
    }

    pub fn state(&self) -> &SynthesisState {
        self.pipeline.state()
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn agents(&self) -> &[DensityAgent] {
        &self.agents
    }

    pub fn add_agent(&mut self, agent: DensityAgent) {
        self.agents.push(agent);
    }

    /// Run synthesis up to the configured stage, then seed clouds.
    pub async fn genesis(&mut self) -> AeonResult<&SynthesisState> {
        if self.born {
            return Err(AeonError::InvalidState("genesis already ran".into()));
        }
        let reports = self.pipeline.run_until(self.config.stop_after).await?;
        self.born = true;
        tracing::info!(
            seed = self.config.seed.value(),
            stages = reports.len(),
            complexity = %self.pipeline.state().complexity,
            events = self.pipeline.state().events.len(),
            "genesis complete"
        );

        self.seed_clouds();
        self.stats.events = self.pipeline.state().events.len();
        Ok(self.pipeline.state())
    }

    /// Clouds need molecular gas; a universe without molecules gets none
    fn seed_clouds(&mut self) {
        if self.pipeline.state().molecules.is_empty() {
            return;
        }
        let mut rng = SeededRng::new(self.config.seed.value() ^ CLOUD_STREAM);
        for i in 0..self.config.clouds {
            let density = CLOUD_DENSITY * rng.log_normal(0.0, 1.0);
            let temperature = rng.uniform(CLOUD_TEMPERATURE.0, CLOUD_TEMPERATURE.1);
            let mass = 10f64.powf(rng.uniform(CLOUD_MASS_DECADES.0, CLOUD_MASS_DECADES.1));
            self.agents
                .push(DensityAgent::new(density, temperature, mass).named(format!("Cloud-{i}")));
        }
    }

    /// Advance by one adaptive step and let every cloud decide.
    pub async fn tick(&mut self) -> AeonResult<TickSummary> {
        if !self.born {
            return Err(AeonError::InvalidState("tick before genesis".into()));
        }
        let start = Instant::now();

        let complexity = self.pipeline.state().complexity;
        let tier = self.pipeline.clock().tier(complexity);
        let dt = self.pipeline.clock().step(complexity);
        let next = self.pipeline.state().t + dt;
        self.pipeline.advance_to(next);
        let world = self.pipeline.state().universe_state();

        let report = self
            .driver
            .tick(&mut self.agents, &self.broker, &world, dt)
            .await;

        let mut formed = 0;
        for step in &report.steps {
            if let CloudStep::StarFormed { .. } = step {
                self.pipeline.record_event("Star Formed");
                formed += 1;
            }
        }

        self.stats.ticks += 1;
        self.stats.stars_formed += formed as u64;
        self.stats.prefetch_failed += report.failed as u64;
        self.stats.prefetch_timed_out += report.timed_out as u64;
        self.stats.events = self.pipeline.state().events.len();
        self.stats.last_tick_duration = start.elapsed();

        tracing::debug!(
            tick = report.tick,
            tier = tier.as_str(),
            dt_years = dt.as_years(),
            stars_formed = formed,
            "tick"
        );

        Ok(TickSummary {
            tick: report.tick,
            dt,
            now: self.pipeline.state().t,
            stars_formed: formed,
            tier,
            time_scale: self.pipeline.state().time_scale,
        })
    }

    /// Run `ticks` ticks
    pub async fn run(&mut self, ticks: u64) -> AeonResult<&RuntimeStats> {
        for _ in 0..ticks {
            self.tick().await?;
        }
        Ok(&self.stats)
    }

    /// End the universe
    pub fn end(&mut self, kind: TerminalRegression) {
        self.pipeline.terminal_regression(kind);
        self.stats.events = self.pipeline.state().events.len();
    }

    pub fn snapshot(&self) -> UniverseSnapshot {
        UniverseSnapshot {
            seed: self.config.seed,
            complexity: self.pipeline.state().complexity,
            clouds: self.agents.len(),
            stats: self.stats.clone(),
            state: self.pipeline.state().clone(),
        }
    }
}
