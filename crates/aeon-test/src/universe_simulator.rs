//! Universe Simulator - Multi-seed determinism and monotonicity runs
//!
//! Every seed is synthesized twice on independent brokers. The two runs
//! must agree stage by stage, and complexity must never fall between stages.

use std::sync::Arc;

use aeon_broker::{Broker, NullSink};
use aeon_core::invariants::{
    check_complexity_transition, check_same_universe, InvariantViolation,
};
use aeon_core::{AeonResult, ComplexityLevel};
use aeon_runtime::{Universe, UniverseConfig};
use aeon_synthesis::{StageReport, SynthesisPipeline, SynthesisState};

/// Simulator configuration
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Seeds to run
    pub runs: usize,
    /// First seed; run `i` uses `base_seed + i`
    pub base_seed: u64,
    /// Runtime ticks after synthesis (0 = synthesis only)
    pub ticks: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            runs: 8,
            base_seed: 42,
            ticks: 0,
        }
    }
}

impl SimulatorConfig {
    /// Quick check
    pub fn light() -> Self {
        SimulatorConfig {
            runs: 3,
            base_seed: 42,
            ticks: 0,
        }
    }

    /// Many seeds, with ticking
    pub fn heavy() -> Self {
        SimulatorConfig {
            runs: 32,
            base_seed: 42,
            ticks: 20,
        }
    }
}

/// One seed's run
#[derive(Clone, Debug)]
pub struct RunTrace {
    pub seed: u64,
    pub reports: Vec<StageReport>,
    pub state: SynthesisState,
    /// Both runs agreed
    pub deterministic: bool,
    /// Complexity never fell between stages
    pub monotonic: bool,
    /// Stars formed by clouds while ticking
    pub stars_formed: u64,
    /// Every broken invariant, in the order found
    pub violations: Vec<InvariantViolation>,
}

impl RunTrace {
    pub fn final_complexity(&self) -> ComplexityLevel {
        self.state.complexity
    }

    pub fn has_life(&self) -> bool {
        self.state.emergence.has_life()
    }
}

/// Aggregate over all seeds
#[derive(Clone, Debug, Default)]
pub struct SimulationReport {
    pub traces: Vec<RunTrace>,
}

impl SimulationReport {
    pub fn all_deterministic(&self) -> bool {
        self.traces.iter().all(|t| t.deterministic)
    }

    pub fn all_monotonic(&self) -> bool {
        self.traces.iter().all(|t| t.monotonic)
    }

    /// Seeds whose universe never produced life
    pub fn sterile(&self) -> usize {
        self.traces.iter().filter(|t| !t.has_life()).count()
    }

    pub fn reached(&self, level: ComplexityLevel) -> usize {
        self.traces
            .iter()
            .filter(|t| t.final_complexity() >= level)
            .count()
    }

    pub fn is_valid(&self) -> bool {
        !self.traces.is_empty() && self.traces.iter().all(|t| t.violations.is_empty())
    }
}

/// Multi-seed universe simulator
pub struct UniverseSimulator {
    config: SimulatorConfig,
}

impl UniverseSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        UniverseSimulator { config }
    }

    async fn synthesize(seed: u64) -> AeonResult<(Vec<StageReport>, SynthesisState)> {
        let broker = Arc::new(Broker::standard(Arc::new(NullSink)));
        let mut pipeline = SynthesisPipeline::new(seed, broker);
        let mut reports = Vec::new();
        while !pipeline.is_complete() {
            reports.push(pipeline.step().await?);
        }
        Ok((reports, pipeline.into_state()))
    }

    /// Run one seed twice and compare
    pub async fn run_seed(&self, seed: u64) -> AeonResult<RunTrace> {
        let (reports, state) = Self::synthesize(seed).await?;
        let (replay_reports, replay_state) = Self::synthesize(seed).await?;

        let mut violations = Vec::new();
        for pair in reports.windows(2) {
            if let Err(v) = check_complexity_transition(pair[0].complexity, pair[1].complexity) {
                violations.push(v);
            }
        }
        let monotonic = violations.is_empty();
        let mut deterministic = true;
        for check in [
            check_same_universe(seed, &reports, &replay_reports),
            check_same_universe(seed, &state, &replay_state),
        ] {
            if let Err(v) = check {
                deterministic = false;
                violations.push(v);
            }
        }

        let mut stars_formed = 0;
        if self.config.ticks > 0 {
            let config = UniverseConfig::default().with_seed(seed);
            let broker = Arc::new(Broker::standard(Arc::new(NullSink)));
            let mut universe = Universe::with_broker(config, broker);
            universe.genesis().await?;
            stars_formed = universe.run(self.config.ticks).await?.stars_formed;
        }

        Ok(RunTrace {
            seed,
            deterministic,
            monotonic,
            reports,
            state,
            stars_formed,
            violations,
        })
    }

    /// Run every configured seed
    pub async fn run(&self) -> AeonResult<SimulationReport> {
        let mut report = SimulationReport::default();
        for i in 0..self.config.runs {
            let seed = self.config.base_seed + i as u64;
            report.traces.push(self.run_seed(seed).await?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_light_simulation_is_valid() {
        let report = UniverseSimulator::new(SimulatorConfig::light())
            .run()
            .await
            .unwrap();
        assert_eq!(report.traces.len(), 3);
        assert!(report.is_valid());
        for trace in &report.traces {
            assert!(trace.violations.is_empty(), "{:?}", trace.violations);
            assert_eq!(trace.reports.len(), 10);
            assert!(trace.final_complexity() >= ComplexityLevel::Atoms);
        }
        assert!(report.reached(ComplexityLevel::Atoms) == 3);
    }

    #[tokio::test]
    async fn test_ticking_runs() {
        let simulator = UniverseSimulator::new(SimulatorConfig {
            runs: 1,
            base_seed: 7,
            ticks: 3,
        });
        let report = simulator.run().await.unwrap();
        assert!(report.is_valid());
    }
}
