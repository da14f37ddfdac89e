//! End-to-end scenarios
//!
//! Drives synthesis, the broker's decision trail, agents and the runtime
//! together:
//! - Checkpointed runs observed stage by stage
//! - Primordial (sterile) universes that complete without error
//! - Decision trail consistency

use std::sync::Arc;

use aeon_broker::{Broker, MemorySink};
use aeon_core::ComplexityLevel;
use aeon_synthesis::{
    CheckpointConsumer, CheckpointDecision, Stage, StageReport, SynthesisState,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// What an observer saw at one checkpoint
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub stage: Stage,
    pub complexity: ComplexityLevel,
    pub events: usize,
    pub organisms: usize,
}

/// Checkpoint consumer that records every stage, optionally stopping early.
#[derive(Default)]
pub struct StageObserver {
    seen: Mutex<Vec<Observation>>,
    stop_after: Option<Stage>,
}

impl StageObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abandon the run after `stage`
    pub fn stopping_after(stage: Stage) -> Self {
        StageObserver {
            seen: Mutex::new(Vec::new()),
            stop_after: Some(stage),
        }
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl CheckpointConsumer for StageObserver {
    async fn on_checkpoint(
        &self,
        report: &StageReport,
        state: &SynthesisState,
    ) -> CheckpointDecision {
        self.seen.lock().push(Observation {
            stage: report.stage,
            complexity: state.complexity,
            events: state.events.len(),
            organisms: state.organisms.len(),
        });
        if self.stop_after == Some(report.stage) {
            CheckpointDecision::Abandon
        } else {
            CheckpointDecision::Continue
        }
    }
}

/// Standard broker recording into memory
pub fn recording_broker() -> (Arc<Broker>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (Arc::new(Broker::standard(sink.clone())), sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_agent::DensityAgent;
    use aeon_runtime::{Universe, UniverseConfig};
    use aeon_synthesis::{PipelineConfig, RunOutcome, SynthesisPipeline};

    #[tokio::test]
    async fn test_observer_sees_every_stage_in_order() {
        let (broker, _) = recording_broker();
        let mut pipeline = SynthesisPipeline::new("observer", broker);
        let observer = StageObserver::new();
        let outcome = pipeline.run_with_checkpoints(&observer).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let seen = observer.observations();
        let stages: Vec<Stage> = seen.iter().map(|o| o.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        for pair in seen.windows(2) {
            assert!(pair[0].complexity <= pair[1].complexity);
            assert!(pair[0].events <= pair[1].events);
        }
    }

    #[tokio::test]
    async fn test_abandoned_run_keeps_partial_state() {
        let (broker, _) = recording_broker();
        let mut pipeline = SynthesisPipeline::new(9, broker);
        let observer = StageObserver::stopping_after(Stage::MoleculeSynthesis);
        let outcome = pipeline.run_with_checkpoints(&observer).await.unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Abandoned {
                after: Stage::MoleculeSynthesis
            }
        );
        assert_eq!(observer.observations().len(), 4);
        assert!(pipeline.state().planets.is_empty());
        assert!(pipeline.state().organisms.is_empty());
    }

    #[tokio::test]
    async fn test_primordial_universe_is_not_an_error() {
        // No massive stars: no metals, no water, no life
        let (broker, sink) = recording_broker();
        let config = PipelineConfig {
            estimated_stars: 0.0,
            ..PipelineConfig::default()
        };
        let mut pipeline = SynthesisPipeline::with_config(1, broker, config);
        let state = pipeline.run().await.unwrap();

        assert!(!state.has_atom("O"));
        assert!(state.molecule("H2") > 0.0);
        assert_eq!(state.molecule("H2O"), 0.0);
        assert!(state.organisms.is_empty());
        assert!(!state.emergence.has_life());
        assert_eq!(state.complexity, ComplexityLevel::Molecules);
        assert!(sink.count("stage-skipped") >= 6);
    }

    #[tokio::test]
    async fn test_decision_trail_matches_event_log() {
        let (broker, sink) = recording_broker();
        let mut pipeline = SynthesisPipeline::new(42, broker);
        pipeline.run().await.unwrap();
        let events = pipeline.state().events.len();

        assert_eq!(sink.count("event-recorded"), events);
        assert_eq!(sink.count("stage-completed") + sink.count("stage-skipped"), 10);
        assert!(sink.count("routed") > 0);
        assert!(sink.count("gate-check") >= sink.count("routed"));
    }

    #[tokio::test]
    async fn test_phrase_seeded_universes_agree() {
        let config = UniverseConfig::nursery().with_seed("first light");
        let (a_broker, _) = recording_broker();
        let (b_broker, _) = recording_broker();
        let mut a = Universe::with_broker(config.clone(), a_broker);
        let mut b = Universe::with_broker(config, b_broker);
        a.genesis().await.unwrap();
        b.genesis().await.unwrap();
        a.run(5).await.unwrap();
        b.run(5).await.unwrap();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.stats().stars_formed, b.stats().stars_formed);
    }

    #[tokio::test]
    async fn test_cloud_collapse_slows_the_clock() {
        let mut config = UniverseConfig::nursery().with_seed(2);
        config.clouds = 0;
        let (broker, _) = recording_broker();
        let mut universe = Universe::with_broker(config, broker);
        universe.genesis().await.unwrap();
        // Observing-tier steps are 1e3 years; ignition takes about a Myr
        universe.add_agent(DensityAgent::new(1e-17, 10.0, 1e33));

        let mut summary = universe.tick().await.unwrap();
        let mut ticks = 1;
        while summary.stars_formed == 0 && ticks < 2_000 {
            summary = universe.tick().await.unwrap();
            ticks += 1;
        }
        assert_eq!(summary.stars_formed, 1);
        // A fresh event puts the clock back into observing mode
        assert_eq!(summary.time_scale, 1e3);
    }
}
