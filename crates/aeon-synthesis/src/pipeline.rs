//! Synthesis pipeline
//!
//! Runs the stages in their fixed order. Between stages the pipeline:
//! - feeds newly recorded events to the adaptive epoch clock
//! - checks that complexity only rose and no emergence flag was lost
//! - reports the stage to the decision sink
//! - optionally hands a snapshot to a checkpoint consumer
//!
//! A run can only be abandoned between stages.

use std::sync::Arc;
use std::time::Duration;

use aeon_broker::Broker;
use aeon_core::invariants::{check_complexity_transition, check_emergence_transition};
use aeon_core::{AeonError, AeonResult, ComplexityLevel, DecisionEvent, DecisionSink, SimTime};
use aeon_time::{AdaptiveEpochClock, EpochClockConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::stages::{self, Stage, StageContext, StageOutcome};
use crate::{RandomSource, Seed, SeededRng, SynthesisState};

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stars assumed to form in the region by the first-stars epoch
    pub estimated_stars: f64,
    /// Deep time covered by the multicellular radiation
    pub evolution_span: SimTime,
    /// Most species created in one radiation
    pub species_cap: usize,
    /// How long a checkpoint consumer may take
    pub checkpoint_timeout_ms: u64,
    /// Treat a checkpoint timeout as an error instead of carrying on
    pub fail_on_checkpoint_timeout: bool,
    pub clock: EpochClockConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            estimated_stars: 100_000.0,
            evolution_span: SimTime::from_gyr(1.5),
            species_cap: 25,
            checkpoint_timeout_ms: 5_000,
            fail_on_checkpoint_timeout: false,
            clock: EpochClockConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Step-by-step visualisation: fine clock, patient checkpoints
    pub fn interactive() -> Self {
        PipelineConfig {
            checkpoint_timeout_ms: 30_000,
            clock: EpochClockConfig::fine_grained(),
            ..Default::default()
        }
    }

    /// Unattended batch runs: coarse clock, strict checkpoints
    pub fn batch() -> Self {
        PipelineConfig {
            checkpoint_timeout_ms: 1_000,
            fail_on_checkpoint_timeout: true,
            clock: EpochClockConfig::fast_forward(),
            ..Default::default()
        }
    }

    pub fn checkpoint_timeout(&self) -> Duration {
        Duration::from_millis(self.checkpoint_timeout_ms)
    }
}

/// Result of one stage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub complexity: ComplexityLevel,
    /// Events recorded by this stage
    pub events: usize,
    /// Adaptive step after the stage, years
    pub time_scale: f64,
}

/// Consumer's verdict at a checkpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointDecision {
    Continue,
    Abandon,
}

/// Receives a snapshot after every stage
#[async_trait]
pub trait CheckpointConsumer: Send + Sync {
    async fn on_checkpoint(&self, report: &StageReport, state: &SynthesisState)
        -> CheckpointDecision;
}

/// How a checkpointed run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Abandoned { after: Stage },
}

/// End-of-universe transition, the only way complexity may fall
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalRegression {
    /// Everything decays to a dilute particle bath
    HeatDeath,
    /// Everything collapses back into energy
    BigCrunch,
}

impl TerminalRegression {
    pub fn level(self) -> ComplexityLevel {
        match self {
            TerminalRegression::HeatDeath => ComplexityLevel::Particles,
            TerminalRegression::BigCrunch => ComplexityLevel::Energy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TerminalRegression::HeatDeath => "Heat Death",
            TerminalRegression::BigCrunch => "Big Crunch",
        }
    }
}

/// Ten-stage universe synthesis.
pub struct SynthesisPipeline {
    broker: Arc<Broker>,
    sink: Arc<dyn DecisionSink>,
    rng: Box<dyn RandomSource>,
    config: PipelineConfig,
    state: SynthesisState,
    clock: AdaptiveEpochClock,
    next: Option<Stage>,
    abandoned: Option<Stage>,
}

impl SynthesisPipeline {
    /// Pipeline with default configuration
    pub fn new(seed: impl Into<Seed>, broker: Arc<Broker>) -> Self {
        Self::with_config(seed, broker, PipelineConfig::default())
    }

    /// Pipeline with custom configuration
    pub fn with_config(seed: impl Into<Seed>, broker: Arc<Broker>, config: PipelineConfig) -> Self {
        Self::with_rng(Box::new(SeededRng::new(seed)), broker, config)
    }

    /// Pipeline over a caller-owned random source
    pub fn with_rng(
        rng: Box<dyn RandomSource>,
        broker: Arc<Broker>,
        config: PipelineConfig,
    ) -> Self {
        let sink = broker.sink();
        SynthesisPipeline {
            clock: AdaptiveEpochClock::with_config(config.clock.clone()),
            broker,
            sink,
            rng,
            config,
            state: SynthesisState::new(),
            next: Some(Stage::FIRST),
            abandoned: None,
        }
    }

    pub fn state(&self) -> &SynthesisState {
        &self.state
    }

    pub fn into_state(self) -> SynthesisState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn clock(&self) -> &AdaptiveEpochClock {
        &self.clock
    }

    /// Stage that runs next, `None` once complete
    pub fn next_stage(&self) -> Option<Stage> {
        self.next
    }

    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    fn ensure_open(&self) -> AeonResult<Stage> {
        if let Some(after) = self.abandoned {
            return Err(AeonError::Abandoned(after.to_string()));
        }
        self.next.ok_or(AeonError::PipelineComplete)
    }

    /// Run exactly `stage`, which must be the next one.
    pub async fn run_stage(&mut self, stage: Stage) -> AeonResult<StageReport> {
        let expected = self.ensure_open()?;
        if stage != expected {
            return Err(AeonError::StageOutOfOrder {
                expected: expected.to_string(),
                requested: stage.to_string(),
            });
        }

        self.state.t = stage.epoch();
        self.clock.jump_to(stage.epoch());

        let before_level = self.state.complexity;
        let before_flags = self.state.emergence;
        let before_events = self.state.events.len();

        let mut ctx = StageContext {
            state: &mut self.state,
            broker: &self.broker,
            rng: self.rng.as_mut(),
            config: &self.config,
        };
        let outcome = stages::run(stage, &mut ctx).await?;

        check_complexity_transition(before_level, self.state.complexity)?;
        check_emergence_transition(&before_flags, &self.state.emergence)?;

        let new_events = self.state.events.len() - before_events;
        for event in &self.state.events[before_events..] {
            self.clock.record_event_at(event.at);
            self.sink.record(DecisionEvent::EventRecorded {
                label: event.label.clone(),
                at: event.at,
            });
        }
        self.state.time_scale = self.clock.step_years(self.state.complexity);

        match &outcome {
            StageOutcome::Completed => self.sink.record(DecisionEvent::StageCompleted {
                stage: stage.to_string(),
                complexity: self.state.complexity,
                events: new_events,
            }),
            StageOutcome::Skipped { unmet } => self.sink.record(DecisionEvent::StageSkipped {
                stage: stage.to_string(),
                unmet: unmet.clone(),
            }),
        }

        self.next = stage.next();
        Ok(StageReport {
            stage,
            outcome,
            complexity: self.state.complexity,
            events: new_events,
            time_scale: self.state.time_scale,
        })
    }

    /// Run the next stage, whatever it is
    pub async fn step(&mut self) -> AeonResult<StageReport> {
        let stage = self.ensure_open()?;
        self.run_stage(stage).await
    }

    /// Run stages up to and including `last`
    pub async fn run_until(&mut self, last: Stage) -> AeonResult<Vec<StageReport>> {
        let mut reports = Vec::new();
        while let Some(stage) = self.next {
            if stage > last {
                break;
            }
            reports.push(self.run_stage(stage).await?);
        }
        Ok(reports)
    }

    /// Run every remaining stage
    pub async fn run(&mut self) -> AeonResult<&SynthesisState> {
        while let Some(stage) = self.next {
            self.run_stage(stage).await?;
        }
        Ok(&self.state)
    }

    /// Run every remaining stage, offering a snapshot after each one.
    ///
    /// A consumer that does not answer within the configured timeout is taken
    /// to have no objection, unless the configuration makes that an error.
    pub async fn run_with_checkpoints(
        &mut self,
        consumer: &dyn CheckpointConsumer,
    ) -> AeonResult<RunOutcome> {
        let timeout = self.config.checkpoint_timeout();
        while let Some(stage) = self.next {
            let report = self.run_stage(stage).await?;
            let verdict =
                tokio::time::timeout(timeout, consumer.on_checkpoint(&report, &self.state)).await;
            match verdict {
                Ok(CheckpointDecision::Continue) => {}
                Ok(CheckpointDecision::Abandon) => {
                    tracing::info!(stage = %stage, "synthesis abandoned at checkpoint");
                    self.abandoned = Some(stage);
                    return Ok(RunOutcome::Abandoned { after: stage });
                }
                Err(_) if self.config.fail_on_checkpoint_timeout => {
                    return Err(AeonError::CheckpointTimeout {
                        stage: stage.to_string(),
                        waited: timeout,
                    });
                }
                Err(_) => {
                    tracing::warn!(stage = %stage, ?timeout, "checkpoint timed out, continuing");
                }
            }
        }
        Ok(RunOutcome::Completed)
    }

    /// Record an outside event (a star forming during ticking, say) now
    pub fn record_event(&mut self, label: impl Into<String>) {
        self.state.record_event(label);
        if let Some(event) = self.state.events.last() {
            self.clock.record_event_at(event.at);
            self.sink.record(DecisionEvent::EventRecorded {
                label: event.label.clone(),
                at: event.at,
            });
        }
        self.state.time_scale = self.clock.step_years(self.state.complexity);
    }

    /// Move the run's clock forward to `t`
    pub fn advance_to(&mut self, t: SimTime) {
        if t > self.state.t {
            self.state.t = t;
        }
        self.clock.jump_to(self.state.t);
        self.state.time_scale = self.clock.step_years(self.state.complexity);
    }

    /// End the universe. Lowers complexity, closes the pipeline.
    pub fn terminal_regression(&mut self, kind: TerminalRegression) {
        let from = self.state.complexity;
        let to = kind.level().min(from);
        self.state.complexity = to;
        self.sink.record(DecisionEvent::ComplexityRegressed {
            from,
            to,
            reason: kind.label().to_string(),
        });
        self.record_event(kind.label());
        self.next = None;
    }
}

/// Run a whole synthesis from a seed
pub async fn run_synthesis(seed: impl Into<Seed>, broker: Arc<Broker>) -> AeonResult<SynthesisState> {
    let mut pipeline = SynthesisPipeline::new(seed, broker);
    pipeline.run().await?;
    Ok(pipeline.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_broker::MemorySink;
    use parking_lot::Mutex;

    fn broker() -> (Arc<Broker>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Arc::new(Broker::standard(sink.clone())), sink)
    }

    #[tokio::test]
    async fn test_same_seed_same_universe() {
        let (broker, _) = broker();
        let a = run_synthesis(42, broker.clone()).await.unwrap();
        let b = run_synthesis(42, broker).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.t, Stage::Technology.epoch());
    }

    #[tokio::test]
    async fn test_stage_order_enforced() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(1, broker);
        let err = pipeline.run_stage(Stage::Abiogenesis).await.unwrap_err();
        assert!(matches!(err, AeonError::StageOutOfOrder { .. }));

        pipeline.run_stage(Stage::Particles).await.unwrap();
        assert_eq!(pipeline.next_stage(), Some(Stage::Nucleosynthesis));
        let err = pipeline.run_stage(Stage::Particles).await.unwrap_err();
        assert!(matches!(err, AeonError::StageOutOfOrder { .. }));
    }

    #[tokio::test]
    async fn test_complete_pipeline_refuses_more() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(1, broker);
        pipeline.run().await.unwrap();
        assert!(pipeline.is_complete());
        assert!(matches!(
            pipeline.step().await,
            Err(AeonError::PipelineComplete)
        ));
    }

    #[tokio::test]
    async fn test_complexity_never_decreases() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(7, broker);
        let mut last = ComplexityLevel::Void;
        for stage in Stage::ALL {
            let report = pipeline.run_stage(stage).await.unwrap();
            assert!(report.complexity >= last);
            last = report.complexity;
        }
    }

    #[tokio::test]
    async fn test_run_until_and_sink() {
        let (broker, sink) = broker();
        let mut pipeline = SynthesisPipeline::new(3, broker);
        let reports = pipeline.run_until(Stage::MoleculeSynthesis).await.unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(pipeline.next_stage(), Some(Stage::PlanetaryAccretion));
        let stages = sink.count("stage-completed") + sink.count("stage-skipped");
        assert_eq!(stages, 4);
        assert_eq!(sink.count("event-recorded"), pipeline.state().events.len());
    }

    #[tokio::test]
    async fn test_events_slow_the_clock() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(3, broker);
        let report = pipeline.run_stage(Stage::Particles).await.unwrap();
        pipeline.run_stage(Stage::Nucleosynthesis).await.unwrap();
        assert_eq!(report.events, 1);
        // An event was just recorded: observing tier
        assert_eq!(pipeline.state().time_scale, 1e3);
    }

    struct Recorder {
        seen: Mutex<Vec<Stage>>,
        stop_after: Stage,
    }

    #[async_trait]
    impl CheckpointConsumer for Recorder {
        async fn on_checkpoint(
            &self,
            report: &StageReport,
            _state: &SynthesisState,
        ) -> CheckpointDecision {
            self.seen.lock().push(report.stage);
            if report.stage == self.stop_after {
                CheckpointDecision::Abandon
            } else {
                CheckpointDecision::Continue
            }
        }
    }

    #[tokio::test]
    async fn test_abandon_between_stages() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(5, broker);
        let recorder = Recorder {
            seen: Mutex::new(Vec::new()),
            stop_after: Stage::HeavyElementSynthesis,
        };
        let outcome = pipeline.run_with_checkpoints(&recorder).await.unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Abandoned {
                after: Stage::HeavyElementSynthesis
            }
        );
        assert_eq!(recorder.seen.lock().len(), 3);
        assert!(matches!(pipeline.step().await, Err(AeonError::Abandoned(_))));
    }

    struct Sleeper;

    #[async_trait]
    impl CheckpointConsumer for Sleeper {
        async fn on_checkpoint(
            &self,
            _report: &StageReport,
            _state: &SynthesisState,
        ) -> CheckpointDecision {
            tokio::time::sleep(Duration::from_secs(60)).await;
            CheckpointDecision::Abandon
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkpoint_timeout_continues() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::new(5, broker);
        let outcome = pipeline.run_with_checkpoints(&Sleeper).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert!(pipeline.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkpoint_timeout_can_fail() {
        let (broker, _) = broker();
        let mut pipeline = SynthesisPipeline::with_config(5, broker, PipelineConfig::batch());
        let err = pipeline.run_with_checkpoints(&Sleeper).await.unwrap_err();
        assert!(matches!(err, AeonError::CheckpointTimeout { .. }));
    }

    #[tokio::test]
    async fn test_terminal_regression() {
        let (broker, sink) = broker();
        let mut pipeline = SynthesisPipeline::new(42, broker);
        pipeline.run().await.unwrap();
        let before = pipeline.state().events.len();
        pipeline.terminal_regression(TerminalRegression::HeatDeath);
        assert_eq!(pipeline.state().complexity, ComplexityLevel::Particles);
        assert_eq!(pipeline.state().events.len(), before + 1);
        assert_eq!(sink.count("complexity-regressed"), 1);
        assert!(pipeline.is_complete());
    }
}
