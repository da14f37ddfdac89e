//! Synthesis stages
//!
//! One module per stage. A stage either does its work or reports the first
//! unmet prerequisite and leaves the state untouched.

mod abiogenesis;
mod accretion;
mod cognition;
mod elements;
mod molecules;
mod organisms;
mod particles;
mod society;
mod technology;

use std::fmt;

use aeon_broker::Broker;
use aeon_core::{AeonResult, LawAction, LawRequest, LawResponse, LawValue, SimTime, UniverseState};
use serde::{Deserialize, Serialize};

use crate::{PipelineConfig, RandomSource, SynthesisState};

pub use abiogenesis::{FIRST_ORGANISM_MASS, FIRST_ORGANISM_NAME};
pub use organisms::MAX_ORGANISM_MASS;

/// Pipeline stages in their only legal order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Particles,
    Nucleosynthesis,
    HeavyElementSynthesis,
    MoleculeSynthesis,
    PlanetaryAccretion,
    Abiogenesis,
    ComplexOrganisms,
    Cognition,
    Society,
    Technology,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Particles,
        Stage::Nucleosynthesis,
        Stage::HeavyElementSynthesis,
        Stage::MoleculeSynthesis,
        Stage::PlanetaryAccretion,
        Stage::Abiogenesis,
        Stage::ComplexOrganisms,
        Stage::Cognition,
        Stage::Society,
        Stage::Technology,
    ];

    pub const FIRST: Stage = Stage::Particles;

    /// Cosmic time at which the stage runs
    pub fn epoch(self) -> SimTime {
        match self {
            Stage::Particles => SimTime::from_seconds(1e-6),
            Stage::Nucleosynthesis => SimTime::from_seconds(180.0),
            Stage::HeavyElementSynthesis => SimTime::from_myr(100.0),
            Stage::MoleculeSynthesis => SimTime::from_gyr(1.0),
            Stage::PlanetaryAccretion => SimTime::from_gyr(9.2),
            Stage::Abiogenesis => SimTime::from_gyr(9.5),
            Stage::ComplexOrganisms => SimTime::from_gyr(11.0),
            Stage::Cognition => SimTime::from_gyr(12.0),
            Stage::Society => SimTime::from_gyr(12.5),
            Stage::Technology => SimTime::from_gyr(13.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Particles => "particles",
            Stage::Nucleosynthesis => "nucleosynthesis",
            Stage::HeavyElementSynthesis => "heavy-element-synthesis",
            Stage::MoleculeSynthesis => "molecule-synthesis",
            Stage::PlanetaryAccretion => "planetary-accretion",
            Stage::Abiogenesis => "abiogenesis",
            Stage::ComplexOrganisms => "complex-organisms",
            Stage::Cognition => "cognition",
            Stage::Society => "society",
            Stage::Technology => "technology",
        }
    }

    /// Stage that follows, `None` after technology
    pub fn next(self) -> Option<Stage> {
        let i = Stage::ALL.iter().position(|s| *s == self)?;
        Stage::ALL.get(i + 1).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a stage did
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum StageOutcome {
    Completed,
    /// A prerequisite did not hold; nothing changed
    Skipped { unmet: String },
}

impl StageOutcome {
    pub(crate) fn skipped(unmet: impl Into<String>) -> Self {
        StageOutcome::Skipped {
            unmet: unmet.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed)
    }
}

/// What a stage may touch
pub struct StageContext<'a> {
    pub state: &'a mut SynthesisState,
    pub broker: &'a Broker,
    pub rng: &'a mut dyn RandomSource,
    pub config: &'a PipelineConfig,
}

impl StageContext<'_> {
    /// Ask the broker against the current state
    pub async fn ask(&self, action: LawAction) -> LawResponse {
        self.ask_in(action, self.state.universe_state()).await
    }

    /// Ask against a caller-built snapshot, e.g. at the coming epoch's
    /// temperature before the state is touched
    pub async fn ask_in(&self, action: LawAction, snapshot: UniverseState) -> LawResponse {
        self.broker.ask(&LawRequest::new(action, snapshot)).await
    }

    /// Numeric answer, `None` for any kind of null
    pub async fn number(&self, action: LawAction) -> Option<f64> {
        self.number_in(action, self.state.universe_state()).await
    }

    pub async fn number_in(&self, action: LawAction, snapshot: UniverseState) -> Option<f64> {
        self.ask_in(action, snapshot).await.value.as_number()
    }

    /// True only for an explicit, unvetoed yes
    pub async fn allows(&self, action: LawAction) -> bool {
        self.allows_in(action, self.state.universe_state()).await
    }

    pub async fn allows_in(&self, action: LawAction, snapshot: UniverseState) -> bool {
        let response = self.ask_in(action, snapshot).await;
        !response.is_vetoed() && response.value == LawValue::Flag(true)
    }
}

/// Run one stage against the context
pub async fn run(stage: Stage, ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    match stage {
        Stage::Particles => particles::run(ctx),
        Stage::Nucleosynthesis => particles::nucleosynthesis(ctx),
        Stage::HeavyElementSynthesis => elements::run(ctx).await,
        Stage::MoleculeSynthesis => molecules::run(ctx).await,
        Stage::PlanetaryAccretion => accretion::run(ctx).await,
        Stage::Abiogenesis => abiogenesis::run(ctx).await,
        Stage::ComplexOrganisms => organisms::run(ctx).await,
        Stage::Cognition => cognition::run(ctx),
        Stage::Society => society::run(ctx).await,
        Stage::Technology => technology::run(ctx).await,
    }
}
