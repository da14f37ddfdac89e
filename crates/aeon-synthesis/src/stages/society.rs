//! Social groups sized by the social-brain relation

use aeon_core::{AeonResult, ComplexityLevel, Emergence, LawAction};

use super::cognition::COGNITION_MIN_MASS;
use super::{StageContext, StageOutcome};
use crate::{GroupStructure, SocialGroup};

/// Brain mass as a fraction of body mass
pub const BRAIN_FRACTION: f64 = 0.02;
/// Groups must be larger than this to count
pub const MIN_GROUP_SIZE: f64 = 5.0;
/// Groups larger than this are complex
pub const COMPLEX_GROUP_SIZE: f64 = 50.0;

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    if !ctx.state.emergence.has_cognition() {
        return Ok(StageOutcome::skipped("no cognition"));
    }

    let candidates: Vec<(String, f64)> = ctx
        .state
        .organisms
        .iter()
        .filter(|o| o.mass > COGNITION_MIN_MASS)
        .map(|o| (o.scientific_name.clone(), o.mass))
        .collect();

    let mut groups = Vec::new();
    for (species, mass) in candidates {
        let brain_mass = mass * BRAIN_FRACTION;
        let Some(size) = ctx.number(LawAction::GroupSize { brain_mass }).await else {
            continue;
        };
        if size > MIN_GROUP_SIZE {
            groups.push(SocialGroup {
                species,
                size: size as u32,
                structure: if size > COMPLEX_GROUP_SIZE {
                    GroupStructure::Complex
                } else {
                    GroupStructure::Simple
                },
            });
        }
    }

    if groups.is_empty() {
        return Ok(StageOutcome::skipped("no group larger than 5"));
    }

    let state = &mut *ctx.state;
    let count = groups.len();
    state.groups.extend(groups);
    state.raise(Emergence::Society);
    state.raise_complexity(ComplexityLevel::Social)?;
    state.record_event(format!("{count} Social Groups Formed"));
    Ok(StageOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{testing, Stage};
    use crate::{Organism, OrganismKind, PipelineConfig, SeededRng, SynthesisState};

    fn thinking(masses: &[f64]) -> SynthesisState {
        let mut state = SynthesisState::new();
        state.t = Stage::Society.epoch();
        state.temperature = 10.0;
        state.complexity = ComplexityLevel::Cognitive;
        state.atoms.insert("H".into(), 0.75);
        state.raise(Emergence::Life);
        state.raise(Emergence::Cognition);
        for (i, mass) in masses.iter().enumerate() {
            state.organisms.push(Organism {
                kind: OrganismKind::LargeMulticellular,
                mass: *mass,
                metabolism: 1.0,
                scientific_name: format!("Testus {i}"),
            });
        }
        state
    }

    async fn socialize(state: &mut SynthesisState) -> StageOutcome {
        let (broker, _) = testing::broker();
        let mut rng = SeededRng::new(1);
        let config = PipelineConfig::default();
        let mut ctx = StageContext {
            state,
            broker: &broker,
            rng: &mut rng,
            config: &config,
        };
        run(&mut ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_group_structures() {
        // 2 kg: brain 0.04 kg -> 4 (too small); 10 kg -> 20; 70 kg -> 140
        let mut state = thinking(&[2.0, 10.0, 70.0]);
        assert!(socialize(&mut state).await.is_completed());
        assert_eq!(state.groups.len(), 2);
        assert_eq!(state.groups[0].size, 20);
        assert_eq!(state.groups[0].structure, GroupStructure::Simple);
        assert_eq!(state.groups[1].structure, GroupStructure::Complex);
        assert!(state.emergence.has_society());
        assert_eq!(state.complexity, ComplexityLevel::Social);
    }

    #[tokio::test]
    async fn test_small_brains_stay_solitary() {
        let mut state = thinking(&[2.0]);
        assert!(!socialize(&mut state).await.is_completed());
        assert!(state.groups.is_empty());
        assert!(!state.emergence.has_society());
    }
}
