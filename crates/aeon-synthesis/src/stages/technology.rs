//! Tool use and fire

use aeon_core::{AeonResult, ComplexityLevel, Emergence, Energetics, LawAction};
use aeon_laws::technology::TOOL_USER_MIN_MASS;

use super::{StageContext, StageOutcome};
use crate::Technology;

/// Carbon combustion, C + O2 -> CO2
pub const COMBUSTION: Energetics = Energetics {
    delta_enthalpy: -393.5,
    delta_entropy: 0.003,
};

fn paleolithic(kind: &str, materials: &[&str]) -> Technology {
    Technology {
        kind: kind.to_string(),
        materials: materials.iter().map(|m| m.to_string()).collect(),
        era: "paleolithic".to_string(),
    }
}

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    if !ctx.state.emergence.has_society() {
        return Ok(StageOutcome::skipped("no society"));
    }
    let tool_users = ctx
        .state
        .organisms
        .iter()
        .filter(|o| o.mass > TOOL_USER_MIN_MASS)
        .count();
    if tool_users == 0 {
        return Ok(StageOutcome::skipped("no organism above 10 kg"));
    }

    let mut tools = vec![paleolithic("stone-tools", &["stone", "wood"])];
    if ctx.state.has_atom("C") && ctx.state.has_atom("O") {
        let fire = LawAction::ChemicalReaction {
            reaction: "combustion".to_string(),
            energetics: COMBUSTION,
        };
        if ctx.allows(fire).await {
            tools.push(paleolithic("fire", &["wood", "oxygen"]));
        }
    }

    let state = &mut *ctx.state;
    state.tools.extend(tools);
    state.raise(Emergence::Technology);
    state.raise_complexity(ComplexityLevel::Technological)?;
    let label = format!("Technology Emerged ({} tool types)", state.tools.len());
    state.record_event(label);
    Ok(StageOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{testing, Stage};
    use crate::{Organism, OrganismKind, PipelineConfig, SeededRng, SynthesisState};

    fn social(carbon: bool) -> SynthesisState {
        let mut state = SynthesisState::new();
        state.t = Stage::Technology.epoch();
        state.temperature = 10.0;
        state.complexity = ComplexityLevel::Social;
        state.atoms.insert("H".into(), 0.75);
        state.atoms.insert("O".into(), 0.0057);
        if carbon {
            state.atoms.insert("C".into(), 0.0024);
        }
        state.raise(Emergence::Life);
        state.raise(Emergence::Cognition);
        state.raise(Emergence::Society);
        state.organisms.push(Organism {
            kind: OrganismKind::LargeMulticellular,
            mass: 60.0,
            metabolism: 1.0,
            scientific_name: "Macrotherium rex".into(),
        });
        state
    }

    async fn invent(state: &mut SynthesisState) -> StageOutcome {
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
    async fn test_fire_needs_carbon() {
        let mut with_carbon = social(true);
        assert!(invent(&mut with_carbon).await.is_completed());
        assert_eq!(with_carbon.tools.len(), 2);
        assert!(with_carbon.emergence.has_technology());
        assert_eq!(with_carbon.complexity, ComplexityLevel::Technological);

        let mut without = social(false);
        assert!(invent(&mut without).await.is_completed());
        assert_eq!(without.tools.len(), 1);
        assert_eq!(without.tools[0].kind, "stone-tools");
    }

    #[tokio::test]
    async fn test_needs_society() {
        let mut state = social(true);
        state.emergence = Default::default();
        assert!(!invent(&mut state).await.is_completed());
        assert!(state.tools.is_empty());
    }
}
