//! Molecular clouds
//!
//! Every formation is a chemical reaction put to the broker, so the
//! thermodynamic veto decides what forms at the cloud temperature.

use aeon_core::{AeonResult, ComplexityLevel, Energetics, LawAction};

use super::{StageContext, StageOutcome};
use crate::SynthesisState;

/// Cloud temperature once the universe has cooled, K
pub const CLOUD_TEMPERATURE: f64 = 100.0;

/// A formation reaction with tabulated energetics (kJ/mol, kJ/(mol·K))
struct Formation {
    formula: &'static str,
    delta_enthalpy: f64,
    delta_entropy: f64,
    /// Amount formed from the available atoms, zero if a reactant is missing
    amount: fn(&SynthesisState) -> f64,
}

fn limited(a: f64, b: f64) -> f64 {
    if a > 0.0 && b > 0.0 {
        a.min(b)
    } else {
        0.0
    }
}

static FORMATIONS: [Formation; 5] = [
    Formation {
        formula: "H2",
        delta_enthalpy: -436.0,
        delta_entropy: -0.099,
        amount: |s| s.atom("H") * 0.5,
    },
    Formation {
        formula: "H2O",
        delta_enthalpy: -242.0,
        delta_entropy: -0.044,
        amount: |s| limited(s.atom("H") * 0.1, s.atom("O") * 0.5),
    },
    Formation {
        formula: "CO2",
        delta_enthalpy: -393.5,
        delta_entropy: 0.003,
        amount: |s| limited(s.atom("C") * 0.5, s.atom("O") * 0.25),
    },
    Formation {
        formula: "CH4",
        delta_enthalpy: -74.8,
        delta_entropy: -0.081,
        amount: |s| limited(s.atom("C") * 0.3, s.atom("H") * 0.1),
    },
    Formation {
        formula: "NH3",
        delta_enthalpy: -45.9,
        delta_entropy: -0.099,
        amount: |s| limited(s.atom("N") * 0.5, s.atom("H") * 0.1),
    },
];

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let available: Vec<(&Formation, f64)> = FORMATIONS
        .iter()
        .map(|f| (f, (f.amount)(ctx.state)))
        .filter(|(_, amount)| *amount > 0.0)
        .collect();
    if available.is_empty() {
        return Ok(StageOutcome::skipped("no reactants"));
    }

    // Asked as the cooled cloud; the state only cools if molecules form
    let cloud = ctx.state.universe_state().with_temperature(CLOUD_TEMPERATURE);
    let stable = ctx
        .allows_in(
            LawAction::MolecularStability {
                temperature: CLOUD_TEMPERATURE,
            },
            cloud.clone(),
        )
        .await;
    if !stable {
        return Ok(StageOutcome::skipped("too hot for molecular bonds"));
    }

    let mut formed = Vec::new();
    for (formation, amount) in available {
        let reaction = LawAction::ChemicalReaction {
            reaction: formation.formula.to_string(),
            energetics: Energetics::new(formation.delta_enthalpy, formation.delta_entropy),
        };
        if ctx.allows_in(reaction, cloud.clone()).await {
            formed.push((formation.formula, amount));
        }
    }

    if formed.is_empty() {
        return Ok(StageOutcome::skipped("every formation vetoed"));
    }

    let state = &mut *ctx.state;
    state.temperature = CLOUD_TEMPERATURE;
    for (formula, amount) in formed {
        state.molecules.insert(formula.to_string(), amount);
    }
    state.raise_complexity(ComplexityLevel::Molecules)?;
    state.record_event("Molecular Clouds");
    Ok(StageOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{testing, Stage};
    use crate::{PipelineConfig, SeededRng};

    fn cloud(metals: bool) -> SynthesisState {
        let mut state = SynthesisState::new();
        state.t = Stage::MoleculeSynthesis.epoch();
        state.complexity = ComplexityLevel::Atoms;
        state.atoms.insert("H".into(), 0.75);
        state.atoms.insert("He".into(), 0.24);
        if metals {
            state.atoms.insert("C".into(), 0.0024);
            state.atoms.insert("N".into(), 0.0007);
            state.atoms.insert("O".into(), 0.0057);
        }
        state
    }

    async fn synthesize(state: &mut SynthesisState) -> StageOutcome {
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
    async fn test_enriched_cloud() {
        let mut state = cloud(true);
        assert!(synthesize(&mut state).await.is_completed());
        for formula in ["H2", "H2O", "CO2", "CH4", "NH3"] {
            assert!(state.molecule(formula) > 0.0, "{formula}");
        }
        assert!((state.molecule("H2O") - 0.0057 * 0.5).abs() < 1e-12);
        assert_eq!(state.complexity, ComplexityLevel::Molecules);
        assert_eq!(state.events.len(), 1);
    }

    #[tokio::test]
    async fn test_primordial_cloud_has_no_water() {
        let mut state = cloud(false);
        assert!(synthesize(&mut state).await.is_completed());
        assert!(state.molecule("H2") > 0.0);
        assert_eq!(state.molecule("H2O"), 0.0);
        assert_eq!(state.molecule("CH4"), 0.0);
    }

    #[tokio::test]
    async fn test_hydrogen_free_cloud_forms_nothing() {
        let mut state = cloud(false);
        state.atoms.clear();
        state.atoms.insert("He".into(), 1.0);
        let outcome = synthesize(&mut state).await;
        assert!(!outcome.is_completed());
        assert!(state.molecules.is_empty());
        assert!(state.events.is_empty());
    }

    #[tokio::test]
    async fn test_skip_leaves_state_untouched() {
        let mut state = cloud(false);
        state.atoms.clear();
        state.temperature = 1e9;
        let before = state.clone();
        let outcome = synthesize(&mut state).await;
        assert_eq!(
            outcome,
            StageOutcome::Skipped {
                unmet: "no reactants".into()
            }
        );
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_completion_cools_the_cloud() {
        let mut state = cloud(true);
        state.temperature = 3000.0;
        assert!(synthesize(&mut state).await.is_completed());
        assert_eq!(state.temperature, CLOUD_TEMPERATURE);
    }
}
