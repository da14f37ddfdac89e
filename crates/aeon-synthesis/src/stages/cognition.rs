//! Cognitive emergence: brains scale with body mass

use aeon_core::{AeonResult, ComplexityLevel, Emergence};

use super::{StageContext, StageOutcome};

/// Smallest body that supports cognition, kg (corvid level)
pub const COGNITION_MIN_MASS: f64 = 1.0;

pub(super) fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let state = &mut *ctx.state;
    let thinkers = state
        .organisms
        .iter()
        .filter(|o| o.mass > COGNITION_MIN_MASS)
        .count();
    if thinkers == 0 {
        return Ok(StageOutcome::skipped("no organism above 1 kg"));
    }

    state.raise(Emergence::Cognition);
    state.raise_complexity(ComplexityLevel::Cognitive)?;
    state.record_event(format!("Cognition Emerged ({thinkers} species)"));
    Ok(StageOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing;
    use crate::{Organism, OrganismKind, PipelineConfig, SeededRng, SynthesisState};

    fn with_masses(masses: &[f64]) -> SynthesisState {
        let mut state = SynthesisState::new();
        state.complexity = ComplexityLevel::Multicellular;
        for (i, mass) in masses.iter().enumerate() {
            state.organisms.push(Organism {
                kind: OrganismKind::Multicellular,
                mass: *mass,
                metabolism: 1.0,
                scientific_name: format!("Testus {i}"),
            });
        }
        state
    }

    #[test]
    fn test_threshold() {
        let (broker, _) = testing::broker();
        let mut rng = SeededRng::new(1);
        let config = PipelineConfig::default();

        let mut small = with_masses(&[0.5, 1.0]);
        let mut ctx = StageContext {
            state: &mut small,
            broker: &broker,
            rng: &mut rng,
            config: &config,
        };
        assert!(!run(&mut ctx).unwrap().is_completed());
        assert!(!small.emergence.has_cognition());

        let mut large = with_masses(&[0.5, 3.0, 70.0]);
        let mut ctx = StageContext {
            state: &mut large,
            broker: &broker,
            rng: &mut rng,
            config: &config,
        };
        assert!(run(&mut ctx).unwrap().is_completed());
        assert!(large.emergence.has_cognition());
        assert_eq!(large.complexity, ComplexityLevel::Cognitive);
        assert_eq!(large.events[0].label, "Cognition Emerged (2 species)");
    }
}
