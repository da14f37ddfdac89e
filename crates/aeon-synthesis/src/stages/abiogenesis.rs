//! Abiogenesis
//!
//! Needs water, an organic carbon source, a planet surface and the
//! thermodynamic go-ahead for self-assembly. All four, no shortcuts.

use aeon_core::{AeonResult, ComplexityLevel, Emergence, Energetics, LawAction};

use super::{StageContext, StageOutcome};
use crate::{Organism, OrganismKind};

/// Mass of a single prokaryotic cell, kg
pub const FIRST_ORGANISM_MASS: f64 = 1e-15;
/// Metabolic power of the first cell, W
pub const FIRST_ORGANISM_METABOLISM: f64 = 1e-12;
pub const FIRST_ORGANISM_NAME: &str = "Protoarchaea primordialis";

/// Protocell self-assembly: mildly exothermic, ordering
pub const SELF_ASSEMBLY: Energetics = Energetics {
    delta_enthalpy: -10.0,
    delta_entropy: -0.02,
};

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let state = &*ctx.state;
    if state.molecule("H2O") <= 0.0 {
        return Ok(StageOutcome::skipped("no liquid water"));
    }
    if state.molecule("CH4") <= 0.0 && state.molecule("CO2") <= 0.0 {
        return Ok(StageOutcome::skipped("no organic molecules"));
    }
    if state.planets.is_empty() {
        return Ok(StageOutcome::skipped("no planet surface"));
    }

    let assembly = LawAction::BiologicalProcess {
        process: "protocell-self-assembly".to_string(),
        energetics: SELF_ASSEMBLY,
    };
    if !ctx.allows(assembly).await {
        return Ok(StageOutcome::skipped("self-assembly forbidden by thermodynamics"));
    }

    let state = &mut *ctx.state;
    state.organisms.push(Organism {
        kind: OrganismKind::Prokaryote,
        mass: FIRST_ORGANISM_MASS,
        metabolism: FIRST_ORGANISM_METABOLISM,
        scientific_name: FIRST_ORGANISM_NAME.to_string(),
    });
    state.raise(Emergence::Life);
    state.raise_complexity(ComplexityLevel::Life)?;
    state.record_event("Abiogenesis");
    Ok(StageOutcome::Completed)
}
