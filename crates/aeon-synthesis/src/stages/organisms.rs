//! Multicellular radiation
//!
//! Body size grows linearly in log space over deep time (fifteen orders of
//! magnitude over 1.5 Gyr) with a wide log-normal spread per lineage.

use aeon_core::{AeonResult, ComplexityLevel, LawAction, YEAR};

use super::{StageContext, StageOutcome};
use crate::naming::scientific_name;
use crate::{Organism, OrganismKind};

/// Heaviest plausible organism, kg (a little above a blue whale)
pub const MAX_ORGANISM_MASS: f64 = 2e5;
/// Years per generation
pub const GENERATION_YEARS: f64 = 10.0;
/// New species per generation
pub const SPECIATION_RATE: f64 = 1e-6;
/// Orders of magnitude gained per Myr
pub const SIZE_ORDERS_PER_MYR: f64 = 15.0 / 1500.0;
/// Log-normal sigma of lineage body size
pub const SIZE_SPREAD: f64 = 5.0;
/// Bodies above this are large multicellular, kg
pub const LARGE_BODY_MASS: f64 = 1.0;

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let Some(ancestor) = ctx.state.organisms.first() else {
        return Ok(StageOutcome::skipped("no life to evolve"));
    };
    let parent_mass = ancestor.mass;

    let span = ctx.config.evolution_span;
    let generations = span.as_seconds() / (GENERATION_YEARS * YEAR);
    let new_species = (generations * SPECIATION_RATE).floor() as usize;
    if new_species == 0 {
        return Ok(StageOutcome::skipped("too few generations"));
    }
    let radiation = new_species.min(ctx.config.species_cap);
    let base_size = 10f64.powf(span.as_myr() * SIZE_ORDERS_PER_MYR);

    let mut lineages = Vec::with_capacity(radiation);
    for i in 0..radiation {
        let mass = (parent_mass * base_size * ctx.rng.log_normal(0.0, SIZE_SPREAD))
            .min(MAX_ORGANISM_MASS);
        let name = scientific_name(ctx.rng, i);
        let metabolism = ctx
            .number(LawAction::Metabolism { mass })
            .await
            .unwrap_or(0.0);
        lineages.push(Organism {
            kind: if mass > LARGE_BODY_MASS {
                OrganismKind::LargeMulticellular
            } else {
                OrganismKind::Multicellular
            },
            mass,
            metabolism,
            scientific_name: name,
        });
    }

    let state = &mut *ctx.state;
    for organism in lineages {
        state.species.push(organism.scientific_name.clone());
        state.organisms.push(organism);
    }
    state.raise_complexity(ComplexityLevel::Multicellular)?;
    let heaviest = state.max_organism_mass().unwrap_or(parent_mass);
    state.record_event(format!(
        "{new_species} Species Evolved (max: {heaviest:.2e} kg)"
    ));
    Ok(StageOutcome::Completed)
}
