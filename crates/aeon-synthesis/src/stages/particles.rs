//! Particle era and Big Bang nucleosynthesis

use aeon_core::{AeonResult, ComplexityLevel};

use super::{StageContext, StageOutcome};

/// Quark number density at the end of inflation
pub const QUARK_DENSITY: f64 = 1e90;

/// Primordial mass fractions after nucleosynthesis
pub const PRIMORDIAL_ABUNDANCES: [(&str, f64); 3] = [("H", 0.75), ("He", 0.24), ("Li", 1e-5)];

/// Inflation leaves quarks, leptons and a sea of photons
pub(super) fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let state = &mut *ctx.state;
    for (particle, share) in [
        ("up-quark", 0.4),
        ("down-quark", 0.4),
        ("electron", 0.2),
        ("photon", 10.0),
    ] {
        state.particles.insert(particle.to_string(), QUARK_DENSITY * share);
    }
    state.temperature = 1e13;
    state.density = QUARK_DENSITY;
    state.raise_complexity(ComplexityLevel::Particles)?;
    state.record_event("Particle Era");
    Ok(StageOutcome::Completed)
}

/// Quarks bind into the light nuclei
pub(super) fn nucleosynthesis(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    let state = &mut *ctx.state;
    if state.particles.is_empty() {
        return Ok(StageOutcome::skipped("no particles to bind"));
    }
    for (element, fraction) in PRIMORDIAL_ABUNDANCES {
        state.atoms.insert(element.to_string(), fraction);
    }
    state.temperature = 1e9;
    state.raise_complexity(ComplexityLevel::Atoms)?;
    state.record_event("Nucleosynthesis");
    Ok(StageOutcome::Completed)
}
