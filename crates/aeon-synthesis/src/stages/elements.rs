//! Stellar nucleosynthesis
//!
//! The expected number of massive stars comes from the closed-form IMF
//! fraction; one Poisson draw decides how many this region actually got.
//! No per-star sampling.

use aeon_core::{AeonResult, LawAction};
use aeon_laws::stellar::SUPERNOVA_MIN_MASS;

use super::{StageContext, StageOutcome};

/// Supernova yields per unit enrichment (mass fractions)
pub const SUPERNOVA_YIELDS: [(&str, f64); 8] = [
    ("C", 0.0024),
    ("N", 0.0007),
    ("O", 0.0057),
    ("Ne", 0.0012),
    ("Mg", 0.0006),
    ("Si", 0.0007),
    ("S", 0.0004),
    ("Fe", 0.0011),
];

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    if !ctx.state.has_atom("H") {
        return Ok(StageOutcome::skipped("no hydrogen to fuse"));
    }

    // Massive stars must have died by now to have enriched anything
    let epoch_years = ctx.state.t.as_years();
    let lifetime = ctx
        .number(LawAction::StellarLifetime {
            mass: SUPERNOVA_MIN_MASS,
        })
        .await;
    match lifetime {
        Some(years) if years < epoch_years => {}
        Some(_) => return Ok(StageOutcome::skipped("massive stars still burning")),
        None => return Ok(StageOutcome::skipped("stellar lifetime unknown")),
    }

    let Some(fraction) = ctx
        .number(LawAction::MassiveStarFraction {
            threshold_mass: SUPERNOVA_MIN_MASS,
        })
        .await
    else {
        return Ok(StageOutcome::skipped("initial mass function unknown"));
    };

    let stars = ctx.config.estimated_stars;
    let expected = stars * fraction;
    let supernovae = ctx.rng.poisson(expected);
    tracing::debug!(expected, supernovae, "massive star draw");

    // A region without massive stars stays primordial
    if supernovae == 0 {
        return Ok(StageOutcome::skipped("no massive stars formed"));
    }

    let enrichment = supernovae as f64 / stars;
    let state = &mut *ctx.state;
    for (element, yield_fraction) in SUPERNOVA_YIELDS {
        *state.atoms.entry(element.to_string()).or_insert(0.0) += yield_fraction * enrichment;
    }
    state.record_event(format!("{supernovae} Supernovae"));
    Ok(StageOutcome::Completed)
}
