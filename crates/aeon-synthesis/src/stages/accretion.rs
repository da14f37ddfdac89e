//! Planetary accretion around a newly formed star

use std::collections::BTreeMap;

use aeon_core::{AeonResult, LawAction, UniverseState};
use aeon_laws::constants::{EARTH_MASS, JUPITER_EARTH_MASSES};
use aeon_laws::stellar::{IMF_MAX_MASS, IMF_MIN_MASS, SALPETER_ALPHA};

use super::{StageContext, StageOutcome};
use crate::{Layer, Planet, PlanetKind, Star};

/// Interstellar medium temperature, K
pub const DISK_TEMPERATURE: f64 = 10.0;
/// Mean planet count beyond the guaranteed first
pub const EXTRA_PLANETS_MEAN: f64 = 1.5;
/// Innermost orbit, AU
pub const INNER_ORBIT: f64 = 0.1;
/// Orbits span 10^0 .. 10^2.7 times the innermost orbit
pub const ORBIT_DECADES: f64 = 2.7;

fn layer(parts: &[(&str, f64)]) -> Layer {
    parts.iter().map(|(e, f)| (e.to_string(), *f)).collect()
}

fn rocky_composition() -> BTreeMap<String, Layer> {
    let mut composition = BTreeMap::new();
    composition.insert("core".to_string(), layer(&[("Fe", 0.88), ("Ni", 0.06), ("S", 0.04)]));
    composition.insert(
        "mantle".to_string(),
        layer(&[("O", 0.44), ("Si", 0.21), ("Mg", 0.22), ("Fe", 0.06)]),
    );
    composition.insert(
        "crust".to_string(),
        layer(&[("O", 0.46), ("Si", 0.28), ("Al", 0.08), ("Fe", 0.05), ("Ca", 0.04)]),
    );
    composition
}

fn giant_composition() -> BTreeMap<String, Layer> {
    let mut composition = BTreeMap::new();
    composition.insert("envelope".to_string(), layer(&[("H", 0.75), ("He", 0.24)]));
    composition
}

/// Form the system's star from the IMF, asking the broker for its properties
async fn form_star(ctx: &mut StageContext<'_>, disk: &UniverseState) -> Option<Star> {
    let mass = ctx.rng.power_law(SALPETER_ALPHA, IMF_MIN_MASS, IMF_MAX_MASS);
    let luminosity = ctx
        .number_in(LawAction::StellarLuminosity { mass }, disk.clone())
        .await?;
    let temperature = ctx
        .number_in(LawAction::StellarTemperature { mass }, disk.clone())
        .await?;
    let spectral_class = ctx
        .ask_in(LawAction::SpectralClass { temperature }, disk.clone())
        .await
        .value
        .as_text()
        .unwrap_or("?")
        .to_string();
    Some(Star {
        mass,
        luminosity,
        temperature,
        spectral_class,
        metallicity: ctx.state.metallicity(),
    })
}

pub(super) async fn run(ctx: &mut StageContext<'_>) -> AeonResult<StageOutcome> {
    if ctx.state.molecules.is_empty() {
        return Ok(StageOutcome::skipped("no molecular cloud to accrete"));
    }
    // Questions are asked of the cold disk; the state cools only if planets form
    let disk = ctx.state.universe_state().with_temperature(DISK_TEMPERATURE);

    let star = match ctx.state.stars.first() {
        Some(star) => star.clone(),
        None => match form_star(ctx, &disk).await {
            Some(star) => star,
            None => return Ok(StageOutcome::skipped("star properties unavailable")),
        },
    };

    let Some(frost_line) = ctx
        .number_in(
            LawAction::FrostLine {
                luminosity: star.luminosity,
            },
            disk.clone(),
        )
        .await
    else {
        return Ok(StageOutcome::skipped("frost line unavailable"));
    };

    let count = ctx.rng.poisson(EXTRA_PLANETS_MEAN) + 1;
    let mut planets = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let orbit = INNER_ORBIT * 10f64.powf(ctx.rng.uniform(0.0, ORBIT_DECADES));
        let mass = ctx.rng.log_normal(0.0, 2.0) * JUPITER_EARTH_MASSES * EARTH_MASS;
        let rocky = orbit < frost_line;
        let habitable = ctx
            .allows_in(
                LawAction::HabitableZone {
                    luminosity: star.luminosity,
                    orbit,
                },
                disk.clone(),
            )
            .await;
        planets.push(Planet {
            mass,
            orbit,
            kind: if rocky {
                PlanetKind::Terrestrial
            } else {
                PlanetKind::GasGiant
            },
            composition: if rocky {
                rocky_composition()
            } else {
                giant_composition()
            },
            habitable,
        });
    }

    let state = &mut *ctx.state;
    state.temperature = DISK_TEMPERATURE;
    if state.stars.is_empty() {
        state.stars.push(star);
        state.system_formed_at = Some(state.t);
    }
    state.planets.extend(planets);
    let label = format!("{} Planets Formed", state.planets.len());
    state.record_event(label);
    Ok(StageOutcome::Completed)
}
