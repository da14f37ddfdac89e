//! Law registry
//!
//! Maps every [`LawId`] to the function computing it. A law function reads
//! the typed action it expects and returns [`LawValue::Null`] for any other
//! action, so a regulator asking the wrong law gets "not applicable" rather
//! than a failure.

use std::collections::HashMap;

use aeon_core::{LawAction, LawId, LawRequest, LawValue};

use crate::{biology, classify, ecology, physics, planetary, social, stellar, technology, thermo};

/// A law evaluated against a request
pub type LawFn = fn(&LawRequest) -> LawValue;

/// Registry of law functions, populated at startup.
pub struct LawRegistry {
    laws: HashMap<LawId, LawFn>,
}

impl LawRegistry {
    /// Empty registry
    pub fn new() -> Self {
        LawRegistry {
            laws: HashMap::new(),
        }
    }

    /// Registry holding every built-in law
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for id in LawId::ALL {
            registry.register(id, builtin(id));
        }
        registry
    }

    /// Register or replace a law
    pub fn register(&mut self, id: LawId, law: LawFn) {
        self.laws.insert(id, law);
    }

    pub fn contains(&self, id: LawId) -> bool {
        self.laws.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    /// Evaluate a law. An unregistered law yields null.
    pub fn evaluate(&self, id: LawId, request: &LawRequest) -> LawValue {
        match self.laws.get(&id) {
            Some(law) => law(request),
            None => LawValue::Null,
        }
    }
}

/// Same as [`LawRegistry::new`]: empty. Use [`LawRegistry::standard`] for the built-in table.
impl Default for LawRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One law function per action pattern. The `name, state;` form binds the
/// request's universe snapshot under the given identifier.
macro_rules! law {
    ($name:ident, $pat:pat => $body:expr) => {
        fn $name(req: &LawRequest) -> LawValue {
            match &req.action {
                $pat => LawValue::from($body),
                _ => LawValue::Null,
            }
        }
    };
    ($name:ident, $st:ident; $pat:pat => $body:expr) => {
        fn $name(req: &LawRequest) -> LawValue {
            let $st = &req.state;
            match &req.action {
                $pat => LawValue::from($body),
                _ => LawValue::Null,
            }
        }
    };
}

law!(gibbs, state; LawAction::GibbsFreeEnergy { energetics } =>
    thermo::gibbs_free_energy(energetics.delta_entropy, energetics.delta_enthalpy, state.temperature));
law!(spontaneity, state;
    LawAction::ChemicalReaction { energetics, .. } | LawAction::BiologicalProcess { energetics, .. } =>
    thermo::thermodynamics_allows(energetics.delta_entropy, energetics.delta_enthalpy, state.temperature));

law!(jeans, LawAction::JeansInstability { cloud_mass, temperature, density } =>
    physics::is_jeans_unstable(*cloud_mass, *temperature, *density));
law!(escape_velocity, LawAction::EscapeVelocity { mass, radius } =>
    physics::escape_velocity(*mass, *radius));
law!(surface_gravity, LawAction::SurfaceGravity { mass, radius } =>
    physics::surface_gravity(*mass, *radius));
law!(square_cube, LawAction::MaxBodyMass { gravity } =>
    physics::square_cube_mass_limit(*gravity));
law!(degeneracy, LawAction::DegeneracyPressure { density } =>
    physics::degeneracy_pressure(*density));
law!(pair_production, LawAction::PairProduction { temperature } =>
    physics::pair_production_fraction(*temperature));

law!(luminosity, LawAction::StellarLuminosity { mass } => stellar::luminosity(*mass));
law!(star_temperature, LawAction::StellarTemperature { mass } =>
    stellar::surface_temperature(*mass));
law!(star_lifetime, LawAction::StellarLifetime { mass } => stellar::lifetime_years(*mass));
law!(spectral_class, LawAction::SpectralClass { temperature } =>
    LawValue::Text(stellar::SpectralType::from_temperature(*temperature).as_str().to_string()));
law!(massive_fraction, LawAction::MassiveStarFraction { threshold_mass } =>
    stellar::massive_star_fraction(*threshold_mass));
law!(molecular_stability, LawAction::MolecularStability { temperature } =>
    physics::molecules_stable(*temperature));

law!(metabolism, LawAction::Metabolism { mass } => biology::basal_metabolic_rate(*mass));
law!(lifespan, LawAction::Lifespan { mass } => biology::max_lifespan(*mass));
law!(home_range, LawAction::HomeRange { mass, diet } => biology::home_range(*mass, *diet));
law!(brain_mass, LawAction::BrainMass { body_mass } => biology::brain_mass(*body_mass));
law!(max_mass_for_gravity, LawAction::MaxBodyMass { gravity } =>
    biology::max_mass_for_gravity(*gravity));
law!(spawn_conditions, state; LawAction::SpawnConditions { atmosphere, temperature } =>
    biology::spawn_conditions(classify(state), *atmosphere, *temperature));
law!(default_goals, LawAction::DefaultGoals { agent } =>
    LawValue::List(biology::default_goals(*agent).iter().map(|g| g.to_string()).collect()));

fn logistic_advance(req: &LawRequest) -> LawValue {
    match &req.action {
        LawAction::PopulationGrowth {
            population,
            capacity,
            rate,
            years,
        } => biology::logistic_analytic(*population, *capacity, *rate, *years).into(),
        LawAction::AdvancePopulations {
            populations,
            capacity,
            rate,
            years,
        } => LawValue::Populations(
            populations
                .iter()
                .map(|(species, n)| {
                    (
                        species.clone(),
                        biology::logistic_analytic(*n, *capacity, *rate, *years),
                    )
                })
                .collect(),
        ),
        _ => LawValue::Null,
    }
}

law!(carrying_capacity, LawAction::CarryingCapacity { productivity, trophic_level, metabolic_rate } =>
    ecology::carrying_capacity(*productivity, *trophic_level, *metabolic_rate));
law!(primary_productivity, LawAction::PrimaryProductivity { temperature, rainfall_mm, sunlight } =>
    ecology::primary_productivity(*temperature, *rainfall_mm, *sunlight));
law!(logistic_step, LawAction::PopulationGrowth { population, capacity, rate, years } =>
    ecology::logistic_step(*population, *capacity, *rate, *years));

law!(group_size, LawAction::GroupSize { brain_mass } =>
    social::social_brain_group_size(*brain_mass));
law!(hierarchy_levels, LawAction::HierarchyLevels { population } =>
    social::hierarchy_levels(*population) as f64);
law!(consensus_viable, LawAction::ConsensusViable { group_size } =>
    social::consensus_viable(*group_size));
law!(society_type, LawAction::SocietyType { population, density, surplus } =>
    LawValue::Text(social::society_type(*population, *density, *surplus).as_str().to_string()));

law!(tool_use, LawAction::ToolUse { body_mass, has_society } =>
    technology::tool_use_viable(*body_mass, *has_society));
law!(agricultural_surplus, LawAction::AgriculturalSurplus { population, foraging_capacity } =>
    technology::agricultural_surplus(*population, *foraging_capacity));

law!(frost_line, LawAction::FrostLine { luminosity } => planetary::frost_line(*luminosity));
law!(habitable_zone, LawAction::HabitableZone { luminosity, orbit } =>
    planetary::in_habitable_zone(*luminosity, *orbit));
law!(equilibrium_temperature, LawAction::EquilibriumTemperature { luminosity, orbit, albedo } =>
    planetary::equilibrium_temperature(*luminosity, *orbit, *albedo));

fn builtin(id: LawId) -> LawFn {
    match id {
        LawId::GibbsFreeEnergy => gibbs,
        LawId::ReactionSpontaneity => spontaneity,
        LawId::JeansInstability => jeans,
        LawId::EscapeVelocity => escape_velocity,
        LawId::SurfaceGravity => surface_gravity,
        LawId::SquareCubeMassLimit => square_cube,
        LawId::DegeneracyPressure => degeneracy,
        LawId::PairProduction => pair_production,
        LawId::MainSequenceLuminosity => luminosity,
        LawId::MainSequenceTemperature => star_temperature,
        LawId::MainSequenceLifetime => star_lifetime,
        LawId::SpectralClass => spectral_class,
        LawId::MassiveStarFraction => massive_fraction,
        LawId::MolecularStability => molecular_stability,
        LawId::BasalMetabolicRate => metabolism,
        LawId::MaxLifespan => lifespan,
        LawId::HomeRange => home_range,
        LawId::BrainMass => brain_mass,
        LawId::MaxMassForGravity => max_mass_for_gravity,
        LawId::SpawnConditions => spawn_conditions,
        LawId::LogisticAdvance => logistic_advance,
        LawId::DefaultGoals => default_goals,
        LawId::CarryingCapacity => carrying_capacity,
        LawId::PrimaryProductivity => primary_productivity,
        LawId::LogisticStep => logistic_step,
        LawId::SocialBrainGroupSize => group_size,
        LawId::HierarchyLevels => hierarchy_levels,
        LawId::ConsensusViable => consensus_viable,
        LawId::SocietyType => society_type,
        LawId::ToolUseViable => tool_use,
        LawId::AgriculturalSurplus => agricultural_surplus,
        LawId::FrostLine => frost_line,
        LawId::HabitableZone => habitable_zone,
        LawId::EquilibriumTemperature => equilibrium_temperature,
    }
}
