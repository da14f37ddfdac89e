//! Social scaling laws: cognitive limits on group size and organisation

/// Stable relationships one brain can track
pub const DUNBAR_NUMBER: f64 = 150.0;
/// Nested Dunbar layers
pub const DUNBAR_LAYERS: [f64; 6] = [5.0, 15.0, 50.0, 150.0, 500.0, 1500.0];
/// Individuals per kg of brain in the social brain fit
const GROUP_SIZE_PER_BRAIN_KG: f64 = 100.0;

/// Service's political typology
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocietyType {
    Band,
    Tribe,
    Chiefdom,
    State,
}

impl SocietyType {
    pub fn as_str(self) -> &'static str {
        match self {
            SocietyType::Band => "band",
            SocietyType::Tribe => "tribe",
            SocietyType::Chiefdom => "chiefdom",
            SocietyType::State => "state",
        }
    }

    /// How decisions are made
    pub fn decision_making(self) -> &'static str {
        match self {
            SocietyType::Band => "consensus",
            SocietyType::Tribe => "council",
            SocietyType::Chiefdom => "chiefly-decree",
            SocietyType::State => "bureaucratic",
        }
    }
}

/// Cohesive group size a brain of this mass supports, capped at Dunbar's number
pub fn social_brain_group_size(brain_mass: f64) -> f64 {
    (brain_mass * GROUP_SIZE_PER_BRAIN_KG).floor().min(DUNBAR_NUMBER).max(0.0)
}

/// Levels of decision hierarchy under scalar stress
pub fn hierarchy_levels(population: f64) -> u32 {
    if population < 50.0 {
        0
    } else if population < 150.0 {
        1
    } else if population < 500.0 {
        2
    } else if population < 5000.0 {
        3
    } else {
        3 + (population / 5000.0).log2().floor() as u32
    }
}

/// Size of the Dunbar layer at `level`
pub fn group_size_by_level(level: usize) -> f64 {
    DUNBAR_LAYERS[level.min(DUNBAR_LAYERS.len() - 1)]
}

/// Can a group of this size decide by consensus?
pub fn consensus_viable(group_size: f64) -> bool {
    group_size < DUNBAR_NUMBER
}

/// Classify a society by population, density (people/km²) and surplus fraction
pub fn society_type(population: f64, density: f64, surplus: f64) -> SocietyType {
    if population < 50.0 && density < 0.1 {
        SocietyType::Band
    } else if population < 500.0 && surplus < 0.2 {
        SocietyType::Tribe
    } else if population < 5000.0 && surplus > 0.2 {
        SocietyType::Chiefdom
    } else {
        SocietyType::State
    }
}
