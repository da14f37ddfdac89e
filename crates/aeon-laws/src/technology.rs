//! Technology and agriculture

/// Smallest body that can knap and carry stone tools, kg
pub const TOOL_USER_MIN_MASS: f64 = 10.0;
/// Farming multiplies foraging carrying capacity by roughly this much
pub const AGRICULTURAL_MULTIPLIER: f64 = 10.0;

/// Can a lineage of this size develop tool use?
pub fn tool_use_viable(body_mass: f64, has_society: bool) -> bool {
    has_society && body_mass > TOOL_USER_MIN_MASS
}

/// Fraction of farmed production beyond subsistence, in [0, 1]
pub fn agricultural_surplus(population: f64, foraging_capacity: f64) -> f64 {
    let farmed = foraging_capacity * AGRICULTURAL_MULTIPLIER;
    if farmed <= 0.0 {
        return 0.0;
    }
    ((farmed - population) / farmed).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_use() {
        assert!(tool_use_viable(60.0, true));
        assert!(!tool_use_viable(60.0, false));
        assert!(!tool_use_viable(5.0, true));
    }

    #[test]
    fn test_surplus() {
        assert!((agricultural_surplus(500.0, 100.0) - 0.5).abs() < 1e-12);
        assert_eq!(agricultural_surplus(5000.0, 100.0), 0.0);
        assert_eq!(agricultural_surplus(10.0, 0.0), 0.0);
    }
}
