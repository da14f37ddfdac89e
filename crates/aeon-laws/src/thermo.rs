//! Thermodynamic Veto

use aeon_core::Energetics;

/// Gibbs free energy change, ΔG = ΔH − TΔS
#[inline]
pub fn gibbs_free_energy(delta_entropy: f64, delta_enthalpy: f64, temperature: f64) -> f64 {
    delta_enthalpy - temperature * delta_entropy
}

/// Is a process with this entropy and enthalpy change spontaneous at `temperature`?
///
/// ΔG = 0 is allowed (equilibrium).
pub fn thermodynamics_allows(delta_entropy: f64, delta_enthalpy: f64, temperature: f64) -> bool {
    gibbs_free_energy(delta_entropy, delta_enthalpy, temperature) <= 0.0
}

/// Outcome of the veto for a thermodynamically tagged action
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    Allowed,
    /// Forbidden, with the positive ΔG
    Vetoed(f64),
    /// ΔG is not a finite number; nothing can be said about the process
    Invalid,
}

/// Veto check for tagged energetics.
pub fn veto(energetics: &Energetics, temperature: f64) -> Verdict {
    let delta_g = gibbs_free_energy(
        energetics.delta_entropy,
        energetics.delta_enthalpy,
        temperature,
    );
    if !delta_g.is_finite() {
        Verdict::Invalid
    } else if delta_g <= 0.0 {
        Verdict::Allowed
    } else {
        Verdict::Vetoed(delta_g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_cases() {
        assert!(thermodynamics_allows(100.0, 0.0, 298.0));
        assert!(thermodynamics_allows(-10.0, -5000.0, 298.0));
        assert!(!thermodynamics_allows(-10.0, 1000.0, 298.0));
        assert!(thermodynamics_allows(0.0, 0.0, 298.0));
    }

    #[test]
    fn test_equality_allowed() {
        // ΔH = TΔS exactly
        assert!(thermodynamics_allows(1.0, 298.0, 298.0));
    }

    #[test]
    fn test_veto() {
        let endothermic = Energetics::new(1000.0, -10.0);
        assert_eq!(veto(&endothermic, 298.0), Verdict::Vetoed(3980.0));
        let exothermic = Energetics::new(-5000.0, -10.0);
        assert_eq!(veto(&exothermic, 298.0), Verdict::Allowed);
    }

    #[test]
    fn test_non_finite_is_invalid_not_vetoed() {
        assert_eq!(veto(&Energetics::new(f64::NAN, 0.0), 298.0), Verdict::Invalid);
        assert_eq!(veto(&Energetics::new(-10.0, f64::NAN), 298.0), Verdict::Invalid);
        assert_eq!(veto(&Energetics::new(-10.0, -0.02), f64::NAN), Verdict::Invalid);
        assert_eq!(veto(&Energetics::new(f64::INFINITY, 0.0), 298.0), Verdict::Invalid);
    }
}
