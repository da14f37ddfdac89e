//! AEON Hard Invariants
//!
//! These are laws of the engine, not guidelines.
//!
//! # The Five Invariants
//!
//! 1. **Complexity Only Rises** - Forward evolution never lowers the level
//! 2. **Emergence Is Sticky** - A raised flag stays raised
//! 3. **Thermodynamics First** - A process with ΔG > 0 is never answered
//! 4. **Null Is Not Failure** - Unanswerable questions yield null, never an error
//! 5. **Same Seed, Same Universe** - Synthesis is a pure function of its seed
//!
//! # Usage
//!
//! ```rust
//! use aeon_core::invariants::{check_complexity_transition, Invariant};
//! use aeon_core::ComplexityLevel;
//!
//! assert!(check_complexity_transition(ComplexityLevel::Atoms, ComplexityLevel::Life).is_ok());
//! let err = check_complexity_transition(ComplexityLevel::Life, ComplexityLevel::Atoms).unwrap_err();
//! assert_eq!(err.invariant, Invariant::ComplexityOnlyRises);
//! ```

use std::fmt;

use crate::{AeonError, ComplexityLevel, Disposition, EmergenceFlags, LawResponse, LawValue};

/// The five hard invariants of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Invariant {
    /// INV-1: Complexity Only Rises
    ///
    /// Between forward stages the complexity level never decreases.
    /// The only exception is an explicit terminal regression.
    ComplexityOnlyRises = 1,

    /// INV-2: Emergence Is Sticky
    ///
    /// Life, cognition, society and technology flags are never cleared.
    EmergenceIsSticky = 2,

    /// INV-3: Thermodynamics First
    ///
    /// Tagged actions are checked against ΔG = ΔH − TΔS before any
    /// regulator sees them.
    ThermodynamicsFirst = 3,

    /// INV-4: Null Is Not Failure
    ///
    /// Unroutable, vetoed and non-finite answers come back as null values
    /// with a disposition, never as errors.
    NullIsNotFailure = 4,

    /// INV-5: Same Seed, Same Universe
    ///
    /// All randomness comes from the injected seeded source.
    SameSeedSameUniverse = 5,
}

impl Invariant {
    /// Get the invariant code (e.g., "INV-1")
    pub fn code(&self) -> &'static str {
        match self {
            Invariant::ComplexityOnlyRises => "INV-1",
            Invariant::EmergenceIsSticky => "INV-2",
            Invariant::ThermodynamicsFirst => "INV-3",
            Invariant::NullIsNotFailure => "INV-4",
            Invariant::SameSeedSameUniverse => "INV-5",
        }
    }

    /// Get the short name of the invariant
    pub fn name(&self) -> &'static str {
        match self {
            Invariant::ComplexityOnlyRises => "Complexity Only Rises",
            Invariant::EmergenceIsSticky => "Emergence Is Sticky",
            Invariant::ThermodynamicsFirst => "Thermodynamics First",
            Invariant::NullIsNotFailure => "Null Is Not Failure",
            Invariant::SameSeedSameUniverse => "Same Seed, Same Universe",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.name())
    }
}

/// Invariant violation error
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub invariant: Invariant,
    pub context: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AEON Invariant Violation: {} - {}",
            self.invariant, self.context
        )
    }
}

impl std::error::Error for InvariantViolation {}

/// Check a forward complexity transition.
pub fn check_complexity_transition(
    from: ComplexityLevel,
    to: ComplexityLevel,
) -> Result<(), InvariantViolation> {
    if to < from {
        return Err(InvariantViolation {
            invariant: Invariant::ComplexityOnlyRises,
            context: format!("{from} -> {to}"),
        });
    }
    Ok(())
}

/// Check that no emergence flag was cleared.
pub fn check_emergence_transition(
    before: &EmergenceFlags,
    after: &EmergenceFlags,
) -> Result<(), InvariantViolation> {
    if !before.is_subset_of(after) {
        return Err(InvariantViolation {
            invariant: Invariant::EmergenceIsSticky,
            context: format!("{before:?} -> {after:?}"),
        });
    }
    Ok(())
}

impl From<InvariantViolation> for AeonError {
    fn from(v: InvariantViolation) -> Self {
        AeonError::InvalidState(v.to_string())
    }
}

/// A tagged action with a positive ΔG must come back vetoed, and nothing
/// else may.
///
/// `delta_g` is the request's ΔG at the state temperature, `None` for
/// untagged actions.
pub fn check_thermodynamics_first(
    delta_g: Option<f64>,
    response: &LawResponse,
) -> Result<(), InvariantViolation> {
    let forbidden = matches!(delta_g, Some(g) if g.is_finite() && g > 0.0);
    if forbidden != response.is_vetoed() {
        return Err(InvariantViolation {
            invariant: Invariant::ThermodynamicsFirst,
            context: format!("ΔG {delta_g:?} answered as {:?}", response.disposition),
        });
    }
    Ok(())
}

/// Unanswered questions are null values with a disposition. Only a veto is
/// certain; unroutable and non-finite answers carry zero confidence.
pub fn check_null_is_not_failure(response: &LawResponse) -> Result<(), InvariantViolation> {
    let fail = |context: String| {
        Err(InvariantViolation {
            invariant: Invariant::NullIsNotFailure,
            context,
        })
    };
    if let LawValue::Number(n) = response.value {
        if !n.is_finite() {
            return fail(format!("non-finite answer {n}"));
        }
    }
    match response.disposition {
        Disposition::Answered => Ok(()),
        d if !response.value.is_null() => fail(format!("{d:?} kept value {:?}", response.value)),
        Disposition::Unroutable | Disposition::NumericInvalid if response.confidence != 0.0 => {
            fail(format!("{:?} with confidence {}", response.disposition, response.confidence))
        }
        _ => Ok(()),
    }
}

/// Two runs from the same seed must agree.
pub fn check_same_universe<T: PartialEq>(
    seed: u64,
    first: &T,
    replay: &T,
) -> Result<(), InvariantViolation> {
    if first != replay {
        return Err(InvariantViolation {
            invariant: Invariant::SameSeedSameUniverse,
            context: format!("seed {seed} diverged on replay"),
        });
    }
    Ok(())
}
