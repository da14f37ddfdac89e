//! Precedence Resolver
//!
//! Domains are ranked by precedence class. The lower class wins outright.
//! On a class tie two numbers resolve to the smaller, more conservative value;
//! anything else keeps the earlier-registered side.

use aeon_core::{ConflictReason, ConflictRecord, Domain, LawValue, PrecedenceClass};

/// Relative difference above which two numeric answers conflict
pub const CONFLICT_TOLERANCE: f64 = 0.1;

/// Precedence class of a domain. Unlisted domains are emergent.
pub fn precedence_class(domain: Domain) -> PrecedenceClass {
    match domain {
        Domain::Physics | Domain::Stellar | Domain::Chemistry => PrecedenceClass::Fundamental,
        Domain::Ecology => PrecedenceClass::Statistical,
        Domain::Social => PrecedenceClass::Social,
        _ => PrecedenceClass::Emergent,
    }
}

/// Precedence class of a dot-separated rule name
pub fn precedence_of_rule(rule: &str) -> PrecedenceClass {
    precedence_class(Domain::from_rule_name(rule))
}

/// Which argument of [`resolve`] won
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Outcome of a resolution
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub winner: Side,
    pub value: LawValue,
    pub reason: ConflictReason,
}

/// Resolve two answers from different domains.
pub fn resolve(
    domain_a: Domain,
    value_a: &LawValue,
    domain_b: Domain,
    value_b: &LawValue,
) -> Resolution {
    let class_a = precedence_class(domain_a);
    let class_b = precedence_class(domain_b);

    let (winner, reason) = if class_a < class_b {
        (
            Side::A,
            ConflictReason::Precedence {
                winner: class_a,
                loser: class_b,
            },
        )
    } else if class_b < class_a {
        (
            Side::B,
            ConflictReason::Precedence {
                winner: class_b,
                loser: class_a,
            },
        )
    } else {
        match (value_a.as_number(), value_b.as_number()) {
            (Some(a), Some(b)) => {
                let side = if b < a { Side::B } else { Side::A };
                (side, ConflictReason::ConservativeMinimum)
            }
            _ => (Side::A, ConflictReason::FirstRegistered),
        }
    };

    let value = match winner {
        Side::A => value_a.clone(),
        Side::B => value_b.clone(),
    };

    Resolution {
        winner,
        value,
        reason,
    }
}

/// Do two answers disagree?
///
/// Numbers conflict when they differ by more than [`CONFLICT_TOLERANCE`] of
/// their mean magnitude. Two zeros never conflict; a zero against a non-zero
/// always does. Everything else conflicts when unequal.
pub fn values_conflict(a: &LawValue, b: &LawValue) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => {
            let scale = (x.abs() + y.abs()) / 2.0;
            if scale == 0.0 {
                return false;
            }
            (x - y).abs() > CONFLICT_TOLERANCE * scale
        }
        _ => a != b,
    }
}

/// Resolve and package a conflict for the audit trail.
pub fn conflict_record(
    domain_a: Domain,
    value_a: &LawValue,
    domain_b: Domain,
    value_b: &LawValue,
) -> ConflictRecord {
    let resolution = resolve(domain_a, value_a, domain_b, value_b);
    ConflictRecord {
        domain_a,
        value_a: value_a.clone(),
        domain_b,
        value_b: value_b.clone(),
        winner: match resolution.winner {
            Side::A => domain_a,
            Side::B => domain_b,
        },
        winning_value: resolution.value,
        reason: resolution.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_table() {
        assert_eq!(precedence_class(Domain::Physics), PrecedenceClass::Fundamental);
        assert_eq!(precedence_class(Domain::Stellar), PrecedenceClass::Fundamental);
        assert_eq!(precedence_class(Domain::Chemistry), PrecedenceClass::Fundamental);
        assert_eq!(precedence_class(Domain::Biology), PrecedenceClass::Emergent);
        assert_eq!(precedence_class(Domain::Cognitive), PrecedenceClass::Emergent);
        assert_eq!(precedence_class(Domain::Ecology), PrecedenceClass::Statistical);
        assert_eq!(precedence_class(Domain::Social), PrecedenceClass::Social);
        assert_eq!(precedence_of_rule("mystery.rule"), PrecedenceClass::Emergent);
    }

    #[test]
    fn test_fundamental_beats_social() {
        let r = resolve(
            Domain::Social,
            &LawValue::Number(1.0),
            Domain::Physics,
            &LawValue::Number(1e9),
        );
        assert_eq!(r.winner, Side::B);
        assert_eq!(r.value, LawValue::Number(1e9));
        assert!(matches!(r.reason, ConflictReason::Precedence { .. }));
    }

    #[test]
    fn test_class_tie_takes_minimum() {
        let r = resolve(
            Domain::Physics,
            &LawValue::Number(100.0),
            Domain::Stellar,
            &LawValue::Number(50.0),
        );
        assert_eq!(r.value, LawValue::Number(50.0));
        assert_eq!(r.reason, ConflictReason::ConservativeMinimum);
    }

    #[test]
    fn test_non_numeric_tie_keeps_first() {
        let r = resolve(
            Domain::Biology,
            &LawValue::Flag(true),
            Domain::Cognitive,
            &LawValue::Flag(false),
        );
        assert_eq!(r.winner, Side::A);
        assert_eq!(r.reason, ConflictReason::FirstRegistered);
    }

    #[test]
    fn test_conflict_threshold() {
        let n = LawValue::Number;
        assert!(!values_conflict(&n(100.0), &n(105.0)));
        assert!(values_conflict(&n(100.0), &n(120.0)));
        assert!(!values_conflict(&n(0.0), &n(0.0)));
        assert!(values_conflict(&n(0.0), &n(1e-9)));
        assert!(values_conflict(&n(-1.0), &n(1.0)));
        assert!(!values_conflict(&LawValue::Flag(true), &LawValue::Flag(true)));
        assert!(values_conflict(&LawValue::Flag(true), &LawValue::Null));
    }

    #[test]
    fn test_conflict_record_names_winner() {
        let rec = conflict_record(
            Domain::Biology,
            &LawValue::Number(1e5),
            Domain::Physics,
            &LawValue::Number(5e4),
        );
        assert_eq!(rec.winner, Domain::Physics);
        assert_eq!(rec.winning_value, LawValue::Number(5e4));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn domain() -> impl Strategy<Value = Domain> {
        prop_oneof![
            Just(Domain::Physics),
            Just(Domain::Stellar),
            Just(Domain::Biology),
            Just(Domain::Ecology),
            Just(Domain::Social),
            Just(Domain::Planetary),
        ]
    }

    proptest! {
        #[test]
        fn prop_conflict_is_symmetric(a in -1e12f64..1e12, b in -1e12f64..1e12) {
            let (a, b) = (LawValue::Number(a), LawValue::Number(b));
            prop_assert_eq!(values_conflict(&a, &b), values_conflict(&b, &a));
        }

        #[test]
        fn prop_winner_is_one_side(
            da in domain(),
            db in domain(),
            a in -1e6f64..1e6,
            b in -1e6f64..1e6,
        ) {
            let (va, vb) = (LawValue::Number(a), LawValue::Number(b));
            let record = conflict_record(da, &va, db, &vb);
            prop_assert!(record.winner == da || record.winner == db);
            prop_assert!(record.winning_value == va || record.winning_value == vb);
        }
    }
}
