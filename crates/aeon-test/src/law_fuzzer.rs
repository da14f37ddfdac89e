//! Law Fuzzer - Random questions against the broker
//!
//! Checks, for every response:
//! - Thermodynamics first: vetoes are exactly the tagged actions with ΔG > 0
//! - Null is not failure: no non-finite number leaves the broker, and
//!   unanswered questions are nulls with the right confidence
//! - Confidence stays in [0, 1]
//! - Every conflict is won by one of its two sides

use std::sync::Arc;

use aeon_broker::{Broker, NullSink};
use aeon_core::invariants::{check_null_is_not_failure, check_thermodynamics_first};
use aeon_core::{
    AgentKind, Diet, Disposition, Domain, Emergence, Energetics, LawAction, LawRequest,
    LawResponse, SimTime, UniverseState,
};
use aeon_laws::gibbs_free_energy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fuzzer configuration
#[derive(Clone, Debug)]
pub struct FuzzerConfig {
    /// Requests to generate
    pub cases: usize,
    /// Probability that a parameter is zero, negative or huge
    pub hostile_prob: f64,
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        FuzzerConfig {
            cases: 2_000,
            hostile_prob: 0.1,
            seed: 42,
        }
    }
}

impl FuzzerConfig {
    /// Light fuzzing for quick tests
    pub fn light() -> Self {
        FuzzerConfig {
            cases: 300,
            hostile_prob: 0.1,
            seed: 42,
        }
    }

    /// Mostly degenerate inputs
    pub fn adversarial() -> Self {
        FuzzerConfig {
            cases: 5_000,
            hostile_prob: 0.6,
            seed: 42,
        }
    }
}

/// What a fuzzing run saw
#[derive(Clone, Debug, Default)]
pub struct FuzzResult {
    pub cases: usize,
    pub answered: usize,
    pub vetoed: usize,
    pub unroutable: usize,
    pub numeric_invalid: usize,
    pub conflicted: usize,
    pub violations: Vec<String>,
}

impl FuzzResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Broker fuzzer
pub struct LawFuzzer {
    config: FuzzerConfig,
    rng: StdRng,
    broker: Broker,
}

impl LawFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        LawFuzzer {
            rng: StdRng::seed_from_u64(config.seed),
            broker: Broker::standard(Arc::new(NullSink)),
            config,
        }
    }

    /// Fuzz a caller-built broker
    pub fn with_broker(config: FuzzerConfig, broker: Broker) -> Self {
        LawFuzzer {
            rng: StdRng::seed_from_u64(config.seed),
            broker,
            config,
        }
    }

    fn log_uniform(&mut self, low: f64, high: f64) -> f64 {
        10f64.powf(self.rng.gen_range(low.log10()..high.log10()))
    }

    /// A physical parameter, sometimes deliberately degenerate
    fn param(&mut self, low: f64, high: f64) -> f64 {
        if self.rng.gen_bool(self.config.hostile_prob) {
            match self.rng.gen_range(0..4) {
                0 => 0.0,
                1 => -self.log_uniform(low, high),
                2 => f64::MAX,
                _ => f64::MIN_POSITIVE,
            }
        } else {
            self.log_uniform(low, high)
        }
    }

    fn state(&mut self) -> UniverseState {
        let t = SimTime::from_seconds(self.log_uniform(1e-45, 4.4e17));
        let mut state = UniverseState::at(t)
            .with_temperature(self.log_uniform(1.0, 1e12))
            .with_density(self.log_uniform(1e-25, 1e15))
            .with_element("H", self.rng.gen_range(0.0..0.8))
            .with_element("He", self.rng.gen_range(0.0..0.25));
        for e in [
            Emergence::Life,
            Emergence::Cognition,
            Emergence::Society,
            Emergence::Technology,
        ] {
            if self.rng.gen_bool(0.3) {
                state = state.with_emergence(e);
            }
        }
        state
    }

    fn energetics(&mut self) -> Energetics {
        Energetics::new(
            self.rng.gen_range(-1000.0..1000.0),
            self.rng.gen_range(-1.0..1.0),
        )
    }

    fn action(&mut self) -> LawAction {
        use LawAction::*;
        match self.rng.gen_range(0..22) {
            0 => ChemicalReaction {
                reaction: "fuzz".into(),
                energetics: self.energetics(),
            },
            1 => BiologicalProcess {
                process: "fuzz".into(),
                energetics: self.energetics(),
            },
            2 => GibbsFreeEnergy {
                energetics: self.energetics(),
            },
            3 => JeansInstability {
                cloud_mass: self.param(1e28, 1e36),
                temperature: self.param(1.0, 1e4),
                density: self.param(1e-22, 1e-12),
            },
            4 => EscapeVelocity {
                mass: self.param(1e20, 1e30),
                radius: self.param(1e3, 1e9),
            },
            5 => MaxBodyMass {
                gravity: self.param(0.1, 100.0),
            },
            6 => DegeneracyPressure {
                density: self.param(1e6, 1e18),
            },
            7 => StellarLuminosity {
                mass: self.param(0.08, 100.0),
            },
            8 => StellarLifetime {
                mass: self.param(0.08, 100.0),
            },
            9 => SpectralClass {
                temperature: self.param(2000.0, 50_000.0),
            },
            10 => Metabolism {
                mass: self.param(1e-15, 1e5),
            },
            11 => HomeRange {
                mass: self.param(1e-3, 1e5),
                diet: if self.rng.gen_bool(0.5) {
                    Diet::Herbivore
                } else {
                    Diet::Carnivore
                },
            },
            12 => PopulationGrowth {
                population: self.param(1.0, 1e9),
                capacity: self.param(1.0, 1e9),
                rate: self.param(1e-3, 1.0),
                years: self.param(1.0, 1e4),
            },
            13 => CarryingCapacity {
                productivity: self.param(1.0, 1e4),
                trophic_level: self.rng.gen_range(1..5),
                metabolic_rate: self.param(1e-3, 1e3),
            },
            14 => GroupSize {
                brain_mass: self.param(1e-3, 10.0),
            },
            15 => HierarchyLevels {
                population: self.param(1.0, 1e9),
            },
            16 => ToolUse {
                body_mass: self.param(1e-3, 1e4),
                has_society: self.rng.gen_bool(0.5),
            },
            17 => FrostLine {
                luminosity: self.param(1e-4, 1e6),
            },
            18 => HabitableZone {
                luminosity: self.param(1e-4, 1e6),
                orbit: self.param(0.01, 100.0),
            },
            19 => EquilibriumTemperature {
                luminosity: self.param(1e-4, 1e6),
                orbit: self.param(0.01, 100.0),
                albedo: self.rng.gen_range(0.0..1.0),
            },
            20 => DefaultGoals {
                agent: AgentKind::GasCloud,
            },
            _ => Unrecognized {
                domain: "alchemy".into(),
                action: "transmute".into(),
            },
        }
    }

    fn check(request: &LawRequest, response: &LawResponse, result: &mut FuzzResult) {
        let action = request.action.name();
        let mut violation = |what: String| result.violations.push(format!("{action}: {what}"));

        let delta_g = request
            .action
            .energetics()
            .map(|e| gibbs_free_energy(e.delta_entropy, e.delta_enthalpy, request.state.temperature));
        for check in [
            check_thermodynamics_first(delta_g, response),
            check_null_is_not_failure(response),
        ] {
            if let Err(v) = check {
                violation(v.to_string());
            }
        }

        if !(0.0..=1.0).contains(&response.confidence) {
            violation(format!("confidence {}", response.confidence));
        }
        match response.disposition {
            Disposition::Vetoed
                if response.authority != Domain::Entropy || response.confidence != 1.0 =>
            {
                violation("veto not certain or not from entropy".into());
            }
            Disposition::Unroutable if response.authority != Domain::Unknown => {
                violation("unroutable answer claims an authority".into());
            }
            _ => {}
        }

        if matches!(request.action, LawAction::Unrecognized { .. })
            && response.disposition != Disposition::Unroutable
        {
            violation("unrecognized action was routed".into());
        }

        for conflict in &response.conflicts {
            if conflict.winner != conflict.domain_a && conflict.winner != conflict.domain_b {
                violation(format!("conflict won by outsider {:?}", conflict.winner));
            }
        }
    }

    /// Run the configured number of cases
    pub async fn run(&mut self) -> FuzzResult {
        let mut result = FuzzResult::default();
        for _ in 0..self.config.cases {
            let request = LawRequest::new(self.action(), self.state());
            let response = self.broker.ask(&request).await;

            result.cases += 1;
            match response.disposition {
                Disposition::Answered => result.answered += 1,
                Disposition::Vetoed => result.vetoed += 1,
                Disposition::Unroutable => result.unroutable += 1,
                Disposition::NumericInvalid => result.numeric_invalid += 1,
            }
            if response.has_conflicts() {
                result.conflicted += 1;
            }
            Self::check(&request, &response, &mut result);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{ComplexityLevel, LawValue, PrecedenceClass};
    use aeon_laws::{can_apply, classify, precedence_class, resolve, thermodynamics_allows, Side};
    use proptest::prelude::*;
    use proptest::test_runner::Config as ProptestConfig;

    #[tokio::test]
    async fn test_light_fuzzing() {
        let mut fuzzer = LawFuzzer::new(FuzzerConfig::light());
        let result = fuzzer.run().await;
        assert!(result.is_valid(), "{:?}", result.violations);
        assert_eq!(result.cases, 300);
        assert!(result.unroutable > 0);
        assert!(result.vetoed > 0);
    }

    #[tokio::test]
    async fn test_adversarial_fuzzing() {
        let mut fuzzer = LawFuzzer::new(FuzzerConfig {
            cases: 1_000,
            ..FuzzerConfig::adversarial()
        });
        let result = fuzzer.run().await;
        assert!(result.is_valid(), "{:?}", result.violations);
    }

    #[tokio::test]
    async fn test_non_finite_energetics_keep_invariants() {
        let broker = Broker::standard(Arc::new(NullSink));
        let state = UniverseState::at(SimTime::from_gyr(10.0))
            .with_temperature(300.0)
            .with_element("H", 0.7);
        let mut result = FuzzResult::default();
        for energetics in [Energetics::new(f64::NAN, 0.0), Energetics::new(-10.0, f64::INFINITY)] {
            let request = LawRequest::new(
                LawAction::ChemicalReaction {
                    reaction: "fuzz".into(),
                    energetics,
                },
                state.clone(),
            );
            let response = broker.ask(&request).await;
            assert_eq!(response.disposition, Disposition::NumericInvalid);
            LawFuzzer::check(&request, &response, &mut result);
        }
        assert!(result.is_valid(), "{:?}", result.violations);
    }

    fn flags() -> impl Strategy<Value = [bool; 4]> {
        any::<[bool; 4]>()
    }

    fn with_flags(mut state: UniverseState, flags: [bool; 4]) -> UniverseState {
        let all = [
            Emergence::Life,
            Emergence::Cognition,
            Emergence::Society,
            Emergence::Technology,
        ];
        for (flag, e) in flags.into_iter().zip(all) {
            if flag {
                state = state.with_emergence(e);
            }
        }
        state
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn prop_classify_is_monotonic(
            t1 in -45.0f64..17.6,
            dt in 0.0f64..3.0,
            temperature in 1.0f64..1e5,
            h in 0.0f64..0.8,
            extra in 0.0f64..0.2,
            before in flags(),
            added in flags(),
        ) {
            let t1 = 10f64.powf(t1);
            let t2 = t1 * 10f64.powf(dt);
            let earlier = with_flags(
                UniverseState::at(SimTime::from_seconds(t1))
                    .with_temperature(temperature)
                    .with_element("H", h),
                before,
            );
            let mut later_flags = before;
            for (flag, more) in later_flags.iter_mut().zip(added) {
                *flag |= more;
            }
            let later = with_flags(
                UniverseState::at(SimTime::from_seconds(t2))
                    .with_temperature(temperature)
                    .with_element("H", h)
                    .with_element("He", extra),
                later_flags,
            );
            prop_assert!(classify(&later) >= classify(&earlier));
        }

        #[test]
        fn prop_biology_gated_by_life(rule in "biology\\.[a-z]{1,12}", life in any::<bool>()) {
            let mut state = UniverseState::at(SimTime::from_gyr(10.0))
                .with_temperature(300.0)
                .with_element("H", 0.7);
            if life {
                state = state.with_emergence(Emergence::Life);
            }
            prop_assert_eq!(can_apply(&rule, &state), life);
        }

        #[test]
        fn prop_plain_physics_always_applies(
            rule in "physics\\.(cosmology|mechanics|structure)\\.[a-z]{1,12}",
            t in -50.0f64..17.6,
            temperature in 0.0f64..1e12,
        ) {
            let state = UniverseState::at(SimTime::from_seconds(10f64.powf(t)))
                .with_temperature(temperature);
            prop_assert!(can_apply(&rule, &state));
        }

        #[test]
        fn prop_veto_matches_gibbs_sign(
            ds in -10.0f64..10.0,
            dh in -5000.0f64..5000.0,
            temperature in 0.0f64..1e4,
        ) {
            let allowed = thermodynamics_allows(ds, dh, temperature);
            prop_assert_eq!(allowed, dh - temperature * ds <= 0.0);
        }

        #[test]
        fn prop_fundamental_beats_social(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            let social = LawValue::Number(a);
            let physics = LawValue::Number(b);
            let resolution = resolve(Domain::Social, &social, Domain::Physics, &physics);
            prop_assert_eq!(resolution.winner, Side::B);
            prop_assert_eq!(resolution.value, physics);
        }

        #[test]
        fn prop_fundamental_tie_takes_minimum(a in 1e-3f64..1e9, factor in 1.2f64..100.0) {
            let b = a * factor;
            let resolution = resolve(
                Domain::Stellar,
                &LawValue::Number(b),
                Domain::Physics,
                &LawValue::Number(a),
            );
            prop_assert_eq!(resolution.value, LawValue::Number(a));
        }
    }

    #[test]
    fn test_thermodynamic_boundary() {
        assert!(thermodynamics_allows(100.0, 0.0, 298.0));
        assert!(thermodynamics_allows(-10.0, -5000.0, 298.0));
        assert!(!thermodynamics_allows(-10.0, 1000.0, 298.0));
        assert!(thermodynamics_allows(0.0, 0.0, 298.0));
    }

    #[test]
    fn test_gate_table() {
        let atoms = UniverseState::at(SimTime::from_gyr(1.0))
            .with_temperature(20_000.0)
            .with_element("H", 0.75);
        assert_eq!(classify(&atoms), ComplexityLevel::Atoms);
        assert!(!can_apply("biology.x", &atoms));
        assert!(can_apply("physics.x", &atoms));

        let life = atoms.clone().with_emergence(Emergence::Life);
        assert!(can_apply("biology.x", &life));

        assert!(!can_apply("physics.quantum.degeneracy", &atoms));
        assert_eq!(precedence_class(Domain::Physics), PrecedenceClass::Fundamental);
    }
}
