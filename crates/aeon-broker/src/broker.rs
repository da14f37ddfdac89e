//! Law broker
//!
//! `ask` runs, in order:
//! 1. Thermodynamic veto for tagged actions (no regulator is consulted)
//! 2. Gated fan-out: each regulator names its law, the gate checks it
//! 3. Zero capable regulators: unroutable null
//! 4. One: its answer as given
//! 5. Several: pairwise conflicts resolved by precedence, highest confidence
//!    returned with the full conflict list
//!
//! Non-finite numbers are replaced with null before anything else sees them.

use std::sync::Arc;

use aeon_core::{ConflictRecord, DecisionEvent, DecisionSink, Domain, LawId, LawRequest, LawResponse};
use aeon_laws::{
    can_apply_at, classify, conflict_record, thermo, values_conflict, LawRegistry, Verdict,
};
use futures::future::join_all;

use crate::{
    BiologyRegulator, DomainRegulator, EcologyRegulator, EntropyRegulator, PhysicsRegulator,
    PlanetaryRegulator, SocialRegulator, TechnologyRegulator,
};

/// Single entry point for law questions.
pub struct Broker {
    registry: Arc<LawRegistry>,
    regulators: Vec<Arc<dyn DomainRegulator>>,
    sink: Arc<dyn DecisionSink>,
}

impl Broker {
    /// Broker with only the entropy regulator, which is always registered first
    pub fn new(registry: Arc<LawRegistry>, sink: Arc<dyn DecisionSink>) -> Self {
        let entropy: Arc<dyn DomainRegulator> = Arc::new(EntropyRegulator::new(registry.clone()));
        Broker {
            registry,
            regulators: vec![entropy],
            sink,
        }
    }

    /// Broker with all reference regulators over the standard registry
    pub fn standard(sink: Arc<dyn DecisionSink>) -> Self {
        let registry = Arc::new(LawRegistry::standard());
        let mut broker = Self::new(registry.clone(), sink);
        broker.register(Arc::new(PhysicsRegulator::new(registry.clone())));
        broker.register(Arc::new(BiologyRegulator::new(registry.clone())));
        broker.register(Arc::new(EcologyRegulator::new(registry.clone())));
        broker.register(Arc::new(SocialRegulator::new(registry.clone())));
        broker.register(Arc::new(TechnologyRegulator::new(registry.clone())));
        broker.register(Arc::new(PlanetaryRegulator::new(registry)));
        broker
    }

    /// Append a regulator. Registration order breaks confidence ties.
    pub fn register(&mut self, regulator: Arc<dyn DomainRegulator>) {
        self.regulators.push(regulator);
    }

    pub fn registry(&self) -> &Arc<LawRegistry> {
        &self.registry
    }

    pub fn sink(&self) -> Arc<dyn DecisionSink> {
        self.sink.clone()
    }

    /// Authorities in registration order
    pub fn authorities(&self) -> Vec<Domain> {
        self.regulators.iter().map(|r| r.authority()).collect()
    }

    /// Every governed rule name with its authority
    pub fn governed_laws(&self) -> Vec<(Domain, &'static str)> {
        self.regulators
            .iter()
            .flat_map(|r| {
                let authority = r.authority();
                r.governed_laws().into_iter().map(move |l| (authority, l))
            })
            .collect()
    }

    /// Answer one request.
    pub async fn ask(&self, request: &LawRequest) -> LawResponse {
        let state = &request.state;
        let action = request.action.name().to_string();

        if let Some(energetics) = request.action.energetics() {
            match thermo::veto(&energetics, state.temperature) {
                Verdict::Allowed => {}
                Verdict::Vetoed(delta_g) => {
                    self.sink.record(DecisionEvent::ThermodynamicVeto {
                        action,
                        delta_g,
                        temperature: state.temperature,
                    });
                    return LawResponse::vetoed(LawId::ReactionSpontaneity.precedent());
                }
                Verdict::Invalid => {
                    self.sink.record(DecisionEvent::NumericInvalid {
                        authority: Domain::Entropy,
                        action,
                    });
                    return LawResponse::empty(Domain::Entropy).into_numeric_invalid();
                }
            }
        }

        let complexity = classify(state);
        let mut capable = Vec::new();
        for regulator in &self.regulators {
            let Some(law) = regulator.law_for(request) else {
                continue;
            };
            let allowed = can_apply_at(law.rule_name(), complexity, state);
            self.sink.record(DecisionEvent::GateCheck {
                rule: law.rule_name().to_string(),
                complexity,
                allowed,
            });
            if allowed {
                capable.push(regulator.clone());
            }
        }

        if capable.is_empty() {
            self.sink.record(DecisionEvent::Unroutable {
                domain: request.domain(),
                action,
            });
            return LawResponse::unroutable();
        }

        let responses: Vec<LawResponse> = join_all(capable.iter().map(|r| r.process(request)))
            .await
            .into_iter()
            .map(|r| self.suppress_non_finite(r, &action))
            .collect();
        let authorities: Vec<Domain> = responses.iter().map(|r| r.authority).collect();

        let conflicts = self.detect_conflicts(&responses);

        // Highest confidence wins; the earliest registered wins a tie
        let mut best = 0;
        for (i, r) in responses.iter().enumerate() {
            if r.confidence > responses[best].confidence {
                best = i;
            }
        }
        let mut chosen = responses.into_iter().nth(best).unwrap_or_else(LawResponse::unroutable);
        chosen.conflicts = conflicts;

        self.sink.record(DecisionEvent::Routed {
            action,
            authorities,
            chosen: chosen.authority,
        });
        chosen
    }

    /// Answer several independent requests concurrently, preserving order.
    pub async fn ask_batch(&self, requests: &[LawRequest]) -> Vec<LawResponse> {
        join_all(requests.iter().map(|r| self.ask(r))).await
    }

    fn suppress_non_finite(&self, response: LawResponse, action: &str) -> LawResponse {
        if !response.value.is_invalid_number() {
            return response;
        }
        self.sink.record(DecisionEvent::NumericInvalid {
            authority: response.authority,
            action: action.to_string(),
        });
        response.into_numeric_invalid()
    }

    /// Pairwise conflicts between answers. A null answer disagrees with nobody.
    fn detect_conflicts(&self, responses: &[LawResponse]) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();
        for (i, a) in responses.iter().enumerate() {
            for b in &responses[i + 1..] {
                if a.value.is_null() || b.value.is_null() {
                    continue;
                }
                if !values_conflict(&a.value, &b.value) {
                    continue;
                }
                let record = conflict_record(a.authority, &a.value, b.authority, &b.value);
                self.sink
                    .record(DecisionEvent::ConflictResolved(record.clone()));
                conflicts.push(record);
            }
        }
        conflicts
    }
}
