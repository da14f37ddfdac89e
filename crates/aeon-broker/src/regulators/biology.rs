//! Biology regulator
//!
//! Allometric scaling, habitability and population dynamics. Answers with
//! slightly less confidence than the physical regulators, since the scaling
//! laws are empirical fits.

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

/// Confidence of an empirical biological law
pub const BIOLOGY_CONFIDENCE: f64 = 0.9;

const LAWS: &[LawId] = &[
    LawId::BasalMetabolicRate,
    LawId::MaxLifespan,
    LawId::HomeRange,
    LawId::BrainMass,
    LawId::MaxMassForGravity,
    LawId::SpawnConditions,
    LawId::LogisticAdvance,
    LawId::DefaultGoals,
];

pub struct BiologyRegulator {
    registry: Arc<LawRegistry>,
}

impl BiologyRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        BiologyRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for BiologyRegulator {
    fn authority(&self) -> Domain {
        Domain::Biology
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        use LawAction::*;
        let law = match request.action {
            Metabolism { .. } => LawId::BasalMetabolicRate,
            Lifespan { .. } => LawId::MaxLifespan,
            HomeRange { .. } => LawId::HomeRange,
            BrainMass { .. } => LawId::BrainMass,
            MaxBodyMass { .. } => LawId::MaxMassForGravity,
            SpawnConditions { .. } => LawId::SpawnConditions,
            PopulationGrowth { .. } | AdvancePopulations { .. } => LawId::LogisticAdvance,
            DefaultGoals { .. } => LawId::DefaultGoals,
            _ => return None,
        };
        Some(law)
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(
                &self.registry,
                Domain::Biology,
                BIOLOGY_CONFIDENCE,
                law,
                request,
            ),
            None => LawResponse::empty(Domain::Biology),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{AgentKind, Emergence, LawValue, SimTime, UniverseState};

    fn living() -> UniverseState {
        UniverseState::at(SimTime::from_gyr(10.0))
            .with_temperature(288.0)
            .with_element("C", 0.3)
            .with_emergence(Emergence::Life)
    }

    #[tokio::test]
    async fn test_metabolism_cites_kleiber() {
        let regulator = BiologyRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(LawAction::Metabolism { mass: 1.0 }, living());
        let response = regulator.process(&request).await;
        assert_eq!(response.value, LawValue::Number(70.0));
        assert_eq!(response.confidence, BIOLOGY_CONFIDENCE);
        assert_eq!(
            response.precedents[0],
            "biology.allometry.basalMetabolicRate (Kleiber 1932)"
        );
    }

    #[tokio::test]
    async fn test_default_goals_for_creature() {
        let regulator = BiologyRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(
            LawAction::DefaultGoals {
                agent: AgentKind::Creature,
            },
            living(),
        );
        let response = regulator.process(&request).await;
        assert_eq!(
            response.value,
            LawValue::List(vec![
                "FindFood".into(),
                "AvoidPredator".into(),
                "Rest".into(),
                "Reproduce".into()
            ])
        );
    }

    #[tokio::test]
    async fn test_spawn_conditions_use_classified_state() {
        let regulator = BiologyRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(
            LawAction::SpawnConditions {
                atmosphere: 1.0,
                temperature: 288.0,
            },
            living(),
        );
        assert_eq!(regulator.process(&request).await.value, LawValue::Flag(true));
    }

    #[test]
    fn test_ignores_foreign_actions() {
        let regulator = BiologyRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(LawAction::FrostLine { luminosity: 1.0 }, living());
        assert!(!regulator.can_handle(&request));
    }
}
