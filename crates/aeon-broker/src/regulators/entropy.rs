//! Entropy regulator - thermodynamics as the final arbiter
//!
//! The broker's veto has already rejected any tagged process with ΔG > 0, so
//! a tagged action that reaches this regulator is spontaneous.

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

const LAWS: &[LawId] = &[LawId::GibbsFreeEnergy, LawId::ReactionSpontaneity];

pub struct EntropyRegulator {
    registry: Arc<LawRegistry>,
}

impl EntropyRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        EntropyRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for EntropyRegulator {
    fn authority(&self) -> Domain {
        Domain::Entropy
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        match request.action {
            LawAction::GibbsFreeEnergy { .. } => Some(LawId::GibbsFreeEnergy),
            LawAction::ChemicalReaction { .. } | LawAction::BiologicalProcess { .. } => {
                Some(LawId::ReactionSpontaneity)
            }
            _ => None,
        }
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(&self.registry, Domain::Entropy, 1.0, law, request),
            None => LawResponse::empty(Domain::Entropy),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{Energetics, LawValue, UniverseState};

    #[tokio::test]
    async fn test_spontaneous_reaction() {
        let regulator = EntropyRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(
            LawAction::ChemicalReaction {
                reaction: "2H -> H2".into(),
                energetics: Energetics::new(-436.0, -0.099),
            },
            UniverseState::default().with_temperature(100.0),
        );
        assert!(regulator.can_handle(&request));
        let response = regulator.process(&request).await;
        assert_eq!(response.value, LawValue::Flag(true));
        assert_eq!(response.confidence, 1.0);
    }
}
