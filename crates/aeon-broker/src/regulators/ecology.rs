//! Ecology regulator: energy budgets and population steps

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

pub const ECOLOGY_CONFIDENCE: f64 = 0.8;

const LAWS: &[LawId] = &[
    LawId::CarryingCapacity,
    LawId::PrimaryProductivity,
    LawId::LogisticStep,
];

pub struct EcologyRegulator {
    registry: Arc<LawRegistry>,
}

impl EcologyRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        EcologyRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for EcologyRegulator {
    fn authority(&self) -> Domain {
        Domain::Ecology
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        match request.action {
            LawAction::CarryingCapacity { .. } => Some(LawId::CarryingCapacity),
            LawAction::PrimaryProductivity { .. } => Some(LawId::PrimaryProductivity),
            LawAction::PopulationGrowth { .. } => Some(LawId::LogisticStep),
            _ => None,
        }
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(
                &self.registry,
                Domain::Ecology,
                ECOLOGY_CONFIDENCE,
                law,
                request,
            ),
            None => LawResponse::empty(Domain::Ecology),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}
