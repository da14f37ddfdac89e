//! Technology regulator

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

pub const TECHNOLOGY_CONFIDENCE: f64 = 0.6;

const LAWS: &[LawId] = &[LawId::ToolUseViable, LawId::AgriculturalSurplus];

pub struct TechnologyRegulator {
    registry: Arc<LawRegistry>,
}

impl TechnologyRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        TechnologyRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for TechnologyRegulator {
    fn authority(&self) -> Domain {
        Domain::Technology
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        match request.action {
            LawAction::ToolUse { .. } => Some(LawId::ToolUseViable),
            LawAction::AgriculturalSurplus { .. } => Some(LawId::AgriculturalSurplus),
            _ => None,
        }
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(
                &self.registry,
                Domain::Technology,
                TECHNOLOGY_CONFIDENCE,
                law,
                request,
            ),
            None => LawResponse::empty(Domain::Technology),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}
