//! Social regulator
//!
//! Group size is governed as a cognitive rule: it is a limit of the social
//! brain and applies as soon as cognition exists, before any society does.

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

pub const SOCIAL_CONFIDENCE: f64 = 0.7;

const LAWS: &[LawId] = &[
    LawId::SocialBrainGroupSize,
    LawId::HierarchyLevels,
    LawId::ConsensusViable,
    LawId::SocietyType,
];

pub struct SocialRegulator {
    registry: Arc<LawRegistry>,
}

impl SocialRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        SocialRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for SocialRegulator {
    fn authority(&self) -> Domain {
        Domain::Social
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        match request.action {
            LawAction::GroupSize { .. } => Some(LawId::SocialBrainGroupSize),
            LawAction::HierarchyLevels { .. } => Some(LawId::HierarchyLevels),
            LawAction::ConsensusViable { .. } => Some(LawId::ConsensusViable),
            LawAction::SocietyType { .. } => Some(LawId::SocietyType),
            _ => None,
        }
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(
                &self.registry,
                Domain::Social,
                SOCIAL_CONFIDENCE,
                law,
                request,
            ),
            None => LawResponse::empty(Domain::Social),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}
