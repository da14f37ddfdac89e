//! Planetary regulator: disks, habitability, radiative balance

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

pub const PLANETARY_CONFIDENCE: f64 = 0.85;

const LAWS: &[LawId] = &[
    LawId::FrostLine,
    LawId::HabitableZone,
    LawId::EquilibriumTemperature,
];

pub struct PlanetaryRegulator {
    registry: Arc<LawRegistry>,
}

impl PlanetaryRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        PlanetaryRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for PlanetaryRegulator {
    fn authority(&self) -> Domain {
        Domain::Planetary
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        match request.action {
            LawAction::FrostLine { .. } => Some(LawId::FrostLine),
            LawAction::HabitableZone { .. } => Some(LawId::HabitableZone),
            LawAction::EquilibriumTemperature { .. } => Some(LawId::EquilibriumTemperature),
            _ => None,
        }
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(
                &self.registry,
                Domain::Planetary,
                PLANETARY_CONFIDENCE,
                law,
                request,
            ),
            None => LawResponse::empty(Domain::Planetary),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}
