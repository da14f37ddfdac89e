//! Physics regulator: gravitation, stellar structure, chemistry bonds

use std::sync::Arc;

use aeon_core::{Domain, LawAction, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

use crate::{answer_with, rule_names, DomainRegulator};

const LAWS: &[LawId] = &[
    LawId::JeansInstability,
    LawId::EscapeVelocity,
    LawId::SurfaceGravity,
    LawId::SquareCubeMassLimit,
    LawId::DegeneracyPressure,
    LawId::PairProduction,
    LawId::MainSequenceLuminosity,
    LawId::MainSequenceTemperature,
    LawId::MainSequenceLifetime,
    LawId::SpectralClass,
    LawId::MassiveStarFraction,
    LawId::MolecularStability,
];

pub struct PhysicsRegulator {
    registry: Arc<LawRegistry>,
}

impl PhysicsRegulator {
    pub fn new(registry: Arc<LawRegistry>) -> Self {
        PhysicsRegulator { registry }
    }
}

#[async_trait]
impl DomainRegulator for PhysicsRegulator {
    fn authority(&self) -> Domain {
        Domain::Physics
    }

    fn law_for(&self, request: &LawRequest) -> Option<LawId> {
        use LawAction::*;
        let law = match request.action {
            JeansInstability { .. } => LawId::JeansInstability,
            EscapeVelocity { .. } => LawId::EscapeVelocity,
            SurfaceGravity { .. } => LawId::SurfaceGravity,
            MaxBodyMass { .. } => LawId::SquareCubeMassLimit,
            DegeneracyPressure { .. } => LawId::DegeneracyPressure,
            PairProduction { .. } => LawId::PairProduction,
            StellarLuminosity { .. } => LawId::MainSequenceLuminosity,
            StellarTemperature { .. } => LawId::MainSequenceTemperature,
            StellarLifetime { .. } => LawId::MainSequenceLifetime,
            SpectralClass { .. } => LawId::SpectralClass,
            MassiveStarFraction { .. } => LawId::MassiveStarFraction,
            MolecularStability { .. } => LawId::MolecularStability,
            _ => return None,
        };
        Some(law)
    }

    async fn process(&self, request: &LawRequest) -> LawResponse {
        match self.law_for(request) {
            Some(law) => answer_with(&self.registry, Domain::Physics, 1.0, law, request),
            None => LawResponse::empty(Domain::Physics),
        }
    }

    fn governed_laws(&self) -> Vec<&'static str> {
        rule_names(LAWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::UniverseState;

    #[tokio::test]
    async fn test_stellar_lifetime() {
        let regulator = PhysicsRegulator::new(Arc::new(LawRegistry::standard()));
        let request = LawRequest::new(
            LawAction::StellarLifetime { mass: 1.0 },
            UniverseState::default(),
        );
        let response = regulator.process(&request).await;
        let years = response.value.as_number().unwrap();
        assert!((years - 1e10).abs() < 1.0);
        assert_eq!(
            response.precedents,
            vec!["stellar.mainSequence.lifetime (Kippenhahn & Weigert 1990)".to_string()]
        );
    }

    #[test]
    fn test_governs_stellar_rules() {
        let regulator = PhysicsRegulator::new(Arc::new(LawRegistry::standard()));
        assert!(regulator
            .governed_laws()
            .contains(&"stellar.imf.massiveFraction"));
    }
}
