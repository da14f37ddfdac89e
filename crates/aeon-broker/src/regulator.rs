//! Domain regulator contract

use aeon_core::{Domain, LawId, LawRequest, LawResponse};
use aeon_laws::LawRegistry;
use async_trait::async_trait;

/// An authority answering questions within one knowledge domain.
///
/// External code never calls a regulator directly; everything goes through
/// the [`Broker`](crate::Broker).
#[async_trait]
pub trait DomainRegulator: Send + Sync {
    /// Domain this regulator speaks for
    fn authority(&self) -> Domain;

    /// Law this regulator would apply to the request, if any
    fn law_for(&self, request: &LawRequest) -> Option<LawId>;

    fn can_handle(&self, request: &LawRequest) -> bool {
        self.law_for(request).is_some()
    }

    /// Answer the request
    async fn process(&self, request: &LawRequest) -> LawResponse;

    /// Rule names this regulator governs
    fn governed_laws(&self) -> Vec<&'static str>;
}

/// Evaluate `law` from the registry and wrap it as this authority's answer.
///
/// A null value comes back with zero confidence.
pub fn answer_with(
    registry: &LawRegistry,
    authority: Domain,
    confidence: f64,
    law: LawId,
    request: &LawRequest,
) -> LawResponse {
    let value = registry.evaluate(law, request);
    let response = if value.is_null() {
        LawResponse::empty(authority)
    } else {
        LawResponse::answered(value, authority, confidence)
    };
    response.with_precedent(law.precedent())
}

/// Rule names of a law table
pub fn rule_names(laws: &[LawId]) -> Vec<&'static str> {
    laws.iter().map(|l| l.rule_name()).collect()
}
