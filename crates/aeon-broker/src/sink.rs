//! Decision sinks

use aeon_core::{DecisionEvent, DecisionSink};
use parking_lot::Mutex;

/// Writes every decision as a structured `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DecisionSink for TracingSink {
    fn record(&self, event: DecisionEvent) {
        match event {
            DecisionEvent::GateCheck {
                rule,
                complexity,
                allowed,
            } => {
                tracing::trace!(rule = %rule, complexity = %complexity, allowed, "gate check");
            }
            DecisionEvent::ThermodynamicVeto {
                action,
                delta_g,
                temperature,
            } => {
                tracing::info!(action = %action, delta_g, temperature, "thermodynamic veto");
            }
            DecisionEvent::Unroutable { domain, action } => {
                tracing::warn!(domain = %domain, action = %action, "no regulator for request");
            }
            DecisionEvent::Routed {
                action,
                authorities,
                chosen,
            } => {
                tracing::debug!(
                    action = %action,
                    regulators = authorities.len(),
                    chosen = %chosen,
                    "request routed"
                );
            }
            DecisionEvent::ConflictResolved(record) => {
                tracing::info!(
                    domain_a = %record.domain_a,
                    domain_b = %record.domain_b,
                    winner = %record.winner,
                    reason = ?record.reason,
                    "conflict resolved"
                );
            }
            DecisionEvent::NumericInvalid { authority, action } => {
                tracing::warn!(authority = %authority, action = %action, "non-finite answer suppressed");
            }
            DecisionEvent::StageSkipped { stage, unmet } => {
                tracing::info!(stage = %stage, unmet = %unmet, "stage skipped");
            }
            DecisionEvent::StageCompleted {
                stage,
                complexity,
                events,
            } => {
                tracing::info!(stage = %stage, complexity = %complexity, events, "stage completed");
            }
            DecisionEvent::EventRecorded { label, at } => {
                tracing::info!(label = %label, at = %at, "event recorded");
            }
            DecisionEvent::ComplexityRegressed { from, to, reason } => {
                tracing::warn!(from = %from, to = %to, reason = %reason, "complexity regressed");
            }
        }
    }
}

/// Keeps every decision in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DecisionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().clone()
    }

    /// Number of events of a kind (see [`DecisionEvent::kind`])
    pub fn count(&self, kind: &str) -> usize {
        self.events.lock().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl DecisionSink for MemorySink {
    fn record(&self, event: DecisionEvent) {
        self.events.lock().push(event);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DecisionSink for NullSink {
    fn record(&self, _event: DecisionEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::Domain;

    #[test]
    fn test_memory_sink_counts() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.record(DecisionEvent::Unroutable {
            domain: Domain::Unknown,
            action: "x".into(),
        });
        sink.record(DecisionEvent::StageSkipped {
            stage: "a".into(),
            unmet: "b".into(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count("unroutable"), 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_all() {
        let sink = TracingSink;
        sink.record(DecisionEvent::EventRecorded {
            label: "Particle Era".into(),
            at: aeon_core::SimTime(1e-6),
        });
    }
}
