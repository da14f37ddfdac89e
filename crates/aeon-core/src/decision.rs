//! Decision events
//!
//! Every decision point in the engine reports a typed [`DecisionEvent`] to an
//! injected [`DecisionSink`]. Logic never writes to a logger directly.

use serde::{Deserialize, Serialize};

use crate::{ComplexityLevel, ConflictRecord, Domain, SimTime};

/// A structured record of one decision
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum DecisionEvent {
    /// Applicability gate evaluated for a rule
    GateCheck {
        rule: String,
        complexity: ComplexityLevel,
        allowed: bool,
    },
    /// Thermodynamics forbade a tagged action
    ThermodynamicVeto {
        action: String,
        delta_g: f64,
        temperature: f64,
    },
    /// No regulator could handle a request
    Unroutable { domain: Domain, action: String },
    /// Request answered by one or more regulators
    Routed {
        action: String,
        authorities: Vec<Domain>,
        chosen: Domain,
    },
    ConflictResolved(ConflictRecord),
    /// A regulator produced a non-finite number
    NumericInvalid { authority: Domain, action: String },
    /// Pipeline stage prerequisites not met
    StageSkipped { stage: String, unmet: String },
    StageCompleted {
        stage: String,
        complexity: ComplexityLevel,
        events: usize,
    },
    EventRecorded { label: String, at: SimTime },
    /// The only sanctioned decrease of complexity
    ComplexityRegressed {
        from: ComplexityLevel,
        to: ComplexityLevel,
        reason: String,
    },
}

impl DecisionEvent {
    /// Short event kind for counters and filters
    pub fn kind(&self) -> &'static str {
        match self {
            DecisionEvent::GateCheck { .. } => "gate-check",
            DecisionEvent::ThermodynamicVeto { .. } => "thermodynamic-veto",
            DecisionEvent::Unroutable { .. } => "unroutable",
            DecisionEvent::Routed { .. } => "routed",
            DecisionEvent::ConflictResolved(_) => "conflict-resolved",
            DecisionEvent::NumericInvalid { .. } => "numeric-invalid",
            DecisionEvent::StageSkipped { .. } => "stage-skipped",
            DecisionEvent::StageCompleted { .. } => "stage-completed",
            DecisionEvent::EventRecorded { .. } => "event-recorded",
            DecisionEvent::ComplexityRegressed { .. } => "complexity-regressed",
        }
    }
}

/// Receiver of decision events.
pub trait DecisionSink: Send + Sync {
    fn record(&self, event: DecisionEvent);
}
