//! Pattern-table emergency gate.
//!
//! Every pattern is evaluated; the reasons of all matches are reported in
//! table order. Unlike a first-match policy table, one match is not enough to
//! stop: the patient sees each reason that fired.

use std::sync::Arc;

use tracing::{debug, warn};

use triage_contracts::{profile::PatientProfile, report::EmergencyVerdict};
use triage_core::{traits::EmergencyGate, ClinicalSignals};

use crate::base::KnowledgeBase;

/// An `EmergencyGate` backed by the knowledge base's pattern table.
#[derive(Debug, Clone)]
pub struct PatternGate {
    kb: Arc<KnowledgeBase>,
}

impl PatternGate {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Ids of the patterns that match `profile`, in table order.
    pub fn matching_ids(&self, profile: &PatientProfile) -> Vec<&str> {
        let signals = ClinicalSignals::new(profile);
        self.kb
            .emergency_patterns()
            .iter()
            .filter(|p| p.matches(&signals))
            .map(|p| p.id.as_str())
            .collect()
    }
}

impl EmergencyGate for PatternGate {
    fn evaluate(&self, profile: &PatientProfile) -> EmergencyVerdict {
        let signals = ClinicalSignals::new(profile);

        let reasons: Vec<String> = self
            .kb
            .emergency_patterns()
            .iter()
            .filter(|pattern| {
                let hit = pattern.matches(&signals);
                if hit {
                    debug!(pattern_id = %pattern.id, "emergency pattern matched");
                }
                hit
            })
            .map(|pattern| pattern.reason.clone())
            .collect();

        if reasons.is_empty() {
            return EmergencyVerdict::Clear;
        }

        warn!(
            matches = reasons.len(),
            age = %signals.age_label(),
            pain = %signals.pain_label(),
            "emergency gate escalated"
        );
        EmergencyVerdict::Escalate { reasons }
    }
}
