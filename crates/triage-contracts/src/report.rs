//! Consultation outcome and report types.
//!
//! `ConsultationOutcome` is what the consultation runner hands back to the
//! host. `TriageReport` is the assembled output of one analysis run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{RiskAssessment, RiskBand},
    findings::ConditionAnalysis,
    profile::{AgeGroup, Locale},
    recommendation::{FollowupPlan, RecommendedTest, SpecialistReferral, TreatmentPlan},
};

/// Unique identifier for one consultation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsultationId(pub uuid::Uuid);

impl ConsultationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConsultationId {
    fn default() -> Self {
        Self::new()
    }
}

/// The emergency gate's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyVerdict {
    /// No emergency pattern matched.
    Clear,
    /// At least one pattern matched; scoring must wait for acknowledgement.
    Escalate {
        /// Reason strings of every matching pattern, in table order.
        reasons: Vec<String>,
    },
}

impl EmergencyVerdict {
    pub fn is_emergency(&self) -> bool {
        matches!(self, EmergencyVerdict::Escalate { .. })
    }
}

/// Whether the host has acknowledged an emergency escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acknowledgement {
    /// Stop at the gate if it fires.
    #[default]
    None,
    /// The patient chose "continue anyway"; run the analysis regardless.
    ContinueAnyway,
}

/// Verbal severity bucket for the self-reported pain level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    /// Mild ≤3, Moderate ≤6, Severe above.
    pub fn from_pain(pain_level: u8) -> Self {
        match pain_level {
            0..=3 => SeverityLevel::Mild,
            4..=6 => SeverityLevel::Moderate,
            _ => SeverityLevel::Severe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Mild => "Mild",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Severe => "Severe",
        }
    }
}

/// Header block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Patient name, or "Unnamed Patient".
    pub patient_label: String,
    pub age: Option<u8>,
    pub age_group: Option<AgeGroup>,
    /// Distinct selected conditions.
    pub condition_count: usize,
    pub risk_band: RiskBand,
    pub pain_level: Option<u8>,
    pub severity: Option<SeverityLevel>,
    pub confidence: u8,
}

/// The full triage report for one consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    pub consultation_id: ConsultationId,
    pub generated_at: DateTime<Utc>,
    pub locale: Locale,
    pub summary: ReportSummary,
    /// The gate verdict; `Escalate` here means the patient continued anyway.
    pub emergency: EmergencyVerdict,
    pub risk: RiskAssessment,
    pub age_considerations: String,
    pub conditions: ConditionAnalysis,
    pub tests: Vec<RecommendedTest>,
    pub treatment: TreatmentPlan,
    pub specialists: Vec<SpecialistReferral>,
    pub followup: FollowupPlan,
    /// SHA-256 (hex) over the clinical sections, excluding id and timestamp.
    pub digest: String,
}

/// What the consultation runner returns to the host.
#[derive(Debug)]
pub enum ConsultationOutcome {
    /// The gate fired and no acknowledgement was given. Nothing was scored.
    EscalationRequired {
        consultation_id: ConsultationId,
        reasons: Vec<String>,
    },
    /// Analysis ran to completion.
    Complete(Box<TriageReport>),
}
