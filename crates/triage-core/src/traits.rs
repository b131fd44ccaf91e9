//! Core trait definitions for the consultation pipeline.
//!
//! These four traits are the seams of the engine:
//!
//! - `EmergencyGate`: pre-scoring escalation check
//! - `RiskScorer`: weighted score and band
//! - `ConditionMatcher`: complaint pattern to candidate conditions
//! - `RecommendationEngine`: tests, treatment, referrals, follow-up
//!
//! Every method is a pure function of its arguments and the implementor's
//! immutable tables. None of them can fail: malformed input is treated as
//! absent and every generator carries its own fallback.

use triage_contracts::{
    assessment::RiskAssessment,
    findings::ConditionAnalysis,
    profile::PatientProfile,
    recommendation::{FollowupPlan, RecommendedTest, SpecialistReferral, TreatmentPlan},
    report::EmergencyVerdict,
};

/// The emergency gate: evaluated before anything is scored.
pub trait EmergencyGate: Send + Sync {
    /// Evaluate every emergency pattern against the profile.
    ///
    /// Returns `Escalate` with the reason of each matching pattern, or `Clear`.
    fn evaluate(&self, profile: &PatientProfile) -> EmergencyVerdict;

    /// True if any pattern matches.
    fn is_emergency(&self, profile: &PatientProfile) -> bool {
        self.evaluate(profile).is_emergency()
    }
}

/// The additive risk scorer.
pub trait RiskScorer: Send + Sync {
    /// Score the profile and map it onto a risk band.
    fn assess(&self, profile: &PatientProfile) -> RiskAssessment;

    /// Age-specific considerations text for the report.
    fn age_considerations(&self, profile: &PatientProfile) -> String;
}

/// Complaint/symptom pattern matcher.
pub trait ConditionMatcher: Send + Sync {
    /// At most three candidate conditions, in rule-group precedence order.
    fn match_conditions(&self, profile: &PatientProfile) -> ConditionAnalysis;
}

/// The downstream recommendation generators.
///
/// Each method derives its section independently; none reads another's output.
pub trait RecommendationEngine: Send + Sync {
    /// Recommended diagnostic tests. Never empty.
    fn recommend_tests(&self, profile: &PatientProfile) -> Vec<RecommendedTest>;

    fn treatment_plan(&self, profile: &PatientProfile, risk: &RiskAssessment) -> TreatmentPlan;

    /// Specialist referrals. Never empty: falls back to primary care.
    fn recommend_specialists(&self, profile: &PatientProfile) -> Vec<SpecialistReferral>;

    fn followup_plan(&self, profile: &PatientProfile, risk: &RiskAssessment) -> FollowupPlan;
}
