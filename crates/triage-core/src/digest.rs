//! Report digest: a SHA-256 commitment over the clinical sections.
//!
//! Two reports built from the same profile carry the same digest even though
//! their consultation ids and timestamps differ.
//!
//! Hash input: canonical JSON (serde_json, no pretty-printing) of, in order,
//! locale, summary, emergency verdict, risk assessment, age considerations,
//! condition analysis, tests, treatment plan, referrals, follow-up plan.

use serde::Serialize;
use sha2::{Digest, Sha256};

use triage_contracts::{
    assessment::RiskAssessment,
    error::{TriageError, TriageResult},
    findings::ConditionAnalysis,
    profile::Locale,
    recommendation::{FollowupPlan, RecommendedTest, SpecialistReferral, TreatmentPlan},
    report::{EmergencyVerdict, ReportSummary, TriageReport},
};

#[derive(Serialize)]
struct ClinicalSections<'a> {
    locale: &'a Locale,
    summary: &'a ReportSummary,
    emergency: &'a EmergencyVerdict,
    risk: &'a RiskAssessment,
    age_considerations: &'a str,
    conditions: &'a ConditionAnalysis,
    tests: &'a [RecommendedTest],
    treatment: &'a TreatmentPlan,
    specialists: &'a [SpecialistReferral],
    followup: &'a FollowupPlan,
}

/// Compute the lowercase hex SHA-256 of the report's clinical sections.
///
/// The `digest` field itself, `consultation_id` and `generated_at` are not
/// part of the input.
pub fn clinical_digest(report: &TriageReport) -> TriageResult<String> {
    let sections = ClinicalSections {
        locale: &report.locale,
        summary: &report.summary,
        emergency: &report.emergency,
        risk: &report.risk,
        age_considerations: &report.age_considerations,
        conditions: &report.conditions,
        tests: &report.tests,
        treatment: &report.treatment,
        specialists: &report.specialists,
        followup: &report.followup,
    };

    let bytes = serde_json::to_vec(&sections).map_err(|e| TriageError::Serialization {
        reason: format!("failed to encode report sections: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// True if the stored digest matches the recomputed one.
pub fn verify_digest(report: &TriageReport) -> TriageResult<bool> {
    Ok(clinical_digest(report)? == report.digest)
}
