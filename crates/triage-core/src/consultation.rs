//! The consultation runner: one synchronous pass from profile to report.
//!
//! The runner enforces the consultation order:
//!
//!   Gate → [acknowledgement] → Score → Match → Recommend → Assemble
//!
//! Nothing is scored while an unacknowledged emergency is pending: the code
//! path to `RiskScorer::assess()` is only reachable after the gate is clear or
//! the host passed `Acknowledgement::ContinueAnyway`. The matcher and the
//! generators are independent of one another and all read the same profile.

use chrono::Utc;
use tracing::{debug, info, warn};

use triage_contracts::{
    assessment::RiskAssessment,
    error::TriageResult,
    profile::PatientProfile,
    report::{
        Acknowledgement, ConsultationId, ConsultationOutcome, EmergencyVerdict, ReportSummary,
        SeverityLevel, TriageReport,
    },
};

use crate::{
    digest::clinical_digest,
    signals::ClinicalSignals,
    traits::{ConditionMatcher, EmergencyGate, RecommendationEngine, RiskScorer},
};

/// Label used when the patient left the name blank.
pub const UNNAMED_PATIENT: &str = "Unnamed Patient";

/// Drives a single consultation through the engine.
///
/// The runner owns the four seams and holds no per-consultation state, so one
/// instance can serve any number of consultations.
pub struct Consultation {
    gate: Box<dyn EmergencyGate>,
    scorer: Box<dyn RiskScorer>,
    matcher: Box<dyn ConditionMatcher>,
    recommender: Box<dyn RecommendationEngine>,
}

impl Consultation {
    pub fn new(
        gate: Box<dyn EmergencyGate>,
        scorer: Box<dyn RiskScorer>,
        matcher: Box<dyn ConditionMatcher>,
        recommender: Box<dyn RecommendationEngine>,
    ) -> Self {
        Self { gate, scorer, matcher, recommender }
    }

    /// Evaluate only the emergency gate.
    pub fn check_emergency(&self, profile: &PatientProfile) -> EmergencyVerdict {
        self.gate.evaluate(profile)
    }

    /// Run one consultation.
    ///
    /// # Pipeline
    ///
    /// 1. Evaluate the emergency gate.
    ///    - `Escalate` without acknowledgement → `EscalationRequired`; stop.
    ///    - `Escalate` with `ContinueAnyway` → continue, verdict kept in report.
    /// 2. Score risk once.
    /// 3. Match candidate conditions.
    /// 4. Run each recommendation generator.
    /// 5. Assemble the report and stamp its clinical digest.
    ///
    /// # Errors
    ///
    /// Only digest encoding can fail; the decision steps are infallible.
    pub fn run(
        &self,
        profile: &PatientProfile,
        acknowledgement: Acknowledgement,
    ) -> TriageResult<ConsultationOutcome> {
        let consultation_id = ConsultationId::new();
        debug!(
            consultation_id = %consultation_id.0,
            conditions = profile.medical_conditions.len(),
            symptoms = profile.associated_symptoms.len(),
            "consultation starting"
        );

        // ── Step 1: Emergency gate ───────────────────────────────────────────
        let emergency = self.gate.evaluate(profile);
        if let EmergencyVerdict::Escalate { reasons } = &emergency {
            match acknowledgement {
                Acknowledgement::None => {
                    warn!(
                        consultation_id = %consultation_id.0,
                        reasons = %reasons.join("; "),
                        "emergency pattern matched; awaiting acknowledgement"
                    );
                    return Ok(ConsultationOutcome::EscalationRequired {
                        consultation_id,
                        reasons: reasons.clone(),
                    });
                }
                Acknowledgement::ContinueAnyway => {
                    warn!(
                        consultation_id = %consultation_id.0,
                        "emergency acknowledged; continuing analysis"
                    );
                }
            }
        }

        // ── Step 2: Risk scoring ─────────────────────────────────────────────
        //
        // Only reachable with a clear gate or an explicit acknowledgement.
        let risk = self.scorer.assess(profile);
        let age_considerations = self.scorer.age_considerations(profile);

        // ── Steps 3 & 4: Matcher and generators ──────────────────────────────
        let conditions = self.matcher.match_conditions(profile);
        let tests = self.recommender.recommend_tests(profile);
        let treatment = self.recommender.treatment_plan(profile, &risk);
        let specialists = self.recommender.recommend_specialists(profile);
        let followup = self.recommender.followup_plan(profile, &risk);

        // ── Step 5: Assemble ─────────────────────────────────────────────────
        let summary = summarize(profile, &risk);
        let mut report = TriageReport {
            consultation_id,
            generated_at: Utc::now(),
            locale: profile.locale,
            summary,
            emergency,
            risk,
            age_considerations,
            conditions,
            tests,
            treatment,
            specialists,
            followup,
            digest: String::new(),
        };
        report.digest = clinical_digest(&report)?;

        info!(
            consultation_id = %report.consultation_id.0,
            band = %report.risk.band,
            score = report.risk.score,
            candidates = report.conditions.len(),
            tests = report.tests.len(),
            "consultation complete"
        );

        Ok(ConsultationOutcome::Complete(Box::new(report)))
    }
}

/// Build the report header from the profile and the assessment.
fn summarize(profile: &PatientProfile, risk: &RiskAssessment) -> ReportSummary {
    let patient_label = profile
        .patient_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_PATIENT)
        .to_string();

    ReportSummary {
        patient_label,
        age: profile.age,
        age_group: profile.age_group(),
        condition_count: ClinicalSignals::new(profile).condition_count(),
        risk_band: risk.band,
        pain_level: profile.pain_level,
        severity: profile.pain_level.map(SeverityLevel::from_pain),
        confidence: risk.confidence,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use triage_contracts::{
        assessment::{RiskAssessment, RiskBand, RiskFactor},
        findings::ConditionAnalysis,
        profile::PatientProfile,
        recommendation::{
            FollowupPlan, FollowupUrgency, RecommendedTest, SpecialistReferral, TestUrgency,
            TreatmentPlan,
        },
        report::{Acknowledgement, ConsultationOutcome, EmergencyVerdict, SeverityLevel},
    };

    use crate::digest::verify_digest;
    use crate::traits::{ConditionMatcher, EmergencyGate, RecommendationEngine, RiskScorer};

    use super::{Consultation, UNNAMED_PATIENT};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A gate that always returns a pre-configured verdict.
    struct MockGate {
        verdict: EmergencyVerdict,
    }

    impl EmergencyGate for MockGate {
        fn evaluate(&self, _profile: &PatientProfile) -> EmergencyVerdict {
            self.verdict.clone()
        }
    }

    /// A scorer that counts how many times it was asked to assess.
    struct MockScorer {
        calls: Arc<Mutex<u32>>,
    }

    impl RiskScorer for MockScorer {
        fn assess(&self, profile: &PatientProfile) -> RiskAssessment {
            *self.calls.lock().unwrap() += 1;
            let score = u32::from(profile.pain_level.unwrap_or(0));
            RiskAssessment {
                band: RiskBand::LowMedium,
                score,
                factors: vec![RiskFactor {
                    rationale: "mock".to_string(),
                    points: score,
                }],
                message: "mock message".to_string(),
                confidence: 80,
                override_applied: false,
            }
        }

        fn age_considerations(&self, _profile: &PatientProfile) -> String {
            "mock considerations".to_string()
        }
    }

    struct MockMatcher;

    impl ConditionMatcher for MockMatcher {
        fn match_conditions(&self, _profile: &PatientProfile) -> ConditionAnalysis {
            ConditionAnalysis::default()
        }
    }

    struct MockRecommender;

    impl RecommendationEngine for MockRecommender {
        fn recommend_tests(&self, _profile: &PatientProfile) -> Vec<RecommendedTest> {
            vec![RecommendedTest {
                name: "Complete Blood Count".to_string(),
                category: "Basic Assessment".to_string(),
                cost: "₹200-400".to_string(),
                urgency: TestUrgency::Routine,
                purpose: "mock".to_string(),
            }]
        }

        fn treatment_plan(&self, _profile: &PatientProfile, risk: &RiskAssessment) -> TreatmentPlan {
            TreatmentPlan {
                risk_band: risk.band,
                immediate_actions: vec![],
                lifestyle: vec![],
                red_flags: vec![],
            }
        }

        fn recommend_specialists(&self, _profile: &PatientProfile) -> Vec<SpecialistReferral> {
            vec![]
        }

        fn followup_plan(&self, _profile: &PatientProfile, risk: &RiskAssessment) -> FollowupPlan {
            FollowupPlan {
                risk_band: risk.band,
                urgency: FollowupUrgency::Routine,
                timeline: vec![],
                monitoring: vec![],
                emergency_criteria: vec![],
                self_care: vec![],
            }
        }
    }

    fn consultation(verdict: EmergencyVerdict) -> (Consultation, Arc<Mutex<u32>>) {
        let calls = Arc::new(Mutex::new(0));
        let runner = Consultation::new(
            Box::new(MockGate { verdict }),
            Box::new(MockScorer { calls: Arc::clone(&calls) }),
            Box::new(MockMatcher),
            Box::new(MockRecommender),
        );
        (runner, calls)
    }

    fn escalate() -> EmergencyVerdict {
        EmergencyVerdict::Escalate {
            reasons: vec!["Severe pain in elderly - Requires immediate evaluation".to_string()],
        }
    }

    // ── Gate ordering ────────────────────────────────────────────────────────

    /// An unacknowledged emergency stops the run before scoring.
    #[test]
    fn unacknowledged_emergency_never_reaches_scorer() {
        let (runner, calls) = consultation(escalate());
        let profile = PatientProfile::new("chest pain").with_pain(9);

        let outcome = runner.run(&profile, Acknowledgement::None).unwrap();

        match outcome {
            ConsultationOutcome::EscalationRequired { reasons, .. } => {
                assert_eq!(reasons.len(), 1);
                assert!(reasons[0].contains("Severe pain"));
            }
            other => panic!("expected EscalationRequired, got {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), 0, "scorer must not run");
    }

    /// "Continue anyway" runs the full analysis and keeps the verdict.
    #[test]
    fn acknowledged_emergency_completes_with_verdict() {
        let (runner, calls) = consultation(escalate());
        let profile = PatientProfile::new("chest pain").with_pain(9);

        let outcome = runner.run(&profile, Acknowledgement::ContinueAnyway).unwrap();

        match outcome {
            ConsultationOutcome::Complete(report) => {
                assert!(report.emergency.is_emergency());
                assert_eq!(report.tests.len(), 1);
            }
            other => panic!("expected Complete, got {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), 1, "scorer runs exactly once");
    }

    #[test]
    fn clear_gate_completes_without_acknowledgement() {
        let (runner, calls) = consultation(EmergencyVerdict::Clear);
        let outcome = runner
            .run(&PatientProfile::new("mild rash"), Acknowledgement::None)
            .unwrap();

        assert!(matches!(outcome, ConsultationOutcome::Complete(_)));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    // ── Summary ──────────────────────────────────────────────────────────────

    #[test]
    fn summary_falls_back_to_unnamed_patient() {
        let (runner, _) = consultation(EmergencyVerdict::Clear);
        let profile = PatientProfile::new("cough").with_name("   ").with_pain(7).with_age(40);

        let ConsultationOutcome::Complete(report) =
            runner.run(&profile, Acknowledgement::None).unwrap()
        else {
            panic!("expected Complete");
        };

        assert_eq!(report.summary.patient_label, UNNAMED_PATIENT);
        assert_eq!(report.summary.severity, Some(SeverityLevel::Severe));
        assert_eq!(report.summary.age, Some(40));
        assert_eq!(report.summary.confidence, 80);
    }

    // ── Digest ───────────────────────────────────────────────────────────────

    /// Same profile, same digest even though ids and timestamps differ.
    #[test]
    fn digest_is_stable_across_runs() {
        let (runner, _) = consultation(EmergencyVerdict::Clear);
        let profile = PatientProfile::new("cough").with_name("Asha").with_pain(4);

        let first = match runner.run(&profile, Acknowledgement::None).unwrap() {
            ConsultationOutcome::Complete(r) => r,
            other => panic!("expected Complete, got {:?}", other),
        };
        let second = match runner.run(&profile, Acknowledgement::None).unwrap() {
            ConsultationOutcome::Complete(r) => r,
            other => panic!("expected Complete, got {:?}", other),
        };

        assert_ne!(first.consultation_id, second.consultation_id);
        assert_eq!(first.digest, second.digest);
        assert_eq!(first.digest.len(), 64);
        assert!(verify_digest(&first).unwrap());
    }

    #[test]
    fn tampered_report_fails_digest_check() {
        let (runner, _) = consultation(EmergencyVerdict::Clear);
        let profile = PatientProfile::new("cough").with_pain(4);

        let ConsultationOutcome::Complete(mut report) =
            runner.run(&profile, Acknowledgement::None).unwrap()
        else {
            panic!("expected Complete");
        };

        report.risk.band = RiskBand::High;
        assert!(!verify_digest(&report).unwrap());
    }
}
