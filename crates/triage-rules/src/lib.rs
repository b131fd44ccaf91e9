//! # triage-rules
//!
//! The rule-based decision components of the triage engine:
//!
//! - [`WeightedRiskScorer`]: additive risk score and band
//! - [`PatternMatcher`]: complaint patterns to candidate conditions
//! - [`ClinicalRecommender`]: tests, treatment, referrals and follow-up
//!
//! All of them are pure functions of the profile (and the knowledge base for
//! the scorer). [`engine`] wires them, together with the knowledge-base
//! emergency gate, into a ready-to-use [`Consultation`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use triage_knowledge::KnowledgeBase;
//!
//! let consultation = triage_rules::engine(Arc::new(KnowledgeBase::builtin()?));
//! let outcome = consultation.run(&profile, Acknowledgement::None)?;
//! ```

use std::sync::Arc;

use triage_contracts::{
    assessment::RiskAssessment,
    profile::PatientProfile,
    recommendation::{FollowupPlan, RecommendedTest, SpecialistReferral, TreatmentPlan},
};
use triage_core::{traits::RecommendationEngine, Consultation};
use triage_knowledge::{KnowledgeBase, PatternGate};

pub mod diagnostics;
pub mod followup;
pub mod matcher;
pub mod predicate;
pub mod scorer;
pub mod specialists;
pub mod treatment;

pub use matcher::PatternMatcher;
pub use scorer::WeightedRiskScorer;

/// The four built-in recommendation generators behind one seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClinicalRecommender;

impl RecommendationEngine for ClinicalRecommender {
    fn recommend_tests(&self, profile: &PatientProfile) -> Vec<RecommendedTest> {
        diagnostics::recommend_tests(profile)
    }

    fn treatment_plan(&self, profile: &PatientProfile, risk: &RiskAssessment) -> TreatmentPlan {
        treatment::build_treatment_plan(profile, risk)
    }

    fn recommend_specialists(&self, profile: &PatientProfile) -> Vec<SpecialistReferral> {
        specialists::recommend_specialists(profile)
    }

    fn followup_plan(&self, profile: &PatientProfile, risk: &RiskAssessment) -> FollowupPlan {
        followup::build_followup_plan(profile, risk)
    }
}

/// A `Consultation` using the built-in gate, scorer, matcher and generators.
pub fn engine(kb: Arc<KnowledgeBase>) -> Consultation {
    Consultation::new(
        Box::new(PatternGate::new(Arc::clone(&kb))),
        Box::new(WeightedRiskScorer::new(kb)),
        Box::new(PatternMatcher),
        Box::new(ClinicalRecommender),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
