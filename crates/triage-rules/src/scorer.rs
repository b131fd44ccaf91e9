//! Weighted additive risk scorer.
//!
//! Contributions are evaluated in a fixed order and every non-zero
//! contribution (plus the pediatric context factor) is recorded with its
//! rationale:
//!
//! 1. Age bracket
//! 2. Chronic conditions, by knowledge-base tier
//! 3. Pain level
//! 4. Respiratory exacerbation (may force HIGH)
//! 5. Symptom duration
//! 6. Comorbidity interactions
//! 7. Pediatric adjustments
//!
//! The total maps onto a band: HIGH ≥8 (or forced), MEDIUM ≥5, LOW-MEDIUM ≥2,
//! LOW otherwise.

use std::sync::Arc;

use tracing::{debug, info};

use triage_contracts::{
    assessment::{RiskAssessment, RiskBand, RiskFactor},
    profile::{conditions, symptoms, PatientProfile, SymptomDuration},
};
use triage_core::{traits::RiskScorer, ClinicalSignals};
use triage_knowledge::{KnowledgeBase, RiskTier};

/// Ages below this are scored as pediatric.
pub const PEDIATRIC_AGE: u8 = 18;

const HIGH_THRESHOLD: u32 = 8;
const MEDIUM_THRESHOLD: u32 = 5;
const LOW_MEDIUM_THRESHOLD: u32 = 2;

const RESPIRATORY_KEYWORDS: [&str; 3] = ["shortness", "breath", "difficulty breathing"];

/// Fixed message and confidence for a band.
pub fn band_profile(band: RiskBand) -> (&'static str, u8) {
    match band {
        RiskBand::High => (
            "Multiple high-risk factors present. Requires immediate medical attention and aggressive monitoring.",
            90,
        ),
        RiskBand::Medium => (
            "Several risk factors identified. Should see healthcare provider within 1-2 days for proper evaluation.",
            85,
        ),
        RiskBand::LowMedium => (
            "Some risk factors present. Monitor closely and seek care if symptoms worsen.",
            80,
        ),
        RiskBand::Low => (
            "Lower risk profile. Can likely be managed with self-care and routine follow-up.",
            75,
        ),
    }
}

/// Map a total onto a band. `forced_high` wins over the score.
pub fn band_for(score: u32, forced_high: bool) -> RiskBand {
    if forced_high || score >= HIGH_THRESHOLD {
        RiskBand::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskBand::Medium
    } else if score >= LOW_MEDIUM_THRESHOLD {
        RiskBand::LowMedium
    } else {
        RiskBand::Low
    }
}

/// A `RiskScorer` reading condition tiers and age bands from the knowledge base.
#[derive(Debug, Clone)]
pub struct WeightedRiskScorer {
    kb: Arc<KnowledgeBase>,
}

impl WeightedRiskScorer {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

/// Accumulates factors in evaluation order.
#[derive(Default)]
struct Tally {
    score: u32,
    factors: Vec<RiskFactor>,
}

impl Tally {
    fn add(&mut self, points: u32, rationale: String) {
        self.score += points;
        self.factors.push(RiskFactor { rationale, points });
    }
}

impl RiskScorer for WeightedRiskScorer {
    fn assess(&self, profile: &PatientProfile) -> RiskAssessment {
        let signals = ClinicalSignals::new(profile);
        let mut tally = Tally::default();
        let age = signals.age_label();
        let pain = signals.pain_label();

        // ── 1. Age ───────────────────────────────────────────────────────────
        match signals.age() {
            Some(a) if a > 70 => {
                tally.add(3, format!("Very elderly ({age}y) - Multiple system risks"));
            }
            Some(a) if a > 60 => {
                tally.add(2, format!("Elderly ({age}y) - Increased disease risk"));
            }
            Some(a) if a > 45 => {
                tally.add(1, format!("Middle age ({age}y) - Moderate risk increase"));
            }
            Some(a) if a < PEDIATRIC_AGE => {
                tally.add(
                    0,
                    format!("Child/Adolescent ({age}y) - Age-specific pediatric considerations"),
                );
            }
            _ => {}
        }

        // ── 2. Chronic conditions ────────────────────────────────────────────
        for name in signals.conditions() {
            let Some(record) = self.kb.condition(name) else {
                debug!(condition = %name, "condition not in knowledge base; ignored");
                continue;
            };
            let label = match record.risk_tier {
                RiskTier::High => "High-risk chronic condition",
                RiskTier::Medium => "Moderate risk condition",
            };
            tally.add(record.risk_tier.points(), format!("{name} - {label}"));
        }

        // ── 3. Pain ──────────────────────────────────────────────────────────
        if signals.pain_at_least(8) {
            tally.add(3, format!("Severe symptoms ({pain}/10) - Requires urgent attention"));
        } else if signals.pain_at_least(6) {
            tally.add(
                2,
                format!("Moderate-severe symptoms ({pain}/10) - Close monitoring needed"),
            );
        } else if signals.pain_at_least(4) {
            tally.add(1, format!("Moderate symptoms ({pain}/10) - Regular follow-up advised"));
        }

        // ── 4. Respiratory exacerbation ──────────────────────────────────────
        let mut forced_high = false;
        if is_respiratory(&signals) {
            if signals.pain_at_least(9) {
                tally.add(
                    3,
                    format!("Severe respiratory exacerbation ({pain}/10) - Urgent care recommended"),
                );
                forced_high = true;
            } else if signals.pain_at_least(7) {
                tally.add(
                    2,
                    format!("Respiratory exacerbation risk ({pain}/10) - Prompt evaluation advised"),
                );
            }
        }

        // ── 5. Duration ──────────────────────────────────────────────────────
        match profile.symptom_duration {
            Some(SymptomDuration::Chronic) => {
                tally.add(2, "Chronic symptoms - Ongoing management required".to_string());
            }
            Some(SymptomDuration::MoreThanTwoWeeks) => {
                tally.add(1, "Prolonged symptoms - Professional evaluation needed".to_string());
            }
            _ => {}
        }

        // ── 6. Comorbidity interactions ──────────────────────────────────────
        if signals.has_diabetes() {
            if signals.has_condition(conditions::HYPERTENSION) {
                tally.add(2, "Diabetes + Hypertension - Cardiovascular risk multiplied".to_string());
            }
            if signals.has_condition(conditions::HEART_DISEASE) {
                tally.add(3, "Diabetes + Heart Disease - Very high cardiac risk".to_string());
            }
        }

        // ── 7. Pediatric adjustments ─────────────────────────────────────────
        if signals.age_below(PEDIATRIC_AGE) {
            if signals.has_condition(conditions::HYPERTENSION) {
                tally.add(
                    2,
                    "Hypertension in a child - Pediatric hypertension requires specialist evaluation"
                        .to_string(),
                );
            }
            if signals.has_condition(conditions::HEART_DISEASE) {
                tally.add(
                    2,
                    "Heart Disease in a child - Refer to pediatric cardiology".to_string(),
                );
            }
            if signals.has_diabetes() {
                tally.add(
                    1,
                    "Diabetes in a child - Close monitoring and specialist care recommended"
                        .to_string(),
                );
            }
        }

        let band = band_for(tally.score, forced_high);
        let (message, confidence) = band_profile(band);

        info!(
            band = %band,
            score = tally.score,
            factors = tally.factors.len(),
            override_applied = forced_high,
            "risk assessed"
        );

        RiskAssessment {
            band,
            score: tally.score,
            factors: tally.factors,
            message: message.to_string(),
            confidence,
            override_applied: forced_high,
        }
    }

    fn age_considerations(&self, profile: &PatientProfile) -> String {
        let Some(age) = profile.age else {
            return GENERIC_SCREENING.to_string();
        };

        if age < PEDIATRIC_AGE {
            return format!(
                "At your age ({age}), pediatric concerns apply: growth/development, infections, \
                 and mental health screening may be relevant. Seek pediatric or primary care if concerns."
            );
        }

        match self.kb.age_band_for(age) {
            Some(band) => format!(
                "At your age ({age}), common concerns include: {}. Cardiac risk: {}, Diabetes risk: {}.",
                band.concerns.join(", "),
                band.cardiac_risk.as_str(),
                band.diabetes_risk.as_str(),
            ),
            None => GENERIC_SCREENING.to_string(),
        }
    }
}

const GENERIC_SCREENING: &str = "Age-appropriate screening and monitoring recommended.";

/// Lung disease, a picked breathing symptom, or a breathing complaint.
fn is_respiratory(signals: &ClinicalSignals<'_>) -> bool {
    signals.has_any_condition(&[conditions::ASTHMA, conditions::COPD])
        || signals.reports_symptom(symptoms::SHORTNESS_OF_BREATH)
        || signals.complaint_mentions_any(&RESPIRATORY_KEYWORDS)
}

// ── Tests ────────────────────────────────────────────────────────────────────
