//! Complaint pattern matcher.
//!
//! `RULE_GROUPS` is evaluated in declaration order. Each group has a trigger
//! and ordered arms: within a triggered group the first arm whose guard holds
//! contributes one candidate (first match wins), and every triggered group may
//! contribute (union). When no group contributes, the functional-disorder
//! fallback is reported. The list is truncated to the first three.
//!
//! Factor text may carry `{age}` and `{pain}` placeholders, filled from the
//! profile at match time.

use tracing::debug;

use triage_contracts::{
    findings::{CandidateCondition, ConditionAnalysis},
    profile::PatientProfile,
};
use triage_core::{traits::ConditionMatcher, ClinicalSignals};

use crate::predicate::{
    Predicate, CHEST_PAIN, DIABETES_OR_HEART_DISEASE, FREQUENT_URINATION, HEADACHE,
    HEART_DISEASE, HYPERTENSION, LUNG_DISEASE, SHORTNESS_OF_BREATH,
};

/// A candidate condition as declared in the table.
#[derive(Debug, Clone, Copy)]
pub struct CandidateTemplate {
    pub name: &'static str,
    pub probability: u8,
    pub description: &'static str,
    pub factors: &'static [&'static str],
    pub recommendation: &'static str,
}

impl CandidateTemplate {
    fn render(&self, signals: &ClinicalSignals<'_>) -> CandidateCondition {
        let age = signals.age_label();
        let pain = signals.pain_label();
        CandidateCondition {
            name: self.name.to_string(),
            probability: self.probability,
            description: self.description.to_string(),
            factors: self
                .factors
                .iter()
                .map(|f| f.replace("{age}", &age).replace("{pain}", &pain))
                .collect(),
            recommendation: self.recommendation.to_string(),
        }
    }
}

/// One arm of a rule group. `None` guards always hold.
#[derive(Debug, Clone, Copy)]
pub struct Arm {
    pub guard: Option<Predicate>,
    pub candidate: CandidateTemplate,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub id: &'static str,
    pub trigger: Predicate,
    pub arms: &'static [Arm],
}

impl RuleGroup {
    /// The first arm that applies, if the group is triggered at all.
    pub fn evaluate(&self, signals: &ClinicalSignals<'_>) -> Option<&CandidateTemplate> {
        if !self.trigger.holds(signals) {
            return None;
        }
        self.arms
            .iter()
            .find(|arm| arm.guard.map_or(true, |g| g.holds(signals)))
            .map(|arm| &arm.candidate)
    }
}

// ── Rule table ───────────────────────────────────────────────────────────────

pub const RULE_GROUPS: &[RuleGroup] = &[
    RuleGroup {
        id: "chest-pain",
        trigger: CHEST_PAIN,
        arms: &[
            Arm {
                guard: Some(DIABETES_OR_HEART_DISEASE),
                candidate: CandidateTemplate {
                    name: "Acute Coronary Syndrome",
                    probability: 85,
                    description: "Heart attack or unstable angina - requires immediate evaluation",
                    factors: &["Chest pain", "Diabetes/Heart disease", "Age {age}", "Severe pain ({pain}/10)"],
                    recommendation: "URGENT: Go to emergency room immediately",
                },
            },
            Arm {
                guard: Some(Predicate::AgeAtLeast(45)),
                candidate: CandidateTemplate {
                    name: "Cardiac Ischemia",
                    probability: 65,
                    description: "Reduced blood flow to heart muscle",
                    factors: &["Chest pain", "Age {age}", "Cardiac risk factors"],
                    recommendation: "See cardiologist within 24-48 hours",
                },
            },
            Arm {
                guard: None,
                candidate: CandidateTemplate {
                    name: "Musculoskeletal Pain",
                    probability: 45,
                    description: "Muscle or chest wall pain",
                    factors: &["Chest pain", "Young age ({age})", "No cardiac history"],
                    recommendation: "Monitor symptoms, see doctor if persists",
                },
            },
        ],
    },
    RuleGroup {
        id: "headache",
        trigger: HEADACHE,
        arms: &[
            Arm {
                guard: Some(HYPERTENSION),
                candidate: CandidateTemplate {
                    name: "Hypertensive Crisis",
                    probability: 78,
                    description: "Dangerously high blood pressure affecting brain",
                    factors: &["Severe headache", "Hypertension history", "Pain level {pain}/10"],
                    recommendation: "URGENT: Check blood pressure immediately, go to ER if >180/110",
                },
            },
            Arm {
                guard: Some(Predicate::AgeAtLeast(50)),
                candidate: CandidateTemplate {
                    name: "Secondary Headache",
                    probability: 60,
                    description: "Headache due to underlying condition",
                    factors: &["Severe headache", "Age {age}", "New or different pattern"],
                    recommendation: "See neurologist for evaluation",
                },
            },
        ],
    },
    RuleGroup {
        id: "diabetic-urinary",
        trigger: Predicate::All(&[FREQUENT_URINATION, Predicate::Diabetes]),
        arms: &[Arm {
            guard: None,
            candidate: CandidateTemplate {
                name: "Poor Diabetic Control",
                probability: 85,
                description: "Blood sugar levels not well controlled",
                factors: &["Frequent urination", "Diabetes history", "Possible medication issues"],
                recommendation: "Check blood sugar immediately, adjust medications with doctor",
            },
        }],
    },
    RuleGroup {
        id: "breathing",
        trigger: SHORTNESS_OF_BREATH,
        arms: &[
            Arm {
                guard: Some(HEART_DISEASE),
                candidate: CandidateTemplate {
                    name: "Congestive Heart Failure",
                    probability: 80,
                    description: "Heart not pumping effectively",
                    factors: &["Shortness of breath", "Heart disease history", "Age {age}"],
                    recommendation: "URGENT: See cardiologist immediately, may need hospitalization",
                },
            },
            Arm {
                guard: Some(LUNG_DISEASE),
                candidate: CandidateTemplate {
                    name: "Respiratory Exacerbation",
                    probability: 75,
                    description: "Worsening of lung condition",
                    factors: &["Breathing difficulty", "Lung disease history", "Environmental triggers"],
                    recommendation: "Use rescue medications, see pulmonologist if no improvement",
                },
            },
        ],
    },
];

/// Reported when no rule group contributes.
pub const FALLBACK: CandidateTemplate = CandidateTemplate {
    name: "Functional Disorder",
    probability: 40,
    description: "Symptoms without clear structural cause",
    factors: &["Symptom pattern", "Age {age}", "No major risk factors"],
    recommendation: "Lifestyle modifications, stress management, follow up with primary care",
};

/// A `ConditionMatcher` over `RULE_GROUPS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl ConditionMatcher for PatternMatcher {
    fn match_conditions(&self, profile: &PatientProfile) -> ConditionAnalysis {
        let signals = ClinicalSignals::new(profile);

        let mut candidates: Vec<CandidateCondition> = RULE_GROUPS
            .iter()
            .filter_map(|group| {
                let hit = group.evaluate(&signals)?;
                debug!(group = %group.id, candidate = %hit.name, "rule group matched");
                Some(hit.render(&signals))
            })
            .collect();

        if candidates.is_empty() {
            candidates.push(FALLBACK.render(&signals));
        }

        ConditionAnalysis::truncated(candidates)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use triage_contracts::profile::{conditions, symptoms, PatientProfile};
    use triage_core::traits::ConditionMatcher;

    use super::PatternMatcher;

    fn names(profile: &PatientProfile) -> Vec<String> {
        PatternMatcher
            .match_conditions(profile)
            .candidates
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_chest_pain_arms_first_match_wins() {
        let diabetic = PatientProfile::new("chest pain")
            .with_age(30)
            .with_condition(conditions::DIABETES_TYPE_2);
        assert_eq!(names(&diabetic), vec!["Acute Coronary Syndrome"]);

        let older = PatientProfile::new("chest pain").with_age(45);
        assert_eq!(names(&older), vec!["Cardiac Ischemia"]);

        let young = PatientProfile::new("chest pain").with_age(25);
        assert_eq!(names(&young), vec!["Musculoskeletal Pain"]);
    }

    #[test]
    fn test_factor_placeholders_filled() {
        let profile = PatientProfile::new("chest pain")
            .with_age(58)
            .with_pain(9)
            .with_condition(conditions::HEART_DISEASE);

        let analysis = PatternMatcher.match_conditions(&profile);
        let top = analysis.top().unwrap();
        assert_eq!(top.probability, 85);
        assert_eq!(
            top.factors,
            vec!["Chest pain", "Diabetes/Heart disease", "Age 58", "Severe pain (9/10)"]
        );
    }

    #[test]
    fn test_unknown_age_rendered() {
        let profile = PatientProfile::new("chest pain");
        let analysis = PatternMatcher.match_conditions(&profile);
        assert_eq!(analysis.top().unwrap().factors[1], "Young age (unknown)");
    }

    #[test]
    fn test_headache_without_hypertension_under_fifty_contributes_nothing() {
        let profile = PatientProfile::new("headache").with_age(30);
        assert_eq!(names(&profile), vec!["Functional Disorder"]);
    }

    #[test]
    fn test_union_across_groups_and_truncation() {
        let profile = PatientProfile::new("chest pain and headache")
            .with_age(60)
            .with_condition(conditions::DIABETES_TYPE_1)
            .with_condition(conditions::HYPERTENSION)
            .with_condition(conditions::HEART_DISEASE)
            .with_symptom(symptoms::FREQUENT_URINATION)
            .with_symptom(symptoms::SHORTNESS_OF_BREATH);

        let analysis = PatternMatcher.match_conditions(&profile);
        assert_eq!(analysis.len(), 3);
        let names: Vec<&str> = analysis.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Acute Coronary Syndrome", "Hypertensive Crisis", "Poor Diabetic Control"]
        );
    }

    #[test]
    fn test_urinary_requires_diabetes() {
        let profile = PatientProfile::new("frequent urination").with_age(30);
        assert_eq!(names(&profile), vec!["Functional Disorder"]);
    }

    #[test]
    fn test_breathing_arms() {
        let hf = PatientProfile::new("shortness of breath")
            .with_condition(conditions::HEART_DISEASE)
            .with_condition(conditions::ASTHMA);
        assert_eq!(names(&hf), vec!["Congestive Heart Failure"]);

        let copd = PatientProfile::new("x")
            .with_symptom(symptoms::SHORTNESS_OF_BREATH)
            .with_condition(conditions::COPD);
        assert_eq!(names(&copd), vec!["Respiratory Exacerbation"]);
    }

    #[test]
    fn test_never_empty() {
        let analysis = PatternMatcher.match_conditions(&PatientProfile::default());
        assert_eq!(analysis.len(), 1);
        assert_eq!(analysis.top().unwrap().probability, 40);
    }
}
