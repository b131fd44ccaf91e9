//! Diagnostic test panel.
//!
//! Every row of `TEST_PANEL` whose predicate holds contributes one test, in
//! table order. If nothing was recommended, a complete blood count is added:
//! the adult "Basic Assessment" variant at 18 and over, the pediatric variant
//! otherwise (including unknown age), so the panel is never empty.

use triage_contracts::{
    profile::PatientProfile,
    recommendation::{RecommendedTest, TestGroup, TestUrgency},
};
use triage_core::ClinicalSignals;

use crate::predicate::{
    Predicate, CHEST_PAIN, FREQUENT_URINATION, HEADACHE, HEART_DISEASE, HYPERTENSION,
    SHORTNESS_OF_BREATH,
};

/// How a row picks its urgency.
#[derive(Debug, Clone, Copy)]
pub enum UrgencyRule {
    Fixed(TestUrgency),
    /// `then` if the predicate holds, otherwise `otherwise`.
    When {
        predicate: Predicate,
        then: TestUrgency,
        otherwise: TestUrgency,
    },
}

impl UrgencyRule {
    fn resolve(&self, signals: &ClinicalSignals<'_>) -> TestUrgency {
        match self {
            UrgencyRule::Fixed(u) => *u,
            UrgencyRule::When { predicate, then, otherwise } => {
                if predicate.holds(signals) {
                    *then
                } else {
                    *otherwise
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestRule {
    pub when: Predicate,
    pub name: &'static str,
    pub category: &'static str,
    pub cost: &'static str,
    pub urgency: UrgencyRule,
    pub purpose: &'static str,
}

const CHEST_PAIN_WORKUP: Predicate = Predicate::All(&[
    CHEST_PAIN,
    Predicate::Any(&[Predicate::Diabetes, Predicate::AgeAtLeast(45)]),
]);

const HYPERTENSIVE_HEADACHE: Predicate = Predicate::All(&[HYPERTENSION, HEADACHE]);

pub const TEST_PANEL: &[TestRule] = &[
    // Cardiac
    TestRule {
        when: CHEST_PAIN,
        name: "ECG (12-Lead)",
        category: "Cardiac Emergency",
        cost: "₹150-300",
        urgency: UrgencyRule::When {
            predicate: Predicate::PainAtLeast(7),
            then: TestUrgency::Immediate,
            otherwise: TestUrgency::Urgent,
        },
        purpose: "Detect heart attack, arrhythmias, ischemia",
    },
    TestRule {
        when: CHEST_PAIN_WORKUP,
        name: "Cardiac Enzymes (Troponin)",
        category: "Cardiac Emergency",
        cost: "₹800-1500",
        urgency: UrgencyRule::Fixed(TestUrgency::Immediate),
        purpose: "Detect heart muscle damage",
    },
    TestRule {
        when: CHEST_PAIN_WORKUP,
        name: "Echocardiogram",
        category: "Cardiac Assessment",
        cost: "₹1500-3000",
        urgency: UrgencyRule::Fixed(TestUrgency::Urgent),
        purpose: "Assess heart structure and function",
    },
    // Diabetes
    TestRule {
        when: Predicate::Diabetes,
        name: "HbA1c",
        category: "Diabetic Monitoring",
        cost: "₹400-600",
        urgency: UrgencyRule::Fixed(TestUrgency::Routine),
        purpose: "3-month blood sugar control assessment",
    },
    TestRule {
        when: Predicate::All(&[Predicate::Diabetes, FREQUENT_URINATION]),
        name: "Random Blood Glucose",
        category: "Diabetic Emergency",
        cost: "₹50-100",
        urgency: UrgencyRule::Fixed(TestUrgency::Immediate),
        purpose: "Check for diabetic ketoacidosis or hyperosmolar state",
    },
    TestRule {
        when: Predicate::Diabetes,
        name: "Kidney Function Tests",
        category: "Diabetic Complications",
        cost: "₹500-800",
        urgency: UrgencyRule::Fixed(TestUrgency::Routine),
        purpose: "Screen for diabetic kidney disease",
    },
    TestRule {
        when: Predicate::All(&[Predicate::Diabetes, Predicate::AgeAtLeast(40)]),
        name: "Dilated Eye Exam",
        category: "Diabetic Complications",
        cost: "₹500-1000",
        urgency: UrgencyRule::Fixed(TestUrgency::Routine),
        purpose: "Screen for diabetic retinopathy",
    },
    // Hypertension
    TestRule {
        when: HYPERTENSIVE_HEADACHE,
        name: "Blood Pressure Monitoring",
        category: "Hypertensive Emergency",
        cost: "₹100-200",
        urgency: UrgencyRule::Fixed(TestUrgency::Immediate),
        purpose: "Rule out hypertensive crisis",
    },
    TestRule {
        when: Predicate::All(&[HYPERTENSIVE_HEADACHE, Predicate::PainAtLeast(8)]),
        name: "CT Brain (Non-contrast)",
        category: "Neurological Emergency",
        cost: "₹3000-6000",
        urgency: UrgencyRule::Fixed(TestUrgency::Urgent),
        purpose: "Rule out intracranial bleeding or stroke",
    },
    // Respiratory
    TestRule {
        when: SHORTNESS_OF_BREATH,
        name: "Chest X-ray",
        category: "Respiratory Assessment",
        cost: "₹200-500",
        urgency: UrgencyRule::When {
            predicate: HEART_DISEASE,
            then: TestUrgency::Urgent,
            otherwise: TestUrgency::Routine,
        },
        purpose: "Assess lungs and heart for fluid, infection, or structural problems",
    },
    TestRule {
        when: Predicate::All(&[SHORTNESS_OF_BREATH, HEART_DISEASE]),
        name: "BNP or NT-proBNP",
        category: "Heart Failure Assessment",
        cost: "₹1000-1800",
        urgency: UrgencyRule::Fixed(TestUrgency::Urgent),
        purpose: "Diagnose and assess heart failure severity",
    },
    // Screening
    TestRule {
        when: Predicate::AgeAtLeast(40),
        name: "Lipid Profile",
        category: "Cardiovascular Screening",
        cost: "₹400-600",
        urgency: UrgencyRule::Fixed(TestUrgency::Routine),
        purpose: "Assess cardiovascular risk factors",
    },
];

const ADULT_AGE: u8 = 18;

impl TestRule {
    fn instantiate(&self, signals: &ClinicalSignals<'_>) -> RecommendedTest {
        RecommendedTest {
            name: self.name.to_string(),
            category: self.category.to_string(),
            cost: self.cost.to_string(),
            urgency: self.urgency.resolve(signals),
            purpose: self.purpose.to_string(),
        }
    }
}

fn blood_count(signals: &ClinicalSignals<'_>) -> RecommendedTest {
    let (category, purpose) = if signals.age_at_least(ADULT_AGE) {
        ("Basic Assessment", "Screen for infections, anemia, blood disorders")
    } else {
        (
            "Pediatric Assessment",
            "Screen for infections and anemia using age-adjusted reference ranges",
        )
    };
    RecommendedTest {
        name: "Complete Blood Count".to_string(),
        category: category.to_string(),
        cost: "₹200-400".to_string(),
        urgency: TestUrgency::Routine,
        purpose: purpose.to_string(),
    }
}

/// The recommended tests for `profile`. Never empty.
pub fn recommend_tests(profile: &PatientProfile) -> Vec<RecommendedTest> {
    let signals = ClinicalSignals::new(profile);
    let mut tests: Vec<RecommendedTest> = TEST_PANEL
        .iter()
        .filter(|rule| rule.when.holds(&signals))
        .map(|rule| rule.instantiate(&signals))
        .collect();

    if tests.is_empty() {
        tests.push(blood_count(&signals));
    }
    tests
}

/// Group tests by category, keeping first-appearance order of categories and
/// the original order within each category.
pub fn group_by_category(tests: &[RecommendedTest]) -> Vec<TestGroup> {
    let mut groups: Vec<TestGroup> = Vec::new();
    for test in tests {
        match groups.iter_mut().find(|g| g.category == test.category) {
            Some(group) => group.tests.push(test.clone()),
            None => groups.push(TestGroup {
                category: test.category.clone(),
                tests: vec![test.clone()],
            }),
        }
    }
    groups
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use triage_contracts::{
        profile::{conditions, symptoms, PatientProfile},
        recommendation::TestUrgency,
    };

    use super::{group_by_category, recommend_tests};

    fn names(profile: &PatientProfile) -> Vec<String> {
        recommend_tests(profile).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_chest_pain_workup() {
        let profile = PatientProfile::new("chest pain")
            .with_age(58)
            .with_pain(9)
            .with_condition(conditions::DIABETES_TYPE_2);

        let tests = recommend_tests(&profile);
        assert_eq!(tests[0].name, "ECG (12-Lead)");
        assert_eq!(tests[0].urgency, TestUrgency::Immediate);
        assert_eq!(
            names(&profile),
            vec![
                "ECG (12-Lead)",
                "Cardiac Enzymes (Troponin)",
                "Echocardiogram",
                "HbA1c",
                "Kidney Function Tests",
                "Dilated Eye Exam",
                "Lipid Profile",
            ]
        );
    }

    #[test]
    fn test_ecg_urgent_below_pain_seven() {
        let profile = PatientProfile::new("chest pain").with_age(25).with_pain(6);
        let tests = recommend_tests(&profile);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].urgency, TestUrgency::Urgent);
    }

    #[test]
    fn test_hypertensive_headache_panel() {
        let profile = PatientProfile::new("x")
            .with_age(35)
            .with_pain(8)
            .with_condition(conditions::HYPERTENSION)
            .with_symptom(symptoms::SEVERE_HEADACHE);

        assert_eq!(
            names(&profile),
            vec!["Blood Pressure Monitoring", "CT Brain (Non-contrast)"]
        );
    }

    #[test]
    fn test_chest_xray_urgency_follows_heart_disease() {
        let plain = PatientProfile::new("shortness of breath").with_age(25);
        assert_eq!(recommend_tests(&plain)[0].urgency, TestUrgency::Routine);

        let cardiac = plain.clone().with_condition(conditions::HEART_DISEASE);
        let tests = recommend_tests(&cardiac);
        assert_eq!(tests[0].urgency, TestUrgency::Urgent);
        assert_eq!(tests[1].name, "BNP or NT-proBNP");
    }

    #[test]
    fn test_fallback_adult_and_pediatric() {
        let adult = recommend_tests(&PatientProfile::new("tired").with_age(25));
        assert_eq!(adult.len(), 1);
        assert_eq!(adult[0].name, "Complete Blood Count");
        assert_eq!(adult[0].category, "Basic Assessment");

        let child = recommend_tests(&PatientProfile::new("tired").with_age(9));
        assert_eq!(child[0].category, "Pediatric Assessment");

        let unknown = recommend_tests(&PatientProfile::new("tired"));
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].category, "Pediatric Assessment");
    }

    #[test]
    fn test_grouping_preserves_order() {
        let profile = PatientProfile::new("chest pain")
            .with_age(58)
            .with_pain(9)
            .with_condition(conditions::DIABETES_TYPE_2);

        let groups = group_by_category(&recommend_tests(&profile));
        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Cardiac Emergency",
                "Cardiac Assessment",
                "Diabetic Monitoring",
                "Diabetic Complications",
                "Cardiovascular Screening",
            ]
        );
        assert_eq!(groups[0].tests.len(), 2);
        assert_eq!(groups[3].tests.len(), 2);
    }
}
