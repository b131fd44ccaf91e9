//! Personalized treatment plan.
//!
//! Three sections, each assembled from condition and complaint blocks in a
//! fixed order. The risk band is recorded on the plan; the content itself
//! depends only on the profile.

use triage_contracts::{
    assessment::RiskAssessment,
    profile::{conditions, PatientProfile},
    recommendation::{CareAction, TreatmentPlan},
};
use triage_core::ClinicalSignals;

fn actions(items: &[(&str, &str)]) -> Vec<CareAction> {
    items
        .iter()
        .map(|(label, detail)| CareAction::new(*label, *detail))
        .collect()
}

pub fn build_treatment_plan(profile: &PatientProfile, risk: &RiskAssessment) -> TreatmentPlan {
    let signals = ClinicalSignals::new(profile);
    let has_hypertension = signals.has_condition(conditions::HYPERTENSION);
    let has_heart_disease = signals.has_condition(conditions::HEART_DISEASE);

    // ── Immediate actions ────────────────────────────────────────────────────
    let mut immediate = Vec::new();

    if signals.has_diabetes() {
        immediate.extend(actions(&[
            ("Blood Sugar Management", "Check glucose levels immediately if symptomatic"),
            ("Medication Adherence", "Ensure consistent timing of diabetes medications"),
            ("Dietary Control", "Follow diabetic diet, avoid high-sugar foods"),
        ]));
        if signals.complaint_mentions("frequent urination") {
            immediate.push(CareAction::new(
                "Urgent",
                "Check for ketones if blood sugar >250 mg/dL",
            ));
        }
    }

    if has_hypertension {
        immediate.extend(actions(&[
            ("Blood Pressure Monitoring", "Check BP twice daily"),
            ("Medication Compliance", "Take BP medications as prescribed, never skip doses"),
            ("Sodium Restriction", "Limit salt intake to <2g/day"),
        ]));
        if signals.complaint_mentions("headache") && signals.pain_at_least(7) {
            immediate.push(CareAction::new(
                "Emergency",
                "Seek immediate care if BP >180/110 mmHg",
            ));
        }
    }

    if has_heart_disease {
        immediate.extend(actions(&[
            ("Activity Modification", "Avoid strenuous activities until evaluated"),
            ("Cardiac Medications", "Continue all heart medications as prescribed"),
            ("Weight Monitoring", "Daily weight checks for fluid retention"),
        ]));
    }

    if signals.complaint_mentions("chest pain") {
        immediate.extend(actions(&[
            ("Position", "Sit upright, loosen tight clothing"),
            ("Avoid", "Physical exertion, emotional stress"),
            ("Emergency Plan", "Know location of nearest emergency room"),
        ]));
    }

    if signals.pain_at_least(6) {
        immediate.push(CareAction::new(
            "Pain Management",
            "Use appropriate pain relief as directed by doctor",
        ));
    }

    // ── Lifestyle ────────────────────────────────────────────────────────────
    let mut lifestyle = Vec::new();

    if signals.age_at_least(60) {
        lifestyle.extend(actions(&[
            ("Fall Prevention", "Ensure good lighting, remove tripping hazards"),
            ("Medication Review", "Regular review with pharmacist for interactions"),
        ]));
    }

    if signals.condition_count() >= 2 {
        lifestyle.push(CareAction::new(
            "Care Coordination",
            "Inform all doctors about your complete medical history",
        ));
    }

    lifestyle.extend(actions(&[
        ("Stress Management", "Practice relaxation techniques, adequate sleep"),
        ("Nutrition", "Balanced diet appropriate for your medical conditions"),
        ("Hydration", "Maintain adequate fluid intake unless restricted"),
    ]));

    // ── Red flags ────────────────────────────────────────────────────────────
    let mut red_flags: Vec<String> = Vec::new();

    if signals.has_diabetes() {
        red_flags.push("Blood sugar >400 mg/dL or <70 mg/dL with symptoms".into());
        red_flags.push("Ketones in urine with nausea/vomiting".into());
    }
    if has_heart_disease {
        red_flags.push("New or worsening chest pain".into());
        red_flags.push("Sudden shortness of breath or leg swelling".into());
    }
    if has_hypertension {
        red_flags.push("Blood pressure >180/110 with symptoms".into());
    }
    red_flags.extend(
        [
            "Severe worsening of current symptoms",
            "New neurological symptoms (weakness, speech changes)",
            "Difficulty breathing or chest pain",
        ]
        .map(String::from),
    );

    TreatmentPlan {
        risk_band: risk.band,
        immediate_actions: immediate,
        lifestyle,
        red_flags,
    }
}

#[cfg(test)]
mod tests {
    use triage_contracts::{
        assessment::{RiskAssessment, RiskBand},
        profile::{conditions, PatientProfile},
        recommendation::CareAction,
    };

    use super::build_treatment_plan;

    fn risk(band: RiskBand) -> RiskAssessment {
        RiskAssessment {
            band,
            score: 0,
            factors: vec![],
            message: String::new(),
            confidence: 75,
            override_applied: false,
        }
    }

    fn labels(plan_actions: &[CareAction]) -> Vec<&str> {
        plan_actions.iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn test_minimal_plan_has_static_sections() {
        let plan = build_treatment_plan(&PatientProfile::new("cough"), &risk(RiskBand::Low));

        assert!(plan.immediate_actions.is_empty());
        assert_eq!(
            labels(&plan.lifestyle),
            vec!["Stress Management", "Nutrition", "Hydration"]
        );
        assert_eq!(plan.red_flags.len(), 3);
        assert_eq!(plan.risk_band, RiskBand::Low);
    }

    #[test]
    fn test_diabetic_urinary_adds_ketone_check() {
        let profile = PatientProfile::new("frequent urination at night")
            .with_condition(conditions::DIABETES_TYPE_1);
        let plan = build_treatment_plan(&profile, &risk(RiskBand::LowMedium));

        assert_eq!(
            labels(&plan.immediate_actions),
            vec!["Blood Sugar Management", "Medication Adherence", "Dietary Control", "Urgent"]
        );
        assert_eq!(plan.red_flags[0], "Blood sugar >400 mg/dL or <70 mg/dL with symptoms");
    }

    #[test]
    fn test_hypertensive_headache_emergency_line() {
        let profile = PatientProfile::new("headache")
            .with_pain(7)
            .with_condition(conditions::HYPERTENSION);
        let plan = build_treatment_plan(&profile, &risk(RiskBand::Medium));

        let labels = labels(&plan.immediate_actions);
        assert!(labels.contains(&"Emergency"));
        assert!(labels.contains(&"Pain Management"));
        assert!(plan
            .red_flags
            .contains(&"Blood pressure >180/110 with symptoms".to_string()));
    }

    #[test]
    fn test_elderly_multimorbid_lifestyle() {
        let profile = PatientProfile::new("chest pain")
            .with_age(72)
            .with_condition(conditions::HEART_DISEASE)
            .with_condition(conditions::ASTHMA);
        let plan = build_treatment_plan(&profile, &risk(RiskBand::High));

        assert_eq!(
            labels(&plan.lifestyle)[..3].to_vec(),
            vec!["Fall Prevention", "Medication Review", "Care Coordination"]
        );
        assert!(labels(&plan.immediate_actions).contains(&"Position"));
        assert_eq!(plan.risk_band, RiskBand::High);
    }

    #[test]
    fn test_content_independent_of_band() {
        let profile = PatientProfile::new("chest pain").with_condition(conditions::HEART_DISEASE);
        let low = build_treatment_plan(&profile, &risk(RiskBand::Low));
        let high = build_treatment_plan(&profile, &risk(RiskBand::High));
        assert_eq!(low.immediate_actions, high.immediate_actions);
        assert_eq!(low.red_flags, high.red_flags);
    }
}
