//! Cross-crate properties of the built-in engine.

use std::sync::Arc;

use triage_contracts::{
    assessment::RiskBand,
    findings::ConditionAnalysis,
    profile::{conditions, symptoms, PatientProfile},
    report::{Acknowledgement, ConsultationOutcome, TriageReport},
};
use triage_core::{digest::verify_digest, traits::RiskScorer, Consultation};
use triage_knowledge::KnowledgeBase;
use triage_rules::{engine, WeightedRiskScorer};
use triage_simulator::{
    reference_scenarios, run_diagnostic_simulation, run_scenario, ProfileSource,
    RandomProfileGenerator,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::builtin().unwrap())
}

fn complete(consultation: &Consultation, profile: &PatientProfile) -> TriageReport {
    match consultation
        .run(profile, Acknowledgement::ContinueAnyway)
        .unwrap()
    {
        ConsultationOutcome::Complete(report) => *report,
        other => panic!("expected Complete, got {:?}", other),
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn test_same_profile_same_digest() {
    let consultation = engine(kb());
    let profile = PatientProfile::new("Chest pain after climbing stairs")
        .with_age(62)
        .with_pain(6)
        .with_condition(conditions::HIGH_CHOLESTEROL)
        .with_symptom(symptoms::CHEST_PAIN);

    let first = complete(&consultation, &profile);
    let second = complete(&consultation, &profile);

    assert_ne!(first.consultation_id, second.consultation_id);
    assert_eq!(first.digest, second.digest);
    assert_eq!(first.risk, second.risk);
    assert!(verify_digest(&first).unwrap());
}

#[test]
fn test_seeded_simulation_repeats() {
    let kb = kb();
    let scorer = WeightedRiskScorer::new(Arc::clone(&kb));

    let mut a = RandomProfileGenerator::new(&kb, Some(2024));
    let mut b = RandomProfileGenerator::new(&kb, Some(2024));
    let first = run_diagnostic_simulation(200, &mut a, &scorer);
    let second = run_diagnostic_simulation(200, &mut b, &scorer);

    assert_eq!(first, second);
    assert_eq!(first.band_counts.values().sum::<usize>(), 200);
}

// ── Scoring properties ────────────────────────────────────────────────────────

#[test]
fn test_band_monotone_in_pain() {
    let scorer = WeightedRiskScorer::new(kb());
    let base = PatientProfile::new("lower back pain")
        .with_age(72)
        .with_condition(conditions::HYPERTENSION);

    let bands: Vec<RiskBand> = (3..=9)
        .map(|pain| scorer.assess(&base.clone().with_pain(pain)).band)
        .collect();

    assert!(bands.windows(2).all(|w| w[0] <= w[1]), "bands: {:?}", bands);
    assert_eq!(bands.first(), Some(&RiskBand::Medium));
    assert_eq!(bands.last(), Some(&RiskBand::High));
}

#[test]
fn test_respiratory_override_beats_low_total() {
    let scorer = WeightedRiskScorer::new(kb());
    let profile = PatientProfile::new("shortness of breath at night")
        .with_age(25)
        .with_pain(9)
        .with_condition(conditions::ASTHMA);

    let risk = scorer.assess(&profile);
    assert!(risk.score < 8, "score {} would reach HIGH on its own", risk.score);
    assert!(risk.override_applied);
    assert_eq!(risk.band, RiskBand::High);
    assert_eq!(risk.confidence, 90);
}

// ── Generator outputs ─────────────────────────────────────────────────────────

#[test]
fn test_matcher_truncates_to_three() {
    let consultation = engine(kb());
    let profile = PatientProfile::new("chest pain and headache")
        .with_age(60)
        .with_condition(conditions::DIABETES_TYPE_1)
        .with_condition(conditions::HYPERTENSION)
        .with_condition(conditions::HEART_DISEASE)
        .with_symptom(symptoms::FREQUENT_URINATION)
        .with_symptom(symptoms::SHORTNESS_OF_BREATH);

    // cardiac, hypertensive, diabetic and respiratory groups all fire
    let report = complete(&consultation, &profile);
    assert_eq!(report.conditions.len(), ConditionAnalysis::MAX_CANDIDATES);
    let names: Vec<&str> = report.conditions.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Acute Coronary Syndrome", "Hypertensive Crisis", "Poor Diabetic Control"]
    );
}

#[test]
fn test_generators_never_empty() {
    let kb = kb();
    let consultation = engine(Arc::clone(&kb));
    let complaints = [
        "",
        "chest pain",
        "headache",
        "frequent urination",
        "difficulty breathing",
        "itchy eyes",
    ];

    for (i, complaint) in complaints.iter().enumerate() {
        let mut source = RandomProfileGenerator::new(&kb, Some(i as u64))
            .with_template(PatientProfile::new(*complaint));
        for _ in 0..40 {
            let profile = source.next_profile();
            let report = complete(&consultation, &profile);
            assert!(!report.conditions.is_empty(), "no candidates for {:?}", profile);
            assert!(report.conditions.len() <= ConditionAnalysis::MAX_CANDIDATES);
            assert!(!report.tests.is_empty(), "no tests for {:?}", profile);
            assert!(!report.specialists.is_empty(), "no referrals for {:?}", profile);
        }
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[test]
fn test_reference_scenarios() {
    let consultation = engine(kb());
    let scenarios = reference_scenarios();
    assert_eq!(scenarios.len(), 4);

    for scenario in &scenarios {
        let result = run_scenario(&consultation, scenario).unwrap();
        assert!(result.passed(), "{}: {:?}", result.id, result.mismatches);
    }
}

#[test]
fn test_first_scenario_stops_without_acknowledgement() {
    let consultation = engine(kb());
    let scenario = &reference_scenarios()[0];

    match consultation.run(&scenario.profile, Acknowledgement::None).unwrap() {
        ConsultationOutcome::EscalationRequired { reasons, .. } => {
            assert_eq!(
                reasons,
                vec!["Chest pain with diabetes/heart disease - High cardiac risk".to_string()]
            );
        }
        other => panic!("expected EscalationRequired, got {:?}", other),
    }
}
