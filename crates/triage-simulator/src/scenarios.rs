//! Canned reference scenarios with their expected outcomes.
//!
//! Each scenario is run through a full consultation with "continue anyway"
//! so the risk and matcher outputs are available even when the gate fires.
//! Deviations are collected as mismatch lines rather than failing fast.

use serde::Serialize;
use tracing::{info, warn};

use triage_contracts::{
    assessment::RiskBand,
    error::TriageResult,
    profile::{conditions, PatientProfile, SymptomDuration},
    report::{Acknowledgement, ConsultationOutcome},
};
use triage_core::Consultation;

/// What a scenario is expected to produce. `None` fields are not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioExpectation {
    pub gate_fires: bool,
    pub band: RiskBand,
    pub score: Option<u32>,
    pub confidence: Option<u8>,
    pub override_applied: Option<bool>,
    /// Name and probability of the top-ranked candidate.
    pub top_condition: Option<(&'static str, u8)>,
}

#[derive(Debug, Clone)]
pub struct ReferenceScenario {
    pub id: &'static str,
    pub title: &'static str,
    pub profile: PatientProfile,
    pub expectation: ScenarioExpectation,
}

/// Observed outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    pub id: String,
    pub title: String,
    pub gate_fired: bool,
    /// `None` when the consultation never reached scoring.
    pub band: Option<RiskBand>,
    pub score: Option<u32>,
    pub confidence: Option<u8>,
    pub top_condition: Option<String>,
    pub mismatches: Vec<String>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// The four reference patients.
pub fn reference_scenarios() -> Vec<ReferenceScenario> {
    vec![
        ReferenceScenario {
            id: "elderly-cardiac-chest-pain",
            title: "70y with diabetes and heart disease, chest pain 8/10",
            profile: PatientProfile::new("chest pain")
                .with_age(70)
                .with_pain(8)
                .with_condition(conditions::DIABETES_TYPE_2)
                .with_condition(conditions::HEART_DISEASE),
            expectation: ScenarioExpectation {
                gate_fires: true,
                band: RiskBand::High,
                score: None,
                confidence: Some(90),
                override_applied: None,
                top_condition: Some(("Acute Coronary Syndrome", 85)),
            },
        },
        ReferenceScenario {
            id: "pediatric-hypertension-rash",
            title: "10y with hypertension, mild rash 2/10",
            profile: PatientProfile::new("mild rash")
                .with_age(10)
                .with_pain(2)
                .with_condition(conditions::HYPERTENSION),
            expectation: ScenarioExpectation {
                gate_fires: false,
                band: RiskBand::LowMedium,
                // condition tier +2, pediatric hypertension +2
                score: Some(4),
                confidence: Some(80),
                override_applied: Some(false),
                top_condition: None,
            },
        },
        ReferenceScenario {
            id: "chronic-headache",
            title: "55y, chronic headache 5/10",
            profile: PatientProfile::new("headache")
                .with_age(55)
                .with_pain(5)
                .with_duration(SymptomDuration::Chronic),
            expectation: ScenarioExpectation {
                gate_fires: false,
                band: RiskBand::LowMedium,
                score: Some(4),
                confidence: Some(80),
                override_applied: Some(false),
                top_condition: None,
            },
        },
        ReferenceScenario {
            id: "asthma-breathlessness",
            title: "30y with asthma, shortness of breath 9/10",
            profile: PatientProfile::new("shortness of breath")
                .with_age(30)
                .with_pain(9)
                .with_condition(conditions::ASTHMA),
            expectation: ScenarioExpectation {
                gate_fires: false,
                band: RiskBand::High,
                score: None,
                confidence: Some(90),
                override_applied: Some(true),
                top_condition: None,
            },
        },
    ]
}

/// Run one scenario and compare against its expectation.
pub fn run_scenario(
    consultation: &Consultation,
    scenario: &ReferenceScenario,
) -> TriageResult<ScenarioResult> {
    let gate_fired = consultation.check_emergency(&scenario.profile).is_emergency();
    let outcome = consultation.run(&scenario.profile, Acknowledgement::ContinueAnyway)?;
    Ok(compare(scenario, gate_fired, &outcome))
}

fn compare(
    scenario: &ReferenceScenario,
    gate_fired: bool,
    outcome: &ConsultationOutcome,
) -> ScenarioResult {
    let expected = &scenario.expectation;
    let mut result = ScenarioResult {
        id: scenario.id.to_string(),
        title: scenario.title.to_string(),
        gate_fired,
        band: None,
        score: None,
        confidence: None,
        top_condition: None,
        mismatches: Vec::new(),
    };
    let mismatches = &mut result.mismatches;

    if gate_fired != expected.gate_fires {
        mismatches.push(format!("gate fired: expected {}, got {}", expected.gate_fires, gate_fired));
    }

    let report = match outcome {
        ConsultationOutcome::Complete(report) => report,
        ConsultationOutcome::EscalationRequired { .. } => {
            mismatches.push("stopped at the emergency gate despite acknowledgement".to_string());
            warn!(scenario = scenario.id, "scenario never reached scoring");
            return result;
        }
    };

    let risk = &report.risk;
    let top = report.conditions.top();

    if risk.band != expected.band {
        mismatches.push(format!("band: expected {}, got {}", expected.band, risk.band));
    }
    if let Some(score) = expected.score.filter(|s| *s != risk.score) {
        mismatches.push(format!("score: expected {score}, got {}", risk.score));
    }
    if let Some(confidence) = expected.confidence.filter(|c| *c != risk.confidence) {
        mismatches.push(format!("confidence: expected {confidence}, got {}", risk.confidence));
    }
    if let Some(forced) = expected.override_applied.filter(|o| *o != risk.override_applied) {
        mismatches.push(format!("override: expected {forced}, got {}", risk.override_applied));
    }
    if let Some((name, probability)) = expected.top_condition {
        match top {
            Some(c) if c.name == name && c.probability == probability => {}
            Some(c) => mismatches.push(format!(
                "top condition: expected {name} ({probability}%), got {} ({}%)",
                c.name, c.probability
            )),
            None => mismatches.push(format!("top condition: expected {name}, got none")),
        }
    }

    if mismatches.is_empty() {
        info!(scenario = scenario.id, band = %risk.band, "scenario passed");
    } else {
        warn!(scenario = scenario.id, mismatches = mismatches.len(), "scenario deviated");
    }

    result.band = Some(risk.band);
    result.score = Some(risk.score);
    result.confidence = Some(risk.confidence);
    result.top_condition = top.map(|c| c.name.clone());
    result
}

/// Run every reference scenario in order.
pub fn run_reference_scenarios(consultation: &Consultation) -> TriageResult<Vec<ScenarioResult>> {
    reference_scenarios()
        .iter()
        .map(|s| run_scenario(consultation, s))
        .collect()
}
