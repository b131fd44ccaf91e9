//! Follow-up protocol.
//!
//! Urgency tier: urgent if pain ≥8 or heart disease, prompt if pain ≥6 or two
//! or more conditions, routine otherwise. Each tier has a fixed four-step
//! timeline.

use triage_contracts::{
    assessment::RiskAssessment,
    profile::{conditions, PatientProfile},
    recommendation::{CareAction, FollowupPlan, FollowupUrgency, TimelineEntry},
};
use triage_core::ClinicalSignals;

pub const EMERGENCY_CRITERIA: [&str; 6] = [
    "Chest pain with sweating, nausea, or shortness of breath",
    "Severe headache with vision changes or confusion",
    "Difficulty breathing or speaking",
    "Blood pressure >200/120 with symptoms",
    "Blood sugar <50 or >400 with ketones",
    "Any symptom that causes severe concern",
];

const SELF_CARE: [(&str, &str); 4] = [
    ("Symptom Diary", "Track pain levels, timing, triggers, and relief measures"),
    ("Vital Signs", "Regular monitoring appropriate for your conditions"),
    ("Medication Log", "Track effectiveness and side effects"),
    ("Quality of Life", "Note impact on daily activities and sleep"),
];

pub fn followup_urgency(signals: &ClinicalSignals<'_>) -> FollowupUrgency {
    if signals.pain_at_least(8) || signals.has_condition(conditions::HEART_DISEASE) {
        FollowupUrgency::Urgent
    } else if signals.pain_at_least(6) || signals.condition_count() >= 2 {
        FollowupUrgency::Prompt
    } else {
        FollowupUrgency::Routine
    }
}

fn timeline(urgency: FollowupUrgency) -> Vec<TimelineEntry> {
    let steps: [(&str, &str); 4] = match urgency {
        FollowupUrgency::Urgent => [
            ("Immediate (Today)", "Monitor symptoms every 2 hours, check vital signs"),
            ("Within 24 hours", "Medical evaluation with your primary care provider"),
            ("48-72 hours", "Specialist consultation if symptoms persist"),
            ("1 week", "Reassess treatment response and medication effectiveness"),
        ],
        FollowupUrgency::Prompt => [
            ("Within 2-3 days", "Schedule appointment with primary care physician"),
            ("1 week", "Follow-up to assess symptom improvement"),
            ("2-3 weeks", "Medication review and adjustment if needed"),
            ("1 month", "Comprehensive review of treatment plan"),
        ],
        FollowupUrgency::Routine => [
            ("Within 1 week", "If symptoms worsen or new symptoms develop"),
            ("2-3 weeks", "Routine follow-up with healthcare provider"),
            ("1-2 months", "Progress evaluation and preventive care review"),
            ("3-6 months", "Comprehensive health assessment"),
        ],
    };
    steps
        .iter()
        .map(|(when, action)| TimelineEntry {
            when: when.to_string(),
            action: action.to_string(),
        })
        .collect()
}

fn monitoring(signals: &ClinicalSignals<'_>) -> Vec<CareAction> {
    let mut items = Vec::new();
    if signals.has_diabetes() {
        items.push(CareAction::new("Blood Sugar", "Check 2-4 times daily, log results"));
        items.push(CareAction::new("HbA1c", "Every 3 months"));
        items.push(CareAction::new(
            "Annual Screening",
            "Eye exam, kidney function, foot exam",
        ));
    }
    if signals.has_condition(conditions::HYPERTENSION) {
        items.push(CareAction::new(
            "Blood Pressure",
            "Daily monitoring, same time each day",
        ));
        items.push(CareAction::new("Medication Review", "Every 3-6 months"));
        items.push(CareAction::new(
            "Lifestyle Assessment",
            "Diet, exercise, stress management",
        ));
    }
    if signals.has_condition(conditions::HEART_DISEASE) {
        items.push(CareAction::new(
            "Daily Weight",
            "Watch for fluid retention (>2 lbs gain in 2 days)",
        ));
        items.push(CareAction::new(
            "Activity Tolerance",
            "Monitor shortness of breath with exertion",
        ));
        items.push(CareAction::new(
            "Medication Adherence",
            "Never stop heart medications without doctor consultation",
        ));
    }
    items
}

pub fn build_followup_plan(profile: &PatientProfile, risk: &RiskAssessment) -> FollowupPlan {
    let signals = ClinicalSignals::new(profile);
    let urgency = followup_urgency(&signals);

    FollowupPlan {
        risk_band: risk.band,
        urgency,
        timeline: timeline(urgency),
        monitoring: monitoring(&signals),
        emergency_criteria: EMERGENCY_CRITERIA.iter().map(|c| c.to_string()).collect(),
        self_care: SELF_CARE
            .iter()
            .map(|(label, detail)| CareAction::new(*label, *detail))
            .collect(),
    }
}
