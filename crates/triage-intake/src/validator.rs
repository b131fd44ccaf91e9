//! Intake validator for submitted patient profiles.
//!
//! Validation runs in two phases:
//!
//! 1. **Structural**: the payload is validated against `profile_schema()`
//!    (types, age 1–120, pain 1–10, known duration bucket).
//! 2. **Semantic**: name present, an age or age group given, and a complaint
//!    of at least three non-blank characters.
//!
//! All failures are collected so the host can show every problem at once.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use triage_contracts::{
    error::{TriageError, TriageResult},
    profile::{AgeGroup, PatientProfile},
};

use crate::schema::profile_schema;

/// Minimum complaint length, counted in characters after trimming.
pub const MIN_COMPLAINT_CHARS: usize = 3;

/// One failed intake check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeFailure {
    /// `json-schema` for structural failures, the rule id otherwise.
    pub rule_id: String,
    pub message: String,
}

/// The outcome of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReport {
    /// True only if every check passed.
    pub passed: bool,
    pub failures: Vec<IntakeFailure>,
}

impl IntakeReport {
    /// Failure messages joined for a single error line.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The wire form: a profile plus the optional age-group shortcut.
#[derive(Debug, Deserialize)]
struct IntakeForm {
    #[serde(flatten)]
    profile: PatientProfile,
    #[serde(default)]
    age_group: Option<AgeGroup>,
}

/// Validates and parses intake payloads.
///
/// The schema is compiled once in `new` and reused for every payload.
pub struct ProfileValidator {
    schema: jsonschema::Validator,
}

impl ProfileValidator {
    /// Compile the intake schema.
    pub fn new() -> TriageResult<Self> {
        let schema = jsonschema::validator_for(&profile_schema()).map_err(|e| {
            TriageError::Config {
                reason: format!("invalid intake schema: {e}"),
            }
        })?;
        Ok(Self { schema })
    }

    /// Run every check against `payload` and report all failures.
    pub fn validate(&self, payload: &Value) -> IntakeReport {
        let mut failures: Vec<IntakeFailure> = Vec::new();

        // ── Phase 1: structural ──────────────────────────────────────────────
        for error in self.schema.iter_errors(payload) {
            let message = format!("{} at {}", error, error.instance_path);
            warn!(%message, "intake schema violation");
            failures.push(IntakeFailure {
                rule_id: "json-schema".to_string(),
                message,
            });
        }

        // ── Phase 2: semantic ────────────────────────────────────────────────
        let non_blank = |field: &str| {
            payload
                .get(field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let mut fail = |rule_id: &str, message: &str| {
            warn!(rule_id, message, "intake rule failed");
            failures.push(IntakeFailure {
                rule_id: rule_id.to_string(),
                message: message.to_string(),
            });
        };

        if non_blank("patient_name").is_none() {
            fail("patient-name", "patient name is required");
        }

        let has_age = payload.get("age").is_some_and(|v| !v.is_null());
        let has_group = payload.get("age_group").is_some_and(|v| !v.is_null());
        if !has_age && !has_group {
            fail("age-present", "an age or an age group is required");
        }

        let complaint_chars = non_blank("primary_complaint").map_or(0, |s| s.chars().count());
        if complaint_chars < MIN_COMPLAINT_CHARS {
            fail(
                "complaint-length",
                "primary complaint must be at least 3 characters",
            );
        }

        let passed = failures.is_empty();
        debug!(passed, failure_count = failures.len(), "intake validation complete");
        IntakeReport { passed, failures }
    }

    /// Validate, then deserialize into a `PatientProfile`.
    ///
    /// Text fields are trimmed, duplicate conditions and symptoms collapse,
    /// and an age group given without an age maps to its representative age.
    pub fn parse(&self, payload: &Value) -> TriageResult<PatientProfile> {
        let report = self.validate(payload);
        if !report.passed {
            return Err(TriageError::InvalidProfile {
                reason: report.summary(),
            });
        }

        let form: IntakeForm = serde_json::from_value(integral_numbers(payload.clone()))
            .map_err(|e| TriageError::Serialization {
                reason: format!("failed to decode intake payload: {e}"),
            })?;

        Ok(normalize(form))
    }

    /// Parse a JSON document.
    pub fn parse_str(&self, json: &str) -> TriageResult<PatientProfile> {
        let payload: Value = serde_json::from_str(json).map_err(|e| TriageError::Serialization {
            reason: format!("intake payload is not valid JSON: {e}"),
        })?;
        self.parse(&payload)
    }
}

/// The schema accepts `35.0` as an integer; rewrite such values so they
/// decode into the profile's integer fields.
fn integral_numbers(mut payload: Value) -> Value {
    for field in ["age", "pain_level"] {
        let Some(slot) = payload.get_mut(field) else {
            continue;
        };
        if slot.is_u64() {
            continue;
        }
        if let Some(n) = slot.as_f64().filter(|n| n.fract() == 0.0 && *n >= 0.0) {
            *slot = Value::from(n as u64);
        }
    }
    payload
}

fn normalize(form: IntakeForm) -> PatientProfile {
    let IntakeForm { profile: raw, age_group } = form;

    let mut profile = PatientProfile {
        locale: raw.locale,
        patient_name: raw.patient_name.map(|n| n.trim().to_string()),
        age: raw.age.or_else(|| age_group.map(AgeGroup::representative_age)),
        medical_conditions: Vec::new(),
        current_medications: raw.current_medications.trim().to_string(),
        family_history: raw.family_history.trim().to_string(),
        primary_complaint: raw.primary_complaint.trim().to_string(),
        symptom_duration: raw.symptom_duration,
        pain_level: raw.pain_level,
        associated_symptoms: Vec::new(),
        recent_changes: raw.recent_changes.trim().to_string(),
    };

    for condition in raw.medical_conditions {
        profile = profile.with_condition(condition.trim());
    }
    for symptom in raw.associated_symptoms {
        profile = profile.with_symptom(symptom.trim());
    }
    profile
}

/// Validate and parse a JSON document with a freshly compiled validator.
pub fn parse_profile(json: &str) -> TriageResult<PatientProfile> {
    ProfileValidator::new()?.parse_str(json)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
