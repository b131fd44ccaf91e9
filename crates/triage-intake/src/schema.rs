//! The JSON Schema for an intake payload.
//!
//! Field names match `PatientProfile`'s serde representation, plus the
//! optional `age_group` a patient picks instead of typing an age.

use serde_json::{json, Value};

use triage_contracts::profile::SymptomDuration;

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;
pub const MIN_PAIN: u8 = 1;
pub const MAX_PAIN: u8 = 10;

/// Build the structural schema. Duration buckets come from `SymptomDuration`.
pub fn profile_schema() -> Value {
    let mut durations: Vec<Value> = SymptomDuration::ALL
        .iter()
        .map(|d| Value::String(d.as_str().to_string()))
        .collect();
    durations.push(Value::Null);

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "locale": { "enum": ["en", "hi"] },
            "patient_name": { "type": ["string", "null"] },
            "age": {
                "type": ["integer", "null"],
                "minimum": MIN_AGE,
                "maximum": MAX_AGE
            },
            "age_group": { "enum": ["child", "teen", "adult", "senior", null] },
            "medical_conditions": { "type": "array", "items": { "type": "string" } },
            "current_medications": { "type": "string" },
            "family_history": { "type": "string" },
            "primary_complaint": { "type": "string" },
            "symptom_duration": { "enum": durations },
            "pain_level": {
                "type": ["integer", "null"],
                "minimum": MIN_PAIN,
                "maximum": MAX_PAIN
            },
            "associated_symptoms": { "type": "array", "items": { "type": "string" } },
            "recent_changes": { "type": "string" }
        },
        "required": ["primary_complaint"]
    })
}
