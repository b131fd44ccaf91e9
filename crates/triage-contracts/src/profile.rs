//! Patient profile types.
//!
//! A `PatientProfile` is assembled by the host from the intake form and handed
//! to the engine as an immutable snapshot. Numeric fields are optional: a
//! missing age or pain level never satisfies a numeric rule.

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical chronic-condition names. These are the join keys used by the
/// knowledge base and every rule table.
pub mod conditions {
    pub const DIABETES_TYPE_1: &str = "Diabetes Type 1";
    pub const DIABETES_TYPE_2: &str = "Diabetes Type 2";
    pub const HYPERTENSION: &str = "Hypertension";
    pub const HEART_DISEASE: &str = "Heart Disease";
    pub const ASTHMA: &str = "Asthma";
    pub const KIDNEY_DISEASE: &str = "Kidney Disease";
    pub const ARTHRITIS: &str = "Arthritis";
    pub const HIGH_CHOLESTEROL: &str = "High Cholesterol";
    pub const THYROID_DISORDERS: &str = "Thyroid Disorders";
    pub const COPD: &str = "COPD";
}

/// Canonical associated-symptom names as offered by the symptom picker.
pub mod symptoms {
    pub const CHEST_PAIN: &str = "Chest pain";
    pub const SHORTNESS_OF_BREATH: &str = "Shortness of breath";
    pub const SEVERE_HEADACHE: &str = "Severe headache";
    pub const FREQUENT_URINATION: &str = "Frequent urination";
}

/// Language tag used to pick localized labels from the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
}

/// Coarse age bracket derived from the exact age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeGroup {
    /// Bracket an exact age: child ≤12, teen ≤19, adult ≤59, senior otherwise.
    pub fn from_age(age: u8) -> Self {
        match age {
            0..=12 => AgeGroup::Child,
            13..=19 => AgeGroup::Teen,
            20..=59 => AgeGroup::Adult,
            _ => AgeGroup::Senior,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Child => "child",
            AgeGroup::Teen => "teen",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }

    /// The age assumed when a patient picks a bracket instead of typing an age.
    pub fn representative_age(self) -> u8 {
        match self {
            AgeGroup::Child => 8,
            AgeGroup::Teen => 16,
            AgeGroup::Adult => 35,
            AgeGroup::Senior => 65,
        }
    }
}

/// How long the primary complaint has been present.
///
/// Serialized with the bucket identifiers the intake form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomDuration {
    #[serde(rename = "hours")]
    FewHours,
    #[serde(rename = "1-2days")]
    OneToTwoDays,
    #[serde(rename = "3-7days")]
    ThreeToSevenDays,
    #[serde(rename = "1-2weeks")]
    OneToTwoWeeks,
    #[serde(rename = "2weeks+")]
    MoreThanTwoWeeks,
    #[serde(rename = "chronic")]
    Chronic,
}

impl SymptomDuration {
    pub const ALL: [SymptomDuration; 6] = [
        SymptomDuration::FewHours,
        SymptomDuration::OneToTwoDays,
        SymptomDuration::ThreeToSevenDays,
        SymptomDuration::OneToTwoWeeks,
        SymptomDuration::MoreThanTwoWeeks,
        SymptomDuration::Chronic,
    ];

    /// The wire identifier for this bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            SymptomDuration::FewHours => "hours",
            SymptomDuration::OneToTwoDays => "1-2days",
            SymptomDuration::ThreeToSevenDays => "3-7days",
            SymptomDuration::OneToTwoWeeks => "1-2weeks",
            SymptomDuration::MoreThanTwoWeeks => "2weeks+",
            SymptomDuration::Chronic => "chronic",
        }
    }
}

/// Everything the patient reported during one consultation.
///
/// The engine only ever borrows this; no generator mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientProfile {
    /// Locale the report labels should be rendered in.
    pub locale: Locale,
    pub patient_name: Option<String>,
    /// Age in years (1–120 once validated at intake).
    pub age: Option<u8>,
    /// Selected chronic conditions, in selection order, without duplicates.
    #[serde(deserialize_with = "distinct_conditions")]
    pub medical_conditions: Vec<String>,
    pub current_medications: String,
    pub family_history: String,
    /// Free-text description of the main symptom.
    pub primary_complaint: String,
    pub symptom_duration: Option<SymptomDuration>,
    /// Self-reported severity on a 1–10 scale.
    pub pain_level: Option<u8>,
    /// Structured symptoms picked from the common-symptom list.
    #[serde(deserialize_with = "distinct_symptoms")]
    pub associated_symptoms: Vec<String>,
    pub recent_changes: String,
}

impl PatientProfile {
    /// Start a profile from the primary complaint.
    pub fn new(primary_complaint: impl Into<String>) -> Self {
        Self {
            primary_complaint: primary_complaint.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_pain(mut self, pain_level: u8) -> Self {
        self.pain_level = Some(pain_level);
        self
    }

    pub fn with_duration(mut self, duration: SymptomDuration) -> Self {
        self.symptom_duration = Some(duration);
        self
    }

    /// Add a chronic condition. Selecting the same condition twice is a no-op.
    pub fn with_condition(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.medical_conditions.contains(&name) {
            self.medical_conditions.push(name);
        }
        self
    }

    /// Add an associated symptom. Duplicates (ignoring case) are dropped.
    pub fn with_symptom(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let exists = self
            .associated_symptoms
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&name));
        if !exists {
            self.associated_symptoms.push(name);
        }
        self
    }

    /// The bracket for the recorded age, if any.
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.map(AgeGroup::from_age)
    }
}

// Repeated names collapse on the way in, with the same rules as the builders.

fn distinct_conditions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    let profile = names
        .into_iter()
        .fold(PatientProfile::default(), |p, name| p.with_condition(name));
    Ok(profile.medical_conditions)
}

fn distinct_symptoms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    let profile = names
        .into_iter()
        .fold(PatientProfile::default(), |p, name| p.with_symptom(name));
    Ok(profile.associated_symptoms)
}
