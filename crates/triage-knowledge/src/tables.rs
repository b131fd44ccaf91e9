//! Knowledge-base table types.
//!
//! A `KnowledgeDocument` is deserialized from TOML and holds every static
//! table the engine reads: conditions, age bands, emergency patterns and the
//! common-symptom list, plus reference tables published for reviewers.
//!
//! Example in TOML:
//! ```toml
//! [[conditions]]
//! name = "Asthma"
//! localized_name = "दमा"
//! category = "Respiratory"
//! risk_tier = "medium"
//! complications = ["Breathing difficulties"]
//! ```

use serde::{Deserialize, Serialize};

use triage_contracts::{profile::Locale, recommendation::TestUrgency};
use triage_core::ClinicalSignals;

/// How much a chronic condition weighs in the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Medium,
    High,
}

impl RiskTier {
    /// Score contribution: high +2, medium +1.
    pub fn points(self) -> u32 {
        match self {
            RiskTier::High => 2,
            RiskTier::Medium => 1,
        }
    }
}

/// A chronic condition the patient can select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Canonical name. Unique across the table.
    pub name: String,
    pub localized_name: String,
    pub category: String,
    pub risk_tier: RiskTier,
    #[serde(default)]
    pub complications: Vec<String>,
}

impl ConditionRecord {
    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Hi => &self.localized_name,
        }
    }
}

/// Qualitative cardiac/diabetes risk attached to an age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualitativeRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl QualitativeRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            QualitativeRisk::Low => "low",
            QualitativeRisk::Moderate => "moderate",
            QualitativeRisk::High => "high",
            QualitativeRisk::VeryHigh => "very_high",
        }
    }
}

/// An inclusive age range with its typical concerns.
///
/// `max_age = None` means open-ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeRiskBand {
    pub min_age: u8,
    pub max_age: Option<u8>,
    pub concerns: Vec<String>,
    pub cardiac_risk: QualitativeRisk,
    pub diabetes_risk: QualitativeRisk,
}

impl AgeRiskBand {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min_age && self.max_age.map_or(true, |max| age <= max)
    }

    /// "18-30" or "71+".
    pub fn label(&self) -> String {
        match self.max_age {
            Some(max) => format!("{}-{}", self.min_age, max),
            None => format!("{}+", self.min_age),
        }
    }
}

/// A declarative emergency rule.
///
/// Every declared clause must hold. The complaint keywords and the picked
/// symptoms form a single clause: either one satisfies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyPattern {
    /// Stable identifier used in logs.
    pub id: String,
    /// Human-readable reason shown on escalation.
    pub reason: String,
    /// Lower-case substrings searched in the complaint.
    #[serde(default)]
    pub complaint_any: Vec<String>,
    /// Associated-symptom names (case-insensitive).
    #[serde(default)]
    pub symptoms_any: Vec<String>,
    #[serde(default)]
    pub conditions_any: Vec<String>,
    pub min_pain: Option<u8>,
    pub min_age: Option<u8>,
}

impl EmergencyPattern {
    /// True if the pattern declares no clause at all.
    pub fn is_unconstrained(&self) -> bool {
        self.complaint_any.is_empty()
            && self.symptoms_any.is_empty()
            && self.conditions_any.is_empty()
            && self.min_pain.is_none()
            && self.min_age.is_none()
    }

    /// Return true if every declared clause holds for `signals`.
    ///
    /// A missing age or pain level fails the corresponding floor.
    pub fn matches(&self, signals: &ClinicalSignals<'_>) -> bool {
        let presentation = (self.complaint_any.is_empty() && self.symptoms_any.is_empty())
            || signals.complaint_mentions_any(&self.complaint_any)
            || signals.reports_any_symptom(&self.symptoms_any);

        let condition =
            self.conditions_any.is_empty() || signals.has_any_condition(&self.conditions_any);

        let pain = self.min_pain.map_or(true, |min| signals.pain_at_least(min));
        let age = self.min_age.map_or(true, |min| signals.age_at_least(min));

        presentation && condition && pain && age
    }
}

/// An entry in the symptom picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonSymptom {
    pub name: String,
    pub localized_name: String,
}

impl CommonSymptom {
    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Hi => &self.localized_name,
        }
    }
}

/// Reference: a test in the diagnostic catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTest {
    pub name: String,
    pub cost: String,
    pub urgency: TestUrgency,
    pub purpose: String,
}

/// Reference: catalog tests grouped by the symptoms that suggest them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCatalogCategory {
    pub category: String,
    pub symptoms: Vec<String>,
    pub tests: Vec<CatalogTest>,
}

/// Reference: a symptom/condition combination and the disease it suggests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomDiseaseEntry {
    pub symptom: String,
    pub severity: String,
    pub conditions: Vec<String>,
    pub probability: u8,
    pub disease: String,
    pub tests: Vec<String>,
    pub urgency: String,
}

/// Reference: an emergency protocol and its first-line tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyProtocol {
    pub symptoms: Vec<String>,
    pub conditions: Vec<String>,
    pub action: String,
    pub tests: Vec<String>,
}

/// The top-level structure deserialized from the knowledge-base TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub conditions: Vec<ConditionRecord>,
    pub age_bands: Vec<AgeRiskBand>,
    pub emergency_patterns: Vec<EmergencyPattern>,
    #[serde(default)]
    pub common_symptoms: Vec<CommonSymptom>,
    #[serde(default)]
    pub test_catalog: Vec<TestCatalogCategory>,
    #[serde(default)]
    pub symptom_disease_matrix: Vec<SymptomDiseaseEntry>,
    #[serde(default)]
    pub emergency_protocols: Vec<EmergencyProtocol>,
}
