//! Normalized view over a patient profile.
//!
//! Rules detect presentations two ways, kept separate here:
//!
//! - **Text**: substring search in the lower-cased free-text complaint.
//! - **Structured**: case-insensitive membership in the associated-symptom set.
//!
//! Chronic conditions are matched exactly against their canonical names.
//! Numeric checks treat a missing age or pain level as "does not match".

use triage_contracts::profile::{conditions, PatientProfile};

/// Read-only, pre-normalized signals for one profile snapshot.
#[derive(Debug, Clone)]
pub struct ClinicalSignals<'a> {
    profile: &'a PatientProfile,
    complaint: String,
    symptoms: Vec<String>,
}

impl<'a> ClinicalSignals<'a> {
    pub fn new(profile: &'a PatientProfile) -> Self {
        Self {
            profile,
            complaint: profile.primary_complaint.trim().to_lowercase(),
            symptoms: profile
                .associated_symptoms
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn profile(&self) -> &'a PatientProfile {
        self.profile
    }

    /// The lower-cased complaint text.
    pub fn complaint(&self) -> &str {
        &self.complaint
    }

    // ── Text path ────────────────────────────────────────────────────────────

    /// True if the complaint contains `keyword` (case-insensitive).
    /// An empty keyword never matches.
    pub fn complaint_mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        !keyword.is_empty() && self.complaint.contains(&keyword)
    }

    pub fn complaint_mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.iter().any(|k| self.complaint_mentions(k.as_ref()))
    }

    // ── Structured path ──────────────────────────────────────────────────────

    /// True if `name` was picked as an associated symptom (case-insensitive).
    pub fn reports_symptom(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.symptoms.iter().any(|s| *s == name)
    }

    pub fn reports_any_symptom<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.reports_symptom(n.as_ref()))
    }

    /// Either path: the complaint mentions `keyword` or `symptom` was picked.
    pub fn presents_with(&self, keyword: &str, symptom: &str) -> bool {
        self.complaint_mentions(keyword) || self.reports_symptom(symptom)
    }

    // ── Conditions ───────────────────────────────────────────────────────────

    pub fn has_condition(&self, name: &str) -> bool {
        self.profile.medical_conditions.iter().any(|c| c == name)
    }

    pub fn has_any_condition<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.has_condition(n.as_ref()))
    }

    /// Type 1 or Type 2 diabetes.
    pub fn has_diabetes(&self) -> bool {
        self.has_condition(conditions::DIABETES_TYPE_1)
            || self.has_condition(conditions::DIABETES_TYPE_2)
    }

    /// Selected conditions in selection order, each name once.
    pub fn conditions(&self) -> Vec<&'a str> {
        let profile: &'a PatientProfile = self.profile;
        let mut distinct: Vec<&'a str> = Vec::new();
        for name in &profile.medical_conditions {
            if !distinct.contains(&name.as_str()) {
                distinct.push(name.as_str());
            }
        }
        distinct
    }

    pub fn condition_count(&self) -> usize {
        self.conditions().len()
    }

    // ── Numeric thresholds ───────────────────────────────────────────────────

    pub fn age(&self) -> Option<u8> {
        self.profile.age
    }

    pub fn pain(&self) -> Option<u8> {
        self.profile.pain_level
    }

    pub fn age_at_least(&self, min: u8) -> bool {
        self.profile.age.is_some_and(|a| a >= min)
    }

    pub fn age_below(&self, bound: u8) -> bool {
        self.profile.age.is_some_and(|a| a < bound)
    }

    pub fn pain_at_least(&self, min: u8) -> bool {
        self.profile.pain_level.is_some_and(|p| p >= min)
    }

    /// Age rendered for rationale text, or "unknown".
    pub fn age_label(&self) -> String {
        self.profile
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Pain rendered for rationale text, or "?".
    pub fn pain_label(&self) -> String {
        self.profile
            .pain_level
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use triage_contracts::profile::{conditions, symptoms, PatientProfile};

    use super::ClinicalSignals;

    #[test]
    fn complaint_match_is_case_insensitive_substring() {
        let profile = PatientProfile::new("Sudden CHEST PAIN since morning");
        let signals = ClinicalSignals::new(&profile);

        assert!(signals.complaint_mentions("chest pain"));
        assert!(signals.complaint_mentions("Chest Pain"));
        assert!(!signals.complaint_mentions("headache"));
    }

    #[test]
    fn repeated_conditions_count_once() {
        let profile = PatientProfile {
            medical_conditions: vec![
                conditions::HEART_DISEASE.to_string(),
                conditions::ASTHMA.to_string(),
                conditions::HEART_DISEASE.to_string(),
            ],
            ..PatientProfile::new("tired")
        };
        let signals = ClinicalSignals::new(&profile);

        assert_eq!(signals.conditions(), vec![conditions::HEART_DISEASE, conditions::ASTHMA]);
        assert_eq!(signals.condition_count(), 2);
    }

    #[test]
    fn empty_keyword_never_matches() {
        let profile = PatientProfile::new("anything");
        let signals = ClinicalSignals::new(&profile);
        assert!(!signals.complaint_mentions(""));
        assert!(!signals.complaint_mentions("   "));
    }

    #[test]
    fn text_and_structured_paths_are_independent() {
        let text_only = PatientProfile::new("shortness of breath on stairs");
        let structured_only =
            PatientProfile::new("tired").with_symptom(symptoms::SHORTNESS_OF_BREATH);

        let text = ClinicalSignals::new(&text_only);
        assert!(text.complaint_mentions("shortness of breath"));
        assert!(!text.reports_symptom(symptoms::SHORTNESS_OF_BREATH));

        let structured = ClinicalSignals::new(&structured_only);
        assert!(!structured.complaint_mentions("shortness of breath"));
        assert!(structured.reports_symptom("shortness of breath"));

        assert!(text.presents_with("shortness of breath", symptoms::SHORTNESS_OF_BREATH));
        assert!(structured.presents_with("shortness of breath", symptoms::SHORTNESS_OF_BREATH));
    }

    #[test]
    fn missing_numbers_never_satisfy_thresholds() {
        let profile = PatientProfile::new("headache");
        let signals = ClinicalSignals::new(&profile);

        assert!(!signals.age_at_least(0));
        assert!(!signals.age_below(200));
        assert!(!signals.pain_at_least(0));
        assert_eq!(signals.age_label(), "unknown");
    }

    #[test]
    fn diabetes_covers_both_types() {
        let t1 = PatientProfile::new("x").with_condition(conditions::DIABETES_TYPE_1);
        let t2 = PatientProfile::new("x").with_condition(conditions::DIABETES_TYPE_2);
        let none = PatientProfile::new("x").with_condition(conditions::ASTHMA);

        assert!(ClinicalSignals::new(&t1).has_diabetes());
        assert!(ClinicalSignals::new(&t2).has_diabetes());
        assert!(!ClinicalSignals::new(&none).has_diabetes());
    }
}
