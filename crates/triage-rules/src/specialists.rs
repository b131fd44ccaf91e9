//! Specialist referrals.

use triage_contracts::{
    profile::{conditions, PatientProfile},
    recommendation::SpecialistReferral,
};
use triage_core::ClinicalSignals;

use crate::predicate::{CHEST_PAIN, DIABETES_OR_HEART_DISEASE, HEADACHE, LUNG_DISEASE};

fn referral(
    specialty: &str,
    localized: &str,
    reason: &str,
    urgency: &str,
    services: &str,
) -> SpecialistReferral {
    SpecialistReferral {
        specialty: specialty.to_string(),
        localized_specialty: localized.to_string(),
        reason: reason.to_string(),
        urgency: urgency.to_string(),
        services: services.to_string(),
    }
}

/// The referral reported when no specialty applies.
pub fn primary_care() -> SpecialistReferral {
    referral(
        "Primary Care Physician",
        "प्राथमिक चिकित्सक",
        "Based on your symptoms and medical history, start with your primary care physician \
         for initial evaluation. Specialist referrals will be made based on clinical findings.",
        "As soon as convenient",
        "Comprehensive evaluation, basic testing, and coordination of care",
    )
}

/// Specialist referrals in fixed order. Never empty.
pub fn recommend_specialists(profile: &PatientProfile) -> Vec<SpecialistReferral> {
    let signals = ClinicalSignals::new(profile);
    let mut referrals = Vec::new();

    if signals.has_diabetes() {
        let urgency = if signals.complaint_mentions("frequent urination") {
            "Within 1 week"
        } else {
            "Within 1 month"
        };
        referrals.push(referral(
            "Endocrinologist",
            "अंतःस्रावी रोग विशेषज्ञ",
            "Diabetes management and complication prevention",
            urgency,
            "Blood sugar control, medication adjustment, complication screening",
        ));
    }

    if CHEST_PAIN.holds(&signals) {
        let urgency = if DIABETES_OR_HEART_DISEASE.holds(&signals) {
            "Within 24-48 hours"
        } else {
            "Within 1 week"
        };
        referrals.push(referral(
            "Cardiologist",
            "हृदय रोग विशेषज्ञ",
            "Chest pain evaluation and cardiac risk assessment",
            urgency,
            "ECG interpretation, stress testing, cardiac catheterization if needed",
        ));
    }

    if signals.has_condition(conditions::HYPERTENSION) && HEADACHE.holds(&signals) {
        referrals.push(referral(
            "Neurologist",
            "न्यूरो रोग विशेषज्ञ",
            "Severe headache with hypertension evaluation",
            "Within 1-2 days",
            "Brain imaging interpretation, stroke risk assessment",
        ));
    }

    // Complaint text only; a picked symptom does not trigger this referral.
    if signals.complaint_mentions("shortness of breath") && LUNG_DISEASE.holds(&signals) {
        referrals.push(referral(
            "Pulmonologist",
            "फेफड़े के रोग विशेषज्ञ",
            "Breathing difficulty with lung disease",
            "Within 1 week",
            "Lung function testing, medication optimization, oxygen therapy",
        ));
    }

    if referrals.is_empty() {
        referrals.push(primary_care());
    }
    referrals
}

#[cfg(test)]
mod tests {
    use triage_contracts::profile::{conditions, symptoms, PatientProfile};

    use super::recommend_specialists;

    fn specialties(profile: &PatientProfile) -> Vec<String> {
        recommend_specialists(profile)
            .into_iter()
            .map(|r| r.specialty)
            .collect()
    }

    #[test]
    fn test_fallback_is_primary_care() {
        let referrals = recommend_specialists(&PatientProfile::new("tired"));
        assert_eq!(referrals.len(), 1);
        assert_eq!(referrals[0].specialty, "Primary Care Physician");
        assert_eq!(
            referrals[0].services,
            "Comprehensive evaluation, basic testing, and coordination of care"
        );
    }

    #[test]
    fn test_endocrinologist_timing() {
        let routine = PatientProfile::new("tired").with_condition(conditions::DIABETES_TYPE_2);
        assert_eq!(recommend_specialists(&routine)[0].urgency, "Within 1 month");

        let urinary =
            PatientProfile::new("frequent urination").with_condition(conditions::DIABETES_TYPE_2);
        assert_eq!(recommend_specialists(&urinary)[0].urgency, "Within 1 week");
    }

    #[test]
    fn test_cardiologist_timing() {
        let plain = PatientProfile::new("x").with_symptom(symptoms::CHEST_PAIN);
        let r = recommend_specialists(&plain);
        assert_eq!(r[0].specialty, "Cardiologist");
        assert_eq!(r[0].localized_specialty, "हृदय रोग विशेषज्ञ");
        assert_eq!(r[0].urgency, "Within 1 week");

        let cardiac = PatientProfile::new("chest pain").with_condition(conditions::HEART_DISEASE);
        assert_eq!(recommend_specialists(&cardiac)[0].urgency, "Within 24-48 hours");
    }

    #[test]
    fn test_order_across_specialties() {
        let profile = PatientProfile::new("chest pain, headache and shortness of breath")
            .with_condition(conditions::DIABETES_TYPE_1)
            .with_condition(conditions::HYPERTENSION)
            .with_condition(conditions::ASTHMA);

        assert_eq!(
            specialties(&profile),
            vec!["Endocrinologist", "Cardiologist", "Neurologist", "Pulmonologist"]
        );
    }

    #[test]
    fn test_pulmonologist_needs_complaint_text() {
        let picked = PatientProfile::new("tired")
            .with_symptom(symptoms::SHORTNESS_OF_BREATH)
            .with_condition(conditions::COPD);
        assert_eq!(specialties(&picked), vec!["Primary Care Physician"]);
    }
}
