//! Clinical predicates for the static rule tables.
//!
//! A `Predicate` is a small boolean expression over `ClinicalSignals`. The
//! matcher and the test panel are declared as `const` tables of predicates so
//! their order and triggers can be read at a glance.
//!
//! Example:
//! ```rust,ignore
//! const CHEST_PAIN: Predicate = Predicate::Presents {
//!     keyword: "chest pain",
//!     symptom: symptoms::CHEST_PAIN,
//! };
//! ```

use triage_contracts::profile::{conditions, symptoms};
use triage_core::ClinicalSignals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The complaint contains the keyword.
    Mentions(&'static str),
    /// The complaint contains `keyword` or `symptom` was picked.
    Presents {
        keyword: &'static str,
        symptom: &'static str,
    },
    /// The named chronic condition was selected.
    Condition(&'static str),
    /// Type 1 or Type 2 diabetes.
    Diabetes,
    /// Known age ≥ the bound.
    AgeAtLeast(u8),
    /// Known pain level ≥ the bound.
    PainAtLeast(u8),
    Any(&'static [Predicate]),
    All(&'static [Predicate]),
}

impl Predicate {
    pub fn holds(&self, signals: &ClinicalSignals<'_>) -> bool {
        match self {
            Predicate::Mentions(keyword) => signals.complaint_mentions(keyword),
            Predicate::Presents { keyword, symptom } => signals.presents_with(keyword, symptom),
            Predicate::Condition(name) => signals.has_condition(name),
            Predicate::Diabetes => signals.has_diabetes(),
            Predicate::AgeAtLeast(min) => signals.age_at_least(*min),
            Predicate::PainAtLeast(min) => signals.pain_at_least(*min),
            Predicate::Any(preds) => preds.iter().any(|p| p.holds(signals)),
            Predicate::All(preds) => preds.iter().all(|p| p.holds(signals)),
        }
    }
}

// ── Shared presentations ─────────────────────────────────────────────────────

pub const CHEST_PAIN: Predicate = Predicate::Presents {
    keyword: "chest pain",
    symptom: symptoms::CHEST_PAIN,
};

pub const HEADACHE: Predicate = Predicate::Presents {
    keyword: "headache",
    symptom: symptoms::SEVERE_HEADACHE,
};

pub const FREQUENT_URINATION: Predicate = Predicate::Presents {
    keyword: "frequent urination",
    symptom: symptoms::FREQUENT_URINATION,
};

pub const SHORTNESS_OF_BREATH: Predicate = Predicate::Presents {
    keyword: "shortness of breath",
    symptom: symptoms::SHORTNESS_OF_BREATH,
};

pub const HYPERTENSION: Predicate = Predicate::Condition(conditions::HYPERTENSION);
pub const HEART_DISEASE: Predicate = Predicate::Condition(conditions::HEART_DISEASE);

pub const LUNG_DISEASE: Predicate = Predicate::Any(&[
    Predicate::Condition(conditions::ASTHMA),
    Predicate::Condition(conditions::COPD),
]);

pub const DIABETES_OR_HEART_DISEASE: Predicate =
    Predicate::Any(&[Predicate::Diabetes, HEART_DISEASE]);
