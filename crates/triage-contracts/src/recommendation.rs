//! Recommendation types: tests, treatment, referrals, and follow-up.
//!
//! Each generator produces one of these sections independently from the same
//! profile snapshot.

use serde::{Deserialize, Serialize};

use crate::assessment::RiskBand;

/// How soon a recommended test should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestUrgency {
    Immediate,
    Urgent,
    #[serde(rename = "within_24h")]
    Within24h,
    WithinWeek,
    Routine,
}

impl TestUrgency {
    pub fn as_str(self) -> &'static str {
        match self {
            TestUrgency::Immediate => "immediate",
            TestUrgency::Urgent => "urgent",
            TestUrgency::Within24h => "within_24h",
            TestUrgency::WithinWeek => "within_week",
            TestUrgency::Routine => "routine",
        }
    }
}

/// A single diagnostic test in the recommended panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedTest {
    pub name: String,
    /// Presentation group, e.g. "Cardiac Emergency".
    pub category: String,
    /// Indicative cost range, e.g. "₹150-300".
    pub cost: String,
    pub urgency: TestUrgency,
    /// What the test is meant to establish.
    pub purpose: String,
}

/// Tests sharing a category, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestGroup {
    pub category: String,
    pub tests: Vec<RecommendedTest>,
}

/// A labelled bullet, e.g. "Blood Sugar Management: Check glucose …".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareAction {
    pub label: String,
    pub detail: String,
}

impl CareAction {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }
}

/// The personalized care plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    /// Band the plan was produced under.
    pub risk_band: RiskBand,
    pub immediate_actions: Vec<CareAction>,
    pub lifestyle: Vec<CareAction>,
    /// "Seek immediate care if …" criteria.
    pub red_flags: Vec<String>,
}

/// A referral to a specialty (or the primary-care fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistReferral {
    pub specialty: String,
    pub localized_specialty: String,
    pub reason: String,
    /// Recommended timing, e.g. "Within 24-48 hours".
    pub urgency: String,
    pub services: String,
}

/// Follow-up urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowupUrgency {
    Urgent,
    Prompt,
    Routine,
}

/// One step in the follow-up timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub when: String,
    pub action: String,
}

/// The follow-up protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupPlan {
    pub risk_band: RiskBand,
    pub urgency: FollowupUrgency,
    pub timeline: Vec<TimelineEntry>,
    /// Condition-specific monitoring; empty when no conditions were selected.
    pub monitoring: Vec<CareAction>,
    /// "Call 108 immediately if …" criteria.
    pub emergency_criteria: Vec<String>,
    pub self_care: Vec<CareAction>,
}
