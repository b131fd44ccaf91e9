//! Risk assessment types.
//!
//! The risk scorer accumulates `RiskFactor`s in evaluation order and maps the
//! total onto a `RiskBand`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four-level risk classification.
///
/// Variants are declared from lowest to highest so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "LOW-MEDIUM")]
    LowMedium,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl RiskBand {
    pub const ALL: [RiskBand; 4] = [
        RiskBand::Low,
        RiskBand::LowMedium,
        RiskBand::Medium,
        RiskBand::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::LowMedium => "LOW-MEDIUM",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named contributor to the additive risk score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Human-readable rationale shown in the report.
    pub rationale: String,
    /// Points this factor added. Zero for context-only factors.
    pub points: u32,
}

/// The full output of the risk scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub band: RiskBand,
    /// Sum of all factor points.
    pub score: u32,
    /// Factors in the order they were evaluated, not sorted by weight.
    pub factors: Vec<RiskFactor>,
    /// Fixed rationale message for the band.
    pub message: String,
    /// Fixed confidence percentage for the band.
    pub confidence: u8,
    /// True when an escalation rule forced the band regardless of `score`.
    pub override_applied: bool,
}

impl RiskAssessment {
    /// Rationale strings in evaluation order.
    pub fn rationales(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|f| f.rationale.as_str())
    }
}
