//! Candidate-condition findings produced by the condition matcher.

use serde::{Deserialize, Serialize};

/// A named condition the complaint pattern points towards.
///
/// `probability` is an author-assigned weight, not a posterior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCondition {
    pub name: String,
    pub probability: u8,
    pub description: String,
    /// Key factors behind the match, rendered as a comma-joined list.
    pub factors: Vec<String>,
    /// Recommended next action for the patient.
    pub recommendation: String,
}

/// Ranked candidate conditions, at most `MAX_CANDIDATES` long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionAnalysis {
    pub candidates: Vec<CandidateCondition>,
}

impl ConditionAnalysis {
    /// Upper bound on the number of candidates reported.
    pub const MAX_CANDIDATES: usize = 3;

    /// Keep insertion order and drop anything past `MAX_CANDIDATES`.
    pub fn truncated(mut candidates: Vec<CandidateCondition>) -> Self {
        candidates.truncate(Self::MAX_CANDIDATES);
        Self { candidates }
    }

    /// The first (highest-precedence) candidate.
    pub fn top(&self) -> Option<&CandidateCondition> {
        self.candidates.first()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
