//! Knowledge-base loader.
//!
//! `KnowledgeBase` wraps a validated `KnowledgeDocument`. It is built once at
//! startup and shared read-only (behind an `Arc`) by the gate, the scorer and
//! the simulator.
//!
//! Load-time checks:
//!
//! 1. Condition names are unique and non-blank.
//! 2. Age bands are ascending and do not overlap; only the last may be open.
//! 3. Every emergency pattern declares at least one clause, and pattern ids
//!    are unique.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use triage_contracts::error::{TriageError, TriageResult};

use crate::tables::{
    AgeRiskBand, CommonSymptom, ConditionRecord, EmergencyPattern, EmergencyProtocol,
    KnowledgeDocument, SymptomDiseaseEntry, TestCatalogCategory,
};

const BUILTIN_TOML: &str = include_str!("../data/knowledge_base.toml");

/// The validated, immutable clinical tables.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    doc: KnowledgeDocument,
}

impl KnowledgeBase {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `TriageError::KnowledgeBase` if the TOML is malformed, does not
    /// match `KnowledgeDocument`, or fails validation.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let doc: KnowledgeDocument = toml::from_str(s).map_err(|e| TriageError::KnowledgeBase {
            reason: format!("failed to parse knowledge base TOML: {}", e),
        })?;
        Self::from_document(doc)
    }

    /// Read the file at `path` and parse it as a knowledge base.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The knowledge base compiled into the binary.
    pub fn builtin() -> TriageResult<Self> {
        Self::from_toml_str(BUILTIN_TOML)
    }

    /// Validate an already-deserialized document.
    pub fn from_document(doc: KnowledgeDocument) -> TriageResult<Self> {
        validate_conditions(&doc.conditions)?;
        validate_age_bands(&doc.age_bands)?;
        validate_patterns(&doc.emergency_patterns)?;

        debug!(
            conditions = doc.conditions.len(),
            age_bands = doc.age_bands.len(),
            emergency_patterns = doc.emergency_patterns.len(),
            "knowledge base loaded"
        );

        Ok(Self { doc })
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn document(&self) -> &KnowledgeDocument {
        &self.doc
    }

    pub fn conditions(&self) -> &[ConditionRecord] {
        &self.doc.conditions
    }

    /// Look up a condition by its canonical name.
    pub fn condition(&self, name: &str) -> Option<&ConditionRecord> {
        self.doc.conditions.iter().find(|c| c.name == name)
    }

    pub fn condition_names(&self) -> impl Iterator<Item = &str> {
        self.doc.conditions.iter().map(|c| c.name.as_str())
    }

    pub fn age_bands(&self) -> &[AgeRiskBand] {
        &self.doc.age_bands
    }

    /// The first band containing `age`, if any.
    pub fn age_band_for(&self, age: u8) -> Option<&AgeRiskBand> {
        self.doc.age_bands.iter().find(|b| b.contains(age))
    }

    pub fn emergency_patterns(&self) -> &[EmergencyPattern] {
        &self.doc.emergency_patterns
    }

    pub fn common_symptoms(&self) -> &[CommonSymptom] {
        &self.doc.common_symptoms
    }

    pub fn test_catalog(&self) -> &[TestCatalogCategory] {
        &self.doc.test_catalog
    }

    pub fn symptom_disease_matrix(&self) -> &[SymptomDiseaseEntry] {
        &self.doc.symptom_disease_matrix
    }

    pub fn emergency_protocols(&self) -> &[EmergencyProtocol] {
        &self.doc.emergency_protocols
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

fn validate_conditions(conditions: &[ConditionRecord]) -> TriageResult<()> {
    let mut seen = HashSet::new();
    for record in conditions {
        if record.name.trim().is_empty() {
            return Err(TriageError::KnowledgeBase {
                reason: "condition with a blank name".to_string(),
            });
        }
        if !seen.insert(record.name.as_str()) {
            return Err(TriageError::KnowledgeBase {
                reason: format!("duplicate condition '{}'", record.name),
            });
        }
    }
    Ok(())
}

fn validate_age_bands(bands: &[AgeRiskBand]) -> TriageResult<()> {
    let mut previous_max: Option<u8> = None;
    for (i, band) in bands.iter().enumerate() {
        if let Some(max) = band.max_age {
            if max < band.min_age {
                return Err(TriageError::KnowledgeBase {
                    reason: format!("age band {} has max below min", band.label()),
                });
            }
        } else if i + 1 != bands.len() {
            return Err(TriageError::KnowledgeBase {
                reason: format!("open-ended age band {} must be last", band.label()),
            });
        }

        if i > 0 {
            match previous_max {
                Some(prev) if band.min_age > prev => {}
                _ => {
                    return Err(TriageError::KnowledgeBase {
                        reason: format!(
                            "age band {} overlaps or is out of order",
                            band.label()
                        ),
                    })
                }
            }
        }
        previous_max = band.max_age;
    }
    Ok(())
}

fn validate_patterns(patterns: &[EmergencyPattern]) -> TriageResult<()> {
    let mut ids = HashSet::new();
    for pattern in patterns {
        if pattern.is_unconstrained() {
            return Err(TriageError::KnowledgeBase {
                reason: format!("emergency pattern '{}' declares no clause", pattern.id),
            });
        }
        if !ids.insert(pattern.id.as_str()) {
            return Err(TriageError::KnowledgeBase {
                reason: format!("duplicate emergency pattern id '{}'", pattern.id),
            });
        }
    }
    Ok(())
}
