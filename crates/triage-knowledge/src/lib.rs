//! # triage-knowledge
//!
//! The TOML-declared clinical knowledge base and the emergency gate built on
//! top of it.
//!
//! ## Overview
//!
//! [`KnowledgeBase`] holds the condition table, age risk bands, emergency
//! patterns and the common-symptom list. A default document is compiled into
//! the crate; hosts may load their own with [`KnowledgeBase::from_file`].
//!
//! [`PatternGate`] implements the
//! [`EmergencyGate`](triage_core::traits::EmergencyGate) trait by evaluating
//! every declared emergency pattern.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use triage_knowledge::{KnowledgeBase, PatternGate};
//!
//! let kb = Arc::new(KnowledgeBase::builtin()?);
//! let gate = PatternGate::new(kb.clone());
//! ```

pub mod base;
pub mod gate;
pub mod tables;

pub use base::KnowledgeBase;
pub use gate::PatternGate;
pub use tables::{
    AgeRiskBand, CommonSymptom, ConditionRecord, EmergencyPattern, KnowledgeDocument,
    QualitativeRisk, RiskTier,
};

// ── Tests ─────────────────────────────────────────────────────────────────────
