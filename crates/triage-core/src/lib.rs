//! # triage-core
//!
//! The consultation runtime for the clinical triage engine.
//!
//! This crate provides:
//! - The four seam traits (`EmergencyGate`, `RiskScorer`, `ConditionMatcher`,
//!   `RecommendationEngine`)
//! - `ClinicalSignals`, the normalized read-only view every rule evaluates
//! - The `Consultation` runner that wires the seams together in order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use triage_core::{Consultation, traits::{EmergencyGate, RiskScorer}};
//! ```

pub mod consultation;
pub mod digest;
pub mod signals;
pub mod traits;

pub use consultation::Consultation;
pub use signals::ClinicalSignals;
