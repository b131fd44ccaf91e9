//! # triage-contracts
//!
//! Shared types for the clinical triage engine.
//!
//! Every crate in the workspace imports from here. It holds the patient
//! profile, the derived assessment and report types, and the error type. No
//! decision logic lives here.

pub mod assessment;
pub mod error;
pub mod findings;
pub mod profile;
pub mod recommendation;
pub mod report;
