//! Error types for the triage workspace.
//!
//! Decision logic is infallible by construction; errors only arise at the
//! edges: loading the knowledge base, reading configuration, and validating a
//! profile at intake.

use thiserror::Error;

/// The unified error type for the triage crates.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The knowledge base document could not be parsed or failed validation.
    #[error("knowledge base error: {reason}")]
    KnowledgeBase { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The submitted profile failed intake validation.
    #[error("invalid patient profile: {reason}")]
    InvalidProfile { reason: String },

    /// A file could not be read or written.
    #[error("i/o error on '{path}': {reason}")]
    Io { path: String, reason: String },

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the triage crates.
pub type TriageResult<T> = Result<T, TriageError>;
