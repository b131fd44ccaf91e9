//! # triage-intake
//!
//! Host-boundary validation for submitted patient profiles.
//!
//! The engine itself treats malformed fields as absent and never fails; this
//! crate is where a host rejects a bad submission with a full list of
//! problems before a consultation is started.
//!
//! ```rust,ignore
//! let validator = ProfileValidator::new()?;
//! let profile = validator.parse_str(&std::fs::read_to_string("profile.json")?)?;
//! ```

pub mod schema;
pub mod validator;

pub use schema::profile_schema;
pub use validator::{parse_profile, IntakeFailure, IntakeReport, ProfileValidator};
