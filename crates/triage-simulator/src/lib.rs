//! # triage-simulator
//!
//! Offline exercise harnesses for the triage engine.
//!
//! - [`run_diagnostic_simulation`] scores many synthetic profiles and reports
//!   the band distribution plus flagged anomalies.
//! - [`RandomProfileGenerator`] draws those profiles; a fixed seed makes a run
//!   reproducible.
//! - [`reference_scenarios`] are four canned patients with known outcomes.
//!
//! ```rust,ignore
//! let kb = Arc::new(KnowledgeBase::builtin()?);
//! let mut source = RandomProfileGenerator::new(&kb, Some(42));
//! let summary = run_diagnostic_simulation(10, &mut source, &WeightedRiskScorer::new(kb));
//! ```

pub mod generator;
pub mod scenarios;
pub mod simulation;

pub use generator::{FixedProfiles, ProfileSource, RandomProfileGenerator};
pub use scenarios::{
    reference_scenarios, run_reference_scenarios, run_scenario, ReferenceScenario,
    ScenarioExpectation, ScenarioResult,
};
pub use simulation::{run_diagnostic_simulation, SimulationAnomaly, SimulationSummary};

/// Default number of simulated profiles.
pub const DEFAULT_RUNS: usize = 10;
